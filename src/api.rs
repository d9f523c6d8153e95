//! 对外接口
//!
//! 给宿主程序（编辑器、绑定层）调用的简单入口，输入文本，输出 JSON。

use serde::{Deserialize, Serialize};
use crate::models::Conf;
use crate::parser::FountainParser;

/// 解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// 逐行确定结果，适合编辑时增量解析
    #[default]
    Continuous,
    /// 整篇解析后再做第二遍修正
    Batch,
}

/// 解析Fountain文本，返回 JSON 格式的 `ParseOutput`
///
/// 序列化失败时返回 `{}`。
pub fn parse_fountain_text(text: &str, config: Option<Conf>, mode: ParseMode) -> String {
    let mut parser = FountainParser::new(config.unwrap_or_default());
    let result = match mode {
        ParseMode::Continuous => parser.parse(text),
        ParseMode::Batch => parser.parse_document(text),
    };

    serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
}
