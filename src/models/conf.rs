use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::errors::{FountainError, FountainResult};

/// 分类器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 是否识别文档开头的标题页
    pub parse_title_page: bool,
    /// 是否把以 ^ 结尾的角色识别为双对白
    pub use_dual_dialogue: bool,
    /// 场景标题末尾的 (12A) 是否作为场景编号
    pub parenthesized_scene_numbers: bool,
    /// 额外的 more 续页标记
    pub text_more: String,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            parse_title_page: true,
            use_dual_dialogue: true,
            parenthesized_scene_numbers: true,
            text_more: "(MORE)".to_string(),
        }
    }
}

impl Conf {
    /// 从 JSON 文本读取配置，缺失的字段使用默认值
    pub fn from_json_str(json: &str) -> FountainResult<Conf> {
        let conf: Conf = serde_json::from_str(json)?;
        if conf.text_more.trim().is_empty() {
            return Err(FountainError::Config("text_more 不能为空".to_string()));
        }
        Ok(conf)
    }

    pub fn load(path: impl AsRef<Path>) -> FountainResult<Conf> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FountainError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Conf::from_json_str(&content)
    }
}
