pub mod models;
pub mod utils;
pub mod parser;
pub mod errors;
pub mod api;

pub use models::{
    Conf,
    Line,
    LineType,
    RangeSet
};

pub use parser::{
    FountainParser,
    ParseOutput,
    ParseSummary
};

pub use errors::{FountainError, FountainResult};

pub use api::{
    ParseMode,
    parse_fountain_text
};

/// 连续模式解析 Fountain 文本
///
/// 每行的结果只依赖它之前的内容，和逐行输入时得到的结果一致。
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
/// * `config` - 配置对象
pub fn parse_continuous(script: &str, config: &Conf) -> ParseOutput {
    let mut parser = FountainParser::new(config.clone());
    parser.parse(script)
}

/// 批量模式解析 Fountain 文本
///
/// 在连续模式结果的基础上做向后看的修正：没有对白的角色、后面没有空行的转场、
/// 双对白关联和段落续行。
pub fn parse_document(script: &str, config: &Conf) -> ParseOutput {
    let mut parser = FountainParser::new(config.clone());
    parser.parse_document(script)
}
