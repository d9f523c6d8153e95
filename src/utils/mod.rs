pub mod fountain_constants;

pub use fountain_constants::{FountainConstants, LINE_REGEX};

/// 只包含空白字符的行
pub fn is_blank_line(text: &str) -> bool {
    text.trim().is_empty()
}

/// 两个及以上空格组成的行，Fountain 用它在对白块内保留空行
pub fn is_two_space_line(text: &str) -> bool {
    text.len() >= 2 && text.bytes().all(|b| b == b' ')
}
