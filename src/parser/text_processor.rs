use crate::models::RangeSet;
use crate::utils::{FountainConstants, LINE_REGEX};

// 去掉 ranges 覆盖的字节，其余字符保持原有顺序
pub fn remove_ranges(text: &str, ranges: &RangeSet) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    text.char_indices()
        .filter(|(i, _)| !ranges.contains(*i))
        .map(|(_, c)| c)
        .collect()
}

/// 把整篇文本切成行，返回 (行文本, 行首偏移)
///
/// 以 `\n` 分行，行尾的 `\r` 不算在行文本里，但计入下一行的偏移。
pub fn split_lines(script: &str) -> Vec<(&str, usize)> {
    let mut lines = Vec::new();
    if script.is_empty() {
        return lines;
    }

    let mut position = 0;
    for segment in script.split('\n') {
        let text = segment.strip_suffix('\r').unwrap_or(segment);
        lines.push((text, position));
        position += segment.len() + 1;
    }
    lines
}

// 去除角色名前的@符号
pub fn trim_character_force_symbol(text: &str) -> &str {
    let trimmed = text.trim_start();
    trimmed
        .strip_prefix(FountainConstants::CHARACTER_CHAR)
        .unwrap_or(trimmed)
}

// 去除角色名后的扩展部分和双对白标记
pub fn trim_character_extension(text: &str) -> String {
    let without_dual = text
        .trim_end()
        .trim_end_matches(FountainConstants::DUAL_DIALOGUE_CHAR)
        .trim_end();
    LINE_REGEX["character_extension"]
        .replace_all(without_dual, "")
        .trim()
        .to_string()
}

/// 全大写：至少一个字母，并且没有小写字母
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic()) && !text.chars().any(|c| c.is_lowercase())
}
