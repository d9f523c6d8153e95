use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

pub struct FountainConstants;

impl FountainConstants {
    // 省略块
    pub const OMIT_OPEN: &'static str = "[[";
    pub const OMIT_CLOSE: &'static str = "]]";

    // 注解
    pub const NOTE_OPEN: &'static str = "/*";
    pub const NOTE_CLOSE: &'static str = "*/";

    // 行内样式
    pub const BOLD: &'static str = "**";
    pub const ITALIC: &'static str = "*";
    pub const UNDERLINE: &'static str = "_";
    pub const ESCAPE: u8 = b'\\';

    // 强制类型前缀
    pub const SECTION_CHAR: char = '#';
    pub const SYNOPSIS_CHAR: char = '=';
    pub const LYRICS_CHAR: char = '~';
    pub const ACTION_CHAR: char = '!';
    pub const CHARACTER_CHAR: char = '@';
    pub const HEADING_CHAR: char = '.';
    pub const TRANSITION_CHAR: char = '>';
    pub const DUAL_DIALOGUE_CHAR: char = '^';

    /// 标题页关键字（小写）到类型名的映射
    ///
    /// 只有这些关键字能开启标题页。映射为 "other" 的关键字是可识别的，
    /// 但归为 title-page-unknown。
    pub fn title_page_keys() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.insert("title", "title");
        map.insert("author", "author");
        map.insert("authors", "author");
        map.insert("credit", "credit");
        map.insert("source", "source");
        map.insert("contact", "contact");
        map.insert("contact info", "contact");
        map.insert("draft date", "draft_date");
        map.insert("date", "draft_date");
        for key in [
            "notes", "watermark", "revision", "copyright", "font", "font italic", "font bold",
            "font bold italic", "metadata", "tl", "tc", "tr", "cc", "br", "bl", "header", "footer",
        ] {
            map.insert(key, "other");
        }
        map
    }

    /// 续页标记的固定写法
    pub fn more_tokens() -> &'static [&'static str] {
        &["(MORE)", "MORE", "(MORE...)"]
    }
}

lazy_static! {
    // 行分类正则
    pub static ref LINE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("title_page", Regex::new(r"^([A-Za-z][A-Za-z ]*?)[ \t]*:(.*)$").unwrap());
        map.insert("title_page_continuation", Regex::new(r"^(?:\t| {3,})\S").unwrap());
        map.insert("page_break", Regex::new(r"^\s*={3,}\s*$").unwrap());
        map.insert("scene_heading", Regex::new(r"^[ \t]*(?i:int[.]?/ext|i[.]?/e|int|ext|est)[. ]").unwrap());
        map.insert("scene_number", Regex::new(r"#\s*([^#\s][^#]*?)\s*#\s*$").unwrap());
        map.insert("scene_number_parenthesized", Regex::new(r"\(\s*([A-Za-z0-9.\-]*[0-9][A-Za-z0-9.\-]*)\s*\)\s*$").unwrap());
        map.insert("transition", Regex::new(r"^(?:[\p{Lu}\d \t.']+TO:|FADE OUT\.|FADE TO BLACK\.|CUT TO BLACK\.)$").unwrap());
        map.insert("character_extension", Regex::new(r"[ \t]*(\([^)]*\)|（[^）]*）)").unwrap());
        map.insert("parenthetical", Regex::new(r"^[ \t]*(\(.*\)|（.*）)\s*$").unwrap());
        map.insert("parenthetical_start", Regex::new(r"^[ \t]*(?:\(|（)").unwrap());
        map.insert("parenthetical_end", Regex::new(r"(?:\)|）)\s*$").unwrap());
        map.insert("centered", Regex::new(r"^[ \t]*>.*<\s*$").unwrap());
        map.insert("color", Regex::new(r"(?i)^\s*colou?r\s+(.+?)\s*$").unwrap());
        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_heading_lexicon() {
        let re = &LINE_REGEX["scene_heading"];
        for heading in ["INT. HOUSE - DAY", "EXT PARK", "int./ext. CAR", "I/E. VAN", "EST. CITY"] {
            assert!(re.is_match(heading), "{}", heading);
        }
        for other in ["INTERIOR DESIGN", "EXTRA!", "Internal memo"] {
            assert!(!re.is_match(other), "{}", other);
        }
    }

    #[test]
    fn test_transition_lexicon() {
        let re = &LINE_REGEX["transition"];
        assert!(re.is_match("CUT TO:"));
        assert!(re.is_match("SMASH CUT TO:"));
        assert!(re.is_match("FADE OUT."));
        assert!(!re.is_match("Cut to:"));
        assert!(!re.is_match("JOHN"));
    }

    #[test]
    fn test_scene_number_patterns() {
        let caps = LINE_REGEX["scene_number"].captures("INT. HOUSE - DAY #12A#").unwrap();
        assert_eq!(&caps[1], "12A");
        let caps = LINE_REGEX["scene_number_parenthesized"].captures("EXT. PARK (4)").unwrap();
        assert_eq!(&caps[1], "4");
        assert!(LINE_REGEX["scene_number_parenthesized"].captures("EXT. PARK (LATER)").is_none());
    }
}
