use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::line_type::LineType;
use crate::models::range_set::RangeSet;
use crate::parser::text_processor::remove_ranges;

/// 一行剧本文本的分类结果
///
/// 所有区间都是 `raw_text` 内的字节偏移，`position` 是该行首字符在整篇文档中的偏移。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 行类型
    #[serde(rename = "type")]
    pub line_type: LineType,
    /// 原始文本（不含换行符）
    pub raw_text: String,
    /// 行首在文档中的偏移
    pub position: usize,
    /// 语义文本之前被剥离的标记字符数
    pub preceding_formatting_char_count: usize,
    /// 章节层级，仅 section 有意义
    pub section_depth: usize,
    /// 场景编号，仅 heading 有意义
    pub scene_number: Option<String>,
    /// 颜色标签
    pub color_tag: Option<String>,
    pub bold_ranges: RangeSet,
    pub italic_ranges: RangeSet,
    pub underlined_ranges: RangeSet,
    pub note_ranges: RangeSet,
    pub omitted_ranges: RangeSet,
    /// 行内样式分隔符本身所在位置
    pub marker_ranges: RangeSet,
    /// 本行结束了之前行开启的省略块
    pub omit_in: bool,
    /// 本行结束时省略块仍处于打开状态
    pub omit_out: bool,
    /// 被拆成多行的段落的后续行（仅批量解析）
    pub is_split_paragraph: bool,
    /// 紧随其后的角色开始双对白（仅批量解析）
    pub next_is_dual_dialogue: bool,
}

impl Line {
    pub fn new(raw_text: &str, position: usize) -> Self {
        Line::with_type_at(raw_text, LineType::Empty, position)
    }

    pub fn with_type(raw_text: &str, line_type: LineType) -> Self {
        Line::with_type_at(raw_text, line_type, 0)
    }

    pub fn with_type_at(raw_text: &str, line_type: LineType, position: usize) -> Self {
        Line {
            line_type,
            raw_text: raw_text.to_string(),
            position,
            preceding_formatting_char_count: 0,
            section_depth: 0,
            scene_number: None,
            color_tag: None,
            bold_ranges: RangeSet::new(),
            italic_ranges: RangeSet::new(),
            underlined_ranges: RangeSet::new(),
            note_ranges: RangeSet::new(),
            omitted_ranges: RangeSet::new(),
            marker_ranges: RangeSet::new(),
            omit_in: false,
            omit_out: false,
            is_split_paragraph: false,
            next_is_dual_dialogue: false,
        }
    }

    /// 行尾（不含换行符）在文档中的偏移
    pub fn end(&self) -> usize {
        self.position + self.raw_text.len()
    }

    // 去掉省略内容、注解和样式标记后的文本
    pub fn cleaned_text(&self) -> String {
        let hidden = self
            .omitted_ranges
            .union(&self.note_ranges)
            .union(&self.marker_ranges);
        remove_ranges(&self.raw_text, &hidden)
    }

    /// 整行可见字符都被省略
    pub fn is_omitted(&self) -> bool {
        if self.omitted_ranges.is_empty() {
            return false;
        }
        self.raw_text
            .char_indices()
            .all(|(i, c)| c.is_whitespace() || self.omitted_ranges.contains(i))
    }

    /// 打印时不可见：被省略、章节、概要，或只有注解
    pub fn is_invisible(&self) -> bool {
        if self.is_omitted() {
            return true;
        }
        if matches!(self.line_type, LineType::Section | LineType::Synopsis) {
            return true;
        }
        !self.note_ranges.is_empty()
            && remove_ranges(&self.raw_text, &self.note_ranges.union(&self.omitted_ranges))
                .trim()
                .is_empty()
    }

    pub fn is_title_page(&self) -> bool {
        self.line_type.is_title_page()
    }

    pub fn is_dialogue_element(&self) -> bool {
        self.line_type.is_dialogue_element()
    }

    pub fn type_as_string(&self) -> &'static str {
        self.line_type.as_str()
    }

    pub fn type_as_fountain_string(&self) -> &'static str {
        self.line_type.fountain_name()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line_type, self.raw_text)
    }
}
