//! 行内样式区间标注
//!
//! 扫描一行原始文本中的注解 `/* */`、粗体 `**`、斜体 `*` 和下划线 `_`，
//! 得到每种样式的区间集合。区间包含分隔符本身，坐标是原始文本的字节偏移，
//! 这样高亮时可以直接对应到源文本上。
//!
//! 扫描是贪婪、不回溯的：每个开口取第一个合法的闭口。已经被前一种样式占用的
//! 分隔符字符不能再用（依次是注解、粗体、斜体），前面带 `\` 的分隔符视为普通
//! 字符。配不上对的分隔符保持原样，不会报错。

use std::ops::Range;
use crate::models::RangeSet;
use crate::parser::text_processor::remove_ranges;
use crate::utils::FountainConstants;

/// 一行文本的标注结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub bold: RangeSet,
    pub italic: RangeSet,
    pub underline: RangeSet,
    pub note: RangeSet,
    /// 分隔符和转义符所在位置
    pub markers: RangeSet,
    /// 去掉注解和分隔符后的文本
    pub cleaned: String,
}

impl Annotation {
    /// 从 offset 开始连续的标记字符个数
    pub fn leading_markers_from(&self, offset: usize) -> usize {
        let mut i = offset;
        while self.markers.contains(i) {
            i += 1;
        }
        i - offset
    }

    /// 每个注解的正文（不含分隔符）
    pub fn note_bodies<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        let open = FountainConstants::NOTE_OPEN.len();
        let close = FountainConstants::NOTE_CLOSE.len();
        self.note
            .iter()
            .filter(|r| r.end - r.start >= open + close)
            .map(|r| &raw[r.start + open..r.end - close])
            .collect()
    }
}

pub fn annotate(raw: &str) -> Annotation {
    let bytes = raw.as_bytes();
    let mut markers = RangeSet::new();

    let note = pair_ranges(
        bytes,
        FountainConstants::NOTE_OPEN,
        FountainConstants::NOTE_CLOSE,
        &mut markers,
    );
    let bold = pair_ranges(bytes, FountainConstants::BOLD, FountainConstants::BOLD, &mut markers);
    let italic = pair_ranges(bytes, FountainConstants::ITALIC, FountainConstants::ITALIC, &mut markers);
    let underline = pair_ranges(
        bytes,
        FountainConstants::UNDERLINE,
        FountainConstants::UNDERLINE,
        &mut markers,
    );

    // 转义符本身也算标记
    for (i, pair) in bytes.windows(2).enumerate() {
        if pair[0] == FountainConstants::ESCAPE && (pair[1] == b'*' || pair[1] == b'_') {
            markers.insert(i..i + 1);
        }
    }

    let cleaned = remove_ranges(raw, &note.union(&markers));

    Annotation {
        bold,
        italic,
        underline,
        note,
        markers,
        cleaned,
    }
}

// 查找成对分隔符，找到的分隔符加入 claimed
fn pair_ranges(bytes: &[u8], open: &str, close: &str, claimed: &mut RangeSet) -> RangeSet {
    let open = open.as_bytes();
    let close = close.as_bytes();
    let mut ranges = RangeSet::new();
    let mut found: Vec<Range<usize>> = Vec::new();
    let mut opener: Option<usize> = None;

    let mut i = 0;
    while i < bytes.len() {
        match opener {
            None => {
                if delimiter_at(bytes, i, open, claimed) {
                    opener = Some(i);
                    i += open.len();
                    continue;
                }
            }
            Some(start) => {
                // 内容不能为空
                if i > start + open.len() && delimiter_at(bytes, i, close, claimed) {
                    ranges.insert(start..i + close.len());
                    found.push(start..start + open.len());
                    found.push(i..i + close.len());
                    opener = None;
                    i += close.len();
                    continue;
                }
            }
        }
        i += 1;
    }

    for r in found {
        claimed.insert(r);
    }
    ranges
}

fn delimiter_at(bytes: &[u8], i: usize, delim: &[u8], claimed: &RangeSet) -> bool {
    if !bytes[i..].starts_with(delim) {
        return false;
    }
    if i > 0 && bytes[i - 1] == FountainConstants::ESCAPE {
        return false;
    }
    !claimed.overlaps(&(i..i + delim.len()))
}
