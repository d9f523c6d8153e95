use crate::models::RangeSet;
use crate::utils::FountainConstants;

/// 一行的省略状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Omission {
    /// 本行关闭了前面行打开的省略块
    pub omit_in: bool,
    /// 本行结束时省略块仍然打开
    pub omit_out: bool,
    /// 被省略的区间（包含 `[[` `]]` 本身）
    pub ranges: RangeSet,
}

/// 跨行省略块跟踪
///
/// 格式规定同一时刻最多只有一个省略块，所以只需要一个布尔标记，不需要栈。
#[derive(Debug, Clone, Default)]
pub struct OmissionTracker {
    open: bool,
}

impl OmissionTracker {
    pub fn new() -> Self {
        OmissionTracker { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 文档结束，返回是否有未关闭的省略块
    pub fn finish(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        was_open
    }

    /// 处理一行。notes 是本行的注解区间，落在注解里的 `[[` 不算开口
    pub fn process(&mut self, text: &str, notes: &RangeSet) -> Omission {
        let mut result = Omission::default();
        let mut cursor = 0;

        if self.open {
            match text.find(FountainConstants::OMIT_CLOSE) {
                Some(idx) => {
                    let end = idx + FountainConstants::OMIT_CLOSE.len();
                    result.ranges.insert(0..end);
                    result.omit_in = true;
                    self.open = false;
                    cursor = end;
                }
                None => {
                    // 整行都在省略块里
                    result.ranges.insert(0..text.len());
                    result.omit_out = true;
                    return result;
                }
            }
        }

        // 省略块关闭状态：在剩余部分里找新的开口
        while let Some(idx) = text[cursor..].find(FountainConstants::OMIT_OPEN) {
            let start = cursor + idx;
            let body = start + FountainConstants::OMIT_OPEN.len();
            if notes.contains(start) {
                cursor = body;
                continue;
            }
            match text[body..].find(FountainConstants::OMIT_CLOSE) {
                Some(close_idx) => {
                    let end = body + close_idx + FountainConstants::OMIT_CLOSE.len();
                    result.ranges.insert(start..end);
                    cursor = end;
                }
                None => {
                    result.ranges.insert(start..text.len());
                    result.omit_out = true;
                    self.open = true;
                    break;
                }
            }
        }

        result
    }
}
