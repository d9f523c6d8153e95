use std::ops::Range;
use serde::{Deserialize, Serialize};

/// 有序、互不重叠的半开区间集合
///
/// 插入时与相邻或重叠的区间合并，所以同一集合内永远不会出现重叠。
/// 区间使用 `raw_text` 的字节偏移。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(usize, usize)>", into = "Vec<(usize, usize)>")]
pub struct RangeSet {
    ranges: Vec<Range<usize>>,
}

impl RangeSet {
    pub fn new() -> Self {
        RangeSet { ranges: Vec::new() }
    }

    /// 插入一个区间，空区间直接忽略
    pub fn insert(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }

        // 第一个可能与新区间相接的位置
        let first = self.ranges.partition_point(|r| r.end < range.start);
        let mut merged = range;
        let mut last = first;
        while last < self.ranges.len() && self.ranges[last].start <= merged.end {
            merged.start = merged.start.min(self.ranges[last].start);
            merged.end = merged.end.max(self.ranges[last].end);
            last += 1;
        }

        self.ranges.splice(first..last, std::iter::once(merged));
    }

    pub fn contains(&self, index: usize) -> bool {
        let i = self.ranges.partition_point(|r| r.end <= index);
        self.ranges.get(i).map_or(false, |r| r.start <= index)
    }

    /// 是否与给定区间有交集
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        if range.start >= range.end {
            return false;
        }
        let i = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges.get(i).map_or(false, |r| r.start < range.end)
    }

    /// 区间 `range` 内的每个位置都被覆盖
    pub fn covers(&self, range: &Range<usize>) -> bool {
        if range.start >= range.end {
            return true;
        }
        let i = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges
            .get(i)
            .map_or(false, |r| r.start <= range.start && r.end >= range.end)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range<usize>> {
        self.ranges.iter()
    }

    /// 区间个数
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// 被覆盖的位置总数
    pub fn covered(&self) -> usize {
        self.ranges.iter().map(|r| r.end - r.start).sum()
    }

    pub fn union(&self, other: &RangeSet) -> RangeSet {
        let mut result = self.clone();
        for r in other.iter() {
            result.insert(r.clone());
        }
        result
    }
}

impl From<Vec<(usize, usize)>> for RangeSet {
    fn from(pairs: Vec<(usize, usize)>) -> Self {
        let mut set = RangeSet::new();
        for (start, end) in pairs {
            set.insert(start..end);
        }
        set
    }
}

impl From<RangeSet> for Vec<(usize, usize)> {
    fn from(set: RangeSet) -> Self {
        set.ranges.into_iter().map(|r| (r.start, r.end)).collect()
    }
}

impl FromIterator<Range<usize>> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Range<usize>>>(iter: I) -> Self {
        let mut set = RangeSet::new();
        for r in iter {
            set.insert(r);
        }
        set
    }
}
