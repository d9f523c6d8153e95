use std::time::Instant;
use log::{trace, warn};
use serde::Serialize;
use crate::models::{Conf, Line};
use crate::parser::context::ClassificationContext;
use crate::parser::line_classifier::classify_line;
use crate::parser::range_annotator::annotate;
use crate::parser::second_pass;
use crate::parser::text_processor::split_lines;

/// 解析结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutput {
    /// 每个输入行一条记录，顺序与输入一致
    pub lines: Vec<Line>,
    /// 文档结束时仍有未关闭的省略块
    pub unclosed_omission: bool,
    /// 没有等到对白的角色行号（连续模式下这些行仍是 character）
    pub unconfirmed_cues: Vec<usize>,
    /// 解析耗时（毫秒）
    pub parse_time: u64,
}

/// 文档结束时的收尾信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub unclosed_omission: bool,
    pub unconfirmed_cues: Vec<usize>,
}

/// 行分类驱动器
///
/// 连续模式：逐行调用 [`FountainParser::parse_line`]，每行立即得到最终结果，
/// 最后调用 [`FountainParser::finish`]。批量模式：[`FountainParser::parse_document`]
/// 先走一遍连续分类，再用第二遍做向后看的修正。
///
/// 每个实例只服务一篇文档；并发解析多篇文档时每篇各建一个实例。
pub struct FountainParser {
    conf: Conf,
    ctx: ClassificationContext,
}

impl FountainParser {
    pub fn new(conf: Conf) -> Self {
        let ctx = ClassificationContext::new(conf.parse_title_page);
        FountainParser { conf, ctx }
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// 丢弃上下文，从文档开头重新开始
    pub fn reset(&mut self) {
        self.ctx = ClassificationContext::new(self.conf.parse_title_page);
    }

    /// 分类一行。position 由调用方提供，是该行首字符在文档中的偏移
    pub fn parse_line(&mut self, raw: &str, position: usize) -> Line {
        let annotation = annotate(raw);
        let omission = self.ctx.omissions.process(raw, &annotation.note);
        let line = classify_line(raw, position, omission, annotation, &mut self.ctx, &self.conf);
        trace!("{} @{}", line, position);
        line
    }

    /// 文档结束，返回收尾信息并重置上下文
    pub fn finish(&mut self) -> ParseSummary {
        self.ctx.close_block();
        let unclosed_omission = self.ctx.omissions.finish();
        if unclosed_omission {
            warn!("文档结束时省略块没有关闭");
        }
        let summary = ParseSummary {
            unclosed_omission,
            unconfirmed_cues: std::mem::take(&mut self.ctx.unconfirmed_cues),
        };
        self.reset();
        summary
    }

    /// 连续模式解析整篇文本
    pub fn parse(&mut self, script: &str) -> ParseOutput {
        let start = Instant::now();
        self.reset();

        let lines: Vec<Line> = split_lines(script)
            .into_iter()
            .map(|(raw, position)| self.parse_line(raw, position))
            .collect();
        let summary = self.finish();

        ParseOutput {
            lines,
            unclosed_omission: summary.unclosed_omission,
            unconfirmed_cues: summary.unconfirmed_cues,
            parse_time: start.elapsed().as_millis() as u64,
        }
    }

    /// 批量模式解析整篇文本：第一遍连续分类，第二遍修正
    pub fn parse_document(&mut self, script: &str) -> ParseOutput {
        let start = Instant::now();
        let first = self.parse(script);
        let lines = second_pass::correct(first.lines, &first.unconfirmed_cues);

        ParseOutput {
            lines,
            unclosed_omission: first.unclosed_omission,
            unconfirmed_cues: first.unconfirmed_cues,
            parse_time: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new(Conf::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineType;

    #[test]
    fn test_empty_script_has_no_lines() {
        let mut parser = FountainParser::default();
        let result = parser.parse("");
        assert!(result.lines.is_empty());
        assert!(!result.unclosed_omission);
    }

    #[test]
    fn test_streaming_matches_whole_document() {
        let script = "INT. ROOM - DAY\n\nJOHN\nHello.\n";
        let mut whole = FountainParser::default();
        let expected = whole.parse(script).lines;

        let mut streaming = FountainParser::default();
        let streamed: Vec<Line> = split_lines(script)
            .into_iter()
            .map(|(raw, position)| streaming.parse_line(raw, position))
            .collect();
        streaming.finish();

        assert_eq!(streamed, expected);
    }

    #[test]
    fn test_continuous_keeps_unconfirmed_cue() {
        let mut parser = FountainParser::default();
        let result = parser.parse("\nBOOM\n\nThe wall falls.");
        assert_eq!(result.lines[1].line_type, LineType::Character);
        assert_eq!(result.unconfirmed_cues, vec![1]);

        let batch = parser.parse_document("\nBOOM\n\nThe wall falls.");
        assert_eq!(batch.lines[1].line_type, LineType::Action);
    }

    #[test]
    fn test_cue_at_end_of_document() {
        let mut parser = FountainParser::default();
        let result = parser.parse_document("Walking.\n\nTHE END");
        assert_eq!(result.lines[2].line_type, LineType::Action);
    }

    #[test]
    fn test_parser_is_reusable() {
        let mut parser = FountainParser::default();
        let first = parser.parse("Some [[open");
        assert!(first.unclosed_omission);
        let second = parser.parse("Plain text");
        assert!(!second.unclosed_omission);
        assert!(second.lines[0].omitted_ranges.is_empty());
    }
}
