//! 行分类
//!
//! 根据一行文本、它的省略状态和样式标注，以及分类上下文，决定行类型和附加属性。
//! 分类对任意输入都有结果，认不出来的内容一律归为 action。
//!
//! 判断使用的是"有效内容"：原始文本去掉省略区间和注解区间后的部分。
//! 场景标题的规则排在角色规则之前，所以 `INT. HOUSE - DAY` 这类全大写的场景标题
//! 不会被当成角色。

use log::debug;
use crate::models::{Conf, Line, LineType};
use crate::parser::context::ClassificationContext;
use crate::parser::omission_tracker::Omission;
use crate::parser::range_annotator::Annotation;
use crate::parser::text_processor::{
    is_all_caps, remove_ranges, trim_character_extension, trim_character_force_symbol,
};
use crate::utils::{is_blank_line, is_two_space_line, FountainConstants, LINE_REGEX};

/// 分类一行并推进上下文
pub fn classify_line(
    raw: &str,
    position: usize,
    omission: Omission,
    annotation: Annotation,
    ctx: &mut ClassificationContext,
    conf: &Conf,
) -> Line {
    let mut line = Line::with_type_at(raw, LineType::Empty, position);
    line.color_tag = color_tag(raw, &annotation);
    line.omit_in = omission.omit_in;
    line.omit_out = omission.omit_out;
    line.omitted_ranges = omission.ranges;
    line.bold_ranges = annotation.bold.clone();
    line.italic_ranges = annotation.italic.clone();
    line.underlined_ranges = annotation.underline.clone();
    line.note_ranges = annotation.note.clone();
    line.marker_ranges = annotation.markers.clone();

    let content = remove_ranges(raw, &line.omitted_ranges.union(&line.note_ranges));

    if is_blank_line(&content) {
        line.line_type = classify_blank(&line, ctx);
        return line;
    }

    let line_type = classify_content(&mut line, &content, ctx, conf);
    line.line_type = line_type;
    let prefix = structural_prefix(raw, line_type, line.section_depth);
    line.preceding_formatting_char_count = prefix + annotation.leading_markers_from(prefix);

    if ctx.in_title_page && !line_type.is_title_page() {
        end_title_page(ctx);
    }
    ctx.advance(line_type);
    line
}

// 有效内容为空的行：空行、整行省略、只有注解
fn classify_blank(line: &Line, ctx: &mut ClassificationContext) -> LineType {
    let raw = line.raw_text.as_str();

    // 整行都在省略块里，对块结构透明
    let inside_open_omission = line.omit_out
        && !line.omit_in
        && line.omitted_ranges.covers(&(0..raw.len()));
    if inside_open_omission || (!is_blank_line(raw) && line.is_omitted()) {
        ctx.skip();
        return LineType::Empty;
    }

    if !is_blank_line(raw) {
        // 只有注解的行
        let line_type = if ctx.in_dialogue_block() {
            ctx.confirm_cue();
            LineType::Dialogue.with_dual(ctx.dual_dialogue)
        } else {
            LineType::Action
        };
        if ctx.in_title_page {
            end_title_page(ctx);
        }
        ctx.advance(line_type);
        return line_type;
    }

    if is_two_space_line(raw) && ctx.in_dialogue_block() {
        ctx.confirm_cue();
        let line_type = LineType::Dialogue.with_dual(ctx.dual_dialogue);
        ctx.advance(line_type);
        return line_type;
    }

    ctx.close_block();
    ctx.advance(LineType::Empty);
    LineType::Empty
}

fn classify_content(
    line: &mut Line,
    content: &str,
    ctx: &mut ClassificationContext,
    conf: &Conf,
) -> LineType {
    let lead = content.trim_start();
    let trimmed = content.trim();

    if lead.starts_with(FountainConstants::SECTION_CHAR) {
        line.section_depth = lead
            .chars()
            .take_while(|c| *c == FountainConstants::SECTION_CHAR)
            .count();
        return LineType::Section;
    }

    if is_synopsis(lead) {
        return LineType::Synopsis;
    }

    if ctx.in_title_page {
        // 标题页必须以可识别的关键字开头，之后才接受其他 Key: 行
        match title_page_type(content) {
            Some((line_type, known)) if known || ctx.title_page_started => {
                ctx.title_page_started = true;
                return line_type;
            }
            _ => {}
        }
        let continues_value = !ctx.title_page_gap
            && LINE_REGEX["title_page_continuation"].is_match(content);
        match ctx.previous_type {
            Some(previous) if continues_value && previous.is_title_page() => return previous,
            _ => end_title_page(ctx),
        }
    }

    if LINE_REGEX["page_break"].is_match(content) {
        return LineType::PageBreak;
    }

    if lead.starts_with(FountainConstants::LYRICS_CHAR) {
        if ctx.in_dialogue_block() {
            ctx.confirm_cue();
        }
        return LineType::Lyrics;
    }

    if lead.starts_with(FountainConstants::ACTION_CHAR) {
        return LineType::Action;
    }

    if LINE_REGEX["centered"].is_match(content) {
        return LineType::Centered;
    }

    if lead.starts_with(FountainConstants::TRANSITION_CHAR) {
        return LineType::Transition;
    }

    if ctx.in_dialogue_block() {
        return classify_dialogue(trimmed, ctx, conf);
    }

    if ctx.block_start {
        if is_heading(lead) {
            line.scene_number = scene_number(trimmed, conf);
            return LineType::Heading;
        }

        if LINE_REGEX["transition"].is_match(trimmed) {
            return LineType::Transition;
        }

        if is_character_cue(trimmed) {
            let dual = conf.use_dual_dialogue
                && trimmed.ends_with(FountainConstants::DUAL_DIALOGUE_CHAR);
            ctx.pending_cue = Some(ctx.line_index);
            ctx.dual_dialogue = dual;
            ctx.parenthetical_open = false;
            return LineType::Character.with_dual(dual);
        }
    }

    LineType::Action
}

// 对白块内：more、括号、对白
fn classify_dialogue(trimmed: &str, ctx: &mut ClassificationContext, conf: &Conf) -> LineType {
    ctx.confirm_cue();
    let dual = ctx.dual_dialogue;

    if ctx.parenthetical_open {
        if LINE_REGEX["parenthetical_end"].is_match(trimmed) {
            ctx.parenthetical_open = false;
        }
        return LineType::Parenthetical.with_dual(dual);
    }

    let after_dialogue = matches!(
        ctx.previous_type,
        Some(LineType::Dialogue) | Some(LineType::DualDialogue)
    );
    if after_dialogue && is_more(trimmed, conf) {
        return LineType::More;
    }

    if LINE_REGEX["parenthetical"].is_match(trimmed) {
        return LineType::Parenthetical.with_dual(dual);
    }

    if LINE_REGEX["parenthetical_start"].is_match(trimmed) {
        ctx.parenthetical_open = true;
        return LineType::Parenthetical.with_dual(dual);
    }

    LineType::Dialogue.with_dual(dual)
}

fn end_title_page(ctx: &mut ClassificationContext) {
    if ctx.in_title_page {
        debug!("标题页在第{}行结束", ctx.line_index);
    }
    ctx.end_title_page();
}

fn is_synopsis(lead: &str) -> bool {
    let mut chars = lead.chars();
    chars.next() == Some(FountainConstants::SYNOPSIS_CHAR)
        && chars.next() != Some(FountainConstants::SYNOPSIS_CHAR)
}

fn is_heading(lead: &str) -> bool {
    let mut chars = lead.chars();
    if chars.next() == Some(FountainConstants::HEADING_CHAR) {
        // ".." 开头是省略号，不是强制场景标题
        return chars
            .next()
            .map_or(false, |c| c != FountainConstants::HEADING_CHAR && !c.is_whitespace());
    }
    LINE_REGEX["scene_heading"].is_match(lead)
}

fn is_character_cue(trimmed: &str) -> bool {
    if trimmed.starts_with(FountainConstants::CHARACTER_CHAR) {
        return !trim_character_force_symbol(trimmed).trim().is_empty();
    }
    // FADE IN: 之类以冒号结尾的全大写行不是角色
    if trimmed.ends_with(':') {
        return false;
    }
    let name = trim_character_extension(trimmed);
    !name.is_empty() && is_all_caps(&name)
}

fn is_more(trimmed: &str, conf: &Conf) -> bool {
    FountainConstants::more_tokens()
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
        || trimmed.eq_ignore_ascii_case(conf.text_more.trim())
}

// 返回类型，以及关键字是否可识别
fn title_page_type(content: &str) -> Option<(LineType, bool)> {
    if LINE_REGEX["transition"].is_match(content.trim()) {
        return None;
    }
    let caps = LINE_REGEX["title_page"].captures(content)?;
    let key = caps.get(1)?.as_str().trim().to_lowercase();
    let keys = FountainConstants::title_page_keys();
    let kind = keys.get(key.as_str());
    let line_type = match kind {
        Some(&"title") => LineType::TitlePageTitle,
        Some(&"author") => LineType::TitlePageAuthor,
        Some(&"credit") => LineType::TitlePageCredit,
        Some(&"source") => LineType::TitlePageSource,
        Some(&"contact") => LineType::TitlePageContact,
        Some(&"draft_date") => LineType::TitlePageDraftDate,
        _ => LineType::TitlePageUnknown,
    };
    Some((line_type, kind.is_some()))
}

fn scene_number(trimmed: &str, conf: &Conf) -> Option<String> {
    if let Some(caps) = LINE_REGEX["scene_number"].captures(trimmed) {
        return caps.get(1).map(|m| m.as_str().trim().to_string());
    }
    if conf.parenthesized_scene_numbers {
        if let Some(caps) = LINE_REGEX["scene_number_parenthesized"].captures(trimmed) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }
    None
}

// 注解正文为 "color red" 时取出颜色
fn color_tag(raw: &str, annotation: &Annotation) -> Option<String> {
    annotation.note_bodies(raw).into_iter().find_map(|body| {
        LINE_REGEX["color"]
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
    })
}

// 行首属于该类型的结构标记长度，标记前的缩进一并计入
fn structural_prefix(raw: &str, line_type: LineType, section_depth: usize) -> usize {
    let lead = raw.trim_start();
    let indent = raw.len() - lead.len();
    let marker = match line_type {
        LineType::Section => {
            return if lead.starts_with(FountainConstants::SECTION_CHAR) {
                indent + section_depth
            } else {
                0
            };
        }
        LineType::Synopsis => FountainConstants::SYNOPSIS_CHAR,
        LineType::Lyrics => FountainConstants::LYRICS_CHAR,
        LineType::Action => FountainConstants::ACTION_CHAR,
        LineType::Heading => FountainConstants::HEADING_CHAR,
        LineType::Character | LineType::DualDialogueCharacter => FountainConstants::CHARACTER_CHAR,
        LineType::Transition | LineType::Centered => FountainConstants::TRANSITION_CHAR,
        _ => return 0,
    };
    if lead.starts_with(marker) {
        indent + marker.len_utf8()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::range_annotator::annotate;

    fn run(lines: &[&str]) -> Vec<Line> {
        let conf = Conf::default();
        let mut ctx = ClassificationContext::new(conf.parse_title_page);
        let mut position = 0;
        lines
            .iter()
            .map(|raw| {
                let annotation = annotate(raw);
                let omission = ctx.omissions.process(raw, &annotation.note);
                let line = classify_line(raw, position, omission, annotation, &mut ctx, &conf);
                position += raw.len() + 1;
                line
            })
            .collect()
    }

    fn types(lines: &[&str]) -> Vec<LineType> {
        run(lines).iter().map(|l| l.line_type).collect()
    }

    #[test]
    fn test_section_depth_and_prefix() {
        let lines = run(&["### Act Three"]);
        assert_eq!(lines[0].line_type, LineType::Section);
        assert_eq!(lines[0].section_depth, 3);
        assert_eq!(lines[0].preceding_formatting_char_count, 3);
    }

    #[test]
    fn test_synopsis_versus_page_break() {
        assert_eq!(types(&["= The hero leaves"]), vec![LineType::Synopsis]);
        assert_eq!(types(&["==="]), vec![LineType::PageBreak]);
        assert_eq!(types(&["=="]), vec![LineType::Action]);
    }

    #[test]
    fn test_forced_elements() {
        assert_eq!(
            types(&["", "!SHOUTING IS ACTION", "", "~Sing along", "", "> THE END <", "", "> FADE OUT", "", "@McCLANE", "Yippee."]),
            vec![
                LineType::Empty,
                LineType::Action,
                LineType::Empty,
                LineType::Lyrics,
                LineType::Empty,
                LineType::Centered,
                LineType::Empty,
                LineType::Transition,
                LineType::Empty,
                LineType::Character,
                LineType::Dialogue,
            ]
        );
    }

    #[test]
    fn test_forced_heading_and_ellipsis() {
        let lines = run(&[".SNIPER SCOPE POV", "", "...and then nothing."]);
        assert_eq!(lines[0].line_type, LineType::Heading);
        assert_eq!(lines[0].preceding_formatting_char_count, 1);
        assert_eq!(lines[2].line_type, LineType::Action);
    }

    #[test]
    fn test_heading_needs_block_start() {
        assert_eq!(
            types(&["She walks in.", "INT. HOUSE - DAY"]),
            vec![LineType::Action, LineType::Action]
        );
    }

    #[test]
    fn test_scene_numbers() {
        let lines = run(&["INT. HOUSE - DAY #12A#", "", "EXT. PARK - NIGHT (4)", "", "EXT. PARK - LATER (FLASHBACK)"]);
        assert_eq!(lines[0].scene_number.as_deref(), Some("12A"));
        assert_eq!(lines[2].scene_number.as_deref(), Some("4"));
        assert_eq!(lines[4].line_type, LineType::Heading);
        assert_eq!(lines[4].scene_number, None);
    }

    #[test]
    fn test_dialogue_block() {
        assert_eq!(
            types(&["", "MARY (V.O.)", "(quietly)", "I know.", "(beat)", "I always knew.", "(MORE)", "", "After."]),
            vec![
                LineType::Empty,
                LineType::Character,
                LineType::Parenthetical,
                LineType::Dialogue,
                LineType::Parenthetical,
                LineType::Dialogue,
                LineType::More,
                LineType::Empty,
                LineType::Action,
            ]
        );
    }

    #[test]
    fn test_multi_line_parenthetical() {
        assert_eq!(
            types(&["", "BOB", "(looking around,", "nervous)", "Hello?"]),
            vec![
                LineType::Empty,
                LineType::Character,
                LineType::Parenthetical,
                LineType::Parenthetical,
                LineType::Dialogue,
            ]
        );
    }

    #[test]
    fn test_dual_dialogue_variants() {
        assert_eq!(
            types(&["", "BRICK", "Screw retirement.", "", "STEEL ^", "(grinning)", "Screw it."]),
            vec![
                LineType::Empty,
                LineType::Character,
                LineType::Dialogue,
                LineType::Empty,
                LineType::DualDialogueCharacter,
                LineType::DualDialogueParenthetical,
                LineType::DualDialogue,
            ]
        );
    }

    #[test]
    fn test_dual_dialogue_disabled() {
        let conf = Conf {
            use_dual_dialogue: false,
            ..Conf::default()
        };
        let mut ctx = ClassificationContext::new(false);
        let raw = "STEEL ^";
        let annotation = annotate(raw);
        let omission = ctx.omissions.process(raw, &annotation.note);
        let line = classify_line(raw, 0, omission, annotation, &mut ctx, &conf);
        assert_eq!(line.line_type, LineType::Character);
    }

    #[test]
    fn test_two_space_line_keeps_dialogue_block() {
        assert_eq!(
            types(&["", "DEALER", "Ten.", "  ", "Four."]),
            vec![
                LineType::Empty,
                LineType::Character,
                LineType::Dialogue,
                LineType::Dialogue,
                LineType::Dialogue,
            ]
        );
    }

    #[test]
    fn test_transition_lexicon_at_block_start() {
        assert_eq!(
            types(&["", "CUT TO:", "", "Cut to: the chase"]),
            vec![LineType::Empty, LineType::Transition, LineType::Empty, LineType::Action]
        );
    }

    #[test]
    fn test_title_page_keys_and_continuation() {
        assert_eq!(
            types(&["Title: Big Fish", "Credit: written by", "Authors: A", "Source: novel", "Contact:", "   1 Main St", "Draft date: 2024", "Notes: none", "", "INT. HOUSE - DAY"]),
            vec![
                LineType::TitlePageTitle,
                LineType::TitlePageCredit,
                LineType::TitlePageAuthor,
                LineType::TitlePageSource,
                LineType::TitlePageContact,
                LineType::TitlePageContact,
                LineType::TitlePageDraftDate,
                LineType::TitlePageUnknown,
                LineType::Empty,
                LineType::Heading,
            ]
        );
    }

    #[test]
    fn test_document_without_title_page() {
        assert_eq!(
            types(&["Sunrise: the city wakes", "A dog barks."]),
            vec![LineType::Action, LineType::Action]
        );
        assert_eq!(
            types(&["JOHN: Where were you?", "I was out."]),
            vec![LineType::Action, LineType::Action]
        );
        assert_eq!(types(&["CUT TO:"]), vec![LineType::Transition]);
    }

    #[test]
    fn test_fade_in_opener() {
        assert_eq!(
            types(&["FADE IN:", "", "INT. HOUSE - DAY"]),
            vec![LineType::Action, LineType::Empty, LineType::Heading]
        );
    }

    #[test]
    fn test_unknown_key_after_known_key() {
        assert_eq!(
            types(&["Title: Brick", "Notes: draft", "Producer: Lee", "", "Revision: 2", "", "Budget: low"]),
            vec![
                LineType::TitlePageTitle,
                LineType::TitlePageUnknown,
                LineType::TitlePageUnknown,
                LineType::Empty,
                LineType::TitlePageUnknown,
                LineType::Empty,
                LineType::TitlePageUnknown,
            ]
        );
        assert_eq!(
            types(&["Notes: early draft", "Title: Brick"]),
            vec![LineType::TitlePageUnknown, LineType::TitlePageTitle]
        );
    }

    #[test]
    fn test_indented_prefix_counted() {
        let lines = run(&["", "  ~Lyric", "", "  .FORCED", "", "\t## Act"]);
        assert_eq!(lines[1].line_type, LineType::Lyrics);
        assert_eq!(lines[1].preceding_formatting_char_count, 3);
        assert_eq!(lines[3].line_type, LineType::Heading);
        assert_eq!(lines[3].preceding_formatting_char_count, 3);
        assert_eq!(lines[5].line_type, LineType::Section);
        assert_eq!(lines[5].preceding_formatting_char_count, 3);
    }

    #[test]
    fn test_note_does_not_open_omission() {
        assert_eq!(
            types(&["a /* [[ */", "next", "", "third"]),
            vec![LineType::Action, LineType::Action, LineType::Empty, LineType::Action]
        );
    }

    #[test]
    fn test_note_only_line() {
        let lines = run(&["/* this is a note */"]);
        assert_eq!(lines[0].line_type, LineType::Action);
        assert_eq!(lines[0].note_ranges.iter().cloned().collect::<Vec<_>>(), vec![0..20]);
        assert!(lines[0].cleaned_text().trim().is_empty());
    }

    #[test]
    fn test_color_tag() {
        let lines = run(&["INT. LAB - NIGHT /* color Red */"]);
        assert_eq!(lines[0].line_type, LineType::Heading);
        assert_eq!(lines[0].color_tag.as_deref(), Some("red"));
    }

    #[test]
    fn test_omitted_line_is_transparent() {
        assert_eq!(
            types(&["", "ANNA", "[[cut this]]", "Stay."]),
            vec![LineType::Empty, LineType::Character, LineType::Empty, LineType::Dialogue]
        );
    }

    #[test]
    fn test_leading_inline_markers_counted() {
        let lines = run(&["", "!**Bang**"]);
        assert_eq!(lines[1].line_type, LineType::Action);
        assert_eq!(lines[1].preceding_formatting_char_count, 3);
    }
}
