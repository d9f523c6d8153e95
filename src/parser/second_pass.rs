//! 批量解析的第二遍
//!
//! 读入第一遍的完整结果，做需要向后看的修正，返回修正后的行列表：
//!
//! 1. 直到空行或文档结束都没有等到对白的角色改回 action；
//! 2. 后面没有空行的非强制转场改回 action；
//! 3. 双对白角色之前最近的角色标记 `next_is_dual_dialogue`（不跨越场景标题）；
//! 4. 紧跟在 action 后面的 action 标记为段落的后续行。

use log::debug;
use crate::models::{Line, LineType};
use crate::utils::FountainConstants;

pub fn correct(mut lines: Vec<Line>, unconfirmed_cues: &[usize]) -> Vec<Line> {
    revert_unconfirmed_cues(&mut lines, unconfirmed_cues);
    revert_open_transitions(&mut lines);
    link_dual_dialogue(&mut lines);
    mark_split_paragraphs(&mut lines);
    lines
}

fn revert_unconfirmed_cues(lines: &mut [Line], unconfirmed_cues: &[usize]) {
    for &index in unconfirmed_cues {
        if let Some(line) = lines.get_mut(index) {
            if line.line_type.is_character() {
                debug!("第{}行角色没有对白，改为 action: {}", index, line.raw_text);
                line.line_type = LineType::Action;
            }
        }
    }
}

fn revert_open_transitions(lines: &mut [Line]) {
    for i in 0..lines.len() {
        if lines[i].line_type != LineType::Transition {
            continue;
        }
        let forced = lines[i]
            .raw_text
            .trim_start()
            .starts_with(FountainConstants::TRANSITION_CHAR);
        let followed_by_text = lines
            .get(i + 1)
            .map_or(false, |next| next.line_type != LineType::Empty);
        if !forced && followed_by_text {
            debug!("第{}行转场后面没有空行，改为 action", i);
            lines[i].line_type = LineType::Action;
        }
    }
}

fn link_dual_dialogue(lines: &mut [Line]) {
    for i in 0..lines.len() {
        if lines[i].line_type != LineType::DualDialogueCharacter {
            continue;
        }
        for j in (0..i).rev() {
            match lines[j].line_type {
                LineType::Character => {
                    lines[j].next_is_dual_dialogue = true;
                    break;
                }
                LineType::Heading => break,
                _ => {}
            }
        }
    }
}

fn mark_split_paragraphs(lines: &mut [Line]) {
    for i in 1..lines.len() {
        if lines[i].line_type == LineType::Action && lines[i - 1].line_type == LineType::Action {
            lines[i].is_split_paragraph = true;
        }
    }
}
