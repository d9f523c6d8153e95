use std::fmt;
use serde::{Deserialize, Serialize};

/// 行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineType {
    Empty,
    Section,
    Synopsis,
    TitlePageTitle,
    TitlePageAuthor,
    TitlePageCredit,
    TitlePageSource,
    TitlePageContact,
    TitlePageDraftDate,
    TitlePageUnknown,
    Heading,
    Action,
    Character,
    Parenthetical,
    Dialogue,
    DualDialogueCharacter,
    DualDialogueParenthetical,
    DualDialogue,
    Transition,
    Lyrics,
    PageBreak,
    Centered,
    More,
}

impl LineType {
    pub const ALL: [LineType; 23] = [
        LineType::Empty,
        LineType::Section,
        LineType::Synopsis,
        LineType::TitlePageTitle,
        LineType::TitlePageAuthor,
        LineType::TitlePageCredit,
        LineType::TitlePageSource,
        LineType::TitlePageContact,
        LineType::TitlePageDraftDate,
        LineType::TitlePageUnknown,
        LineType::Heading,
        LineType::Action,
        LineType::Character,
        LineType::Parenthetical,
        LineType::Dialogue,
        LineType::DualDialogueCharacter,
        LineType::DualDialogueParenthetical,
        LineType::DualDialogue,
        LineType::Transition,
        LineType::Lyrics,
        LineType::PageBreak,
        LineType::Centered,
        LineType::More,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Empty => "empty",
            LineType::Section => "section",
            LineType::Synopsis => "synopsis",
            LineType::TitlePageTitle => "title-page-title",
            LineType::TitlePageAuthor => "title-page-author",
            LineType::TitlePageCredit => "title-page-credit",
            LineType::TitlePageSource => "title-page-source",
            LineType::TitlePageContact => "title-page-contact",
            LineType::TitlePageDraftDate => "title-page-draft-date",
            LineType::TitlePageUnknown => "title-page-unknown",
            LineType::Heading => "heading",
            LineType::Action => "action",
            LineType::Character => "character",
            LineType::Parenthetical => "parenthetical",
            LineType::Dialogue => "dialogue",
            LineType::DualDialogueCharacter => "dual-dialogue-character",
            LineType::DualDialogueParenthetical => "dual-dialogue-parenthetical",
            LineType::DualDialogue => "dual-dialogue",
            LineType::Transition => "transition",
            LineType::Lyrics => "lyrics",
            LineType::PageBreak => "page-break",
            LineType::Centered => "centered",
            LineType::More => "more",
        }
    }

    /// Fountain 元素名称，给导出方使用
    pub fn fountain_name(&self) -> &'static str {
        match self {
            LineType::Empty => "Empty",
            LineType::Section => "Section Heading",
            LineType::Synopsis => "Synopsis",
            LineType::TitlePageTitle => "Title",
            LineType::TitlePageAuthor => "Author",
            LineType::TitlePageCredit => "Credit",
            LineType::TitlePageSource => "Source",
            LineType::TitlePageContact => "Contact",
            LineType::TitlePageDraftDate => "Draft date",
            LineType::TitlePageUnknown => "Title Page Field",
            LineType::Heading => "Scene Heading",
            LineType::Action => "Action",
            LineType::Character | LineType::DualDialogueCharacter => "Character",
            LineType::Parenthetical | LineType::DualDialogueParenthetical => "Parenthetical",
            LineType::Dialogue | LineType::DualDialogue => "Dialogue",
            LineType::Transition => "Transition",
            LineType::Lyrics => "Lyrics",
            LineType::PageBreak => "Page Break",
            LineType::Centered => "Action",
            LineType::More => "More",
        }
    }

    pub fn is_title_page(&self) -> bool {
        matches!(
            self,
            LineType::TitlePageTitle
                | LineType::TitlePageAuthor
                | LineType::TitlePageCredit
                | LineType::TitlePageSource
                | LineType::TitlePageContact
                | LineType::TitlePageDraftDate
                | LineType::TitlePageUnknown
        )
    }

    /// 角色、括号、对白（含双对白变体）以及 more
    pub fn is_dialogue_element(&self) -> bool {
        matches!(
            self,
            LineType::Character
                | LineType::Parenthetical
                | LineType::Dialogue
                | LineType::DualDialogueCharacter
                | LineType::DualDialogueParenthetical
                | LineType::DualDialogue
                | LineType::More
        )
    }

    pub fn is_character(&self) -> bool {
        matches!(self, LineType::Character | LineType::DualDialogueCharacter)
    }

    pub fn is_dual(&self) -> bool {
        matches!(
            self,
            LineType::DualDialogueCharacter
                | LineType::DualDialogueParenthetical
                | LineType::DualDialogue
        )
    }

    /// 双对白变体对应的基础类型，其他类型原样返回
    pub fn base(&self) -> LineType {
        match self {
            LineType::DualDialogueCharacter => LineType::Character,
            LineType::DualDialogueParenthetical => LineType::Parenthetical,
            LineType::DualDialogue => LineType::Dialogue,
            other => *other,
        }
    }

    /// 对白块类型的双对白变体，其他类型原样返回
    pub fn to_dual(&self) -> LineType {
        match self {
            LineType::Character => LineType::DualDialogueCharacter,
            LineType::Parenthetical => LineType::DualDialogueParenthetical,
            LineType::Dialogue => LineType::DualDialogue,
            other => *other,
        }
    }

    /// 根据是否处于双对白块选择变体
    pub fn with_dual(&self, dual: bool) -> LineType {
        if dual {
            self.to_dual()
        } else {
            self.base()
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
