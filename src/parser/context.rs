use crate::models::LineType;
use crate::parser::omission_tracker::OmissionTracker;

/// 分类上下文
///
/// 一次解析中跨行传递的全部状态，由驱动器独占并显式传给每一步分类。
/// 每篇文档各用一个实例，不同文档之间不共享。
#[derive(Debug, Clone)]
pub struct ClassificationContext {
    /// 上一个有效行的类型（被整行省略的行不计）
    pub previous_type: Option<LineType>,
    /// 当前行处于块首：文档开头、空行之后，或标题页刚结束
    pub block_start: bool,
    /// 是否仍在标题页
    pub in_title_page: bool,
    /// 已经出现过可识别的标题页关键字
    pub title_page_started: bool,
    /// 标题页中出现过空行
    pub title_page_gap: bool,
    /// 多行括号尚未闭合
    pub parenthetical_open: bool,
    /// 当前对白块是双对白
    pub dual_dialogue: bool,
    /// 等待对白确认的角色行号
    pub pending_cue: Option<usize>,
    /// 直到块结束都没有等到对白的角色行号
    pub unconfirmed_cues: Vec<usize>,
    pub omissions: OmissionTracker,
    /// 下一行的行号
    pub line_index: usize,
}

impl ClassificationContext {
    pub fn new(parse_title_page: bool) -> Self {
        ClassificationContext {
            previous_type: None,
            block_start: true,
            in_title_page: parse_title_page,
            title_page_started: false,
            title_page_gap: false,
            parenthetical_open: false,
            dual_dialogue: false,
            pending_cue: None,
            unconfirmed_cues: Vec::new(),
            omissions: OmissionTracker::new(),
            line_index: 0,
        }
    }

    /// 上一行属于对白块
    pub fn in_dialogue_block(&self) -> bool {
        !self.block_start && self.previous_type.map_or(false, |t| t.is_dialogue_element())
    }

    /// 结束当前块：空行或文档结束时调用
    pub fn close_block(&mut self) {
        if let Some(cue) = self.pending_cue.take() {
            self.unconfirmed_cues.push(cue);
        }
        self.parenthetical_open = false;
        self.dual_dialogue = false;
        self.block_start = true;
        if self.in_title_page {
            self.title_page_gap = true;
        }
    }

    /// 当前行是对白内容，确认等待中的角色
    pub fn confirm_cue(&mut self) {
        self.pending_cue = None;
    }

    /// 结束标题页
    pub fn end_title_page(&mut self) {
        self.in_title_page = false;
        self.title_page_gap = false;
        self.block_start = true;
    }

    /// 记录本行类型，准备处理下一行
    pub fn advance(&mut self, line_type: LineType) {
        self.previous_type = Some(line_type);
        if line_type != LineType::Empty {
            self.block_start = false;
        }
        self.line_index += 1;
    }

    /// 跳过一行但不改变块状态（整行被省略）
    pub fn skip(&mut self) {
        self.line_index += 1;
    }
}

impl Default for ClassificationContext {
    fn default() -> Self {
        Self::new(true)
    }
}
