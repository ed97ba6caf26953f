//! 棋盘历史与回放游标

use protocol::{Board, Move};

/// 历史条目：一张棋盘快照及产生它的走法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board: Board,
    /// 第一张棋盘没有上一步
    pub last_move: Option<Move>,
}

/// 只追加的棋盘历史，带可移动的读取游标
#[derive(Debug, Clone, Default)]
pub struct BoardHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl BoardHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加新局面，游标跳到末尾
    pub fn push(&mut self, board: Board, last_move: Option<Move>) {
        self.entries.push(HistoryEntry { board, last_move });
        self.cursor = self.entries.len() - 1;
    }

    /// 游标后退一步（到 0 为止）
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// 游标前进一步（到末尾为止）
    pub fn right(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// 游标回到末尾
    pub fn resync(&mut self) {
        self.cursor = self.entries.len().saturating_sub(1);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 游标是否指向最新局面（空历史视为在末尾）
    pub fn is_at_tail(&self) -> bool {
        self.entries.is_empty() || self.cursor + 1 == self.entries.len()
    }

    /// 游标处的条目
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    /// 清空历史
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
