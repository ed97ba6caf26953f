//! 两阶段选子协议
//!
//! 第一次按下记录选中格并向服务端请求合法落点；按在高亮落点上或拖到其他格松开时提交走法。
//! 合法性完全由服务端判定，这里只保存服务端给出的落点列表。

use protocol::{ClientMessage, Move, RoomId, Square};

/// 选子状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSelector {
    /// 当前选中的格子
    selected: Option<Square>,
    /// 服务端确认的合法落点
    possible: Vec<Square>,
}

impl MoveSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按下（主输入）
    ///
    /// 落在高亮落点上时提交走法；否则把该格设为选中并请求落点（对局结束后不再请求）。
    pub fn press(
        &mut self,
        square: Square,
        room_id: RoomId,
        is_game_over: bool,
    ) -> Option<ClientMessage> {
        if let Some(from) = self.selected {
            if self.is_possible(square) {
                return Some(self.finalize(from, square, room_id));
            }
        }

        self.selected = Some(square);
        if is_game_over {
            return None;
        }
        Some(ClientMessage::Possible {
            room_id,
            possible_moves: square,
        })
    }

    /// 松开：与选中格不同则直接提交走法（拖拽），不要求落点已高亮
    pub fn release(&mut self, square: Square, room_id: RoomId) -> Option<ClientMessage> {
        match self.selected {
            Some(from) if from != square => Some(self.finalize(from, square, room_id)),
            _ => None,
        }
    }

    /// 用服务端下发的列表替换合法落点
    ///
    /// 响应没有关联标识，过期的响应同样会被采用。
    pub fn apply_possible(&mut self, squares: Vec<Square>) {
        self.possible = squares;
    }

    /// 取消高亮（保留选中格）
    pub fn cancel(&mut self) {
        self.possible.clear();
    }

    /// 清空选中格与高亮
    pub fn clear(&mut self) {
        self.selected = None;
        self.possible.clear();
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn possible(&self) -> &[Square] {
        &self.possible
    }

    pub fn is_possible(&self, square: Square) -> bool {
        self.possible.contains(&square)
    }

    fn finalize(&mut self, from: Square, to: Square, room_id: RoomId) -> ClientMessage {
        self.clear();
        ClientMessage::Move {
            make_move: Move::new(from, to),
            room_id,
        }
    }
}
