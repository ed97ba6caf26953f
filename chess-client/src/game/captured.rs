//! 被吃棋子统计
//!
//! 规则里没有产生新棋子的途径，所以"开局数量 − 盘面数量"就是被吃数量，
//! 不需要服务端传输吃子历史。

use protocol::{Board, Color, Piece, PieceType};

/// 展示顺序（王永远不会被报告为被吃）
pub const DISPLAY_ORDER: [PieceType; 5] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
];

/// 双方被吃棋子数量，下标与 [`DISPLAY_ORDER`] 对应
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapturedTally {
    white: [u8; 5],
    black: [u8; 5],
}

impl CapturedTally {
    /// 从棋盘快照计算
    pub fn from_board(board: &Board) -> Self {
        let count_side = |color: Color| {
            DISPLAY_ORDER.map(|piece_type| {
                let present = board.count(Piece::new(piece_type, color));
                // 盘面残缺或计数异常时也不会出现负数
                piece_type.initial_count().saturating_sub(present)
            })
        };
        Self {
            white: count_side(Color::White),
            black: count_side(Color::Black),
        }
    }

    /// 某方某类棋子被吃的数量
    pub fn captured(&self, color: Color, piece_type: PieceType) -> u8 {
        DISPLAY_ORDER
            .iter()
            .position(|t| *t == piece_type)
            .map_or(0, |index| self.side(color)[index])
    }

    /// 按展示顺序列出某方被吃的棋子（省略为 0 的类型）
    pub fn groups(&self, color: Color) -> Vec<(PieceType, u8)> {
        DISPLAY_ORDER
            .iter()
            .zip(self.side(color))
            .filter(|(_, count)| **count > 0)
            .map(|(piece_type, count)| (*piece_type, *count))
            .collect()
    }

    /// 某方被吃总数
    pub fn total(&self, color: Color) -> u32 {
        self.side(color).iter().map(|c| *c as u32).sum()
    }

    /// 展示用分组：先对手被吃的（本方的战果），再本方被吃的
    pub fn for_player(&self, color: Option<Color>) -> [(Color, Vec<(PieceType, u8)>); 2] {
        let me = color.unwrap_or(Color::White);
        let opponent = me.opponent();
        [(opponent, self.groups(opponent)), (me, self.groups(me))]
    }

    fn side(&self, color: Color) -> &[u8; 5] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}
