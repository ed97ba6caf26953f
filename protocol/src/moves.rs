//! 走法定义

use serde::{Deserialize, Serialize};

use crate::piece::Square;

/// 走法：起点与终点，序列化为 `[[row, col], [row, col]]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Square; 2]", into = "[Square; 2]")]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// 该格子是否是走法的起点或终点
    pub fn touches(&self, square: Square) -> bool {
        self.from == square || self.to == square
    }
}

impl From<[Square; 2]> for Move {
    fn from([from, to]: [Square; 2]) -> Self {
        Self { from, to }
    }
}

impl From<Move> for [Square; 2] {
    fn from(mv: Move) -> Self {
        [mv.from, mv.to]
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
