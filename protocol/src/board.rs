//! 棋盘快照
//!
//! 服务端以 8 行文本（`\n` 分隔，每行 8 个字符）下发整盘局面，
//! 客户端只解析与展示，从不在本地推演走法。

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::{ProtocolError, Result};
use crate::piece::{Color, Piece, PieceType, Square};

/// 开局局面的文本形式
pub const INITIAL_BOARD: &str =
    "RNBQKBNR\nPPPPPPPP\n        \n        \n        \n        \npppppppp\nrnbqkbnr";

/// 棋盘（一经创建不可修改，新局面总是整体替换）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        let mut board = Self::empty();
        for (col, piece_type) in back_rank.into_iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(piece_type, Color::White));
            board.squares[1][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.squares[6][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            board.squares[7][col] = Some(Piece::new(piece_type, Color::Black));
        }
        board
    }

    /// 解析服务端下发的棋盘文本
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.split('\n').collect();
        if rows.len() != BOARD_SIZE {
            return Err(ProtocolError::InvalidBoard {
                reason: format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.trim_end_matches('\r').chars().collect();
            if cells.len() != BOARD_SIZE {
                return Err(ProtocolError::InvalidBoard {
                    reason: format!("row {} has {} columns", row, cells.len()),
                });
            }
            for (col, c) in cells.into_iter().enumerate() {
                board.squares[row][col] = match c {
                    ' ' => None,
                    c => Some(Piece::from_board_char(c).ok_or_else(|| ProtocolError::InvalidBoard {
                        reason: format!("unknown piece '{}' at ({}, {})", c, row, col),
                    })?),
                };
            }
        }
        Ok(board)
    }

    /// 获取指定位置的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    /// 统计某种棋子在盘面上的数量
    pub fn count(&self, piece: Piece) -> u8 {
        self.pieces().filter(|(_, p)| *p == piece).count() as u8
    }

    /// 遍历所有棋子
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::new_unchecked(row as u8, col as u8), piece))
            })
        })
    }

    /// 转换为服务端使用的文本格式
    pub fn to_text(&self) -> String {
        self.squares
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| cell.map_or(' ', |p| p.to_board_char()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<String> for Board {
    type Error = ProtocolError;

    fn try_from(text: String) -> Result<Self> {
        Self::parse(&text)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_text()
    }
}

impl std::str::FromStr for Board {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
