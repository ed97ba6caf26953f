//! 棋子与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::ProtocolError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 兵
    Pawn,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 车
    Rook,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceType {
    /// 全部棋子类型
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// 开局时每方的数量
    pub fn initial_count(&self) -> u8 {
        match self {
            PieceType::Pawn => 8,
            PieceType::Knight | PieceType::Bishop | PieceType::Rook => 2,
            PieceType::Queen | PieceType::King => 1,
        }
    }

    /// 获取棋盘字符（白方大写，黑方小写）
    pub fn to_board_char(&self, color: Color) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从棋盘字符解析
    pub fn from_board_char(c: char) -> Option<(PieceType, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((piece_type, color))
    }

    /// 棋子图标（实心字形）
    pub fn glyph(&self) -> char {
        match self {
            PieceType::Pawn => '♟',
            PieceType::Knight => '♞',
            PieceType::Bishop => '♝',
            PieceType::Rook => '♜',
            PieceType::Queen => '♛',
            PieceType::King => '♚',
        }
    }

    /// 空心字形，用于白方
    pub fn outline_glyph(&self) -> char {
        match self {
            PieceType::Pawn => '♙',
            PieceType::Knight => '♘',
            PieceType::Bishop => '♗',
            PieceType::Rook => '♖',
            PieceType::Queen => '♕',
            PieceType::King => '♔',
        }
    }

    /// 按颜色选择字形，在单色终端上也能区分双方
    pub fn glyph_for(&self, color: Color) -> char {
        match color {
            Color::White => self.outline_glyph(),
            Color::Black => self.glyph(),
        }
    }
}

/// 执棋颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// 白方（大写字母，棋盘第 0 行一侧）
    White,
    /// 黑方
    Black,
}

impl Color {
    /// 获取对方颜色
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// 获取棋盘字符
    pub fn to_board_char(&self) -> char {
        self.piece_type.to_board_char(self.color)
    }

    /// 从棋盘字符解析
    pub fn from_board_char(c: char) -> Option<Piece> {
        PieceType::from_board_char(c).map(|(piece_type, color)| Piece { piece_type, color })
    }
}

/// 棋盘格子坐标，序列化为 `[row, col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[i64; 2]", into = "[u8; 2]")]
pub struct Square {
    /// 行 (0-7)，第 0 行是白方底线
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Square {
    /// 创建新坐标
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新坐标（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 将任意整数坐标压到 [0, 7]
    pub fn clamped(row: i64, col: i64) -> Self {
        let max = BOARD_SIZE as i64 - 1;
        Self {
            row: row.clamp(0, max) as u8,
            col: col.clamp(0, max) as u8,
        }
    }

    /// 代数记法的列字母
    pub fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// 代数记法的行数字
    pub fn rank_char(&self) -> char {
        (b'1' + self.row) as char
    }

    /// 解析代数记法，例如 `e2`
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self {
            row: rank as u8 - b'1',
            col: file as u8 - b'a',
        })
    }
}

impl TryFrom<[i64; 2]> for Square {
    type Error = ProtocolError;

    fn try_from([row, col]: [i64; 2]) -> Result<Self, Self::Error> {
        let max = BOARD_SIZE as i64;
        if (0..max).contains(&row) && (0..max).contains(&col) {
            Ok(Self::new_unchecked(row as u8, col as u8))
        } else {
            Err(ProtocolError::InvalidSquare { row, col })
        }
    }
}

impl From<Square> for [u8; 2] {
    fn from(square: Square) -> Self {
        [square.row, square.col]
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_char_case_marks_color() {
        assert_eq!(
            Piece::from_board_char('P'),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(
            Piece::from_board_char('n'),
            Some(Piece::new(PieceType::Knight, Color::Black))
        );
        assert_eq!(Piece::from_board_char(' '), None);
        assert_eq!(Piece::new(PieceType::Queen, Color::White).to_board_char(), 'Q');
    }

    #[test]
    fn test_glyphs_differ_by_color() {
        assert_eq!(PieceType::Knight.glyph_for(Color::White), '♘');
        assert_eq!(PieceType::Knight.glyph_for(Color::Black), '♞');
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn test_square_clamped() {
        assert_eq!(Square::clamped(-3, 12), Square::new_unchecked(0, 7));
        assert_eq!(Square::clamped(i64::MAX, i64::MIN), Square::new_unchecked(7, 0));
        assert_eq!(Square::clamped(4, 5), Square::new_unchecked(4, 5));
    }

    #[test]
    fn test_square_json_shape() {
        let square = Square::new_unchecked(3, 4);
        assert_eq!(serde_json::to_string(&square).unwrap(), "[3,4]");

        let parsed: Square = serde_json::from_str("[6,1]").unwrap();
        assert_eq!(parsed, Square::new_unchecked(6, 1));

        assert!(serde_json::from_str::<Square>("[8,1]").is_err());
        assert!(serde_json::from_str::<Square>("[-1,1]").is_err());
    }

    #[test]
    fn test_square_algebraic() {
        assert_eq!(Square::from_algebraic("e2"), Some(Square::new_unchecked(1, 4)));
        assert_eq!(Square::from_algebraic("A8"), Some(Square::new_unchecked(7, 0)));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("e22"), None);
        assert_eq!(Square::new_unchecked(1, 4).to_string(), "e2");
    }

    #[test]
    fn test_color_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"white\"");
        let color: Color = serde_json::from_str("\"black\"").unwrap();
        assert_eq!(color, Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
