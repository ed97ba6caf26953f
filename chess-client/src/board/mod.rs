//! 棋盘坐标与渲染模块
//!
//! 坐标映射把绘制面上的像素位置换算为棋盘格子，并决定绘制时的行列顺序

mod render;
mod text;

pub use render::*;
pub use text::*;

use protocol::{Color, Square, BOARD_SIZE};

/// 白方视角下屏幕自上而下的行顺序
const ROWS_DESCENDING: [u8; BOARD_SIZE] = [7, 6, 5, 4, 3, 2, 1, 0];
const ASCENDING: [u8; BOARD_SIZE] = [0, 1, 2, 3, 4, 5, 6, 7];

/// 坐标映射
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    /// 绘制面宽度
    pub width: f32,
    /// 绘制面高度
    pub height: f32,
}

impl CoordinateMapper {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square_width(&self) -> f32 {
        self.width / BOARD_SIZE as f32
    }

    pub fn square_height(&self) -> f32 {
        self.height / BOARD_SIZE as f32
    }

    /// 将指针位置转换为棋盘坐标
    ///
    /// 白方只翻转行，黑方只翻转列；结果总是压到 [0, 7]。
    pub fn to_square(&self, x: f32, y: f32, color: Option<Color>) -> Square {
        let row = match color {
            Some(Color::White) => ((self.height - y) / self.square_height()).floor(),
            _ => (y / self.square_height()).floor(),
        };
        let col = match color {
            Some(Color::Black) => ((self.width - x) / self.square_width()).floor(),
            _ => (x / self.square_width()).floor(),
        };
        // `as` 对 NaN 与无穷做饱和转换
        Square::clamped(row as i64, col as i64)
    }

    /// 屏幕自上而下对应的棋盘行
    pub fn row_order(color: Option<Color>) -> [u8; BOARD_SIZE] {
        match color {
            Some(Color::White) => ROWS_DESCENDING,
            _ => ASCENDING,
        }
    }

    /// 屏幕自左向右对应的棋盘列
    pub fn col_order(color: Option<Color>) -> [u8; BOARD_SIZE] {
        match color {
            Some(Color::White) => ASCENDING,
            _ => ROWS_DESCENDING,
        }
    }

    /// 棋盘格子在屏幕上的 (行, 列)
    pub fn screen_cell(square: Square, color: Option<Color>) -> (usize, usize) {
        let screen_row = Self::row_order(color)
            .iter()
            .position(|r| *r == square.row)
            .unwrap_or_default();
        let screen_col = Self::col_order(color)
            .iter()
            .position(|c| *c == square.col)
            .unwrap_or_default();
        (screen_row, screen_col)
    }

    /// 屏幕格子的矩形
    pub fn cell_rect(&self, screen_row: usize, screen_col: usize) -> Rect {
        Rect {
            x: screen_col as f32 * self.square_width(),
            y: screen_row as f32 * self.square_height(),
            w: self.square_width(),
            h: self.square_height(),
        }
    }

    /// 棋盘格子在屏幕上的矩形
    pub fn square_rect(&self, square: Square, color: Option<Color>) -> Rect {
        let (screen_row, screen_col) = Self::screen_cell(square, color);
        self.cell_rect(screen_row, screen_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPER: CoordinateMapper = CoordinateMapper {
        width: 800.0,
        height: 800.0,
    };

    #[test]
    fn test_white_flips_rows_only() {
        // 左上角是白方视角的 a8
        assert_eq!(
            MAPPER.to_square(10.0, 10.0, Some(Color::White)),
            Square::new_unchecked(7, 0)
        );
        assert_eq!(
            MAPPER.to_square(790.0, 790.0, Some(Color::White)),
            Square::new_unchecked(0, 7)
        );
    }

    #[test]
    fn test_black_flips_columns_only() {
        assert_eq!(
            MAPPER.to_square(10.0, 10.0, Some(Color::Black)),
            Square::new_unchecked(0, 7)
        );
        assert_eq!(
            MAPPER.to_square(790.0, 790.0, Some(Color::Black)),
            Square::new_unchecked(7, 0)
        );
    }

    #[test]
    fn test_unassigned_color_does_not_flip() {
        assert_eq!(MAPPER.to_square(150.0, 250.0, None), Square::new_unchecked(2, 1));
    }

    #[test]
    fn test_edges_and_out_of_bounds_are_clamped() {
        // y = 0 对白方得到 8，压回 7
        assert_eq!(
            MAPPER.to_square(0.0, 0.0, Some(Color::White)),
            Square::new_unchecked(7, 0)
        );
        let positions = [
            (-50.0, -50.0),
            (5000.0, 5000.0),
            (800.0, 800.0),
            (f32::NAN, f32::INFINITY),
            (f32::NEG_INFINITY, f32::NAN),
        ];
        for color in [None, Some(Color::White), Some(Color::Black)] {
            for (x, y) in positions {
                let square = MAPPER.to_square(x, y, color);
                assert!(square.row <= 7 && square.col <= 7);
            }
        }
    }

    #[test]
    fn test_render_orientation() {
        assert_eq!(
            CoordinateMapper::row_order(Some(Color::White)),
            [7, 6, 5, 4, 3, 2, 1, 0]
        );
        assert_eq!(
            CoordinateMapper::col_order(Some(Color::White)),
            [0, 1, 2, 3, 4, 5, 6, 7]
        );
        assert_eq!(
            CoordinateMapper::row_order(Some(Color::Black)),
            [0, 1, 2, 3, 4, 5, 6, 7]
        );
        assert_eq!(
            CoordinateMapper::col_order(Some(Color::Black)),
            [7, 6, 5, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn test_click_lands_on_drawn_square() {
        for color in [Some(Color::White), Some(Color::Black)] {
            for row in 0..8 {
                for col in 0..8 {
                    let square = Square::new_unchecked(row, col);
                    let rect = MAPPER.square_rect(square, color);
                    let (cx, cy) = rect.center();
                    assert_eq!(MAPPER.to_square(cx, cy, color), square);
                }
            }
        }
    }
}
