//! 字符网格绘制面
//!
//! 一个字符格就是一个坐标单位；颜色按主题换成底纹字符，用于终端输出。

use std::collections::HashMap;

use super::{Rect, Surface};
use crate::theme::{ColorTheme, Rgb};

/// 字符网格
#[derive(Debug, Clone)]
pub struct TextSurface {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    shades: HashMap<Rgb, char>,
}

impl TextSurface {
    pub fn new(cols: usize, rows: usize, theme: &ColorTheme) -> Self {
        let shades = HashMap::from([
            (theme.light_square, ' '),
            (theme.dark_square, '·'),
            (theme.last_move_light, '░'),
            (theme.last_move_dark, '▒'),
            (theme.possible_marker, '+'),
            (theme.overlay_background, ' '),
        ]);
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
            shades,
        }
    }

    /// 清空画面
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// 逐行输出（去掉行尾空白）
    pub fn render_to_string(&self) -> String {
        self.cells
            .chunks(self.cols.max(1))
            .map(|line| line.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 中心落在区间内的格子下标
    fn span(start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
        let first = (start - 0.5).ceil().max(0.0) as usize;
        let end = (start + len - 0.5).ceil().max(0.0) as usize;
        first.min(limit)..end.min(limit)
    }
}

impl Surface for TextSurface {
    fn width(&self) -> f32 {
        self.cols as f32
    }

    fn height(&self) -> f32 {
        self.rows as f32
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let shade = self.shades.get(&color).copied().unwrap_or('#');
        for row in Self::span(rect.y, rect.h, self.rows) {
            for col in Self::span(rect.x, rect.w, self.cols) {
                self.cells[row * self.cols + col] = shade;
            }
        }
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, _color: Rgb) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = (x.floor() as usize, y.floor() as usize);
        if row >= self.rows {
            return;
        }
        for (offset, c) in text.chars().enumerate() {
            let col = col + offset;
            if col >= self.cols {
                break;
            }
            self.cells[row * self.cols + col] = c;
        }
    }
}
