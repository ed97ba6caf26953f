//! 主题和配色方案
//!
//! 定义棋盘、棋子与高亮的颜色配置

/// RGB 颜色
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// 解析 `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// 颜色主题配置
#[derive(Clone, Debug)]
pub struct ColorTheme {
    pub name: String,

    // 棋盘
    pub light_square: Rgb,
    pub dark_square: Rgb,

    // 上一步高亮
    pub last_move_light: Rgb,
    pub last_move_dark: Rgb,

    // 棋子
    pub white_piece: Rgb,
    pub black_piece: Rgb,

    // 交互与文字
    pub possible_marker: Rgb,
    pub coordinate_label: Rgb,
    pub overlay_background: Rgb,
    pub overlay_text: Rgb,
}

impl ColorTheme {
    /// 经典木质配色
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),

            light_square: Rgb(0xdd, 0xb1, 0x80),    // #ddb180
            dark_square: Rgb(0x8b, 0x5c, 0x43),     // #8b5c43
            last_move_light: Rgb(0xbf, 0xd0, 0x4e), // #bfd04e
            last_move_dark: Rgb(0x7d, 0x8a, 0x28),  // #7d8a28

            white_piece: Rgb(0xff, 0xff, 0xff),
            black_piece: Rgb(0x00, 0x00, 0x00),

            possible_marker: Rgb(0x2f, 0xae, 0x01), // #2fae01
            coordinate_label: Rgb(0x4e, 0x34, 0x2e),
            overlay_background: Rgb(0x21, 0x21, 0x21),
            overlay_text: Rgb(0xff, 0xf8, 0xe7),
        }
    }

    /// 格子底色
    pub fn square_color(&self, light: bool, last_move: bool) -> Rgb {
        match (light, last_move) {
            (true, false) => self.light_square,
            (false, false) => self.dark_square,
            (true, true) => self.last_move_light,
            (false, true) => self.last_move_dark,
        }
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::classic()
    }
}
