//! UI 模块
//!
//! 终端界面：命令解析与整屏文本输出

mod console;

pub use console::*;

use crate::board::{panel_lines, render_frame, CoordinateMapper, SurfaceRenderer, TextSurface};
use crate::game::{ClientState, SessionStateMachine};
use crate::settings::ClientSettings;
use crate::theme::ColorTheme;

/// 终端棋盘的坐标映射
pub fn surface_mapper(settings: &ClientSettings) -> CoordinateMapper {
    CoordinateMapper::new(settings.surface_width as f32, settings.surface_height as f32)
}

/// 生成一整屏输出：状态行、棋盘（有提示时覆盖其上）和信息面板
pub fn compose_screen(
    machine: &SessionStateMachine,
    settings: &ClientSettings,
    theme: &ColorTheme,
) -> String {
    let mut out = format!("[{}]\n", state_title(machine.state()));

    let mut surface = TextSurface::new(settings.surface_width, settings.surface_height, theme);
    let mapper = surface_mapper(settings);
    render_frame(
        machine,
        &mapper,
        theme,
        &mut SurfaceRenderer::new(&mut surface, theme),
        settings.show_coordinates,
    );
    let board = surface.render_to_string();
    if !board.trim().is_empty() {
        out.push_str(&board);
        out.push('\n');
    }

    for line in panel_lines(machine) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn state_title(state: ClientState) -> &'static str {
    match state {
        ClientState::Lobby => "lobby",
        ClientState::Waiting => "waiting",
        ClientState::Active => "playing",
        ClientState::Finished => "game over",
        ClientState::RematchPending => "rematch",
        ClientState::Disconnected => "disconnected",
    }
}
