//! 棋盘渲染
//!
//! 核心只计算坐标与颜色，真正的绘制交给实现了 [`Surface`] 的绘制面。

use protocol::{Color, Piece, Square};

use super::CoordinateMapper;
use crate::game::{ClientState, SessionStateMachine};
use crate::theme::{ColorTheme, Rgb};

/// 可走落点角标的线宽（相对格宽）
const MARKER_THICKNESS: f32 = 0.075;
/// 可走落点角标的长度（相对格高）
const MARKER_LENGTH: f32 = 0.2;

/// 矩形区域
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// 绘制面（外部提供的基本绘图能力）
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// 以 (x, y) 为左上角绘制文字
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgb);
}

/// 棋盘级的绘制能力
pub trait Renderer {
    fn draw_square(&mut self, rect: Rect, color: Rgb);
    fn draw_piece(&mut self, rect: Rect, piece: Piece);
    /// 可走落点标记
    fn draw_marker(&mut self, rect: Rect);
    /// 格子内的坐标标签
    fn draw_label(&mut self, rect: Rect, text: &str, bottom_right: bool);
    /// 覆盖在棋盘上的提示
    fn draw_overlay(&mut self, lines: &[String]);
}

/// 用任意 Surface 实现 Renderer
pub struct SurfaceRenderer<'a, S> {
    surface: &'a mut S,
    theme: &'a ColorTheme,
}

impl<'a, S: Surface> SurfaceRenderer<'a, S> {
    pub fn new(surface: &'a mut S, theme: &'a ColorTheme) -> Self {
        Self { surface, theme }
    }
}

impl<S: Surface> Renderer for SurfaceRenderer<'_, S> {
    fn draw_square(&mut self, rect: Rect, color: Rgb) {
        self.surface.fill_rect(rect, color);
    }

    fn draw_piece(&mut self, rect: Rect, piece: Piece) {
        let color = match piece.color {
            Color::White => self.theme.white_piece,
            Color::Black => self.theme.black_piece,
        };
        let glyph = piece.piece_type.glyph_for(piece.color).to_string();
        self.surface
            .draw_text(rect.x + rect.w * 0.4, rect.y + rect.h * 0.4, &glyph, color);
    }

    fn draw_marker(&mut self, rect: Rect) {
        let thickness = rect.w * MARKER_THICKNESS;
        let length = rect.h * MARKER_LENGTH;
        let offset = thickness;
        let color = self.theme.possible_marker;

        let left = rect.x + offset;
        let right = rect.x + rect.w - offset;
        let top = rect.y + offset;
        let bottom = rect.y + rect.h - offset;

        // 四个角各一对横竖短线
        let bars = [
            Rect::new(left, top, thickness, length),
            Rect::new(left, top, length, thickness),
            Rect::new(right - thickness, top, thickness, length),
            Rect::new(right - length, top, length, thickness),
            Rect::new(left, bottom - length, thickness, length),
            Rect::new(left, bottom - thickness, length, thickness),
            Rect::new(right - thickness, bottom - length, thickness, length),
            Rect::new(right - length, bottom - thickness, length, thickness),
        ];
        for bar in bars {
            self.surface.fill_rect(bar, color);
        }
    }

    fn draw_label(&mut self, rect: Rect, text: &str, bottom_right: bool) {
        let (x, y) = if bottom_right {
            (rect.x + rect.w * 0.8, rect.y + rect.h * 0.7)
        } else {
            (rect.x + rect.w * 0.05, rect.y + rect.h * 0.05)
        };
        self.surface.draw_text(x, y, text, self.theme.coordinate_label);
    }

    fn draw_overlay(&mut self, lines: &[String]) {
        let width = self.surface.width();
        let line_height = self.surface.height() / 8.0 / 2.0;
        let top = self.surface.height() / 2.0 - line_height * lines.len() as f32 / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as f32 * line_height;
            self.surface.fill_rect(
                Rect::new(0.0, y, width, line_height),
                self.theme.overlay_background,
            );
            self.surface
                .draw_text(width * 0.05, y, line, self.theme.overlay_text);
        }
    }
}

/// 一次渲染：棋盘、上一步、落点标记、坐标标签与提示
pub fn render_frame<R: Renderer>(
    machine: &SessionStateMachine,
    mapper: &CoordinateMapper,
    theme: &ColorTheme,
    renderer: &mut R,
    show_coordinates: bool,
) {
    if let Some(view) = machine.view() {
        let rows = CoordinateMapper::row_order(view.color);
        let cols = CoordinateMapper::col_order(view.color);

        for (screen_row, row) in rows.into_iter().enumerate() {
            for (screen_col, col) in cols.into_iter().enumerate() {
                let square = Square::new_unchecked(row, col);
                let rect = mapper.cell_rect(screen_row, screen_col);
                let light = row % 2 != col % 2;
                let last = view.last_move.is_some_and(|m| m.touches(square));
                renderer.draw_square(rect, theme.square_color(light, last));

                if show_coordinates {
                    if screen_col == 0 {
                        renderer.draw_label(rect, &square.rank_char().to_string(), false);
                    }
                    if screen_row == rows.len() - 1 {
                        renderer.draw_label(rect, &square.file_char().to_string(), true);
                    }
                }

                if let Some(piece) = view.board.get(square) {
                    renderer.draw_piece(rect, piece);
                }
                if view.possible.contains(&square) {
                    renderer.draw_marker(rect);
                }
            }
        }
    }

    let lines = overlay_lines(machine);
    if !lines.is_empty() {
        renderer.draw_overlay(&lines);
    }
}

/// 覆盖在棋盘上的提示文字
pub fn overlay_lines(machine: &SessionStateMachine) -> Vec<String> {
    let session = machine.session();
    let mut lines = Vec::new();
    match machine.state() {
        ClientState::Lobby => {}
        ClientState::Waiting => {
            lines.push("Waiting for opponent".to_string());
            lines.push(format!("Room ID: {}", session.room_or_zero()));
        }
        ClientState::Active => {
            if let Some(view) = machine.view().filter(|v| !v.is_live) {
                let (cursor, len) = view.position;
                lines.push(format!("Viewing board {}/{}", cursor + 1, len));
            }
        }
        ClientState::Finished | ClientState::RematchPending => {
            lines.extend(session.result_label().map(str::to_string));
            lines.extend(session.rematch_text().map(str::to_string));
        }
        ClientState::Disconnected => {
            lines.extend(machine.notice().map(str::to_string));
        }
    }
    lines
}

/// 棋盘旁的信息面板：大厅房间列表，或对局信息与吃子统计
pub fn panel_lines(machine: &SessionStateMachine) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(count) = machine.players_online() {
        lines.push(format!("Players online: {}", count));
    }

    if machine.state() == ClientState::Lobby {
        lines.push("Rooms:".to_string());
        if machine.rooms().is_empty() {
            lines.push("  (no open rooms)".to_string());
        }
        for room in machine.rooms() {
            lines.push(format!("  [{}] {}", room.id, room.name));
        }
        return lines;
    }

    let session = machine.session();
    if let (Some(room_id), Some(color)) = (session.room_id, session.color) {
        lines.push(format!("Room ID: {}  You play: {}", room_id, color));
    }
    match session.is_winner() {
        Some(true) => lines.push("You won".to_string()),
        Some(false) => lines.push("You lost".to_string()),
        None => {}
    }

    if let Some(tally) = machine.captured() {
        for (color, groups) in tally.for_player(session.color) {
            let pieces = groups
                .iter()
                .map(|(piece_type, count)| format!("{}x{}", piece_type.glyph_for(color), count))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("Captured {}: {}", color, pieces));
        }
    }

    if let Some(view) = machine.view() {
        let (cursor, len) = view.position;
        lines.push(format!("Board {}/{}", cursor + 1, len));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::UserCommand;
    use protocol::{Board, Move, PieceType, ServerMessage};

    /// 记录所有绘制调用
    #[derive(Default)]
    struct RecordingRenderer {
        squares: Vec<(Rect, Rgb)>,
        pieces: Vec<(Rect, Piece)>,
        markers: Vec<Rect>,
        labels: Vec<String>,
        overlays: Vec<Vec<String>>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_square(&mut self, rect: Rect, color: Rgb) {
            self.squares.push((rect, color));
        }
        fn draw_piece(&mut self, rect: Rect, piece: Piece) {
            self.pieces.push((rect, piece));
        }
        fn draw_marker(&mut self, rect: Rect) {
            self.markers.push(rect);
        }
        fn draw_label(&mut self, _rect: Rect, text: &str, _bottom_right: bool) {
            self.labels.push(text.to_string());
        }
        fn draw_overlay(&mut self, lines: &[String]) {
            self.overlays.push(lines.to_vec());
        }
    }

    fn sq(row: u8, col: u8) -> Square {
        Square::new_unchecked(row, col)
    }

    fn playing_machine(color: Color) -> SessionStateMachine {
        let mut machine = SessionStateMachine::new();
        machine.apply_inbound(ServerMessage::NewRoom { room_id: 3, color });
        machine.apply_inbound(ServerMessage::Board {
            current_board: Board::initial(),
            last_move: None,
        });
        machine
    }

    #[test]
    fn test_white_sees_own_pieces_at_bottom() {
        let machine = playing_machine(Color::White);
        let mapper = CoordinateMapper::new(800.0, 800.0);
        let mut renderer = RecordingRenderer::default();
        render_frame(&machine, &mapper, &ColorTheme::classic(), &mut renderer, true);

        assert_eq!(renderer.squares.len(), 64);
        assert_eq!(renderer.pieces.len(), 32);
        // 左下角 a1 是白车
        let (_, piece) = renderer
            .pieces
            .iter()
            .find(|(rect, _)| rect.x == 0.0 && rect.y == 700.0)
            .unwrap();
        assert_eq!(*piece, Piece::new(PieceType::Rook, Color::White));
        assert_eq!(renderer.labels.len(), 16);
        assert!(renderer.overlays.is_empty());
    }

    #[test]
    fn test_black_sees_own_pieces_at_bottom() {
        let machine = playing_machine(Color::Black);
        let mapper = CoordinateMapper::new(800.0, 800.0);
        let mut renderer = RecordingRenderer::default();
        render_frame(&machine, &mapper, &ColorTheme::classic(), &mut renderer, false);

        let (_, piece) = renderer
            .pieces
            .iter()
            .find(|(rect, _)| rect.x == 700.0 && rect.y == 700.0)
            .unwrap();
        assert_eq!(*piece, Piece::new(PieceType::Rook, Color::Black));
        assert!(renderer.labels.is_empty());
    }

    #[test]
    fn test_last_move_and_markers_only_when_live() {
        let theme = ColorTheme::classic();
        let mapper = CoordinateMapper::new(800.0, 800.0);
        let mut machine = playing_machine(Color::White);
        machine.apply_inbound(ServerMessage::Board {
            current_board: Board::initial(),
            last_move: Some(Move::new(sq(1, 4), sq(3, 4))),
        });
        machine.apply_user_command(UserCommand::Press(sq(1, 3)));
        machine.apply_inbound(ServerMessage::Possible {
            possible_moves: vec![sq(2, 3), sq(3, 3)],
        });

        let mut renderer = RecordingRenderer::default();
        render_frame(&machine, &mapper, &theme, &mut renderer, false);
        let tinted = renderer
            .squares
            .iter()
            .filter(|(_, c)| *c == theme.last_move_light || *c == theme.last_move_dark)
            .count();
        assert_eq!(tinted, 2);
        assert_eq!(renderer.markers.len(), 2);

        machine.apply_user_command(UserCommand::HistoryBack);
        let mut renderer = RecordingRenderer::default();
        render_frame(&machine, &mapper, &theme, &mut renderer, false);
        let tinted = renderer
            .squares
            .iter()
            .filter(|(_, c)| *c == theme.last_move_light || *c == theme.last_move_dark)
            .count();
        assert_eq!(tinted, 0);
        assert!(renderer.markers.is_empty());
        assert_eq!(renderer.overlays, vec![vec!["Viewing board 1/2".to_string()]]);
    }

    #[test]
    fn test_overlay_text_per_state() {
        let mut machine = SessionStateMachine::new();
        assert!(overlay_lines(&machine).is_empty());

        machine.apply_inbound(ServerMessage::NewRoom {
            room_id: 8,
            color: Color::White,
        });
        assert_eq!(
            overlay_lines(&machine),
            vec!["Waiting for opponent".to_string(), "Room ID: 8".to_string()]
        );

        machine.apply_inbound(ServerMessage::Board {
            current_board: Board::initial(),
            last_move: None,
        });
        machine.apply_inbound(ServerMessage::GameResultWhiteWon);
        machine.apply_inbound(ServerMessage::Rematch { my_offer: false });
        assert_eq!(
            overlay_lines(&machine),
            vec![
                "Game over, white won!".to_string(),
                "Opponent offers a rematch".to_string()
            ]
        );

        machine.apply_inbound(ServerMessage::Disconnected);
        assert_eq!(
            overlay_lines(&machine),
            vec!["Disconnected from server".to_string()]
        );
    }

    #[test]
    fn test_panel_lists_rooms_in_lobby() {
        let mut machine = SessionStateMachine::new();
        assert_eq!(
            panel_lines(&machine),
            vec!["Rooms:".to_string(), "  (no open rooms)".to_string()]
        );
        machine.apply_inbound(ServerMessage::PlayersOnline { count: 2 });
        machine.apply_inbound(ServerMessage::Rooms {
            room_names: vec![protocol::RoomEntry::new(4, "alice")],
        });
        assert_eq!(
            panel_lines(&machine),
            vec![
                "Players online: 2".to_string(),
                "Rooms:".to_string(),
                "  [4] alice".to_string()
            ]
        );
    }

    #[test]
    fn test_panel_shows_captures() {
        let mut machine = playing_machine(Color::Black);
        let text = protocol::INITIAL_BOARD.replacen("PPPPPPPP", "PP PPPPP", 1);
        machine.apply_inbound(ServerMessage::Board {
            current_board: Board::parse(&text).unwrap(),
            last_move: None,
        });
        let lines = panel_lines(&machine);
        assert_eq!(lines[0], "Room ID: 3  You play: black");
        assert_eq!(lines[1], "Captured white: ♙x1");
        assert_eq!(lines[2], "Captured black: ");
        assert_eq!(lines[3], "Board 2/2");
    }

    #[test]
    fn test_panel_reports_winner() {
        let mut machine = playing_machine(Color::Black);
        machine.apply_inbound(ServerMessage::GameResultBlackWon);
        assert!(panel_lines(&machine).contains(&"You won".to_string()));
    }
}
