//! 客户端会话状态机
//!
//! 入站消息经 [`SessionStateMachine::apply_inbound`]、用户命令经
//! [`SessionStateMachine::apply_user_command`] 进入；两者只修改状态机自己持有的状态，
//! 出站消息作为返回值交给连接层发送。

use protocol::{Board, ClientMessage, Color, Move, RoomEntry, ServerMessage, Square};

use super::captured::CapturedTally;
use super::history::BoardHistory;
use super::input::UserCommand;
use super::selector::MoveSelector;
use super::session::{Session, DISCONNECTED_NOTICE};

/// 连接/对局阶段
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum ClientState {
    /// 大厅
    #[default]
    Lobby,
    /// 已分配房间，尚未收到棋盘
    Waiting,
    /// 对局进行中
    Active,
    /// 对局结束，无再来一局邀请
    Finished,
    /// 对局结束，存在再来一局邀请
    RematchPending,
    /// 已断开（终态）
    Disconnected,
}

impl ClientState {
    /// 是否已经有可展示的棋盘
    pub fn has_board(&self) -> bool {
        matches!(
            self,
            ClientState::Active | ClientState::Finished | ClientState::RematchPending
        )
    }

    /// 是否可以创建或加入房间
    pub fn can_enter_room(&self) -> bool {
        matches!(
            self,
            ClientState::Lobby | ClientState::Finished | ClientState::RematchPending
        )
    }
}

/// 当前展示的棋盘视图（已考虑回放游标）
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub board: &'a Board,
    /// 回放历史局面时不标记上一步
    pub last_move: Option<Move>,
    /// 回放历史局面时不高亮落点
    pub possible: &'a [Square],
    pub selected: Option<Square>,
    pub color: Option<Color>,
    /// 游标是否在最新局面
    pub is_live: bool,
    /// 游标位置 / 历史长度
    pub position: (usize, usize),
}

/// 会话状态机
#[derive(Debug, Default)]
pub struct SessionStateMachine {
    state: ClientState,
    session: Session,
    history: BoardHistory,
    selector: MoveSelector,
    rooms: Vec<RoomEntry>,
    players_online: Option<u32>,
    notice: Option<&'static str>,
    /// 回放时按下被用于回到最新局面，对应的松开也一并吞掉
    swallow_release: bool,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // 入站消息
    // ------------------------------------------------------------------

    /// 处理一条入站消息
    pub fn apply_inbound(&mut self, msg: ServerMessage) {
        if self.state == ClientState::Disconnected {
            tracing::debug!("Ignoring {} after disconnect", msg.name());
            return;
        }

        let before = self.state;
        match msg {
            ServerMessage::NewRoom { room_id, color } => {
                self.reset_session();
                self.session = Session::new(room_id, color);
                self.state = ClientState::Waiting;
                tracing::info!("Assigned room {} as {}", room_id, color);
            }
            ServerMessage::Board {
                current_board,
                last_move,
            } => self.on_board(current_board, last_move),
            ServerMessage::Possible { possible_moves } => {
                if self.state == ClientState::Active {
                    tracing::debug!("Possible destinations: {:?}", possible_moves);
                    self.selector.apply_possible(possible_moves);
                } else {
                    tracing::debug!("Ignoring Possible in {:?}", self.state);
                }
            }
            ServerMessage::GameResultWhiteWon
            | ServerMessage::GameResultBlackWon
            | ServerMessage::GameResultDraw => {
                if self.state == ClientState::Active {
                    self.session.is_game_over = true;
                    self.session.outcome = msg.outcome();
                    self.selector.cancel();
                    self.state = ClientState::Finished;
                } else {
                    tracing::debug!("Ignoring {} in {:?}", msg.name(), self.state);
                }
            }
            ServerMessage::Rematch { my_offer } => {
                if matches!(self.state, ClientState::Finished | ClientState::RematchPending) {
                    self.session.rematch_offered = true;
                    self.session.rematch_by_me = my_offer;
                    self.state = ClientState::RematchPending;
                } else {
                    tracing::debug!("Ignoring Rematch in {:?}", self.state);
                }
            }
            ServerMessage::Rooms { room_names } => {
                tracing::debug!("Received room list: {} rooms", room_names.len());
                self.rooms = room_names;
            }
            ServerMessage::PlayersOnline { count } => {
                self.players_online = Some(count);
            }
            ServerMessage::Disconnected => {
                self.selector.clear();
                self.swallow_release = false;
                self.notice = Some(DISCONNECTED_NOTICE);
                self.state = ClientState::Disconnected;
            }
            ServerMessage::Unknown => {
                tracing::debug!("Unhandled server message");
            }
        }

        if before != self.state {
            tracing::info!("State {:?} -> {:?}", before, self.state);
        }
    }

    fn on_board(&mut self, board: Board, last_move: Option<Move>) {
        match self.state {
            ClientState::Waiting | ClientState::Active => {
                self.history.push(board, last_move);
                self.session.game_started = true;
                self.selector.cancel();
                self.state = ClientState::Active;
            }
            // 结果之后晚到的局面仍然记入历史，状态不变
            ClientState::Finished | ClientState::RematchPending => {
                self.history.push(board, last_move);
            }
            ClientState::Lobby | ClientState::Disconnected => {
                tracing::debug!("Ignoring Board in {:?}", self.state);
            }
        }
    }

    // ------------------------------------------------------------------
    // 用户命令
    // ------------------------------------------------------------------

    /// 处理一条用户命令，返回需要发送的出站消息
    pub fn apply_user_command(&mut self, cmd: UserCommand) -> Option<ClientMessage> {
        if self.state == ClientState::Disconnected && cmd != UserCommand::Exit {
            tracing::debug!("Ignoring {:?} after disconnect", cmd);
            return None;
        }

        match cmd {
            UserCommand::CreateRoom { name } => self
                .state
                .can_enter_room()
                .then(|| ClientMessage::create(name)),
            UserCommand::JoinRoom { room_id } => self
                .state
                .can_enter_room()
                .then_some(ClientMessage::Join { room_id }),
            UserCommand::OfferRematch => {
                matches!(self.state, ClientState::Finished | ClientState::RematchPending).then(
                    || ClientMessage::Rematch {
                        room_id: self.session.room_or_zero(),
                    },
                )
            }
            UserCommand::Exit => {
                self.reset_session();
                self.notice = None;
                self.state = ClientState::Disconnected;
                tracing::info!("Session closed by user");
                None
            }
            UserCommand::Press(square) => self.on_press(square),
            UserCommand::Release(square) => self.on_release(square),
            UserCommand::HistoryBack => {
                self.history.left();
                None
            }
            UserCommand::HistoryForward => {
                self.history.right();
                None
            }
        }
    }

    fn on_press(&mut self, square: Square) -> Option<ClientMessage> {
        if !self.accepts_board_input() {
            return None;
        }

        if !self.history.is_at_tail() {
            self.history.resync();
            self.swallow_release = true;
            tracing::debug!("Replay resynced to latest board");
            return None;
        }

        self.swallow_release = false;
        self.selector
            .press(square, self.session.room_or_zero(), self.session.is_game_over)
    }

    fn on_release(&mut self, square: Square) -> Option<ClientMessage> {
        if !self.accepts_board_input() {
            return None;
        }

        if std::mem::take(&mut self.swallow_release) {
            return None;
        }

        if !self.history.is_at_tail() {
            self.history.resync();
            return None;
        }

        self.selector.release(square, self.session.room_or_zero())
    }

    fn accepts_board_input(&self) -> bool {
        self.session.game_started && self.state.has_board()
    }

    /// 重置会话、历史与选子状态（房间列表保留）
    fn reset_session(&mut self) {
        self.session.reset();
        self.history.clear();
        self.selector.clear();
        self.swallow_release = false;
        self.notice = None;
    }

    // ------------------------------------------------------------------
    // 派生状态
    // ------------------------------------------------------------------

    /// 当前展示的棋盘
    pub fn view(&self) -> Option<BoardView<'_>> {
        let entry = self.history.current()?;
        let is_live = self.history.is_at_tail();
        Some(BoardView {
            board: &entry.board,
            last_move: if is_live { entry.last_move } else { None },
            possible: if is_live { self.selector.possible() } else { &[] },
            selected: if is_live { self.selector.selected() } else { None },
            color: self.session.color,
            is_live,
            position: (self.history.cursor(), self.history.len()),
        })
    }

    /// 当前展示局面的被吃棋子统计
    pub fn captured(&self) -> Option<CapturedTally> {
        self.history
            .current()
            .map(|entry| CapturedTally::from_board(&entry.board))
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &BoardHistory {
        &self.history
    }

    pub fn selector(&self) -> &MoveSelector {
        &self.selector
    }

    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    pub fn players_online(&self) -> Option<u32> {
        self.players_online
    }

    /// 断线提示
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }
}
