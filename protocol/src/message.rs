//! 消息类型定义
//!
//! 出站消息以 `msg_type` 字段区分变体；入站消息还可能是以变体名为唯一键的包装形式，
//! 两种形式的归一化见 [`crate::MessageCodec`]。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Color, Square};

/// 房间 ID
pub type RoomId = u32;

/// 信封中区分变体的字段名
pub const MSG_TYPE_KEY: &str = "msg_type";

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// 白方胜
    WhiteWon,
    /// 黑方胜
    BlackWon,
    /// 和棋
    Draw,
}

impl GameOutcome {
    /// 固定的结果文案
    pub fn label(&self) -> &'static str {
        match self {
            GameOutcome::WhiteWon => "Game over, white won!",
            GameOutcome::BlackWon => "Game over, black won!",
            GameOutcome::Draw => "Game over, draw!",
        }
    }

    /// 胜方颜色（和棋为 None）
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::WhiteWon => Some(Color::White),
            GameOutcome::BlackWon => Some(Color::Black),
            GameOutcome::Draw => None,
        }
    }
}

/// 大厅中的房间条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RoomEntryRepr", into = "(RoomId, String)")]
pub struct RoomEntry {
    pub id: RoomId,
    pub name: String,
}

impl RoomEntry {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// 房间条目的几种线上形式
#[derive(Deserialize)]
#[serde(untagged)]
enum RoomEntryRepr {
    /// `[id, name]`
    Pair(RoomId, String),
    /// `{ "id": .., "name": .. }`
    Named { id: RoomId, name: String },
    /// 旧版服务端只下发 id
    Id(RoomId),
}

impl From<RoomEntryRepr> for RoomEntry {
    fn from(repr: RoomEntryRepr) -> Self {
        match repr {
            RoomEntryRepr::Pair(id, name) | RoomEntryRepr::Named { id, name } => Self { id, name },
            RoomEntryRepr::Id(id) => Self {
                id,
                name: format!("Room {}", id),
            },
        }
    }
}

impl From<RoomEntry> for (RoomId, String) {
    fn from(entry: RoomEntry) -> Self {
        (entry.id, entry.name)
    }
}

/// 客户端发送给服务端的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msg_type")]
pub enum ClientMessage {
    /// 创建房间（room_id 固定为 0）
    Create { room_id: RoomId, room_name: String },
    /// 加入房间
    Join { room_id: RoomId },
    /// 走棋
    Move { make_move: Move, room_id: RoomId },
    /// 请求某格棋子的合法落点
    Possible {
        room_id: RoomId,
        possible_moves: Square,
    },
    /// 发起或接受再来一局
    Rematch { room_id: RoomId },
    /// 心跳
    Ping { room_id: RoomId },
}

impl ClientMessage {
    /// 创建房间请求
    pub fn create(room_name: impl Into<String>) -> Self {
        ClientMessage::Create {
            room_id: 0,
            room_name: room_name.into(),
        }
    }

    /// 变体名（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::Create { .. } => "Create",
            ClientMessage::Join { .. } => "Join",
            ClientMessage::Move { .. } => "Move",
            ClientMessage::Possible { .. } => "Possible",
            ClientMessage::Rematch { .. } => "Rematch",
            ClientMessage::Ping { .. } => "Ping",
        }
    }
}

/// 服务端发送给客户端的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msg_type")]
pub enum ServerMessage {
    // === 大厅 ===
    /// 分配到房间
    NewRoom { room_id: RoomId, color: Color },
    /// 房间列表（整体替换）
    Rooms {
        #[serde(default, alias = "rooms")]
        room_names: Vec<RoomEntry>,
    },
    /// 在线人数
    PlayersOnline { count: u32 },

    // === 对局 ===
    /// 新局面
    Board {
        current_board: Board,
        #[serde(default)]
        last_move: Option<Move>,
    },
    /// 合法落点列表
    Possible {
        #[serde(default)]
        possible_moves: Vec<Square>,
    },
    /// 白方胜
    GameResultWhiteWon,
    /// 黑方胜
    GameResultBlackWon,
    /// 和棋
    GameResultDraw,
    /// 再来一局邀请（my_offer 表示是否由本方发起）
    Rematch { my_offer: bool },

    // === 连接 ===
    /// 服务端发送的裸 "disconnected" 字符串
    #[serde(skip)]
    Disconnected,

    /// 未识别的变体（向前兼容，直接忽略）
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// 若为对局结果消息，返回结果
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self {
            ServerMessage::GameResultWhiteWon => Some(GameOutcome::WhiteWon),
            ServerMessage::GameResultBlackWon => Some(GameOutcome::BlackWon),
            ServerMessage::GameResultDraw => Some(GameOutcome::Draw),
            _ => None,
        }
    }

    /// 变体名（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            ServerMessage::NewRoom { .. } => "NewRoom",
            ServerMessage::Rooms { .. } => "Rooms",
            ServerMessage::PlayersOnline { .. } => "PlayersOnline",
            ServerMessage::Board { .. } => "Board",
            ServerMessage::Possible { .. } => "Possible",
            ServerMessage::GameResultWhiteWon => "GameResultWhiteWon",
            ServerMessage::GameResultBlackWon => "GameResultBlackWon",
            ServerMessage::GameResultDraw => "GameResultDraw",
            ServerMessage::Rematch { .. } => "Rematch",
            ServerMessage::Disconnected => "Disconnected",
            ServerMessage::Unknown => "Unknown",
        }
    }
}
