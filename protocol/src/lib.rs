//! 国际象棋联网客户端共享协议库
//!
//! 包含:
//! - 棋子、棋盘、坐标、走法等核心数据结构
//! - 消息类型定义 (ClientMessage, ServerMessage)
//! - 文本帧编解码 (MessageCodec)
//! - 传输层抽象 (Connector, FrameReader, FrameWriter traits) 与 WebSocket 实现

mod board;
mod codec;
mod constants;
mod error;
mod message;
mod moves;
mod piece;
mod transport;

pub use board::{Board, INITIAL_BOARD};
pub use codec::MessageCodec;
pub use constants::*;
pub use error::{ProtocolError, Result};
pub use message::{ClientMessage, GameOutcome, RoomEntry, RoomId, ServerMessage, MSG_TYPE_KEY};
pub use moves::Move;
pub use piece::{Color, Piece, PieceType, Square};
pub use transport::{
    memory_pair, split, ClientStream, Connector, FrameReader, FrameWriter, MemoryReader,
    MemoryWriter, WsConnector, WsFrameReader, WsFrameWriter,
};
