//! 错误类型定义

use thiserror::Error;

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket 错误
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 棋盘字符串无效
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// 坐标越界
    #[error("Invalid square: ({row}, {col})")]
    InvalidSquare { row: i64, col: i64 },

    /// 消息既不是 msg_type 信封，也不是单键包装
    #[error("Malformed message envelope")]
    MalformedEnvelope,

    /// 连接超时
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
