//! 协议常量定义

use std::time::Duration;

/// 棋盘边长（行数与列数相同）
pub const BOARD_SIZE: usize = 8;

/// 默认服务器地址
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:9977";

/// 服务端断开连接时发送的裸字符串（不是 JSON 信封）
pub const DISCONNECTED_SENTINEL: &str = "disconnected";

/// 客户端心跳间隔（秒）
pub const KEEPALIVE_INTERVAL_SECS: u64 = 59;

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 心跳间隔 Duration
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(KEEPALIVE_INTERVAL_SECS);

/// 连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
