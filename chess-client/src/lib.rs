//! 国际象棋联网客户端
//!
//! 服务端判定一切规则，客户端只负责会话状态、选子交互、历史回放与渲染

pub mod board;
pub mod game;
pub mod network;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod ui;
