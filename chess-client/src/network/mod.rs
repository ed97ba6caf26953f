//! 网络通信模块
//!
//! 单条持久连接：入站帧按到达顺序交给状态机，用户命令与心跳从同一个循环发出

mod connection;

pub use connection::*;
