//! 用户输入

use protocol::{RoomId, Square};

/// 用户触发的命令（包括棋盘指针事件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// 创建房间
    CreateRoom { name: String },
    /// 加入房间
    JoinRoom { room_id: RoomId },
    /// 发起或接受再来一局
    OfferRematch,
    /// 退出（关闭连接并重置）
    Exit,
    /// 指针按下
    Press(Square),
    /// 指针松开
    Release(Square),
    /// 回放：上一步
    HistoryBack,
    /// 回放：下一步
    HistoryForward,
}
