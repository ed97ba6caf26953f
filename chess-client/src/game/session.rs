//! 会话上下文
//!
//! 房间、执棋颜色以及对局标志集中在一个对象里，由状态机独占持有。

use protocol::{Color, GameOutcome, RoomId};

/// 再来一局的提示文案
pub const REMATCH_SENT_TEXT: &str = "Rematch offered, waiting for opponent";
pub const REMATCH_RECEIVED_TEXT: &str = "Opponent offers a rematch";

/// 断线提示文案
pub const DISCONNECTED_NOTICE: &str = "Disconnected from server";

/// 当前会话
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// 房间 ID
    pub room_id: Option<RoomId>,
    /// 执棋颜色
    pub color: Option<Color>,
    /// 是否已收到第一张棋盘
    pub game_started: bool,
    /// 对局是否结束
    pub is_game_over: bool,
    /// 是否存在再来一局邀请
    pub rematch_offered: bool,
    /// 邀请是否由本方发起
    pub rematch_by_me: bool,
    /// 对局结果
    pub outcome: Option<GameOutcome>,
}

impl Session {
    /// 分配到房间后的新会话
    pub fn new(room_id: RoomId, color: Color) -> Self {
        Self {
            room_id: Some(room_id),
            color: Some(color),
            ..Self::default()
        }
    }

    /// 重置为默认值
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 出站消息使用的房间 ID（未分配时为 0）
    pub fn room_or_zero(&self) -> RoomId {
        self.room_id.unwrap_or(0)
    }

    /// 结果文案
    pub fn result_label(&self) -> Option<&'static str> {
        self.outcome.map(|o| o.label())
    }

    /// 再来一局文案
    pub fn rematch_text(&self) -> Option<&'static str> {
        if !self.rematch_offered {
            return None;
        }
        Some(if self.rematch_by_me {
            REMATCH_SENT_TEXT
        } else {
            REMATCH_RECEIVED_TEXT
        })
    }

    /// 本方是否获胜（和棋或未结束为 None）
    pub fn is_winner(&self) -> Option<bool> {
        let winner = self.outcome?.winner()?;
        self.color.map(|c| c == winner)
    }
}
