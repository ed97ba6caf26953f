//! 游戏逻辑模块
//!
//! 会话状态机及其持有的历史、选子、吃子统计

mod captured;
mod history;
mod input;
mod selector;
mod session;
mod state;

pub use captured::*;
pub use history::*;
pub use input::*;
pub use selector::*;
pub use session::*;
pub use state::*;
