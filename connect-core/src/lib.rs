//! 四子棋（Connect-N）共享棋盘库
//!
//! 包含:
//! - 玩家、棋盘等核心数据结构
//! - 落子与合法走法枚举
//! - 胜负判定（局部扫描 + 全盘扫描）
//! - 棋盘文本格式（渲染与解析）

mod board;
mod constants;
mod error;
mod moves;
mod notation;
mod piece;
mod rules;

pub use board::Board;
pub use constants::*;
pub use error::{GameError, Result};
pub use moves::{Column, MoveList};
pub use notation::Notation;
pub use piece::Player;
pub use rules::{GameState, Rules, Window};
