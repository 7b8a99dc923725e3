//! 四子棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 蒙特卡洛树搜索（MCTS）
//! - 均匀随机走子
//! - 统一的走子接口与配置

mod agent;
mod config;
mod error;
mod evaluate;
pub mod mcts;
mod random;
mod search;

pub use agent::{build_agent, Agent, SavedState};
pub use config::{AgentKind, AiConfig, Difficulty, MctsConfig, MinimaxConfig};
pub use error::{AiError, Result};
pub use evaluate::Evaluator;
pub use mcts::MctsEngine;
pub use random::RandomAgent;
pub use search::MinimaxEngine;
