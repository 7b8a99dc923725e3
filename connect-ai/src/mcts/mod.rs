//! 蒙特卡洛树搜索
//!
//! 每轮迭代分四步：选择、扩展、模拟、回传。
//! 树节点存放在连续的 Vec 中，通过 `NodeId` 索引，父节点链接只用于回传。

mod engine;
mod node;
mod search;
mod tree;

pub use engine::MctsEngine;
pub use node::{MctsNode, NodeId};
pub use search::{terminal_reward, MctsSearch, DRAW_REWARD, LOSS_REWARD, WIN_REWARD};
pub use tree::MctsTree;
