//! 统一的走子接口
//!
//! 对局驱动方只依赖 `Agent`，具体策略由配置决定。

use connect_core::{Board, Column, Player};
use tracing::info;

use crate::config::{AgentKind, AiConfig};
use crate::error::Result;
use crate::mcts::MctsEngine;
use crate::random::RandomAgent;
use crate::search::MinimaxEngine;

/// 对局驱动方保存的不透明状态，引擎原样传回
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedState {
    data: Vec<u8>,
}

impl SavedState {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// 走子策略
pub trait Agent {
    /// 策略名称（用于日志）
    fn name(&self) -> &'static str;

    /// 为 `player` 选择一列，并原样返回 `saved_state`
    fn generate_move(
        &mut self,
        board: &Board,
        player: Player,
        saved_state: Option<SavedState>,
    ) -> Result<(Column, Option<SavedState>)>;
}

impl Agent for MinimaxEngine {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn generate_move(
        &mut self,
        board: &Board,
        player: Player,
        saved_state: Option<SavedState>,
    ) -> Result<(Column, Option<SavedState>)> {
        Ok((self.choose_move(board, player)?, saved_state))
    }
}

impl Agent for MctsEngine {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn generate_move(
        &mut self,
        board: &Board,
        player: Player,
        saved_state: Option<SavedState>,
    ) -> Result<(Column, Option<SavedState>)> {
        Ok((self.choose_move(board, player)?, saved_state))
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        "random"
    }

    fn generate_move(
        &mut self,
        board: &Board,
        _player: Player,
        saved_state: Option<SavedState>,
    ) -> Result<(Column, Option<SavedState>)> {
        Ok((self.choose_move(board)?, saved_state))
    }
}

/// 按配置创建走子策略
pub fn build_agent(config: &AiConfig) -> Result<Box<dyn Agent>> {
    let agent: Box<dyn Agent> = match config.agent {
        AgentKind::Random => Box::new(RandomAgent::new(config.random_seed)),
        AgentKind::Minimax => Box::new(MinimaxEngine::new(config.minimax.clone())?),
        AgentKind::Mcts => Box::new(MctsEngine::new(config.mcts.clone())?),
    };
    info!("Created {} agent", agent.name());
    Ok(agent)
}
