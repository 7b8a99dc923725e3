//! MCTS 引擎
//!
//! 在时间预算内反复迭代，最后选出平均回报最高的根子节点。

use std::time::Instant;

use connect_core::{Board, Column, GameError, Player, Rules};
use tracing::{debug, info};

use super::search::MctsSearch;
use crate::config::{Difficulty, MctsConfig};
use crate::error::Result;
use crate::random::make_rng;

/// MCTS 引擎
pub struct MctsEngine {
    config: MctsConfig,
    rules: Rules,
    iterations: u64,
    /// 配置了种子时，第 k 次搜索使用 seed + k
    search_count: u64,
}

impl MctsEngine {
    /// 创建新的 MCTS 引擎
    pub fn new(config: MctsConfig) -> Result<Self> {
        let rules = config.rules()?;
        Ok(Self {
            config,
            rules,
            iterations: 0,
            search_count: 0,
        })
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            config: MctsConfig::from_difficulty(difficulty),
            rules: Rules::default(),
            iterations: 0,
            search_count: 0,
        }
    }

    /// 选择最佳列
    ///
    /// 若某一列能立即获胜，按列号升序取第一个，不进行迭代。
    /// 否则迭代直到时间用完或达到迭代上限；两者都在每轮结束后检查，
    /// 因此至少完成一轮。
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<Column> {
        self.iterations = 0;
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(GameError::NoLegalMoves.into());
        }

        for column in moves.iter() {
            let child = board.with_move(column, player)?;
            if self.rules.has_connect_n(&child, player, column) {
                info!("MCTS found immediate win at column {}", column);
                return Ok(column);
            }
        }

        let seed = self.config.seed.map(|seed| seed.wrapping_add(self.search_count));
        self.search_count += 1;

        let budget = self.config.time_budget();
        let started = Instant::now();
        let mut search = MctsSearch::new(*board, player, self.rules, self.config.exploration, make_rng(seed));

        loop {
            search.iterate()?;
            if started.elapsed() >= budget {
                break;
            }
            if let Some(max) = self.config.max_iterations {
                if search.iterations() >= max {
                    break;
                }
            }
        }

        self.iterations = search.iterations();
        let column = search.best_move().ok_or(GameError::NoLegalMoves)?;

        debug!(
            "MCTS chose column {} after {} iterations ({} nodes, {:?})",
            column,
            self.iterations,
            search.tree().node_count(),
            started.elapsed()
        );

        Ok(column)
    }

    /// 上一次搜索完成的迭代次数
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}
