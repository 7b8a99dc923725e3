//! 搜索引擎
//!
//! 实现深度受限的 Minimax + Alpha-Beta 剪枝

use std::time::Instant;

use connect_core::{Board, Column, GameError, Player, Rules};
use tracing::debug;

use crate::config::{Difficulty, MinimaxConfig};
use crate::error::Result;
use crate::evaluate::Evaluator;

/// Minimax 引擎
pub struct MinimaxEngine {
    config: MinimaxConfig,
    rules: Rules,
    evaluator: Evaluator,
    nodes_searched: u64,
}

impl MinimaxEngine {
    /// 创建新的 Minimax 引擎
    pub fn new(config: MinimaxConfig) -> Result<Self> {
        let rules = config.rules()?;
        Ok(Self {
            config,
            rules,
            evaluator: Evaluator::new(rules),
            nodes_searched: 0,
        })
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let rules = Rules::default();
        Self {
            config: MinimaxConfig::from_difficulty(difficulty),
            rules,
            evaluator: Evaluator::new(rules),
            nodes_searched: 0,
        }
    }

    /// 选择最佳列
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<Column> {
        self.search(board, player).map(|(column, _)| column)
    }

    /// 搜索最佳列，同时返回其分值
    ///
    /// 按列号升序逐一展开根节点，每个走法使用全新的 (-∞, +∞) 窗口，
    /// 只有严格更大的分值才替换当前最佳，同分保留最左侧的列。
    pub fn search(&mut self, board: &Board, player: Player) -> Result<(Column, i32)> {
        self.nodes_searched = 0;
        let started = Instant::now();

        let moves = board.legal_moves();
        let mut best_column = moves.first().ok_or(GameError::NoLegalMoves)?;
        let mut best_value = i32::MIN;

        for column in moves.iter() {
            let child = board.with_move(column, player)?;
            let value = self.alpha_beta(&child, self.config.depth, i32::MIN, i32::MAX, false, player)?;

            if value > best_value {
                best_value = value;
                best_column = column;
            }
        }

        debug!(
            "Minimax chose column {} (value {}, depth {}, {} nodes, {:?})",
            best_column,
            best_value,
            self.config.depth,
            self.nodes_searched,
            started.elapsed()
        );

        Ok((best_column, best_value))
    }

    /// Alpha-Beta 搜索
    ///
    /// 分值始终站在 `root_player` 视角；叶子分值乘以 (剩余深度 + 1)，
    /// 越早到达的胜局分越高，越晚到达的败局扣分越少。
    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        root_player: Player,
    ) -> Result<i32> {
        self.nodes_searched += 1;

        if depth == 0 || self.rules.is_terminal(board) {
            return Ok(self.evaluator.score(board, root_player) * (depth as i32 + 1));
        }

        if maximizing {
            let mut value = i32::MIN;
            for column in board.legal_moves().iter() {
                let child = board.with_move(column, root_player)?;
                value = value.max(self.alpha_beta(&child, depth - 1, alpha, beta, false, root_player)?);
                alpha = alpha.max(value);
                if alpha >= beta {
                    break; // Beta 剪枝
                }
            }
            Ok(value)
        } else {
            let opponent = root_player.opponent();
            let mut value = i32::MAX;
            for column in board.legal_moves().iter() {
                let child = board.with_move(column, opponent)?;
                value = value.min(self.alpha_beta(&child, depth - 1, alpha, beta, true, root_player)?);
                beta = beta.min(value);
                if beta <= alpha {
                    break; // Alpha 剪枝
                }
            }
            Ok(value)
        }
    }

    /// 获取上一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }
}
