//! 均匀随机走子

use connect_core::{Board, Column, GameError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;

/// 创建随机数生成器，未给种子时随机取一个
pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// 从所有未满的列中均匀选一列，满盘返回 None
pub fn random_column<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Column> {
    board.legal_moves().as_slice().choose(rng).copied()
}

/// 随机 AI，作为基线对手
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: make_rng(seed) }
    }

    pub fn choose_move(&mut self, board: &Board) -> Result<Column> {
        Ok(random_column(board, &mut self.rng).ok_or(GameError::NoLegalMoves)?)
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(None)
    }
}
