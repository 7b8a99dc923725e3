//! 棋局评估函数

use connect_core::{Board, Player, Rules, CENTER_COLUMN};

/// 评分权重
///
/// 对手的同型窗口扣分高于己方加分，偏向稳健的走法。
mod weights {
    /// 中心列己方每子
    pub const CENTER_OWN: i32 = 10;
    /// 中心列对方每子
    pub const CENTER_OPPONENT: i32 = -5;

    /// 窗口内己方 N / N-1 / N-2 子（其余为空）
    pub const OWN: [i32; 3] = [200, 50, 10];
    /// 窗口内对方 N / N-1 / N-2 子（其余为空）
    pub const OPPONENT: [i32; 3] = [-250, -55, -12];
}

/// 评估器
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    rules: Rules,
}

impl Evaluator {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    /// 从 `player` 视角评估棋盘，正值对 `player` 有利
    ///
    /// 不区分终局与非终局，搜索在深度截断处也直接调用。
    pub fn score(&self, board: &Board, player: Player) -> i32 {
        self.center_score(board, player) + self.window_score(board, player)
    }

    /// 中心列控制
    pub fn center_score(&self, board: &Board, player: Player) -> i32 {
        let own = board.count_in_column(CENTER_COLUMN, player) as i32;
        let opponent = board.count_in_column(CENTER_COLUMN, player.opponent()) as i32;
        own * weights::CENTER_OWN + opponent * weights::CENTER_OPPONENT
    }

    /// 所有长度为 N 的窗口的形状分
    pub fn window_score(&self, board: &Board, player: Player) -> i32 {
        let opponent = player.opponent();
        self.rules
            .windows(board)
            .map(|window| {
                let own = window.count(player);
                let theirs = window.count(opponent);
                match (own, theirs) {
                    (0, 0) => 0,
                    (own, 0) => self.pattern_value(own, &weights::OWN),
                    (0, theirs) => self.pattern_value(theirs, &weights::OPPONENT),
                    // 双方混杂的窗口谁也连不成
                    _ => 0,
                }
            })
            .sum()
    }

    /// 窗口中只有一方的 `count` 子时的分值
    fn pattern_value(&self, count: usize, table: &[i32; 3]) -> i32 {
        let n = self.rules.connect_n();
        if count == n {
            table[0]
        } else if count + 1 == n {
            table[1]
        } else if count + 2 == n {
            table[2]
        } else {
            0
        }
    }
}
