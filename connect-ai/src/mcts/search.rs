//! MCTS 单轮迭代：选择、扩展、模拟、回传

use connect_core::{Board, Column, Player, Rules};
use rand::seq::SliceRandom;
use rand::Rng;

use super::node::NodeId;
use super::tree::MctsTree;
use crate::error::Result;
use crate::random::random_column;

/// 搜索方获胜
pub const WIN_REWARD: f64 = 1.0;
/// 搜索方落败
pub const LOSS_REWARD: f64 = -0.1;
/// 和棋
pub const DRAW_REWARD: f64 = 0.0;

/// 已分出结果的棋盘对 `me` 的回报，对局未结束时返回 None
pub fn terminal_reward(rules: &Rules, board: &Board, me: Player) -> Option<f64> {
    match rules.winner(board) {
        Some(player) if player == me => Some(WIN_REWARD),
        Some(_) => Some(LOSS_REWARD),
        None if board.is_full() => Some(DRAW_REWARD),
        None => None,
    }
}

/// 一次完整的树搜索
///
/// 持有搜索树和随机数生成器，每调用一次 `iterate` 完成一轮迭代。
pub struct MctsSearch<R: Rng> {
    tree: MctsTree,
    rules: Rules,
    me: Player,
    exploration: f64,
    rng: R,
    iterations: u64,
}

impl<R: Rng> MctsSearch<R> {
    /// 以 `board` 为根，`me` 为轮到走子的一方
    pub fn new(board: Board, me: Player, rules: Rules, exploration: f64, rng: R) -> Self {
        Self {
            tree: MctsTree::new(board, me, &rules),
            rules,
            me,
            exploration,
            rng,
            iterations: 0,
        }
    }

    /// 执行一轮迭代
    pub fn iterate(&mut self) -> Result<()> {
        let leaf = self.select();
        let node = self.expand(leaf)?;
        let reward = self.simulate(node)?;
        self.tree.backpropagate(node, reward);
        self.iterations += 1;
        Ok(())
    }

    /// 选择：沿 UCB1 最高的子节点下行，直到遇到还有未扩展走法的节点或没有子节点的节点
    fn select(&self) -> NodeId {
        let mut id = self.tree.root();
        loop {
            let node = self.tree.get(id);
            if !node.is_fully_expanded() {
                return id;
            }
            match self.tree.select_child(id, self.exploration) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// 扩展：随机取一个未扩展的走法；终局节点原样返回
    fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let pending = self.tree.get(id).unexpanded;
        match pending.as_slice().choose(&mut self.rng).copied() {
            Some(column) => self.tree.expand(id, column, &self.rules),
            None => Ok(id),
        }
    }

    /// 模拟：从节点的棋盘出发双方随机走子，直到分出胜负或满盘
    fn simulate(&mut self, id: NodeId) -> Result<f64> {
        let node = self.tree.get(id);
        let mut board = node.board;
        let mut player = node.to_move;
        if let Some(reward) = terminal_reward(&self.rules, &board, self.me) {
            return Ok(reward);
        }

        while let Some(column) = random_column(&board, &mut self.rng) {
            board.apply_move(column, player)?;
            if self.rules.has_connect_n(&board, player, column) {
                return Ok(if player == self.me { WIN_REWARD } else { LOSS_REWARD });
            }
            player = player.opponent();
        }
        Ok(DRAW_REWARD)
    }

    /// 已完成的迭代次数
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    /// 根节点下平均回报最高的走法，尚无子节点时返回 None
    pub fn best_move(&self) -> Option<Column> {
        self.tree
            .best_child()
            .and_then(|id| self.tree.get(id).action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::make_rng;
    use connect_core::{Notation, COLUMNS, ROWS};
    use rand_chacha::ChaCha8Rng;

    fn search(board: Board, me: Player) -> MctsSearch<ChaCha8Rng> {
        MctsSearch::new(board, me, Rules::default(), 1.0, make_rng(Some(11)))
    }

    /// 无人连成四子的满盘
    fn full_draw_board() -> Board {
        let mut values = [[0u8; COLUMNS]; ROWS];
        for (row, line) in values.iter_mut().enumerate() {
            let pattern = [1, 1, 2, 1, 1, 2, 1];
            for (column, cell) in line.iter_mut().enumerate() {
                *cell = if row % 2 == 0 { pattern[column] } else { 3 - pattern[column] };
            }
        }
        Board::from_cells(&values).unwrap()
    }

    #[test]
    fn test_terminal_reward() {
        let rules = Rules::default();
        assert_eq!(terminal_reward(&rules, &Board::empty(), Player::One), None);
        assert_eq!(terminal_reward(&rules, &full_draw_board(), Player::One), Some(DRAW_REWARD));

        let mut board = Board::empty();
        for column in 0..4 {
            board.apply_move(column, Player::Two).unwrap();
        }
        assert_eq!(terminal_reward(&rules, &board, Player::Two), Some(WIN_REWARD));
        assert_eq!(terminal_reward(&rules, &board, Player::One), Some(LOSS_REWARD));
    }

    #[test]
    fn test_simulate_result() {
        // 根节点已是满盘和棋，直接得到和棋回报
        let mut drawn = MctsSearch::new(full_draw_board(), Player::One, Rules::default(), 1.0, make_rng(Some(2)));
        let root = drawn.tree().root();
        assert_eq!(drawn.simulate(root).unwrap(), DRAW_REWARD);

        let mut open = search(Board::empty(), Player::Two);
        let root = open.tree().root();
        for _ in 0..50 {
            let reward = open.simulate(root).unwrap();
            assert!([WIN_REWARD, LOSS_REWARD, DRAW_REWARD].contains(&reward));
        }
    }

    #[test]
    fn test_one_iteration_updates_path_once() {
        let mut search = search(Board::empty(), Player::One);
        search.iterate().unwrap();

        let tree = search.tree();
        let root = tree.root();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.get(root).visits, 1);
        assert_eq!(tree.get(root).children.len(), 1);

        let child = tree.get(root).children[0];
        assert_eq!(tree.get(child).visits, 1);
        // 路径上每个节点得到同一个回报
        assert_eq!(tree.get(child).wins, tree.get(root).wins);
        assert!([WIN_REWARD, LOSS_REWARD, DRAW_REWARD].contains(&tree.get(root).wins));
    }

    #[test]
    fn test_root_visits_equal_child_visits() {
        let mut search = search(Board::empty(), Player::Two);
        for _ in 0..200 {
            search.iterate().unwrap();
        }

        let tree = search.tree();
        let root = tree.get(tree.root());
        let child_visits: u64 = root.children.iter().map(|&id| tree.get(id).visits).sum();
        assert_eq!(root.visits, 200);
        assert_eq!(child_visits, root.visits);
        assert_eq!(search.iterations(), 200);
        // 7 列都已扩展
        assert_eq!(root.children.len(), COLUMNS);
        assert!(root.is_fully_expanded());
    }

    #[test]
    fn test_terminal_leaf_is_revisited() {
        // 第 3 列直接获胜，其余列都会被扩展，获胜子节点是终局
        let board = Notation::parse(
            "| - - - - - - - |\n\
             | . . . . . . . |\n\
             | . . . . . . . |\n\
             | . . . . . . . |\n\
             | . . . . . . . |\n\
             | X X X . . . . |\n\
             | O O O . . . . |\n\
             | - - - - - - - |\n\
             | 0 1 2 3 4 5 6 |",
        )
        .unwrap();
        let mut search = search(board, Player::One);
        for _ in 0..300 {
            search.iterate().unwrap();
        }

        let tree = search.tree();
        let winning = tree
            .get(tree.root())
            .children
            .iter()
            .copied()
            .find(|&id| tree.get(id).action == Some(3))
            .unwrap();
        let node = tree.get(winning);
        assert!(node.is_terminal());
        assert!(node.children.is_empty());
        assert_eq!(node.wins, node.visits as f64 * WIN_REWARD);
        // 回报不超过 1，获胜子节点的平均回报不会被超过
        let best = search.best_move().unwrap();
        let best_rate = tree
            .get(tree.root())
            .children
            .iter()
            .map(|&id| tree.get(id))
            .find(|child| child.action == Some(best))
            .unwrap()
            .win_rate();
        assert_eq!(best_rate, node.win_rate());
    }

    #[test]
    fn test_best_move_before_iterating() {
        let search = search(Board::empty(), Player::One);
        assert_eq!(search.best_move(), None);
        assert_eq!(search.iterations(), 0);
    }
}
