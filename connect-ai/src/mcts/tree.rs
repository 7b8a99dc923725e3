//! MCTS 树结构（arena 分配）

use connect_core::{Board, Column, Player, Rules};

use super::node::{MctsNode, NodeId};
use crate::error::Result;

/// 以 Vec 存放节点的搜索树，根节点固定为 0 号
#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    /// 以当前棋盘为根建树
    pub fn new(board: Board, to_move: Player, rules: &Rules) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(board, to_move, rules)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.index()]
    }

    /// 已分配的节点数（含根节点）
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 按 UCB1 选择子节点，同分时取最靠后的子节点
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(id);
        let parent_visits_ln = (node.visits as f64).ln();

        node.children.iter().copied().max_by(|&a, &b| {
            let score_a = self.get(a).ucb_score(parent_visits_ln, exploration);
            let score_b = self.get(b).ucb_score(parent_visits_ln, exploration);
            score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// 扩展：在 `id` 的棋盘副本上走 `column`，生成轮到对手走的子节点
    pub fn expand(&mut self, id: NodeId, column: Column, rules: &Rules) -> Result<NodeId> {
        let child_id = NodeId(self.nodes.len() as u32);

        let parent = self.get_mut(id);
        let board = parent.board.with_move(column, parent.to_move)?;
        let removed = parent.unexpanded.remove(column);
        debug_assert!(removed, "column {} was not pending expansion", column);
        parent.children.push(child_id);
        let to_move = parent.to_move.opponent();

        self.nodes.push(MctsNode::new_child(id, board, column, to_move, rules));
        Ok(child_id)
    }

    /// 回传：从 `id` 一直到根节点，每个节点加上同一个结果并访问数加一
    pub fn backpropagate(&mut self, id: NodeId, result: f64) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.update(result);
            current = node.parent;
        }
    }

    /// 从 `id` 到根节点的路径（含两端）
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.get(id).parent;
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).parent;
        }
        path
    }

    /// 根节点下平均回报最高的子节点，同分时取最靠后的
    pub fn best_child(&self) -> Option<NodeId> {
        self.get(self.root()).children.iter().copied().max_by(|&a, &b| {
            self.get(a)
                .win_rate()
                .partial_cmp(&self.get(b).win_rate())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_two_children() -> (MctsTree, NodeId, NodeId) {
        let rules = Rules::default();
        let mut tree = MctsTree::new(Board::empty(), Player::Two, &rules);
        let root = tree.root();
        let first = tree.expand(root, 0, &rules).unwrap();
        let second = tree.expand(root, 1, &rules).unwrap();
        (tree, first, second)
    }

    #[test]
    fn test_expand() {
        let rules = Rules::default();
        let mut tree = MctsTree::new(Board::empty(), Player::Two, &rules);
        let root = tree.root();

        let child = tree.expand(root, 4, &rules).unwrap();
        let node = tree.get(child);

        assert_eq!(node.parent, Some(root));
        assert_eq!(tree.get(root).children, vec![child]);
        assert_eq!(node.action, Some(4));
        assert_eq!(node.to_move, Player::One);
        assert_eq!(node.board.get(0, 4), Some(Player::Two));
        assert!(!tree.get(root).unexpanded.contains(4));
        assert_eq!(tree.get(root).unexpanded.len(), 6);
        // 根节点棋盘不受影响
        assert_eq!(tree.get(root).board, Board::empty());
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_selection_prefers_higher_ucb() {
        let (mut tree, first, second) = tree_with_two_children();
        let root = tree.root();

        tree.get_mut(first).wins = 5.0;
        tree.get_mut(first).visits = 10;
        tree.get_mut(second).wins = 0.0;
        tree.get_mut(second).visits = 10;
        tree.get_mut(root).visits = 20;

        assert_eq!(tree.select_child(root, 1.0), Some(first));
    }

    #[test]
    fn test_selection_tie_takes_last() {
        let (mut tree, first, second) = tree_with_two_children();
        let root = tree.root();

        for id in [first, second] {
            tree.get_mut(id).wins = 3.0;
            tree.get_mut(id).visits = 6;
        }
        tree.get_mut(root).visits = 12;

        assert_eq!(tree.select_child(root, 1.0), Some(second));
    }

    #[test]
    fn test_best_child() {
        let (mut tree, first, second) = tree_with_two_children();

        tree.get_mut(first).wins = 2.0;
        tree.get_mut(first).visits = 4;
        tree.get_mut(second).wins = 1.0;
        tree.get_mut(second).visits = 4;
        assert_eq!(tree.best_child(), Some(first));

        // 同分取最靠后的子节点
        tree.get_mut(second).wins = 2.0;
        assert_eq!(tree.best_child(), Some(second));
    }

    #[test]
    fn test_backpropagate_path() {
        let rules = Rules::default();
        let mut tree = MctsTree::new(Board::empty(), Player::One, &rules);
        let root = tree.root();
        let child = tree.expand(root, 3, &rules).unwrap();
        let grandchild = tree.expand(child, 3, &rules).unwrap();
        let sibling = tree.expand(root, 2, &rules).unwrap();

        tree.backpropagate(grandchild, -0.1);

        assert_eq!(tree.path_to_root(grandchild), vec![grandchild, child, root]);
        for id in [grandchild, child, root] {
            // 每一层都加上相同的结果，不按层翻转符号
            assert_eq!(tree.get(id).visits, 1);
            assert!((tree.get(id).wins + 0.1).abs() < 1e-12);
        }
        assert_eq!(tree.get(sibling).visits, 0);
    }

    #[test]
    fn test_no_children_selection() {
        let rules = Rules::default();
        let tree = MctsTree::new(Board::empty(), Player::One, &rules);
        assert_eq!(tree.select_child(tree.root(), 1.0), None);
        assert_eq!(tree.best_child(), None);
        assert_eq!(tree.node_count(), 1);
    }
}
