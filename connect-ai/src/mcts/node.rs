//! MCTS 树节点

use connect_core::{Board, Column, MoveList, Player, Rules};

/// 节点在树中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 树节点
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// 该节点的棋盘快照
    pub board: Board,
    /// 从父节点到达此处的走法（根节点为 None）
    pub action: Option<Column>,
    /// 在此节点轮到谁走
    pub to_move: Player,
    /// 父节点（根节点为 None）
    pub parent: Option<NodeId>,
    /// 子节点，按扩展顺序排列
    pub children: Vec<NodeId>,
    /// 累计回报（不是胜局计数，可能为负）
    pub wins: f64,
    pub visits: u64,
    /// 尚未扩展的走法，构造时计算一次
    pub unexpanded: MoveList,
    /// 构造时已无可走的列（有人获胜或满盘）
    terminal: bool,
}

impl MctsNode {
    /// 创建根节点
    pub fn new_root(board: Board, to_move: Player, rules: &Rules) -> Self {
        let unexpanded = rules.legal_moves_after(&board, to_move.opponent(), None);
        Self::with_moves(board, None, to_move, None, unexpanded)
    }

    /// 创建子节点，`action` 由 `to_move` 的对手走出
    pub fn new_child(parent: NodeId, board: Board, action: Column, to_move: Player, rules: &Rules) -> Self {
        let unexpanded = rules.legal_moves_after(&board, to_move.opponent(), Some(action));
        Self::with_moves(board, Some(action), to_move, Some(parent), unexpanded)
    }

    fn with_moves(
        board: Board,
        action: Option<Column>,
        to_move: Player,
        parent: Option<NodeId>,
        unexpanded: MoveList,
    ) -> Self {
        Self {
            board,
            action,
            to_move,
            parent,
            children: Vec::new(),
            wins: 0.0,
            visits: 0,
            terminal: unexpanded.is_empty(),
            unexpanded,
        }
    }

    /// 走出到达此节点那一步的玩家
    #[inline]
    pub fn mover(&self) -> Player {
        self.to_move.opponent()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded.is_empty()
    }

    /// 平均回报
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1 分值：平均回报 + c * sqrt(ln(父节点访问数) / 访问数)
    pub fn ucb_score(&self, parent_visits_ln: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.wins / visits + exploration * (parent_visits_ln / visits).sqrt()
    }

    /// 回传一次模拟结果
    pub fn update(&mut self, result: f64) {
        self.wins += result;
        self.visits += 1;
    }
}
