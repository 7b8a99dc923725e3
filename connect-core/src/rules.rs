//! 胜负判定
//!
//! 局部扫描只检查最后一步所在的行、列和两条对角线，用于 MCTS 模拟中的逐步判定；
//! 全盘扫描遍历所有长度为 N 的窗口，供不记录最后一步的搜索使用。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{COLUMNS, DEFAULT_CONNECT_N, MAX_CONNECT_N, MIN_CONNECT_N, ROWS};
use crate::error::{GameError, Result};
use crate::moves::{Column, MoveList};
use crate::piece::Player;

/// 四个方向：横、竖、主对角线、副对角线（行增量, 列增量）
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 对局状态（由棋盘和最后一步推导，从不单独保存）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// 最后落子的一方获胜
    Win,
    /// 棋盘已满，和棋
    Draw,
    /// 对局继续
    StillPlaying,
}

/// 棋盘上一段长度为 N 的连续格子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    cells: [Option<Player>; MAX_CONNECT_N],
    len: usize,
}

impl Window {
    fn collect(board: &Board, len: usize, row: usize, column: usize, dr: isize, dc: isize) -> Option<Self> {
        let span = len as isize - 1;
        let end_row = row as isize + dr * span;
        let end_column = column as isize + dc * span;
        if !in_bounds(end_row, end_column) {
            return None;
        }

        let mut cells = [None; MAX_CONNECT_N];
        for (i, cell) in cells.iter_mut().take(len).enumerate() {
            let r = row as isize + dr * i as isize;
            let c = column as isize + dc * i as isize;
            *cell = board.get(r as usize, c as usize);
        }
        Some(Self { cells, len })
    }

    pub fn cells(&self) -> &[Option<Player>] {
        &self.cells[..self.len]
    }

    /// 窗口中指定玩家的棋子数
    pub fn count(&self, player: Player) -> usize {
        self.cells().iter().filter(|&&cell| cell == Some(player)).count()
    }

    /// 窗口中的空格数
    pub fn empty_count(&self) -> usize {
        self.cells().iter().filter(|cell| cell.is_none()).count()
    }
}

fn in_bounds(row: isize, column: isize) -> bool {
    (0..ROWS as isize).contains(&row) && (0..COLUMNS as isize).contains(&column)
}

/// 规则：连子数可配置，棋盘尺寸固定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Rules {
    connect_n: usize,
}

impl Rules {
    /// 创建规则，连子数必须在 `MIN_CONNECT_N..=MAX_CONNECT_N` 内
    pub fn new(connect_n: usize) -> Result<Self> {
        if !(MIN_CONNECT_N..=MAX_CONNECT_N).contains(&connect_n) {
            return Err(GameError::InvalidConnectLength { n: connect_n });
        }
        Ok(Self { connect_n })
    }

    pub fn connect_n(&self) -> usize {
        self.connect_n
    }

    /// 最后一步是否形成 N 连
    ///
    /// 定位 `last_column` 的顶部棋子，扫描穿过它的整行、整列和两条对角线上
    /// `player` 的最长连续段。空列返回 false。
    pub fn has_connect_n(&self, board: &Board, player: Player, last_column: Column) -> bool {
        let Some(row) = board.top_row(last_column) else {
            return false;
        };

        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| longest_run(board, player, row, last_column, dr, dc) >= self.connect_n)
    }

    /// 棋盘是否已满
    pub fn is_draw(&self, board: &Board) -> bool {
        board.is_full()
    }

    /// 判定最后一步之后的对局状态，胜负优先于和棋
    pub fn check_end_state(&self, board: &Board, player: Player, last_column: Column) -> GameState {
        if self.has_connect_n(board, player, last_column) {
            GameState::Win
        } else if self.is_draw(board) {
            GameState::Draw
        } else {
            GameState::StillPlaying
        }
    }

    /// 感知终局的合法走法
    ///
    /// `mover` 在 `last_column` 的最后一步已获胜，或棋盘已满时返回空列表。
    pub fn legal_moves_after(&self, board: &Board, mover: Player, last_column: Option<Column>) -> MoveList {
        if let Some(column) = last_column {
            if self.has_connect_n(board, mover, column) {
                return MoveList::new();
            }
        }
        board.legal_moves()
    }

    /// 遍历所有长度为 N 的窗口（四个方向）
    pub fn windows<'a>(&self, board: &'a Board) -> impl Iterator<Item = Window> + 'a {
        let len = self.connect_n;
        DIRECTIONS.into_iter().flat_map(move |(dr, dc)| {
            (0..ROWS)
                .flat_map(|row| (0..COLUMNS).map(move |column| (row, column)))
                .filter_map(move |(row, column)| Window::collect(board, len, row, column, dr, dc))
        })
    }

    /// 全盘扫描：`player` 是否在任意位置形成 N 连
    pub fn has_any_connect_n(&self, board: &Board, player: Player) -> bool {
        self.windows(board).any(|window| window.count(player) == self.connect_n)
    }

    /// 全盘扫描得到的胜者
    pub fn winner(&self, board: &Board) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&player| self.has_any_connect_n(board, player))
    }

    /// 终局：任一方 N 连，或棋盘已满
    pub fn is_terminal(&self, board: &Board) -> bool {
        self.winner(board).is_some() || self.is_draw(board)
    }
}

impl TryFrom<usize> for Rules {
    type Error = GameError;

    fn try_from(connect_n: usize) -> Result<Self> {
        Self::new(connect_n)
    }
}

impl From<Rules> for usize {
    fn from(rules: Rules) -> Self {
        rules.connect_n
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            connect_n: DEFAULT_CONNECT_N,
        }
    }
}

/// 沿方向 (dr, dc) 穿过 (row, column) 的整条线上 `player` 的最长连续段
fn longest_run(board: &Board, player: Player, row: usize, column: usize, dr: isize, dc: isize) -> usize {
    // 先退回到这条线的起点
    let (mut r, mut c) = (row as isize, column as isize);
    while in_bounds(r - dr, c - dc) {
        r -= dr;
        c -= dc;
    }

    let mut best = 0;
    let mut run = 0;
    while in_bounds(r, c) {
        if board.get(r as usize, c as usize) == Some(player) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
        r += dr;
        c += dc;
    }
    best
}
