//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{CELL_COUNT, COLUMNS, ROWS};
use crate::error::{GameError, Result};
use crate::moves::{Column, MoveList};
use crate::piece::Player;

/// 棋盘
///
/// 6 行 7 列，`cells[row][column]`，第 0 行为最底行。
/// 棋子受重力约束：同一列中，下方格子全部有子时上方格子才能有子。
/// 序列化为数值网格，反序列化时检查取值与重力约束。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[u8; COLUMNS]; ROWS]", into = "[[u8; COLUMNS]; ROWS]")]
pub struct Board {
    cells: [[Option<Player>; COLUMNS]; ROWS],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [[None; COLUMNS]; ROWS],
        }
    }

    /// 从数值网格创建（0 = 空，1 = 玩家一，2 = 玩家二）
    pub fn from_cells(values: &[[u8; COLUMNS]; ROWS]) -> Result<Self> {
        let mut board = Self::empty();
        for (row, line) in values.iter().enumerate() {
            for (column, &value) in line.iter().enumerate() {
                board.cells[row][column] = match value {
                    0 => None,
                    v => Some(Player::from_cell(v).ok_or_else(|| GameError::InvalidBoard {
                        reason: format!("cell ({}, {}) holds unknown value {}", row, column, v),
                    })?),
                };
            }
        }
        board.validate()?;
        Ok(board)
    }

    /// 转换为数值网格
    pub fn to_cells(&self) -> [[u8; COLUMNS]; ROWS] {
        let mut values = [[0u8; COLUMNS]; ROWS];
        for (row, line) in self.cells.iter().enumerate() {
            for (column, cell) in line.iter().enumerate() {
                values[row][column] = cell.map_or(0, |p| p.to_cell());
            }
        }
        values
    }

    /// 检查重力约束
    pub fn validate(&self) -> Result<()> {
        for column in 0..COLUMNS {
            let mut seen_empty = false;
            for row in 0..ROWS {
                match self.cells[row][column] {
                    None => seen_empty = true,
                    Some(_) if seen_empty => {
                        return Err(GameError::InvalidBoard {
                            reason: format!("floating piece at ({}, {})", row, column),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// 获取指定格子，越界返回 None
    pub fn get(&self, row: usize, column: Column) -> Option<Player> {
        if row < ROWS && column < COLUMNS {
            self.cells[row][column]
        } else {
            None
        }
    }

    /// 列中已有的棋子数
    pub fn column_height(&self, column: Column) -> usize {
        if column >= COLUMNS {
            return 0;
        }
        (0..ROWS).take_while(|&row| self.cells[row][column].is_some()).count()
    }

    /// 下一枚棋子会落在哪一行，列满时返回 None
    pub fn landing_row(&self, column: Column) -> Option<usize> {
        let height = self.column_height(column);
        (height < ROWS).then_some(height)
    }

    /// 列顶（最后落下的棋子）所在行，空列返回 None
    pub fn top_row(&self, column: Column) -> Option<usize> {
        self.column_height(column).checked_sub(1)
    }

    /// 该列是否还能落子
    pub fn is_open(&self, column: Column) -> bool {
        column < COLUMNS && self.cells[ROWS - 1][column].is_none()
    }

    /// 在指定列落子，返回落子所在行
    pub fn apply_move(&mut self, column: Column, player: Player) -> Result<usize> {
        if column >= COLUMNS {
            return Err(GameError::ColumnOutOfRange { column });
        }
        let row = self.landing_row(column).ok_or(GameError::IllegalMove { column })?;
        self.cells[row][column] = Some(player);
        Ok(row)
    }

    /// 复制棋盘后落子，不修改原棋盘
    pub fn with_move(&self, column: Column, player: Player) -> Result<Board> {
        let mut next = *self;
        next.apply_move(column, player)?;
        Ok(next)
    }

    /// 所有未满的列，按列号升序
    pub fn legal_moves(&self) -> MoveList {
        (0..COLUMNS).filter(|&column| self.is_open(column)).collect()
    }

    /// 棋子总数
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.piece_count() == CELL_COUNT
    }

    /// 指定玩家在某一列中的棋子数
    pub fn count_in_column(&self, column: Column, player: Player) -> usize {
        (0..ROWS)
            .filter(|&row| self.cells[row][column] == Some(player))
            .count()
    }
}

impl TryFrom<[[u8; COLUMNS]; ROWS]> for Board {
    type Error = GameError;

    fn try_from(values: [[u8; COLUMNS]; ROWS]) -> Result<Self> {
        Self::from_cells(&values)
    }
}

impl From<Board> for [[u8; COLUMNS]; ROWS] {
    fn from(board: Board) -> Self {
        board.to_cells()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
