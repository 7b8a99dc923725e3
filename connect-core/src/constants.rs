//! 棋盘常量定义

/// 棋盘行数
pub const ROWS: usize = 6;

/// 棋盘列数
pub const COLUMNS: usize = 7;

/// 棋盘格子总数
pub const CELL_COUNT: usize = ROWS * COLUMNS;

/// 中心列索引
pub const CENTER_COLUMN: usize = COLUMNS / 2;

/// 默认连子数（四子连珠获胜）
pub const DEFAULT_CONNECT_N: usize = 4;

/// 允许的最小连子数
pub const MIN_CONNECT_N: usize = 3;

/// 允许的最大连子数（横向最多放下一整行）
pub const MAX_CONNECT_N: usize = COLUMNS;
