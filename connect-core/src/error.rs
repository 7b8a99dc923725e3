//! 错误类型定义

use thiserror::Error;

/// 棋局规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 列已满，无法落子
    #[error("Illegal move: column {column} is full")]
    IllegalMove { column: usize },

    /// 列索引越界
    #[error("Column {column} is out of range")]
    ColumnOutOfRange { column: usize },

    /// 棋盘数据格式错误
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// 连子数不在支持范围内
    #[error("Unsupported connect length: {n}")]
    InvalidConnectLength { n: usize },

    /// 棋盘已满，没有可走的列
    #[error("No legal moves left on the board")]
    NoLegalMoves,
}

/// 棋盘操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
