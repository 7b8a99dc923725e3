//! 错误类型定义

use connect_core::GameError;
use thiserror::Error;

/// AI 引擎错误
#[derive(Error, Debug)]
pub enum AiError {
    /// 棋盘或规则错误
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    /// 配置文件解析错误
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// AI 操作结果类型
pub type Result<T> = std::result::Result<T, AiError>;
