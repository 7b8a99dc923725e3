//! AI 配置
//!
//! 所有配置均可从 JSON 读取，缺省字段使用默认值（即 Medium 难度）。

use std::path::Path;
use std::time::Duration;

use connect_core::{Rules, DEFAULT_CONNECT_N};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// 走子策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// 均匀随机
    Random,
    /// Minimax + Alpha-Beta
    Minimax,
    /// 蒙特卡洛树搜索
    #[default]
    Mcts,
}

/// Minimax 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// 根节点之下的搜索层数
    pub depth: u8,
    pub connect_n: usize,
}

impl MinimaxConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let depth = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        };
        Self {
            depth,
            connect_n: DEFAULT_CONNECT_N,
        }
    }

    pub fn rules(&self) -> Result<Rules> {
        Ok(Rules::new(self.connect_n)?)
    }
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// MCTS 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// 思考时间（毫秒），每轮迭代结束后检查一次
    pub time_budget_ms: u64,
    /// 迭代次数上限，与时间限制先到者为准
    pub max_iterations: Option<u64>,
    /// UCB1 探索系数
    pub exploration: f64,
    /// 随机种子，None 时每次使用新种子
    pub seed: Option<u64>,
    pub connect_n: usize,
}

impl MctsConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let time_budget_ms = match difficulty {
            Difficulty::Easy => 1_000,
            Difficulty::Medium => 10_000,
            Difficulty::Hard => 20_000,
        };
        Self {
            time_budget_ms,
            max_iterations: None,
            exploration: 1.0,
            seed: None,
            connect_n: DEFAULT_CONNECT_N,
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn rules(&self) -> Result<Rules> {
        Ok(Rules::new(self.connect_n)?)
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 完整的 AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AiConfig {
    pub agent: AgentKind,
    pub minimax: MinimaxConfig,
    pub mcts: MctsConfig,
    /// 随机走子的种子
    pub random_seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(agent: AgentKind, difficulty: Difficulty) -> Self {
        Self {
            agent,
            minimax: MinimaxConfig::from_difficulty(difficulty),
            mcts: MctsConfig::from_difficulty(difficulty),
            random_seed: None,
        }
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件读取
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::info!("Loaded AI config from {:?}: {:?}", path, config.agent);
        Ok(config)
    }

    /// 序列化为格式化的 JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
