//! 自对弈演示
//!
//! 运行方式:
//! ```bash
//! cargo run -p connect-ai --example self_play
//! cargo run -p connect-ai --example self_play -- player_one.json
//! ```
//!
//! 先手默认为 MCTS（0.5 秒），后手为深度 4 的 Minimax。
//! 传入 JSON 配置文件路径时，先手使用该配置。

use anyhow::Result;
use connect_ai::{build_agent, AgentKind, AiConfig, Difficulty, MctsConfig};
use connect_core::{Board, GameState, Player, Rules};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("connect_ai=info".parse()?))
        .init();

    let first = match std::env::args().nth(1) {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig {
            agent: AgentKind::Mcts,
            mcts: MctsConfig {
                time_budget_ms: 500,
                ..Default::default()
            },
            ..Default::default()
        },
    };
    let second = AiConfig::from_difficulty(AgentKind::Minimax, Difficulty::Medium);

    let mut agents = [build_agent(&first)?, build_agent(&second)?];
    let rules = Rules::default();
    let mut board = Board::empty();
    let mut player = Player::One;
    let mut saved_state = [None, None];

    info!("{} vs {}", agents[0].name(), agents[1].name());

    loop {
        let index = player.to_cell() as usize - 1;
        let (column, state) = agents[index].generate_move(&board, player, saved_state[index].take())?;
        saved_state[index] = state;

        board.apply_move(column, player)?;
        println!("{} ({}) -> column {}\n{}\n", player, agents[index].name(), column, board);

        match rules.check_end_state(&board, player, column) {
            GameState::Win => {
                println!("{} wins", player);
                break;
            }
            GameState::Draw => {
                println!("Draw");
                break;
            }
            GameState::StillPlaying => player = player.opponent(),
        }
    }

    Ok(())
}
