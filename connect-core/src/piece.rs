//! 玩家定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手，棋子为 `O`
    One,
    /// 后手，棋子为 `X`
    Two,
}

impl Player {
    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 数值表示（1 或 2）
    pub fn to_cell(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// 从数值解析，0 表示空格
    pub fn from_cell(value: u8) -> Option<Player> {
        match value {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// 文本棋盘中的棋子字符
    pub fn glyph(&self) -> char {
        match self {
            Player::One => 'O',
            Player::Two => 'X',
        }
    }

    /// 从棋子字符解析
    pub fn from_glyph(c: char) -> Option<Player> {
        match c {
            'O' => Some(Player::One),
            'X' => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_cell_values() {
        assert_eq!(Player::One.to_cell(), 1);
        assert_eq!(Player::Two.to_cell(), 2);
        assert_eq!(Player::from_cell(0), None);
        assert_eq!(Player::from_cell(1), Some(Player::One));
        assert_eq!(Player::from_cell(2), Some(Player::Two));
        assert_eq!(Player::from_cell(3), None);
    }

    #[test]
    fn test_glyphs() {
        for player in [Player::One, Player::Two] {
            assert_eq!(Player::from_glyph(player.glyph()), Some(player));
        }
        assert_eq!(Player::from_glyph('.'), None);
    }
}
