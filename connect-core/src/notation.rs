//! 棋盘文本格式
//!
//! 带边框的文本网格，最上面一行是第 5 行，最底下一行是第 0 行：
//!
//! ```text
//! | - - - - - - - |
//! | . . . . . . . |
//! | . X . . . . X |
//! | . O X . . . O |
//! | . O O X X O O |
//! | . X X O X O X |
//! | . X X O X O O |
//! | - - - - - - - |
//! | 0 1 2 3 4 5 6 |
//! ```
//!
//! `O` 为玩家一，`X` 为玩家二，`.` 为空格。

use std::fmt;

use crate::board::Board;
use crate::constants::{COLUMNS, ROWS};
use crate::error::{GameError, Result};
use crate::piece::Player;

const EMPTY_GLYPH: char = '.';

/// 文本格式处理
pub struct Notation;

impl Notation {
    /// 边框行
    fn border() -> String {
        let mut line = String::from("|");
        for _ in 0..COLUMNS {
            line.push_str(" -");
        }
        line.push_str(" |");
        line
    }

    /// 列号行
    fn footer() -> String {
        let mut line = String::from("|");
        for column in 0..COLUMNS {
            line.push(' ');
            line.push_str(&column.to_string());
        }
        line.push_str(" |");
        line
    }

    /// 将棋盘渲染为文本网格
    pub fn render(board: &Board) -> String {
        let mut lines = Vec::with_capacity(ROWS + 3);
        lines.push(Self::border());

        for row in (0..ROWS).rev() {
            let mut line = String::from("|");
            for column in 0..COLUMNS {
                line.push(' ');
                line.push(board.get(row, column).map_or(EMPTY_GLYPH, |p| p.glyph()));
            }
            line.push_str(" |");
            lines.push(line);
        }

        lines.push(Self::border());
        lines.push(Self::footer());
        lines.join("\n")
    }

    /// 解析文本网格
    pub fn parse(text: &str) -> Result<Board> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();

        if lines.len() != ROWS + 3 {
            return Err(invalid(format!("expected {} lines, got {}", ROWS + 3, lines.len())));
        }
        if lines[0] != Self::border() || lines[ROWS + 1] != Self::border() {
            return Err(invalid("missing border line".to_string()));
        }
        if lines[ROWS + 2] != Self::footer() {
            return Err(invalid("missing column footer".to_string()));
        }

        let mut values = [[0u8; COLUMNS]; ROWS];
        for (index, line) in lines[1..=ROWS].iter().enumerate() {
            let row = ROWS - 1 - index;
            let inner = line
                .strip_prefix('|')
                .and_then(|rest| rest.strip_suffix('|'))
                .ok_or_else(|| invalid(format!("row {} is not enclosed in '|'", row)))?;

            let glyphs: Vec<&str> = inner.split_whitespace().collect();
            if glyphs.len() != COLUMNS {
                return Err(invalid(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    glyphs.len(),
                    COLUMNS
                )));
            }

            for (column, glyph) in glyphs.iter().enumerate() {
                let mut chars = glyph.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(invalid(format!("invalid cell '{}' at ({}, {})", glyph, row, column)));
                };
                values[row][column] = match c {
                    EMPTY_GLYPH => 0,
                    c => Player::from_glyph(c)
                        .ok_or_else(|| invalid(format!("invalid cell '{}' at ({}, {})", c, row, column)))?
                        .to_cell(),
                };
            }
        }

        Board::from_cells(&values)
    }
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidBoard { reason }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Notation::render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "| - - - - - - - |\n\
                          | . . . . . . . |\n\
                          | . X . . . . X |\n\
                          | . O X . . . O |\n\
                          | . O O X X O O |\n\
                          | . X X O X O X |\n\
                          | . X X O X O O |\n\
                          | - - - - - - - |\n\
                          | 0 1 2 3 4 5 6 |";

    fn sample_board() -> Board {
        Board::from_cells(&[
            [0, 2, 2, 1, 2, 1, 1],
            [0, 2, 2, 1, 2, 1, 2],
            [0, 1, 1, 2, 2, 1, 1],
            [0, 1, 2, 0, 0, 0, 1],
            [0, 2, 0, 0, 0, 0, 2],
            [0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_render() {
        assert_eq!(Notation::render(&sample_board()), SAMPLE);
        assert_eq!(sample_board().to_string(), SAMPLE);
    }

    #[test]
    fn test_parse() {
        let board = Notation::parse(SAMPLE).unwrap();
        assert_eq!(board, sample_board());
        assert_eq!(board.get(0, 1), Some(Player::Two));
        assert_eq!(board.get(2, 1), Some(Player::One));
    }

    #[test]
    fn test_roundtrip() {
        let mut board = Board::empty();
        let moves = [3, 3, 4, 2, 2, 5, 6, 6, 6, 0, 1, 3];
        let mut player = Player::One;
        for column in moves {
            board.apply_move(column, player).unwrap();
            player = player.opponent();

            let text = Notation::render(&board);
            assert_eq!(Notation::parse(&text).unwrap(), board);
        }
    }

    #[test]
    fn test_roundtrip_empty() {
        let board = Board::empty();
        assert_eq!(Notation::parse(&Notation::render(&board)).unwrap(), board);
    }

    #[test]
    fn test_parse_invalid_line_count() {
        assert!(matches!(
            Notation::parse("| - - - - - - - |"),
            Err(GameError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_glyph() {
        let text = SAMPLE.replacen("| . X X O X O O |", "| . X X Q X O O |", 1);
        assert!(matches!(Notation::parse(&text), Err(GameError::InvalidBoard { .. })));
    }

    #[test]
    fn test_parse_short_row() {
        let text = SAMPLE.replacen("| . X X O X O O |", "| . X X O X O |", 1);
        assert!(matches!(Notation::parse(&text), Err(GameError::InvalidBoard { .. })));
    }

    #[test]
    fn test_parse_floating_piece() {
        let text = SAMPLE.replacen("| . . . . . . . |", "| O . . . . . . |", 1);
        assert!(matches!(Notation::parse(&text), Err(GameError::InvalidBoard { .. })));
    }
}
