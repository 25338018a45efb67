//! Terminal player that reads moves as `d,h,w`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use gomoku3d_core::{Board, Coord, Player};
use gomoku3d_selfplay::GamePlayer;
use tracing::warn;

pub struct HumanPlayer<R> {
    input: R,
    side: Option<Player>,
}

impl HumanPlayer<io::StdinLock<'static>> {
    pub fn from_stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> HumanPlayer<R> {
    pub fn new(input: R) -> Self {
        Self { input, side: None }
    }
}

/// Parse `d,h,w` into an available move on `board`.
pub fn parse_move(board: &Board, text: &str) -> Option<usize> {
    let coord: Coord = text.trim().parse().ok()?;
    let mv = board.coord_to_move(coord)?;
    board.is_available(mv).then_some(mv)
}

impl<R: BufRead> GamePlayer for HumanPlayer<R> {
    fn set_player(&mut self, player: Player) {
        self.side = Some(player);
    }

    fn get_action(&mut self, board: &Board) -> Result<usize> {
        loop {
            print!("Your move (d,h,w): ");
            io::stdout().flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                anyhow::bail!("input closed before a move was entered");
            }

            match parse_move(board, &line) {
                Some(mv) => return Ok(mv),
                None => {
                    warn!(input = line.trim(), "invalid move");
                    println!("invalid move");
                }
            }
        }
    }

    fn name(&self) -> String {
        match self.side {
            Some(p) => format!("Human {}", p),
            None => "Human".to_string(),
        }
    }
}
