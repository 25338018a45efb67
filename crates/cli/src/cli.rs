//! Command-line interface for gomoku3d.

use clap::{Parser, Subcommand};

/// 3D gomoku: play against the search or generate self-play data
#[derive(Parser, Debug)]
#[command(name = "gomoku3d")]
#[command(about = "n-in-a-row on a 3D board with AlphaZero-style search", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game against the search from the terminal
    Play {
        /// Edge length of the cubic board
        #[arg(long, default_value = "4")]
        size: usize,

        /// Stones in a row needed to win
        #[arg(long, default_value = "4")]
        n_in_row: usize,

        /// Simulations per search
        #[arg(long, default_value = "400")]
        simulations: u32,

        /// PUCT exploration constant
        #[arg(long, default_value = "5.0")]
        c_puct: f32,

        /// Let the human make the opening move
        #[arg(long)]
        human_first: bool,
    },

    /// Generate self-play games and save them as NPY training data
    Selfplay {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Edge length of the cubic board
        #[arg(long, default_value = "4")]
        size: usize,

        /// Stones in a row needed to win
        #[arg(long, default_value = "4")]
        n_in_row: usize,

        /// Simulations per search
        #[arg(long, default_value = "400")]
        simulations: u32,

        /// Move sampling temperature
        #[arg(long, default_value = "1.0")]
        temperature: f32,

        /// Dirichlet concentration for root noise
        #[arg(long, default_value = "0.3")]
        dirichlet_alpha: f32,

        /// Weight of the root noise
        #[arg(long, default_value = "0.25")]
        dirichlet_epsilon: f32,

        /// Base path of the NPY files (without extension)
        #[arg(short, long, default_value = "selfplay_data")]
        output: String,

        /// Print the board after every move
        #[arg(long)]
        display: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_defaults() {
        let cli = Cli::parse_from(["gomoku3d", "play"]);
        match cli.command {
            Command::Play {
                size,
                n_in_row,
                simulations,
                human_first,
                ..
            } => {
                assert_eq!(size, 4);
                assert_eq!(n_in_row, 4);
                assert_eq!(simulations, 400);
                assert!(!human_first);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_selfplay_flags() {
        let cli = Cli::parse_from([
            "gomoku3d",
            "selfplay",
            "--games",
            "3",
            "--size",
            "3",
            "--n-in-row",
            "3",
            "--output",
            "out/data",
            "--display",
        ]);
        match cli.command {
            Command::Selfplay {
                games,
                size,
                n_in_row,
                output,
                display,
                temperature,
                ..
            } => {
                assert_eq!(games, 3);
                assert_eq!(size, 3);
                assert_eq!(n_in_row, 3);
                assert_eq!(output, "out/data");
                assert!(display);
                assert_eq!(temperature, 1.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
