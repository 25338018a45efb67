//! gomoku3d command-line entry point.

mod cli;
mod human;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use gomoku3d_core::Board;
use gomoku3d_mcts::{MctsConfig, UniformModel};
use gomoku3d_selfplay::{save_training_data, Game, MctsPlayer};
use human::HumanPlayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            size,
            n_in_row,
            simulations,
            c_puct,
            human_first,
        } => run_play(size, n_in_row, simulations, c_puct, human_first),
        Command::Selfplay {
            games,
            size,
            n_in_row,
            simulations,
            temperature,
            dirichlet_alpha,
            dirichlet_epsilon,
            output,
            display,
        } => {
            let config = MctsConfig::default()
                .with_simulations(simulations)
                .with_temperature(temperature)
                .with_dirichlet_noise(dirichlet_alpha, dirichlet_epsilon);
            run_selfplay(games, size, n_in_row, &config, &output, display)
        }
    }
}

/// Human against the search, in the terminal
fn run_play(
    size: usize,
    n_in_row: usize,
    simulations: u32,
    c_puct: f32,
    human_first: bool,
) -> Result<()> {
    let board = Board::new(size, size, size, n_in_row)?;
    let config = MctsConfig::default()
        .with_simulations(simulations)
        .with_c_puct(c_puct);

    let mut human = HumanPlayer::from_stdin();
    let mut ai = MctsPlayer::new(UniformModel, config);
    let mut game = Game::new(board);

    let start_player = if human_first { 0 } else { 1 };
    let result = game.start_play(&mut human, &mut ai, start_player, true)?;
    info!(result = %result, "match over");
    Ok(())
}

/// Play `games` self-play games and save every position
fn run_selfplay(
    games: usize,
    size: usize,
    n_in_row: usize,
    config: &MctsConfig,
    output: &str,
    display: bool,
) -> Result<()> {
    let mut agent = MctsPlayer::for_self_play(UniformModel, config.clone());
    let mut game = Game::new(Board::new(size, size, size, n_in_row)?);
    let mut examples = Vec::new();

    for i in 0..games {
        let (result, game_examples) =
            game.start_self_play(&mut agent, display, config.temperature)?;
        info!(
            game = i + 1,
            games,
            result = %result,
            moves = game_examples.len(),
            "self-play game done"
        );
        examples.extend(game_examples);
    }

    save_training_data(&examples, output)?;
    info!(examples = examples.len(), output, "self-play finished");
    Ok(())
}
