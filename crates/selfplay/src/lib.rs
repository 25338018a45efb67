//! Game controller and self-play data generation for 3D gomoku
//!
//! This crate provides functionality for:
//! - Running a game between two [`GamePlayer`]s
//! - Letting a [`SelfPlayAgent`] play itself while recording every position
//! - Labelling recorded positions with the final outcome
//! - Saving training data to NPY files for Python/PyTorch
//!
//! # Example
//!
//! ```no_run
//! use gomoku3d_core::Board;
//! use gomoku3d_mcts::{MctsConfig, UniformModel};
//! use gomoku3d_selfplay::{game_to_training_examples, play_game, save_training_data};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = MctsConfig::default()
//!     .with_simulations(400)
//!     .with_temperature(1.0)
//!     .with_dirichlet_noise(0.3, 0.25);
//!
//! // Play one game
//! let record = play_game(Board::default(), &UniformModel, &config)?;
//! println!("Game finished with {} moves", record.len());
//!
//! // Convert to training examples
//! let examples = game_to_training_examples(&record);
//!
//! // Save to files
//! save_training_data(&examples, "selfplay_data")?;
//! # Ok(())
//! # }
//! ```

mod data;
mod game;
mod mcts_player;
mod player;
mod render;
pub mod storage;

// Re-export public API
pub use data::{GameRecord, GameResult, TrainingExample};
pub use game::{game_to_training_examples, play_game, Game, GamePhase};
pub use mcts_player::MctsPlayer;
pub use player::{GamePlayer, SelfPlayAgent};
pub use render::render;
pub use storage::save_training_data;
