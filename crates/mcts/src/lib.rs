//! AlphaZero-style tree search over [`gomoku3d_core::Board`].
//!
//! The search is driven by any [`PolicyValueModel`]; [`UniformModel`] is a
//! knowledge-free stand-in for a trained network.

mod config;
mod dirichlet;
mod error;
mod evaluation;
mod expansion;
mod mcts;
mod search_result;
mod tree;

pub use config::MctsConfig;
pub use error::{MctsError, Result};
pub use evaluation::{evaluate_with_nn, softmax_legal_moves, PolicyValueModel, UniformModel};
pub use mcts::Mcts;
pub use search_result::SearchResult;
