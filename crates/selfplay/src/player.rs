use anyhow::Result;
use gomoku3d_core::{Board, Player};

/// A participant in [`crate::Game::start_play`].
pub trait GamePlayer {
    /// Tell the player which side it controls; called once per game before
    /// the first move.
    fn set_player(&mut self, player: Player);

    /// Choose a move for the current position.
    ///
    /// Must return a member of [`Board::legal_moves`]; anything else ends the
    /// game with an error.
    fn get_action(&mut self, board: &Board) -> Result<usize>;

    fn name(&self) -> String;
}

/// An agent that plays both sides in [`crate::Game::start_self_play`].
pub trait SelfPlayAgent {
    /// Choose a move and report the move distribution behind it.
    ///
    /// The distribution has one non-negative entry per cell and is zero on
    /// occupied cells.
    fn get_action_with_probs(
        &mut self,
        board: &Board,
        temperature: f32,
    ) -> Result<(usize, Vec<f32>)>;

    /// Drop any search state tied to the finished game.
    fn reset(&mut self);
}
