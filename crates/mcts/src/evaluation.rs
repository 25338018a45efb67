use gomoku3d_core::{Board, NUM_PLANES};
use ndarray::Array4;

use crate::error::{MctsError, Result};

/// Minimal interface required from a policy-value evaluator.
///
/// `state` is [`Board::encode_state`] of the position. The model returns one
/// policy logit per cell (illegal cells included, they are masked later) and
/// a value estimate in `[-1, 1]` for the player to move.
pub trait PolicyValueModel {
    fn forward(&self, state: &Array4<f32>) -> Result<(Vec<f32>, f32)>;
}

impl<M: PolicyValueModel + ?Sized> PolicyValueModel for &M {
    fn forward(&self, state: &Array4<f32>) -> Result<(Vec<f32>, f32)> {
        (**self).forward(state)
    }
}

/// Evaluator with no knowledge: flat logits and a neutral value.
///
/// Search driven by it still sees terminal positions, so it finds forced
/// wins and blocks within its horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformModel;

impl PolicyValueModel for UniformModel {
    fn forward(&self, state: &Array4<f32>) -> Result<(Vec<f32>, f32)> {
        Ok((vec![0.0; state.len() / NUM_PLANES], 0.0))
    }
}

/// Evaluate a position: priors over the legal moves plus a value.
///
/// Returns `(priors, value)` where `priors` pairs every legal move with its
/// softmax probability (illegal cells get none) and `value` is from the point
/// of view of the player to move.
pub fn evaluate_with_nn<M: PolicyValueModel>(
    board: &Board,
    model: &M,
) -> Result<(Vec<(usize, f32)>, f32)> {
    let state = board.encode_state();
    let (logits, value) = model.forward(&state)?;

    if logits.len() != board.num_cells() {
        return Err(MctsError::EvaluationFailed(format!(
            "Expected policy of length {}, got {}",
            board.num_cells(),
            logits.len()
        )));
    }
    if !value.is_finite() {
        return Err(MctsError::EvaluationFailed(format!(
            "Value is not finite: {value}"
        )));
    }

    let legal = board.legal_moves();
    let priors = legal
        .iter()
        .copied()
        .zip(softmax_legal_moves(&logits, legal))
        .collect();

    Ok((priors, value.clamp(-1.0, 1.0)))
}

/// Softmax restricted to `legal_moves`, in the same order.
pub fn softmax_legal_moves(logits: &[f32], legal_moves: &[usize]) -> Vec<f32> {
    if legal_moves.is_empty() {
        return Vec::new();
    }

    // Subtract the max for numerical stability
    let max = legal_moves
        .iter()
        .map(|&m| logits[m])
        .fold(f32::NEG_INFINITY, f32::max);

    let exps: Vec<f32> = legal_moves.iter().map(|&m| (logits[m] - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}
