use gomoku3d_core::BoardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MctsError {
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Terminal position cannot be searched")]
    TerminalPosition,

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Root node not initialized")]
    RootNotInitialized,

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Dirichlet sampling error: {0}")]
    DirichletError(String),
}

pub type Result<T> = std::result::Result<T, MctsError>;
