use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error(
        "board dimensions {width}x{height}x{depth} cannot be less than n_in_row = {n_in_row}"
    )]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
        n_in_row: usize,
    },

    #[error("start player index must be 0 or 1, got {0}")]
    InvalidStartPlayer(usize),

    #[error("move {mv} is outside the board ({num_cells} cells)")]
    MoveOutOfRange { mv: usize, num_cells: usize },

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("invalid coordinate: {0}")]
    InvalidCoord(String),

    #[error("piece counts {first} and {second} cannot arise from alternating play")]
    PieceCountMismatch { first: usize, second: usize },
}

pub type Result<T> = std::result::Result<T, BoardError>;
