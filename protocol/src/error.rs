//! Error types

use thiserror::Error;

/// Chess rule errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// Position outside the board
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i8, col: i8 },

    /// No piece on the source square
    #[error("No piece at position ({row}, {col})")]
    NoPiece { row: u8, col: u8 },

    /// Board payload is not an 8x8 grid
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },
}

/// Result type for chess rule operations
pub type Result<T> = std::result::Result<T, ChessError>;
