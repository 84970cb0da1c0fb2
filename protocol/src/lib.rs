//! Shared chess protocol library
//!
//! Contains:
//! - Piece, board, and position data structures
//! - Pseudo-legal move generation and move application
//! - The optional king safety layer
//! - Move log formatting
//! - Wire types for the room coordination API

mod api;
mod board;
mod check;
mod constants;
mod error;
mod moves;
mod notation;
mod piece;

pub use api::{
    CreateRoomRequest, ErrorResponse, JoinRoomRequest, MoveRequest, MoveResponse, ResetRequest,
    RoomResponse, StateResponse,
};
pub use board::{Board, GameState};
pub use check::KingSafety;
pub use constants::*;
pub use error::{ChessError, Result};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Color, Piece, PieceKind, Position};
