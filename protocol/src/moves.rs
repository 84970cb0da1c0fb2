//! Pseudo-legal move generation

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Color, PieceKind, Position};

/// Orthogonal slide directions
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal slide directions
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Knight jump offsets
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// King step offsets
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source square
    pub from: Position,
    /// Destination square
    pub to: Position,
    /// Whether the destination was occupied when the move was applied
    pub capture: bool,
}

impl Move {
    /// Create a new move record
    pub fn new(from: Position, to: Position, capture: bool) -> Self {
        Self { from, to, capture }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.capture { "x" } else { "->" };
        write!(f, "{} {} {}", self.from, sep, self.to)
    }
}

/// Move generator
///
/// Generates pseudo-legal destinations only: piece movement rules and
/// occupancy are respected, king safety is not. The safety layer in
/// `crate::check` builds on top of this.
pub struct MoveGenerator;

impl MoveGenerator {
    /// Pseudo-legal destinations for the piece at `from`
    ///
    /// Returns an empty list for an empty square.
    pub fn legal_moves(board: &Board, from: Position) -> Vec<Position> {
        let piece = match board.get(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        let mut moves = Vec::new();
        match piece.kind {
            PieceKind::Pawn => Self::generate_pawn_moves(board, from, piece.color, &mut moves),
            PieceKind::Rook => {
                Self::generate_slides(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves)
            }
            PieceKind::Bishop => {
                Self::generate_slides(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves)
            }
            PieceKind::Queen => {
                Self::generate_slides(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves);
                Self::generate_slides(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves);
            }
            PieceKind::Knight => {
                Self::generate_steps(board, from, piece.color, &KNIGHT_OFFSETS, &mut moves)
            }
            PieceKind::King => {
                Self::generate_steps(board, from, piece.color, &KING_OFFSETS, &mut moves)
            }
        }
        moves
    }

    /// Pawn moves: single push, double push from the starting row, diagonal
    /// captures only
    fn generate_pawn_moves(board: &Board, pos: Position, color: Color, moves: &mut Vec<Position>) {
        let forward = color.forward();

        if let Some(one) = pos.offset(forward, 0) {
            if board.get(one).is_none() {
                moves.push(one);

                // Double push only while the single square was empty too
                if pos.row == color.pawn_row() {
                    if let Some(two) = pos.offset(forward * 2, 0) {
                        if board.get(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        for d_col in [-1i8, 1] {
            if let Some(diag) = pos.offset(forward, d_col) {
                if let Some(target) = board.get(diag) {
                    if target.color != color {
                        moves.push(diag);
                    }
                }
            }
        }
    }

    /// Slide along each direction until blocked; an enemy blocker is
    /// included as a capture, a friendly one is not
    fn generate_slides(
        board: &Board,
        pos: Position,
        color: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(d_row, d_col) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(d_row, d_col) {
                if let Some(target) = board.get(to) {
                    if target.color != color {
                        moves.push(to);
                    }
                    break;
                }
                moves.push(to);
                current = to;
            }
        }
    }

    /// Fixed-offset steps for knight and king
    fn generate_steps(
        board: &Board,
        pos: Position,
        color: Color,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(d_row, d_col) in offsets {
            if let Some(to) = pos.offset(d_row, d_col) {
                Self::try_add(board, to, color, moves);
            }
        }
    }

    /// Add the destination unless a friendly piece occupies it
    fn try_add(board: &Board, to: Position, color: Color, moves: &mut Vec<Position>) {
        match board.get(to) {
            Some(target) if target.color == color => {}
            _ => moves.push(to),
        }
    }
}
