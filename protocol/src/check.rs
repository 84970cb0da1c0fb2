//! King safety layer
//!
//! A separate filter over the pseudo-legal generator. The base game
//! deliberately allows moves that leave the king attacked; these helpers
//! exist for callers that want the stricter rule set. Castling and en
//! passant are out of scope either way.

use crate::board::Board;
use crate::moves::MoveGenerator;
use crate::piece::{Color, Piece, PieceKind, Position};

/// King safety queries
pub struct KingSafety;

impl KingSafety {
    /// Check whether any piece of `by` attacks `target`
    pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
        board
            .pieces(by)
            .into_iter()
            .any(|(pos, piece)| Self::can_attack(board, pos, piece, target))
    }

    /// Check whether the king of `color` is under attack
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king_pos) => Self::is_square_attacked(board, king_pos, color.opponent()),
            None => false,
        }
    }

    /// Pseudo-legal moves for the piece at `from`, minus any that leave the
    /// mover's own king attacked
    pub fn safe_moves(board: &Board, from: Position) -> Vec<Position> {
        let piece = match board.get(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        MoveGenerator::legal_moves(board, from)
            .into_iter()
            .filter(|&to| {
                // Simulate the move on a scratch board
                let mut test_board = board.clone();
                test_board.move_piece(from, to);
                !Self::is_in_check(&test_board, piece.color)
            })
            .collect()
    }

    /// Geometric attack test per piece kind
    fn can_attack(board: &Board, from: Position, piece: Piece, target: Position) -> bool {
        let d_row = target.row as i8 - from.row as i8;
        let d_col = target.col as i8 - from.col as i8;

        match piece.kind {
            PieceKind::Pawn => d_row == piece.color.forward() && d_col.abs() == 1,
            PieceKind::Knight => {
                (d_row.abs() == 1 && d_col.abs() == 2) || (d_row.abs() == 2 && d_col.abs() == 1)
            }
            PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1 && (d_row, d_col) != (0, 0),
            PieceKind::Rook => {
                (d_row == 0) != (d_col == 0) && Self::clear_line(board, from, target)
            }
            PieceKind::Bishop => {
                d_row.abs() == d_col.abs() && d_row != 0 && Self::clear_line(board, from, target)
            }
            PieceKind::Queen => {
                let straight = (d_row == 0) != (d_col == 0);
                let diagonal = d_row.abs() == d_col.abs() && d_row != 0;
                (straight || diagonal) && Self::clear_line(board, from, target)
            }
        }
    }

    /// Check that every square strictly between `from` and `target` is empty,
    /// walking the shared rank, file, or diagonal
    fn clear_line(board: &Board, from: Position, target: Position) -> bool {
        let d_row = (target.row as i8 - from.row as i8).signum();
        let d_col = (target.col as i8 - from.col as i8).signum();

        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            if next == target {
                return true;
            }
            if board.get(next).is_some() {
                return false;
            }
            current = next;
        }
        false
    }
}
