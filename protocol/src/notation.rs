//! Move log formatting
//!
//! Entries pair the mover's glyph with algebraic squares:
//! - quiet move: `♙ e2 -> e4`
//! - capture: `♛ d8 x d1`
//!
//! The glyph is taken from the piece standing on the destination after the
//! move, so a promoted pawn is logged as a queen.

use crate::moves::Move;
use crate::piece::Piece;

/// Log entry builder
pub struct Notation;

impl Notation {
    /// Format one move log entry
    pub fn log_entry(piece: Piece, mv: &Move) -> String {
        format!("{} {}", piece.glyph(), mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Color, PieceKind, Position};

    fn pos(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_quiet_move_entry() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mv = Move::new(pos("e2"), pos("e4"), false);
        assert_eq!(Notation::log_entry(pawn, &mv), "♙ e2 -> e4");
    }

    #[test]
    fn test_capture_entry() {
        let queen = Piece::new(Color::Black, PieceKind::Queen);
        let mv = Move::new(pos("d8"), pos("d1"), true);
        assert_eq!(Notation::log_entry(queen, &mv), "♛ d8 x d1");
    }

    #[test]
    fn test_knight_entry() {
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let mv = Move::new(pos("g1"), pos("f3"), false);
        assert_eq!(Notation::log_entry(knight, &mv), "♘ g1 -> f3");
    }
}
