//! Piece and position definitions

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;

/// Piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// Player color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White (moves first, bottom rows)
    White,
    /// Black (top rows)
    Black,
}

impl Color {
    /// Get the opposing color
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Pawn forward direction (row delta)
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row pawns start on
    pub fn pawn_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Back rank row
    pub fn back_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row a pawn promotes on
    pub fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: PieceKind,
}

impl Piece {
    /// Create a new piece
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Unicode glyph used in rendering and the move log
    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// Board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row (0 = black's back rank, 7 = white's)
    pub row: u8,
    /// Column (0 = file a, 7 = file h)
    pub col: u8,
}

impl Position {
    /// Create a new position
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Create a new position without bounds checking (internal use)
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check that the position is on the board
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Get the position offset by (d_row, d_col), if still on the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let new_row = self.row as i8 + d_row;
        let new_col = self.col as i8 + d_col;
        if new_row >= 0
            && (new_row as usize) < BOARD_SIZE
            && new_col >= 0
            && (new_col as usize) < BOARD_SIZE
        {
            Some(Position {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// Convert to a flat array index
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Convert from a flat array index
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// Parse an algebraic square name like "e2"
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) {
            return None;
        }
        let rank = rank.to_digit(10)?;
        if !(1..=8).contains(&rank) {
            return None;
        }
        Some(Position {
            row: (8 - rank) as u8,
            col: (file as u8) - b'a',
        })
    }
}

impl std::fmt::Display for Position {
    /// Algebraic square name: file a-h, rank 8 at the top
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_glyph() {
        let white_king = Piece::new(Color::White, PieceKind::King);
        assert_eq!(white_king.glyph(), '♔');

        let black_king = Piece::new(Color::Black, PieceKind::King);
        assert_eq!(black_king.glyph(), '♚');

        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        assert_eq!(white_pawn.glyph(), '♙');

        let black_queen = Piece::new(Color::Black, PieceKind::Queen);
        assert_eq!(black_queen.glyph(), '♛');
    }

    #[test]
    fn test_piece_wire_shape() {
        let piece = Piece::new(Color::White, PieceKind::Rook);
        let json = serde_json::to_value(piece).unwrap();
        assert_eq!(json, serde_json::json!({"color": "white", "type": "rook"}));

        let parsed: Piece =
            serde_json::from_value(serde_json::json!({"color": "black", "type": "knight"}))
                .unwrap();
        assert_eq!(parsed, Piece::new(Color::Black, PieceKind::Knight));
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }

    #[test]
    fn test_color_rows() {
        assert_eq!(Color::White.pawn_row(), 6);
        assert_eq!(Color::Black.pawn_row(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
    }

    #[test]
    fn test_position_valid() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new_unchecked(4, 4);
        assert_eq!(pos.offset(-1, 0), Some(Position::new_unchecked(3, 4)));
        assert_eq!(pos.offset(1, 1), Some(Position::new_unchecked(5, 5)));

        let corner = Position::new_unchecked(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
    }

    #[test]
    fn test_position_index_roundtrip() {
        let pos = Position::new_unchecked(3, 5);
        assert_eq!(Position::from_index(pos.to_index()), Some(pos));
        assert_eq!(Position::from_index(64), None);
    }

    #[test]
    fn test_algebraic_names() {
        assert_eq!(Position::new_unchecked(0, 0).to_string(), "a8");
        assert_eq!(Position::new_unchecked(7, 7).to_string(), "h1");
        assert_eq!(Position::new_unchecked(6, 4).to_string(), "e2");

        assert_eq!(
            Position::from_algebraic("e2"),
            Some(Position::new_unchecked(6, 4))
        );
        assert_eq!(
            Position::from_algebraic("a8"),
            Some(Position::new_unchecked(0, 0))
        );
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(Position::from_algebraic("a9"), None);
        assert_eq!(Position::from_algebraic("e22"), None);
        assert_eq!(Position::from_algebraic(""), None);
    }
}
