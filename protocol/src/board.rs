//! Board and game state

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::moves::Move;
use crate::notation::Notation;
use crate::piece::{Color, Piece, PieceKind, Position};

/// Back rank layout, files a through h
const BACK_ROW: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Nested row-major wire shape for a board
type BoardRows = Vec<Vec<Option<Piece>>>;

/// The board
///
/// Stored flat, serialized as 8 rows of 8 cells. Deserialization rejects
/// anything that is not exactly 8x8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRows", into = "BoardRows")]
pub struct Board {
    /// 8x8 cells, indexed row * 8 + col
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// Create an empty board
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Create the standard starting layout
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for color in [Color::Black, Color::White] {
            for (col, kind) in BACK_ROW.into_iter().enumerate() {
                let pos = Position::new_unchecked(color.back_row(), col as u8);
                board.set(pos, Some(Piece::new(color, kind)));
            }
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(color.pawn_row(), col as u8);
                board.set(pos, Some(Piece::new(color, PieceKind::Pawn)));
            }
        }

        board
    }

    /// Get the piece at a position
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// Set the piece at a position
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// Move a piece without any rule checking, returning the captured piece
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// Find the king of the given color
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.all_pieces()
            .into_iter()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    /// All pieces of the given color with their positions
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// All pieces on the board with their positions
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        let mut result = Vec::new();
        for index in 0..self.squares.len() {
            if let Some(piece) = self.squares[index] {
                if let Some(pos) = Position::from_index(index) {
                    result.push((pos, piece));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl TryFrom<BoardRows> for Board {
    type Error = ChessError;

    fn try_from(rows: BoardRows) -> Result<Self, ChessError> {
        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidBoard {
                reason: format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }
        let mut squares = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(ChessError::InvalidBoard {
                    reason: format!("row {} has {} cells", row, cells.len()),
                });
            }
            squares.extend(cells);
        }
        Ok(Self { squares })
    }
}

impl From<Board> for BoardRows {
    fn from(board: Board) -> Self {
        board
            .squares
            .chunks(BOARD_SIZE)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Full game state, shared verbatim between client and coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub move_log: Vec<String>,
}

impl GameState {
    /// Create the initial state: fresh board, white to move, empty log
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            turn: Color::White,
            move_log: Vec::new(),
        }
    }

    /// Apply a move: capture whatever occupies the destination, promote a
    /// pawn reaching its last rank, append one log entry, flip the turn.
    ///
    /// Legality is the caller's concern; only an empty source is rejected.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<Move, ChessError> {
        let mut piece = self.board.get(from).ok_or(ChessError::NoPiece {
            row: from.row,
            col: from.col,
        })?;
        let captured = self.board.get(to);

        self.board.set(from, None);
        // Promote before logging so the entry shows the queen
        if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row() {
            piece.kind = PieceKind::Queen;
        }
        self.board.set(to, Some(piece));

        let mv = Move::new(from, to, captured.is_some());
        self.move_log.push(Notation::log_entry(piece, &mv));
        self.turn = self.turn.opponent();
        Ok(mv)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
