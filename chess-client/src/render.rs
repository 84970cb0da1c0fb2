//! Terminal presentation of the board

use protocol::{GameState, Position};

/// Render the board as a text grid, rank 8 at the top
pub fn board_text(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");
    for row in 0..8u8 {
        let rank = 8 - row;
        out.push_str(&format!("{rank} "));
        for col in 0..8u8 {
            let cell = match state.board.get(Position::new_unchecked(row, col)) {
                Some(piece) => piece.glyph(),
                None => '·',
            };
            out.push(cell);
            out.push(' ');
        }
        out.push_str(&format!("{rank}\n"));
    }
    out.push_str("  a b c d e f g h");
    out
}

/// Squares joined by spaces, in generator order
pub fn square_list(squares: &[Position]) -> String {
    squares
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last `count` log entries, oldest first
pub fn log_tail(state: &GameState, count: usize) -> String {
    let log = &state.move_log;
    let start = log.len().saturating_sub(count);
    log[start..].join("\n")
}
