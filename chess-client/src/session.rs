//! Local interaction state
//!
//! Tracks the board, the current selection with its cached targets, and the
//! seat assigned by the coordinator. Every board mutation goes through a
//! click or a full-state overwrite.

use protocol::{Color, GameState, Move, MoveGenerator, Position};

/// Result of a click on a board square
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Interaction is locked until the opponent moves
    Locked,
    /// Nothing selectable under the click
    Ignored,
    /// A piece was selected or reselected
    Selected(Position),
    /// The selection was dropped
    Cleared,
    /// A move was applied locally
    Moved(Move),
}

/// Local game plus selection state
pub struct GameSession {
    state: GameState,
    selection: Option<(Position, Vec<Position>)>,
    assigned: Option<Color>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            state: GameState::initial(),
            selection: None,
            assigned: None,
        }
    }

    /// Current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seat assigned by the coordinator, if any
    pub fn assigned(&self) -> Option<Color> {
        self.assigned
    }

    /// Assign or clear the seat; any selection is dropped
    pub fn set_assigned(&mut self, color: Option<Color>) {
        self.assigned = color;
        self.selection = None;
    }

    /// Selected square, if any
    pub fn selected(&self) -> Option<Position> {
        self.selection.as_ref().map(|(pos, _)| *pos)
    }

    /// Cached targets for the current selection
    pub fn targets(&self) -> &[Position] {
        self.selection
            .as_ref()
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }

    /// Whether clicks may mutate the board
    ///
    /// Offline sessions play both colors; online sessions only move when the
    /// assigned color is to play.
    pub fn is_interactive(&self) -> bool {
        match self.assigned {
            None => true,
            Some(color) => color == self.state.turn,
        }
    }

    /// Handle a click on a square
    pub fn click(&mut self, square: Position) -> ClickOutcome {
        if !self.is_interactive() {
            return ClickOutcome::Locked;
        }

        if let Some((selected, targets)) = self.selection.take() {
            if square == selected {
                return ClickOutcome::Cleared;
            }
            if targets.contains(&square) {
                // The selected square held a piece when the targets were cached
                return match self.state.apply_move(selected, square) {
                    Ok(mv) => ClickOutcome::Moved(mv),
                    Err(_) => ClickOutcome::Cleared,
                };
            }
            if self.holds_moving_color(square) {
                return self.select(square);
            }
            return ClickOutcome::Cleared;
        }

        if self.holds_moving_color(square) {
            return self.select(square);
        }
        ClickOutcome::Ignored
    }

    /// Replace the whole state with an authoritative copy
    pub fn apply_state(&mut self, state: GameState) {
        self.state = state;
        self.selection = None;
    }

    /// Fresh board, cleared selection
    pub fn reset_local(&mut self) {
        self.state = GameState::initial();
        self.selection = None;
    }

    fn holds_moving_color(&self, square: Position) -> bool {
        self.state
            .board
            .get(square)
            .map(|piece| piece.color == self.state.turn)
            .unwrap_or(false)
    }

    fn select(&mut self, square: Position) -> ClickOutcome {
        let targets = MoveGenerator::legal_moves(&self.state.board, square);
        self.selection = Some((square, targets));
        ClickOutcome::Selected(square)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_click_own_piece_selects() {
        let mut session = GameSession::new();
        assert_eq!(session.click(pos("e2")), ClickOutcome::Selected(pos("e2")));
        assert_eq!(session.selected(), Some(pos("e2")));
        assert!(session.targets().contains(&pos("e3")));
        assert!(session.targets().contains(&pos("e4")));
    }

    #[test]
    fn test_click_empty_square_ignored() {
        let mut session = GameSession::new();
        assert_eq!(session.click(pos("e5")), ClickOutcome::Ignored);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_click_opponent_piece_ignored() {
        let mut session = GameSession::new();
        assert_eq!(session.click(pos("e7")), ClickOutcome::Ignored);
    }

    #[test]
    fn test_click_same_square_clears() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        assert_eq!(session.click(pos("e2")), ClickOutcome::Cleared);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_click_target_applies_move() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        let outcome = session.click(pos("e4"));
        let ClickOutcome::Moved(mv) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(mv.from, pos("e2"));
        assert_eq!(mv.to, pos("e4"));
        assert!(!mv.capture);
        assert_eq!(session.state().turn, Color::Black);
        assert_eq!(session.selected(), None);
        assert_eq!(session.state().move_log.len(), 1);
    }

    #[test]
    fn test_click_other_own_piece_reselects() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        assert_eq!(session.click(pos("d2")), ClickOutcome::Selected(pos("d2")));
        assert_eq!(session.selected(), Some(pos("d2")));
    }

    #[test]
    fn test_click_unrelated_square_clears() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        // e7 is enemy-occupied and not a pawn target
        assert_eq!(session.click(pos("e7")), ClickOutcome::Cleared);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_locked_when_not_assigned_turn() {
        let mut session = GameSession::new();
        session.set_assigned(Some(Color::Black));
        assert_eq!(session.click(pos("e2")), ClickOutcome::Locked);
        assert_eq!(session.click(pos("e7")), ClickOutcome::Locked);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_offline_plays_both_colors() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        session.click(pos("e4"));
        assert_eq!(session.click(pos("d7")), ClickOutcome::Selected(pos("d7")));
        session.click(pos("d5"));
        assert_eq!(session.state().turn, Color::White);
        assert_eq!(session.state().move_log.len(), 2);
    }

    #[test]
    fn test_assigned_color_moves_on_its_turn() {
        let mut session = GameSession::new();
        session.set_assigned(Some(Color::White));
        session.click(pos("e2"));
        let outcome = session.click(pos("e4"));
        assert!(matches!(outcome, ClickOutcome::Moved(_)));
        // After the move it is the opponent's turn
        assert_eq!(session.click(pos("d2")), ClickOutcome::Locked);
    }

    #[test]
    fn test_apply_state_clears_selection() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        session.apply_state(GameState::initial());
        assert_eq!(session.selected(), None);
        assert!(session.targets().is_empty());
    }

    #[test]
    fn test_reset_local() {
        let mut session = GameSession::new();
        session.click(pos("e2"));
        session.click(pos("e4"));
        session.reset_local();
        assert_eq!(session.state().turn, Color::White);
        assert!(session.state().move_log.is_empty());
        assert!(session.state().board.get(pos("e2")).is_some());
    }
}
