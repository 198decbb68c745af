//! The position store: the single mutable position of the active game.

use netmate_protocol::MovePayload;

use crate::{Board, Rules, RulesError, Side};

/// Owns the live position and is the only place it changes.
///
/// Exclusively held by the active game session; never shared across
/// sessions. Rejected moves never reach this store — the server reports
/// them as `invalid_move`, which doesn't touch the position at all.
pub struct PositionStore<R: Rules> {
    position: R::Position,
}

impl<R: Rules> PositionStore<R> {
    /// Creates a store holding the initial position.
    pub fn new() -> Self {
        Self {
            position: R::initial(),
        }
    }

    /// Applies a server-confirmed move.
    ///
    /// The stored position is replaced only on success; a failed apply
    /// leaves it exactly as it was.
    pub fn apply_move(&mut self, mv: &MovePayload) -> Result<(), RulesError> {
        self.position = R::apply(&self.position, mv)?;
        Ok(())
    }

    /// A renderable snapshot of the current board.
    pub fn board(&self) -> Board {
        R::board(&self.position)
    }

    /// The side to move.
    pub fn turn(&self) -> Side {
        R::turn(&self.position)
    }

    /// Discards the position and starts over from the initial one.
    pub fn reset(&mut self) {
        self.position = R::initial();
    }
}

impl<R: Rules> Default for PositionStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelayRules;
    use netmate_protocol::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_store_holds_initial_position() {
        let store = PositionStore::<RelayRules>::new();
        assert_eq!(store.board(), Board::initial());
        assert_eq!(store.turn(), Side::White);
    }

    #[test]
    fn test_apply_move_updates_position() {
        let mut store = PositionStore::<RelayRules>::new();
        store
            .apply_move(&MovePayload::new(sq("e2"), sq("e4")))
            .unwrap();
        assert_eq!(store.board().get(sq("e2")), None);
        assert!(store.board().get(sq("e4")).is_some());
        assert_eq!(store.turn(), Side::Black);
    }

    #[test]
    fn test_failed_apply_leaves_position_untouched() {
        let mut store = PositionStore::<RelayRules>::new();
        let result = store.apply_move(&MovePayload::new(sq("e5"), sq("e6")));
        assert!(result.is_err());
        assert_eq!(store.board(), Board::initial());
        assert_eq!(store.turn(), Side::White);
    }

    #[test]
    fn test_reset_restores_initial_position() {
        let mut store = PositionStore::<RelayRules>::new();
        store
            .apply_move(&MovePayload::new(sq("d2"), sq("d4")))
            .unwrap();
        store.reset();
        assert_eq!(store.board(), Board::initial());
        assert_eq!(store.turn(), Side::White);
    }
}
