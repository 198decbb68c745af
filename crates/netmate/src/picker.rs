//! Tap-to-move selection for frontends.

use netmate_protocol::{MovePayload, Square};

/// Turns a stream of square taps into move proposals.
///
/// Frontends feed every tap into [`select`](MovePicker::select):
/// the first tap anchors the origin square, the second one names the
/// destination and yields a [`MovePayload`] to pass to
/// [`propose_move`](crate::GameClient::propose_move). Tapping the
/// anchored square again clears the selection instead of proposing a
/// null move.
///
/// The picker doesn't know the rules and doesn't look at the board; it
/// happily anchors an empty square or emits an illegal move. That's the
/// point: the server is the referee, and a bad proposal just comes back
/// as a rejection.
#[derive(Debug, Default)]
pub struct MovePicker {
    from: Option<Square>,
}

impl MovePicker {
    /// Creates a picker with nothing selected.
    pub fn new() -> Self {
        Self { from: None }
    }

    /// Feeds one square tap into the picker.
    ///
    /// Returns `Some(payload)` when this tap completed a move proposal.
    pub fn select(&mut self, square: Square) -> Option<MovePayload> {
        match self.from {
            None => {
                self.from = Some(square);
                None
            }
            Some(from) if from == square => {
                self.from = None;
                None
            }
            Some(from) => {
                self.from = None;
                Some(MovePayload::new(from, square))
            }
        }
    }

    /// The currently anchored origin square, if any.
    ///
    /// Frontends use this to highlight the selected square.
    pub fn pending(&self) -> Option<Square> {
        self.from
    }

    /// Drops any pending selection.
    ///
    /// Call this when the game restarts or ends mid-selection.
    pub fn clear(&mut self) {
        self.from = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_first_tap_anchors_square() {
        let mut picker = MovePicker::new();

        assert_eq!(picker.select(sq("e2")), None);
        assert_eq!(picker.pending(), Some(sq("e2")));
    }

    #[test]
    fn test_second_tap_emits_move() {
        let mut picker = MovePicker::new();
        picker.select(sq("e2"));

        let mv = picker.select(sq("e4")).expect("should emit a move");

        assert_eq!(mv, MovePayload::new(sq("e2"), sq("e4")));
        assert_eq!(picker.pending(), None, "emitting clears the anchor");
    }

    #[test]
    fn test_same_square_deselects() {
        let mut picker = MovePicker::new();
        picker.select(sq("e2"));

        assert_eq!(picker.select(sq("e2")), None);
        assert_eq!(picker.pending(), None);
    }

    #[test]
    fn test_clear_drops_pending_selection() {
        let mut picker = MovePicker::new();
        picker.select(sq("g1"));

        picker.clear();

        assert_eq!(picker.pending(), None);
        // The next tap anchors again rather than emitting.
        assert_eq!(picker.select(sq("f3")), None);
    }

    #[test]
    fn test_consecutive_moves() {
        let mut picker = MovePicker::new();

        picker.select(sq("e2"));
        let first = picker.select(sq("e4")).unwrap();
        picker.select(sq("d2"));
        let second = picker.select(sq("d4")).unwrap();

        assert_eq!(first, MovePayload::new(sq("e2"), sq("e4")));
        assert_eq!(second, MovePayload::new(sq("d2"), sq("d4")));
    }
}
