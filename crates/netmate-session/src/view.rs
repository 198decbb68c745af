//! The render snapshot: everything a frontend needs to draw one frame.

use netmate_board::{Board, Side};

/// An immutable snapshot of the session, taken with
/// [`GameSession::view`](crate::GameSession::view).
///
/// The session hands out snapshots rather than references into itself,
/// so a frontend can hold a view across frames (or diff two of them)
/// while the session keeps absorbing events. Two views taken after the
/// same event sequence compare equal, which is what the determinism
/// tests assert on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    /// The confirmed position.
    pub board: Board,

    /// Whose turn it is in that position.
    pub turn: Side,

    /// The status line to show the player.
    ///
    /// Empty until the first event arrives; frontends substitute their
    /// own placeholder text for the empty string.
    pub status: String,

    /// Confirmed moves applied since the last `init_game`.
    pub move_count: u32,

    /// `true` while the invalid-move flash is showing.
    pub invalid_move: bool,

    /// `true` once the server has declared the game over.
    pub game_over: bool,
}
