use netmate_protocol::Square;

/// Errors that can occur when applying a move to a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The from-square of a confirmed move is empty.
    ///
    /// The server never confirms a move from an empty square, so this
    /// means the local board has desynchronized from the server's —
    /// the session surfaces it as an error status rather than applying
    /// a nonsense move.
    #[error("no piece at {0}")]
    NoPieceAt(Square),
}
