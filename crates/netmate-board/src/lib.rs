//! Chess position state for Netmate.
//!
//! This crate owns the client's picture of the game:
//!
//! 1. **Value types** ([`Board`], [`Piece`], [`Side`]) — what's on which
//!    square and whose turn it is.
//! 2. **The rules seam** ([`Rules`] trait) — how a confirmed move turns
//!    one position into the next, as a pure value transform.
//! 3. **The store** ([`PositionStore`]) — the single mutable position of
//!    the active game.
//!
//! # The client does not referee
//!
//! The bundled [`RelayRules`] implementation deliberately validates
//! nothing: the server is authoritative, and a move only reaches this
//! crate after the server confirmed it. What `RelayRules` does do is
//! *project* each confirmed move faithfully — captures, castling rook
//! hops, en passant removals, promotions — because the wire only carries
//! `from`/`to` and the board has to end up matching the server's.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← applies confirmed moves, reads board/turn
//!     ↕
//! Board Layer (this crate)  ← pure position transforms
//!     ↕
//! Protocol Layer (below)  ← provides Square, MovePayload
//! ```

mod board;
mod error;
mod rules;
mod store;

pub use board::{Board, Piece, PieceKind, Side};
pub use error::RulesError;
pub use rules::{RelayPosition, RelayRules, Rules};
pub use store::PositionStore;
