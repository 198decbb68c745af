//! Game session state for Netmate.
//!
//! This crate is the heart of the client: a pure, synchronous state
//! machine that folds server events into one renderable snapshot.
//!
//! 1. **Phase tracking** — where the game is in its lifecycle ([`GamePhase`])
//! 2. **Event application** — the transition table ([`GameSession::apply`])
//! 3. **Transient effects** — the invalid-move flash, recorded as an
//!    absolute deadline so the timer layer above knows when to clear it
//!
//! # How it fits in the stack
//!
//! ```text
//! Client Layer (above)  ← feeds connection and timer events into the session
//!     ↕
//! Session Layer (this crate)  ← folds events into renderable state
//!     ↕
//! Board / Protocol Layers (below)  ← provide positions and event types
//! ```
//!
//! Nothing in this crate is async, and nothing here reads the clock.
//! Every time-dependent method takes `now` as a parameter, so the same
//! event sequence at the same instants always produces the same
//! [`GameView`]. That property is what makes the driver's paused-time
//! tests (and bug reproductions from logs) deterministic.

mod session;
mod view;

pub use session::{GamePhase, GameSession, SessionConfig};
pub use view::GameView;
