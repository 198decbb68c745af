//! # Netmate
//!
//! WebSocket board-game client framework.
//!
//! Netmate provides a server-authoritative client: the server referees
//! the game, and the client's job is to mirror confirmed state faithfully
//! and reactively. Frontends implement rendering and input; the framework
//! handles transport, decoding, the game session, and timing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netmate::prelude::*;
//!
//! # async fn run() -> Result<(), ClientError> {
//! let (client, mut view) = GameClient::connect::<RelayRules>(
//!     "ws://127.0.0.1:8080",
//!     ClientConfig::default(),
//! )
//! .await?;
//!
//! client.new_game()?;
//! while view.changed().await.is_ok() {
//!     let snapshot = view.borrow().clone();
//!     println!("{}", snapshot.game.board);
//!     if snapshot.game.game_over {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## The stack
//!
//! ```text
//! Frontend (yours)      ← renders ClientView, feeds taps into MovePicker
//!     ↕
//! netmate (this crate)  ← GameClient handle + driver task
//!     ↕
//! netmate-session       ← folds server events into renderable state
//!     ↕
//! netmate-board         ← positions and the relay rules
//!     ↕
//! netmate-protocol      ← wire types, JSON codec
//!     ↕
//! netmate-transport     ← WebSocket (or injected) connections
//! ```
//!
//! `netmate-alarm` sits beside the stack and wakes the driver when the
//! session's flash deadline passes.

mod client;
mod config;
mod driver;
mod error;
mod picker;

pub use client::GameClient;
pub use config::ClientConfig;
pub use driver::ClientView;
pub use error::ClientError;
pub use picker::MovePicker;

/// Everything a frontend typically needs, in one import.
pub mod prelude {
    pub use crate::{ClientConfig, ClientError, ClientView, GameClient, MovePicker};
    pub use netmate_board::{Board, Piece, PieceKind, RelayRules, Rules, Side};
    pub use netmate_protocol::{MovePayload, Promotion, Square};
    pub use netmate_session::{GamePhase, GameView, SessionConfig};
    pub use netmate_transport::{Connection, Connector, LinkState};
}
