//! Wire protocol for Netmate.
//!
//! This crate defines the "language" that the client and the game server
//! speak over one WebSocket:
//!
//! - **Types** ([`Square`], [`MovePayload`], [`ClientCommand`],
//!   [`ServerEvent`], [`Envelope`]) — the message structures that travel
//!   on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to/from text frames.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw text frames) and the
//! session (game state). It doesn't know about connections or boards —
//! it only knows how to serialize and deserialize messages.
//!
//! ```text
//! Transport (frames) → Protocol (events) → Session (game state)
//! ```
//!
//! # Strict out, lenient in
//!
//! The two directions are deliberately asymmetric. Outbound
//! [`ClientCommand`] is a strictly tagged enum: the client only ever
//! produces the exact shapes the server understands. Inbound frames go
//! through [`Envelope`] first and only then become a [`ServerEvent`], so
//! a message type this client has never heard of decodes successfully as
//! [`ServerEvent::Unknown`] instead of failing — the server may grow new
//! message types without breaking deployed clients.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
#[cfg(feature = "json")]
pub use types::Envelope;
pub use types::{ClientCommand, MovePayload, Promotion, ServerEvent, Square};
