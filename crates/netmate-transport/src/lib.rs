//! Transport abstraction layer for Netmate.
//!
//! Provides the [`Connector`] and [`Connection`] traits that abstract over
//! how the client reaches the game server. The driver task owns exactly one
//! [`Connection`] for its whole life, which is why the methods take
//! `&mut self`: there is a single owner, no sharing, no locks.
//!
//! Tests inject their own `Connection` implementation to script the server
//! side deterministically; production uses [`WebSocketConnector`].
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket connector via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketConnector};

use std::fmt;
use std::future::Future;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Lifecycle of the client's single server link.
///
/// "No connection" is a first-class renderable state: the presentation
/// layer shows a connecting/disconnected placeholder for anything that
/// is not [`Open`](LinkState::Open).
///
/// ```text
/// Connecting ──→ Open ──→ Closed
///      │                    ▲
///      └────────────────────┘   (connect failed)
/// ```
///
/// There is no transition out of `Closed`: reconnection is out of scope,
/// callers construct a new client instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// The connection is being established; nothing can be sent yet.
    Connecting,
    /// The connection is open and frames flow in both directions.
    Open,
    /// The connection ended (clean close, transport error, or shutdown).
    Closed,
}

impl LinkState {
    /// Returns `true` if frames can currently be sent.
    pub fn is_open(&self) -> bool {
        matches!(self, LinkState::Open)
    }

    /// Returns `true` if the link is gone for good.
    pub fn is_closed(&self) -> bool {
        matches!(self, LinkState::Closed)
    }

    /// Returns whether moving from `self` to `next` is a valid lifecycle
    /// step.
    pub fn can_transition_to(&self, next: LinkState) -> bool {
        matches!(
            (self, next),
            (LinkState::Connecting, LinkState::Open)
                | (LinkState::Connecting, LinkState::Closed)
                | (LinkState::Open, LinkState::Closed)
        )
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkState::Connecting => "connecting",
            LinkState::Open => "open",
            LinkState::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// Establishes outbound connections to a server endpoint.
pub trait Connector: Send + Sync + 'static {
    /// The connection type produced by this connector.
    type Connection: Connection;
    /// The error type for connect operations.
    type Error: std::error::Error + Send + Sync;

    /// Opens a connection to the given URL.
    fn connect(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send;
}

/// A single connection carrying text frames.
///
/// The wire protocol is JSON text, so the transport deals in `String`s;
/// implementations map whatever framing they have onto that.
pub trait Connection: Send + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one text frame to the server.
    fn send(
        &mut self,
        text: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receives the next text frame from the server.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(
        &mut self,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Closes the connection.
    fn close(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_equality() {
        let a = ConnectionId::new(1);
        let b = ConnectionId::new(1);
        let c = ConnectionId::new(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_link_state_predicates() {
        assert!(!LinkState::Connecting.is_open());
        assert!(LinkState::Open.is_open());
        assert!(!LinkState::Closed.is_open());
        assert!(LinkState::Closed.is_closed());
        assert!(!LinkState::Open.is_closed());
    }

    #[test]
    fn test_link_state_valid_transitions() {
        assert!(LinkState::Connecting.can_transition_to(LinkState::Open));
        assert!(LinkState::Connecting.can_transition_to(LinkState::Closed));
        assert!(LinkState::Open.can_transition_to(LinkState::Closed));
    }

    #[test]
    fn test_link_state_invalid_transitions() {
        // Closed is terminal; a new client means a new link.
        assert!(!LinkState::Closed.can_transition_to(LinkState::Open));
        assert!(!LinkState::Closed.can_transition_to(LinkState::Connecting));
        assert!(!LinkState::Open.can_transition_to(LinkState::Connecting));
        assert!(!LinkState::Open.can_transition_to(LinkState::Open));
    }

    #[test]
    fn test_link_state_display() {
        assert_eq!(LinkState::Connecting.to_string(), "connecting");
        assert_eq!(LinkState::Open.to_string(), "open");
        assert_eq!(LinkState::Closed.to_string(), "closed");
    }
}
