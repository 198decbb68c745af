//! Error types for the protocol layer.
//!
//! Each crate in Netmate defines its own error enum. This keeps errors
//! specific and meaningful — when you see a `ProtocolError`, you know the
//! problem is in serialization/deserialization, not in networking or
//! game state.

/// Errors that can occur in the protocol layer.
///
/// On the inbound path these are never fatal: the session downgrades a
/// decode failure to a visible error status and keeps accepting further
/// messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into a text frame).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a text frame into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, wrong
    /// data types, or truncated frames.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message is invalid at the protocol level.
    ///
    /// This is for logical errors that pass deserialization but violate
    /// protocol rules — e.g. a `move` frame with no payload, or a square
    /// outside `a1`..`h8`.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
