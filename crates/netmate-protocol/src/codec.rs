//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A "codec" (coder/decoder) converts between Rust types and wire
//! frames. The rest of the client doesn't care HOW messages are
//! serialized — it just needs something that implements the [`Codec`]
//! trait, so the format can be swapped without touching the driver.
//!
//! The wire contract is JSON *text* frames, so the codec works in
//! `String`s rather than byte buffers: what `encode` returns is exactly
//! what goes into a WebSocket text frame.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to text frames and decode frames
/// back.
///
/// The methods are generic — they work with any type `T` that
/// implements the right serde trait. `DeserializeOwned` (rather than
/// plain `Deserialize`) means the result doesn't borrow from the input
/// frame, so the frame buffer can be dropped after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a text frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a text frame back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the frame is malformed,
    /// incomplete, or doesn't match the expected type.
    fn decode<T: DeserializeOwned>(&self, frame: &str)
    -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is the format the game server actually speaks. It is behind the
/// `json` feature flag (enabled by default) so the type definitions can
/// be used without pulling in `serde_json`.
///
/// ## Example
///
/// ```rust
/// use netmate_protocol::{ClientCommand, Codec, Envelope, JsonCodec, ServerEvent};
///
/// let codec = JsonCodec;
///
/// // Outbound: strict encoding.
/// let frame = codec.encode(&ClientCommand::InitGame).unwrap();
/// assert_eq!(frame, r#"{"type":"init_game"}"#);
///
/// // Inbound: envelope first, then interpretation.
/// let envelope: Envelope = codec.decode(r#"{"type":"game_over"}"#).unwrap();
/// let event = ServerEvent::from_envelope(envelope).unwrap();
/// assert_eq!(event, ServerEvent::GameOver);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        frame: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Decode)
    }
}
