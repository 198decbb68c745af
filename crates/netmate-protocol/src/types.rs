//! Core protocol types for Netmate's wire format.
//!
//! This module defines every shape that travels "on the wire" — the
//! structures that get serialized to JSON text frames, sent over the
//! WebSocket, and deserialized on the other side.
//!
//! The protocol is tiny on purpose. Four message types cover the whole
//! game: `init_game`, `move`, `invalid_move`, `game_over`. Everything
//! else (whose turn it is, whether a move was legal) is derived from the
//! order in which the server sends them.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Squares
// ---------------------------------------------------------------------------

/// A board square in algebraic notation: `"a1"` through `"h8"`.
///
/// On the wire a square is a plain two-character string, which is what
/// the `#[serde(try_from = "String", into = "String")]` attributes
/// arrange: `Square` serializes as `"e4"`, not as
/// `{ "file": 4, "rank": 3 }`. Parsing goes through [`FromStr`], so a
/// malformed square is a decode error, never a half-valid value.
///
/// Internally the square is a zero-based `(file, rank)` pair so board
/// indexing needs no re-parsing. The fields are private: every `Square`
/// in existence is in range, which is what lets the board layer index
/// its arrays without bounds checks of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from zero-based file (0 = a) and rank (0 = 1)
    /// indices. Returns `None` if either is out of range.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Zero-based file index: 0 = a .. 7 = h.
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index: 0 = rank 1 .. 7 = rank 8.
    pub fn rank(&self) -> u8 {
        self.rank
    }
}

impl FromStr for Square {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ProtocolError::InvalidMessage(format!(
                "bad square {s:?}: expected two characters like \"e4\""
            )));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| {
            ProtocolError::InvalidMessage(format!(
                "bad square {s:?}: expected \"a1\" through \"h8\""
            ))
        })
    }
}

impl TryFrom<String> for Square {
    type Error = ProtocolError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// The piece a pawn becomes on reaching the last rank.
///
/// Single lowercase letters on the wire (`"q"`, `"r"`, `"b"`, `"n"`),
/// matching the notation the server's rules engine expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Promotion {
    #[serde(rename = "q")]
    Queen,
    #[serde(rename = "r")]
    Rook,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "n")]
    Knight,
}

impl Promotion {
    /// Parses the single-letter notation. Returns `None` for anything
    /// that isn't `q`, `r`, `b`, or `n`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }

    /// The single-letter wire notation.
    pub fn letter(&self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }
}

/// The payload of a `move` message, in both directions.
///
/// Outbound it is a *move intent*: a proposal the server may still
/// reject. Inbound it is a *confirmed move* the session applies to the
/// local board. Same shape, very different authority — the field names
/// (`from`, `to`, `promotion`) are fixed by the server's rules engine.
///
/// `promotion` is omitted from the JSON entirely when absent
/// (`skip_serializing_if`), because the server treats a `null` promotion
/// differently from a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

impl MovePayload {
    /// A plain move with no promotion.
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Attaches a promotion piece to this move.
    pub fn promoting(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }
}

/// Compact coordinate form for logs: `e2e4`, or `e7e8q` with promotion.
impl fmt::Display for MovePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.letter())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Outbound: ClientCommand
// ---------------------------------------------------------------------------

/// A message from this client to the server.
///
/// `#[serde(tag = "type", content = "payload")]` produces the envelope
/// format the server expects:
///
/// - `ClientCommand::InitGame` → `{"type":"init_game"}` (no payload key
///   at all for unit variants)
/// - `ClientCommand::Move(..)` →
///   `{"type":"move","payload":{"from":"e2","to":"e4"}}`
///
/// Outbound encoding is strict: there is no lenient path here, the
/// client must produce exactly these shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Ask the server to start (or restart) a game.
    InitGame,
    /// Propose a move. The local board is not touched until the server
    /// confirms it back.
    Move(MovePayload),
}

// ---------------------------------------------------------------------------
// Inbound: Envelope and ServerEvent
// ---------------------------------------------------------------------------

/// The raw shape of any inbound frame: `{type, payload?}`.
///
/// Inbound decoding is two-stage on purpose. Stage one (this type) only
/// commits to "every frame has a string `type` and maybe a `payload`".
/// Stage two ([`ServerEvent::from_envelope`]) interprets the `type`. The
/// split is what distinguishes two very different failure modes:
///
/// - a frame that isn't even a `{type, ...}` object is a *decode error*
///   (the session shows an error status);
/// - a well-formed frame with an unrecognized `type` is merely
///   *unknown* (logged and ignored, forward compatible).
///
/// A single-stage tagged enum would collapse both into a decode error
/// and break the second guarantee.
#[cfg(feature = "json")]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// The message type tag: `"init_game"`, `"move"`, ...
    #[serde(rename = "type")]
    pub kind: String,

    /// The message body, if any. Left as raw JSON here; stage two
    /// decodes it only for types whose payload matters.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// A message from the server, fully interpreted.
///
/// This is what the session state machine consumes. `invalid_move` and
/// `game_over` may carry a payload on the wire (rejection detail, game
/// result); the session has no use for it, so stage two drops it rather
/// than failing on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A new game has started.
    InitGame,
    /// The server confirmed this move; apply it to the local board.
    Move(MovePayload),
    /// The last proposed move was rejected.
    InvalidMove,
    /// The game has ended.
    GameOver,
    /// A well-formed frame with a `type` this client doesn't know.
    Unknown { kind: String },
}

impl ServerEvent {
    /// The wire-level type tag, mostly for logging.
    pub fn kind(&self) -> &str {
        match self {
            ServerEvent::InitGame => "init_game",
            ServerEvent::Move(_) => "move",
            ServerEvent::InvalidMove => "invalid_move",
            ServerEvent::GameOver => "game_over",
            ServerEvent::Unknown { kind } => kind,
        }
    }

    /// Stage two of inbound decoding: interprets a raw [`Envelope`].
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidMessage`] for a `move` frame with
    /// no payload, and [`ProtocolError::Decode`] for a `move` payload of
    /// the wrong shape. Unknown types are *not* errors.
    #[cfg(feature = "json")]
    pub fn from_envelope(envelope: Envelope) -> Result<Self, ProtocolError> {
        let Envelope { kind, payload } = envelope;
        match kind.as_str() {
            "init_game" => Ok(ServerEvent::InitGame),
            "move" => {
                let value = payload.ok_or_else(|| {
                    ProtocolError::InvalidMessage(
                        "move message without payload".into(),
                    )
                })?;
                let mv: MovePayload = serde_json::from_value(value)
                    .map_err(ProtocolError::Decode)?;
                Ok(ServerEvent::Move(mv))
            }
            "invalid_move" => Ok(ServerEvent::InvalidMove),
            "game_over" => Ok(ServerEvent::GameOver),
            _ => Ok(ServerEvent::Unknown { kind }),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
