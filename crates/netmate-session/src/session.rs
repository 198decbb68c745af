//! The game session: the client's record of one game against the server.
//!
//! This is the central piece of the client. It's responsible for:
//! - Applying confirmed moves to the local position
//! - Tracking where the game is in its lifecycle
//! - Keeping the status line the player sees
//! - Raising and clearing the invalid-move flash
//!
//! # Concurrency note
//!
//! `GameSession` is NOT thread-safe by itself, and doesn't need to be:
//! it is owned by a single task (the client driver) which applies events
//! in arrival order and publishes snapshots through a watch channel.
//! Keeping the session synchronous means the whole transition table can
//! be tested without a runtime.

use std::fmt;
use std::time::{Duration, Instant};

use netmate_board::{PositionStore, Rules};
use netmate_protocol::ServerEvent;
use tracing::{debug, info, warn};

use crate::GameView;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// Controls the timing of transient display effects. Frontends can
/// customize these when setting up the client. Sensible defaults are
/// provided.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the invalid-move flash stays up after the server rejects
    /// a move.
    ///
    /// Default: 3 seconds. Each rejection restarts the window from the
    /// instant it arrived.
    pub invalid_move_flash: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            invalid_move_flash: Duration::from_secs(3),
        }
    }
}

// ---------------------------------------------------------------------------
// GamePhase
// ---------------------------------------------------------------------------

/// Where the session is in the game lifecycle.
///
/// This is a state machine with three phases:
///
/// ```text
///   Idle ──(init_game)──→ InGame ──(game_over)──→ Over
///                            ↑                      │
///                            └─────(init_game)──────┘
/// ```
///
/// `init_game` is the one event accepted in *every* phase, including
/// mid-game: the server restarting a game is a full reset of position,
/// counters, and status. The other events only mean something while a
/// game is actually running, so outside `InGame` they are logged and
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Connected (or connecting), waiting for the server to start a game.
    Idle,

    /// A game is running. Move, rejection, and game-over events are
    /// meaningful here.
    InGame,

    /// The game finished. The final position stays up for review until
    /// the next `init_game`.
    Over,
}

impl GamePhase {
    /// Whether a game is currently running.
    pub fn is_in_game(&self) -> bool {
        matches!(self, GamePhase::InGame)
    }

    /// Whether the game has finished.
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Over)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GamePhase::Idle => "idle",
            GamePhase::InGame => "in-game",
            GamePhase::Over => "over",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// The client-side state machine for one game.
///
/// ## Data flow
///
/// ```text
///   apply(event, now) ──→ transition table ──→ fields updated
///   tick_flash(now)   ──→ clears the flash once its deadline passes
///   view()            ──→ GameView snapshot for rendering
/// ```
///
/// The session never reads the clock; callers pass `now` in. The driver
/// layer above owns the actual timer: it arms an alarm for
/// [`flash_deadline`](GameSession::flash_deadline) and calls
/// [`tick_flash`](GameSession::tick_flash) when it fires. That split
/// keeps every transition replayable, with no sleeping in tests.
pub struct GameSession<R: Rules> {
    /// The confirmed position. Only `init_game` (reset) and `move`
    /// (apply) ever change it.
    store: PositionStore<R>,

    /// Lifecycle phase; gates which events are meaningful.
    phase: GamePhase,

    /// Confirmed moves applied since the last `init_game`.
    move_count: u32,

    /// The status line shown to the player. Starts empty; frontends
    /// substitute a placeholder until the first event arrives.
    status: String,

    /// When the invalid-move flash should clear, if one is showing.
    ///
    /// Stored as an absolute deadline rather than a flag so that a
    /// rejection arriving mid-flash restarts the window: the new
    /// deadline simply replaces the old one, and a stale timer firing
    /// for the old deadline finds it hasn't been reached and does
    /// nothing.
    flash_until: Option<Instant>,

    /// Timing configuration.
    config: SessionConfig,
}

impl<R: Rules> GameSession<R> {
    /// Creates a session in the [`Idle`](GamePhase::Idle) phase with the
    /// initial position on the board.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: PositionStore::new(),
            phase: GamePhase::Idle,
            move_count: 0,
            status: String::new(),
            flash_until: None,
            config,
        }
    }

    /// Applies one server event at instant `now`.
    ///
    /// This is the entire transition table. Events that don't apply in
    /// the current phase (and events of unknown type) are logged and
    /// dropped without touching any state; the server owns the rules,
    /// but the client still refuses to act on frames that contradict
    /// its own lifecycle.
    pub fn apply(&mut self, event: ServerEvent, now: Instant) {
        match event {
            // Accepted in every phase: the server (re)started a game,
            // so everything local resets.
            ServerEvent::InitGame => {
                let previous = self.phase;
                self.store.reset();
                self.phase = GamePhase::InGame;
                self.move_count = 0;
                self.status = "Game started! Make your move.".to_owned();
                self.flash_until = None;
                info!(from_phase = %previous, "game started");
            }

            ServerEvent::Move(mv) if self.phase.is_in_game() => {
                match self.store.apply_move(&mv) {
                    Ok(()) => {
                        self.move_count += 1;
                        self.status = format!(
                            "Move {}: {} to {}",
                            self.move_count, mv.from, mv.to
                        );
                        debug!(move_count = self.move_count, %mv, "move applied");
                    }
                    Err(e) => {
                        // The server confirmed a move the relay rules
                        // can't replay. The position is left as it was
                        // rather than guessed at.
                        self.status = "An error occurred!".to_owned();
                        warn!(error = %e, %mv, "confirmed move failed to apply");
                    }
                }
            }

            ServerEvent::InvalidMove if self.phase.is_in_game() => {
                // Restarts the window even if a flash is already up.
                self.flash_until = Some(now + self.config.invalid_move_flash);
                self.status = "Invalid move attempted!".to_owned();
                debug!("invalid move flagged");
            }

            ServerEvent::GameOver if self.phase.is_in_game() => {
                self.phase = GamePhase::Over;
                self.status = "Game Over!".to_owned();
                info!(move_count = self.move_count, "game over");
            }

            // Forward compatibility: an event type this client doesn't
            // know about yet. Logged and dropped.
            ServerEvent::Unknown { kind } => {
                warn!(kind = %kind, "ignoring unknown event");
            }

            // move / invalid_move / game_over outside an active game.
            // A well-behaved server never sends these; a late frame
            // after game over, for example, lands here and is dropped.
            other => {
                warn!(
                    event = other.kind(),
                    phase = %self.phase,
                    "ignoring event outside active game"
                );
            }
        }
    }

    /// Clears the invalid-move flash if its deadline has passed.
    ///
    /// Safe to call on any timer wakeup: a stale wakeup (armed for a
    /// window that has since been restarted) finds the deadline still in
    /// the future and leaves the flash alone.
    pub fn tick_flash(&mut self, now: Instant) {
        if let Some(deadline) = self.flash_until {
            if deadline <= now {
                self.flash_until = None;
                debug!("invalid move flash cleared");
            }
        }
    }

    /// Records that an incoming frame couldn't be decoded.
    ///
    /// Only the status line changes. The board, phase, and counters are
    /// built from frames that *did* decode, and one garbled frame says
    /// nothing about them.
    pub fn note_decode_error(&mut self) {
        self.status = "An error occurred!".to_owned();
    }

    /// When the invalid-move flash should clear, if one is showing.
    ///
    /// The driver mirrors this into its alarm after every event.
    pub fn flash_deadline(&self) -> Option<Instant> {
        self.flash_until
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Confirmed moves applied since the last `init_game`.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// The current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Takes a renderable snapshot of the session.
    pub fn view(&self) -> GameView {
        GameView {
            board: self.store.board(),
            turn: self.store.turn(),
            status: self.status.clone(),
            move_count: self.move_count,
            invalid_move: self.flash_until.is_some(),
            game_over: self.phase.is_over(),
        }
    }
}

impl<R: Rules> Default for GameSession<R> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// =========================================================================
// Tests
// =========================================================================
