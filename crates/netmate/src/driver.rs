//! The driver task: one connection, one session, one event loop.
//!
//! Each client spawns exactly one driver. The flow is:
//!   1. Receive server frames → decode → apply to the session
//!   2. Receive pre-encoded command frames from the handle → send
//!   3. Fire the flash alarm → tick the session
//!   4. After every change, publish a fresh [`ClientView`] snapshot
//!
//! The driver is the only place where time is read. Every `now` handed
//! to the session comes from `tokio::time::Instant`, so under
//! `start_paused` tests the session's flash deadlines and the alarm
//! agree on a single virtual clock.

use netmate_alarm::Alarm;
use netmate_board::Rules;
use netmate_protocol::{Codec, Envelope, JsonCodec, ServerEvent};
use netmate_session::{GameSession, GameView};
use netmate_transport::{Connection, LinkState};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// The full client snapshot published to frontends.
///
/// Pairs the connection lifecycle with the game state, because the
/// presentation layer needs both: a pristine board over a dead link
/// renders very differently from the same board mid-game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientView {
    /// Where the server link is in its lifecycle.
    pub link: LinkState,

    /// The game as the session currently sees it.
    pub game: GameView,
}

/// The driver's half of the client: owns the connection and the session,
/// runs the event loop until the link dies.
pub(crate) struct Driver<C: Connection, R: Rules> {
    pub(crate) conn: C,
    pub(crate) codec: JsonCodec,
    pub(crate) session: GameSession<R>,
    pub(crate) alarm: Alarm,
    pub(crate) link: LinkState,

    /// Pre-encoded frames from the handle, to put on the wire.
    pub(crate) frame_rx: mpsc::UnboundedReceiver<String>,

    /// Shutdown request carrying a confirmation channel.
    pub(crate) shutdown_rx: oneshot::Receiver<oneshot::Sender<()>>,

    /// Snapshot publication; frontends hold the receiving half.
    pub(crate) view_tx: watch::Sender<ClientView>,
}

impl<C: Connection, R: Rules> Driver<C, R> {
    /// Runs the event loop until the connection ends.
    ///
    /// Exits when the server closes, the transport fails, the handle
    /// requests shutdown, or every handle is dropped. Whichever way it
    /// ends, the connection is closed at most once and the final view
    /// published before the task returns.
    pub(crate) async fn run(mut self) {
        debug!(conn = %self.conn.id(), "driver started");

        loop {
            tokio::select! {
                frame = self.frame_rx.recv() => match frame {
                    Some(text) => {
                        if let Err(e) = self.conn.send(&text).await {
                            warn!(error = %e, "send failed, closing connection");
                            self.close().await;
                            break;
                        }
                    }
                    None => {
                        debug!("all client handles dropped, closing connection");
                        self.close().await;
                        break;
                    }
                },

                reply = &mut self.shutdown_rx => {
                    info!("client shutdown requested");
                    self.close().await;
                    if let Ok(confirm) = reply {
                        // The handle is waiting on this; a dropped
                        // receiver just means it stopped caring.
                        let _ = confirm.send(());
                    }
                    break;
                }

                frame = self.conn.recv() => match frame {
                    Ok(Some(text)) => self.handle_frame(&text),
                    Ok(None) => {
                        info!(conn = %self.conn.id(), "server closed the connection");
                        self.mark_closed();
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "transport error, connection lost");
                        self.mark_closed();
                        break;
                    }
                },

                _ = self.alarm.fired() => {
                    self.session.tick_flash(Instant::now().into_std());
                    self.publish();
                }
            }
        }

        debug!("driver exited");
    }

    /// Decodes one inbound frame and applies it to the session.
    ///
    /// Decode failures don't kill the connection: the session notes the
    /// error in its status line and the loop keeps going, because one
    /// garbled frame says nothing about the frames after it.
    fn handle_frame(&mut self, text: &str) {
        let now = Instant::now();
        match self
            .codec
            .decode::<Envelope>(text)
            .and_then(ServerEvent::from_envelope)
        {
            Ok(event) => self.session.apply(event, now.into_std()),
            Err(e) => {
                warn!(error = %e, "undecodable frame from server");
                self.session.note_decode_error();
            }
        }
        self.sync_alarm();
        self.publish();
    }

    /// Mirrors the session's flash deadline into the alarm.
    ///
    /// Called after every applied event, so the alarm always reflects
    /// the newest deadline (or none at all).
    fn sync_alarm(&mut self) {
        match self.session.flash_deadline() {
            Some(deadline) => self.alarm.arm(Instant::from_std(deadline)),
            None => self.alarm.cancel(),
        }
    }

    /// Closes the connection, at most once, and publishes the final view.
    async fn close(&mut self) {
        if self.link.is_closed() {
            return;
        }
        if let Err(e) = self.conn.close().await {
            debug!(error = %e, "close handshake failed");
        }
        self.mark_closed();
    }

    /// Marks the link closed without initiating a close handshake.
    ///
    /// Used when the peer already ended the connection; there is nothing
    /// left to close on our side.
    fn mark_closed(&mut self) {
        if !self.link.is_closed() {
            self.link = LinkState::Closed;
            self.publish();
        }
    }

    /// Publishes a fresh snapshot to every view receiver.
    fn publish(&self) {
        self.view_tx.send_replace(ClientView {
            link: self.link,
            game: self.session.view(),
        });
    }
}
