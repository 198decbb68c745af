//! `GameClient`: the handle frontends hold.
//!
//! Splits the client in two halves connected by channels:
//!
//! ```text
//!   GameClient (handle)                Driver (spawned task)
//!   ───────────────────                ─────────────────────
//!   new_game / propose_move  ──mpsc──→ send frame on the wire
//!   shutdown                 ──oneshot→ close connection, confirm
//!                            ←─watch── ClientView snapshots
//! ```
//!
//! The handle encodes outbound commands itself, so callers get encode
//! errors back directly; the driver owns decoding, where errors fold
//! into the session's status instead.

use std::time::Duration;

use netmate_alarm::Alarm;
use netmate_board::Rules;
use netmate_protocol::{ClientCommand, Codec, JsonCodec, MovePayload};
use netmate_session::GameSession;
use netmate_transport::{Connection, Connector, LinkState, WebSocketConnector};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::driver::{ClientView, Driver};
use crate::{ClientConfig, ClientError};

/// A handle to a running game client.
///
/// Created by [`connect`](GameClient::connect) (real WebSocket) or
/// [`start`](GameClient::start) (any [`Connection`], which is how tests
/// script the server side). Both also return a watch receiver that
/// yields a fresh [`ClientView`] after every state change; rendering is
/// just `view.changed().await` in a loop.
///
/// Dropping the handle closes the connection in the background. Call
/// [`shutdown`](GameClient::shutdown) instead to wait for the close to
/// actually happen.
pub struct GameClient {
    frame_tx: mpsc::UnboundedSender<String>,
    shutdown_tx: Option<oneshot::Sender<oneshot::Sender<()>>>,
    shutdown_timeout: Duration,
    task: Option<JoinHandle<()>>,
    codec: JsonCodec,
}

impl GameClient {
    /// Connects to a game server over WebSocket and starts the driver.
    ///
    /// `R` picks the rules used to replay confirmed moves locally;
    /// [`RelayRules`](netmate_board::RelayRules) is the stock choice.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the connection cannot be
    /// established.
    pub async fn connect<R: Rules>(
        url: &str,
        config: ClientConfig,
    ) -> Result<(GameClient, watch::Receiver<ClientView>), ClientError> {
        let conn = WebSocketConnector.connect(url).await?;
        Ok(Self::start::<_, R>(conn, config))
    }

    /// Starts the driver over an already-established connection.
    ///
    /// This is the injection seam: anything implementing [`Connection`]
    /// works, so tests drive the client with a scripted fake while
    /// production hands in a [`WebSocketConnector`] connection.
    pub fn start<C, R>(
        conn: C,
        config: ClientConfig,
    ) -> (GameClient, watch::Receiver<ClientView>)
    where
        C: Connection,
        R: Rules,
    {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let session = GameSession::<R>::new(config.session);
        let (view_tx, view_rx) = watch::channel(ClientView {
            link: LinkState::Open,
            game: session.view(),
        });

        let driver = Driver {
            conn,
            codec: JsonCodec,
            session,
            alarm: Alarm::new(),
            link: LinkState::Open,
            frame_rx,
            shutdown_rx,
            view_tx,
        };
        let task = tokio::spawn(driver.run());

        let client = GameClient {
            frame_tx,
            shutdown_tx: Some(shutdown_tx),
            shutdown_timeout: config.shutdown_timeout,
            task: Some(task),
            codec: JsonCodec,
        };
        (client, view_rx)
    }

    /// Asks the server to start (or restart) a game.
    ///
    /// # Errors
    /// Returns [`ClientError::Closed`] if the driver has already exited.
    pub fn new_game(&self) -> Result<(), ClientError> {
        self.send_command(&ClientCommand::InitGame)
    }

    /// Proposes a move to the server.
    ///
    /// The local board is not touched: the move shows up in the view
    /// only once the server confirms it back (or as a flash if it
    /// rejects it).
    ///
    /// # Errors
    /// Returns [`ClientError::Closed`] if the driver has already exited.
    pub fn propose_move(&self, mv: MovePayload) -> Result<(), ClientError> {
        debug!(%mv, "proposing move");
        self.send_command(&ClientCommand::Move(mv))
    }

    /// Whether the driver has exited (link closed or shut down).
    pub fn is_closed(&self) -> bool {
        self.frame_tx.is_closed()
    }

    /// Closes the connection and waits for the driver to confirm.
    ///
    /// Idempotent: calling it again, or after the server already closed
    /// the link, returns `Ok` immediately.
    ///
    /// # Errors
    /// Returns [`ClientError::ShutdownTimeout`] if the driver does not
    /// confirm within
    /// [`shutdown_timeout`](crate::ClientConfig::shutdown_timeout); the
    /// driver task is aborted in that case.
    pub async fn shutdown(&mut self) -> Result<(), ClientError> {
        let Some(shutdown_tx) = self.shutdown_tx.take() else {
            return Ok(());
        };

        let (confirm_tx, confirm_rx) = oneshot::channel();
        if shutdown_tx.send(confirm_tx).is_err() {
            // Driver already exited (server closed first).
            return Ok(());
        }

        match tokio::time::timeout(self.shutdown_timeout, confirm_rx).await {
            // Confirmed, or the driver exited through another path
            // (which also means the connection is down).
            Ok(_) => Ok(()),
            Err(_) => {
                if let Some(task) = self.task.take() {
                    task.abort();
                }
                Err(ClientError::ShutdownTimeout)
            }
        }
    }

    fn send_command(&self, command: &ClientCommand) -> Result<(), ClientError> {
        let frame = self.codec.encode(command)?;
        self.frame_tx.send(frame).map_err(|_| ClientError::Closed)
    }
}
