//! Unified error type for the Netmate client.

use netmate_protocol::ProtocolError;
use netmate_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `netmate` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The driver task has exited, so no more commands can be sent.
    ///
    /// Happens after [`shutdown`](crate::GameClient::shutdown), or after
    /// the server closed the connection. The last published
    /// [`ClientView`](crate::ClientView) still holds the final game
    /// state.
    #[error("client driver has shut down")]
    Closed,

    /// The driver did not confirm a clean shutdown in time and was
    /// aborted instead.
    #[error("shutdown timed out; driver task aborted")]
    ShutdownTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectFailed(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Transport(_)));
        assert!(client_err.to_string().contains("refused"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Protocol(_)));
    }

    #[test]
    fn test_closed_display() {
        assert_eq!(
            ClientError::Closed.to_string(),
            "client driver has shut down"
        );
    }
}
