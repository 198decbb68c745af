//! Client configuration.

use std::time::Duration;

use netmate_session::SessionConfig;

/// Configuration for a [`GameClient`](crate::GameClient).
///
/// Covers both the session's display timing and the client's own
/// lifecycle knobs. Start from `ClientConfig::default()` and override
/// the fields you care about:
///
/// ```rust
/// use std::time::Duration;
/// use netmate::ClientConfig;
///
/// let config = ClientConfig {
///     shutdown_timeout: Duration::from_secs(1),
///     ..ClientConfig::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Session timing (how long the invalid-move flash stays up, etc.).
    pub session: SessionConfig,

    /// How long [`shutdown`](crate::GameClient::shutdown) waits for the
    /// driver to close the connection before aborting it.
    ///
    /// Default: 5 seconds.
    pub shutdown_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(cfg.session.invalid_move_flash, Duration::from_secs(3));
    }
}
