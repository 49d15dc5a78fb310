//! # Application Error Types
//!
//! This module defines the error taxonomy used throughout the bot. Errors
//! are grouped by how they are handled: fatal and transient transport
//! errors belong to the polling supervisor, while send failures and
//! handler logic errors are caught at the dispatch boundary.

use std::fmt;

use teloxide::{ApiError, RequestError};

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum BotError {
    /// Configuration validation errors
    Config(String),
    /// The update stream was taken over elsewhere (duplicate consumer);
    /// the current fetch loop must stop before a restart is attempted
    TransportFatal(String),
    /// Network/timeout errors on the polling path
    TransportTransient(String),
    /// A single outbound message failed to deliver
    SendFailure(String),
    /// Unexpected handler errors (malformed update, logic bug)
    HandlerLogic(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            BotError::TransportFatal(msg) => write!(f, "[TRANSPORT_FATAL] {}", msg),
            BotError::TransportTransient(msg) => write!(f, "[TRANSPORT_TRANSIENT] {}", msg),
            BotError::SendFailure(msg) => write!(f, "[SEND_FAILURE] {}", msg),
            BotError::HandlerLogic(msg) => write!(f, "[HANDLER] {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        BotError::HandlerLogic(err.to_string())
    }
}

impl BotError {
    /// Whether this error must stop the current fetch loop before a restart
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::TransportFatal(_))
    }
}

/// Classify a polling-path transport error.
///
/// A 409 `TerminatedByOtherGetUpdates` means another consumer owns the
/// update stream; everything else on this path is treated as transient.
pub fn classify_polling_error(err: RequestError) -> BotError {
    match err {
        RequestError::Api(ApiError::TerminatedByOtherGetUpdates) => {
            BotError::TransportFatal(err.to_string())
        }
        other => BotError::TransportTransient(other.to_string()),
    }
}

/// Classify a send-path transport error. Every delivery failure is a
/// `SendFailure`; the polling supervisor never sees these.
pub fn classify_send_error(err: RequestError) -> BotError {
    BotError::SendFailure(err.to_string())
}

/// Result type alias for convenience
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let fatal = BotError::TransportFatal("conflict".to_string());
        assert_eq!(format!("{}", fatal), "[TRANSPORT_FATAL] conflict");
        assert!(fatal.is_fatal());

        let send = BotError::SendFailure("delivery failed".to_string());
        assert_eq!(format!("{}", send), "[SEND_FAILURE] delivery failed");
        assert!(!send.is_fatal());
    }
}
