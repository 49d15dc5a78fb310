//! Router module: one dispatch function over the typed update model
//!
//! Both ingress paths (long polling and webhook) hand classified updates
//! to [`Router::dispatch`], so handler selection and the error boundary
//! live in exactly one place.

use std::sync::Arc;

use tracing::{debug, error};
use url::Url;

use crate::transport::Transport;
use crate::update::InboundUpdate;

use super::callback_handler::handle_callback_query;
use super::command_handlers::{handle_fallback_message, handle_start_command};

/// The only recognized command token
pub const ENTRY_COMMAND: &str = "/start";

/// Routes each inbound update to exactly one handler.
///
/// The transport is an injected dependency; the router holds no other
/// state beyond the configured web-app URL.
pub struct Router<T: Transport> {
    transport: Arc<T>,
    webapp_url: Url,
}

impl<T: Transport> Router<T> {
    pub fn new(transport: Arc<T>, webapp_url: Url) -> Self {
        Self {
            transport,
            webapp_url,
        }
    }

    /// Dispatch one update.
    ///
    /// The command check strictly precedes the plain-message fallback, so
    /// command-shaped text never reaches the generic prompt. Handler
    /// failures are logged at this boundary and never propagate; dispatch
    /// itself cannot fail the process.
    pub async fn dispatch(&self, update: InboundUpdate) {
        let chat = update.chat();

        let result = match update {
            InboundUpdate::Command { chat, command } => {
                if command == ENTRY_COMMAND {
                    handle_start_command(self.transport.as_ref(), chat, &self.webapp_url).await
                } else {
                    // Unknown commands are dropped, not answered with the
                    // fallback prompt
                    debug!(user_id = %chat, command = %command, "Ignoring unrecognized command");
                    Ok(())
                }
            }
            InboundUpdate::PlainMessage { chat, .. } => {
                handle_fallback_message(self.transport.as_ref(), chat, &self.webapp_url).await
            }
            InboundUpdate::CallbackQuery {
                chat,
                callback_id,
                action,
            } => {
                handle_callback_query(self.transport.as_ref(), chat, &callback_id, &action).await
            }
        };

        if let Err(e) = result {
            error!(user_id = %chat, error = %e, "Update handler failed");
        }
    }
}
