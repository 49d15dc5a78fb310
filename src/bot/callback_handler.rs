//! Callback Handler module for processing inline keyboard callback queries

use teloxide::types::ChatId;
use tracing::{debug, warn};

use crate::errors::BotResult;
use crate::transport::Transport;
use crate::update::MenuAction;

use super::texts;

/// The canned reply for a menu action
pub fn reply_text(action: MenuAction) -> &'static str {
    match action {
        MenuAction::Support => texts::SUPPORT,
        MenuAction::Guide => texts::GUIDE,
        MenuAction::Leaderboard => texts::LEADERBOARD,
        MenuAction::Settings => texts::SETTINGS,
        MenuAction::Tips => texts::TIPS,
    }
}

/// Handle a callback query from the inline keyboard.
///
/// The query is acknowledged first, exactly once, before the action is
/// even parsed, so the client UI never hangs on a loading state whatever
/// happens to the content reply. Unrecognized actions produce no reply.
pub async fn handle_callback_query<T: Transport>(
    transport: &T,
    chat: ChatId,
    callback_id: &str,
    action: &str,
) -> BotResult<()> {
    if let Err(e) = transport.acknowledge_callback(callback_id).await {
        warn!(user_id = %chat, error = %e, "Failed to acknowledge callback query");
    }

    let Some(menu_action) = MenuAction::parse(action) else {
        debug!(user_id = %chat, action = %action, "Ignoring unrecognized callback action");
        return Ok(());
    };

    debug!(user_id = %chat, action = ?menu_action, "Handling menu action");

    match transport
        .send_message(chat, reply_text(menu_action), None)
        .await
    {
        Ok(()) => Ok(()),
        Err(e) => {
            // Best-effort notice to the user; its own failure is swallowed
            if let Err(notice_err) = transport
                .send_message(chat, texts::SEND_ERROR_APOLOGY, None)
                .await
            {
                warn!(user_id = %chat, error = %notice_err, "Failed to send error notice");
            }
            Err(e)
        }
    }
}
