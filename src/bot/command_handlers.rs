//! Command Handlers module for the entry command and the text fallback

use teloxide::types::ChatId;
use tracing::debug;
use url::Url;

use crate::errors::BotResult;
use crate::transport::Transport;

use super::texts;
use super::ui_builder::create_main_keyboard;

/// Handle the /start command: greeting plus the main menu keyboard
pub async fn handle_start_command<T: Transport>(
    transport: &T,
    chat: ChatId,
    webapp_url: &Url,
) -> BotResult<()> {
    debug!(user_id = %chat, "Handling /start command");

    transport
        .send_message(chat, texts::WELCOME, Some(create_main_keyboard(webapp_url)))
        .await
}

/// Handle any non-command message: generic prompt plus the keyboard
pub async fn handle_fallback_message<T: Transport>(
    transport: &T,
    chat: ChatId,
    webapp_url: &Url,
) -> BotResult<()> {
    debug!(user_id = %chat, "Handling plain message with menu prompt");

    transport
        .send_message(
            chat,
            texts::MENU_PROMPT,
            Some(create_main_keyboard(webapp_url)),
        )
        .await
}
