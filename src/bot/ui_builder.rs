//! UI Builder module for creating the main menu keyboard

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};
use url::Url;

use crate::update::MenuAction;

use super::texts;

/// Create the main menu keyboard.
///
/// Deterministic: the same web-app URL always produces the same layout.
/// Four rows: the web-app launch link, guide/leaderboard,
/// settings/support, tips.
pub fn create_main_keyboard(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::web_app(
            texts::BTN_PLAY,
            WebAppInfo {
                url: webapp_url.clone(),
            },
        )],
        vec![
            InlineKeyboardButton::callback(texts::BTN_GUIDE, MenuAction::Guide.callback_data()),
            InlineKeyboardButton::callback(
                texts::BTN_LEADERBOARD,
                MenuAction::Leaderboard.callback_data(),
            ),
        ],
        vec![
            InlineKeyboardButton::callback(
                texts::BTN_SETTINGS,
                MenuAction::Settings.callback_data(),
            ),
            InlineKeyboardButton::callback(texts::BTN_SUPPORT, MenuAction::Support.callback_data()),
        ],
        vec![InlineKeyboardButton::callback(
            texts::BTN_TIPS,
            MenuAction::Tips.callback_data(),
        )],
    ])
}
