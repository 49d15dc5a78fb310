//! # Transport Adapter
//!
//! Minimal seams over the platform client: [`Transport`] for outbound
//! sends and callback acknowledgments, [`UpdateSource`] for one long-poll
//! cycle. The router and the polling supervisor consume these traits, so
//! tests can substitute recording doubles and the teloxide client stays
//! confined to this module.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, CallbackQueryId, InlineKeyboardMarkup};
use tracing::warn;

use crate::errors::{classify_polling_error, classify_send_error, BotResult};
use crate::update::{classify_update, InboundUpdate};

/// Outbound send primitives consumed by the router
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one message, optionally with an inline keyboard
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> BotResult<()>;

    /// Acknowledge a callback query so the client UI stops showing a
    /// loading state
    async fn acknowledge_callback(&self, callback_id: &str) -> BotResult<()>;
}

/// One long-poll cycle against the platform
#[async_trait]
pub trait UpdateSource: Send {
    /// Fetch the next batch of updates, blocking up to the configured
    /// wait timeout
    async fn poll_once(&mut self) -> BotResult<Vec<InboundUpdate>>;
}

/// Teloxide-backed transport
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> BotResult<()> {
        let mut request = self.bot.send_message(chat, text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await.map_err(classify_send_error)?;
        Ok(())
    }

    async fn acknowledge_callback(&self, callback_id: &str) -> BotResult<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_owned()))
            .await
            .map_err(classify_send_error)?;
        Ok(())
    }
}

/// Teloxide-backed update source with offset tracking.
///
/// Each fetched batch advances the offset past the last seen update id so
/// the platform drops acknowledged updates on the next cycle.
pub struct TelegramUpdateSource {
    bot: Bot,
    offset: Option<i32>,
    request_timeout_secs: u32,
}

impl TelegramUpdateSource {
    pub fn new(bot: Bot, request_timeout_secs: u32) -> Self {
        Self {
            bot,
            offset: None,
            request_timeout_secs,
        }
    }
}

#[async_trait]
impl UpdateSource for TelegramUpdateSource {
    async fn poll_once(&mut self) -> BotResult<Vec<InboundUpdate>> {
        let mut request = self
            .bot
            .get_updates()
            .timeout(self.request_timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery]);
        if let Some(offset) = self.offset {
            request = request.offset(offset);
        }

        let updates = request.await.map_err(classify_polling_error)?;

        if let Some(last) = updates.last() {
            match next_offset(last.id.0) {
                Some(offset) => self.offset = Some(offset),
                None => {
                    warn!(update_id = last.id.0, "Update id out of offset range");
                }
            }
        }

        Ok(updates.into_iter().filter_map(classify_update).collect())
    }
}

/// Offset acknowledging everything up to and including `update_id`.
/// Returns `None` when the id does not fit the platform's signed offset.
fn next_offset(update_id: u32) -> Option<i32> {
    i32::try_from(update_id)
        .ok()
        .map(|id| id.saturating_add(1))
}
