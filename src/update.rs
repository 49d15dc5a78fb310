//! # Inbound Update Model
//!
//! A single typed view over the platform's update shapes. Every inbound
//! event is classified exactly once into an [`InboundUpdate`] variant and
//! consumed exactly once by the router, so the polling and webhook paths
//! share one dispatch function instead of independent per-event listeners.

use teloxide::types::{CallbackQuery, ChatId, MaybeInaccessibleMessage, Message, Update, UpdateKind};

/// One inbound event from the chat platform
#[derive(Debug, Clone, PartialEq)]
pub enum InboundUpdate {
    /// A slash-command message; `command` is the bare token with any
    /// `@botname` suffix stripped (e.g. "/start")
    Command { chat: ChatId, command: String },
    /// A non-command message (text may be empty for media-only messages)
    PlainMessage { chat: ChatId, text: String },
    /// A button press carrying a short opaque payload string
    CallbackQuery {
        chat: ChatId,
        callback_id: String,
        action: String,
    },
}

impl InboundUpdate {
    /// The conversation this update belongs to
    pub fn chat(&self) -> ChatId {
        match self {
            InboundUpdate::Command { chat, .. } => *chat,
            InboundUpdate::PlainMessage { chat, .. } => *chat,
            InboundUpdate::CallbackQuery { chat, .. } => *chat,
        }
    }
}

/// The fixed set of menu actions reachable from callback buttons.
///
/// The web-app launch is carried as a link on the keyboard itself and
/// never arrives as a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Support,
    Guide,
    Leaderboard,
    Settings,
    Tips,
}

impl MenuAction {
    /// Parse a callback payload into a menu action. Unrecognized payloads
    /// yield `None` and produce no reply.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "support" => Some(MenuAction::Support),
            "guide" => Some(MenuAction::Guide),
            "leaderboard" => Some(MenuAction::Leaderboard),
            "settings" => Some(MenuAction::Settings),
            "tips" => Some(MenuAction::Tips),
            _ => None,
        }
    }

    /// The callback payload string carried by this action's button
    pub fn callback_data(&self) -> &'static str {
        match self {
            MenuAction::Support => "support",
            MenuAction::Guide => "guide",
            MenuAction::Leaderboard => "leaderboard",
            MenuAction::Settings => "settings",
            MenuAction::Tips => "tips",
        }
    }
}

/// Classify a raw platform update into the typed model.
///
/// Update kinds the bot does not consume (edits, channel posts, etc.)
/// yield `None` and are dropped before dispatch.
pub fn classify_update(update: Update) -> Option<InboundUpdate> {
    match update.kind {
        UpdateKind::Message(msg) => Some(classify_message(msg)),
        UpdateKind::CallbackQuery(q) => Some(classify_callback(q)),
        _ => None,
    }
}

fn classify_message(msg: Message) -> InboundUpdate {
    let chat = msg.chat.id;

    match msg.text() {
        Some(text) if text.starts_with('/') => {
            let token = text.split_whitespace().next().unwrap_or(text);
            // Strip the @botname suffix used in group chats
            let command = token.split('@').next().unwrap_or(token).to_string();
            InboundUpdate::Command { chat, command }
        }
        Some(text) => InboundUpdate::PlainMessage {
            chat,
            text: text.to_string(),
        },
        // Media-only messages still get the menu prompt
        None => InboundUpdate::PlainMessage {
            chat,
            text: String::new(),
        },
    }
}

fn classify_callback(q: CallbackQuery) -> InboundUpdate {
    // Use the chat ID from the original message that contained the inline keyboard
    let chat = match &q.message {
        Some(msg) => match msg {
            MaybeInaccessibleMessage::Regular(msg) => msg.chat.id,
            MaybeInaccessibleMessage::Inaccessible(_) => ChatId::from(q.from.id),
        },
        None => ChatId::from(q.from.id),
    };

    InboundUpdate::CallbackQuery {
        chat,
        callback_id: q.id.0,
        action: q.data.unwrap_or_default(),
    }
}
