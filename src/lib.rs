//! # Game Lobby Telegram Bot
//!
//! A Telegram front-end for an embedded mini-app game. It routes inbound
//! updates (commands, plain messages, menu button presses) to static
//! replies, keeps a long-polling loop alive across transport failures,
//! and optionally accepts updates over a webhook.

pub mod bot;
pub mod config;
pub mod errors;
pub mod polling;
pub mod transport;
pub mod update;
pub mod webhook;

// Re-export types for easier access
pub use update::{InboundUpdate, MenuAction};
