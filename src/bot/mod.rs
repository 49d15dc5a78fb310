//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `router`: routes one classified update to exactly one handler
//! - `command_handlers`: the /start welcome and plain-message fallback
//! - `callback_handler`: menu button presses (acknowledge + canned reply)
//! - `ui_builder`: creates the main menu keyboard
//! - `texts`: the canned reply and button label constants

pub mod callback_handler;
pub mod command_handlers;
pub mod router;
pub mod texts;
pub mod ui_builder;

// Re-export main entry points for use in main.rs and the ingress paths
pub use router::{Router, ENTRY_COMMAND};
pub use ui_builder::create_main_keyboard;
