//! Canned reply texts and button labels
//!
//! The menu is static: every reply here is known at startup and sent
//! verbatim. Keeping the literals in one place keeps the handlers free of
//! string formatting.

/// Button labels
pub const BTN_PLAY: &str = "🎮 Play Game";
pub const BTN_GUIDE: &str = "📚 Guide";
pub const BTN_LEADERBOARD: &str = "🏆 Leaderboard";
pub const BTN_SETTINGS: &str = "⚙️ Settings";
pub const BTN_SUPPORT: &str = "📞 Support";
pub const BTN_TIPS: &str = "💡 Tips";

/// Greeting sent in response to the entry command
pub const WELCOME: &str = "🤖 Welcome to the game!\nPick one of the options below:";

/// Generic prompt sent for any non-command message
pub const MENU_PROMPT: &str = "🤖 Hi there! Please use the menu to interact.";

pub const SUPPORT: &str = "📞 How can we help?\n\
    Contact: support@game.example\n\
    Hotline: 1900-0000";

pub const GUIDE: &str = "📚 How to play:\n\
    • Tap \"Play Game\" to start\n\
    • Follow the in-game instructions\n\
    • Win to climb the leaderboard";

pub const LEADERBOARD: &str = "🏆 Leaderboard:\n\
    1. Player1 - 1000 points\n\
    2. Player2 - 950 points\n\
    3. Player3 - 900 points";

pub const SETTINGS: &str = "⚙️ Settings:\n\
    • Sound: on\n\
    • Notifications: on\n\
    • Language: English";

pub const TIPS: &str = "💡 Tips:\n\
    • Stay patient and calm\n\
    • Learn from previous runs\n\
    • Watch the leaderboard to improve";

/// Best-effort notice sent when a menu reply fails to deliver
pub const SEND_ERROR_APOLOGY: &str = "⚠️ Something went wrong. Please try again.";
