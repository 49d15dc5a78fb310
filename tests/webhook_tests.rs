use serde_json::json;
use teloxide::types::ChatId;

use game_lobby_bot::update::{classify_update, InboundUpdate};
use game_lobby_bot::webhook::webhook_path;

#[cfg(test)]
mod tests {
    use super::*;

    /// A pushed message payload classifies into the same model the
    /// polling path consumes
    #[test]
    fn test_message_payload_classifies_as_plain_message() {
        let payload = json!({
            "update_id": 10000,
            "message": {
                "message_id": 1365,
                "date": 1441645532,
                "chat": {"id": 1111111, "type": "private", "first_name": "Test"},
                "from": {"id": 1111111, "is_bot": false, "first_name": "Test"},
                "text": "hello"
            }
        });

        let update: teloxide::types::Update = serde_json::from_str(&payload.to_string()).unwrap();
        assert_eq!(
            classify_update(update),
            Some(InboundUpdate::PlainMessage {
                chat: ChatId(1111111),
                text: "hello".to_string(),
            })
        );
    }

    /// A command with a @botname suffix classifies as the bare token
    #[test]
    fn test_command_payload_strips_bot_suffix() {
        let payload = json!({
            "update_id": 10001,
            "message": {
                "message_id": 1366,
                "date": 1441645533,
                "chat": {"id": 2222, "type": "private", "first_name": "Test"},
                "from": {"id": 2222, "is_bot": false, "first_name": "Test"},
                "text": "/start@GameLobbyBot now"
            }
        });

        let update: teloxide::types::Update = serde_json::from_str(&payload.to_string()).unwrap();
        assert_eq!(
            classify_update(update),
            Some(InboundUpdate::Command {
                chat: ChatId(2222),
                command: "/start".to_string(),
            })
        );
    }

    /// A callback payload without an attached message falls back to the
    /// sender's id as the conversation
    #[test]
    fn test_callback_payload_classifies_with_sender_fallback() {
        let payload = json!({
            "update_id": 10002,
            "callback_query": {
                "id": "4382bfdwdsb323b2d9",
                "from": {"id": 3333, "is_bot": false, "first_name": "Test"},
                "chat_instance": "-571891856262",
                "data": "leaderboard"
            }
        });

        let update: teloxide::types::Update = serde_json::from_str(&payload.to_string()).unwrap();
        assert_eq!(
            classify_update(update),
            Some(InboundUpdate::CallbackQuery {
                chat: ChatId(3333),
                callback_id: "4382bfdwdsb323b2d9".to_string(),
                action: "leaderboard".to_string(),
            })
        );
    }

    /// The secret route embeds the bot token as the platform expects
    #[test]
    fn test_webhook_path_matches_token_route() {
        let path = webhook_path("123456789:AAFakeTokenForTestingPurposes1234567890");
        assert!(path.starts_with("/bot123456789:"));
    }
}
