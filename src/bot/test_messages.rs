// Telegram Bot API message fixtures shared by the bot tests.

use teloxide::types::Message;

fn user(user_id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": user_id,
        "is_bot": false,
        "first_name": "Test",
    })
}

pub fn private_message(user_id: u64, text: &str) -> Message {
    let json = serde_json::json!({
        "message_id": 1,
        "date": 1700000000i64,
        "chat": {
            "id": user_id as i64,
            "type": "private",
            "first_name": "Test",
        },
        "from": user(user_id),
        "text": text,
    });
    serde_json::from_value(json).expect("failed to deserialize mock private message")
}

pub fn group_message(chat_id: i64, user_id: u64, text: &str) -> Message {
    chat_message(chat_id, "group", Some(user_id), text)
}

pub fn supergroup_message(chat_id: i64, user_id: u64, text: &str) -> Message {
    chat_message(chat_id, "supergroup", Some(user_id), text)
}

pub fn channel_post(chat_id: i64, text: &str) -> Message {
    chat_message(chat_id, "channel", None, text)
}

fn chat_message(chat_id: i64, kind: &str, user_id: Option<u64>, text: &str) -> Message {
    let mut json = serde_json::json!({
        "message_id": 1,
        "date": 1700000000i64,
        "chat": {
            "id": chat_id,
            "type": kind,
            "title": "Test Chat",
        },
        "text": text,
    });
    if let Some(user_id) = user_id {
        json["from"] = user(user_id);
    }
    serde_json::from_value(json).expect("failed to deserialize mock chat message")
}
