use std::fmt;
use teloxide::types::{ChatId, Message, Recipient as TgRecipient};

/// Destination for a photo or text: a numeric chat id (user or group) or a channel username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Chat(i64),
    Username(String),
}

impl Recipient {
    /// Interprets a configured recipient: integers are chat ids, anything else a username.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(id) => Recipient::Chat(id),
            Err(_) => Recipient::Username(raw.to_string()),
        }
    }

    /// Who a reply to `msg` should go to: the group for group chats, the sender otherwise.
    pub fn reply_target(msg: &Message) -> Self {
        if msg.chat.is_group() || msg.chat.is_supergroup() {
            return Recipient::Chat(msg.chat.id.0);
        }
        match msg.from.as_ref() {
            Some(user) => Recipient::Chat(user.id.0 as i64),
            None => Recipient::Chat(msg.chat.id.0),
        }
    }
}

impl From<&Recipient> for TgRecipient {
    fn from(recipient: &Recipient) -> Self {
        match recipient {
            Recipient::Chat(id) => TgRecipient::Id(ChatId(*id)),
            Recipient::Username(name) => TgRecipient::ChannelUsername(name.clone()),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Chat(id) => write!(f, "{}", id),
            Recipient::Username(name) => f.write_str(name),
        }
    }
}
