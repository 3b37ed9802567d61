use teloxide::types::Message;

/// Where a message came from, as far as authorization cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    Private { user_id: u64 },
    Group { chat_id: i64 },
    Other,
}

impl MessageOrigin {
    pub fn of(msg: &Message) -> Self {
        if msg.chat.is_private() {
            return match msg.from.as_ref() {
                Some(user) => MessageOrigin::Private { user_id: user.id.0 },
                None => MessageOrigin::Other,
            };
        }
        if msg.chat.is_group() || msg.chat.is_supergroup() {
            return MessageOrigin::Group { chat_id: msg.chat.id.0 };
        }
        MessageOrigin::Other
    }
}

/// User and group allowlists.
///
/// An empty user list opens private chats to everyone. Groups get no such
/// exemption: a group must always be listed explicitly.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    users: Vec<u64>,
    groups: Vec<i64>,
}

impl Whitelist {
    pub fn new(users: Vec<u64>, groups: Vec<i64>) -> Self {
        Whitelist { users, groups }
    }

    pub fn is_open_to_everyone(&self) -> bool {
        self.users.is_empty()
    }

    pub fn allows(&self, origin: MessageOrigin) -> bool {
        match origin {
            MessageOrigin::Private { user_id } => self.users.is_empty() || self.users.contains(&user_id),
            MessageOrigin::Group { chat_id } => self.groups.contains(&chat_id),
            MessageOrigin::Other => false,
        }
    }

    pub fn is_whitelisted(&self, msg: &Message) -> bool {
        self.allows(MessageOrigin::of(msg))
    }
}
