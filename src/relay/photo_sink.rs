use crate::bot::recipient::Recipient;
use crate::errors::AppError;
use async_trait::async_trait;
use teloxide::types::Message;

/// Outbound side of the chat: photos for snapshots, text for failures.
#[async_trait]
pub trait PhotoSink: Send + Sync {
    async fn send_photo(&self, recipient: &Recipient, image: Vec<u8>) -> Result<(), AppError>;

    async fn send_text(&self, recipient: &Recipient, text: &str) -> Result<(), AppError>;

    /// Sends `image` back to whoever sent `msg`: the group for group chats, the sender otherwise.
    async fn reply_with_photo(&self, msg: &Message, image: Vec<u8>) -> Result<(), AppError> {
        self.send_photo(&Recipient::reply_target(msg), image).await
    }
}
