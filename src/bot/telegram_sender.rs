use crate::bot::recipient::Recipient;
use crate::errors::AppError;
use crate::relay::photo_sink::PhotoSink;
use async_trait::async_trait;
use log::debug;
use teloxide::prelude::*;
use teloxide::types::{InputFile, Recipient as TgRecipient};

/// Cloneable outbound handle on the bot, usable while the dispatcher owns the bot.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        TelegramSender { bot }
    }
}

#[async_trait]
impl PhotoSink for TelegramSender {
    async fn send_photo(&self, recipient: &Recipient, image: Vec<u8>) -> Result<(), AppError> {
        debug!("📤 Sending photo ({} bytes) to {}", image.len(), recipient);
        self.bot
            .send_photo(TgRecipient::from(recipient), InputFile::memory(image))
            .await?;
        Ok(())
    }

    async fn send_text(&self, recipient: &Recipient, text: &str) -> Result<(), AppError> {
        self.bot.send_message(TgRecipient::from(recipient), text).await?;
        Ok(())
    }
}
