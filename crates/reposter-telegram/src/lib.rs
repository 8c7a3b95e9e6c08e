//! Telegram adapter (teloxide).
//!
//! Implements the `reposter-core` MessagingPort over the Telegram Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;

pub mod handlers;
pub mod router;

use reposter_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::MessagingPort,
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Telegram(e.to_string())
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn reply_text(&self, to: MessageRef, text: &str) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_message(Self::tg_chat(to.chat_id), text.to_string())
            .reply_to_message_id(Self::tg_msg_id(to.message_id))
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id: to.chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.bot
            .delete_message(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn forward_message(&self, msg: MessageRef, to: ChatId) -> Result<()> {
        self.bot
            .forward_message(
                Self::tg_chat(to),
                Self::tg_chat(msg.chat_id),
                Self::tg_msg_id(msg.message_id),
            )
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
