//! The chat side of the bot.
//!
//! The router only talks to [`Transport`] and reads [`Update`]s, so every
//! dialog can be driven in tests without Telegram.

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
};

use crate::{BotError, callback::CallbackAction, commands::Command};

/// A sent message that can be edited later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MessageHandle {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Button {
    pub label: String,
    pub action: CallbackAction,
}

impl Button {
    pub(crate) fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub(crate) fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    fn to_markup(&self) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(self.rows.iter().map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(&button.label, button.action.encode()))
                .collect::<Vec<_>>()
        }))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Sender {
    pub username: Option<String>,
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum UpdateKind {
    Command(Command),
    Text(String),
    /// Raw callback payload, decoded by the router.
    Callback(String),
}

/// One inbound event, already stripped of Telegram types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Update {
    pub chat_id: i64,
    pub user_id: u64,
    pub sender: Sender,
    /// The message a callback button was attached to.
    pub origin: Option<MessageHandle>,
    pub kind: UpdateKind,
}

#[async_trait]
pub(crate) trait Transport: Send + Sync {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageHandle, BotError>;

    async fn edit_message(
        &self,
        handle: MessageHandle,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), BotError>;
}

/// Sends through the Bot API. Messages are plain text.
pub(crate) struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub(crate) fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageHandle, BotError> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard.to_markup());
        }
        let sent = request.await?;
        Ok(MessageHandle {
            chat_id: sent.chat.id.0,
            message_id: sent.id.0,
        })
    }

    async fn edit_message(
        &self,
        handle: MessageHandle,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), BotError> {
        let mut request =
            self.bot
                .edit_message_text(ChatId(handle.chat_id), MessageId(handle.message_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard.to_markup());
        }
        request.await?;
        Ok(())
    }
}
