//! Telegram bot.
//!
//! Turns Telegram updates into dialog events, keeps the per-user dialog
//! state in memory and stores everything else through an
//! [`engine::Repository`].

use std::sync::Arc;

use chrono_tz::Tz;
use engine::Repository;
use teloxide::{prelude::*, utils::command::BotCommands};

pub use error::BotError;

mod callback;
mod commands;
mod dialog;
mod error;
mod handlers;
mod parsing;
mod router;
mod state;
#[cfg(test)]
mod test_utils;
mod transport;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    router: router::Router,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    router: router::Router,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) -> Result<(), BotError> {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        bot.set_my_commands(commands::Command::bot_commands())
            .await?;

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            router: self.router.clone(),
        };

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::handle_message))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
        Ok(())
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    timezone: Option<Tz>,
    repository: Option<Arc<dyn Repository>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// Restrict the bot to these Telegram user ids. Empty means everyone.
    pub fn allowed_users(mut self, allowed_users: Vec<u64>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users.into_iter().map(UserId).collect());
        }
        self
    }

    /// Timezone used for day boundaries in statistics. Defaults to UTC.
    pub fn timezone(mut self, timezone: Tz) -> BotBuilder {
        self.timezone = Some(timezone);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn Repository>) -> BotBuilder {
        self.repository = Some(repository);
        self
    }

    pub fn build(self) -> Result<Bot, BotError> {
        tracing::info!("Initializing telegram bot...");
        let repository = self.repository.ok_or(BotError::MissingRepository)?;
        Ok(Bot {
            token: self.token,
            allowed_users: self.allowed_users,
            router: router::Router::new(repository, self.timezone.unwrap_or(chrono_tz::UTC)),
        })
    }
}
