//! Runs the dialog for every update.
//!
//! The router reads the sender's dialog state, feeds the update to
//! [`transition`], stores the next state and carries out the resulting
//! effects against the repository and the transport.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use engine::{EngineError, NewTransaction, NewUser, Repository, TransactionKind};

use crate::{
    BotError,
    dialog::{Effect, Event, Transition, transition},
    parsing::Amount,
    state::SessionStore,
    transport::{Keyboard, Transport, Update, UpdateKind},
    ui,
};

/// Category created for every new user.
const DEFAULT_CATEGORY: &str = "General";

#[derive(Clone)]
pub(crate) struct Router {
    repository: Arc<dyn Repository>,
    sessions: SessionStore,
    timezone: Tz,
}

impl Router {
    pub(crate) fn new(repository: Arc<dyn Repository>, timezone: Tz) -> Self {
        Self {
            repository,
            sessions: SessionStore::default(),
            timezone,
        }
    }

    pub(crate) async fn handle(&self, transport: &dyn Transport, update: Update) -> Result<(), BotError> {
        let event = match &update.kind {
            UpdateKind::Command(command) => Event::Command(command.clone()),
            UpdateKind::Text(text) => Event::Text(text.clone()),
            UpdateKind::Callback(payload) => Event::Callback(payload.parse()),
        };

        let state = self.sessions.get(update.user_id).await;
        let Transition { next, effects } = transition(state, event, self.today());
        self.sessions.set(update.user_id, next).await;

        for effect in effects {
            self.apply(transport, &update, effect).await?;
        }
        Ok(())
    }

    async fn apply(&self, transport: &dyn Transport, update: &Update, effect: Effect) -> Result<(), BotError> {
        let chat_id = update.chat_id;
        match effect {
            Effect::Reply(reply) => {
                let (text, keyboard) = ui::render_reply(&reply);
                transport
                    .send_message(chat_id, &text, keyboard.as_ref())
                    .await?;
            }
            Effect::RegisterUser => self.register_user(transport, update).await?,
            Effect::ListCategories => self.list_categories(transport, chat_id).await?,
            Effect::AddCategory { name } => {
                match self.repository.add_category(chat_id, &name).await {
                    Ok(category) => {
                        transport
                            .send_message(chat_id, &ui::category_added_text(&category), None)
                            .await?;
                    }
                    Err(err) => self.report(transport, chat_id, "add the category", err).await?,
                }
            }
            Effect::RenameCategory { category_id, name } => {
                match self
                    .repository
                    .rename_category(chat_id, category_id, &name)
                    .await
                {
                    Ok(()) => {
                        transport
                            .send_message(chat_id, &ui::category_renamed_text(&name), None)
                            .await?;
                    }
                    Err(err) => {
                        self.report(transport, chat_id, "rename the category", err)
                            .await?
                    }
                }
            }
            Effect::DeleteCategory { category_id } => {
                match self.repository.delete_category(chat_id, category_id).await {
                    Ok(()) => {
                        transport
                            .send_message(chat_id, ui::category_deleted_text(), None)
                            .await?;
                    }
                    Err(err) => {
                        self.report(transport, chat_id, "delete the category", err)
                            .await?
                    }
                }
            }
            Effect::OfferKinds { amount } => {
                let (text, keyboard) = ui::render_kind_choice(&amount);
                transport
                    .send_message(chat_id, &text, Some(&keyboard))
                    .await?;
            }
            Effect::PickCategory { kind, amount } => {
                self.pick_category(transport, update, kind, &amount).await?
            }
            Effect::RecordTransaction {
                category_id,
                kind,
                amount,
            } => {
                self.record_transaction(transport, chat_id, category_id, kind, &amount)
                    .await?
            }
            Effect::ShowStats { from, until } => {
                self.show_stats(transport, chat_id, from, until).await?
            }
        }
        Ok(())
    }

    async fn register_user(&self, transport: &dyn Transport, update: &Update) -> Result<(), BotError> {
        let chat_id = update.chat_id;
        match self.repository.user_by_chat_id(chat_id).await {
            Ok(Some(_)) => tracing::debug!(chat_id, "user already registered"),
            Ok(None) => {
                let user = NewUser {
                    chat_id,
                    username: update.sender.username.clone(),
                    language: update.sender.language.clone(),
                };
                match self.repository.add_user(user).await {
                    Ok(true) => {
                        if let Err(err) = self.repository.add_category(chat_id, DEFAULT_CATEGORY).await {
                            return self
                                .report(transport, chat_id, "create the default category", err)
                                .await;
                        }
                        tracing::info!(chat_id, "user registered");
                    }
                    // Another /start got there first.
                    Ok(false) => tracing::debug!(chat_id, "user already registered"),
                    Err(err) => {
                        return self
                            .report(transport, chat_id, "register the user", err)
                            .await;
                    }
                }
            }
            Err(err) => {
                return self
                    .report(transport, chat_id, "look up the user", err)
                    .await;
            }
        }

        transport
            .send_message(chat_id, ui::welcome_text(), None)
            .await?;
        Ok(())
    }

    async fn list_categories(&self, transport: &dyn Transport, chat_id: i64) -> Result<(), BotError> {
        let categories = match self.repository.categories_by_chat_id(chat_id).await {
            Ok(categories) => categories,
            Err(err) => return self.report(transport, chat_id, "load the categories", err).await,
        };
        if categories.is_empty() {
            transport
                .send_message(chat_id, ui::no_categories_text(), None)
                .await?;
            return Ok(());
        }

        let (text, keyboard) = ui::render_categories(&categories);
        transport
            .send_message(chat_id, &text, Some(&keyboard))
            .await?;
        Ok(())
    }

    async fn pick_category(
        &self,
        transport: &dyn Transport,
        update: &Update,
        kind: TransactionKind,
        amount: &Amount,
    ) -> Result<(), BotError> {
        let chat_id = update.chat_id;
        let categories = match self.repository.categories_by_chat_id(chat_id).await {
            Ok(categories) => categories,
            Err(err) => return self.report(transport, chat_id, "load the categories", err).await,
        };
        if categories.is_empty() {
            return replace_origin(transport, update, ui::no_categories_text(), None).await;
        }

        let (text, keyboard) = ui::render_category_picker(&categories, kind, amount);
        replace_origin(transport, update, &text, Some(&keyboard)).await
    }

    async fn record_transaction(
        &self,
        transport: &dyn Transport,
        chat_id: i64,
        category_id: i64,
        kind: TransactionKind,
        amount: &Amount,
    ) -> Result<(), BotError> {
        // Only names the category in the confirmation. The repository checks
        // ownership and liveness again inside its own transaction.
        let categories = match self.repository.categories_by_chat_id(chat_id).await {
            Ok(categories) => categories,
            Err(err) => return self.report(transport, chat_id, "load the categories", err).await,
        };
        let Some(category) = categories.into_iter().find(|c| c.id == category_id) else {
            transport
                .send_message(chat_id, ui::category_missing_text(), None)
                .await?;
            return Ok(());
        };

        let transaction = NewTransaction {
            chat_id,
            category_id,
            amount: amount.value(),
            kind,
            created_at: Utc::now(),
        };
        match self.repository.add_transaction(transaction).await {
            Ok(_) => {
                tracing::info!(chat_id, category_id, %kind, amount = amount.as_str(), "transaction added");
                let text = ui::transaction_recorded_text(kind, amount, &category.name);
                transport.send_message(chat_id, &text, None).await?;
                Ok(())
            }
            Err(err) => {
                self.report(transport, chat_id, "record the transaction", err)
                    .await
            }
        }
    }

    async fn show_stats(
        &self,
        transport: &dyn Transport,
        chat_id: i64,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<(), BotError> {
        let start = self.local_midnight(from);
        let end = self.local_midnight(until);
        tracing::debug!(chat_id, %start, %end, "computing statistics");

        match self.repository.transaction_stats(chat_id, start, end).await {
            Ok(stats) => {
                transport
                    .send_message(chat_id, &ui::render_stats(&stats), None)
                    .await?;
                Ok(())
            }
            Err(err) => {
                self.report(transport, chat_id, "load the statistics", err)
                    .await
            }
        }
    }

    async fn report(
        &self,
        transport: &dyn Transport,
        chat_id: i64,
        action: &str,
        err: EngineError,
    ) -> Result<(), BotError> {
        tracing::warn!(chat_id, "failed to {action}: {err}");
        transport
            .send_message(chat_id, &ui::failure_text(action, &err), None)
            .await?;
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Start of `date` in the bot's timezone. When the clocks jump over
    /// midnight the day starts at the first local time that exists.
    fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        (0..=24)
            .map(|step| midnight + Duration::minutes(step * 5))
            .find_map(|local| self.timezone.from_local_datetime(&local).earliest())
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }

    #[cfg(test)]
    pub(crate) fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Edit the message the button was pressed on. A failed edit is returned to
/// the caller; no replacement message is sent.
async fn replace_origin(
    transport: &dyn Transport,
    update: &Update,
    text: &str,
    keyboard: Option<&Keyboard>,
) -> Result<(), BotError> {
    match update.origin {
        Some(origin) => transport.edit_message(origin, text, keyboard).await,
        // Callbacks without a message never reach the router.
        None => {
            transport
                .send_message(update.chat_id, text, keyboard)
                .await?;
            Ok(())
        }
    }
}
