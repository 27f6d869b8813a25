//! The dialog state machine.
//!
//! [`transition`] is pure: it maps the current [`DialogState`] and one
//! [`Event`] to the next state and a list of [`Effect`]s. The router stores
//! the state and carries out the effects.

use chrono::NaiveDate;
use engine::TransactionKind;

use crate::{
    callback::{CallbackAction, PayloadError},
    commands::Command,
    parsing::{Amount, AmountError, PeriodError, parse_period},
    state::DialogState,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Command(Command),
    Text(String),
    Callback(Result<CallbackAction, PayloadError>),
}

/// Fixed messages that need no repository access.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Reply {
    Help,
    AskCategoryName,
    AskNewCategoryName,
    ChooseStatsWindow,
    AskPeriod,
    PeriodError(PeriodError),
    NotUnderstood,
    UnknownAction,
    InvalidAmount(AmountError),
    InvalidPayload(PayloadError),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
    Reply(Reply),
    /// Register the sender and greet them.
    RegisterUser,
    ListCategories,
    AddCategory {
        name: String,
    },
    RenameCategory {
        category_id: i64,
        name: String,
    },
    DeleteCategory {
        category_id: i64,
    },
    OfferKinds {
        amount: Amount,
    },
    /// Turn the originating message into a category picker.
    PickCategory {
        kind: TransactionKind,
        amount: Amount,
    },
    RecordTransaction {
        category_id: i64,
        kind: TransactionKind,
        amount: Amount,
    },
    /// Statistics for the local days `[from, until)`.
    ShowStats {
        from: NaiveDate,
        until: NaiveDate,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Transition {
    pub next: DialogState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: DialogState, effect: Effect) -> Self {
        Self {
            next,
            effects: vec![effect],
        }
    }
}

/// `today` is the current date in the bot's timezone.
pub(crate) fn transition(state: DialogState, event: Event, today: NaiveDate) -> Transition {
    match event {
        Event::Command(command) => on_command(state, command),
        Event::Text(text) => on_text(state, &text),
        Event::Callback(Ok(action)) => on_action(state, action, today),
        Event::Callback(Err(PayloadError::Empty | PayloadError::UnknownTag(_))) => {
            Transition::to(state, Effect::Reply(Reply::UnknownAction))
        }
        Event::Callback(Err(err)) => Transition::to(state, Effect::Reply(Reply::InvalidPayload(err))),
    }
}

fn on_command(state: DialogState, command: Command) -> Transition {
    match command {
        Command::Start => Transition::to(state, Effect::RegisterUser),
        Command::Help => Transition::to(state, Effect::Reply(Reply::Help)),
        Command::AddCategory => Transition::to(
            DialogState::AwaitingNewCategoryName,
            Effect::Reply(Reply::AskCategoryName),
        ),
        Command::ShowCategories => Transition::to(state, Effect::ListCategories),
        Command::Stats => Transition::to(state, Effect::Reply(Reply::ChooseStatsWindow)),
    }
}

fn on_text(state: DialogState, text: &str) -> Transition {
    // A number always starts a new entry, whatever dialog is pending.
    match Amount::parse(text) {
        Ok(amount) => return Transition::to(state, Effect::OfferKinds { amount }),
        Err(AmountError::NotANumber) => {}
        Err(err) => return Transition::to(state, Effect::Reply(Reply::InvalidAmount(err))),
    }

    match state {
        DialogState::AwaitingRenameCategory { category_id } => Transition::to(
            DialogState::Idle,
            Effect::RenameCategory {
                category_id,
                name: text.to_string(),
            },
        ),
        DialogState::AwaitingNewCategoryName => Transition::to(
            DialogState::Idle,
            Effect::AddCategory {
                name: text.to_string(),
            },
        ),
        DialogState::AwaitingPeriod => match parse_period(text) {
            Ok((from, until)) => Transition::to(DialogState::Idle, Effect::ShowStats { from, until }),
            Err(err) => Transition::to(
                DialogState::AwaitingPeriod,
                Effect::Reply(Reply::PeriodError(err)),
            ),
        },
        DialogState::Idle => Transition::to(DialogState::Idle, Effect::Reply(Reply::NotUnderstood)),
    }
}

fn on_action(state: DialogState, action: CallbackAction, today: NaiveDate) -> Transition {
    match action {
        CallbackAction::Kind { kind, amount } => {
            Transition::to(state, Effect::PickCategory { kind, amount })
        }
        CallbackAction::Record {
            category_id,
            kind,
            amount,
        } => Transition::to(
            state,
            Effect::RecordTransaction {
                category_id,
                kind,
                amount,
            },
        ),
        CallbackAction::Rename { category_id } => Transition::to(
            DialogState::AwaitingRenameCategory { category_id },
            Effect::Reply(Reply::AskNewCategoryName),
        ),
        CallbackAction::Delete { category_id } => {
            Transition::to(state, Effect::DeleteCategory { category_id })
        }
        CallbackAction::Today => Transition::to(
            state,
            Effect::ShowStats {
                from: today,
                until: today.succ_opt().unwrap_or(NaiveDate::MAX),
            },
        ),
        CallbackAction::Period => {
            Transition::to(DialogState::AwaitingPeriod, Effect::Reply(Reply::AskPeriod))
        }
    }
}
