use std::{collections::BTreeMap, fmt::Write as _};

use engine::{Category, CategoryStats, EngineError, TransactionKind};

use crate::{
    callback::CallbackAction,
    dialog::Reply,
    parsing::Amount,
    transport::{Button, Keyboard},
};

const PICKER_COLUMNS: usize = 3;

pub(crate) fn welcome_text() -> &'static str {
    "Hi! Send /help to see what I can do."
}

pub(crate) fn help_text() -> &'static str {
    "Bot commands:\n\
     /start - start using the bot\n\
     /add_category - add a new category\n\
     /show_categories - show all categories\n\
     /stats - show statistics\n\
     /help - show this message\n\
     \n\
     To record a transaction just send the amount."
}

pub(crate) fn no_categories_text() -> &'static str {
    "No categories yet. Add one with /add_category."
}

pub(crate) fn category_missing_text() -> &'static str {
    "This category no longer exists."
}

pub(crate) fn category_added_text(category: &Category) -> String {
    format!("Category \"{}\" added.", category.name)
}

pub(crate) fn category_renamed_text(name: &str) -> String {
    format!("Category renamed to \"{}\".", name.trim())
}

pub(crate) fn category_deleted_text() -> &'static str {
    "Category deleted."
}

pub(crate) fn transaction_recorded_text(kind: TransactionKind, amount: &Amount, category: &str) -> String {
    let label = match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    };
    format!("{label} of {amount} added to category \"{category}\".")
}

/// Message shown when a repository call fails.
pub(crate) fn failure_text(action: &str, err: &EngineError) -> String {
    format!("Failed to {action}: {err}")
}

/// Text and optional keyboard for the fixed replies of the dialog.
pub(crate) fn render_reply(reply: &Reply) -> (String, Option<Keyboard>) {
    match reply {
        Reply::Help => (help_text().to_string(), None),
        Reply::AskCategoryName => ("Enter the name of the new category:".to_string(), None),
        Reply::AskNewCategoryName => ("Enter the new name of the category:".to_string(), None),
        Reply::ChooseStatsWindow => (
            "Choose the period:".to_string(),
            Some(Keyboard::new(vec![vec![
                Button::new("Today", CallbackAction::Today),
                Button::new("Custom period", CallbackAction::Period),
            ]])),
        ),
        Reply::AskPeriod => (
            "Enter the period as DD.MM.YYYY-DD.MM.YYYY:".to_string(),
            None,
        ),
        Reply::PeriodError(err) => (err.to_string(), None),
        Reply::NotUnderstood => (
            "Sorry, I don't understand. Send /help for the list of commands.".to_string(),
            None,
        ),
        Reply::UnknownAction => ("Command not recognized.".to_string(), None),
        Reply::InvalidAmount(err) => (format!("Invalid amount: {err}."), None),
        Reply::InvalidPayload(err) => (format!("Could not process the button: {err}."), None),
    }
}

pub(crate) fn render_kind_choice(amount: &Amount) -> (String, Keyboard) {
    let button = |label: &str, kind| {
        Button::new(
            label,
            CallbackAction::Kind {
                kind,
                amount: amount.clone(),
            },
        )
    };
    (
        "Choose the transaction type:".to_string(),
        Keyboard::new(vec![vec![
            button("Income", TransactionKind::Income),
            button("Expense", TransactionKind::Expense),
        ]]),
    )
}

pub(crate) fn render_category_picker(
    categories: &[Category],
    kind: TransactionKind,
    amount: &Amount,
) -> (String, Keyboard) {
    let rows = categories
        .chunks(PICKER_COLUMNS)
        .map(|chunk| {
            chunk
                .iter()
                .map(|category| {
                    Button::new(
                        category.name.clone(),
                        CallbackAction::Record {
                            category_id: category.id,
                            kind,
                            amount: amount.clone(),
                        },
                    )
                })
                .collect()
        })
        .collect();
    ("Choose a category:".to_string(), Keyboard::new(rows))
}

pub(crate) fn render_categories(categories: &[Category]) -> (String, Keyboard) {
    let rows = categories
        .iter()
        .map(|category| {
            vec![
                Button::new(
                    format!("✏️ {}", category.name),
                    CallbackAction::Rename {
                        category_id: category.id,
                    },
                ),
                Button::new(
                    "🗑️ Delete",
                    CallbackAction::Delete {
                        category_id: category.id,
                    },
                ),
            ]
        })
        .collect();
    ("Categories:".to_string(), Keyboard::new(rows))
}

pub(crate) fn render_stats(stats: &CategoryStats) -> String {
    let mut text = String::from("📊 Statistics for the period\n\n");
    let _ = writeln!(text, "💰 Income: {:.1}", stats.total_income());
    push_breakdown(&mut text, &stats.income);
    let _ = writeln!(text, "\n💸 Expense: {:.1}", stats.total_expense());
    push_breakdown(&mut text, &stats.expense);
    let _ = write!(text, "\n💹 Net: {:.1}", stats.net());
    text
}

fn push_breakdown(text: &mut String, sums: &BTreeMap<String, f64>) {
    for (name, amount) in sums {
        let _ = writeln!(text, "  - {name}: {amount:.1}");
    }
}
