//! Per-category aggregates over a time window.

use std::collections::BTreeMap;

use crate::TransactionKind;

/// Sums of live transactions grouped by category name, split by kind.
///
/// Categories sharing a name are merged into one entry. Maps are ordered by
/// name so the rendered report is stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryStats {
    pub income: BTreeMap<String, f64>,
    pub expense: BTreeMap<String, f64>,
}

impl CategoryStats {
    pub fn add(&mut self, category: &str, kind: TransactionKind, amount: f64) {
        let group = match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expense,
        };
        *group.entry(category.to_string()).or_insert(0.0) += amount;
    }

    // An empty `f64` sum is `-0.0`, which would print as a negative total.
    pub fn total_income(&self) -> f64 {
        self.income.values().fold(0.0, |acc, v| acc + v)
    }

    pub fn total_expense(&self) -> f64 {
        self.expense.values().fold(0.0, |acc, v| acc + v)
    }

    pub fn net(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }
}
