//! Inline button payloads.
//!
//! Every button carries a [`CallbackAction`] encoded as a tag followed by its
//! arguments, joined with `:`. Only ids, kinds and amount literals are ever
//! encoded, none of which can contain the delimiter.

use std::{fmt, str::FromStr};

use engine::TransactionKind;

use crate::parsing::{Amount, AmountError};

const DELIMITER: char = ':';
/// Some clients prepend a form feed to the payload.
const CONTROL_PREFIX: char = '\u{c}';

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CallbackAction {
    /// The user picked income or expense for a typed amount.
    Kind { kind: TransactionKind, amount: Amount },
    /// The user picked the category for an amount.
    Record {
        category_id: i64,
        kind: TransactionKind,
        amount: Amount,
    },
    Rename { category_id: i64 },
    Delete { category_id: i64 },
    Today,
    Period,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum PayloadError {
    #[error("empty payload")]
    Empty,
    #[error("unknown action \"{0}\"")]
    UnknownTag(String),
    #[error("action \"{tag}\" expects {expected} arguments, got {got}")]
    Arity {
        tag: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid category id \"{0}\"")]
    InvalidCategoryId(String),
    #[error("invalid transaction kind \"{0}\"")]
    InvalidKind(String),
    #[error("invalid amount \"{literal}\": {reason}")]
    InvalidAmount { literal: String, reason: AmountError },
}

impl CallbackAction {
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            Self::Kind { kind, .. } => kind.as_str(),
            Self::Record { .. } => "transaction",
            Self::Rename { .. } => "rename",
            Self::Delete { .. } => "delete",
            Self::Today => "today",
            Self::Period => "period",
        }
    }

    pub(crate) fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())?;
        match self {
            Self::Kind { amount, .. } => write!(f, "{DELIMITER}{amount}"),
            Self::Record {
                category_id,
                kind,
                amount,
            } => write!(
                f,
                "{DELIMITER}{category_id}{DELIMITER}{kind}{DELIMITER}{amount}"
            ),
            Self::Rename { category_id } | Self::Delete { category_id } => {
                write!(f, "{DELIMITER}{category_id}")
            }
            Self::Today | Self::Period => Ok(()),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = PayloadError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        let payload = payload.trim_start_matches(CONTROL_PREFIX);
        if payload.is_empty() {
            return Err(PayloadError::Empty);
        }

        let mut parts = payload.split(DELIMITER);
        let tag = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match tag {
            "income" | "expense" => {
                let [amount] = arguments(tag, &args)?;
                Ok(Self::Kind {
                    kind: parse_kind(tag)?,
                    amount: parse_amount(amount)?,
                })
            }
            "transaction" => {
                let [category_id, kind, amount] = arguments(tag, &args)?;
                Ok(Self::Record {
                    category_id: parse_category_id(category_id)?,
                    kind: parse_kind(kind)?,
                    amount: parse_amount(amount)?,
                })
            }
            "rename" => {
                let [category_id] = arguments(tag, &args)?;
                Ok(Self::Rename {
                    category_id: parse_category_id(category_id)?,
                })
            }
            "delete" => {
                let [category_id] = arguments(tag, &args)?;
                Ok(Self::Delete {
                    category_id: parse_category_id(category_id)?,
                })
            }
            "today" => {
                let [] = arguments(tag, &args)?;
                Ok(Self::Today)
            }
            "period" => {
                let [] = arguments(tag, &args)?;
                Ok(Self::Period)
            }
            other => Err(PayloadError::UnknownTag(other.to_string())),
        }
    }
}

fn arguments<'a, const N: usize>(tag: &str, args: &[&'a str]) -> Result<[&'a str; N], PayloadError> {
    <[&str; N]>::try_from(args).map_err(|_| PayloadError::Arity {
        tag: tag.to_string(),
        expected: N,
        got: args.len(),
    })
}

fn parse_category_id(value: &str) -> Result<i64, PayloadError> {
    value
        .parse()
        .map_err(|_| PayloadError::InvalidCategoryId(value.to_string()))
}

fn parse_kind(value: &str) -> Result<TransactionKind, PayloadError> {
    TransactionKind::try_from(value).map_err(|_| PayloadError::InvalidKind(value.to_string()))
}

fn parse_amount(value: &str) -> Result<Amount, PayloadError> {
    Amount::parse(value).map_err(|reason| PayloadError::InvalidAmount {
        literal: value.to_string(),
        reason,
    })
}
