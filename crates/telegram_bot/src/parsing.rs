use std::fmt;

use chrono::NaiveDate;

/// Longest amount literal that still fits a callback payload next to the
/// largest category id.
pub(crate) const MAX_AMOUNT_LEN: usize = 20;

const DATE_FORMAT: &str = "%d.%m.%Y";

/// An amount typed by the user.
///
/// The literal is kept as sent so that it can travel in callback payloads and
/// be echoed back unchanged in confirmations.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Amount {
    literal: String,
    value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AmountError {
    #[error("not a number")]
    NotANumber,
    #[error("the amount must be greater than zero")]
    NotPositive,
    #[error("the amount is too long")]
    TooLong,
}

impl Amount {
    pub(crate) fn parse(input: &str) -> Result<Self, AmountError> {
        let literal = input.trim();
        let value: f64 = literal.parse().map_err(|_| AmountError::NotANumber)?;
        if !value.is_finite() {
            return Err(AmountError::NotANumber);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        if literal.len() > MAX_AMOUNT_LEN {
            return Err(AmountError::TooLong);
        }
        Ok(Self {
            literal: literal.to_string(),
            value,
        })
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.literal
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum PeriodError {
    #[error("Wrong period format. Use DD.MM.YYYY-DD.MM.YYYY.")]
    WrongShape,
    #[error("Invalid date. Use DD.MM.YYYY-DD.MM.YYYY.")]
    InvalidDate,
    #[error("The period starts after it ends. Use DD.MM.YYYY-DD.MM.YYYY.")]
    Reversed,
}

/// Parses `DD.MM.YYYY-DD.MM.YYYY` into `[start, end + 1 day)`.
pub(crate) fn parse_period(input: &str) -> Result<(NaiveDate, NaiveDate), PeriodError> {
    let parts: Vec<&str> = input.trim().split('-').collect();
    let [start, end] = parts.as_slice() else {
        return Err(PeriodError::WrongShape);
    };

    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(PeriodError::Reversed);
    }
    let until = end.succ_opt().ok_or(PeriodError::InvalidDate)?;
    Ok((start, until))
}

fn parse_date(input: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| PeriodError::InvalidDate)
}
