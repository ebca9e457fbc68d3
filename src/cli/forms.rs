//! Command-argument parsing for the expense form. Malformed input never reaches the core.

use chrono::{Duration, NaiveDate};
use expense_domain::{validate_amount, Category, ExpenseDraft, ExpenseId};

use crate::cli::core::CommandError;

pub const EXPENSE_FORM_USAGE: &str = "<category> <amount> [YYYY-MM-DD|today|yesterday] [description...]";

/// Parses `<category> <amount> [date] [description...]`.
///
/// The date defaults to `today`. A third token that is not a date starts the description.
pub fn parse_expense_form(args: &[&str], today: NaiveDate) -> Result<ExpenseDraft, CommandError> {
    let [category, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!(
            "expected {EXPENSE_FORM_USAGE}"
        )));
    };
    let category = parse_category(category)?;
    let amount = parse_amount(amount)?;
    let (date, description) = match rest.split_first() {
        Some((first, tail)) => match parse_date_keyword(first, today) {
            Some(date) => (date, tail.join(" ")),
            None if looks_like_date(first) => {
                return Err(CommandError::InvalidArguments(format!(
                    "`{first}` is not a valid date (use YYYY-MM-DD)"
                )))
            }
            None => (today, rest.join(" ")),
        },
        None => (today, String::new()),
    };
    Ok(ExpenseDraft::new(category, amount, description.trim(), date))
}

/// Matches one of the known categories, ignoring case.
pub fn parse_category(raw: &str) -> Result<Category, CommandError> {
    let needle = raw.trim().to_ascii_lowercase();
    Category::known()
        .into_iter()
        .find(|category| category.as_str() == needle)
        .ok_or_else(|| {
            let known = Category::known();
            let names: Vec<_> = known
                .iter()
                .map(|category| category.as_str())
                .collect();
            CommandError::InvalidArguments(format!(
                "unknown category `{raw}` (expected one of: {})",
                names.join(", ")
            ))
        })
}

/// Accepts plain decimal numbers, optionally prefixed with `₹`.
pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let cleaned = raw.trim().trim_start_matches('₹').replace(',', "");
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))?;
    validate_amount(amount)
        .map_err(|err| CommandError::InvalidArguments(format!("`{raw}`: {err}")))?;
    Ok(amount)
}

pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    parse_date_keyword(raw, today).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not a valid date (use YYYY-MM-DD)"))
    })
}

fn parse_date_keyword(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "today" => Some(today),
        "yesterday" => Some(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").ok(),
    }
}

fn looks_like_date(raw: &str) -> bool {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    digits >= 4 && raw.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '/')
}

pub fn parse_id(raw: &str) -> Result<ExpenseId, CommandError> {
    raw.trim()
        .parse::<u64>()
        .map(ExpenseId)
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid expense id")))
}
