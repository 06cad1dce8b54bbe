use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::csv::CsvTable;
use crate::domain::error::{AppError, Result};
use crate::domain::expense::{parse_iso_datetime, NewExpense};

pub const UNCATEGORIZED: &str = "Uncategorized";
const DESCRIPTION_SEPARATOR: &str = " | ";

const DATE_HEADERS: [&str; 2] = ["date", "transaction_date"];
const AMOUNT_HEADERS: [&str; 3] = ["amount", "debit", "credit"];
const CATEGORY_HEADERS: [&str; 1] = ["category"];

const DATE_FORMATS: [&str; 6] = [
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y/%m/%d %H:%M:%S", "%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"];

/// Column positions of the fields an expense row is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseColumns {
    pub date: usize,
    pub amount: Option<usize>,
    pub category: Option<usize>,
}

impl ExpenseColumns {
    /// Match headers case-insensitively. A date column is mandatory.
    pub fn detect(headers: &[String]) -> Result<Self> {
        let date = find_header(headers, &DATE_HEADERS).ok_or_else(|| {
            AppError::ValidationError(format!(
                "No date column detected; expected one of: {}",
                DATE_HEADERS.join(", ")
            ))
        })?;

        Ok(Self {
            date,
            amount: find_header(headers, &AMOUNT_HEADERS),
            category: find_header(headers, &CATEGORY_HEADERS),
        })
    }
}

/// Index of the first header equal to a candidate, trying candidates in priority order.
fn find_header(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(candidate))
    })
}

/// Rows that became expenses, and how many were skipped.
#[derive(Debug, Default)]
pub struct ParsedExpenses {
    pub expenses: Vec<NewExpense>,
    pub skipped: u64,
}

/// Turn table rows into expenses. Rows whose date or amount does not parse
/// are skipped; a missing amount column means an amount of 0.0.
pub fn parse_expense_rows(table: &CsvTable) -> Result<ParsedExpenses> {
    let columns = ExpenseColumns::detect(&table.headers)?;
    let mut parsed = ParsedExpenses::default();

    for row in &table.rows {
        let Some(date) = parse_flexible_date(&row[columns.date]) else {
            parsed.skipped += 1;
            continue;
        };

        let amount = match columns.amount {
            Some(idx) => match parse_amount(&row[idx]) {
                Some(amount) => amount,
                None => {
                    parsed.skipped += 1;
                    continue;
                }
            },
            None => 0.0,
        };

        let category = columns
            .category
            .map(|idx| row[idx].trim())
            .filter(|value| !value.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();

        let description = row
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != columns.date && Some(*idx) != columns.amount)
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(DESCRIPTION_SEPARATOR);

        parsed.expenses.push(NewExpense {
            date,
            category,
            description: if description.trim().is_empty() {
                None
            } else {
                Some(description)
            },
            amount,
        });
    }

    Ok(parsed)
}

/// ISO-8601 first, then common bank-export layouts (month-first for slashes).
pub fn parse_flexible_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(dt) = parse_iso_datetime(value) {
        return Some(dt);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a money cell. Currency symbols and thousands separators are tolerated.
pub fn parse_amount(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let parsed = value.parse::<f64>().ok().or_else(|| {
        let stripped: String = value
            .chars()
            .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | ' '))
            .collect();
        stripped.parse::<f64>().ok()
    })?;

    parsed.is_finite().then_some(parsed)
}
