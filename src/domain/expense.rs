use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDateTime,
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct NewExpense {
    pub date: NaiveDateTime,
    #[validate(length(min = 1, max = 200, message = "category is required"))]
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
}

/// Totals over a set of expenses.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ExpenseSummary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    /// Keyed by `YYYY-MM`
    pub by_month: BTreeMap<String, f64>,
}

impl ExpenseSummary {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut summary = Self::default();
        for expense in expenses {
            summary.total += expense.amount;
            *summary
                .by_category
                .entry(expense.category.clone())
                .or_insert(0.0) += expense.amount;
            *summary
                .by_month
                .entry(expense.date.format("%Y-%m").to_string())
                .or_insert(0.0) += expense.amount;
        }
        summary
    }
}

/// Outcome of a bulk CSV import.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: u64,
    pub skipped: u64,
}

/// Parses an ISO-8601 date or date-time. Offsets are normalised to UTC and dropped.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_utc());
        }
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
