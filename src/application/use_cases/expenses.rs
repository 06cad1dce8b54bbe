use crate::application::use_cases::expense_import::parse_expense_rows;
use crate::domain::contact::non_blank;
use crate::domain::error::{AppError, Result};
use crate::domain::expense::{parse_iso_datetime, Expense, ExpenseSummary, ImportReport, NewExpense};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::db::expenses::ExpenseRepository;
use std::sync::Arc;
use validator::Validate;

pub struct ExpenseUseCase {
    repository: Arc<ExpenseRepository>,
    parser: CsvParser,
}

impl ExpenseUseCase {
    pub fn new(repository: Arc<ExpenseRepository>) -> Self {
        Self {
            repository,
            parser: CsvParser::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Expense>> {
        self.repository.list().await
    }

    /// Record one expense. `date` must be an ISO-8601 date or date-time.
    pub async fn add(
        &self,
        date: &str,
        category: String,
        amount: f64,
        description: Option<String>,
    ) -> Result<Expense> {
        let date = parse_iso_datetime(date).ok_or_else(|| {
            AppError::ValidationError(format!("Invalid ISO-8601 date: {:?}", date))
        })?;

        if !amount.is_finite() {
            return Err(AppError::ValidationError(
                "Amount must be a finite number.".to_string(),
            ));
        }

        let expense = NewExpense {
            date,
            category: category.trim().to_string(),
            description: non_blank(description),
            amount,
        };
        expense.validate()?;

        self.repository.insert(&expense).await
    }

    /// Import every row with a parseable date and amount from CSV text.
    pub async fn import_csv(&self, content: &str) -> Result<ImportReport> {
        let table = self.parser.parse_content(content)?;
        let parsed = parse_expense_rows(&table)?;
        let inserted = self.repository.insert_many(&parsed.expenses).await?;

        tracing::info!(inserted, skipped = parsed.skipped, "Expense CSV imported");

        Ok(ImportReport {
            inserted,
            skipped: parsed.skipped,
        })
    }

    pub async fn summary(&self) -> Result<ExpenseSummary> {
        let expenses = self.repository.list().await?;
        Ok(ExpenseSummary::from_expenses(&expenses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::init_db;

    async fn use_case() -> ExpenseUseCase {
        let pool = init_db("sqlite::memory:", 1).await.unwrap();
        ExpenseUseCase::new(Arc::new(ExpenseRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_add_updates_summary_exactly() {
        let expenses = use_case().await;
        expenses
            .add("2024-01-01", "Rent".to_string(), 800.0, None)
            .await
            .unwrap();
        let before = expenses.summary().await.unwrap();

        expenses
            .add("2024-01-02", "Food".to_string(), "12.50".parse().unwrap(), None)
            .await
            .unwrap();
        let after = expenses.summary().await.unwrap();

        assert_eq!(after.total - before.total, 12.50);
        assert_eq!(
            after.by_category["Food"] - before.by_category.get("Food").copied().unwrap_or(0.0),
            12.50
        );
    }

    #[tokio::test]
    async fn test_add_rejects_bad_date() {
        let expenses = use_case().await;
        let err = expenses
            .add("01/02/2024", "Food".to_string(), 1.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(expenses.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_blank_category() {
        let expenses = use_case().await;
        let err = expenses
            .add("2024-01-02", "  ".to_string(), 1.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_add_blank_description_is_none() {
        let expenses = use_case().await;
        let expense = expenses
            .add("2024-01-02", "Food".to_string(), 1.0, Some(String::new()))
            .await
            .unwrap();
        assert_eq!(expense.description, None);
    }

    #[tokio::test]
    async fn test_import_single_row() {
        let expenses = use_case().await;
        let report = expenses
            .import_csv("Date,Amount,Category\n2024-01-05,42.00,Food\n")
            .await
            .unwrap();
        assert_eq!(report, ImportReport { inserted: 1, skipped: 0 });

        let listed = expenses.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].date.date().to_string(), "2024-01-05");
        assert_eq!(listed[0].amount, 42.0);
        assert_eq!(listed[0].category, "Food");
    }

    #[tokio::test]
    async fn test_import_skips_unparseable_dates() {
        let expenses = use_case().await;
        let report = expenses
            .import_csv("date,amount\nsomeday,5\n2024-02-01,7\n")
            .await
            .unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 1);

        let listed = expenses.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 7.0);
    }

    #[tokio::test]
    async fn test_import_without_date_column_inserts_nothing() {
        let expenses = use_case().await;
        let err = expenses
            .import_csv("when,amount\n2024-02-01,7\n")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(expenses.list().await.unwrap().is_empty());
    }
}
