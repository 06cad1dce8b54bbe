use crate::domain::error::{AppError, Result};
use crate::domain::expense::{Expense, NewExpense};
use chrono::NaiveDateTime;
use sqlx::sqlite::SqlitePool;

pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, ExpenseEntity>(
            "SELECT id, date, category, description, amount FROM expense ORDER BY date, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list expenses: {e}")))?;

        Ok(expenses.into_iter().map(Expense::from).collect())
    }

    pub async fn insert(&self, expense: &NewExpense) -> Result<Expense> {
        let result = sqlx::query(
            "INSERT INTO expense (date, category, description, amount) VALUES (?, ?, ?, ?)",
        )
        .bind(expense.date)
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(expense.amount)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert expense: {e}")))?;

        Ok(Expense {
            id: result.last_insert_rowid(),
            date: expense.date,
            category: expense.category.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
        })
    }

    /// Insert every expense in one transaction. Returns the number of rows written.
    pub async fn insert_many(&self, expenses: &[NewExpense]) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin import: {e}")))?;

        let mut inserted = 0;
        for expense in expenses {
            let result = sqlx::query(
                "INSERT INTO expense (date, category, description, amount) VALUES (?, ?, ?, ?)",
            )
            .bind(expense.date)
            .bind(&expense.category)
            .bind(&expense.description)
            .bind(expense.amount)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to import expense: {e}")))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit import: {e}")))?;

        Ok(inserted)
    }
}

#[derive(sqlx::FromRow)]
struct ExpenseEntity {
    id: i64,
    date: NaiveDateTime,
    category: String,
    description: Option<String>,
    amount: f64,
}

impl From<ExpenseEntity> for Expense {
    fn from(entity: ExpenseEntity) -> Self {
        Self {
            id: entity.id,
            date: entity.date,
            category: entity.category,
            description: entity.description,
            amount: entity.amount,
        }
    }
}
