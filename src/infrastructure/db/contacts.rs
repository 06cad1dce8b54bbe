use crate::domain::contact::{Contact, ContactInput};
use crate::domain::error::{AppError, Result};
use sqlx::sqlite::SqlitePool;

pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All contacts, or those whose name, email or phone contains `filter`.
    /// Matching is case-sensitive.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<Contact>> {
        let contacts = match filter {
            Some(q) if !q.is_empty() => {
                sqlx::query_as::<_, ContactEntity>(
                    "SELECT id, name, email, phone, notes FROM contact
                     WHERE instr(name, ?1) > 0
                        OR instr(email, ?1) > 0
                        OR instr(phone, ?1) > 0
                     ORDER BY id",
                )
                .bind(q)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, ContactEntity>(
                    "SELECT id, name, email, phone, notes FROM contact ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::DatabaseError(format!("Failed to list contacts: {e}")))?;

        Ok(contacts.into_iter().map(Contact::from).collect())
    }

    pub async fn insert(&self, input: &ContactInput) -> Result<Contact> {
        let result = sqlx::query(
            "INSERT INTO contact (name, email, phone, notes) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert contact: {e}")))?;

        Ok(Contact {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            notes: input.notes.clone(),
        })
    }

    pub async fn update(&self, id: i64, input: &ContactInput) -> Result<Contact> {
        let result = sqlx::query(
            "UPDATE contact SET name = ?, email = ?, phone = ?, notes = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.notes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update contact: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Contact not found: {}", id)));
        }

        Ok(Contact {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            notes: input.notes.clone(),
        })
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contact WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete contact: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Contact not found: {}", id)));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count contacts: {e}")))?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct ContactEntity {
    id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
}

impl From<ContactEntity> for Contact {
    fn from(entity: ContactEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            notes: entity.notes,
        }
    }
}
