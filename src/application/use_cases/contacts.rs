use crate::domain::contact::{Contact, ContactInput};
use crate::domain::error::Result;
use crate::infrastructure::db::contacts::ContactRepository;
use std::sync::Arc;
use validator::Validate;

pub struct ContactUseCase {
    repository: Arc<ContactRepository>,
}

impl ContactUseCase {
    pub fn new(repository: Arc<ContactRepository>) -> Self {
        Self { repository }
    }

    /// List contacts; a non-empty `filter` must appear in name, email or phone.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<Contact>> {
        self.repository.list(filter.filter(|q| !q.is_empty())).await
    }

    pub async fn add(&self, input: ContactInput) -> Result<Contact> {
        input.validate()?;
        self.repository.insert(&input).await
    }

    pub async fn update(&self, id: i64, input: ContactInput) -> Result<Contact> {
        input.validate()?;
        self.repository.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.repository.count().await
    }
}
