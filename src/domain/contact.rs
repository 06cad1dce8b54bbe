use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Field values for creating or replacing a contact.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct ContactInput {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(length(max = 320))]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub phone: Option<String>,
    #[validate(length(max = 4096))]
    pub notes: Option<String>,
}

impl ContactInput {
    /// Trims the name and turns blank optional fields into `None`.
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: non_blank(email),
            phone: non_blank(phone),
            notes: non_blank(notes),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
