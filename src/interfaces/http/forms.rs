//! Typed payloads for every form the pages submit.
//!
//! Each struct rejects unknown fields; missing optional fields take the
//! defaults written here.

use crate::application::use_cases::web_scraper::DEFAULT_SELECTOR;
use crate::domain::contact::ContactInput;
use crate::domain::csv::CleanOptions;
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanForm {
    #[serde(default, deserialize_with = "checkbox")]
    pub drop_duplicates: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub trim_spaces: bool,
    #[serde(default)]
    pub keep_columns: String,
    /// Upload token handed out by the preview step
    #[serde(default)]
    pub token: Option<String>,
    /// Raw CSV text, for clients that skip the preview step
    #[serde(default)]
    pub raw: Option<String>,
}

impl CleanForm {
    pub fn options(&self) -> CleanOptions {
        CleanOptions {
            drop_duplicates: self.drop_duplicates,
            trim_spaces: self.trim_spaces,
            keep_columns: CleanOptions::parse_column_list(&self.keep_columns),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactForm {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ContactForm> for ContactInput {
    fn from(form: ContactForm) -> Self {
        ContactInput::new(form.name, form.email, form.phone, form.notes)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpenseForm {
    pub date: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpenseQuery {
    #[serde(default)]
    pub imported: Option<u64>,
    #[serde(default)]
    pub skipped: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeForm {
    pub url: String,
    #[serde(default = "default_selector")]
    pub selector: String,
}

fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

/// HTML checkboxes submit `on` when ticked and nothing otherwise.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "" | "off" | "false" | "0" | "no" => Ok(false),
        other => Err(de::Error::custom(format!(
            "invalid checkbox value {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(body)
    }

    #[test]
    fn test_clean_form_defaults() {
        let form: CleanForm = parse("").unwrap();
        assert!(!form.drop_duplicates);
        assert!(!form.trim_spaces);
        assert!(form.token.is_none());
        assert!(form.raw.is_none());
        assert!(form.options().is_noop());
    }

    #[test]
    fn test_clean_form_checkboxes_and_columns() {
        let form: CleanForm =
            parse("drop_duplicates=on&trim_spaces=true&keep_columns=a%2C+b&token=abc").unwrap();
        let options = form.options();
        assert!(options.drop_duplicates);
        assert!(options.trim_spaces);
        assert_eq!(options.keep_columns, vec!["a", "b"]);
        assert_eq!(form.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_clean_form_rejects_unknown_fields() {
        assert!(parse::<CleanForm>("dedupe=on").is_err());
    }

    #[test]
    fn test_clean_form_rejects_bad_checkbox() {
        assert!(parse::<CleanForm>("trim_spaces=maybe").is_err());
    }

    #[test]
    fn test_contact_form_requires_name() {
        assert!(parse::<ContactForm>("email=a%40b.c").is_err());
        let form: ContactForm = parse("name=Ada&email=").unwrap();
        let input: ContactInput = form.into();
        assert_eq!(input.name, "Ada");
        assert_eq!(input.email, None);
    }

    #[test]
    fn test_expense_form_parses_amount() {
        let form: ExpenseForm = parse("date=2024-01-02&category=Food&amount=12.50").unwrap();
        assert_eq!(form.amount, 12.5);
        assert!(form.description.is_none());
        assert!(parse::<ExpenseForm>("date=2024-01-02&category=Food&amount=lots").is_err());
    }

    #[test]
    fn test_scrape_form_default_selector() {
        let form: ScrapeForm = parse("url=https%3A%2F%2Fexample.com").unwrap();
        assert_eq!(form.selector, "p");
    }
}
