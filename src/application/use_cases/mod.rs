pub mod contacts;
pub mod csv_cleaner;
pub mod expense_import;
pub mod expenses;
pub mod upload_cache;
pub mod web_scraper;
