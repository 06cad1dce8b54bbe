// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types for CSV preview and cleaning
// No I/O, no async

mod clean_options;
mod table;

pub use clean_options::CleanOptions;
pub use table::CsvTable;

use serde::Serialize;

/// First rows of an uploaded CSV, plus the token that names the cached upload.
#[derive(Debug, Clone, Serialize)]
pub struct CsvPreview {
    pub token: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}
