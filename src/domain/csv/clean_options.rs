// ============================================================
// CLEAN OPTIONS
// ============================================================
// Which transforms to apply when cleaning an uploaded CSV

use serde::{Deserialize, Serialize};

/// Optional transforms for a clean pass. All off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Collapse rows identical to an earlier row
    pub drop_duplicates: bool,

    /// Strip surrounding whitespace from every cell
    pub trim_spaces: bool,

    /// Columns to keep, in output order. Empty keeps all columns.
    pub keep_columns: Vec<String>,
}

impl CleanOptions {
    /// Split a comma-separated column list, dropping blank entries.
    pub fn parse_column_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_noop(&self) -> bool {
        !self.drop_duplicates && !self.trim_spaces && self.keep_columns.is_empty()
    }
}
