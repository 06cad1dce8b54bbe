// ============================================================
// CSV CLEANER USE CASE
// ============================================================
// Preview uploads and run the clean pipeline: columns, trim, dedup

use std::sync::Arc;
use std::time::Instant;

use crate::application::use_cases::upload_cache::UploadCache;
use crate::domain::csv::{CleanOptions, CsvPreview, CsvTable};
use crate::domain::error::AppError;
use crate::infrastructure::csv::CsvParser;

/// Default number of rows shown in a preview
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

pub struct CsvCleaner {
    parser: CsvParser,
    cache: Arc<UploadCache>,
    preview_rows: usize,
}

impl CsvCleaner {
    pub fn new(cache: Arc<UploadCache>, preview_rows: usize) -> Self {
        Self {
            parser: CsvParser::new(),
            cache,
            preview_rows,
        }
    }

    /// Parse an upload, cache its text, and return the leading rows.
    pub fn preview(&self, content: String) -> Result<CsvPreview, AppError> {
        let table = self.parser.parse_content(&content)?;
        let rows = table.head(self.preview_rows).to_vec();
        let total_rows = table.len();
        let token = self.cache.insert(content);

        tracing::info!(
            token = %token,
            columns = table.headers.len(),
            rows = total_rows,
            "CSV upload cached for cleaning"
        );

        Ok(CsvPreview {
            token,
            columns: table.headers,
            rows,
            total_rows,
        })
    }

    /// Text of a previously previewed upload, if its token is still live.
    pub fn cached_upload(&self, token: &str) -> Option<Arc<str>> {
        self.cache.get(token)
    }

    /// Clean CSV text and serialize the result. The input is never modified.
    pub fn clean(&self, content: &str, options: &CleanOptions) -> Result<Vec<u8>, AppError> {
        let start = Instant::now();

        let mut table = self.parser.parse_content(content)?;
        let rows_in = table.len();
        let removed = apply_clean(&mut table, options);
        let output = self.parser.write_table(&table)?;

        tracing::info!(
            rows_in,
            rows_out = table.len(),
            duplicates_removed = removed,
            columns = table.headers.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "CSV cleaned"
        );

        Ok(output)
    }
}

/// Apply the clean transforms in order: column restriction, trimming, then
/// deduplication. Trimming first lets rows equal only after trimming collapse.
/// Returns the number of duplicate rows removed.
pub fn apply_clean(table: &mut CsvTable, options: &CleanOptions) -> usize {
    if options.is_noop() {
        return 0;
    }

    if !options.keep_columns.is_empty() && !table.retain_columns(&options.keep_columns) {
        tracing::debug!(
            requested = ?options.keep_columns,
            "None of the requested columns exist; keeping all columns"
        );
    }

    if options.trim_spaces {
        table.trim_cells();
    }

    if options.drop_duplicates {
        table.drop_duplicates()
    } else {
        0
    }
}
