// ============================================================
// CSV PARSER
// ============================================================
// Read CSV text into a table and write a table back out as CSV bytes

use crate::domain::csv::CsvTable;
use crate::domain::error::AppError;
use csv::{ReaderBuilder, WriterBuilder};

const DELIMITER: u8 = b',';

/// Comma-separated reader/writer
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSV text. The first record is the header row; cells keep their whitespace.
    pub fn parse_content(&self, content: &str) -> Result<CsvTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AppError::ParseError(
                "CSV has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > headers.len() {
                tracing::warn!(
                    row = index + 1,
                    fields = record.len(),
                    columns = headers.len(),
                    "CSV row has more fields than headers; extra fields dropped"
                );
            }

            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(CsvTable::new(headers, rows))
    }

    /// Serialize a table with a header row and no index column.
    pub fn write_table(&self, table: &CsvTable) -> Result<Vec<u8>, AppError> {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(Vec::new());

        writer
            .write_record(&table.headers)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

        for row in &table.rows {
            writer
                .write_record(row)
                .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))
    }

    /// Decode uploaded bytes as UTF-8, honouring a BOM and replacing malformed sequences.
    pub fn decode_upload(bytes: &[u8]) -> String {
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            tracing::warn!("Upload contained invalid UTF-8; malformed sequences replaced");
        }
        text.into_owned()
    }
}
