use actix_multipart::Multipart;
use futures_util::TryStreamExt;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;

/// Read the multipart field named `field_name` as text, capped at `max_bytes`.
/// Other fields are drained and ignored.
pub async fn read_text_field(
    mut payload: Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<String> {
    let mut found: Option<Vec<u8>> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("Malformed multipart body: {}", e)))?
    {
        let wanted = found.is_none() && field.name() == Some(field_name);
        let mut buffer = Vec::new();

        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("Failed to read upload: {}", e)))?
        {
            if !wanted {
                continue;
            }
            if buffer.len() + chunk.len() > max_bytes {
                return Err(AppError::ValidationError(format!(
                    "Upload exceeds the {} byte limit",
                    max_bytes
                )));
            }
            buffer.extend_from_slice(&chunk);
        }

        if wanted {
            found = Some(buffer);
        }
    }

    let bytes = found.ok_or_else(|| {
        AppError::ValidationError(format!("Missing upload field '{}'", field_name))
    })?;
    Ok(CsvParser::decode_upload(&bytes))
}
