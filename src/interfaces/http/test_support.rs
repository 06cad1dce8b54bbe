use actix_web::web;
use std::sync::{Arc, Mutex};

use super::HttpState;
use crate::application::use_cases::contacts::ContactUseCase;
use crate::application::use_cases::csv_cleaner::{CsvCleaner, DEFAULT_PREVIEW_ROWS};
use crate::application::use_cases::expenses::ExpenseUseCase;
use crate::application::use_cases::upload_cache::UploadCache;
use crate::application::use_cases::web_scraper::{
    WebScraper, DEFAULT_MAX_RESULTS, DEFAULT_USER_AGENT,
};
use crate::infrastructure::db::connection::init_db;
use crate::infrastructure::db::contacts::ContactRepository;
use crate::infrastructure::db::expenses::ExpenseRepository;

const BOUNDARY: &str = "----data-tools-hub-test";

pub async fn test_state() -> web::Data<HttpState> {
    let pool = init_db("sqlite::memory:", 1).await.unwrap();
    let cache = Arc::new(UploadCache::new(8, 60));

    web::Data::new(HttpState {
        contacts: ContactUseCase::new(Arc::new(ContactRepository::new(pool.clone()))),
        expenses: ExpenseUseCase::new(Arc::new(ExpenseRepository::new(pool))),
        csv_cleaner: CsvCleaner::new(cache, DEFAULT_PREVIEW_ROWS),
        scraper: WebScraper::with_config(2, DEFAULT_USER_AGENT, DEFAULT_MAX_RESULTS).unwrap(),
        logs: Arc::new(Mutex::new(Vec::new())),
        max_upload_bytes: 64 * 1024,
    })
}

/// Single-file multipart body; returns the content type header and payload.
pub fn multipart_body(field: &str, filename: &str, content: &str) -> (String, String) {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n--{b}--\r\n",
        b = BOUNDARY,
        field = field,
        filename = filename,
        content = content
    );
    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
