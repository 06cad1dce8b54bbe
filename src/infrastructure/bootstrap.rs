use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::web;
use tracing::error;

use crate::application::use_cases::contacts::ContactUseCase;
use crate::application::use_cases::csv_cleaner::CsvCleaner;
use crate::application::use_cases::expenses::ExpenseUseCase;
use crate::application::use_cases::upload_cache::UploadCache;
use crate::application::use_cases::web_scraper::WebScraper;
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::connection::init_db;
use crate::infrastructure::db::contacts::ContactRepository;
use crate::infrastructure::db::expenses::ExpenseRepository;
use crate::interfaces::http::{add_log, HttpState, LogEntry};

/// Shortest interval between sweeps of expired CSV uploads.
const MIN_SWEEP_SECS: u64 = 30;

/// Open the database and wire every tool's use case into the shared HTTP state.
pub async fn build_state(config: &AppConfig) -> Result<web::Data<HttpState>> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let pool = init_db(&config.database.url, config.database.max_connections)
        .await
        .map_err(|err| {
            error!(error = %err, url = %config.database.url, "Failed to initialize database");
            err
        })?;
    add_log(
        &logs,
        "INFO",
        "Database",
        &format!("Database ready at {}", config.database.url),
    );

    let contacts = ContactUseCase::new(Arc::new(ContactRepository::new(pool.clone())));
    let expenses = ExpenseUseCase::new(Arc::new(ExpenseRepository::new(pool)));

    let cache = Arc::new(UploadCache::new(
        config.csv.cache_capacity,
        config.csv.cache_ttl_secs,
    ));
    spawn_cache_sweeper(cache.clone(), config.csv.cache_ttl_secs);
    let csv_cleaner = CsvCleaner::new(cache, config.csv.preview_rows);

    let scraper = WebScraper::with_config(
        config.scraper.timeout_secs,
        &config.scraper.user_agent,
        config.scraper.max_results,
    )?;

    Ok(web::Data::new(HttpState {
        contacts,
        expenses,
        csv_cleaner,
        scraper,
        logs,
        max_upload_bytes: config.csv.max_upload_bytes,
    }))
}

fn spawn_cache_sweeper(cache: Arc<UploadCache>, ttl_secs: u64) {
    let period = Duration::from_secs((ttl_secs / 2).max(MIN_SWEEP_SECS));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            cache.cleanup();
            let stats = cache.stats();
            tracing::debug!(
                entries = stats.total_entries,
                hits = stats.hits,
                misses = stats.misses,
                "Upload cache swept"
            );
        }
    });
}
