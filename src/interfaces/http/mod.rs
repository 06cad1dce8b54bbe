use actix_web::middleware::Logger;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::application::use_cases::contacts::ContactUseCase;
use crate::application::use_cases::csv_cleaner::CsvCleaner;
use crate::application::use_cases::expenses::ExpenseUseCase;
use crate::application::use_cases::web_scraper::WebScraper;
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

mod contacts;
mod csv_tools;
mod expenses;
pub mod forms;
mod scraper;
mod upload;
pub mod views;

#[cfg(test)]
mod test_support;

const MAX_LOG_ENTRIES: usize = 100;
const STYLESHEET: &str = include_str!("../../../static/styles.css");

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub contacts: ContactUseCase,
    pub expenses: ExpenseUseCase,
    pub csv_cleaner: CsvCleaner,
    pub scraper: WebScraper,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    pub max_upload_bytes: usize,
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub(crate) fn error_response(error: &AppError) -> HttpResponse {
    let mut builder = match error {
        AppError::ValidationError(_) | AppError::ParseError(_) => HttpResponse::BadRequest(),
        AppError::NotFound(_) => HttpResponse::NotFound(),
        AppError::NetworkError(_) => HttpResponse::BadGateway(),
        _ => HttpResponse::InternalServerError(),
    };
    builder
        .content_type("text/plain; charset=utf-8")
        .body(error.to_string())
}

/// Form extractor settings: size cap plus a plain-text 400 for bodies that
/// do not match the typed form.
pub(crate) fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = format!("Invalid form submission: {}", err);
            let response = HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(message);
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body(format!("Invalid query string: {}", err));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

#[get("/")]
async fn index() -> impl Responder {
    html(views::index_page())
}

#[get("/static/styles.css")]
async fn stylesheet() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(STYLESHEET)
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(|p| p.into_inner());
    HttpResponse::Ok().json(&*logs)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(stylesheet).service(get_logs);
    csv_tools::configure(cfg);
    contacts::configure(cfg);
    expenses::configure(cfg);
    scraper::configure(cfg);
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|p| p.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

/// Record a message in the in-memory log and emit it as a tracing event.
pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        "DEBUG" => tracing::debug!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }
    add_log_entry(logs, level, source, message);
}

pub fn start_server(state: web::Data<HttpState>, config: &AppConfig) -> std::io::Result<Server> {
    let form_limit = config.csv.max_upload_bytes;
    let (host, port) = config.bind_address();

    add_log(
        &state.logs,
        "INFO",
        "HttpServer",
        &format!("Listening on http://{}:{}", host, port),
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(form_config(form_limit))
            .app_data(query_config())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::test_support::test_state;
    use super::*;
    use actix_web::{test, App};

    #[::core::prelude::v1::test]
    fn test_log_ring_is_bounded() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            add_log_entry(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }

    #[::core::prelude::v1::test]
    fn test_error_response_status() {
        assert_eq!(
            error_response(&AppError::ValidationError("x".into())).status(),
            400
        );
        assert_eq!(error_response(&AppError::NotFound("x".into())).status(), 404);
        assert_eq!(
            error_response(&AppError::NetworkError("x".into())).status(),
            502
        );
        assert_eq!(
            error_response(&AppError::DatabaseError("x".into())).status(),
            500
        );
    }

    #[actix_web::test]
    async fn test_index_and_stylesheet() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(r#"href="/scraper""#));

        let req = test::TestRequest::get().uri("/static/styles.css").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get("content-type").unwrap(), "text/css; charset=utf-8");
    }

    #[actix_web::test]
    async fn test_logs_endpoint_returns_entries() {
        let state = test_state().await;
        add_log(&state.logs, "INFO", "Test", "hello");
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/logs").to_request();
        let entries: Vec<LogEntry> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "hello");
    }
}
