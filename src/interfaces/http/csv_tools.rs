use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};

use super::forms::CleanForm;
use super::upload::read_text_field;
use super::{add_log, error_response, html, views, HttpState};

#[get("/csv")]
async fn csv_home() -> impl Responder {
    html(views::csv_page(None, None))
}

#[post("/csv/preview")]
async fn csv_preview(data: web::Data<HttpState>, payload: Multipart) -> impl Responder {
    let content = match read_text_field(payload, "file", data.max_upload_bytes).await {
        Ok(content) => content,
        Err(e) => {
            return HttpResponse::BadRequest()
                .content_type("text/html; charset=utf-8")
                .body(views::csv_page(None, Some(&e.to_string())))
        }
    };

    match data.csv_cleaner.preview(content) {
        Ok(preview) => html(views::csv_page(Some(&preview), None)),
        Err(e) => {
            add_log(&data.logs, "WARN", "CsvTools", &format!("Preview failed: {}", e));
            HttpResponse::BadRequest()
                .content_type("text/html; charset=utf-8")
                .body(views::csv_page(None, Some(&e.to_string())))
        }
    }
}

#[post("/csv/clean")]
async fn csv_clean(data: web::Data<HttpState>, form: web::Form<CleanForm>) -> impl Responder {
    let form = form.into_inner();
    let options = form.options();

    let cached = form
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .and_then(|t| data.csv_cleaner.cached_upload(t));

    let content = match (cached, form.raw) {
        (Some(cached), _) => cached.to_string(),
        (None, Some(raw)) if !raw.is_empty() => raw,
        _ => {
            return HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body("No CSV provided")
        }
    };

    match data.csv_cleaner.clean(&content, &options) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header(("Content-Disposition", "attachment; filename=cleaned.csv"))
            .body(bytes),
        Err(e) => {
            add_log(&data.logs, "WARN", "CsvTools", &format!("Clean failed: {}", e));
            error_response(&e)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(csv_home).service(csv_preview).service(csv_clean);
}
