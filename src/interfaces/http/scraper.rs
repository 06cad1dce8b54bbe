use actix_web::{get, post, web, Responder};

use super::forms::ScrapeForm;
use super::views::{self, ScrapeView};
use super::{add_log, html, HttpState};

#[get("/scraper")]
async fn scraper_home() -> impl Responder {
    html(views::scraper_page(&ScrapeView::default()))
}

/// Fetch failures are rendered inline with a 200 so the form stays usable.
#[post("/scraper/run")]
async fn run_scrape(data: web::Data<HttpState>, form: web::Form<ScrapeForm>) -> impl Responder {
    let form = form.into_inner();
    add_log(
        &data.logs,
        "INFO",
        "Scraper",
        &format!("Scraping {} (selector={})", form.url, form.selector),
    );

    let outcome = data.scraper.scrape(&form.url, &form.selector).await;
    let (results, error) = match &outcome {
        Ok(results) => (Some(results.as_slice()), None),
        Err(e) => {
            add_log(&data.logs, "WARN", "Scraper", &format!("Scrape failed: {}", e));
            (None, Some(e.to_string()))
        }
    };

    html(views::scraper_page(&ScrapeView {
        url: &form.url,
        selector: &form.selector,
        results,
        error: error.as_deref(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(scraper_home).service(run_scrape);
}
