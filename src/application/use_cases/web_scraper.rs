use crate::domain::error::{AppError, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

pub const DEFAULT_SELECTOR: &str = "p";
pub const DEFAULT_MAX_RESULTS: usize = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Text inside these elements is never shown to a reader.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

pub struct WebScraper {
    client: Client,
    max_results: usize,
}

impl WebScraper {
    pub fn with_config(timeout_secs: u64, user_agent: &str, max_results: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_results,
        })
    }

    /// Fetch `url` and return the text of up to `max_results` elements matching `selector`.
    pub async fn scrape(&self, url: &str, selector: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        let url = url::Url::parse(url.trim())
            .map_err(|e| AppError::ValidationError(format!("Invalid URL: {}", e)))?;

        let html = self.fetch(url.as_str()).await?;
        let results = extract_text(&html, &selector, self.max_results);

        tracing::info!(url = %url, matches = results.len(), "Scrape finished");
        Ok(results)
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch URL: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::NetworkError(format!(
                "HTTP error {}: {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to read response body: {}", e)))
    }
}

/// Parse a CSS selector; a blank one means `p`.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    let selector = match selector.trim() {
        "" => DEFAULT_SELECTOR,
        s => s,
    };
    Selector::parse(selector)
        .map_err(|e| AppError::ValidationError(format!("Invalid CSS selector {:?}: {}", selector, e)))
}

/// Visible text of each matching element in document order, capped at `limit`.
pub fn extract_text(html: &str, selector: &Selector, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .take(limit)
        .map(visible_text)
        .collect()
}

fn visible_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|el| HIDDEN_TAGS.contains(&el.name()));
        if !hidden {
            text.push_str(fragment);
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};

    const FIXTURE: &str = r#"<html><head><title>Fixture</title>
        <style>p { color: red; }</style></head>
        <body>
          <p>  First paragraph  </p>
          <div><p>Second <b>bold</b>
              text</p></div>
          <p>Third<script>var hidden = 1;</script></p>
          <span>not a paragraph</span>
        </body></html>"#;

    #[test]
    fn test_extract_three_paragraphs_in_order() {
        let selector = parse_selector("p").unwrap();
        let results = extract_text(FIXTURE, &selector, DEFAULT_MAX_RESULTS);
        assert_eq!(
            results,
            vec!["First paragraph", "Second bold text", "Third"]
        );
    }

    #[test]
    fn test_extract_respects_limit() {
        let html: String = (0..60).map(|i| format!("<li>item {}</li>", i)).collect();
        let selector = parse_selector("li").unwrap();
        let results = extract_text(&format!("<ul>{}</ul>", html), &selector, 50);
        assert_eq!(results.len(), 50);
        assert_eq!(results[0], "item 0");
        assert_eq!(results[49], "item 49");
    }

    #[test]
    fn test_blank_selector_defaults_to_paragraphs() {
        let selector = parse_selector("   ").unwrap();
        assert_eq!(extract_text(FIXTURE, &selector, 50).len(), 3);
    }

    #[test]
    fn test_invalid_selector_is_validation_error() {
        let err = parse_selector("p[").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    async fn serve_fixture() -> (String, actix_web::dev::ServerHandle) {
        let server = HttpServer::new(|| {
            App::new()
                .route(
                    "/page",
                    web::get().to(|| async {
                        HttpResponse::Ok()
                            .content_type("text/html; charset=utf-8")
                            .body(FIXTURE)
                    }),
                )
                .route(
                    "/missing",
                    web::get().to(|| async { HttpResponse::NotFound().body("gone") }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}", addr), handle)
    }

    fn scraper() -> WebScraper {
        WebScraper::with_config(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_MAX_RESULTS)
            .unwrap()
    }

    #[actix_web::test]
    async fn test_scrape_live_page() {
        let (base, handle) = serve_fixture().await;
        let results = scraper().scrape(&format!("{}/page", base), "p").await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], "First paragraph");
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_scrape_404_is_network_error() {
        let (base, handle) = serve_fixture().await;
        let err = scraper()
            .scrape(&format!("{}/missing", base), "p")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NetworkError(_)));
        assert!(err.to_string().contains("404"));
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_scrape_invalid_url_is_validation_error() {
        let err = scraper().scrape("not a url", "p").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
