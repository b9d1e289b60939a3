use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;
use url::Url;

pub const DEFAULT_SOURCE: &str = "https://etherscan.io/tokens";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// The listing site serves bot-check pages to unknown clients; present a
// plain desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// True when the source names an http(s) document rather than a local file.
pub fn is_http_url(source: &str) -> bool {
    Url::parse(source)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Resolve the source argument to HTML text. URLs are fetched once over
/// HTTP(S); anything else is treated as a local file path.
pub async fn load_source(source: &str) -> Result<String> {
    if is_http_url(source) {
        return fetch_url(source).await;
    }

    let path = Path::new(source);
    if path.is_file() {
        info!("Reading local file: {}", source);
        let bytes = fs::read(path).with_context(|| format!("Failed to read {source}"))?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    bail!("Source is neither an http(s) URL nor an existing file: {source}");
}

async fn fetch_url(url: &str) -> Result<String> {
    info!("Fetching listing page: {}", url);

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("Bad response from {url}"))?;

    response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::mock;

    #[test]
    fn url_detection() {
        assert!(is_http_url("https://etherscan.io/tokens"));
        assert!(is_http_url("http://127.0.0.1:8080/page"));
        assert!(!is_http_url("tokens.html"));
        assert!(!is_http_url("pages/tokens.html"));
        assert!(!is_http_url(r"C:\pages\tokens.html"));
        assert!(!is_http_url("ftp://example.com/tokens"));
    }

    #[tokio::test]
    async fn loads_local_file() {
        let html = load_source("tests/fixtures/tokens.html").await.unwrap();
        assert!(html.contains("/token/"));
    }

    #[tokio::test]
    async fn missing_source_is_an_error() {
        let err = load_source("no/such/file.html").await.unwrap_err();
        assert!(err.to_string().contains("no/such/file.html"));
    }

    #[tokio::test]
    async fn non_utf8_file_is_decoded_lossily() {
        let path = std::env::temp_dir().join("token_scraper_latin1_test.html");
        fs::write(&path, b"<html><body>caf\xe9 $1.00</body></html>").unwrap();

        let html = load_source(path.to_str().unwrap()).await.unwrap();
        assert!(html.contains("$1.00"));

        fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn fetches_over_http() {
        let _m = mock("GET", "/tokens")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>listing</body></html>")
            .create();

        let url = format!("{}/tokens", mockito::server_url());
        let html = load_source(&url).await.unwrap();
        assert_eq!(html, "<html><body>listing</body></html>");
    }

    #[tokio::test]
    async fn non_2xx_response_is_an_error() {
        let _m = mock("GET", "/down").with_status(503).create();

        let url = format!("{}/down", mockito::server_url());
        assert!(load_source(&url).await.is_err());
    }
}
