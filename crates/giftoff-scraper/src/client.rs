//! HTTP retrieval of dashboard, order-detail, and voucher pages.
//!
//! Every request carries a fixed baseline of browser-navigation headers so
//! the dashboard serves the same markup it serves a real browser. Dashboard
//! and order-detail pages additionally authenticate with a `PHPSESSID`
//! session cookie. Voucher pages are fetched without it: they are publicly
//! reachable once their URL is known, and the exporter preserves that split
//! exactly as the site exhibits it.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, Url};
use scraper::Html;

use crate::error::ScrapeError;

/// Browser user-agent sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// HTTP client for the gift-card dashboard.
///
/// Requests carry no timeout and are never retried: a hung or flaky
/// dashboard request surfaces at the run level instead of being papered
/// over. Non-success statuses are returned as
/// [`ScrapeError::UnexpectedStatus`] rather than parsed as if they were
/// dashboard markup.
pub struct DashboardClient {
    client: Client,
}

impl DashboardClient {
    /// Creates a `DashboardClient` with the baseline navigation headers.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .default_headers(baseline_headers())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one URL and parses the body into a queryable document.
    ///
    /// When `session` is `Some`, the request carries
    /// `Cookie: PHPSESSID=<session>;`, which is how dashboard and
    /// order-detail pages authenticate. Voucher pages are fetched with
    /// `session = None`.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`]: network or TLS failure.
    /// - [`ScrapeError::UnexpectedStatus`]: any non-2xx response; the body
    ///   of an error page is never fed to the extractor.
    pub async fn fetch_page(
        &self,
        url: &str,
        session: Option<&str>,
    ) -> Result<Html, ScrapeError> {
        tracing::debug!(url, authenticated = session.is_some(), "fetching page");

        let mut request = self.client.get(url);
        if let Some(session) = session {
            request = request.header(COOKIE, format!("PHPSESSID={session};"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        Ok(Html::parse_document(&body))
    }
}

/// Parses the dashboard origin supplied on the command line.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidBaseUrl`] when `raw` is not an absolute
/// URL; relative-link resolution would be meaningless without one.
pub fn parse_base_url(raw: &str) -> Result<Url, ScrapeError> {
    Url::parse(raw).map_err(|e| ScrapeError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Builds the active-dashboard listing URL for `page`.
#[must_use]
pub fn dashboard_page_url(base: &Url, page: u32) -> String {
    format!("{}/dashboard?page={page}", base_origin(base))
}

/// Builds the archived-dashboard listing URL for `page`.
#[must_use]
pub fn archived_page_url(base: &Url, page: u32) -> String {
    format!("{}/dashboard/archived?page={page}", base_origin(base))
}

fn base_origin(base: &Url) -> String {
    base.as_str().trim_end_matches('/').to_owned()
}

/// Fixed request headers mimicking a standard browser navigation.
fn baseline_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "accept",
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        "accept-language",
        HeaderValue::from_static("en-GB,en;q=0.9"),
    );
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static("\"Chromium\";v=\"122\", \"Not(A:Brand\";v=\"24\""),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
