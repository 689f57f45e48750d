//! Memoized order-detail retrieval.
//!
//! Several cards bought in one order link to the same detail page; the
//! cache guarantees each distinct detail URL is fetched and parsed at most
//! once per run. The cache is constructed by the pipeline and lives exactly
//! as long as one run; nothing is ever invalidated or evicted. Access is
//! single-threaded (`&mut self`); introducing concurrent fetches would
//! require converting this to a single-flight structure so two requests for
//! the same URL cannot race to fetch twice.

use std::collections::HashMap;

use crate::client::DashboardClient;
use crate::error::ScrapeError;
use crate::extract;
use crate::types::OrderDetails;

/// Per-run memo of detail-page URL → extracted [`OrderDetails`].
#[derive(Debug, Default)]
pub struct OrderDetailCache {
    entries: HashMap<String, OrderDetails>,
}

impl OrderDetailCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the order details behind `detail_url`, fetching and parsing
    /// the page only on the first call for that URL. Later calls return a
    /// value-copy of the stored result without touching the network.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] / [`ScrapeError::UnexpectedStatus`]: the
    ///   authenticated detail fetch failed.
    /// - [`ScrapeError::MissingContainer`]: the page has no card container
    ///   at all; the structural contract is broken, so this aborts the run
    ///   rather than defaulting to empty fields.
    /// - [`ScrapeError::DateParse`]: the purchase date no longer matches
    ///   the expected rendering.
    pub async fn get_or_fetch(
        &mut self,
        client: &DashboardClient,
        detail_url: &str,
        session: &str,
    ) -> Result<OrderDetails, ScrapeError> {
        if let Some(details) = self.entries.get(detail_url) {
            tracing::debug!(url = detail_url, "order-detail cache hit");
            return Ok(details.clone());
        }

        let details = {
            let doc = client.fetch_page(detail_url, Some(session)).await?;
            let container = extract::first_card_container(&doc).ok_or_else(|| {
                ScrapeError::MissingContainer {
                    url: detail_url.to_owned(),
                }
            })?;
            extract::extract_order(container)?
        };

        self.entries.insert(detail_url.to_owned(), details.clone());
        Ok(details)
    }

    /// Number of distinct detail pages fetched so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
