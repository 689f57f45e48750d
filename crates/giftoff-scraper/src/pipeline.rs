//! The export pipeline: two listing walks, then per-card record assembly.
//!
//! Processing is strictly sequential: one card's voucher and detail
//! fetches complete before the next card starts. That bounds the load put
//! on the dashboard and makes total runtime linear in card count times
//! round-trip latency. Any failure above the field-absence tier aborts the
//! whole run: emitting records with silently missing voucher data is worse
//! than a loud failure.

use reqwest::Url;

use crate::cache::OrderDetailCache;
use crate::client::{self, DashboardClient};
use crate::error::ScrapeError;
use crate::extract;
use crate::pagination;
use crate::types::{CardRecord, CardSummary};

/// Runs the full export: walks the active dashboard, then the archived
/// dashboard, and assembles one [`CardRecord`] per card that has a voucher
/// page. Cards without one are skipped silently; no record is emitted for
/// them. The output preserves traversal order (active listing first, then
/// archived; page order and within-page order inside each). A card present
/// in both listings produces two records.
///
/// # Errors
///
/// Propagates the first fetch, structural, or date failure from any page;
/// no partial record list is returned.
pub async fn export_cards(
    client: &DashboardClient,
    base: &Url,
    session: &str,
) -> Result<Vec<CardRecord>, ScrapeError> {
    let active = pagination::collect_cards(
        client,
        base,
        |page| client::dashboard_page_url(base, page),
        session,
    )
    .await?;
    tracing::info!(count = active.len(), "walked active dashboard");

    let archived = pagination::collect_cards(
        client,
        base,
        |page| client::archived_page_url(base, page),
        session,
    )
    .await?;
    tracing::info!(count = archived.len(), "walked archived dashboard");

    let mut cache = OrderDetailCache::new();
    let mut records = Vec::new();
    for card in active.into_iter().chain(archived) {
        if let Some(record) = assemble_record(client, &mut cache, card, session).await? {
            records.push(record);
        }
    }

    tracing::info!(
        records = records.len(),
        detail_pages = cache.len(),
        "export complete"
    );
    Ok(records)
}

/// Builds the combined record for one card, or `None` when the card has no
/// voucher page to visit.
async fn assemble_record(
    client: &DashboardClient,
    cache: &mut OrderDetailCache,
    card: CardSummary,
    session: &str,
) -> Result<Option<CardRecord>, ScrapeError> {
    let Some(voucher_url) = card.voucher_url else {
        tracing::debug!(
            title = card.title.as_deref().unwrap_or("<untitled>"),
            "card has no voucher page, skipping"
        );
        return Ok(None);
    };

    // Voucher pages are fetched without the session cookie.
    let voucher_code = {
        let doc = client.fetch_page(&voucher_url, None).await?;
        extract::voucher_code(&doc)
    };

    let order = match card.detail_url.as_deref() {
        Some(detail_url) => Some(cache.get_or_fetch(client, detail_url, session).await?),
        None => None,
    };

    Ok(Some(CardRecord {
        title: card.title,
        voucher_code,
        value: card.value,
        expiry: card.expiry,
        order,
    }))
}
