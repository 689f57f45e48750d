//! Listing-page traversal: page-count discovery and sequential collection.
//!
//! The dashboard paginates both listings (`/dashboard` and
//! `/dashboard/archived`) with a `?page=N` query parameter and renders a
//! `ul.pagination` control whose last item is the "next" affordance; the
//! second-to-last item therefore carries the highest page number. A listing
//! short enough to have no control (or a control with no parsable number)
//! is a single page.

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};

use crate::client::DashboardClient;
use crate::error::ScrapeError;
use crate::extract;
use crate::types::CardSummary;

static PAGINATION_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.pagination li").expect("pagination selector is valid"));

/// Reads the total page count from a listing document.
///
/// Resolves to the integer text of the pagination control's second-to-last
/// item, or 1 when the control is missing, too short, or unparsable;
/// never 0 and never an error.
#[must_use]
pub fn total_pages(doc: &Html) -> u32 {
    let items: Vec<_> = doc.select(&PAGINATION_ITEM).collect();
    items
        .len()
        .checked_sub(2)
        .and_then(|idx| items.get(idx))
        .and_then(|el| el.text().collect::<String>().trim().parse::<u32>().ok())
        .unwrap_or(1)
}

/// Collects every card summary from one paginated listing.
///
/// Fetches `build_url(1)` to read the page count, then walks pages
/// `1..=total` in order (page 1 is fetched again by the walk), extracting
/// one [`CardSummary`] per card container in document order. The returned
/// list preserves page order and within-page order; nothing is deduplicated.
///
/// # Errors
///
/// Propagates fetch failures ([`ScrapeError::Http`],
/// [`ScrapeError::UnexpectedStatus`]) and extraction failures
/// ([`ScrapeError::DateParse`]) from any page; a partial walk is never
/// returned.
pub async fn collect_cards<F>(
    client: &DashboardClient,
    base: &Url,
    build_url: F,
    session: &str,
) -> Result<Vec<CardSummary>, ScrapeError>
where
    F: Fn(u32) -> String,
{
    let first_url = build_url(1);
    let total = total_pages(&client.fetch_page(&first_url, Some(session)).await?);
    tracing::debug!(total, url = %first_url, "resolved listing page count");

    let mut cards = Vec::new();
    for page in 1..=total {
        let url = build_url(page);
        let page_cards = {
            let doc = client.fetch_page(&url, Some(session)).await?;
            extract::card_containers(&doc)
                .map(|container| extract::extract_card(container, base))
                .collect::<Result<Vec<_>, _>>()?
        };
        tracing::info!(page, count = page_cards.len(), "collected listing page");
        cards.extend(page_cards);
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(pagination: &str) -> Html {
        Html::parse_document(&format!(
            r#"<div class="card"></div><ul class="pagination">{pagination}</ul>"#
        ))
    }

    #[test]
    fn reads_second_to_last_pagination_item() {
        let doc = listing("<li>1</li><li>2</li><li>3</li><li>Next</li>");
        assert_eq!(total_pages(&doc), 3);
    }

    #[test]
    fn two_item_control_reads_the_first() {
        let doc = listing("<li>2</li><li>Next</li>");
        assert_eq!(total_pages(&doc), 2);
    }

    #[test]
    fn unparsable_item_defaults_to_one() {
        let doc = listing("<li>1</li><li>…</li><li>Next</li>");
        assert_eq!(total_pages(&doc), 1);
    }

    #[test]
    fn missing_control_defaults_to_one() {
        let doc = Html::parse_document(r#"<div class="card"></div>"#);
        assert_eq!(total_pages(&doc), 1);
    }

    #[test]
    fn single_item_control_defaults_to_one() {
        let doc = listing("<li>Next</li>");
        assert_eq!(total_pages(&doc), 1);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let doc = listing("<li>1</li><li>\n  12  </li><li>Next</li>");
        assert_eq!(total_pages(&doc), 12);
    }
}
