//! Record types produced by the extraction pipeline.
//!
//! All three types are plain data: constructed once by their extractor and
//! never mutated afterwards. Every field is optional because extraction is
//! purely structural: a card with no expiry element simply has no expiry,
//! and the output layer renders the gap as an empty column.

/// One gift card as summarized on a dashboard listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    /// Trimmed text of the card's title element.
    pub title: Option<String>,
    /// Trimmed text of the card's monetary-value element, e.g. `"£25.00"`.
    pub value: Option<String>,
    /// Normalized expiry date (`YYYY-MM-DD`), taken from the text after the
    /// first colon of the expiry element.
    pub expiry: Option<String>,
    /// Absolute URL of the card's voucher page (the "view" action link).
    /// Cards without one are skipped by the pipeline; no record is emitted.
    pub voucher_url: Option<String>,
    /// Absolute URL of the card's order-detail page. Several cards from the
    /// same order share one detail URL.
    pub detail_url: Option<String>,
}

/// Order metadata parsed from one order-detail page.
///
/// Cached by detail URL in [`crate::cache::OrderDetailCache`]; `Clone` is
/// what lets the cache hand out value-copies on repeat lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    /// Normalized purchase date (`YYYY-MM-DD`).
    pub purchase_date: Option<String>,
    pub status: Option<String>,
    pub order_id: Option<String>,
    pub order_total: Option<String>,
}

/// The final per-card output record.
///
/// `order` is `Some` exactly when the card carried a detail link; when it is
/// `None` the output line ends after the expiry column instead of rendering
/// four empty order columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub title: Option<String>,
    pub voucher_code: Option<String>,
    pub value: Option<String>,
    pub expiry: Option<String>,
    pub order: Option<OrderDetails>,
}
