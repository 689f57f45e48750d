//! Structural field extraction over the dashboard's fixed markup contract.
//!
//! Extraction is purely positional/structural, not semantic: every field is
//! located by a CSS selector (or a fixed child index) that must match the
//! live site's markup exactly. The selectors live in one table per field
//! family, each entry pairing a field identifier with a [`FieldRule`], and a
//! single interpreter evaluates rules against a container element. A missing
//! target sub-element always resolves to `None`; only date-format drift is a
//! hard error (see [`crate::dates`]).
//!
//! ## Markup contract
//!
//! - Card container (listing *and* detail pages): `div.card`
//! - Voucher-page link inside a card: `a.view`
//! - Order-detail-page link inside a card: `a.details`
//! - Title / value / expiry elements: `.card-title`, `.card-value`,
//!   `.card-expiry` (expiry text is `Expires: March 05, 2024`; the part
//!   after the first colon is the date)
//! - Order fields on a detail page: the `.order-detail` children of the
//!   first card container, at fixed positions: order id, purchase date,
//!   status, order total
//! - Voucher code on a voucher page: `.voucher-code`

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::dates::{self, SourceFormat};
use crate::error::ScrapeError;
use crate::types::{CardSummary, OrderDetails};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector table entries are valid CSS")
}

static CARD: LazyLock<Selector> = LazyLock::new(|| selector("div.card"));
static VIEW_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.view"));
static DETAIL_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.details"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".card-title"));
static VALUE: LazyLock<Selector> = LazyLock::new(|| selector(".card-value"));
static EXPIRY: LazyLock<Selector> = LazyLock::new(|| selector(".card-expiry"));
static ORDER_DETAIL: LazyLock<Selector> = LazyLock::new(|| selector(".order-detail"));
static VOUCHER_CODE: LazyLock<Selector> = LazyLock::new(|| selector(".voucher-code"));

/// Everything after the first colon of the expiry element's text.
static AFTER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(.*)").expect("after-colon pattern is valid"));

/// How one field is pulled out of a container element.
#[derive(Debug, Clone, Copy)]
enum FieldRule {
    /// Trimmed text of the first selector match.
    Text(&'static LazyLock<Selector>),
    /// `href` of the first selector match, resolved against the page base
    /// when one is supplied.
    Href(&'static LazyLock<Selector>),
    /// Text of the first selector match, captured after the first colon,
    /// then date-normalized.
    LabeledDate(&'static LazyLock<Selector>, SourceFormat),
    /// Trimmed text of the n-th selector match (0-based).
    NthText(&'static LazyLock<Selector>, usize),
    /// Trimmed text of the n-th selector match, date-normalized.
    NthDate(&'static LazyLock<Selector>, usize, SourceFormat),
}

#[derive(Debug, Clone, Copy)]
enum CardField {
    VoucherUrl,
    DetailUrl,
    Title,
    Value,
    Expiry,
}

#[derive(Debug, Clone, Copy)]
enum OrderField {
    OrderId,
    PurchaseDate,
    Status,
    OrderTotal,
}

/// Card-info extraction table: the complete five-field set of a
/// [`CardSummary`]. Order matters only for readability; every rule is
/// evaluated on every card.
static CARD_RULES: [(CardField, FieldRule); 5] = [
    (CardField::VoucherUrl, FieldRule::Href(&VIEW_LINK)),
    (CardField::DetailUrl, FieldRule::Href(&DETAIL_LINK)),
    (CardField::Title, FieldRule::Text(&TITLE)),
    (CardField::Value, FieldRule::Text(&VALUE)),
    (
        CardField::Expiry,
        FieldRule::LabeledDate(&EXPIRY, SourceFormat::MonthDayYear),
    ),
];

/// Order-detail extraction table: the complete four-field set of an
/// [`OrderDetails`], read from fixed child positions.
static ORDER_RULES: [(OrderField, FieldRule); 4] = [
    (OrderField::OrderId, FieldRule::NthText(&ORDER_DETAIL, 0)),
    (
        OrderField::PurchaseDate,
        FieldRule::NthDate(&ORDER_DETAIL, 1, SourceFormat::OrdinalDayMonthYear),
    ),
    (OrderField::Status, FieldRule::NthText(&ORDER_DETAIL, 2)),
    (OrderField::OrderTotal, FieldRule::NthText(&ORDER_DETAIL, 3)),
];

/// Evaluates one [`FieldRule`] against a container element.
///
/// # Errors
///
/// Only date rules can fail, via [`ScrapeError::DateParse`]. Every
/// absent-target case is `Ok(None)`.
fn apply(
    rule: FieldRule,
    container: ElementRef<'_>,
    base: Option<&Url>,
) -> Result<Option<String>, ScrapeError> {
    match rule {
        FieldRule::Text(sel) => Ok(container.select(sel).next().map(collect_text)),
        FieldRule::Href(sel) => Ok(container
            .select(sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|href| resolve_href(href, base))),
        FieldRule::LabeledDate(sel, format) => {
            let raw = container
                .select(sel)
                .next()
                .map(|el| el.text().collect::<String>());
            let captured = raw
                .as_deref()
                .and_then(|text| AFTER_COLON.captures(text))
                .map(|caps| caps[1].to_owned());
            dates::normalize(captured.as_deref(), format)
        }
        FieldRule::NthText(sel, index) => Ok(container.select(sel).nth(index).map(collect_text)),
        FieldRule::NthDate(sel, index, format) => {
            let raw = container
                .select(sel)
                .nth(index)
                .map(|el| el.text().collect::<String>());
            dates::normalize(raw.as_deref(), format)
        }
    }
}

/// Extracts one [`CardSummary`] from a listing-page card container.
///
/// Link fields are resolved against `base` so relative dashboard hrefs come
/// out absolute.
///
/// # Errors
///
/// Returns [`ScrapeError::DateParse`] if the expiry text no longer matches
/// the expected date rendering.
pub fn extract_card(container: ElementRef<'_>, base: &Url) -> Result<CardSummary, ScrapeError> {
    let mut summary = CardSummary {
        title: None,
        value: None,
        expiry: None,
        voucher_url: None,
        detail_url: None,
    };
    for (field, rule) in &CARD_RULES {
        let value = apply(*rule, container, Some(base))?;
        match field {
            CardField::VoucherUrl => summary.voucher_url = value,
            CardField::DetailUrl => summary.detail_url = value,
            CardField::Title => summary.title = value,
            CardField::Value => summary.value = value,
            CardField::Expiry => summary.expiry = value,
        }
    }
    Ok(summary)
}

/// Extracts one [`OrderDetails`] from a detail-page card container.
///
/// # Errors
///
/// Returns [`ScrapeError::DateParse`] if the purchase-date text no longer
/// matches the expected date rendering.
pub fn extract_order(container: ElementRef<'_>) -> Result<OrderDetails, ScrapeError> {
    let mut details = OrderDetails {
        purchase_date: None,
        status: None,
        order_id: None,
        order_total: None,
    };
    for (field, rule) in &ORDER_RULES {
        let value = apply(*rule, container, None)?;
        match field {
            OrderField::OrderId => details.order_id = value,
            OrderField::PurchaseDate => details.purchase_date = value,
            OrderField::Status => details.status = value,
            OrderField::OrderTotal => details.order_total = value,
        }
    }
    Ok(details)
}

/// Selects every card container in `doc`, in document order.
pub fn card_containers(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.select(&CARD)
}

/// Selects the first card container in `doc`, if any.
#[must_use]
pub fn first_card_container(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&CARD).next()
}

/// Pulls the voucher code off a voucher-page document.
#[must_use]
pub fn voucher_code(doc: &Html) -> Option<String> {
    doc.select(&VOUCHER_CODE).next().map(collect_text)
}

fn collect_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Resolves an extracted `href` against the page base. Absolute hrefs pass
/// through unchanged; a missing or unusable base falls back to the raw href.
fn resolve_href(href: &str, base: Option<&Url>) -> String {
    match base.and_then(|b| b.join(href).ok()) {
        Some(url) => url.to_string(),
        None => href.to_owned(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
