//! Rendering of export records as semicolon-delimited lines.

use giftoff_scraper::CardRecord;

/// Renders one record as its output line:
/// `title;voucherCode;value;expiry[;purchaseDate;status;orderId;orderTotal]`.
///
/// Absent fields render as empty columns. The four order columns are
/// omitted entirely (not rendered empty) when the card had no
/// order-detail page.
#[must_use]
pub fn record_line(record: &CardRecord) -> String {
    let mut fields: Vec<&str> = vec![
        record.title.as_deref().unwrap_or(""),
        record.voucher_code.as_deref().unwrap_or(""),
        record.value.as_deref().unwrap_or(""),
        record.expiry.as_deref().unwrap_or(""),
    ];
    if let Some(order) = &record.order {
        fields.extend([
            order.purchase_date.as_deref().unwrap_or(""),
            order.status.as_deref().unwrap_or(""),
            order.order_id.as_deref().unwrap_or(""),
            order.order_total.as_deref().unwrap_or(""),
        ]);
    }
    fields.join(";")
}
