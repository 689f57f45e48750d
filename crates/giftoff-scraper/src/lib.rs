//! Extraction pipeline for the Giftoff gift-card dashboard.
//!
//! Walks the authenticated active and archived listings, extracts per-card
//! fields through a fixed structural-selector table, resolves each card's
//! voucher code and (cached) order details, and yields one combined record
//! per card. See [`pipeline::export_cards`] for the entry point.

pub mod cache;
pub mod client;
pub mod dates;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod pipeline;
pub mod types;

pub use cache::OrderDetailCache;
pub use client::DashboardClient;
pub use error::ScrapeError;
pub use pipeline::export_cards;
pub use types::{CardRecord, CardSummary, OrderDetails};
