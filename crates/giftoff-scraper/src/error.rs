use thiserror::Error;

/// Failures that abort an export run.
///
/// Field *absence* is never an error: every optional getter in
/// [`crate::extract`] resolves a missing sub-element to `None` and the run
/// continues. The variants here are the unrecoverable tier: for voucher
/// data, partial silently-missing output is worse than a loud failure, so
/// the pipeline propagates all of these to the top instead of skipping the
/// offending card.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no card container found on {url}")]
    MissingContainer { url: String },

    #[error("unparseable date {input:?} (expected {format})")]
    DateParse { input: String, format: &'static str },

    #[error("invalid dashboard base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
