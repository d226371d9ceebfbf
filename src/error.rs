//! Error types for scraping

use thiserror::Error;

/// Errors that can occur while scanning or scraping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// A single candidate could not be expanded or trimmed.
    ///
    /// Scanners recover from this locally; it never reaches the caller of
    /// `scrape_emails` or `scrape_phone_numbers`.
    #[error("Malformed candidate at offset {anchor}: {reason}")]
    MalformedCandidate { anchor: usize, reason: String },

    /// Boundary expansion was given a window without `@` at either end
    #[error("First or last character must be '@', got {0:?}")]
    InvalidAnchorInput(String),

    /// Base page URL for link scraping is not an absolute URL
    #[error("Invalid page URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Scrape options could not be loaded
    #[error("Invalid scrape options: {0}")]
    Config(String),
}

impl ScrapeError {
    pub(crate) fn malformed(anchor: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCandidate {
            anchor,
            reason: reason.into(),
        }
    }
}

/// Result type for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
