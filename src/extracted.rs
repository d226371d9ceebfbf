//! Entity extraction from free text

use crate::options::ScrapeOptions;
use serde::{Deserialize, Serialize};

/// All entities extracted from one piece of text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedEntities {
    /// Lowercase email addresses, sorted
    pub emails: Vec<String>,

    /// Ten-digit phone numbers without formatting, sorted
    pub phone_numbers: Vec<String>,
}

impl ExtractedEntities {
    /// Extract all entities from text content with default options
    #[must_use]
    pub fn extract(text: &str) -> Self {
        Self::extract_with(text, &ScrapeOptions::default())
    }

    /// Extract all entities from text content
    #[must_use]
    pub fn extract_with(text: &str, options: &ScrapeOptions) -> Self {
        Self {
            emails: options.email_scanner().scrape(text),
            phone_numbers: options.phone_scanner().scrape(text),
        }
    }

    /// Check if any entities were extracted
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phone_numbers.is_empty()
    }

    /// Get count of all extracted entities
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.emails.len() + self.phone_numbers.len()
    }
}
