//! Scrape configuration

use crate::email::EmailScanner;
use crate::error::{Result, ScrapeError};
use crate::phone::PhoneScanner;
use crate::rules::EmailRules;
use serde::{Deserialize, Serialize};

/// How candidates are located in the text
///
/// Both strategies share the same trimming, acceptance rules and
/// deduplication; only the candidate search differs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Manual walk outward from each anchor character
    #[default]
    Heuristic,
    /// Precompiled regular expressions
    Pattern,
}

/// Options shared by the email and phone scanners
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScrapeOptions {
    /// Candidate search strategy
    pub strategy: ScanStrategy,

    /// Extra domain substrings that disqualify an email candidate
    pub additional_extensions: Vec<String>,

    /// Run phone numbers through the numbering-plan check
    pub validate_numbers: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            strategy: ScanStrategy::Heuristic,
            additional_extensions: Vec::new(),
            validate_numbers: true,
        }
    }
}

impl ScrapeOptions {
    /// Load options from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    #[must_use]
    pub fn email_scanner(&self) -> EmailScanner {
        EmailScanner::new()
            .with_strategy(self.strategy)
            .with_rules(EmailRules::new().with_extensions(self.additional_extensions.iter().cloned()))
    }

    #[must_use]
    pub fn phone_scanner(&self) -> PhoneScanner {
        let scanner = PhoneScanner::new().with_strategy(self.strategy);
        if self.validate_numbers {
            scanner
        } else {
            scanner.without_validation()
        }
    }
}
