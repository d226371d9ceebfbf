// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Contact Scraper
//!
//! Best-effort extraction of email addresses and North-American phone numbers
//! from messy real-world text: HTML, decoded URLs, raw page dumps.
//!
//! Candidates are located by walking the text around anchor characters (`@`,
//! `-` and `.` separators, `href="tel:` markers), bounded by hand, and then
//! filtered through a fixed rule set that weeds out file paths, asset names
//! and version strings that merely look like contacts.
//!
//! # Features
//!
//! - Percent-decoding and whitespace normalization before scanning
//! - Rule-based email acceptance with an extendable file-extension denylist
//! - Separator and `tel:`/`callto:` link detection for phone numbers
//! - Pluggable numbering-plan validation
//! - Link and form-input scraping for HTML pages
//!
//! # Example
//!
//! ```rust
//! use contact_scrape::{scrape_emails, scrape_phone_numbers};
//!
//! let text = "Mail JOHN.DOE@Example.com or call (212) 555-0199.";
//!
//! assert_eq!(scrape_emails(text), vec!["john.doe@example.com"]);
//! assert_eq!(scrape_phone_numbers(text), vec!["2125550199"]);
//! ```

mod boundary;
mod email;
mod error;
mod extracted;
mod inputs;
mod links;
mod options;
mod phone;
mod rules;

pub use boundary::{
    DISALLOWED_EMAIL_CHARS, Direction, EMAIL_ANCHOR, MAX_DIGIT_RUN, Span, digit_run,
    is_email_char, last_valid_offset, run_length,
};
pub use email::{EmailScanner, normalize_text, scrape_emails};
pub use error::{Result, ScrapeError};
pub use extracted::ExtractedEntities;
pub use inputs::{ScrapedInputs, scrape_inputs};
pub use links::{IMAGE_EXTENSIONS, LinkScraper, LinkType};
pub use options::{ScanStrategy, ScrapeOptions};
pub use phone::{
    NanpPlan, NumberingPlan, PhoneScanner, find_by_href, find_by_separator, scrape_phone_numbers,
};
pub use rules::{DEFAULT_FILE_EXTENSIONS, EmailRules, LEADING_ARTIFACTS, strip_leading_artifacts};
