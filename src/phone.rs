//! North-American phone number scanner
//!
//! Two detectors run over the text. The separator detector looks at every
//! `-` and `.` and classifies the digit runs around it; the marker detector
//! reads `href="tel:..."` style attributes. Their union is checked against a
//! [`NumberingPlan`].
//!
//! Recognized shapes (with `-` or `.` as separator):
//!
//! - `xxx-xxx-xxxx`
//! - `(xxx)-xxx-xxxx`
//! - `(xxx)xxx-xxxx` and `(xxx) xxx-xxxx`

use crate::boundary::{Direction, Span, digit_run, find_from};
use crate::options::ScanStrategy;
use phonenumber::country;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace};

/// Separators scanned by the separator detector, in order
pub const SEPARATORS: [char; 2] = ['-', '.'];

/// Country code removed before scanning
pub const COUNTRY_CODE: &str = "+1";

/// Attribute opening that precedes a phone link
pub const HREF_MARKER: &str = "href=\"";

/// Link schemes carrying a phone number
pub const PHONE_SCHEMES: &[&str] = &["tel:", "callto:"];

/// Digits in a national number
pub const PHONE_DIGITS: usize = 10;

/// Cursor advance after each separator, matched or not
const SEPARATOR_STRIDE: usize = 5;

static PHONE_CANDIDATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\([0-9]{3}\)[- ]?[0-9]{3}-[0-9]{4}\b|\([0-9]{3}\)[. ]?[0-9]{3}\.[0-9]{4}\b|\b[0-9]{3}-[0-9]{3}-[0-9]{4}\b|\b[0-9]{3}\.[0-9]{3}\.[0-9]{4}\b",
    )
    .expect("valid phone candidate regex")
});

static PHONE_HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href="(?:tel|callto):([^"]*)""#).expect("valid phone href regex")
});

/// Decides whether ten national digits form a plausible assigned number
pub trait NumberingPlan: Send + Sync {
    /// `digits` is expected to hold exactly ten ASCII digits; anything else
    /// must be reported as invalid rather than panic.
    fn is_valid(&self, digits: &str) -> bool;
}

impl<F> NumberingPlan for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, digits: &str) -> bool {
        self(digits)
    }
}

/// North American Numbering Plan check against libphonenumber metadata
///
/// The digits are parsed as `+1` followed by the national number; numbers
/// that fail to parse, or whose area code and exchange are not assigned,
/// are invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanpPlan;

impl NumberingPlan for NanpPlan {
    fn is_valid(&self, digits: &str) -> bool {
        if !is_national_number(digits) {
            return false;
        }
        match phonenumber::parse(Some(country::Id::US), format!("{COUNTRY_CODE}{digits}")) {
            Ok(number) => phonenumber::is_valid(&number),
            Err(e) => {
                trace!(%digits, error = %e, "number does not parse");
                false
            }
        }
    }
}

/// Extract ten-digit US phone numbers from `text` with the default scanner.
///
/// Results carry no formatting, are deduplicated and sorted. Never fails.
#[must_use]
pub fn scrape_phone_numbers(text: &str) -> Vec<String> {
    PhoneScanner::new().scrape(text)
}

/// Configurable phone number scanner
#[derive(Clone)]
pub struct PhoneScanner {
    plan: Option<Arc<dyn NumberingPlan>>,
    strategy: ScanStrategy,
}

impl fmt::Debug for PhoneScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneScanner")
            .field("validates", &self.plan.is_some())
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Default for PhoneScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneScanner {
    /// Scanner validating against [`NanpPlan`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            plan: Some(Arc::new(NanpPlan)),
            strategy: ScanStrategy::default(),
        }
    }

    #[must_use]
    pub fn with_plan(mut self, plan: impl NumberingPlan + 'static) -> Self {
        self.plan = Some(Arc::new(plan));
        self
    }

    /// Keep every well-formed ten-digit candidate
    #[must_use]
    pub fn without_validation(mut self) -> Self {
        self.plan = None;
        self
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Extract ten-digit US phone numbers from `text`
    #[must_use]
    pub fn scrape(&self, text: &str) -> Vec<String> {
        let text = text.replace(COUNTRY_CODE, "");

        let candidates = match self.strategy {
            ScanStrategy::Heuristic => {
                let mut candidates = Vec::new();
                for separator in SEPARATORS {
                    candidates.extend(find_by_separator(&text, separator));
                }
                candidates.extend(find_by_href(&text));
                candidates
            }
            ScanStrategy::Pattern => find_by_pattern(&text),
        };

        let total = candidates.len();
        let numbers: BTreeSet<String> = candidates
            .into_iter()
            .filter(|number| {
                let valid = self.plan.as_ref().is_none_or(|plan| plan.is_valid(number));
                if !valid {
                    trace!(%number, "number rejected by numbering plan");
                }
                valid
            })
            .collect();

        debug!(
            strategy = ?self.strategy,
            candidates = total,
            kept = numbers.len(),
            "phone scan finished"
        );

        numbers.into_iter().collect()
    }
}

/// Detect numbers by scanning for `separator` and the digit runs around it
#[must_use]
pub fn find_by_separator(text: &str, separator: char) -> Vec<String> {
    let buffer: Vec<char> = text.chars().collect();
    let occurrences = buffer.iter().filter(|c| **c == separator).count();
    let mut numbers = Vec::new();
    let mut resume = 0;

    for _ in 0..occurrences {
        let Some(sep) = find_from(&buffer, separator, resume) else {
            break;
        };

        if let Some(span) = match_separator(&buffer, separator, resume, sep) {
            let number: String = span
                .slice(&buffer)
                .iter()
                .filter(|c| **c != separator && !matches!(**c, '(' | ')' | ' '))
                .collect();
            if is_national_number(&number) {
                numbers.push(number);
            } else {
                trace!(%number, "separator match is not ten digits");
            }
        }

        resume = sep + SEPARATOR_STRIDE;
    }

    numbers
}

/// Classify the digit runs around the separator at `sep`.
///
/// `resume` bounds how far back the leading run may reach.
fn match_separator(buffer: &[char], separator: char, resume: usize, sep: usize) -> Option<Span> {
    let next = find_from(buffer, separator, sep + 1);

    let leading = digit_run(&buffer[resume..sep], Direction::Backward);
    let middle = next.map_or(0, |n| digit_run(&buffer[sep + 1..=n], Direction::Forward));
    let trailing = next.map_or(0, |n| digit_run(&buffer[n + 1..], Direction::Forward));

    let before = |offset: usize| sep.checked_sub(offset).map(|i| buffer[i]);

    match (leading, middle, trailing) {
        // xxx-xxx-xxxx
        (3, 3, 4) => next.map(|n| Span::new(sep - 3, n + 5)),
        // (xxx)-xxx-xxxx
        (0, 3, 4) if before(1) == Some(')') && before(5) == Some('(') => {
            Some(Span::new(sep - 5, sep + 9))
        }
        // (xxx)xxx-xxxx or (xxx) xxx-xxxx
        (3, _, _) if matches!(before(4), Some(')' | ' ')) => {
            Some(Span::new(sep.checked_sub(8)?, sep + 5))
        }
        _ => None,
    }
}

/// Detect numbers in `href="tel:..."` and `href="callto:..."` attributes
#[must_use]
pub fn find_by_href(text: &str) -> Vec<String> {
    text.match_indices(HREF_MARKER)
        .filter_map(|(index, _)| {
            let rest = &text[index + HREF_MARKER.len()..];
            let value = &rest[..rest.find('"')?];
            let scheme = PHONE_SCHEMES.iter().find(|scheme| {
                value
                    .get(..scheme.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            })?;
            let number: String = value[scheme.len()..]
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            is_national_number(&number).then_some(number)
        })
        .collect()
}

/// Detect numbers with precompiled patterns
fn find_by_pattern(text: &str) -> Vec<String> {
    let formatted = PHONE_CANDIDATE_REGEX.find_iter(text).map(|m| m.as_str());
    let linked = PHONE_HREF_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));

    formatted
        .chain(linked)
        .map(|raw| raw.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|number| is_national_number(number))
        .collect()
}

fn is_national_number(number: &str) -> bool {
    number.len() == PHONE_DIGITS && number.bytes().all(|b| b.is_ascii_digit())
}
