//! Email address scanner
//!
//! Candidates are found by locating every `@` and expanding left and right
//! over characters that can plausibly belong to an address. The text between
//! the previous candidate and the next `@` forms the chunk for the current
//! anchor, so one candidate's domain never runs into the next anchor's local
//! part.

use crate::boundary::{EMAIL_ANCHOR, Span, find_from, last_valid_offset};
use crate::error::{Result, ScrapeError};
use crate::options::ScanStrategy;
use crate::rules::{EmailRules, strip_leading_artifacts};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::{debug, trace};

static EMAIL_CANDIDATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let class =
        r#"[^ \t\n\r<>\[\]{},"':;\\/#$%^&*()=+`?|@\x00-\x08\x0e-\x1f\x7f-\x{10FFFF}]"#;
    Regex::new(&format!("{class}*@{class}*")).expect("valid email candidate regex")
});

/// Extract likely email addresses from `text` with the default scanner.
///
/// Results are lowercase, deduplicated and sorted. Never fails; text without
/// an `@` gives an empty list.
#[must_use]
pub fn scrape_emails(text: &str) -> Vec<String> {
    EmailScanner::new().scrape(text)
}

/// Decode percent-encoding (when any `%` is present) and flatten line breaks
/// and tabs to spaces
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let decoded = if text.contains('%') {
        String::from_utf8_lossy(&urlencoding::decode_binary(text.as_bytes())).into_owned()
    } else {
        text.to_string()
    };
    decoded.replace(['\n', '\t', '\r'], " ")
}

/// Configurable email scanner
#[derive(Debug, Clone, Default)]
pub struct EmailScanner {
    rules: EmailRules,
    strategy: ScanStrategy,
}

/// Expanded and trimmed text around one anchor
#[derive(Debug)]
struct Candidate {
    text: String,
    domain_len: usize,
}

impl EmailScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rules(mut self, rules: EmailRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn rules(&self) -> &EmailRules {
        &self.rules
    }

    #[must_use]
    pub const fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Extract likely email addresses from `text`
    #[must_use]
    pub fn scrape(&self, text: &str) -> Vec<String> {
        let text = normalize_text(text);
        let accepted = match self.strategy {
            ScanStrategy::Heuristic => {
                let buffer: Vec<char> = text.chars().collect();
                self.scan_anchors(&buffer)
            }
            ScanStrategy::Pattern => self.scan_patterns(&text),
        };

        let emails: BTreeSet<String> = accepted
            .iter()
            .map(|email| strip_leading_artifacts(email))
            .filter(|email| self.rules.accepts(email))
            .map(str::to_string)
            .collect();

        debug!(
            strategy = ?self.strategy,
            candidates = accepted.len(),
            kept = emails.len(),
            "email scan finished"
        );

        emails.into_iter().collect()
    }

    fn scan_anchors(&self, buffer: &[char]) -> Vec<String> {
        let anchors = buffer.iter().filter(|c| **c == EMAIL_ANCHOR).count();
        let mut accepted = Vec::new();
        let mut resume = 0;

        for _ in 0..anchors {
            let Some(at) = find_from(buffer, EMAIL_ANCHOR, resume) else {
                break;
            };
            let chunk_end = find_from(buffer, EMAIL_ANCHOR, at + 1).unwrap_or(buffer.len());

            match expand_candidate(buffer, Span::new(resume, chunk_end), at) {
                Ok(candidate) => {
                    resume = at + candidate.domain_len + 1;
                    if self.rules.accepts(&candidate.text) {
                        accepted.push(candidate.text.to_lowercase());
                    } else {
                        trace!(candidate = %candidate.text, "rejected email candidate");
                    }
                }
                Err(e) => {
                    trace!(error = %e, "dropped email candidate");
                    resume = at + 1;
                }
            }
        }

        accepted
    }

    fn scan_patterns(&self, text: &str) -> Vec<String> {
        EMAIL_CANDIDATE_REGEX
            .find_iter(text)
            .map(|m| trim_trailing(m.as_str()))
            .filter(|candidate| {
                let accepted = self.rules.accepts(candidate);
                if !accepted {
                    trace!(%candidate, "rejected email candidate");
                }
                accepted
            })
            .map(str::to_lowercase)
            .collect()
    }
}

/// Expand around the anchor at `at` within `chunk`, then trim
fn expand_candidate(buffer: &[char], chunk: Span, at: usize) -> Result<Candidate> {
    let window = chunk.slice(buffer);
    let local_at = at
        .checked_sub(chunk.start)
        .filter(|offset| *offset < window.len())
        .ok_or_else(|| ScrapeError::malformed(at, "anchor outside its chunk"))?;

    let left = last_valid_offset(&window[..=local_at])?;
    let right = last_valid_offset(&window[local_at..])?;

    let raw: String = Span::new(at - left, at + right + 1)
        .slice(buffer)
        .iter()
        .collect();
    let text = trim_trailing(&raw);
    if text.is_empty() {
        return Err(ScrapeError::malformed(at, "nothing left after trimming"));
    }

    let (_, domain) = text
        .split_once(EMAIL_ANCHOR)
        .ok_or_else(|| ScrapeError::malformed(at, "anchor trimmed away"))?;

    Ok(Candidate {
        domain_len: domain.chars().count(),
        text: text.to_string(),
    })
}

/// Drop trailing characters until the candidate ends in a letter
fn trim_trailing(candidate: &str) -> &str {
    candidate.trim_end_matches(|c: char| c.is_numeric() || !c.is_alphabetic())
}
