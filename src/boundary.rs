//! Boundary expansion around anchor characters
//!
//! Both scanners locate an anchor (`@`, a separator) and then measure how far
//! a run of acceptable characters extends away from it. All of that offset
//! arithmetic lives here.

use crate::error::{Result, ScrapeError};

/// Anchor character for email candidates
pub const EMAIL_ANCHOR: char = '@';

/// Upper bound on phone digit runs
pub const MAX_DIGIT_RUN: usize = 10;

/// Characters never accepted inside an email candidate.
///
/// Some of these are technically legal in an address, but they produce far
/// more false positives than real matches.
pub const DISALLOWED_EMAIL_CHARS: &str = " <>[]{},\"':;\\/#$%^&*()=+`?|\n\t\r";

/// Which edge of a window a run is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Run starting at the first character
    Forward,
    /// Run ending at the last character
    Backward,
}

/// Half-open range of character offsets into a text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Characters covered by this span, clamped to the buffer
    #[must_use]
    pub fn slice<'a>(&self, buffer: &'a [char]) -> &'a [char] {
        let end = self.end.min(buffer.len());
        let start = self.start.min(end);
        &buffer[start..end]
    }
}

/// Count consecutive characters matching `predicate`, measured from the edge
/// of `window` given by `direction`, capped at `max`.
pub fn run_length<F>(window: &[char], direction: Direction, max: usize, predicate: F) -> usize
where
    F: Fn(char) -> bool,
{
    let run = match direction {
        Direction::Forward => window.iter().take_while(|c| predicate(**c)).count(),
        Direction::Backward => window.iter().rev().take_while(|c| predicate(**c)).count(),
    };
    run.min(max)
}

/// Whether `c` may appear inside an email candidate
#[must_use]
pub fn is_email_char(c: char) -> bool {
    is_printable(c) && !DISALLOWED_EMAIL_CHARS.contains(c)
}

/// Printable ASCII, including the whitespace characters
fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Number of valid email characters adjacent to the anchor of `window`.
///
/// `window` must start or end with `@`. When it ends with `@` (and does not
/// also start with one) the run is measured backward from the anchor,
/// otherwise forward. Returns `window.len() - 1` when no disqualifying
/// character is found.
///
/// `"@abcde%"` gives 5 and `"#123@"` gives 3.
pub fn last_valid_offset(window: &[char]) -> Result<usize> {
    let (Some(&first), Some(&last)) = (window.first(), window.last()) else {
        return Err(ScrapeError::InvalidAnchorInput(String::new()));
    };

    let direction = if last == EMAIL_ANCHOR && first != EMAIL_ANCHOR {
        Direction::Backward
    } else if first == EMAIL_ANCHOR {
        Direction::Forward
    } else {
        return Err(ScrapeError::InvalidAnchorInput(window.iter().collect()));
    };

    let beyond_anchor = match direction {
        Direction::Forward => &window[1..],
        Direction::Backward => &window[..window.len() - 1],
    };

    Ok(run_length(beyond_anchor, direction, usize::MAX, is_email_char))
}

/// Offset of the first `needle` at or after `from`
pub(crate) fn find_from(buffer: &[char], needle: char, from: usize) -> Option<usize> {
    buffer
        .get(from..)?
        .iter()
        .position(|c| *c == needle)
        .map(|pos| pos + from)
}

/// Length of the ASCII digit run at the given edge of `window`
#[must_use]
pub fn digit_run(window: &[char], direction: Direction) -> usize {
    run_length(window, direction, MAX_DIGIT_RUN, |c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_run_length_caps_at_max() {
        let window = chars("123456789012345");
        assert_eq!(digit_run(&window, Direction::Forward), MAX_DIGIT_RUN);
    }

    #[test]
    fn test_run_length_backward() {
        let window = chars("abc 4567");
        assert_eq!(digit_run(&window, Direction::Backward), 4);
        assert_eq!(digit_run(&window, Direction::Forward), 0);
    }

    #[test]
    fn test_span_slice_clamps() {
        let buffer = chars("hello");
        assert_eq!(Span::new(3, 99).slice(&buffer), &['l', 'o']);
        assert!(Span::new(7, 9).slice(&buffer).is_empty());
    }

    #[test]
    fn test_find_from_past_end() {
        assert_eq!(find_from(&chars("a@"), '@', 5), None);
        assert_eq!(find_from(&chars("a@b@"), '@', 2), Some(3));
    }

    #[test]
    fn test_printable_control_chars() {
        assert!(is_email_char('\x0b'));
        assert!(!is_email_char('\x07'));
        assert!(!is_email_char('é'));
    }
}
