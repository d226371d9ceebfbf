//! Acceptance rules for email candidates
//!
//! Some addresses rejected here are technically valid, but they are
//! practically never seen in the wild, while the shapes they describe
//! (file names, asset paths, version strings) show up constantly.

/// Domain substrings that mark a candidate as a file path rather than an address
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".js", ".html", ".svg", ".jpeg", ".mp4", ".mpeg", ".css", ".pdf", ".wav",
    ".docx", ".txt", ".rtf", ".gif", ".webp", ".x.x",
];

/// Escape remnants that imperfect upstream decoding leaves in front of addresses
pub const LEADING_ARTIFACTS: &[&str] = &["u003e", "u00a0"];

const MIN_LOCAL_LEN: usize = 2;
const MAX_LOCAL_LEN: usize = 64;
const MIN_DOMAIN_LEN: usize = 4;

/// Conjunction of predicates a candidate must satisfy to be reported
#[derive(Debug, Clone)]
pub struct EmailRules {
    extensions: Vec<String>,
}

impl Default for EmailRules {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailRules {
    /// Rules with the default extension denylist
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_FILE_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }

    /// Add extra domain substrings to reject
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions.extend(
            extensions
                .into_iter()
                .map(|ext| ext.into().to_ascii_lowercase())
                .filter(|ext| !ext.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `email` is likely a real address
    #[must_use]
    pub fn accepts(&self, email: &str) -> bool {
        if email.matches('@').count() != 1 {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        let Some(last_dot) = email.rfind('.') else {
            return false;
        };

        let local_len = local.chars().count();

        local.len() < last_dot
            && (MIN_LOCAL_LEN..=MAX_LOCAL_LEN).contains(&local_len)
            && local.chars().any(char::is_alphabetic)
            && !is_numeric_ignoring_dots(local)
            && !domain.contains('_')
            && domain.chars().count() >= MIN_DOMAIN_LEN
            && !is_numeric_ignoring_dots(domain)
            && !domain.starts_with('.')
            && !email.contains("..")
            && !email.starts_with(['@', '.'])
            && !email.ends_with(['@', '.'])
            && !email.starts_with("www.")
            && !self.has_file_extension(domain)
    }

    fn has_file_extension(&self, domain: &str) -> bool {
        let domain = domain.to_ascii_lowercase();
        self.extensions.iter().any(|ext| domain.contains(ext.as_str()))
    }
}

/// Remove known artifact prefixes, each checked once in table order
#[must_use]
pub fn strip_leading_artifacts(email: &str) -> &str {
    LEADING_ARTIFACTS
        .iter()
        .fold(email, |email, artifact| email.strip_prefix(artifact).unwrap_or(email))
}

/// True for strings made only of numeric characters once dots are removed,
/// including strings with nothing left
fn is_numeric_ignoring_dots(s: &str) -> bool {
    s.chars().filter(|c| *c != '.').all(char::is_numeric)
}
