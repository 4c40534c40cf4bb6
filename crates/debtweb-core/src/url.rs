//! Base-path aware URL normalization
//!
//! The dashboard may be mounted under a prefix (e.g. `/apps/debt-collection`).
//! Every path the client requests goes through `UrlNormalizer::normalize` so
//! the prefix is applied exactly once.

use once_cell::sync::OnceCell;
use regex::Regex;

fn absolute_url_regex() -> &'static Regex {
    static ABSOLUTE_URL: OnceCell<Regex> = OnceCell::new();
    ABSOLUTE_URL.get_or_init(|| Regex::new(r"(?i)^(https?:)?//").unwrap())
}

/// Check whether a path is an absolute or protocol-relative URL
pub fn is_absolute_url(path: &str) -> bool {
    absolute_url_regex().is_match(path)
}

/// Prefixes request paths with the dashboard base path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlNormalizer {
    base_path: String,
}

impl UrlNormalizer {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Normalize a path against the base path.
    ///
    /// Rules, first match wins: empty stays empty, absolute URLs are
    /// untouched, paths already under the base are untouched, root-relative
    /// paths get the base prepended, anything else is joined with `/`.
    pub fn normalize(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if is_absolute_url(path) {
            return path.to_string();
        }
        let base = self.base_path.as_str();
        if !base.is_empty() && path.starts_with(base) {
            return path.to_string();
        }
        if path.starts_with('/') {
            return format!("{}{}", base, path);
        }
        let separator = if base.ends_with('/') { "" } else { "/" };
        format!("{}{}{}", base, separator, path)
    }
}
