//! Forbidden keyword filter
//!
//! Case-insensitive substring matching against a configured word list.

use aho_corasick::AhoCorasick;
use tracing::debug;
use crate::utils::errors::{ModBuddyError, Result};

#[derive(Debug, Clone)]
pub struct KeywordFilter {
    matcher: AhoCorasick,
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Build a filter; blank keywords are ignored
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        let matcher = AhoCorasick::new(&keywords)
            .map_err(|e| ModBuddyError::Config(format!("Failed to build keyword matcher: {}", e)))?;

        debug!(keyword_count = keywords.len(), "Keyword filter built");
        Ok(Self { matcher, keywords })
    }

    /// First forbidden keyword contained in `text`, if any
    pub fn find_match(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();
        self.matcher
            .find(&lowered)
            .map(|found| self.keywords[found.pattern().as_usize()].as_str())
    }

    pub fn contains_forbidden(&self, text: &str) -> bool {
        self.find_match(text).is_some()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
