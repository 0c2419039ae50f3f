//! Query string assembly for resource URLs.
//!
//! Values are rendered with their `Display` implementation, so boolean flags
//! come out as lowercase `true` / `false`. Pairs keep insertion order.

use std::fmt::Display;
use url::Url;

/// Ordered list of query parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair.
    #[must_use]
    pub fn with<T>(mut self, key: &'static str, value: T) -> Self
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Write the pairs into the query string of `url`, replacing any existing query.
    pub fn apply(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            url.set_query(None);
            return;
        }

        url.query_pairs_mut()
            .clear()
            .extend_pairs(self.pairs.iter().map(|(key, value)| (*key, value.as_str())));
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
