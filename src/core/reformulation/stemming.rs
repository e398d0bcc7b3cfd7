//! Token stemming for morphological comparison.

use std::borrow::Cow;

use rust_stemmers::{Algorithm, Stemmer};

/// Reduces a token to its morphological root.
///
/// Implementations must be deterministic and must not change case on their
/// own; callers pass tokens exactly as they appear in the query.
pub trait TokenStemmer: Send + Sync {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Snowball English (Porter2) stemmer.
///
/// Porter2 revises the classic Porter rules, so some stems differ: classic
/// Porter reduces "generously" to "gener" while this keeps "generous".
pub struct SnowballStemmer {
    inner: Stemmer,
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStemmer for SnowballStemmer {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.inner.stem(token)
    }
}

/// True when both token lists have the same length and stem identically
/// position by position.
pub fn same_stems(stemmer: &dyn TokenStemmer, a: &[&str], b: &[&str]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(left, right)| stemmer.stem(left) == stemmer.stem(right))
}
