//! Detector Cascade
//!
//! Each detector tests one reformulation hypothesis for a
//! `(previous, query)` pair. All detectors share the [`DetectorFn`]
//! signature and [`CASCADE`] lists them in precedence order; the first one
//! that matches decides the category, and [`ReformulationCategory::New`] is
//! the fallback.

use std::collections::HashSet;

use super::abbreviations::AbbreviationTable;
use super::category::ReformulationCategory;
use super::edit_distance::levenshtein;
use super::similarity::SimilarityEngine;
use super::stemming::{same_stems, TokenStemmer};

/// Collaborators and thresholds available to every detector.
pub struct CascadeContext<'a> {
    pub engine: &'a SimilarityEngine,
    pub stemmer: &'a dyn TokenStemmer,
    pub abbreviations: &'a AbbreviationTable,
    pub substitution_threshold: f64,
    pub max_spelling_distance: usize,
}

pub type DetectorFn = fn(&CascadeContext<'_>, &str, &str) -> bool;

/// A category paired with the predicate that detects it.
#[derive(Clone, Copy)]
pub struct Detector {
    pub category: ReformulationCategory,
    pub test: DetectorFn,
}

impl Detector {
    pub fn matches(&self, ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
        (self.test)(ctx, previous, query)
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Detectors in precedence order.
pub const CASCADE: [Detector; 14] = [
    Detector { category: ReformulationCategory::Same, test: same },
    Detector { category: ReformulationCategory::WordReorder, test: word_reorder },
    Detector { category: ReformulationCategory::WhitespacePunctuation, test: whitespace_punctuation },
    Detector { category: ReformulationCategory::AddWords, test: add_words },
    Detector { category: ReformulationCategory::RemoveWords, test: remove_words },
    Detector { category: ReformulationCategory::UrlStrip, test: url_strip },
    Detector { category: ReformulationCategory::Stemming, test: stemming },
    Detector { category: ReformulationCategory::FormAcronym, test: form_acronym },
    Detector { category: ReformulationCategory::ExpandAcronym, test: expand_acronym },
    Detector { category: ReformulationCategory::Abbreviation, test: abbreviation },
    Detector { category: ReformulationCategory::Substring, test: substring },
    Detector { category: ReformulationCategory::Superstring, test: superstring },
    Detector { category: ReformulationCategory::WordSubstitution, test: word_substitution },
    Detector { category: ReformulationCategory::SpellingCorrection, test: spelling_correction },
];

/// Run the detectors in order and return the first matching category.
pub fn run_cascade(ctx: &CascadeContext<'_>, previous: &str, query: &str) -> ReformulationCategory {
    CASCADE
        .iter()
        .find(|detector| detector.matches(ctx, previous, query))
        .map(|detector| detector.category)
        .unwrap_or(ReformulationCategory::New)
}

// Top-level domain suffixes and how many trailing bytes each one removes,
// applied in this order. `.info` removes four, leaving its dot behind.
const URL_SUFFIXES: [(&str, usize); 12] = [
    (".com", 4),
    (".net", 4),
    (".org", 4),
    (".info", 4),
    (".biz", 4),
    (".gov", 4),
    (".mil", 4),
    (".eu", 3),
    (".cn", 3),
    (".de", 3),
    (".uk", 3),
    (".nl", 3),
];

pub fn same(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    previous == query
}

/// Same words in any order, with hyphen and comma boundaries ignored.
pub fn word_reorder(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    let mut previous_words = compound_tokens(previous);
    let mut query_words = compound_tokens(query);
    previous_words.sort_unstable();
    query_words.sort_unstable();
    previous_words == query_words
}

pub fn whitespace_punctuation(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    squeeze(previous) == squeeze(query)
}

/// Every previous token reappears in the query.
pub fn add_words(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    contains_all_tokens(query, previous)
}

/// Every query token was already in the previous query.
pub fn remove_words(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    contains_all_tokens(previous, query)
}

/// Equal after dropping `http` tokens, `www.` prefixes and TLD suffixes.
pub fn url_strip(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    let previous_words: Vec<&str> = previous.split_whitespace().filter(|t| *t != "http").collect();
    let query_words: Vec<&str> = query.split_whitespace().filter(|t| *t != "http").collect();

    previous_words.len() == query_words.len()
        && previous_words
            .iter()
            .zip(&query_words)
            .all(|(a, b)| strip_url_parts(a) == strip_url_parts(b))
}

pub fn stemming(ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    let previous_words: Vec<&str> = previous.split_whitespace().collect();
    let query_words: Vec<&str> = query.split_whitespace().collect();
    same_stems(ctx.stemmer, &previous_words, &query_words)
}

/// The query is the acronym of the previous query.
pub fn form_acronym(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    is_acronym_of(previous, query)
}

/// The previous query was the acronym of the query.
pub fn expand_acronym(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    is_acronym_of(query, previous)
}

/// Position by position, one token is a prefix of the other or a known
/// abbreviation of it.
pub fn abbreviation(ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    let previous_words: Vec<&str> = previous.split_whitespace().collect();
    let query_words: Vec<&str> = query.split_whitespace().collect();

    previous_words.len() == query_words.len()
        && previous_words.iter().zip(&query_words).all(|(a, b)| {
            a.starts_with(b) || b.starts_with(a) || ctx.abbreviations.relates(a, b)
        })
}

pub fn substring(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    previous.starts_with(query) || previous.ends_with(query)
}

pub fn superstring(_ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    query.starts_with(previous) || query.ends_with(previous)
}

/// Related as whole strings, or related word by word.
pub fn word_substitution(ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    // Whole queries are looked up as single lemmas first (e.g. "new york")
    if related(ctx, previous, query) {
        return true;
    }

    let previous_words: Vec<&str> = previous.split_whitespace().collect();
    let query_words: Vec<&str> = query.split_whitespace().collect();

    previous_words.len() == query_words.len()
        && previous_words
            .iter()
            .zip(&query_words)
            .all(|(a, b)| a == b || related(ctx, a, b))
}

pub fn spelling_correction(ctx: &CascadeContext<'_>, previous: &str, query: &str) -> bool {
    levenshtein(previous, query) <= ctx.max_spelling_distance
}

fn related(ctx: &CascadeContext<'_>, a: &str, b: &str) -> bool {
    let similarity = ctx.engine.word_similarity(a, b);
    similarity > 0.0 && similarity >= ctx.substitution_threshold
}

/// Whitespace tokens further split on `-` and then `,`. Empty fragments are
/// kept.
fn compound_tokens(query: &str) -> Vec<&str> {
    query
        .split_whitespace()
        .flat_map(|token| token.split('-'))
        .flat_map(|token| token.split(','))
        .collect()
}

fn squeeze(query: &str) -> String {
    query.chars().filter(|c| !matches!(c, ' ' | '.' | '-')).collect()
}

fn contains_all_tokens(haystack: &str, needles: &str) -> bool {
    let available: HashSet<&str> = haystack.split_whitespace().collect();
    needles.split_whitespace().all(|token| available.contains(token))
}

fn strip_url_parts(token: &str) -> &str {
    let mut stripped = token.strip_prefix("www.").unwrap_or(token);
    for (suffix, cut) in URL_SUFFIXES {
        if stripped.ends_with(suffix) {
            stripped = &stripped[..stripped.len() - cut];
        }
    }
    stripped
}

fn is_acronym_of(expanded: &str, acronym: &str) -> bool {
    let words: Vec<&str> = expanded.split_whitespace().collect();
    if words.len() <= 1 && acronym.split_whitespace().count() <= 1 {
        return false;
    }

    let initials: String = words.iter().filter_map(|word| word.chars().next()).collect();
    acronym.replace(['.', '-'], "") == initials
}
