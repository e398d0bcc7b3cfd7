//! Abbreviation Table
//!
//! Maps an abbreviation to the words it may stand for. Empty by default;
//! loaded from a plain text file with one entry per line:
//!
//! ```text
//! # abbreviation - expansion, expansion
//! dept - department
//! univ - university, universe
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::error::{ReformulationError, ReformulationResult};

#[derive(Clone, Debug, Default)]
pub struct AbbreviationTable {
    entries: HashMap<String, HashSet<String>>,
}

impl AbbreviationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> ReformulationResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_lines(&content)?;
        log::info!(
            "Loaded {} abbreviations from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse `abbreviation - expansion, expansion` lines. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_lines(content: &str) -> ReformulationResult<Self> {
        let mut table = Self::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (abbreviation, expansions) =
                line.split_once(" - ")
                    .ok_or_else(|| ReformulationError::AbbreviationParse {
                        line: idx + 1,
                        message: format!("expected 'abbreviation - expansions', got {line:?}"),
                    })?;

            let abbreviation = abbreviation.trim();
            if abbreviation.is_empty() {
                return Err(ReformulationError::AbbreviationParse {
                    line: idx + 1,
                    message: "empty abbreviation".to_string(),
                });
            }

            let expansions: Vec<&str> = expansions
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .collect();
            table.insert(abbreviation, &expansions);
        }

        Ok(table)
    }

    /// Register expansions for an abbreviation, merging with existing ones.
    pub fn insert(&mut self, abbreviation: &str, expansions: &[&str]) {
        self.entries
            .entry(abbreviation.to_string())
            .or_default()
            .extend(expansions.iter().map(|e| e.to_string()));
    }

    /// True when `word` is a listed expansion of `abbreviation`.
    pub fn expands_to(&self, abbreviation: &str, word: &str) -> bool {
        self.entries
            .get(abbreviation)
            .is_some_and(|expansions| expansions.contains(word))
    }

    /// True when either token abbreviates the other.
    pub fn relates(&self, a: &str, b: &str) -> bool {
        self.expands_to(a, b) || self.expands_to(b, a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
