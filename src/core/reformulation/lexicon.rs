//! Lexical Database
//!
//! The similarity engine only needs two things from a lexical database: the
//! senses (synsets) a word can take, and a relatedness score between two
//! senses. [`LexicalDatabase`] captures that boundary.
//!
//! [`Taxonomy`] is an in-memory, WordNet-style implementation: synsets carry
//! lemmas and hypernym links, and relatedness is path similarity over the
//! hypernym graph, `1 / (1 + d)` where `d` is the shortest distance between
//! two senses through a common ancestor.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ReformulationError, ReformulationResult};

/// Opaque handle for one sense of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynsetId(pub u32);

/// Word-sense lookup and pairwise sense relatedness.
pub trait LexicalDatabase: Send + Sync {
    /// All senses of `word`. Unknown words yield an empty list.
    fn synsets(&self, word: &str) -> Vec<SynsetId>;

    /// Relatedness in `[0, 1]`, or `None` when the senses are not connected.
    fn relatedness(&self, a: SynsetId, b: SynsetId) -> Option<f64>;
}

/// A lexical database that knows no words.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyLexicon;

impl LexicalDatabase for EmptyLexicon {
    fn synsets(&self, _word: &str) -> Vec<SynsetId> {
        Vec::new()
    }

    fn relatedness(&self, _a: SynsetId, _b: SynsetId) -> Option<f64> {
        None
    }
}

/// Lemma key form: lowercase, inner whitespace joined with `_`.
pub fn normalize_lemma(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// One synset as written in a taxonomy file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynsetEntry {
    /// Unique synset name, e.g. `dog.n.01`
    pub name: String,
    /// Words that express this sense
    #[serde(default)]
    pub lemmas: Vec<String>,
    /// Names of more general synsets
    #[serde(default)]
    pub hypernyms: Vec<String>,
}

/// In-memory hypernym taxonomy.
#[derive(Clone, Debug, Default)]
pub struct Taxonomy {
    names: Vec<String>,
    hypernyms: Vec<Vec<SynsetId>>,
    lemma_index: HashMap<String, Vec<SynsetId>>,
}

impl Taxonomy {
    /// Build from synset entries. Hypernyms may reference entries declared
    /// later in the list.
    pub fn from_entries(entries: Vec<SynsetEntry>) -> ReformulationResult<Self> {
        let mut ids: HashMap<String, SynsetId> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let id = u32::try_from(idx)
                .map(SynsetId)
                .map_err(|_| ReformulationError::TaxonomyParse("too many synsets".to_string()))?;
            if ids.insert(entry.name.clone(), id).is_some() {
                return Err(ReformulationError::TaxonomyParse(format!(
                    "duplicate synset '{}'",
                    entry.name
                )));
            }
        }

        let mut hypernyms = Vec::with_capacity(entries.len());
        let mut lemma_index: HashMap<String, Vec<SynsetId>> = HashMap::new();

        for entry in &entries {
            let id = ids[&entry.name];
            let parents = entry
                .hypernyms
                .iter()
                .map(|parent| {
                    ids.get(parent).copied().ok_or_else(|| {
                        ReformulationError::TaxonomyParse(format!(
                            "synset '{}' names unknown hypernym '{}'",
                            entry.name, parent
                        ))
                    })
                })
                .collect::<ReformulationResult<Vec<_>>>()?;
            hypernyms.push(parents);

            for lemma in &entry.lemmas {
                let senses = lemma_index.entry(normalize_lemma(lemma)).or_default();
                if !senses.contains(&id) {
                    senses.push(id);
                }
            }
        }

        let names = entries.into_iter().map(|entry| entry.name).collect();

        Ok(Self {
            names,
            hypernyms,
            lemma_index,
        })
    }

    /// Load from TOML configuration file.
    ///
    /// Expected format:
    /// ```toml
    /// [[synsets]]
    /// name = "dog.n.01"
    /// lemmas = ["dog", "domestic dog"]
    /// hypernyms = ["canine.n.01"]
    /// ```
    pub fn from_toml_file(path: &Path) -> ReformulationResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded taxonomy from {} ({} synsets, {} lemmas)",
            path.display(),
            taxonomy.len(),
            taxonomy.lemma_index.len()
        );
        Ok(taxonomy)
    }

    /// Load from TOML string.
    pub fn from_toml_str(content: &str) -> ReformulationResult<Self> {
        #[derive(Deserialize)]
        struct TomlTaxonomy {
            #[serde(default)]
            synsets: Vec<SynsetEntry>,
        }

        let parsed: TomlTaxonomy = toml::from_str(content)
            .map_err(|e| ReformulationError::TaxonomyParse(e.to_string()))?;
        Self::from_entries(parsed.synsets)
    }

    /// Number of synsets.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Declared name of a synset.
    pub fn name(&self, id: SynsetId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Shortest hypernym-path distance between two senses through a common
    /// ancestor (a sense is its own ancestor at distance 0).
    pub fn shortest_path_distance(&self, a: SynsetId, b: SynsetId) -> Option<usize> {
        if a.0 as usize >= self.len() || b.0 as usize >= self.len() {
            return None;
        }

        let from_a = self.ancestor_depths(a);
        let from_b = self.ancestor_depths(b);

        from_a
            .iter()
            .filter_map(|(ancestor, depth_a)| from_b.get(ancestor).map(|depth_b| depth_a + depth_b))
            .min()
    }

    /// Breadth-first walk up the hypernym links, minimum depth per ancestor.
    fn ancestor_depths(&self, start: SynsetId) -> HashMap<SynsetId, usize> {
        let mut depths = HashMap::new();
        let mut queue = VecDeque::new();
        depths.insert(start, 0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let depth = depths[&current];
            let parents = self
                .hypernyms
                .get(current.0 as usize)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for parent in parents {
                if !depths.contains_key(parent) {
                    depths.insert(*parent, depth + 1);
                    queue.push_back(*parent);
                }
            }
        }

        depths
    }
}

impl LexicalDatabase for Taxonomy {
    fn synsets(&self, word: &str) -> Vec<SynsetId> {
        self.lemma_index
            .get(&normalize_lemma(word))
            .cloned()
            .unwrap_or_default()
    }

    fn relatedness(&self, a: SynsetId, b: SynsetId) -> Option<f64> {
        self.shortest_path_distance(a, b)
            .map(|distance| 1.0 / (distance as f64 + 1.0))
    }
}
