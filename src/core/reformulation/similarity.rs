//! Lexical Similarity Engine
//!
//! Word and query relatedness on top of a [`LexicalDatabase`], with three
//! memo tables and a budget-bounded alignment search.
//!
//! # Caches
//!
//! ```text
//!                  SimilarityEngine
//!                         |
//!        +----------------+----------------+
//!        |                |                |
//!        v                v                v
//!   word → synsets   synset pair →    word pair →
//!                    relatedness      best relatedness
//! ```
//!
//! All three tables live behind a single `RwLock`. Lookups take the read lock
//! and use `peek`, so concurrent readers never block each other; inserts and
//! [`SimilarityEngine::reset_caches`] take the write lock, which makes a reset
//! atomic across the three tables. Each table is a fixed-capacity LRU.
//!
//! # Alignment
//!
//! [`SimilarityEngine::alignment_score`] tries every pairing order of the two
//! word sequences, which is factorial in the worst case. Every recursive call
//! consumes one unit of an [`ExpansionBudget`]; once the budget is spent every
//! further call returns 0, so the score may fall below the true optimum.
//! [`SimilarityEngine::query_similarity`] creates one budget per call.

use std::num::NonZeroUsize;
use std::sync::{Arc, PoisonError, RwLock};

use lru::LruCache;

use super::config::SimilarityConfig;
use super::lexicon::{EmptyLexicon, LexicalDatabase, SynsetId};

/// Bound on recursive expansions for one top-level alignment query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpansionBudget {
    remaining: usize,
}

impl ExpansionBudget {
    pub fn new(limit: usize) -> Self {
        Self { remaining: limit }
    }

    /// Consume one expansion. Returns `false` once the budget is spent.
    pub fn try_expand(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Snapshot of memo table occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub synset_entries: usize,
    pub sense_entries: usize,
    pub word_entries: usize,
    /// Number of full resets since the engine was created
    pub resets: u64,
}

struct SimilarityCaches {
    synsets: LruCache<String, Arc<[SynsetId]>>,
    senses: LruCache<(SynsetId, SynsetId), f64>,
    words: LruCache<(String, String), f64>,
    resets: u64,
}

impl SimilarityCaches {
    fn new(config: &SimilarityConfig) -> Self {
        Self {
            synsets: LruCache::new(capacity(config.synset_cache_capacity)),
            senses: LruCache::new(capacity(config.sense_cache_capacity)),
            words: LruCache::new(capacity(config.word_cache_capacity)),
            resets: 0,
        }
    }
}

fn capacity(requested: usize) -> NonZeroUsize {
    NonZeroUsize::new(requested).unwrap_or(NonZeroUsize::MIN)
}

/// Memoizing relatedness engine over a lexical database.
pub struct SimilarityEngine {
    lexicon: Arc<dyn LexicalDatabase>,
    caches: RwLock<SimilarityCaches>,
    config: SimilarityConfig,
}

impl SimilarityEngine {
    pub fn new(lexicon: Arc<dyn LexicalDatabase>, config: SimilarityConfig) -> Self {
        Self {
            lexicon,
            caches: RwLock::new(SimilarityCaches::new(&config)),
            config,
        }
    }

    /// Engine over a lexicon that knows no words.
    pub fn empty() -> Self {
        Self::new(Arc::new(EmptyLexicon), SimilarityConfig::default())
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Senses of `word`, cached. Unknown words cache an empty list.
    pub fn synsets_of(&self, word: &str) -> Arc<[SynsetId]> {
        if let Some(hit) = self.read_caches(|caches| caches.synsets.peek(word).cloned()) {
            return hit;
        }

        let senses: Arc<[SynsetId]> = self.lexicon.synsets(word).into();
        self.write_caches(|caches| {
            caches.synsets.put(word.to_string(), Arc::clone(&senses));
        });
        senses
    }

    /// Relatedness between two senses; undefined maps to 0.
    pub fn sense_similarity(&self, a: SynsetId, b: SynsetId) -> f64 {
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(hit) = self.read_caches(|caches| caches.senses.peek(&key).copied()) {
            return hit;
        }

        let similarity = self.lexicon.relatedness(a, b).unwrap_or(0.0);
        self.write_caches(|caches| {
            caches.senses.put(key, similarity);
        });
        similarity
    }

    /// Best relatedness over all sense pairs of two words. Identical strings
    /// score 1.
    pub fn word_similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }

        let key = (a.to_string(), b.to_string());
        if let Some(hit) = self.read_caches(|caches| caches.words.peek(&key).copied()) {
            return hit;
        }

        let senses_a = self.synsets_of(a);
        let senses_b = self.synsets_of(b);
        let mut best = 0.0;
        for sense_a in senses_a.iter() {
            for sense_b in senses_b.iter() {
                let similarity = self.sense_similarity(*sense_a, *sense_b);
                if similarity > best {
                    best = similarity;
                }
            }
        }

        self.write_caches(|caches| {
            caches.words.put(key, best);
        });
        best
    }

    /// Best total word relatedness over every pairing order of `a` and `b`.
    pub fn alignment_score(&self, a: &[&str], b: &[&str], budget: &mut ExpansionBudget) -> f64 {
        if !budget.try_expand() {
            return 0.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let mut best = 0.0;
        for i in 0..a.len() {
            let rest_a = without(a, i);
            for j in 0..b.len() {
                let rest_b = without(b, j);
                let score = self.alignment_score(&rest_a, &rest_b, budget)
                    + self.word_similarity(a[i], b[j]);
                if score > best {
                    best = score;
                }
            }
        }
        best
    }

    /// Alignment score of two queries normalized by the longer token count.
    /// Two token-less queries score 0.
    pub fn query_similarity(&self, a: &str, b: &str) -> f64 {
        let tokens_a: Vec<&str> = a.split_whitespace().collect();
        let tokens_b: Vec<&str> = b.split_whitespace().collect();
        let longest = tokens_a.len().max(tokens_b.len());
        if longest == 0 {
            return 0.0;
        }

        let mut budget = ExpansionBudget::new(self.config.expansion_budget);
        let score = self.alignment_score(&tokens_a, &tokens_b, &mut budget);
        if budget.is_exhausted() {
            log::debug!(
                "Alignment budget of {} exhausted for {:?} / {:?}; score may be below optimum",
                self.config.expansion_budget,
                a,
                b
            );
        }
        score / longest as f64
    }

    /// Drop every memoized value from all three tables at once.
    pub fn reset_caches(&self) {
        self.write_caches(|caches| {
            caches.synsets.clear();
            caches.senses.clear();
            caches.words.clear();
            caches.resets += 1;
        });
        log::debug!("Similarity caches reset");
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.read_caches(|caches| CacheStats {
            synset_entries: caches.synsets.len(),
            sense_entries: caches.senses.len(),
            word_entries: caches.words.len(),
            resets: caches.resets,
        })
    }

    // The tables only hold memoized values, so a poisoned lock is still usable.
    fn read_caches<T>(&self, f: impl FnOnce(&SimilarityCaches) -> T) -> T {
        let caches = self.caches.read().unwrap_or_else(PoisonError::into_inner);
        f(&caches)
    }

    fn write_caches<T>(&self, f: impl FnOnce(&mut SimilarityCaches) -> T) -> T {
        let mut caches = self.caches.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut caches)
    }
}

fn without<'a>(words: &[&'a str], index: usize) -> Vec<&'a str> {
    words
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, word)| *word)
        .collect()
}
