//! Query Reformulation Module
//!
//! Labels how a user's search query differs from the query they issued just
//! before it.
//!
//! ## Architecture
//!
//! ```text
//! (previous, query): ("new york times", "nyt")
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────────┐
//! │  Detector cascade (first match wins)              │
//! │  same → wordReorder → whitespacePunctuation →     │
//! │  addWords → removeWords → urlStrip → stemming →   │
//! │  formAcronym → expandAcronym → abbreviation →     │
//! │  substring → superstring → wordSubstitution →     │
//! │  spellingCorrection → new                         │
//! └───────┬──────────────┬──────────────┬────────────┘
//!         ▼              ▼              ▼
//!   ┌──────────┐  ┌─────────────┐  ┌──────────────────┐
//!   │ Snowball │  │ Levenshtein │  │ SimilarityEngine │
//!   │ stemmer  │  │ distance    │  │ (lexicon + LRU)  │
//!   └──────────┘  └─────────────┘  └──────────────────┘
//!
//! Result: formAcronym
//! ```

pub mod abbreviations;
pub mod category;
pub mod classifier;
pub mod config;
pub mod detectors;
pub mod edit_distance;
pub mod error;
pub mod lexicon;
pub mod similarity;
pub mod stemming;

// Re-export primary types
pub use abbreviations::AbbreviationTable;
pub use category::{ReformulationCategory, UnknownCategory};
pub use classifier::{Classification, QueryPairClassifier};
pub use config::{ClassifierConfig, SimilarityConfig};
pub use detectors::{run_cascade, CascadeContext, Detector, DetectorFn, CASCADE};
pub use edit_distance::levenshtein;
pub use error::{ReformulationError, ReformulationResult};
pub use lexicon::{EmptyLexicon, LexicalDatabase, SynsetEntry, SynsetId, Taxonomy};
pub use similarity::{CacheStats, ExpansionBudget, SimilarityEngine};
pub use stemming::{SnowballStemmer, TokenStemmer};
