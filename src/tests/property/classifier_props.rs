//! Property-based tests for the query pair classifier
//!
//! Tests invariants:
//! - Classification is total over arbitrary strings
//! - Identical non-empty queries are always `same`
//! - Resetting the similarity caches never changes a category
//! - Query similarity is within [0, 1]
//! - addWords(a, b) == removeWords(b, a)

use std::sync::Arc;

use proptest::prelude::*;

use crate::core::reformulation::detectors::{add_words, remove_words, word_reorder};
use crate::core::reformulation::{
    AbbreviationTable, CascadeContext, ClassifierConfig, SnowballStemmer, QueryPairClassifier,
    ReformulationCategory, SimilarityEngine, Taxonomy,
};

const TAXONOMY: &str = r#"
[[synsets]]
name = "entity.n.01"
lemmas = ["entity"]

[[synsets]]
name = "vehicle.n.01"
lemmas = ["vehicle"]
hypernyms = ["entity.n.01"]

[[synsets]]
name = "car.n.01"
lemmas = ["car", "auto"]
hypernyms = ["vehicle.n.01"]

[[synsets]]
name = "truck.n.01"
lemmas = ["truck", "lorry"]
hypernyms = ["vehicle.n.01"]
"#;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Queries built from a small vocabulary so detectors actually fire
fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "car", "auto", "truck", "lorry", "cars", "new", "york", "times", "nyt", "http",
            "www.example.com", "example", "a-b", "x,y", "n.y.t.", "",
        ]),
        0..4,
    )
    .prop_map(|words| words.join(" "))
}

fn classifier() -> QueryPairClassifier {
    let taxonomy = Taxonomy::from_toml_str(TAXONOMY).expect("fixture taxonomy parses");
    QueryPairClassifier::from_components(
        SimilarityEngine::new(Arc::new(taxonomy), Default::default()),
        Box::new(SnowballStemmer::new()),
        AbbreviationTable::new(),
        ClassifierConfig::default(),
    )
}

proptest! {
    /// Property: arbitrary text (unicode, punctuation, empty) never panics
    #[test]
    fn prop_classify_is_total(a in "\\PC{0,24}", b in "\\PC{0,24}") {
        let classifier = QueryPairClassifier::new_minimal();
        let category = classifier.classify(&a, &b);
        prop_assert!(ReformulationCategory::ALL.contains(&category));
    }

    #[test]
    fn prop_identical_queries_are_same(q in "\\PC{1,30}") {
        let classifier = QueryPairClassifier::new_minimal();
        prop_assert_eq!(classifier.classify(&q, &q), ReformulationCategory::Same);
    }

    /// Property: cache state affects speed only
    #[test]
    fn prop_reset_does_not_change_category(a in arb_query(), b in arb_query()) {
        let classifier = classifier();
        let warm = classifier.classify(&a, &b);
        classifier.engine().reset_caches();
        let cold = classifier.classify(&a, &b);
        prop_assert_eq!(warm, cold);
    }

    #[test]
    fn prop_query_similarity_is_bounded(a in arb_query(), b in arb_query()) {
        let classifier = classifier();
        let result = classifier.analyze(&a, &b);
        prop_assert!((0.0..=1.0).contains(&result.query_similarity),
            "similarity out of range: {}", result.query_similarity);
    }

    #[test]
    fn prop_add_and_remove_words_mirror(a in arb_query(), b in arb_query()) {
        let engine = SimilarityEngine::empty();
        let stemmer = SnowballStemmer::new();
        let abbreviations = AbbreviationTable::new();
        let ctx = CascadeContext {
            engine: &engine,
            stemmer: &stemmer,
            abbreviations: &abbreviations,
            substitution_threshold: 0.2,
            max_spelling_distance: 2,
        };
        prop_assert_eq!(add_words(&ctx, &a, &b), remove_words(&ctx, &b, &a));
        prop_assert_eq!(word_reorder(&ctx, &a, &b), word_reorder(&ctx, &b, &a));
    }
}
