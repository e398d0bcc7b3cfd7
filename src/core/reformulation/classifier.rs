//! Query Pair Classifier
//!
//! Owns the collaborators the detector cascade needs and labels each
//! `(previous, query)` pair with exactly one [`ReformulationCategory`].

use std::sync::Arc;

use serde::Serialize;

use super::abbreviations::AbbreviationTable;
use super::category::ReformulationCategory;
use super::config::ClassifierConfig;
use super::detectors::{run_cascade, CascadeContext};
use super::error::ReformulationResult;
use super::lexicon::{EmptyLexicon, LexicalDatabase, Taxonomy};
use super::similarity::SimilarityEngine;
use super::stemming::{SnowballStemmer, TokenStemmer};

/// Category of a pair together with its normalized alignment score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub category: ReformulationCategory,
    /// Best token alignment divided by the longer token count, in `[0, 1]`
    pub query_similarity: f64,
}

pub struct QueryPairClassifier {
    engine: SimilarityEngine,
    stemmer: Box<dyn TokenStemmer>,
    abbreviations: AbbreviationTable,
    config: ClassifierConfig,
}

impl QueryPairClassifier {
    /// Create a classifier, loading the taxonomy and abbreviation files
    /// named in the configuration.
    pub fn new(config: ClassifierConfig) -> ReformulationResult<Self> {
        config.validate()?;

        let lexicon: Arc<dyn LexicalDatabase> = match config.taxonomy_path {
            Some(ref path) => Arc::new(Taxonomy::from_toml_file(path)?),
            None => {
                log::debug!("No taxonomy configured; word substitution will never match");
                Arc::new(EmptyLexicon)
            }
        };

        let abbreviations = match config.abbreviations_path {
            Some(ref path) => AbbreviationTable::from_file(path)?,
            None => AbbreviationTable::new(),
        };

        let engine = SimilarityEngine::new(lexicon, config.similarity.clone());

        Ok(Self {
            engine,
            stemmer: Box::new(SnowballStemmer::new()),
            abbreviations,
            config,
        })
    }

    /// Create a classifier with explicit components.
    pub fn from_components(
        engine: SimilarityEngine,
        stemmer: Box<dyn TokenStemmer>,
        abbreviations: AbbreviationTable,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            engine,
            stemmer,
            abbreviations,
            config,
        }
    }

    /// Empty lexicon, Snowball stemmer, no abbreviations.
    pub fn new_minimal() -> Self {
        Self::from_components(
            SimilarityEngine::empty(),
            Box::new(SnowballStemmer::new()),
            AbbreviationTable::new(),
            ClassifierConfig::default(),
        )
    }

    /// Label a query pair. Total over all inputs, empty strings included.
    pub fn classify(&self, previous: &str, query: &str) -> ReformulationCategory {
        let category = run_cascade(&self.context(), previous, query);
        log::trace!("{:?} -> {:?}: {}", previous, query, category);
        category
    }

    /// Label a query pair and report its query similarity.
    pub fn analyze(&self, previous: &str, query: &str) -> Classification {
        Classification {
            category: self.classify(previous, query),
            query_similarity: self.engine.query_similarity(previous, query),
        }
    }

    /// Trim, collapse inner whitespace and lowercase a raw query.
    pub fn normalize(raw: &str) -> String {
        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn context(&self) -> CascadeContext<'_> {
        CascadeContext {
            engine: &self.engine,
            stemmer: self.stemmer.as_ref(),
            abbreviations: &self.abbreviations,
            substitution_threshold: self.config.substitution_threshold,
            max_spelling_distance: self.config.max_spelling_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use ReformulationCategory::*;

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
lemmas = ["car", "auto", "automobile"]
hypernyms = ["vehicle.n.01"]

[[synsets]]
name = "truck.n.01"
lemmas = ["truck", "lorry"]
hypernyms = ["vehicle.n.01"]

[[synsets]]
name = "new_york.n.01"
lemmas = ["new york", "big apple"]
hypernyms = ["entity.n.01"]
"#;

    fn with_taxonomy() -> QueryPairClassifier {
        let taxonomy = Taxonomy::from_toml_str(TAXONOMY).unwrap();
        QueryPairClassifier::from_components(
            SimilarityEngine::new(Arc::new(taxonomy), Default::default()),
            Box::new(SnowballStemmer::new()),
            AbbreviationTable::new(),
            ClassifierConfig::default(),
        )
    }

    #[rstest]
    #[case("", "", Same)]
    #[case("weather", "weather", Same)]
    #[case("foo bar", "bar foo", WordReorder)]
    #[case("big dog", "big.dog", WhitespacePunctuation)]
    #[case("new york", "new york hotel", AddWords)]
    #[case("new york hotel", "new york", RemoveWords)]
    #[case("http www.example.com", "example", UrlStrip)]
    #[case("running shoes", "run shoe", Stemming)]
    #[case("new york times", "nyt", FormAcronym)]
    #[case("nyt", "new york times", ExpandAcronym)]
    #[case("univ of washington", "university of washington", Abbreviation)]
    #[case("facebook", "book", Substring)]
    #[case("book", "facebook", Superstring)]
    #[case("recieve", "receive", SpellingCorrection)]
    #[case("cats", "dogs", New)]
    fn test_classify_minimal(
        #[case] previous: &str,
        #[case] query: &str,
        #[case] expected: ReformulationCategory,
    ) {
        let classifier = QueryPairClassifier::new_minimal();
        assert_eq!(classifier.classify(previous, query), expected);
    }

    #[test]
    fn test_reorder_wins_over_whitespace_punctuation() {
        let classifier = QueryPairClassifier::new_minimal();
        // Both detectors would match; reorder comes first
        assert_eq!(classifier.classify("foo-bar", "foo bar"), WordReorder);
    }

    #[test]
    fn test_single_token_prefix_is_abbreviation_not_substring() {
        let classifier = QueryPairClassifier::new_minimal();
        assert_eq!(classifier.classify("facebook", "face"), Abbreviation);
    }

    #[test]
    fn test_word_substitution_token_wise() {
        let classifier = with_taxonomy();
        assert_eq!(classifier.classify("cheap auto", "cheap lorry"), WordSubstitution);
        assert_eq!(classifier.classify("cheap car", "cheap automobile"), WordSubstitution);
    }

    #[test]
    fn test_word_substitution_whole_string_lemma() {
        let classifier = with_taxonomy();
        assert_eq!(classifier.classify("new york", "big apple"), WordSubstitution);
    }

    #[test]
    fn test_unrelated_words_are_new() {
        let classifier = with_taxonomy();
        assert_eq!(classifier.classify("cheap auto", "quick brown"), New);
    }

    #[test]
    fn test_analyze_reports_similarity() {
        let classifier = with_taxonomy();
        let result = classifier.analyze("auto lorry", "truck car");
        assert_eq!(result.category, WordSubstitution);
        assert_eq!(result.query_similarity, 1.0);

        let empty = classifier.analyze("", "");
        assert_eq!(empty.category, Same);
        assert_eq!(empty.query_similarity, 0.0);
    }

    #[test]
    fn test_reset_does_not_change_results() {
        let classifier = with_taxonomy();
        let before = classifier.classify("cheap auto", "cheap lorry");
        classifier.engine().reset_caches();
        assert_eq!(classifier.classify("cheap auto", "cheap lorry"), before);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(QueryPairClassifier::normalize("  New   York\tTimes "), "new york times");
        assert_eq!(QueryPairClassifier::normalize(""), "");
    }

    #[test]
    fn test_new_with_default_config() {
        let classifier = QueryPairClassifier::new(ClassifierConfig::default()).unwrap();
        assert_eq!(classifier.classify("a b", "b a"), WordReorder);
    }

    #[test]
    fn test_new_with_missing_taxonomy_fails() {
        let config = ClassifierConfig {
            taxonomy_path: Some("/nonexistent/taxonomy.toml".into()),
            ..ClassifierConfig::default()
        };
        assert!(QueryPairClassifier::new(config).is_err());
    }
}
