//! Reformulation categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a user's query differs from their previous one.
///
/// Variants are declared in cascade precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReformulationCategory {
    Same,
    WordReorder,
    WhitespacePunctuation,
    AddWords,
    RemoveWords,
    UrlStrip,
    Stemming,
    FormAcronym,
    ExpandAcronym,
    Abbreviation,
    Substring,
    Superstring,
    WordSubstitution,
    SpellingCorrection,
    New,
}

impl ReformulationCategory {
    /// Every category in precedence order.
    pub const ALL: [ReformulationCategory; 15] = [
        Self::Same,
        Self::WordReorder,
        Self::WhitespacePunctuation,
        Self::AddWords,
        Self::RemoveWords,
        Self::UrlStrip,
        Self::Stemming,
        Self::FormAcronym,
        Self::ExpandAcronym,
        Self::Abbreviation,
        Self::Substring,
        Self::Superstring,
        Self::WordSubstitution,
        Self::SpellingCorrection,
        Self::New,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::WordReorder => "wordReorder",
            Self::WhitespacePunctuation => "whitespacePunctuation",
            Self::AddWords => "addWords",
            Self::RemoveWords => "removeWords",
            Self::UrlStrip => "urlStrip",
            Self::Stemming => "stemming",
            Self::FormAcronym => "formAcronym",
            Self::ExpandAcronym => "expandAcronym",
            Self::Abbreviation => "abbreviation",
            Self::Substring => "substring",
            Self::Superstring => "superstring",
            Self::WordSubstitution => "wordSubstitution",
            Self::SpellingCorrection => "spellingCorrection",
            Self::New => "new",
        }
    }
}

impl fmt::Display for ReformulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label that names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reformulation category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ReformulationCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
