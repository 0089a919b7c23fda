use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{VocabError, VocabResult};
use crate::utils::trim_line;

/// Number of items the prompt asks the model for.
pub const MIN_VOCABULARY_ITEMS: usize = 5;

pub const MISSING_THEME_MESSAGE: &str = "Category is required";

/// Topic the vocabulary list is generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme(String);

impl Theme {
    /// Control characters become spaces so they cannot break the prompt.
    /// Anything non-empty after trimming is accepted.
    pub fn parse(raw: Option<&str>) -> VocabResult<Self> {
        let cleaned: String = raw
            .unwrap_or_default()
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        match trim_line(&cleaned) {
            Some(theme) => Ok(Theme(theme.to_string())),
            None => Err(VocabError::Validation(MISSING_THEME_MESSAGE.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys the model adds beyond the schema (readings, notes, ...) are kept in
// `extra` so they reach the caller untouched.

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyPart {
    pub kanji: String,
    pub romaji: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub kanji: String,
    pub romaji: String,
    pub english: String,
    pub parts: Vec<VocabularyPart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyDocument {
    pub vocabulary: Vec<VocabularyItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyDocument {
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn meets_minimum(&self) -> bool {
        self.len() >= MIN_VOCABULARY_ITEMS
    }
}
