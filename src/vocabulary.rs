use crate::error::{EvoqueryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Immutable mapping from a category name to the set of interchangeable
/// words (synonyms) in that category. The category name is itself a member
/// of its own set, and a word belongs to at most one category so lookup by
/// word is unambiguous.
///
/// Ordered maps keep word enumeration deterministic, which seeded mutation
/// runs rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    content: BTreeMap<String, BTreeSet<String>>,
}

impl Vocabulary {
    pub fn new(content: BTreeMap<String, BTreeSet<String>>) -> Result<Self> {
        let vocabulary = Self { content };
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Load the persisted key/value document: category name -> list of words.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(document: &str) -> Result<Self> {
        let content: BTreeMap<String, BTreeSet<String>> = serde_json::from_str(document)
            .map_err(|e| {
                EvoqueryError::VocabularyFormat(format!("failed to parse document: {}", e))
            })?;
        Self::new(content)
    }

    fn validate(&self) -> Result<()> {
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (category, words) in &self.content {
            if !words.contains(category) {
                return Err(EvoqueryError::VocabularyFormat(format!(
                    "category '{}' is missing from its own word set",
                    category
                )));
            }
            for word in words {
                if word.is_empty() {
                    return Err(EvoqueryError::VocabularyFormat(format!(
                        "category '{}' contains an empty word",
                        category
                    )));
                }
                if let Some(previous) = owners.insert(word, category) {
                    return Err(EvoqueryError::VocabularyFormat(format!(
                        "word '{}' appears in both '{}' and '{}'",
                        word, previous, category
                    )));
                }
            }
        }
        Ok(())
    }

    /// All words across all categories, flattened.
    pub fn words(&self) -> Vec<&str> {
        self.content
            .values()
            .flat_map(|words| words.iter().map(String::as_str))
            .collect()
    }

    /// Total number of words across all categories.
    pub fn word_count(&self) -> usize {
        self.content.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.content.keys().map(String::as_str)
    }

    /// Category owning `word`, if any.
    pub fn category_of(&self, word: &str) -> Option<&str> {
        self.content
            .iter()
            .find(|(_, words)| words.contains(word))
            .map(|(category, _)| category.as_str())
    }

    /// The full synonym set containing `word`.
    pub fn similar_words(&self, word: &str) -> Result<&BTreeSet<String>> {
        self.content
            .values()
            .find(|words| words.contains(word))
            .ok_or_else(|| EvoqueryError::Lookup(word.to_string()))
    }

    /// A word needs no quoting in the rendered query when it has no spaces.
    pub fn is_word(word: &str) -> bool {
        !word.contains(' ')
    }

    /// Union of the two category maps; on duplicate category keys the
    /// right-hand vocabulary wins. The merged map is re-validated.
    pub fn merge(&self, other: &Vocabulary) -> Result<Vocabulary> {
        let mut content = self.content.clone();
        for (category, words) in &other.content {
            content.insert(category.clone(), words.clone());
        }
        Self::new(content)
    }
}
