//! Stop-word set
//!
//! Immutable set of terms excluded from both indexing and querying.

use crate::tokenizer::{split_into_words, validate_text};
use sift_core::Result;
use std::collections::BTreeSet;

/// Set of terms ignored by the index and the query parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    /// Build a stop-word set from individual words
    ///
    /// Empty strings are dropped and duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if any word contains a control
    /// character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            validate_text(word, "Stop word")?;
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Build a stop-word set from whitespace-separated text
    pub fn from_text(text: &str) -> Result<Self> {
        validate_text(text, "Stop words text")?;
        Self::new(split_into_words(text))
    }

    /// Empty set: nothing is filtered
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether `word` is a stop word
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate stop words in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let stop = StopWordSet::from_text("и в на").unwrap();
        assert_eq!(stop.len(), 3);
        assert!(stop.contains("и"));
        assert!(stop.contains("на"));
        assert!(!stop.contains("кот"));
    }

    #[test]
    fn test_new_drops_empty_and_duplicates() {
        let stop = StopWordSet::new(["in", "", "the", "in"]).unwrap();
        assert_eq!(stop.iter().collect::<Vec<_>>(), vec!["in", "the"]);
    }

    #[test]
    fn test_control_character_rejected() {
        let err = StopWordSet::new(["ok", "bad\u{3}"]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_from_text_control_character_rejected() {
        assert!(StopWordSet::from_text("in\tthe").is_err());
    }

    #[test]
    fn test_empty() {
        let stop = StopWordSet::empty();
        assert!(stop.is_empty());
        assert!(!stop.contains(""));
    }
}
