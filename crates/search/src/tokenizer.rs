//! Whitespace tokenizer
//!
//! Terms are whitespace-delimited tokens taken verbatim: no lowercasing,
//! no punctuation stripping, no stemming.

use sift_core::{Error, Result};

/// Check that `text` contains no control characters (code points below 0x20)
#[inline]
pub fn is_valid_text(text: &str) -> bool {
    !text.chars().any(|c| (c as u32) < 0x20)
}

/// Reject `text` if it contains a control character
///
/// `what` names the rejected input in the error message.
pub fn validate_text(text: &str, what: &str) -> Result<()> {
    if is_valid_text(text) {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "{} contains forbidden control characters",
            what
        )))
    }
}

/// Split text into whitespace-delimited terms
///
/// # Example
///
/// ```
/// use sift_search::tokenizer::split_into_words;
///
/// let words = split_into_words("  fluffy cat   fluffy tail ");
/// assert_eq!(words, vec!["fluffy", "cat", "fluffy", "tail"]);
/// ```
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
