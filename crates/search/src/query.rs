//! Query parser
//!
//! A query is a whitespace-separated list of terms. A term prefixed with a
//! single `-` is an exclude-term; anything else is an include-term. Stop
//! words are dropped after classification, and both sets are deduplicated
//! and sorted so sequential and parallel evaluation walk the same terms in
//! the same order.

use crate::stopwords::StopWordSet;
use crate::tokenizer::{split_into_words, validate_text};
use sift_core::{Error, Result};
use std::collections::BTreeSet;

/// Parsed query: include-terms and exclude-terms
///
/// The two sets never overlap; a term given both ways is only excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

/// One classified query token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'a> {
    term: &'a str,
    is_exclude: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    match token.strip_prefix('-') {
        Some("") => Err(Error::invalid_argument(
            "minus-word is missing its term: '-'",
        )),
        Some(rest) if rest.starts_with('-') => Err(Error::invalid_argument(format!(
            "minus-word has more than one leading minus: '{}'",
            token
        ))),
        Some(rest) => Ok(QueryWord {
            term: rest,
            is_exclude: true,
        }),
        None => Ok(QueryWord {
            term: token,
            is_exclude: false,
        }),
    }
}

impl Query {
    /// Parse raw query text
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `text` contains a control
    /// character, or a token is exactly `-` or starts with `--`.
    pub fn parse(text: &str, stop_words: &StopWordSet) -> Result<Self> {
        validate_text(text, "Query")?;

        let mut query = Query::default();
        for token in split_into_words(text) {
            let word = parse_query_word(token)?;
            if stop_words.contains(word.term) {
                continue;
            }
            if word.is_exclude {
                query.exclude.insert(word.term.to_string());
            } else {
                query.include.insert(word.term.to_string());
            }
        }

        let exclude = &query.exclude;
        query.include.retain(|term| !exclude.contains(term));
        Ok(query)
    }

    /// Include-terms, ascending
    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    /// Exclude-terms, ascending
    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    /// Check whether the query has no terms at all
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}
