//! Inverted index with document lifecycle
//!
//! This module provides:
//! - DocumentRecord: per-document rating, status and term frequencies
//! - InvertedIndex: document store plus term -> posting list mapping
//! - Add / remove (sequential or parallel) / enumerate documents
//!
//! # Consistency
//!
//! Each document's own term-frequency map is the source of truth. The
//! posting map (term -> document -> tf) is derived from it and is only
//! changed through `link_postings` / `unlink_postings`, both of which are
//! driven by that map. A `(term, id)` pair is therefore in the posting map
//! if and only if `term` is in document `id`'s term map, with equal tf.
//!
//! # Thread Safety
//!
//! The index is not internally synchronized. Mutations take `&mut self`,
//! so the borrow checker serializes them against in-flight searches.

use crate::stopwords::StopWordSet;
use crate::tokenizer::{split_into_words, validate_text};
use rayon::prelude::*;
use sift_core::{DocumentId, DocumentStatus, Error, ExecutionMode, Rating, Result};
use std::collections::{btree_map, BTreeMap, HashMap};
use std::iter::Copied;
use tracing::debug;

/// Term -> normalized term frequency
pub type TermFrequencies = BTreeMap<String, f64>;

/// Document -> normalized term frequency, for one term
pub type PostingList = BTreeMap<DocumentId, f64>;

static EMPTY_FREQUENCIES: TermFrequencies = BTreeMap::new();

// ============================================================================
// DocumentRecord
// ============================================================================

/// Stored metadata and terms of one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    /// Average of the caller-supplied ratings
    pub rating: Rating,
    /// Caller-assigned status
    pub status: DocumentStatus,
    /// Distinct non-stop terms with `count / total_terms` frequencies
    pub term_freqs: TermFrequencies,
}

/// Mean of `ratings`, truncated toward zero; 0 when empty
pub fn average_rating(ratings: &[Rating]) -> Rating {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as Rating
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Inverted index owning every document and its postings
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    stop_words: StopWordSet,
    documents: BTreeMap<DocumentId, DocumentRecord>,
    postings: HashMap<String, PostingList>,
}

impl InvertedIndex {
    /// Create an empty index filtering `stop_words`
    pub fn new(stop_words: StopWordSet) -> Self {
        Self {
            stop_words,
            documents: BTreeMap::new(),
            postings: HashMap::new(),
        }
    }

    /// Stop words applied on add and on query
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Index a document
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `id` is negative, already
    /// present, or `text` contains a control character. Nothing is
    /// inserted when an error is returned.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        if id < 0 {
            return Err(Error::invalid_argument(format!(
                "document id {} is negative",
                id
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(Error::invalid_argument(format!(
                "document id {} is already in use",
                id
            )));
        }
        validate_text(text, "Document text")?;

        let words: Vec<&str> = split_into_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect();
        let inv_word_count = 1.0 / words.len() as f64;

        let mut term_freqs = TermFrequencies::new();
        for word in &words {
            *term_freqs.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
        }

        self.link_postings(id, &term_freqs);
        debug!(
            target: "sift::index",
            document_id = id,
            terms = term_freqs.len(),
            status = %status,
            "Document added"
        );
        self.documents.insert(
            id,
            DocumentRecord {
                rating: average_rating(ratings),
                status,
                term_freqs,
            },
        );
        Ok(())
    }

    /// Remove a document; no-op if absent
    ///
    /// Returns whether a document was removed. Posting lists that become
    /// empty are kept and simply match nothing.
    pub fn remove_document(&mut self, id: DocumentId) -> bool {
        self.remove_document_in(ExecutionMode::Sequential, id)
    }

    /// Remove a document using the given execution mode
    pub fn remove_document_in(&mut self, mode: ExecutionMode, id: DocumentId) -> bool {
        let Some(record) = self.documents.remove(&id) else {
            return false;
        };
        Self::unlink_postings(&mut self.postings, id, &record.term_freqs, mode);
        debug!(
            target: "sift::index",
            document_id = id,
            terms = record.term_freqs.len(),
            ?mode,
            "Document removed"
        );
        true
    }

    /// Insert `id` into the posting list of every term in `term_freqs`
    fn link_postings(&mut self, id: DocumentId, term_freqs: &TermFrequencies) {
        for (term, &tf) in term_freqs {
            self.postings
                .entry(term.clone())
                .or_default()
                .insert(id, tf);
        }
    }

    /// Remove `id` from the posting list of every term in `term_freqs`
    fn unlink_postings(
        postings: &mut HashMap<String, PostingList>,
        id: DocumentId,
        term_freqs: &TermFrequencies,
        mode: ExecutionMode,
    ) {
        match mode {
            ExecutionMode::Sequential => {
                for term in term_freqs.keys() {
                    if let Some(list) = postings.get_mut(term) {
                        list.remove(&id);
                    }
                }
            }
            ExecutionMode::Parallel => {
                // detach only this document's lists; emptied lists go back in
                let mut lists: Vec<(String, PostingList)> = term_freqs
                    .keys()
                    .filter_map(|term| postings.remove_entry(term))
                    .collect();
                lists.par_iter_mut().for_each(|(_, list)| {
                    list.remove(&id);
                });
                postings.extend(lists);
            }
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Number of live documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Check whether the index holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Check whether `id` is indexed
    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Stored record of `id`
    pub fn document(&self, id: DocumentId) -> Option<&DocumentRecord> {
        self.documents.get(&id)
    }

    /// Term frequencies of `id`; empty if the document is absent
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.documents
            .get(&id)
            .map(|record| &record.term_freqs)
            .unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Posting list of `term`, if the term was ever indexed
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    /// Check whether `term` occurs in document `id`
    pub fn contains_term(&self, term: &str, id: DocumentId) -> bool {
        self.postings
            .get(term)
            .is_some_and(|list| list.contains_key(&id))
    }

    /// `ln(document_count / documents_containing(term))`
    ///
    /// Returns `None` when no live document contains `term`.
    pub fn inverse_document_freq(&self, term: &str) -> Option<f64> {
        let containing = self.postings.get(term).map_or(0, PostingList::len);
        if containing == 0 {
            return None;
        }
        Some((self.documents.len() as f64 / containing as f64).ln())
    }

    /// Live document ids in ascending order
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.ids()
    }

    pub(crate) fn ids(&self) -> Copied<btree_map::Keys<'_, DocumentId, DocumentRecord>> {
        self.documents.keys().copied()
    }

    /// Live documents in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (DocumentId, &DocumentRecord)> {
        self.documents.iter().map(|(&id, record)| (id, record))
    }
}

// ============================================================================
// Tests
// ============================================================================
