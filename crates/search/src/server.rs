//! Search server facade
//!
//! `SearchServer` owns the inverted index and the engine configuration and
//! exposes the library contract: add, remove, top-K search, single
//! document matching, term frequencies, count and ordered enumeration.
//!
//! # Usage
//!
//! ```
//! use sift_core::DocumentStatus;
//! use sift_search::{SearchServer, StopWordSet};
//!
//! let mut server = SearchServer::new(StopWordSet::from_text("and the").unwrap());
//! server.add_document(1, "what are you doing in my swamp", DocumentStatus::Active, &[1, 3, 3]).unwrap();
//! server.add_document(2, "never gonna give you up", DocumentStatus::Active, &[1, 4, 3, 7]).unwrap();
//!
//! let hits = server.find_top_documents("you -swamp").unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 2);
//! ```

use crate::index::{DocumentRecord, InvertedIndex, TermFrequencies};
use crate::query::Query;
use crate::ranking::{active, with_status, RankingEngine};
use crate::stopwords::StopWordSet;
use rayon::prelude::*;
use sift_core::{
    DocumentId, DocumentStatus, Error, ExecutionMode, Rating, Result, SearchConfig, SearchHit,
};
use std::collections::btree_map;
use std::iter::Copied;

/// Include-terms present in a document, and its status
pub type DocumentMatch = (Vec<String>, DocumentStatus);

/// In-process TF-IDF search server
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    index: InvertedIndex,
    config: SearchConfig,
}

impl SearchServer {
    /// Create a server with the default configuration
    pub fn new(stop_words: StopWordSet) -> Self {
        Self {
            index: InvertedIndex::new(stop_words),
            config: SearchConfig::default(),
        }
    }

    /// Create a server from whitespace-separated stop words
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::new(StopWordSet::from_text(text)?))
    }

    /// Create a server with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `config` fails validation.
    pub fn with_config(stop_words: StopWordSet, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            index: InvertedIndex::new(stop_words),
            config,
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Underlying index (read-only)
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    // ========================================================================
    // Document lifecycle
    // ========================================================================

    /// Add a document
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` for a negative or duplicate id, or text with
    /// control characters. The index is unchanged on error.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        self.index.add_document(id, text, status, ratings)
    }

    /// Remove a document; no-op if absent
    pub fn remove_document(&mut self, id: DocumentId) {
        self.index.remove_document(id);
    }

    /// Remove a document using the given execution mode; no-op if absent
    pub fn remove_document_in(&mut self, mode: ExecutionMode, id: DocumentId) {
        self.index.remove_document_in(mode, id);
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Top documents with status `Active`
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, active())
    }

    /// Top documents with the given status
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<SearchHit>> {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, with_status(status))
    }

    /// Top documents admitted by `predicate(id, status, rating)`
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<SearchHit>>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, predicate)
    }

    /// Top documents admitted by `predicate`, evaluated in `mode`
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if the query is malformed.
    pub fn find_top_documents_in<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<SearchHit>>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let query = self.parse_query(raw_query)?;
        Ok(RankingEngine::new(&self.index, &self.config).find_top_documents(
            mode, &query, predicate,
        ))
    }

    /// Include-terms of `raw_query` present in document `id`
    ///
    /// Returns an empty term list if any exclude-term is present.
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<DocumentMatch> {
        self.match_document_in(ExecutionMode::Sequential, raw_query, id)
    }

    /// `match_document` evaluated in `mode`
    ///
    /// Terms are returned in ascending order in both modes.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if the query is malformed,
    /// `Error::DocumentNotFound` if `id` is not indexed.
    pub fn match_document_in(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<DocumentMatch> {
        let query = self.parse_query(raw_query)?;
        let status = self
            .index
            .document(id)
            .map(|record| record.status)
            .ok_or(Error::DocumentNotFound(id))?;

        let index = &self.index;
        let matched = match mode {
            ExecutionMode::Sequential => {
                if query.exclude().iter().any(|term| index.contains_term(term, id)) {
                    Vec::new()
                } else {
                    query
                        .include()
                        .iter()
                        .filter(|term| index.contains_term(term, id))
                        .cloned()
                        .collect()
                }
            }
            ExecutionMode::Parallel => {
                if query
                    .exclude()
                    .par_iter()
                    .any(|term| index.contains_term(term, id))
                {
                    Vec::new()
                } else {
                    let mut terms: Vec<String> = query
                        .include()
                        .par_iter()
                        .filter(|term| index.contains_term(term, id))
                        .cloned()
                        .collect();
                    terms.sort_unstable();
                    terms
                }
            }
        };
        Ok((matched, status))
    }

    fn parse_query(&self, raw_query: &str) -> Result<Query> {
        let query = Query::parse(raw_query, self.index.stop_words())?;
        tracing::trace!(
            target: "sift::search",
            include_terms = query.include().len(),
            exclude_terms = query.exclude().len(),
            "Query parsed"
        );
        Ok(query)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Term frequencies of a document; empty if absent
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.index.word_frequencies(id)
    }

    /// Number of live documents
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live document ids in ascending order
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.document_ids()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = Copied<btree_map::Keys<'a, DocumentId, DocumentRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.index.ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals_server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("и в на").unwrap();
        server
            .add_document(0, "белый кот и модный ошейник", DocumentStatus::Active, &[8, -3])
            .unwrap();
        server
            .add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Active, &[7, 2, 7])
            .unwrap();
        server
            .add_document(2, "ухоженный пёс выразительные глаза", DocumentStatus::Active, &[5, -12, 2, 1])
            .unwrap();
        server
            .add_document(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9])
            .unwrap();
        server
    }

    #[test]
    fn test_with_config_validates() {
        let config = SearchConfig::new().with_max_results(0);
        let err = SearchServer::with_config(StopWordSet::empty(), config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_with_config_limits_results() {
        let config = SearchConfig::new().with_max_results(2);
        let mut server = SearchServer::with_config(StopWordSet::empty(), config).unwrap();
        for id in 0..4 {
            server
                .add_document(id, "same text", DocumentStatus::Active, &[])
                .unwrap();
        }
        assert_eq!(server.find_top_documents("same").unwrap().len(), 2);
    }

    #[test]
    fn test_default_filter_is_active() {
        let server = animals_server();
        let ids: Vec<_> = server
            .find_top_documents("пушистый ухоженный кот")
            .unwrap()
            .iter()
            .map(|hit| hit.id)
            .collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn test_by_status() {
        let server = animals_server();
        let hits = server
            .find_top_documents_by_status("ухоженный", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn test_by_predicate() {
        let server = animals_server();
        let hits = server
            .find_top_documents_by("пушистый ухоженный кот", |_, _, rating| rating > 0)
            .unwrap();
        let ids: Vec<_> = hits.iter().map(|hit| hit.id).collect();
        assert_eq!(ids, vec![1, 3, 0]);
    }

    #[test]
    fn test_malformed_query() {
        let server = animals_server();
        assert!(server.find_top_documents("кот -").is_err());
        assert!(server.find_top_documents("кот --пёс").is_err());
        assert!(server.find_top_documents("кот\u{2}").is_err());
    }

    #[test]
    fn test_match_document() {
        let server = animals_server();
        let (terms, status) = server.match_document("пушистый кот хвост", 1).unwrap();
        assert_eq!(terms, vec!["кот", "пушистый", "хвост"]);
        assert_eq!(status, DocumentStatus::Active);
    }

    #[test]
    fn test_match_document_excluded() {
        let server = animals_server();
        let (terms, status) = server.match_document("ухоженный -скворец", 3).unwrap();
        assert!(terms.is_empty());
        assert_eq!(status, DocumentStatus::Banned);
    }

    #[test]
    fn test_match_document_parallel_agrees() {
        let server = animals_server();
        for id in 0..4 {
            for query in ["пушистый кот хвост", "кот -ошейник", "пёс глаза глаза"] {
                let seq = server
                    .match_document_in(ExecutionMode::Sequential, query, id)
                    .unwrap();
                let par = server
                    .match_document_in(ExecutionMode::Parallel, query, id)
                    .unwrap();
                assert_eq!(seq, par);
            }
        }
    }

    #[test]
    fn test_match_document_missing() {
        let server = animals_server();
        let err = server.match_document("кот", 99).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(99)));
    }

    #[test]
    fn test_match_document_stop_word_ignored() {
        let server = animals_server();
        let (terms, _) = server.match_document("и кот", 0).unwrap();
        assert_eq!(terms, vec!["кот"]);
    }

    #[test]
    fn test_remove_twice() {
        let mut server = animals_server();
        server.remove_document(1);
        let after_once: Vec<_> = server.document_ids().collect();
        server.remove_document(1);
        assert_eq!(server.document_ids().collect::<Vec<_>>(), after_once);
        assert_eq!(server.document_count(), 3);
        assert!(server.word_frequencies(1).is_empty());
    }

    #[test]
    fn test_remove_parallel() {
        let mut server = animals_server();
        server.remove_document_in(ExecutionMode::Parallel, 0);
        let hits = server.find_top_documents("кот").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_into_iterator_ascending() {
        let server = animals_server();
        let ids: Vec<DocumentId> = (&server).into_iter().collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        let mut visited = Vec::new();
        for id in &server {
            visited.push(id);
        }
        assert_eq!(visited, ids);
    }
}
