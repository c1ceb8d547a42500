//! TF-IDF ranking
//!
//! This module provides:
//! - Built-in document predicates (`with_status`, `active`)
//! - RankingEngine: relevance accumulation, exclusion and top-K ordering
//!
//! # Algorithm
//!
//! For each include-term with a non-empty posting list,
//! `idf = ln(N / df)` and every posting that passes the predicate adds
//! `tf * idf` to its document. Every document in an exclude-term's posting
//! list is then dropped, whatever its relevance. Survivors are ordered by
//! relevance descending, near-ties by rating, and truncated to K.
//!
//! Sequential mode accumulates into a plain `BTreeMap`. Parallel mode fans
//! the term sets out over rayon into a `ConcurrentAccumulator`; the
//! `for_each` return is the join, after which the accumulator is
//! consolidated.

use crate::index::InvertedIndex;
use crate::query::Query;
use rayon::prelude::*;
use sift_concurrency::ConcurrentAccumulator;
use sift_core::{DocumentId, DocumentStatus, ExecutionMode, Rating, SearchConfig, SearchHit};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// Predicates
// ============================================================================

/// Predicate admitting documents whose status equals `status`
pub fn with_status(
    status: DocumentStatus,
) -> impl Fn(DocumentId, DocumentStatus, Rating) -> bool + Copy + Send + Sync {
    move |_id, document_status, _rating| document_status == status
}

/// Default predicate: admit `Active` documents only
pub fn active() -> impl Fn(DocumentId, DocumentStatus, Rating) -> bool + Copy + Send + Sync {
    with_status(DocumentStatus::Active)
}

// ============================================================================
// RankingEngine
// ============================================================================

/// Scores a parsed query against an index
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine<'a> {
    index: &'a InvertedIndex,
    config: &'a SearchConfig,
}

impl<'a> RankingEngine<'a> {
    /// Create an engine reading `index` with the limits in `config`
    pub fn new(index: &'a InvertedIndex, config: &'a SearchConfig) -> Self {
        Self { index, config }
    }

    /// Top-K results for `query`, ordered
    pub fn find_top_documents<P>(
        &self,
        mode: ExecutionMode,
        query: &Query,
        predicate: P,
    ) -> Vec<SearchHit>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let mut hits = self.find_all_documents(mode, query, predicate);
        sort_hits(&mut hits, self.config.relevance_epsilon);
        hits.truncate(self.config.max_results);
        hits
    }

    /// Every surviving document with its relevance, in id order
    pub fn find_all_documents<P>(
        &self,
        mode: ExecutionMode,
        query: &Query,
        predicate: P,
    ) -> Vec<SearchHit>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let relevance = match mode {
            ExecutionMode::Sequential => self.accumulate_sequential(query, &predicate),
            ExecutionMode::Parallel => self.accumulate_parallel(query, &predicate),
        };

        debug!(
            target: "sift::search",
            ?mode,
            include_terms = query.include().len(),
            exclude_terms = query.exclude().len(),
            candidates = relevance.len(),
            "Query ranked"
        );

        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index
                    .document(id)
                    .map(|record| SearchHit::new(id, relevance, record.rating))
            })
            .collect()
    }

    /// Add `tf * idf` of one include-term into `add` for admitted documents
    fn score_term<P, F>(&self, term: &str, predicate: &P, mut add: F)
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool,
        F: FnMut(DocumentId, f64),
    {
        let (Some(postings), Some(idf)) = (
            self.index.postings(term),
            self.index.inverse_document_freq(term),
        ) else {
            return;
        };
        for (&id, &tf) in postings {
            if let Some(record) = self.index.document(id) {
                if predicate(id, record.status, record.rating) {
                    add(id, tf * idf);
                }
            }
        }
    }

    /// Documents containing one exclude-term
    fn excluded_by(&self, term: &str) -> impl Iterator<Item = DocumentId> + 'a {
        self.index
            .postings(term)
            .into_iter()
            .flat_map(|postings| postings.keys().copied())
    }

    fn accumulate_sequential<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool,
    {
        let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for term in query.include() {
            self.score_term(term, predicate, |id, delta| {
                *relevance.entry(id).or_insert(0.0) += delta;
            });
        }
        for term in query.exclude() {
            for id in self.excluded_by(term) {
                relevance.remove(&id);
            }
        }
        relevance
    }

    fn accumulate_parallel<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let relevance = ConcurrentAccumulator::new(self.config.accumulator_shards);
        query.include().par_iter().for_each(|term| {
            self.score_term(term, predicate, |id, delta| relevance.increment(id, delta));
        });
        query.exclude().par_iter().for_each(|term| {
            for id in self.excluded_by(term) {
                relevance.erase(&id);
            }
        });
        relevance.consolidate()
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Order hits by relevance descending, near-ties by rating descending
///
/// Hits are first sorted by relevance alone (a total order). Runs of hits
/// whose relevance lies within `epsilon` of the run's first hit are then
/// reordered by rating descending, then id ascending.
pub fn sort_hits(hits: &mut [SearchHit], epsilon: f64) {
    hits.sort_by(|lhs, rhs| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then(lhs.id.cmp(&rhs.id))
    });

    let mut start = 0;
    while start < hits.len() {
        let head = hits[start].relevance;
        let end = hits[start + 1..]
            .iter()
            .position(|hit| head - hit.relevance >= epsilon)
            .map_or(hits.len(), |offset| start + 1 + offset);
        hits[start..end].sort_by(by_rating_then_id);
        start = end;
    }
}

fn by_rating_then_id(lhs: &SearchHit, rhs: &SearchHit) -> Ordering {
    rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id))
}
