//! Core types for sift
//!
//! This module defines the foundational types:
//! - DocumentId / Rating: integer identity and score of a document
//! - DocumentStatus: caller-assigned lifecycle tag used by filters
//! - SearchHit: one ranked result
//! - ExecutionMode: sequential or parallel evaluation of a call

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an indexed document
///
/// Ids are caller-assigned and must be non-negative; the index rejects
/// negative ids with `Error::InvalidArgument`.
pub type DocumentId = i32;

/// Average rating of a document (truncated toward zero)
pub type Rating = i32;

// ============================================================================
// DocumentStatus
// ============================================================================

/// Caller-assigned status of a document
///
/// Opaque to ranking except through filter predicates. The default
/// search filter only admits `Active` documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live, searchable by default
    #[default]
    Active,
    /// Kept in the index but not relevant to default searches
    Irrelevant,
    /// Blocked from default searches
    Banned,
    /// Marked removed by the caller (still indexed until removed)
    Removed,
}

impl DocumentStatus {
    /// Get the lowercase name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Active => "active",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SearchHit
// ============================================================================

/// A single ranked search result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Matched document
    pub id: DocumentId,
    /// TF-IDF relevance (higher = more relevant)
    pub relevance: f64,
    /// Average rating of the document
    pub rating: Rating,
}

impl SearchHit {
    /// Create a new SearchHit
    pub fn new(id: DocumentId, relevance: f64, rating: Rating) -> Self {
        SearchHit {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

// ============================================================================
// ExecutionMode
// ============================================================================

/// How a call distributes its work
///
/// Both modes produce the same observable result; `Parallel` fans
/// independent per-term work out across the rayon pool and joins before
/// returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// Single-threaded, no locking (default)
    #[default]
    Sequential,
    /// Fork-join over the worker pool
    Parallel,
}
