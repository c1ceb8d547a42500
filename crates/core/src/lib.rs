//! Core types for sift
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId, Rating: integer identity and score of a document
//! - DocumentStatus: caller-assigned status consumed by search filters
//! - SearchHit: ranked result `{id, relevance, rating}`
//! - ExecutionMode: sequential or parallel evaluation
//! - Error: Error type hierarchy
//! - SearchConfig: engine configuration (`sift.toml`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use types::{DocumentId, DocumentStatus, ExecutionMode, Rating, SearchHit};
