//! Sift - in-process TF-IDF text search
//!
//! Sift indexes short text documents and answers plus/minus term queries
//! ranked by TF-IDF relevance, with ties broken by average user rating.
//!
//! # Quick Start
//!
//! ```
//! use sift::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::from_stop_words_text("и в на")?;
//! server.add_document(0, "белый кот и модный ошейник", DocumentStatus::Active, &[8, -3])?;
//! server.add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Active, &[7, 2, 7])?;
//!
//! let hits = server.find_top_documents("пушистый кот -ошейник")?;
//! assert_eq!(hits.len(), 1);
//! # Ok::<(), sift::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `sift-core`: shared types, errors and configuration
//! - `sift-concurrency`: sharded accumulator used by parallel ranking
//! - `sift-search`: index, query parser, ranking and the server facade

pub use sift_concurrency::ConcurrentAccumulator;
pub use sift_core::*;
pub use sift_search::*;
