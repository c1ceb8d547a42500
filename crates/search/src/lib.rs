//! TF-IDF search for sift
//!
//! This crate provides:
//! - Whitespace tokenizer and stop-word set
//! - InvertedIndex with add / remove / enumerate
//! - Query parser for plus/minus term queries
//! - RankingEngine: TF-IDF top-K ranking, sequential or parallel
//! - SearchServer facade
//! - Duplicate detection, batch queries, request log and pagination
//!
//! # Usage
//!
//! ```
//! use sift_core::{DocumentStatus, ExecutionMode};
//! use sift_search::{active, SearchServer};
//!
//! let mut server = SearchServer::from_stop_words_text("и в на").unwrap();
//! server.add_document(0, "белый кот и модный ошейник", DocumentStatus::Active, &[8, -3]).unwrap();
//! server.add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Active, &[7, 2, 7]).unwrap();
//!
//! let hits = server
//!     .find_top_documents_in(ExecutionMode::Parallel, "пушистый кот", active())
//!     .unwrap();
//! assert_eq!(hits[0].id, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod duplicates;
pub mod index;
pub mod paginator;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod server;
pub mod stopwords;
pub mod tokenizer;

// Re-export commonly used types
pub use batch::{process_queries, process_queries_joined};
pub use duplicates::{find_duplicates, remove_duplicates};
pub use index::{average_rating, DocumentRecord, InvertedIndex, PostingList, TermFrequencies};
pub use paginator::{paginate, Paginator};
pub use query::Query;
pub use ranking::{active, sort_hits, with_status, RankingEngine};
pub use request_queue::RequestQueue;
pub use server::{DocumentMatch, SearchServer};
pub use stopwords::StopWordSet;
pub use tokenizer::{is_valid_text, split_into_words};
