//! Batch query processing
//!
//! Queries only read the index, so a batch is evaluated in parallel on the
//! rayon pool, one query per task, each with the default `Active` filter.

use crate::server::SearchServer;
use rayon::prelude::*;
use sift_core::{Result, SearchHit};

/// Run every query; results are returned in input order
///
/// # Errors
///
/// Returns `Error::InvalidArgument` if any query is malformed.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<SearchHit>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// Run every query and concatenate the results in input order
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<SearchHit>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}
