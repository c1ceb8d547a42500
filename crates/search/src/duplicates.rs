//! Duplicate document detection
//!
//! Two documents are duplicates when their sets of distinct terms are
//! equal; frequencies and word order are ignored. The lowest id of each
//! term set is kept and every later id is removed.

use crate::server::SearchServer;
use sift_core::DocumentId;
use std::collections::HashSet;
use tracing::info;

/// Ids whose distinct-term set was already seen at a lower id
pub fn find_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut seen: HashSet<Vec<&str>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in server {
        // keys of the ordered term map are already sorted and distinct
        let terms: Vec<&str> = server
            .word_frequencies(id)
            .keys()
            .map(String::as_str)
            .collect();
        if !seen.insert(terms) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Remove every duplicate document and return the removed ids, ascending
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let duplicates = find_duplicates(server);
    for &id in &duplicates {
        server.remove_document(id);
        info!(target: "sift::dedup", document_id = id, "Found duplicate document");
    }
    info!(
        target: "sift::dedup",
        removed = duplicates.len(),
        remaining = server.document_count(),
        "Duplicate removal finished"
    );
    duplicates
}
