//! End-to-end scenarios through the `sift` facade.
//!
//! Each scenario builds a server from configuration, indexes a small corpus
//! and drives the public operations the way an embedding application would.

use sift::{
    paginate, process_queries_joined, remove_duplicates, DocumentStatus, ExecutionMode,
    RequestQueue, SearchConfig, SearchServer, StopWordSet,
};
use std::io::Write;

// ============================================================================
// Helpers
// ============================================================================

fn ids(hits: &[sift::SearchHit]) -> Vec<i32> {
    hits.iter().map(|hit| hit.id).collect()
}

fn load_config(contents: &str) -> SearchConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(sift::config::CONFIG_FILE_NAME);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    SearchConfig::from_file(&path).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_configured_server_lifecycle() {
    let config = load_config("max_results = 3\n");
    let mut server =
        SearchServer::with_config(StopWordSet::from_text("and with").unwrap(), config).unwrap();

    server
        .add_document(1, "funny pet and nasty rat", DocumentStatus::Active, &[7, 2, 7])
        .unwrap();
    server
        .add_document(2, "funny pet with curly hair", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(3, "funny pet with curly hair", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(4, "funny pet and curly hair", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(5, "funny funny pet and nasty nasty rat", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(6, "funny pet and not very nasty rat", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(7, "very nasty rat and not very funny pet", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(8, "pet with rat and rat and rat", DocumentStatus::Active, &[1, 2])
        .unwrap();
    server
        .add_document(9, "nasty rat with curly hair", DocumentStatus::Active, &[1, 2])
        .unwrap();
    assert_eq!(server.document_count(), 9);

    assert_eq!(remove_duplicates(&mut server), vec![3, 4, 5, 7]);
    assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);

    let hits = server.find_top_documents("curly nasty rat").unwrap();
    assert!(hits.len() <= 3);
    assert_eq!(hits[0].id, 9);
}

#[test]
fn scenario_both_modes_rank_identically() {
    let mut server = SearchServer::from_stop_words_text("and with").unwrap();
    let texts = [
        "white cat and yellow hat",
        "curly cat curly tail",
        "nasty dog with big eyes",
        "nasty pigeon john",
    ];
    for (id, text) in texts.iter().enumerate() {
        server
            .add_document(id as i32, text, DocumentStatus::Active, &[1, 2, id as i32])
            .unwrap();
    }

    for query in ["curly nasty cat", "curly -cat", "nasty -dog -pigeon", "hat"] {
        let seq = server
            .find_top_documents_in(ExecutionMode::Sequential, query, sift::active())
            .unwrap();
        let par = server
            .find_top_documents_in(ExecutionMode::Parallel, query, sift::active())
            .unwrap();
        assert_eq!(ids(&seq), ids(&par), "query {:?}", query);
    }
}

#[test]
fn scenario_batch_queue_and_pages() {
    let mut server = SearchServer::from_stop_words_text("and with").unwrap();
    for id in 0..12 {
        server
            .add_document(id, "big cat with curly tail", DocumentStatus::Active, &[id])
            .unwrap();
    }

    let joined = process_queries_joined(&server, &["big", "tail", "dog"]).unwrap();
    assert_eq!(joined.len(), 10);

    let mut queue = RequestQueue::new(&server);
    for _ in 0..3 {
        queue.add_find_request("dog").unwrap();
    }
    let hits = queue.add_find_request("curly").unwrap();
    assert_eq!(queue.no_result_requests(), 3);

    let pages: Vec<_> = paginate(&hits, 2).unwrap().collect();
    assert_eq!(pages.len(), 3);
    // equal relevance; higher rating first
    assert_eq!(ids(pages[0]), vec![11, 10]);
}
