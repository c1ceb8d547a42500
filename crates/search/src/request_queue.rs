//! Request statistics log
//!
//! `RequestQueue` forwards searches to a `SearchServer` and remembers the
//! most recent `request_window` requests, so callers can ask how many of
//! them returned nothing.

use crate::ranking::with_status;
use crate::server::SearchServer;
use sift_core::{DocumentId, DocumentStatus, ExecutionMode, Rating, Result, SearchHit};
use std::collections::VecDeque;

/// One recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestRecord {
    query: String,
    result_count: usize,
}

/// Sliding window over recent search requests
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<RequestRecord>,
    window: usize,
    no_result: usize,
}

impl<'a> RequestQueue<'a> {
    /// Track requests against `server`, window size from its config
    pub fn new(server: &'a SearchServer) -> Self {
        let window = server.config().request_window.max(1);
        Self {
            server,
            requests: VecDeque::with_capacity(window),
            window,
            no_result: 0,
        }
    }

    /// Search `Active` documents and record the request
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Active)
    }

    /// Search documents with `status` and record the request
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<SearchHit>> {
        self.add_find_request_by(raw_query, with_status(status))
    }

    /// Search with a custom predicate and record the request
    ///
    /// Failed queries are not recorded.
    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<SearchHit>>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let hits = self
            .server
            .find_top_documents_in(ExecutionMode::Sequential, raw_query, predicate)?;
        self.record(raw_query, hits.len());
        Ok(hits)
    }

    fn record(&mut self, raw_query: &str, result_count: usize) {
        if self.requests.len() == self.window {
            if let Some(evicted) = self.requests.pop_front() {
                if evicted.result_count == 0 {
                    self.no_result -= 1;
                }
            }
        }
        if result_count == 0 {
            self.no_result += 1;
        }
        self.requests.push_back(RequestRecord {
            query: raw_query.to_string(),
            result_count,
        });
    }

    /// Requests in the window that returned no results
    pub fn no_result_requests(&self) -> usize {
        self.no_result
    }

    /// Number of requests currently in the window
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check whether no request has been recorded
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Queries in the window, oldest first
    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|record| record.query.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::StopWordSet;
    use sift_core::SearchConfig;

    fn server(window: usize) -> SearchServer {
        let config = SearchConfig::new().with_request_window(window);
        let mut server =
            SearchServer::with_config(StopWordSet::from_text("and in at").unwrap(), config).unwrap();
        server
            .add_document(1, "curly cat curly tail", DocumentStatus::Active, &[7, 2, 7])
            .unwrap();
        server
            .add_document(2, "curly dog and fancy collar", DocumentStatus::Active, &[1, 2, 3])
            .unwrap();
        server
            .add_document(3, "big cat fancy collar ", DocumentStatus::Active, &[1, 2, 8])
            .unwrap();
        server
            .add_document(4, "big dog sparrow Eugene", DocumentStatus::Active, &[1, 3, 2])
            .unwrap();
        server
            .add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Active, &[1, 1, 1])
            .unwrap();
        server
    }

    #[test]
    fn test_window_evicts_oldest() {
        let server = server(1440);
        let mut queue = RequestQueue::new(&server);
        for _ in 0..1439 {
            queue.add_find_request("empty request").unwrap();
        }
        assert_eq!(queue.no_result_requests(), 1439);

        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.len(), 1440);
        assert_eq!(queue.no_result_requests(), 1439);

        queue.add_find_request("big collar").unwrap();
        assert_eq!(queue.len(), 1440);
        assert_eq!(queue.no_result_requests(), 1438);

        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), 1437);
    }

    #[test]
    fn test_small_window() {
        let server = server(2);
        let mut queue = RequestQueue::new(&server);
        queue.add_find_request("nothing").unwrap();
        queue.add_find_request("cat").unwrap();
        queue.add_find_request("dog").unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.no_result_requests(), 0);
        assert_eq!(queue.queries().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn test_failed_query_not_recorded() {
        let server = server(10);
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("cat --dog").is_err());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_by_status_and_predicate() {
        let server = server(10);
        let mut queue = RequestQueue::new(&server);
        let banned = queue
            .add_find_request_by_status("cat", DocumentStatus::Banned)
            .unwrap();
        assert!(banned.is_empty());
        let rated = queue
            .add_find_request_by("dog", |_, _, rating| rating >= 2)
            .unwrap();
        assert_eq!(rated.iter().map(|hit| hit.id).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(queue.no_result_requests(), 1);
    }
}
