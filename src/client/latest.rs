use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::open_library::{Catalog, CatalogError};
use super::types::{Book, WorkDetails};

pub const NO_MATCHES_MESSAGE: &str = "No books found. Try a different search term.";
pub const SEARCH_FAILED_MESSAGE: &str =
    "Failed to fetch books. Please check your connection and try again.";

/// Result of a catalog call that may have been overtaken by a newer one.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ready(T),
    /// A newer call started before this one resolved.
    Superseded,
}

impl<T> Outcome<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::Superseded => None,
        }
    }
}

pub type SearchOutcome = Outcome<Vec<Book>>;

/// Hands out tickets; only the most recent ticket is current.
#[derive(Debug, Default)]
pub struct RequestGate {
    generation: AtomicU64,
}

impl RequestGate {
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

/// Catalog front that applies only the latest search and the latest
/// details lookup. Results of overtaken calls, errors included, are
/// discarded.
pub struct LatestSearch {
    catalog: Arc<dyn Catalog>,
    searches: RequestGate,
    details: RequestGate,
}

impl LatestSearch {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            searches: RequestGate::default(),
            details: RequestGate::default(),
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, CatalogError> {
        let ticket = self.searches.begin();
        let result = self.catalog.search(query).await;

        if !self.searches.is_current(ticket) {
            debug!(query, ticket, "discarding superseded search");
            return Ok(Outcome::Superseded);
        }
        result.map(Outcome::Ready)
    }

    pub async fn fetch_details(&self, work_id: &str) -> Result<Outcome<WorkDetails>, CatalogError> {
        let ticket = self.details.begin();
        let result = self.catalog.fetch_details(work_id).await;

        if !self.details.is_current(ticket) {
            debug!(work_id, ticket, "discarding superseded details");
            return Ok(Outcome::Superseded);
        }
        result.map(Outcome::Ready)
    }
}

/// Status line for a finished search, if one is shown.
pub fn search_message(result: &Result<Vec<Book>, CatalogError>) -> Option<&'static str> {
    match result {
        Ok(books) if books.is_empty() => Some(NO_MATCHES_MESSAGE),
        Ok(_) => None,
        Err(_) => Some(SEARCH_FAILED_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers instantly except for queries starting with "slow".
    struct FakeCatalog;

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
            if query.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            if query == "none" {
                return Ok(vec![]);
            }
            if query.ends_with("fail") {
                return Err(CatalogError::Status(503));
            }
            Ok(vec![Book::new(&format!("/works/{}", query), query)])
        }

        async fn fetch_details(&self, work_id: &str) -> Result<WorkDetails, CatalogError> {
            if work_id.contains("slow") {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            Ok(WorkDetails {
                key: Some(work_id.to_string()),
                ..Default::default()
            })
        }
    }

    fn latest() -> Arc<LatestSearch> {
        Arc::new(LatestSearch::new(Arc::new(FakeCatalog)))
    }

    #[test]
    fn test_gate_tickets() {
        let gate = RequestGate::default();
        let first = gate.begin();
        assert!(gate.is_current(first));

        let second = gate.begin();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[tokio::test]
    async fn test_single_search_is_applied() {
        let outcome = latest().search("dune").await.unwrap();
        assert_eq!(outcome.ready().unwrap()[0].key, "/works/dune");
    }

    #[tokio::test]
    async fn test_overtaken_search_is_discarded() {
        let latest = latest();

        let slow = {
            let latest = latest.clone();
            tokio::spawn(async move { latest.search("slow").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = latest.search("fast").await.unwrap();
        assert_eq!(fast.ready().unwrap()[0].title, "fast");
        assert_eq!(slow.await.unwrap().unwrap(), Outcome::Superseded);
    }

    #[tokio::test]
    async fn test_overtaken_failure_is_discarded() {
        let latest = latest();

        let slow = {
            let latest = latest.clone();
            tokio::spawn(async move { latest.search("slow fail").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        latest.search("fast").await.unwrap();

        assert_eq!(slow.await.unwrap().unwrap(), Outcome::Superseded);
    }

    #[tokio::test]
    async fn test_overtaken_details_are_discarded() {
        let latest = latest();

        let pending = {
            let latest = latest.clone();
            tokio::spawn(async move { latest.fetch_details("/works/slow").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fresh = latest.fetch_details("/works/OL1W").await.unwrap();
        assert_eq!(fresh.ready().unwrap().key.as_deref(), Some("/works/OL1W"));
        assert_eq!(pending.await.unwrap().unwrap(), Outcome::Superseded);
    }

    #[tokio::test]
    async fn test_messages_distinguish_empty_from_failure() {
        let catalog = FakeCatalog;
        let empty = catalog.search("none").await;
        let failed = catalog.search("fail").await;
        let found = catalog.search("dune").await;

        assert_eq!(search_message(&empty), Some(NO_MATCHES_MESSAGE));
        assert_eq!(search_message(&failed), Some(SEARCH_FAILED_MESSAGE));
        assert_eq!(search_message(&found), None);
        assert_ne!(NO_MATCHES_MESSAGE, SEARCH_FAILED_MESSAGE);
    }
}
