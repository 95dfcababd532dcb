//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::RawTable;
use crate::traits::{Fetcher, TableParser};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response and records queries.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns an empty HTML page.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, postal_code: &str) -> Result<String, AppError> {
        self.requested
            .lock()
            .unwrap()
            .push(postal_code.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body></body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockParser
// ---------------------------------------------------------------------------

/// Mock parser that ignores its input and returns a fixed table.
#[derive(Clone)]
pub struct MockParser {
    table: RawTable,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockParser {
    pub fn new(table: RawTable) -> Self {
        Self {
            table,
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a parser that returns an error on its first call.
    pub fn with_error(error: AppError) -> Self {
        Self {
            table: RawTable::default(),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl TableParser for MockParser {
    fn parse_table(&self, _html: &str) -> Result<RawTable, AppError> {
        let mut err = self.error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        Ok(self.table.clone())
    }
}
