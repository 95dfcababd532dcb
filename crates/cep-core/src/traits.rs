use std::future::Future;

use crate::error::AppError;
use crate::models::RawTable;

/// Fetches the raw HTML result page for a postal code.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, postal_code: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Extracts the header and data rows of the result table from raw HTML.
pub trait TableParser: Send + Sync + Clone {
    /// Returns an empty table when the page holds no result rows.
    fn parse_table(&self, html: &str) -> Result<RawTable, AppError>;
}
