use chrono::Utc;

use crate::error::AppError;
use crate::models::AddressRecord;
use crate::normalize::normalize;
use crate::traits::{Fetcher, TableParser};

/// Orchestrates a lookup: fetch → parse → normalize.
///
/// Generic over the fetcher and parser so the pipeline can be exercised
/// without real HTTP calls.
#[derive(Clone)]
pub struct TrackService<F, P>
where
    F: Fetcher,
    P: TableParser,
{
    fetcher: F,
    parser: P,
}

impl<F, P> TrackService<F, P>
where
    F: Fetcher,
    P: TableParser,
{
    pub fn new(fetcher: F, parser: P) -> Self {
        Self { fetcher, parser }
    }

    /// Look up `postal_code` and return the normalized address records.
    ///
    /// Records follow the source row order. If no row carries the queried
    /// code, a not-found record is appended last. HTTP failures are
    /// returned as-is and never retried.
    pub async fn track(&self, postal_code: &str) -> Result<Vec<AddressRecord>, AppError> {
        tracing::info!(cep = %postal_code, "Looking up postal code");
        let html = self.fetcher.fetch(postal_code).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let table = self.parser.parse_table(&html)?;
        tracing::info!(
            columns = table.header.len(),
            rows = table.rows.len(),
            "Parsed result table"
        );

        let retrieved_at = Utc::now();
        let records = normalize(postal_code, &table, retrieved_at);

        if records.last().is_some_and(AddressRecord::is_not_found) {
            tracing::warn!(cep = %postal_code, "Postal code not present in results");
        }
        tracing::debug!(count = records.len(), "Normalization complete");

        Ok(records)
    }
}
