pub mod config;
pub mod fetcher;
pub mod parser;

pub use config::ClientConfig;
pub use fetcher::CorreiosFetcher;
pub use parser::ResultTableParser;

use cep_core::{AppError, TrackService};

/// A tracker wired with the reqwest fetcher and the scraper-based parser.
pub type CorreiosTracker = TrackService<CorreiosFetcher, ResultTableParser>;

/// Build a tracker for `config`.
pub fn tracker(config: ClientConfig) -> Result<CorreiosTracker, AppError> {
    Ok(TrackService::new(
        CorreiosFetcher::new(config)?,
        ResultTableParser::new()?,
    ))
}
