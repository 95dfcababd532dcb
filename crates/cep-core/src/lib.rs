pub mod error;
pub mod models;
pub mod normalize;
pub mod track;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::AppError;
pub use models::{AddressRecord, RawTable, RecordMeta};
pub use normalize::normalize;
pub use track::TrackService;
pub use traits::{Fetcher, TableParser};
