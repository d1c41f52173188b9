//! Observation storage for market-lens.
//!
//! **Philosophy:** Declarative, Modular, SoC
//! - Declarative: sources describe where rows come from, the store decides
//!   what a valid series is
//! - Modular: sources are swappable via the [`SeriesSource`] trait
//! - SoC: this crate ONLY loads and validates data, no indicator logic
//!
//! Loading pipeline: a [`SeriesSource`] yields raw rows, [`SeriesStore::load`]
//! parses timestamps, fills missing high/low/open/volume, rejects malformed
//! rows and sorts the result into an immutable [`types::Series`].

mod source;
mod store;
mod timestamp;

pub use source::{ClosePricesSource, CsvSource, DAY_MS, SeriesSource, read_csv_from};
pub use store::SeriesStore;
pub use timestamp::parse_timestamp;
pub use types::SeriesError;

/// Fetch from a source and load the rows into a store.
pub fn load_from<S: SeriesSource + ?Sized>(
    symbol: impl Into<types::Symbol>,
    source: &S,
) -> Result<SeriesStore, SeriesError> {
    SeriesStore::load(symbol, source.fetch()?)
}
