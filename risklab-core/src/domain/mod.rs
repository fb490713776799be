//! Domain types: time series, series tables, and classification scales.

pub mod series;
pub mod stance;
pub mod table;

pub use series::{SeriesError, TimeSeries};
pub use stance::{PositionBand, Stance};
pub use table::{TableError, TimeSeriesTable};
