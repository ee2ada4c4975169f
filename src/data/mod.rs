//! Immutable dataset snapshot and name-series access.
//!
//! The dataset is an external collaborator: a keyed JSON structure with one
//! table per region, loaded once and treated as opaque immutable input.
//! No streaming, no network or disk I/O happens here.

mod accessor;
mod source;

pub use accessor::DataAccessor;
pub use source::{Dataset, GenderTable, RegionTable, YearEntry};
