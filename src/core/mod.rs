pub mod scale;
pub mod series;
pub mod types;

pub use scale::LinearScale;
pub use series::NameSeries;
pub use types::{Gender, HoverInfo, RATE_PER_BIRTHS, Region, StateCode, Viewport, YearRecord};
