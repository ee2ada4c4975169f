mod frame_builder;
mod render_sync;
mod scale_coordinator;
mod series_registry;
mod session;

pub use render_sync::RenderSync;
pub use scale_coordinator::{PlotMargins, ScaleCoordinator};
pub use series_registry::{SeriesEntry, SeriesRegistry};
pub use session::{ChartSession, ChartSessionConfig, MutationOutcome};
