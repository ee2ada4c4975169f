mod frame;
mod null_renderer;
mod palette;
mod primitives;
mod scene;
mod transition;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use palette::{gender_color, random_state_color};
pub use primitives::{Color, LinePrimitive, PointPrimitive, TextHAlign, TextPrimitive};
pub use scene::{PrimitiveId, ScenePrimitive, SceneShape, SceneStore};
pub use transition::{CompletedTransition, TransitionId, TransitionKind, TransitionScheduler};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
