//! Pointer-facing glue: hover resolution and toggle outcomes.
//!
//! Nothing here mutates the data model; hover is a read-only snap against
//! the registry, and toggles are translated into session mutations by the
//! session itself.

use crate::api::{MutationOutcome, SeriesRegistry};
use crate::core::HoverInfo;
use crate::render::{SceneShape, SceneStore};

/// What a state click ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added(MutationOutcome),
    Removed(MutationOutcome),
}

/// Pointer and hover-tooltip state for one chart session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    cursor_x: f64,
    cursor_y: f64,
    visible: bool,
    info: Option<HoverInfo>,
}

impl HoverState {
    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn info(self) -> Option<HoverInfo> {
        if self.visible { self.info } else { None }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, info: Option<HoverInfo>) {
        self.cursor_x = x;
        self.cursor_y = y;
        self.visible = true;
        self.info = info;
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
        self.info = None;
    }
}

/// Finds the nearest rendered point within `snap_radius` of the pointer and
/// reads its record back out of the registry.
///
/// Points of exiting series (no longer in the registry) are not snap
/// candidates.
#[must_use]
pub fn resolve_hover(
    scene: &SceneStore,
    registry: &SeriesRegistry,
    x: f64,
    y: f64,
    snap_radius: f64,
) -> Option<HoverInfo> {
    let mut best: Option<(f64, HoverInfo)> = None;
    let radius_squared = snap_radius * snap_radius;

    for (_, primitive) in scene.iter() {
        let SceneShape::Point {
            x: point_x,
            y: point_y,
        } = primitive.shape
        else {
            continue;
        };
        let Some(year) = primitive.source_year else {
            continue;
        };
        let Some(entry) = registry.get(primitive.region) else {
            continue;
        };

        let distance_squared = (point_x - x).powi(2) + (point_y - y).powi(2);
        if distance_squared > radius_squared {
            continue;
        }
        if best.is_some_and(|(nearest, _)| distance_squared >= nearest) {
            continue;
        }

        let Some(record) = entry
            .data
            .records()
            .iter()
            .find(|record| record.year == year)
        else {
            continue;
        };
        best = Some((
            distance_squared,
            HoverInfo {
                region: primitive.region,
                year: record.year,
                count: record.count,
                total_births: record.total_births,
            },
        ));
    }

    best.map(|(_, info)| info)
}
