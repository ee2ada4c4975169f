use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::debug;

use crate::api::{ScaleCoordinator, SeriesEntry};
use crate::core::Region;
use crate::error::ChartResult;
use crate::render::{
    ScenePrimitive, SceneShape, SceneStore, TransitionId, TransitionKind, TransitionScheduler,
};

/// One series record projected into pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProjectedPoint {
    year: i32,
    x: f64,
    y: f64,
}

/// Keeps the retained scene in step with the registry and scales.
///
/// Series primitives are independent per entry; connecting segments never
/// span entries. All re-positioning goes through move transitions so a
/// domain change animates instead of jumping.
pub struct RenderSync;

impl RenderSync {
    /// Materializes a freshly added entry: one point per record, one
    /// segment per consecutive year pair, placed at final positions.
    pub fn spawn_series(
        scene: &mut SceneStore,
        entry: &SeriesEntry,
        coordinator: &ScaleCoordinator,
    ) -> ChartResult<usize> {
        let projected = Self::project_entry(entry, coordinator)?;

        for point in &projected {
            scene.insert(ScenePrimitive {
                region: entry.region,
                color: entry.color,
                opacity: 1.0,
                shape: SceneShape::Point {
                    x: point.x,
                    y: point.y,
                },
                source_year: Some(point.year),
            });
        }
        for pair in projected.windows(2) {
            scene.insert(ScenePrimitive {
                region: entry.region,
                color: entry.color,
                opacity: 1.0,
                shape: SceneShape::Segment {
                    x1: pair[0].x,
                    y1: pair[0].y,
                    x2: pair[1].x,
                    y2: pair[1].y,
                },
                source_year: Some(pair[0].year),
            });
        }

        let spawned = projected.len() + projected.len().saturating_sub(1);
        debug!(region = %entry.region, primitives = spawned, "series spawned");
        Ok(spawned)
    }

    /// Starts move transitions carrying every primitive of `entry` to its
    /// position under the current scales.
    ///
    /// Idempotent: targets depend only on data and scales, so repeating the
    /// call with unchanged scales converges on identical final positions.
    pub fn start_rescale(
        scene: &mut SceneStore,
        scheduler: &mut TransitionScheduler,
        entry: &SeriesEntry,
        coordinator: &ScaleCoordinator,
        duration_seconds: f64,
    ) -> ChartResult<usize> {
        let projected = Self::project_entry(entry, coordinator)?;
        let year_index: HashMap<i32, usize> = projected
            .iter()
            .enumerate()
            .map(|(index, point)| (point.year, index))
            .collect();
        let ids = scene.ids_for_region(entry.region);
        let mut started = 0;

        for id in ids {
            let Some(primitive) = scene.get(id) else {
                continue;
            };
            let Some(target) = Self::target_shape(primitive, &projected, &year_index) else {
                continue;
            };
            let from = primitive.shape;
            if from == target {
                continue;
            }
            scheduler.start(id, TransitionKind::Move { from, to: target }, duration_seconds)?;
            started += 1;
        }

        debug!(region = %entry.region, moves = started, "rescale started");
        Ok(started)
    }

    /// Starts fade-out transitions on every primitive of `region`.
    ///
    /// The primitives stay in the scene until each fade completes; deleting
    /// them and rescaling the survivors is the caller's completion work.
    pub fn start_removal(
        scene: &mut SceneStore,
        scheduler: &mut TransitionScheduler,
        region: Region,
        duration_seconds: f64,
    ) -> ChartResult<SmallVec<[TransitionId; 8]>> {
        let ids = scene.ids_for_region(region);
        let mut fades = SmallVec::new();
        for id in ids {
            let Some(primitive) = scene.get(id) else {
                continue;
            };
            let fade = scheduler.start(
                id,
                TransitionKind::Fade {
                    from_opacity: primitive.opacity,
                    to_opacity: 0.0,
                },
                duration_seconds,
            )?;
            fades.push(fade);
        }
        debug!(%region, fades = fades.len(), "removal fade started");
        Ok(fades)
    }

    fn project_entry(
        entry: &SeriesEntry,
        coordinator: &ScaleCoordinator,
    ) -> ChartResult<Vec<ProjectedPoint>> {
        let records = entry.data.records();
        let mut projected = Vec::with_capacity(records.len());
        for record in records {
            let (x, y) = coordinator.project(record.year, record.rate())?;
            projected.push(ProjectedPoint {
                year: record.year,
                x,
                y,
            });
        }
        Ok(projected)
    }

    /// Resolves where a primitive belongs under the new projection, keyed
    /// by its source year.
    fn target_shape(
        primitive: &ScenePrimitive,
        projected: &[ProjectedPoint],
        year_index: &HashMap<i32, usize>,
    ) -> Option<SceneShape> {
        let year = primitive.source_year?;
        let index = *year_index.get(&year)?;
        match primitive.shape {
            SceneShape::Point { .. } => {
                let point = projected[index];
                Some(SceneShape::Point {
                    x: point.x,
                    y: point.y,
                })
            }
            SceneShape::Segment { .. } => {
                let start = projected[index];
                let end = projected.get(index + 1)?;
                Some(SceneShape::Segment {
                    x1: start.x,
                    y1: start.y,
                    x2: end.x,
                    y2: end.y,
                })
            }
        }
    }
}
