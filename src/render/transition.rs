use indexmap::IndexMap;
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::scene::{PrimitiveId, SceneShape, SceneStore};

/// Stable handle to one in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

/// What a transition animates on its target primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionKind {
    Move { from: SceneShape, to: SceneShape },
    Fade { from_opacity: f64, to_opacity: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    target: PrimitiveId,
    kind: TransitionKind,
    duration_seconds: f64,
    elapsed_seconds: f64,
}

/// A transition that ran to completion during an `advance` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedTransition {
    pub id: TransitionId,
    pub target: PrimitiveId,
    pub kind: TransitionKind,
}

/// Cooperative scheduler for time-bounded, cancellable transitions.
///
/// Nothing runs between calls; the host steps the scheduler with explicit
/// `advance(delta_seconds)` ticks, and completion is reported back rather
/// than invoked through nested callbacks. At most one transition targets a
/// given primitive at a time: starting a new one replaces the old, so two
/// animations never compete over the same element.
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    active: IndexMap<TransitionId, Transition>,
    next_id: u64,
}

impl TransitionScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        target: PrimitiveId,
        kind: TransitionKind,
        duration_seconds: f64,
    ) -> ChartResult<TransitionId> {
        if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
            return Err(ChartError::InvalidData(
                "transition duration must be finite and > 0".to_owned(),
            ));
        }

        self.cancel_for_target(target);

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.active.insert(
            id,
            Transition {
                target,
                kind,
                duration_seconds,
                elapsed_seconds: 0.0,
            },
        );
        Ok(id)
    }

    /// Cancels one transition, leaving its primitive at the interpolated
    /// state of the last `advance`.
    pub fn cancel(&mut self, id: TransitionId) -> bool {
        self.active.shift_remove(&id).is_some()
    }

    /// Cancels whatever transition currently targets `target`.
    pub fn cancel_for_target(&mut self, target: PrimitiveId) -> bool {
        let existing: Vec<TransitionId> = self
            .active
            .iter()
            .filter(|(_, transition)| transition.target == target)
            .map(|(id, _)| *id)
            .collect();
        let cancelled = !existing.is_empty();
        for id in existing {
            self.active.shift_remove(&id);
        }
        cancelled
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Steps every in-flight transition by `delta_seconds`, applying the
    /// interpolated state to the scene.
    ///
    /// Finished transitions snap their primitive to the exact final state
    /// and are returned so the host can run completion-triggered work.
    pub fn advance(
        &mut self,
        scene: &mut SceneStore,
        delta_seconds: f64,
    ) -> ChartResult<Vec<CompletedTransition>> {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return Err(ChartError::InvalidData(
                "advance delta must be finite and >= 0".to_owned(),
            ));
        }

        let mut completed = Vec::new();
        let mut finished_ids = Vec::new();

        for (&id, transition) in &mut self.active {
            transition.elapsed_seconds += delta_seconds;
            let progress = (transition.elapsed_seconds / transition.duration_seconds).min(1.0);

            let Some(primitive) = scene.get_mut(transition.target) else {
                // Target vanished from the scene; nothing left to animate.
                finished_ids.push(id);
                continue;
            };

            let finished = progress >= 1.0;
            match transition.kind {
                TransitionKind::Move { from, to } => {
                    // Snap to the exact target on completion so repeated
                    // rescales with identical scales converge bit-for-bit.
                    primitive.shape = if finished { to } else { from.lerp(to, progress) };
                }
                TransitionKind::Fade {
                    from_opacity,
                    to_opacity,
                } => {
                    primitive.opacity = if finished {
                        to_opacity
                    } else {
                        from_opacity + (to_opacity - from_opacity) * progress
                    };
                }
            }

            if finished {
                finished_ids.push(id);
                completed.push(CompletedTransition {
                    id,
                    target: transition.target,
                    kind: transition.kind,
                });
            }
        }

        for id in finished_ids {
            self.active.shift_remove(&id);
        }

        trace!(
            completed = completed.len(),
            remaining = self.active.len(),
            "transition step"
        );
        Ok(completed)
    }
}
