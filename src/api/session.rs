use std::collections::VecDeque;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::api::frame_builder::build_frame;
use crate::api::render_sync::RenderSync;
use crate::api::{PlotMargins, ScaleCoordinator, SeriesRegistry};
use crate::core::{Gender, HoverInfo, NameSeries, Region, StateCode, Viewport};
use crate::data::DataAccessor;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverState, ToggleOutcome, resolve_hover};
use crate::render::{RenderFrame, Renderer, SceneStore, TransitionKind, TransitionScheduler};

/// Construction-time tuning for one chart session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSessionConfig {
    pub viewport: Viewport,
    pub gender: Gender,
    pub margins: PlotMargins,
    pub point_radius: f64,
    pub stroke_width: f64,
    pub move_duration_seconds: f64,
    pub fade_duration_seconds: f64,
    pub axis_tick_count: usize,
    pub label_font_size_px: f64,
    pub hover_snap_radius_px: f64,
    pub color_seed: Option<u64>,
}

impl ChartSessionConfig {
    #[must_use]
    pub fn new(viewport: Viewport, gender: Gender) -> Self {
        Self {
            viewport,
            gender,
            margins: PlotMargins::default(),
            point_radius: 3.5,
            stroke_width: 1.5,
            move_duration_seconds: 0.75,
            fade_duration_seconds: 0.4,
            axis_tick_count: 5,
            label_font_size_px: 11.0,
            hover_snap_radius_px: 12.0,
            color_seed: None,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: PlotMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_point_radius(mut self, point_radius: f64) -> Self {
        self.point_radius = point_radius;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_transition_durations(
        mut self,
        move_duration_seconds: f64,
        fade_duration_seconds: f64,
    ) -> Self {
        self.move_duration_seconds = move_duration_seconds;
        self.fade_duration_seconds = fade_duration_seconds;
        self
    }

    #[must_use]
    pub fn with_axis_tick_count(mut self, axis_tick_count: usize) -> Self {
        self.axis_tick_count = axis_tick_count;
        self
    }

    #[must_use]
    pub fn with_hover_snap_radius(mut self, hover_snap_radius_px: f64) -> Self {
        self.hover_snap_radius_px = hover_snap_radius_px;
        self
    }

    /// Fixes the color generator seed, giving reproducible overlay colors.
    #[must_use]
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margins.validate(self.viewport)?;
        for (label, value) in [
            ("point radius", self.point_radius),
            ("stroke width", self.stroke_width),
            ("move duration", self.move_duration_seconds),
            ("fade duration", self.fade_duration_seconds),
            ("label font size", self.label_font_size_px),
            ("hover snap radius", self.hover_snap_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "session {label} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// How a requested mutation was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Took effect immediately.
    Applied,
    /// Queued behind an in-flight exit fade; applies when the fade ends.
    Deferred,
}

#[derive(Debug)]
enum PendingMutation {
    Add { region: Region, series: NameSeries },
    Remove { region: Region },
}

impl PendingMutation {
    fn region(&self) -> Region {
        match self {
            PendingMutation::Add { region, .. } | PendingMutation::Remove { region } => *region,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ExitState {
    remaining_fades: usize,
    /// Cleared when a later add's rescale absorbs the deferred one.
    rescale_pending: bool,
}

/// One chart view: the session object owning registry, scales, scene, and
/// the transition scheduler.
///
/// All mutation and rendering happens on a single logical thread through
/// discrete calls; in-flight transitions progress only inside
/// [`ChartSession::advance`]. Mutations are serialized through one queue so
/// a mutation never observes a half-finished exit.
pub struct ChartSession<R: Renderer> {
    renderer: R,
    config: ChartSessionConfig,
    registry: SeriesRegistry,
    coordinator: ScaleCoordinator,
    scene: SceneStore,
    scheduler: TransitionScheduler,
    exits: IndexMap<Region, ExitState>,
    pending: VecDeque<PendingMutation>,
    hover: HoverState,
    rng: StdRng,
}

impl<R: Renderer> ChartSession<R> {
    pub fn new(renderer: R, config: ChartSessionConfig) -> ChartResult<Self> {
        config.validate()?;
        let coordinator = ScaleCoordinator::new(config.viewport, config.margins)?;
        let rng = match config.color_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            renderer,
            config,
            registry: SeriesRegistry::new(),
            coordinator,
            scene: SceneStore::new(),
            scheduler: TransitionScheduler::new(),
            exits: IndexMap::new(),
            pending: VecDeque::new(),
            hover: HoverState::default(),
            rng,
        })
    }

    /// Loads and plots the national aggregate for `name`.
    pub fn plot_aggregate(
        &mut self,
        accessor: &DataAccessor,
        name: &str,
    ) -> ChartResult<MutationOutcome> {
        let series = accessor.load(Region::Aggregate, self.config.gender, name)?;
        self.add_series(Region::Aggregate, series)
    }

    /// Translates a state click into an add or a remove.
    pub fn toggle_state(
        &mut self,
        accessor: &DataAccessor,
        name: &str,
        code: StateCode,
    ) -> ChartResult<ToggleOutcome> {
        let region = Region::State(code);
        if self.registry.contains(region) {
            let outcome = self.remove_series(region)?;
            return Ok(ToggleOutcome::Removed(outcome));
        }
        let series = accessor.load(region, self.config.gender, name)?;
        let outcome = self.add_series(region, series)?;
        Ok(ToggleOutcome::Added(outcome))
    }

    /// Adds a series under `region`, recomputing both shared domains and
    /// animating every previously plotted series onto the new scales.
    ///
    /// Fails with `DuplicateRegion` (and changes nothing) when the region
    /// is already plotted or already queued to be plotted. Applies later
    /// when any mutation is still queued or the region's exit fade is in
    /// flight.
    pub fn add_series(
        &mut self,
        region: Region,
        series: NameSeries,
    ) -> ChartResult<MutationOutcome> {
        if self.registry.contains(region) || self.pending_contains_add(region) {
            return Err(ChartError::DuplicateRegion(region));
        }

        if !self.pending.is_empty() || self.exits.contains_key(&region) {
            info!(%region, "add deferred behind in-flight exit");
            self.pending.push_back(PendingMutation::Add { region, series });
            return Ok(MutationOutcome::Deferred);
        }

        self.apply_add(region, series)?;
        Ok(MutationOutcome::Applied)
    }

    /// Removes the series under `region`, fading its primitives out.
    ///
    /// The survivors' Y-domain shrink waits for the fade to finish; add and
    /// remove deliberately rescale at different moments.
    pub fn remove_series(&mut self, region: Region) -> ChartResult<MutationOutcome> {
        if self.pending_contains_add(region) {
            // A queued add owns the region's future; serialize behind it.
            info!(%region, "remove deferred behind queued add");
            self.pending.push_back(PendingMutation::Remove { region });
            return Ok(MutationOutcome::Deferred);
        }
        if self.exits.contains_key(&region) || !self.registry.contains(region) {
            return Err(ChartError::RegionNotPlotted(region));
        }

        if !self.pending.is_empty() {
            info!(%region, "remove deferred behind queued mutations");
            self.pending.push_back(PendingMutation::Remove { region });
            return Ok(MutationOutcome::Deferred);
        }

        self.apply_remove(region)?;
        Ok(MutationOutcome::Applied)
    }

    /// Steps in-flight transitions by `delta_seconds` and runs whatever
    /// their completion unblocks: exit cleanup, the deferred survivor
    /// rescale, and queued mutations.
    ///
    /// Returns the number of transitions that completed during the step.
    pub fn advance(&mut self, delta_seconds: f64) -> ChartResult<usize> {
        let completed = self.scheduler.advance(&mut self.scene, delta_seconds)?;
        let completed_count = completed.len();

        let mut finished_exits: Vec<Region> = Vec::new();
        for done in completed {
            let TransitionKind::Fade { to_opacity, .. } = done.kind else {
                continue;
            };
            if to_opacity != 0.0 {
                continue;
            }
            let Some(primitive) = self.scene.remove(done.target) else {
                continue;
            };
            if let Some(exit) = self.exits.get_mut(&primitive.region) {
                exit.remaining_fades = exit.remaining_fades.saturating_sub(1);
                if exit.remaining_fades == 0 {
                    finished_exits.push(primitive.region);
                }
            }
        }

        for region in finished_exits {
            let Some(exit) = self.exits.shift_remove(&region) else {
                continue;
            };
            info!(%region, rescale = exit.rescale_pending, "exit fade finished");
            if exit.rescale_pending {
                self.rescale_survivors()?;
            }
        }

        self.drain_pending()?;
        Ok(completed_count)
    }

    /// Builds and submits one draw pass to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_frame(&self.config, &self.coordinator, &self.scene)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let info = resolve_hover(
            &self.scene,
            &self.registry,
            x,
            y,
            self.config.hover_snap_radius_px,
        );
        self.hover.on_pointer_move(x, y, info);
    }

    pub fn pointer_leave(&mut self) {
        self.hover.on_pointer_leave();
    }

    #[must_use]
    pub fn hover_info(&self) -> Option<HoverInfo> {
        self.hover.info()
    }

    #[must_use]
    pub fn config(&self) -> &ChartSessionConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    #[must_use]
    pub fn coordinator(&self) -> &ScaleCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    /// True while any transition is still in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle()
    }

    #[must_use]
    pub fn pending_mutation_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn exiting_regions(&self) -> Vec<Region> {
        self.exits.keys().copied().collect()
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn pending_contains_add(&self, region: Region) -> bool {
        // A queued remove after a queued add re-frees the region.
        let mut queued = false;
        for mutation in &self.pending {
            if mutation.region() != region {
                continue;
            }
            queued = matches!(mutation, PendingMutation::Add { .. });
        }
        queued
    }

    fn apply_add(&mut self, region: Region, series: NameSeries) -> ChartResult<()> {
        let color = match region {
            Region::Aggregate => crate::render::gender_color(self.config.gender),
            Region::State(_) => {
                crate::render::random_state_color(&mut self.rng, &self.registry.active_colors())
            }
        };
        self.registry.add(region, series, color)?;

        self.coordinator.recompute_x(self.registry.entries())?;
        self.coordinator.recompute_y(self.registry.entries())?;

        // This rescale covers any survivor shrink still waiting on a fade.
        for exit in self.exits.values_mut() {
            exit.rescale_pending = false;
        }

        for entry in self.registry.entries() {
            if entry.region == region {
                continue;
            }
            RenderSync::start_rescale(
                &mut self.scene,
                &mut self.scheduler,
                entry,
                &self.coordinator,
                self.config.move_duration_seconds,
            )?;
        }

        let entry = self
            .registry
            .get(region)
            .ok_or(ChartError::RegionNotPlotted(region))?;
        RenderSync::spawn_series(&mut self.scene, entry, &self.coordinator)?;

        info!(%region, series_len = entry.data.len(), active = self.registry.len(), "series added");
        Ok(())
    }

    fn apply_remove(&mut self, region: Region) -> ChartResult<()> {
        self.registry.remove(region)?;
        let fades = RenderSync::start_removal(
            &mut self.scene,
            &mut self.scheduler,
            region,
            self.config.fade_duration_seconds,
        )?;

        if fades.is_empty() {
            // Nothing on screen to fade; the survivor rescale runs now.
            self.rescale_survivors()?;
        } else {
            self.exits.insert(
                region,
                ExitState {
                    remaining_fades: fades.len(),
                    rescale_pending: true,
                },
            );
        }

        info!(%region, fades = fades.len(), active = self.registry.len(), "series removed");
        Ok(())
    }

    fn rescale_survivors(&mut self) -> ChartResult<()> {
        self.coordinator.recompute_y(self.registry.entries())?;
        for entry in self.registry.entries() {
            RenderSync::start_rescale(
                &mut self.scene,
                &mut self.scheduler,
                entry,
                &self.coordinator,
                self.config.move_duration_seconds,
            )?;
        }
        Ok(())
    }

    /// Applies queued mutations in order, stopping at the first one whose
    /// region still has an exit fade in flight.
    fn drain_pending(&mut self) -> ChartResult<()> {
        while let Some(front) = self.pending.front() {
            if self.exits.contains_key(&front.region()) {
                break;
            }
            let mutation = self
                .pending
                .pop_front()
                .ok_or_else(|| ChartError::InvalidData("mutation queue drained".to_owned()))?;
            match mutation {
                PendingMutation::Add { region, series } => {
                    if self.registry.contains(region) {
                        warn!(%region, "queued add skipped: region already plotted");
                        continue;
                    }
                    self.apply_add(region, series)?;
                }
                PendingMutation::Remove { region } => {
                    if !self.registry.contains(region) {
                        warn!(%region, "queued remove skipped: region not plotted");
                        continue;
                    }
                    self.apply_remove(region)?;
                }
            }
        }
        Ok(())
    }
}
