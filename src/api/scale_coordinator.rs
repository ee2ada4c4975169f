use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::SeriesEntry;
use crate::core::{LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Pixel margins reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            left: 48.0,
            right: 16.0,
            top: 16.0,
            bottom: 32.0,
        }
    }
}

impl PlotMargins {
    pub fn validate(self, viewport: Viewport) -> ChartResult<()> {
        for (label, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "plot margin `{label}` must be finite and >= 0"
                )));
            }
        }
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        if self.left + self.right >= width || self.top + self.bottom >= height {
            return Err(ChartError::InvalidData(
                "plot margins leave no plot area".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Owner of the shared X (year) and Y (rate) axis scales.
///
/// Domains are recomputed from the union of the active series exactly when
/// the active set changes; ranges are fixed by the viewport and margins for
/// the life of the session. The Y pixel range is inverted so the rate
/// minimum sits at the bottom of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleCoordinator {
    x: LinearScale,
    y: LinearScale,
}

impl ScaleCoordinator {
    pub fn new(viewport: Viewport, margins: PlotMargins) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        margins.validate(viewport)?;

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        // Placeholder unit domains; the first add recomputes both.
        let x = LinearScale::new(0.0, 1.0, margins.left, width - margins.right)?;
        let y = LinearScale::new(0.0, 1.0, height - margins.bottom, margins.top)?;
        Ok(Self { x, y })
    }

    #[must_use]
    pub fn x(&self) -> LinearScale {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> LinearScale {
        self.y
    }

    /// Refits the year domain to [min year, max year] across the union of
    /// the given entries' series.
    ///
    /// Returns whether the domain changed. An empty union (no entries, or
    /// only empty series) leaves the domain untouched.
    pub fn recompute_x<'a>(
        &mut self,
        entries: impl Iterator<Item = &'a SeriesEntry>,
    ) -> ChartResult<bool> {
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        let mut seen = false;
        for entry in entries {
            if let Some((first, last)) = entry.data.year_bounds() {
                min = min.min(first);
                max = max.max(last);
                seen = true;
            }
        }
        if !seen {
            return Ok(false);
        }

        let (domain_start, domain_end) = self.x.domain();
        let (new_start, new_end) = (f64::from(min), f64::from(max));
        if domain_start == new_start && domain_end == new_end {
            return Ok(false);
        }
        self.x = self.x.with_domain(new_start, new_end)?;
        debug!(year_min = min, year_max = max, "x domain refit");
        Ok(true)
    }

    /// Refits the rate domain to [min rate, max rate] across the union of
    /// the given entries' series.
    ///
    /// The caller passes the active set as of the moment of recomputation,
    /// so a just-added series widens the domain for everything already on
    /// screen. Returns whether the domain changed.
    pub fn recompute_y<'a>(
        &mut self,
        entries: impl Iterator<Item = &'a SeriesEntry>,
    ) -> ChartResult<bool> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;
        for entry in entries {
            if let Some((low, high)) = entry.data.rate_bounds() {
                min = min.min(low);
                max = max.max(high);
                seen = true;
            }
        }
        if !seen {
            return Ok(false);
        }

        let (domain_start, domain_end) = self.y.domain();
        if domain_start == min && domain_end == max {
            return Ok(false);
        }
        self.y = self.y.with_domain(min, max)?;
        debug!(rate_min = min, rate_max = max, "y domain refit");
        Ok(true)
    }

    /// Projects one (year, rate) pair into pixel space.
    pub fn project(&self, year: i32, rate: f64) -> ChartResult<(f64, f64)> {
        let x = self.x.apply(f64::from(year))?;
        let y = self.y.apply(rate)?;
        Ok((x, y))
    }
}
