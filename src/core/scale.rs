use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pure linear mapping from a data domain onto a pixel range.
///
/// Unlike a viewport-implicit scale, both intervals are explicit so the Y
/// axis can carry an inverted pixel range (domain minimum at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        for (label, value) in [
            ("domain start", domain_start),
            ("domain end", domain_end),
            ("range start", range_start),
            ("range end", range_end),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "scale {label} must be finite"
                )));
            }
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns a copy with the same range over a new domain.
    pub fn with_domain(self, domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        Self::new(domain_start, domain_end, self.range_start, self.range_end)
    }

    /// Maps a domain value to its range position.
    ///
    /// A zero-span domain maps every value to the range start; single-point
    /// domains pass through without widening.
    pub fn apply(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "scaled value must be finite".to_owned(),
            ));
        }

        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return Ok(self.range_start);
        }
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    /// Maps a range position back to its domain value.
    pub fn invert(self, position: f64) -> ChartResult<f64> {
        if !position.is_finite() {
            return Err(ChartError::InvalidData(
                "range position must be finite".to_owned(),
            ));
        }

        let range_span = self.range_end - self.range_start;
        let domain_span = self.domain_end - self.domain_start;
        if domain_span == 0.0 || range_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (position - self.range_start) / range_span;
        Ok(self.domain_start + normalized * domain_span)
    }
}
