use serde::{Deserialize, Serialize};

use crate::core::YearRecord;
use crate::error::{ChartError, ChartResult};

/// Time-ordered rate data for one (name, gender, region) combination.
///
/// Years ascend strictly and may be sparse; the records themselves never
/// change once the series is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSeries {
    records: Vec<YearRecord>,
}

impl NameSeries {
    pub fn new(records: Vec<YearRecord>) -> ChartResult<Self> {
        for pair in records.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(ChartError::InvalidData(format!(
                    "series years must ascend strictly: {} then {}",
                    pair[0].year, pair[1].year
                )));
            }
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the name never occurs in any covered year.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.records.iter().all(|record| record.count == 0)
    }

    /// First and last covered year, `None` for an empty series.
    #[must_use]
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.year, last.year))
    }

    /// Minimum and maximum per-100k rate, `None` for an empty series.
    #[must_use]
    pub fn rate_bounds(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in &self.records {
            let rate = record.rate();
            min = min.min(rate);
            max = max.max(rate);
        }
        if self.records.is_empty() {
            None
        } else {
            Some((min, max))
        }
    }

    /// Merges two year-aligned series by element-wise summing counts and
    /// total births.
    ///
    /// Both inputs must cover identical year sets; the caller resolves
    /// alignment (typically both derive from the same region's year index).
    pub fn aggregate(&self, other: &NameSeries) -> ChartResult<NameSeries> {
        if self.records.len() != other.records.len() {
            return Err(ChartError::Alignment(format!(
                "lengths differ: {} vs {}",
                self.records.len(),
                other.records.len()
            )));
        }

        let mut merged = Vec::with_capacity(self.records.len());
        for (lhs, rhs) in self.records.iter().zip(&other.records) {
            if lhs.year != rhs.year {
                return Err(ChartError::Alignment(format!(
                    "year {} paired with year {}",
                    lhs.year, rhs.year
                )));
            }
            merged.push(YearRecord::new(
                lhs.year,
                lhs.count + rhs.count,
                lhs.total_births + rhs.total_births,
            )?);
        }
        NameSeries::new(merged)
    }
}
