use tracing::debug;

use crate::core::{Gender, NameSeries, Region, YearRecord};
use crate::data::{Dataset, GenderTable};
use crate::error::{ChartError, ChartResult};
use crate::names::capitalize;

/// Read-side access to one dataset snapshot.
///
/// Owns the snapshot handed over by whatever loaded it; every query returns
/// freshly built, immutable series.
#[derive(Debug, Clone)]
pub struct DataAccessor {
    dataset: Dataset,
}

impl DataAccessor {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Builds the series for one (region, gender, name) triple.
    ///
    /// Every year present in the region's year index is represented, with
    /// count defaulting to 0 when the name is absent in that year. A name
    /// with zero occurrences everywhere yields a full-length all-zero
    /// series, never a zero-length one.
    pub fn load(&self, region: Region, gender: Gender, name: &str) -> ChartResult<NameSeries> {
        let table = self
            .dataset
            .region(region)
            .ok_or(ChartError::NotFound { region, gender })?;

        let series = match gender {
            Gender::Female | Gender::Male => {
                let gender_table = table
                    .gender(gender)
                    .ok_or(ChartError::NotFound { region, gender })?;
                build_series(gender_table, name)?
            }
            Gender::All => {
                let female = build_series(&table.female, name)?;
                let male = build_series(&table.male, name)?;
                female.aggregate(&male)?
            }
        };

        debug!(
            %region,
            %gender,
            name,
            years = series.len(),
            all_zero = series.is_all_zero(),
            "loaded series"
        );
        Ok(series)
    }
}

fn build_series(table: &GenderTable, name: &str) -> ChartResult<NameSeries> {
    let lookup = capitalize(name);
    let mut records = Vec::with_capacity(table.year_count());
    for (&year, entry) in table.years() {
        let count = entry.names.get(&lookup).copied().unwrap_or(0);
        records.push(YearRecord::new(year, count, entry.total_births)?);
    }
    NameSeries::new(records)
}
