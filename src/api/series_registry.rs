use indexmap::IndexMap;

use crate::core::{NameSeries, Region};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One plotted series: its region key, immutable data, and display color.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub region: Region,
    pub data: NameSeries,
    pub color: Color,
}

/// The set of currently plotted series, keyed by region.
///
/// Insertion order is preserved for deterministic re-render iteration; the
/// aggregate is inserted first and therefore rendered beneath the state
/// overlays. At most one entry exists per region at any time.
#[derive(Debug, Default)]
pub struct SeriesRegistry {
    entries: IndexMap<Region, SeriesEntry>,
}

impl SeriesRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a series under its region key.
    ///
    /// Fails without any state change when the region is already plotted;
    /// the caller must remove first.
    pub fn add(
        &mut self,
        region: Region,
        data: NameSeries,
        color: Color,
    ) -> ChartResult<&SeriesEntry> {
        if self.entries.contains_key(&region) {
            return Err(ChartError::DuplicateRegion(region));
        }
        color.validate()?;

        let entry = SeriesEntry {
            region,
            data,
            color,
        };
        Ok(self.entries.entry(region).or_insert(entry))
    }

    /// Removes and returns the entry for `region`.
    ///
    /// Removal keeps the insertion order of the survivors intact.
    pub fn remove(&mut self, region: Region) -> ChartResult<SeriesEntry> {
        self.entries
            .shift_remove(&region)
            .ok_or(ChartError::RegionNotPlotted(region))
    }

    #[must_use]
    pub fn get(&self, region: Region) -> Option<&SeriesEntry> {
        self.entries.get(&region)
    }

    #[must_use]
    pub fn contains(&self, region: Region) -> bool {
        self.entries.contains_key(&region)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &SeriesEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn active_colors(&self) -> Vec<Color> {
        self.entries.values().map(|entry| entry.color).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
