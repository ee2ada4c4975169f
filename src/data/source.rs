use std::collections::BTreeMap;
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::core::{Gender, Region};
use crate::error::{ChartError, ChartResult};

/// One source year: total recorded births and per-name counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YearEntry {
    pub total_births: u64,
    #[serde(default)]
    pub names: HashMap<String, u64>,
}

/// Year index for one gender within a region, ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct GenderTable {
    years: BTreeMap<i32, YearEntry>,
}

impl GenderTable {
    #[must_use]
    pub fn years(&self) -> &BTreeMap<i32, YearEntry> {
        &self.years
    }

    #[must_use]
    pub fn year_count(&self) -> usize {
        self.years.len()
    }
}

/// Per-region source tables, one per gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegionTable {
    #[serde(default)]
    pub female: GenderTable,
    #[serde(default)]
    pub male: GenderTable,
}

impl RegionTable {
    #[must_use]
    pub fn gender(&self, gender: Gender) -> Option<&GenderTable> {
        match gender {
            Gender::Female => Some(&self.female),
            Gender::Male => Some(&self.male),
            Gender::All => None,
        }
    }
}

/// Fully materialized, immutable dataset snapshot.
///
/// Top level is one key per region (`"aggregate"`, `"CA"`, ...); each region
/// maps year to total births and name counts per gender.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    regions: IndexMap<Region, RegionTable>,
}

impl Dataset {
    #[must_use]
    pub fn new(regions: IndexMap<Region, RegionTable>) -> Self {
        Self { regions }
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let regions: IndexMap<Region, RegionTable> = serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidData(format!("dataset parse failed: {err}")))?;
        Ok(Self { regions })
    }

    pub fn from_value(value: serde_json::Value) -> ChartResult<Self> {
        let regions: IndexMap<Region, RegionTable> = serde_json::from_value(value)
            .map_err(|err| ChartError::InvalidData(format!("dataset parse failed: {err}")))?;
        Ok(Self { regions })
    }

    #[must_use]
    pub fn region(&self, region: Region) -> Option<&RegionTable> {
        self.regions.get(&region)
    }

    #[must_use]
    pub fn has_region(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.keys().copied()
    }
}
