use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Births-per-100k normalization factor used for plotted rates.
pub const RATE_PER_BIRTHS: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Gender axis of the dataset tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    /// Element-wise sum of the female and male tables.
    All,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::All => "all",
        };
        f.write_str(label)
    }
}

/// Two-letter uppercase state abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode([u8; 2]);

impl StateCode {
    pub fn new(code: &str) -> ChartResult<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(ChartError::InvalidData(format!(
                "state code must be two ASCII uppercase letters, got `{code}`"
            )));
        }
        Ok(Self([bytes[0], bytes[1]]))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateCode {
    type Err = ChartError;

    fn from_str(s: &str) -> ChartResult<Self> {
        Self::new(s)
    }
}

/// Geographic scope of one plotted series and the registry uniqueness key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// National aggregate.
    Aggregate,
    State(StateCode),
}

impl Region {
    pub fn parse(text: &str) -> ChartResult<Self> {
        if text == "aggregate" {
            return Ok(Region::Aggregate);
        }
        Ok(Region::State(StateCode::new(text)?))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Aggregate => f.write_str("aggregate"),
            Region::State(code) => code.fmt(f),
        }
    }
}

impl Serialize for Region {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Region::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// One year of source data for a name within a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub count: u64,
    pub total_births: u64,
}

impl YearRecord {
    pub fn new(year: i32, count: u64, total_births: u64) -> ChartResult<Self> {
        if count > total_births {
            return Err(ChartError::InvalidData(format!(
                "year {year}: count {count} exceeds total births {total_births}"
            )));
        }
        Ok(Self {
            year,
            count,
            total_births,
        })
    }

    /// Occurrences per 100,000 births.
    ///
    /// A year with zero recorded births is degenerate data; its rate is
    /// defined as 0 rather than an error.
    #[must_use]
    pub fn rate(self) -> f64 {
        if self.total_births == 0 {
            return 0.0;
        }
        (self.count as f64) / (self.total_births as f64) * RATE_PER_BIRTHS
    }
}

/// Snapshot surfaced when the pointer rests on a rendered point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverInfo {
    pub region: Region,
    pub year: i32,
    pub count: u64,
    pub total_births: u64,
}
