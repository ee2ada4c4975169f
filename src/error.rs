use thiserror::Error;

use crate::core::{Gender, Region};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no data for region `{region}` (gender `{gender}`)")]
    NotFound { region: Region, gender: Gender },

    #[error("region `{0}` is already plotted")]
    DuplicateRegion(Region),

    #[error("region `{0}` is not plotted")]
    RegionNotPlotted(Region),

    #[error("series year sets do not align: {0}")]
    Alignment(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
