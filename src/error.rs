use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    #[error("unknown series `{0}`")]
    UnknownSeries(String),

    #[error("scale domain is empty: {0}")]
    EmptyDomain(&'static str),

    #[error("record source failed: {0}")]
    DataSource(String),
}
