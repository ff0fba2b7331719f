use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Invalid latitude {0}: Mercator is undefined at or beyond ±90°")]
    InvalidLatitude(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("Unknown severity '{0}'")]
    UnknownSeverity(String),
}
