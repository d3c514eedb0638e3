use thiserror::Error;

/// Everything that can go wrong while building or querying a catalog.
///
/// Queries themselves never fail: asking about an unknown album just
/// yields zero or `None`. Only insertions, imports and transform lookups
/// return this error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid album name: {0:?}")]
    InvalidReference(String),

    #[error("invalid duration: {0} (must be a finite, non-negative number of seconds)")]
    InvalidDuration(f64),

    #[error("unknown transform: {0:?}")]
    UnknownTransform(String),

    #[error("missing csv column: {0:?}")]
    MissingColumn(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
