//! Error types in fodder
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("records have {records} rows but there are {targets} targets")]
    MismatchedShapes { records: usize, targets: usize },
    #[error("not enough samples")]
    NotEnoughSamples,
}
