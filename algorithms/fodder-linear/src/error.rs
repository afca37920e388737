//! An error when modeling a Linear algorithm
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinearError>;

/// An error when modeling a Linear algorithm
#[derive(Error, Debug)]
pub enum LinearError {
    #[error(transparent)]
    BaseCrate(#[from] fodder::Error),
    #[error("At least one sample needed")]
    NotEnoughSamples,
    /// A query does not have the number of features the model was trained with
    #[error("expected {expected} features, but got {found}")]
    FeatureMismatch { expected: usize, found: usize },
    /// NaN or infinite values in records, targets or queries
    #[error("{0} contain non-finite values")]
    NonFinite(Operand),
    #[error("rcond should be finite and in range [0, 1), but is {0}")]
    InvalidRcond(f32),
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
}

/// The input that failed a numeric check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Records,
    Targets,
    Query,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Records => write!(f, "records"),
            Operand::Targets => write!(f, "targets"),
            Operand::Query => write!(f, "query"),
        }
    }
}
