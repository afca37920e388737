//!
//! `fodder-linear` provides a pure Rust implementation of ordinary least squares regression.
//!
//! ## The Big Picture
//!
//! `fodder-linear` is the algorithm crate of the `fodder` workspace. It fits the models that
//! `fodder-feed` turns into feed amount predictions, but works on any `fodder::Dataset` with
//! floating point records and targets.
//!
//! ## Current state
//!
//! `fodder-linear` currently provides an implementation of the following regression algorithms:
//! - Ordinary Least Squares, solved with a pseudo-inverse so that collinear
//!   features yield the minimum norm solution
//!
//! ## Benchmarks
//!
//! ```bash
//! $ cargo bench -p fodder-linear
//! ```

mod error;
mod hyperparams;
mod ols;

pub use error::*;
pub use hyperparams::*;
pub use ols::*;
