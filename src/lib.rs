//! `fodder` provides the building blocks for fitting linear models to livestock records and
//! turning them into feed plans.
//!
//! ## The Big Picture
//!
//! The crate is split the way most classical machine learning toolkits are:
//!
//! * `fodder` (this crate) holds the shared vocabulary: the [`Dataset`](dataset::Dataset)
//!   container, the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits, the
//!   [`ParamGuard`] for hyperparameter validation and the regression metrics.
//! * `fodder-linear` implements ordinary least squares on top of it.
//! * `fodder-datasets` ships the reference herd data and a CSV loader.
//! * `fodder-feed` wraps a fitted model into the feed amount predictor and the
//!   `predict-feed` executable.
//!
//! ## Example
//!
//! ```ignore
//! use fodder::traits::{Fit, Predict};
//! use fodder::metrics::SingleTargetRegression;
//! use fodder_linear::LinearRegression;
//!
//! let dataset = fodder_datasets::herd();
//! let model = LinearRegression::default().fit(&dataset)?;
//! let r2 = model.predict(&dataset).r2(&dataset)?;
//! ```

pub mod dataset;
pub mod error;
mod metrics_regression;
mod param_guard;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::SingleTargetRegression;
}
