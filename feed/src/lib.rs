//! Feed amount prediction
//!
//! A [`FeedPredictor`] is trained once on herd records and answers how much feed an animal
//! needs given its age, weight and health score. The training data is passed in explicitly, so
//! the same predictor works for the reference herd of `fodder-datasets` and for records read
//! from any other source.
//!
//! ```
//! use fodder_feed::FeedPredictor;
//!
//! let predictor = FeedPredictor::train(&fodder_datasets::herd()).unwrap();
//! let feed = predictor.predict_feed(3., 280., 8.).unwrap();
//! assert!(feed > 10. && feed < 25.);
//! ```
use fodder::dataset::Records;
use fodder::traits::Fit;
use fodder::Dataset;
use fodder_linear::{FittedLinearRegression, LinearError, LinearRegression};
use ndarray::{arr1, Array1};
use std::io::Read;
use thiserror::Error;

/// Number of features a herd record carries: age, weight and health score
pub const NFEATURES: usize = 3;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Linear(#[from] LinearError),
    #[error(transparent)]
    Dataset(#[from] fodder_datasets::DatasetError),
}

/// The description of a single animal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedQuery {
    pub age: f64,
    pub weight: f64,
    pub health_score: f64,
}

impl FeedQuery {
    pub fn new(age: f64, weight: f64, health_score: f64) -> Self {
        FeedQuery {
            age,
            weight,
            health_score,
        }
    }

    /// Features in training column order
    pub fn to_array(&self) -> Array1<f64> {
        arr1(&[self.age, self.weight, self.health_score])
    }
}

/// Predicts feed amounts with a linear model fitted on herd records
#[derive(Debug, Clone)]
pub struct FeedPredictor {
    model: FittedLinearRegression<f64>,
}

impl FeedPredictor {
    /// Fit an ordinary least squares model with an intercept on the given records
    pub fn train(dataset: &Dataset<f64, f64>) -> Result<Self> {
        FeedPredictor::train_with(LinearRegression::default(), dataset)
    }

    /// Fit on `age,weight,health_score,feed_amount` rows read from a CSV source
    pub fn train_from_csv<R: Read>(
        params: LinearRegression<f64>,
        csv: R,
        has_headers: bool,
    ) -> Result<Self> {
        let dataset = fodder_datasets::herd_from_csv(csv, has_headers)?;

        FeedPredictor::train_with(params, &dataset)
    }

    /// Fit with custom linear regression hyperparameters
    ///
    /// The records must have exactly the three herd features.
    pub fn train_with(params: LinearRegression<f64>, dataset: &Dataset<f64, f64>) -> Result<Self> {
        if dataset.nfeatures() != NFEATURES {
            return Err(LinearError::FeatureMismatch {
                expected: NFEATURES,
                found: dataset.nfeatures(),
            }
            .into());
        }

        let model = params.fit(dataset)?;
        log::info!(
            "trained feed model on {} records: coefficients {}, intercept {}",
            dataset.nsamples(),
            model.params(),
            model.intercept()
        );

        Ok(FeedPredictor { model })
    }

    /// Predicted feed amount for an animal
    ///
    /// The value is not clamped and may be negative for inputs far away from the training data.
    pub fn predict_feed(&self, age: f64, weight: f64, health_score: f64) -> Result<f64> {
        self.predict(&FeedQuery::new(age, weight, health_score))
    }

    pub fn predict(&self, query: &FeedQuery) -> Result<f64> {
        Ok(self.model.predict_one(query.to_array().view())?)
    }

    /// The fitted linear model
    pub fn model(&self) -> &FittedLinearRegression<f64> {
        &self.model
    }
}
