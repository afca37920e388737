//! Datasets for training and evaluating feed models
//!
//! The reference herd data is embedded in the crate. Records collected elsewhere can be read
//! from CSV with [`herd_from_csv`], as long as they follow the same column layout: age, weight
//! and health score as features, followed by the feed amount.
use std::io::Read;

use csv::ReaderBuilder;
use fodder::Dataset;
use ndarray::prelude::*;
use ndarray_csv::{Array2Reader, ReadError};
use thiserror::Error;

/// Names of the features of a herd record, in column order
pub const HERD_FEATURES: [&str; 3] = ["age", "weight", "health_score"];

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("could not read csv: {0}")]
    Read(#[from] ReadError),
    #[error("the source holds no records")]
    NoRecords,
    #[error("expected {expected} columns, but found {found}")]
    Columns { expected: usize, found: usize },
}

/// Convert CSV bytes into 2D array
pub fn array_from_csv<R: Read>(
    csv: R,
    has_headers: bool,
    separator: u8,
) -> std::result::Result<Array2<f64>, ReadError> {
    // parse CSV
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .delimiter(separator)
        .from_reader(csv);

    // extract ndarray
    reader.deserialize_array2_dynamic()
}

/// Read herd records from a comma separated source
///
/// Every row holds `age, weight, health_score, feed_amount`.
pub fn herd_from_csv<R: Read>(csv: R, has_headers: bool) -> Result<Dataset<f64, f64>> {
    let array = array_from_csv(csv, has_headers, b',')?;
    if array.nrows() == 0 {
        return Err(DatasetError::NoRecords);
    }

    let expected = HERD_FEATURES.len() + 1;
    if array.ncols() != expected {
        return Err(DatasetError::Columns {
            expected,
            found: array.ncols(),
        });
    }

    let (data, targets) = (
        array.slice(s![.., 0..3]).to_owned(),
        array.column(3).to_owned(),
    );
    log::debug!("read {} herd records", data.nrows());

    Ok(Dataset::new(data, targets).with_feature_names(HERD_FEATURES.to_vec()))
}

/// The reference herd: four animals with their age, weight, health score and the feed amount
/// they received.
pub fn herd() -> Dataset<f64, f64> {
    let data = include_bytes!("../data/herd.csv");

    herd_from_csv(&data[..], true).expect("embedded herd data is well-formed")
}
