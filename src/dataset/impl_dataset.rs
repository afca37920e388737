use super::{AsSingleTargets, DatasetBase, DatasetView, Records};
use crate::error::{Error, Result};
use crate::traits::{Predict, PredictInplace};
use ndarray::{ArrayBase, ArrayView1, Data, Dimension, Ix1, Ix2};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets, return the records etc.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Sets the feature names of the dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        self.feature_names = names.into_iter().map(|x| x.into()).collect();
        self
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// If none were set, the names `feature-0`, `feature-1`, ... are generated.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }
}

impl<R: Records, T: AsSingleTargets> DatasetBase<R, T> {
    /// Checks that there is exactly one target per record
    pub fn check_shapes(&self) -> Result<()> {
        let (records, targets) = (self.records.nsamples(), self.targets.as_single_targets().len());

        if records != targets {
            return Err(Error::MismatchedShapes { records, targets });
        }

        Ok(())
    }
}

impl<F, E, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    D: Data<Elem = F>,
    S: Data<Elem = E>,
{
    /// Creates a view of the dataset
    pub fn view(&self) -> DatasetView<F, E> {
        DatasetBase::new(self.records.view(), self.targets.view())
            .with_feature_names(self.feature_names.clone())
    }

    /// Iterates over the samples, pairing every record with its target
    pub fn sample_iter<'a>(&'a self) -> impl Iterator<Item = (ArrayView1<'a, F>, &'a E)>
    where
        F: 'a,
        E: 'a,
    {
        self.records.outer_iter().zip(self.targets.iter())
    }
}

/// Predict with a model on an `ndarray` matrix
impl<'a, F, D, DM, T, O> Predict<&'a ArrayBase<D, DM>, T> for O
where
    D: Data<Elem = F>,
    DM: Dimension,
    O: PredictInplace<ArrayBase<D, DM>, T>,
{
    fn predict(&self, records: &'a ArrayBase<D, DM>) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}

/// Predict with a model on the records of a dataset
impl<'a, R, S, T, O> Predict<&'a DatasetBase<R, S>, T> for O
where
    R: Records,
    O: PredictInplace<R, T>,
{
    fn predict(&self, ds: &'a DatasetBase<R, S>) -> T {
        let mut targets = self.default_target(&ds.records);
        self.predict_inplace(&ds.records, &mut targets);
        targets
    }
}
