//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use crate::{
    dataset::AsSingleTargets,
    error::{Error, Result},
    Float,
};
use ndarray::ArrayView1;

/// Regression metrices trait for single targets.
///
/// It is possible to compute the listed mectrics between:
/// * One-dimensional array - One-dimensional array
/// * One-dimensional array - dataset
///
/// To compare predictions against the targets of a dataset, use
/// ```ignore
/// prediction.r2(&dataset)
/// ```
pub trait SingleTargetRegression<F: Float, T: AsSingleTargets<Elem = F>>:
    AsSingleTargets<Elem = F>
{
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: &T) -> Result<F> {
        let (estimate, truth) = paired_targets(self, compare_to)?;

        Ok(estimate
            .iter()
            .zip(truth.iter())
            .map(|(a, b)| (*a - *b).abs())
            .fold(F::neg_infinity(), F::max))
    }

    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: &T) -> Result<F> {
        let (estimate, truth) = paired_targets(self, compare_to)?;

        (&estimate - &truth)
            .mapv(|x| x.abs())
            .mean()
            .ok_or(Error::NotEnoughSamples)
    }

    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: &T) -> Result<F> {
        let (estimate, truth) = paired_targets(self, compare_to)?;

        (&estimate - &truth)
            .mapv(|x| x * x)
            .mean()
            .ok_or(Error::NotEnoughSamples)
    }

    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    ///
    /// A constant ground truth has no variance to explain: the score is `1` for a perfect
    /// estimate and `0` otherwise.
    fn r2(&self, compare_to: &T) -> Result<F> {
        let (estimate, truth) = paired_targets(self, compare_to)?;
        let mean = truth.mean().ok_or(Error::NotEnoughSamples)?;

        let residual = (&estimate - &truth).mapv(|x| x * x).sum();
        let total = truth.mapv(|x| (x - mean) * (x - mean)).sum();

        if total == F::zero() {
            return Ok(if residual == F::zero() {
                F::one()
            } else {
                F::zero()
            });
        }

        Ok(F::one() - residual / total)
    }
}

impl<F: Float, T: AsSingleTargets<Elem = F>, T2: AsSingleTargets<Elem = F>>
    SingleTargetRegression<F, T2> for T
{
}

fn paired_targets<'a, F, A, B>(
    estimate: &'a A,
    truth: &'a B,
) -> Result<(ArrayView1<'a, F>, ArrayView1<'a, F>)>
where
    A: AsSingleTargets<Elem = F> + ?Sized,
    B: AsSingleTargets<Elem = F>,
{
    let (estimate, truth) = (estimate.as_single_targets(), truth.as_single_targets());

    if estimate.len() != truth.len() {
        return Err(Error::MismatchedShapes {
            records: estimate.len(),
            targets: truth.len(),
        });
    }
    if truth.is_empty() {
        return Err(Error::NotEnoughSamples);
    }

    Ok((estimate, truth))
}
