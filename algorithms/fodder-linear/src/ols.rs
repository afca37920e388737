//! Ordinary Least Squares
#![allow(non_snake_case)]
use crate::error::{LinearError, Operand, Result};
use crate::hyperparams::LinearRegressionValidParams;
use fodder::dataset::{AsSingleTargets, DatasetBase};
use fodder::metrics::SingleTargetRegression;
use fodder::traits::{Fit, PredictInplace};
use fodder::Float;
use linfa_linalg::svd::*;
use ndarray::{s, Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Dimension, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A fitted linear regression model which can be used for making predictions.
///
/// The model is immutable once fitted, predictions only borrow it and can be
/// made from several threads at once.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedLinearRegression<F> {
    intercept: F,
    params: Array1<F>,
    rank: usize,
    singular_values: Array1<F>,
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, LinearError> for LinearRegressionValidParams<F>
{
    type Object = FittedLinearRegression<F>;

    /// Fit a linear regression model given a feature matrix `X` and a target
    /// variable `y`.
    ///
    /// The feature matrix `X` must have shape `(n_samples, n_features)`
    ///
    /// The target variable `y` must have shape `(n_samples)`
    ///
    /// Returns a `FittedLinearRegression` object which contains the fitted
    /// parameters and can be used to `predict` values of the target variable
    /// for new feature values.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;

        let X = dataset.records();
        let y = dataset.as_single_targets();

        let (n_samples, n_features) = X.dim();
        if n_samples == 0 {
            return Err(LinearError::NotEnoughSamples);
        }
        ensure_finite(X, Operand::Records)?;
        ensure_finite(&y, Operand::Targets)?;

        let fitted = if self.fit_intercept {
            // centering keeps the intercept out of the minimized norm
            let x_mean = X.mean_axis(Axis(0)).ok_or(LinearError::NotEnoughSamples)?;
            let y_mean = y.mean().ok_or(LinearError::NotEnoughSamples)?;
            let X = X - &x_mean;
            let y = &y - y_mean;

            let solution = solve_least_squares(X.view(), y.view(), self)?;
            FittedLinearRegression {
                intercept: y_mean - x_mean.dot(&solution.params),
                params: solution.params,
                rank: solution.rank,
                singular_values: solution.singular_values,
            }
        } else {
            let solution = solve_least_squares(X.view(), y.view(), self)?;
            FittedLinearRegression {
                intercept: F::zero(),
                params: solution.params,
                rank: solution.rank,
                singular_values: solution.singular_values,
            }
        };

        log::debug!(
            "fitted ordinary least squares on {} samples with {} features, rank {}",
            n_samples,
            n_features,
            fitted.rank
        );

        Ok(fitted)
    }
}

struct LeastSquares<F> {
    params: Array1<F>,
    rank: usize,
    singular_values: Array1<F>,
}

/// Find the b that minimizes the 2-norm of X b - y
/// by applying the pseudo inverse of X
///
/// Singular values below the configured cutoff are dropped, which yields the
/// minimum norm solution for rank deficient problems.
fn solve_least_squares<F: Float>(
    X: ArrayView2<F>,
    y: ArrayView1<F>,
    params: &LinearRegressionValidParams<F>,
) -> Result<LeastSquares<F>> {
    let (nrows, ncols) = X.dim();
    if ncols == 0 {
        return Ok(LeastSquares {
            params: Array1::zeros(0),
            rank: 0,
            singular_values: Array1::zeros(0),
        });
    }

    // decompose the tall orientation, pinv(X) = pinv(X^T)^T
    let wide = nrows < ncols;
    let A = if wide { X.reversed_axes() } else { X };
    let (u, sigma, vt) = A.svd(true, true)?.sort_svd_desc();
    let (u, vt) = match (u, vt) {
        (Some(u), Some(vt)) => (u, vt),
        _ => unreachable!("singular vectors were requested"),
    };

    // left: (nrows, k), right: (ncols, k) with X = left * diag(sigma) * right^T
    let (left, right): (Array2<F>, Array2<F>) = if wide {
        (vt.reversed_axes(), u)
    } else {
        (u, vt.reversed_axes())
    };

    let cutoff = params.cutoff(nrows, ncols) * sigma.get(0).copied().unwrap_or_else(F::zero);
    let rank = sigma.iter().take_while(|s| **s > cutoff).count();

    let projected = left.slice(s![.., ..rank]).t().dot(&y) / &sigma.slice(s![..rank]);
    let coefficients = right.slice(s![.., ..rank]).dot(&projected);

    Ok(LeastSquares {
        params: coefficients,
        rank,
        singular_values: sigma,
    })
}

fn ensure_finite<F: Float, S: Data<Elem = F>, I: Dimension>(
    x: &ArrayBase<S, I>,
    operand: Operand,
) -> Result<()> {
    if x.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LinearError::NonFinite(operand))
    }
}

/// View the fitted parameters and make predictions with a fitted
/// linear regresssion model.
impl<F: Float> FittedLinearRegression<F> {
    /// Get the fitted parameters
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    /// Get the fitted intercept, 0. if no intercept was fitted
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Number of features the model was trained with
    pub fn nfeatures(&self) -> usize {
        self.params.len()
    }

    /// Effective rank of the (centered) feature matrix
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Singular values of the (centered) feature matrix, in descending order
    pub fn singular_values(&self) -> &Array1<F> {
        &self.singular_values
    }

    /// Predict the target of a single observation
    ///
    /// Fails with `FeatureMismatch` if the query does not have as many features as the
    /// model was trained with and with `NonFinite` if it holds NaN or infinite values.
    pub fn predict_one(&self, query: ArrayView1<F>) -> Result<F> {
        self.check_features(query.len())?;
        ensure_finite(&query, Operand::Query)?;

        Ok(query.dot(&self.params) + self.intercept)
    }

    /// Predict the targets of a `(n_samples, n_features)` matrix, failing instead of
    /// panicking on a feature mismatch
    pub fn try_predict<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<F>> {
        self.check_features(x.ncols())?;
        ensure_finite(x, Operand::Query)?;

        Ok(x.dot(&self.params) + self.intercept)
    }

    /// Coefficient of determination of the predictions for a dataset
    pub fn score<D, T>(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<F>
    where
        D: Data<Elem = F>,
        T: AsSingleTargets<Elem = F>,
    {
        let prediction = self.try_predict(dataset.records())?;

        Ok(prediction.r2(dataset)?)
    }

    fn check_features(&self, found: usize) -> Result<()> {
        if found != self.params.len() {
            return Err(LinearError::FeatureMismatch {
                expected: self.params.len(),
                found,
            });
        }

        Ok(())
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for FittedLinearRegression<F>
{
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`,
    /// `predict` returns the target variable according to linear model
    /// learned from the training data distribution.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );
        assert_eq!(
            x.ncols(),
            self.params.len(),
            "Number of data features must match the number of features the model was trained with."
        );

        *y = x.dot(&self.params) + self.intercept;
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearRegression;
    use approx::assert_abs_diff_eq;
    use fodder::{traits::Predict, Dataset, ParamGuard};
    use ndarray::{array, Array};

    #[test]
    fn fits_a_line_through_two_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(array![[0f64], [1.]], array![1., 2.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let result = model.predict(dataset.records());

        assert_abs_diff_eq!(result, array![1., 2.], epsilon = 1e-12);
    }

    /// When `with_intercept` is set to false, the
    /// fitted line runs through the origin. For a perfect
    /// fit we only need to provide one point.
    #[test]
    fn without_intercept_fits_line_through_origin() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let dataset = Dataset::new(array![[1.]], array![1.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let result = model.predict(&array![[0.], [1.]]);

        assert_abs_diff_eq!(result, array![0., 1.], epsilon = 1e-12);
    }

    /// We can't fit a line through two points without fitting the
    /// intercept in general. In this case we should find the solution
    /// that minimizes the squares. Fitting a line through the origin and
    /// the points (-1, 1), (1, 1) has the least-squares solution
    /// f(x) = 0
    #[test]
    fn fits_least_squares_line_through_two_dots() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let dataset = Dataset::new(array![[-1.], [1.]], array![1., 1.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let result = model.predict(dataset.records());

        assert_abs_diff_eq!(result, array![0., 0.], epsilon = 1e-12);
    }

    /// We can't fit a line through three points in general
    /// - in this case we should find the solution that minimizes
    /// the squares. Fitting a line with intercept through the
    /// points (0, 0), (1, 0), (2, 2) has the least-squares solution
    /// f(x) = -1./3. + x
    #[test]
    fn fits_least_squares_line_through_three_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(array![[0.], [1.], [2.]], array![0., 0., 2.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let actual = model.predict(dataset.records());

        assert_abs_diff_eq!(actual, array![-1. / 3., 2. / 3., 5. / 3.], epsilon = 1e-12);
    }

    /// Check that the linear regression prefectly fits three datapoints for
    /// the model
    /// f(x) = (x + 1)^2 = x^2 + 2x + 1
    #[test]
    fn fits_three_parameters_through_three_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(array![[0f64, 0.], [1., 1.], [2., 4.]], array![1., 4., 9.]);
        let model = lin_reg.fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.params(), &array![2., 1.], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-12);
        assert_eq!(model.rank(), 2);
    }

    /// Check that the linear regression prefectly fits four datapoints for
    /// the model
    /// f(x) = (x + 1)^3 = x^3 + 3x^2 + 3x + 1
    #[test]
    fn fits_four_parameters_through_four_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(
            array![[0f64, 0., 0.], [1., 1., 1.], [2., 4., 8.], [3., 9., 27.]],
            array![1., 8., 27., 64.],
        );
        let model = lin_reg.fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.params(), &array![3., 3., 1.], epsilon = 1e-10);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-10);
    }

    /// Check that the linear regression prefectly fits three datapoints for
    /// the model
    /// f(x) = (x + 1)^2 = x^2 + 2x + 1
    #[test]
    fn fits_three_parameters_through_three_dots_f32() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(array![[0f32, 0.], [1., 1.], [2., 4.]], array![1., 4., 9.]);
        let model = lin_reg.fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.params(), &array![2., 1.], epsilon = 1e-4);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-4);
    }

    /// Two identical columns share the weight equally in the minimum norm
    /// solution: y = 2x is fitted as y = x + x
    #[test]
    fn collinear_features_get_minimum_norm_solution() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(
            array![[0f64, 0.], [1., 1.], [2., 2.], [3., 3.]],
            array![0., 2., 4., 6.],
        );
        let model = lin_reg.fit(&dataset).unwrap();

        assert_eq!(model.rank(), 1);
        assert_abs_diff_eq!(model.params(), &array![1., 1.], epsilon = 1e-10);
        assert_abs_diff_eq!(model.intercept(), 0., epsilon = 1e-10);
    }

    /// Fewer samples than features: the system is under-determined and
    /// the minimum norm solution interpolates the samples
    #[test]
    fn fits_wide_matrices() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let dataset = Dataset::new(array![[1f64, 1., 0.], [0., 1., 1.]], array![2., 2.]);
        let model = lin_reg.fit(&dataset).unwrap();

        assert_eq!(model.rank(), 2);
        assert_abs_diff_eq!(model.params(), &array![2. / 3., 4. / 3., 2. / 3.], epsilon = 1e-10);
        assert_abs_diff_eq!(model.predict(dataset.records()), array![2., 2.], epsilon = 1e-10);
    }

    #[test]
    fn mismatched_targets_are_a_shape_error() {
        let dataset = Dataset::new(array![[0f64, 1.], [1., 2.], [2., 3.]], array![1., 2.]);
        let res = LinearRegression::new().fit(&dataset);

        assert!(matches!(
            res,
            Err(LinearError::BaseCrate(fodder::Error::MismatchedShapes {
                records: 3,
                targets: 2
            }))
        ));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let dataset = Dataset::new(Array::<f64, _>::zeros((0, 3)), Array::zeros(0));
        let res = LinearRegression::new().fit(&dataset);

        assert!(matches!(res, Err(LinearError::NotEnoughSamples)));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let dataset = Dataset::new(array![[0f64], [f64::NAN]], array![1., 2.]);
        let res = LinearRegression::new().fit(&dataset);
        assert!(matches!(res, Err(LinearError::NonFinite(Operand::Records))));

        let dataset = Dataset::new(array![[0f64], [1.]], array![1., f64::INFINITY]);
        let res = LinearRegression::new().fit(&dataset);
        assert!(matches!(res, Err(LinearError::NonFinite(Operand::Targets))));
    }

    #[test]
    fn invalid_rcond_fails_fit() {
        let dataset = Dataset::new(array![[0f64], [1.]], array![1., 2.]);
        let res = LinearRegression::new().rcond(2.).fit(&dataset);

        assert!(matches!(res, Err(LinearError::InvalidRcond(_))));
    }

    #[test]
    fn predict_one_checks_the_query() {
        let dataset = Dataset::new(array![[0f64, 0.], [1., 1.], [2., 4.]], array![1., 4., 9.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_abs_diff_eq!(
            model.predict_one(array![3., 9.].view()).unwrap(),
            16.,
            epsilon = 1e-10
        );
        assert!(matches!(
            model.predict_one(array![3.].view()),
            Err(LinearError::FeatureMismatch {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            model.predict_one(array![3., 9., 27.].view()),
            Err(LinearError::FeatureMismatch {
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            model.predict_one(array![f64::NAN, 1.].view()),
            Err(LinearError::NonFinite(Operand::Query))
        ));
        assert!(matches!(
            model.try_predict(&array![[1., 2., 3.]]),
            Err(LinearError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn score_of_exact_fit_is_one() {
        let dataset = Dataset::new(array![[0f64], [1.], [2.]], array![1., 3., 5.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.score(&dataset).unwrap(), 1., epsilon = 1e-10);
    }

    /// Check that the linear regression model works with both owned and view
    /// representations of arrays
    #[test]
    fn works_with_viewed_and_owned_representations() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(
            array![[0., 0., 0.], [1., 1., 1.], [2., 4., 8.], [3., 9., 27.]],
            array![1., 8., 27., 64.],
        );
        let dataset_view = dataset.view();

        let model1 = lin_reg.fit(&dataset).expect("can't fit owned arrays");
        let model2 = lin_reg
            .fit(&dataset_view)
            .expect("can't fit feature view with owned target");

        assert_eq!(model1.params(), model2.params());
        assert_abs_diff_eq!(model1.intercept(), model2.intercept());
    }

    #[test]
    fn checked_params_fit_directly() {
        let params = LinearRegression::new().check().unwrap();
        let dataset = Dataset::new(array![[0f64], [1.]], array![1., 2.]);

        let model = params.fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-12);
    }
}
