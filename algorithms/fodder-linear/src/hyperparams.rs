use crate::error::LinearError;
use fodder::{Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// An ordinary least squares linear regression model.
///
/// LinearRegression fits a linear model to minimize the residual sum of
/// squares between the observed targets in the dataset, and the targets
/// predicted by the linear approximation.
///
/// Ordinary least squares regression solves the overconstrainted model
///
/// y = Ax + b
///
/// by finding x and b which minimize the L_2 norm ||y - Ax - b||_2.
///
/// It uses the Moore-Penrose pseudo-inverse, computed from a singular value
/// decomposition, to solve y - b = Ax. Collinear features therefore do not
/// fail the fit, the solution with the smallest norm is returned instead.
///
/// ## Examples
///
/// Here's an example on how to train a linear regression model on the `herd` dataset
/// ```rust
/// use fodder::traits::{Fit, Predict};
/// use fodder::metrics::SingleTargetRegression;
/// use fodder_linear::LinearRegression;
///
/// let dataset = fodder_datasets::herd();
/// let model = LinearRegression::default().fit(&dataset).unwrap();
/// let pred = model.predict(&dataset);
/// let r2 = pred.r2(&dataset).unwrap();
/// println!("r2 from prediction: {}", r2);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRegression<F: Float>(pub(crate) LinearRegressionValidParams<F>);

/// A verified hyper-parameter set ready for the estimation of a linear regression model
///
/// See [`LinearRegression`](crate::LinearRegression) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRegressionValidParams<F: Float> {
    pub(crate) fit_intercept: bool,
    pub(crate) rcond: Option<F>,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn rcond(&self) -> Option<F> {
        self.rcond
    }

    /// The relative cutoff applied to a system of the given shape
    pub(crate) fn cutoff(&self, nrows: usize, ncols: usize) -> F {
        self.rcond.unwrap_or_else(|| {
            let size = F::cast(nrows.max(ncols));
            F::cast(1e-10).max(F::epsilon() * size)
        })
    }
}

impl<F: Float> Default for LinearRegression<F> {
    fn default() -> Self {
        LinearRegression::new()
    }
}

/// Configure and fit a linear regression model
impl<F: Float> LinearRegression<F> {
    /// Create a default linear regression model.
    /// By default, an intercept will be fitted.
    pub fn new() -> LinearRegression<F> {
        LinearRegression(LinearRegressionValidParams {
            fit_intercept: true,
            rcond: None,
        })
    }

    /// Configure the linear regression model to fit an intercept.
    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.0.fit_intercept = intercept;
        self
    }

    /// Set the relative cutoff for small singular values.
    ///
    /// Singular values smaller than `rcond` times the largest singular value are
    /// treated as zero. Defaults to `max(1e-10, eps * max(n_samples, n_features))`.
    ///
    /// `rcond` must be finite and in range `[0, 1)`
    pub fn rcond(mut self, rcond: F) -> Self {
        self.0.rcond = Some(rcond);
        self
    }
}

impl<F: Float> ParamGuard for LinearRegression<F> {
    type Checked = LinearRegressionValidParams<F>;
    type Error = LinearError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        match self.0.rcond {
            Some(rcond) if !rcond.is_finite() || rcond < F::zero() || rcond >= F::one() => {
                Err(LinearError::InvalidRcond(rcond.to_f32().unwrap_or(f32::NAN)))
            }
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fit_an_intercept() {
        let params = LinearRegression::<f64>::default().check().unwrap();

        assert!(params.fit_intercept());
        assert_eq!(params.rcond(), None);
    }

    #[test]
    fn default_cutoff_scales_with_problem_size() {
        let params = LinearRegression::<f32>::new().check().unwrap();

        assert_eq!(params.cutoff(4, 3), f32::EPSILON * 4.);
        assert_eq!(
            LinearRegression::<f64>::new().check().unwrap().cutoff(4, 3),
            1e-10
        );
    }

    #[test]
    fn invalid_rcond_is_rejected() {
        for rcond in [-0.1, 1.0, f64::NAN, f64::INFINITY] {
            let res = LinearRegression::new().rcond(rcond).check();
            assert!(matches!(res, Err(LinearError::InvalidRcond(_))));
        }

        assert!(LinearRegression::new().rcond(0.0f64).check().is_ok());
    }
}
