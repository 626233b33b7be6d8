//! Spline residual corrector.
//!
//! Iterative mean-conserving interpolation after Harzallah (1995), "The
//! interpolation of data series using a constrained iterating technique",
//! Monthly Weather Review 123(7). Each iteration interpolates what is left of
//! the period means and the contributions of all iterations are summed.

use crate::error::{InterpError, Result};
use crate::observer::{Notice, Observer};
use crate::series::{PeriodSeries, mean};
use crate::spline::CubicSpline;
use serde::{Deserialize, Serialize};

/// Stopping criteria of the spline residual corrector.
///
/// Missing fields take their default values when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineParams {
    /// Maximum number of spline fits.
    pub max_iter: usize,
    /// Largest accepted residual between a period value and its interpolated mean.
    pub tol: f64,
}

impl Default for SplineParams {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 0.01,
        }
    }
}

impl SplineParams {
    /// Check that `max_iter` is positive and `tol` is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(InterpError::InvalidParameter {
                name: "max_iter",
                reason: "must be positive".to_string(),
            });
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(InterpError::InvalidParameter {
                name: "tol",
                reason: format!("must be positive and finite, but is {}", self.tol),
            });
        }
        Ok(())
    }
}

/// How a spline residual correction run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// All residuals fell below the tolerance after `iterations` spline fits.
    Converged { iterations: usize },
    /// The iteration cap was reached, or the residuals stopped being finite;
    /// the result is a best-effort approximation.
    IterationCapReached { max_residual: f64 },
}

/// Result of [`interpolate_spline`].
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    /// Interpolated fine-grained samples.
    pub samples: Vec<f64>,
    /// Outcome of the iteration.
    pub termination: Termination,
}

/// Interpolate `series` with the spline residual corrector.
///
/// Not reaching the tolerance is not an error: the sum of all `max_iter`
/// contributions is returned and a [`Notice::NonConvergence`] is emitted.
/// Iteration also stops early with the same outcome once a residual is NaN
/// or infinite, since further fits cannot recover from it.
///
/// # Errors
/// Returns an error if `params` fail validation.
pub fn interpolate_spline(
    series: &PeriodSeries,
    params: SplineParams,
    observer: &mut dyn Observer,
) -> Result<Interpolation> {
    params.validate()?;
    observer.notice(&Notice::Start {
        description: format!(
            "interpolating with splines (max_iter: {}, tol: {})",
            params.max_iter, params.tol
        ),
    });

    let n_periods = series.n_periods();
    let n_samples = series.n_samples();

    let x_mid: Vec<f64> = series
        .boundaries()
        .iter()
        .zip(series.lengths())
        .map(|(&end, &length)| end as f64 - (length as f64 + 1.0) / 2.0 + 1.0)
        .collect();
    let x_samples: Vec<f64> = (1..=n_samples).map(|x| x as f64).collect();

    // Row i holds the period targets of iteration i.
    let mut targets = vec![0.0; (params.max_iter + 1) * n_periods];
    targets[..n_periods].copy_from_slice(series.values());
    // Row i holds the fine-grained contribution of iteration i.
    let mut contribs = vec![0.0; params.max_iter * n_samples];

    let mut n_iter = 0;
    let mut max_residual = f64::NAN;
    let mut converged = false;
    for i_iter in 0..params.max_iter {
        let (curr, rest) = targets[i_iter * n_periods..].split_at_mut(n_periods);
        let contrib = &mut contribs[i_iter * n_samples..(i_iter + 1) * n_samples];

        let spline = CubicSpline::fit(&x_mid, curr)?;
        for (val, &x) in contrib.iter_mut().zip(&x_samples) {
            *val = spline.eval(x);
        }
        n_iter += 1;

        let residual = &mut rest[..n_periods];
        let pairs = residual.iter_mut().zip(curr.iter());
        for ((res, &target), range) in pairs.zip(series.ranges()) {
            *res = target - mean(&contrib[range]);
        }

        max_residual = max_abs(residual);
        if !max_residual.is_finite() {
            break;
        }
        if max_residual < params.tol {
            converged = true;
            break;
        }
    }

    let mut samples = vec![0.0; n_samples];
    for contrib in contribs.chunks_exact(n_samples).take(n_iter) {
        for (sum, val) in samples.iter_mut().zip(contrib) {
            *sum += val;
        }
    }

    let termination = if converged {
        observer.notice(&Notice::Converged {
            iterations: n_iter,
            tol: params.tol,
        });
        Termination::Converged { iterations: n_iter }
    } else {
        observer.notice(&Notice::NonConvergence {
            max_iter: params.max_iter,
            max_residual,
        });
        Termination::IterationCapReached { max_residual }
    };

    Ok(Interpolation {
        samples,
        termination,
    })
}

/// Largest magnitude in `vals`, NaN if any value is NaN.
fn max_abs(vals: &[f64]) -> f64 {
    vals.iter().map(|val| val.abs()).fold(0.0, |acc, abs| {
        if abs.is_nan() || abs > acc { abs } else { acc }
    })
}
