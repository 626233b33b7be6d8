//! Choice of interpolation algorithm.

use crate::autoregressive::{Bounds, interpolate_autoregressive};
use crate::error::Result;
use crate::observer::Observer;
use crate::residual::{SplineParams, interpolate_spline};
use crate::series::PeriodSeries;
use serde::{Deserialize, Serialize};

/// Interpolation algorithm together with its parameters.
///
/// Serialized with a `kind` tag next to the parameter fields, e.g.
/// `{ kind = "spline", max_iter = 50, tol = 0.001 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Method {
    /// Bounded autoregressive smoother.
    Autoregressive(Bounds),
    /// Spline residual corrector.
    Spline(SplineParams),
}

impl Default for Method {
    fn default() -> Self {
        Method::Autoregressive(Bounds::none())
    }
}

impl Method {
    /// Check the parameters of the selected algorithm.
    pub fn validate(&self) -> Result<()> {
        match self {
            Method::Autoregressive(bounds) => bounds.validate(),
            Method::Spline(params) => params.validate(),
        }
    }

    /// Interpolate `series` with the selected algorithm.
    pub fn interpolate(
        &self,
        series: &PeriodSeries,
        observer: &mut dyn Observer,
    ) -> Result<Vec<f64>> {
        match *self {
            Method::Autoregressive(bounds) => interpolate_autoregressive(series, bounds, observer),
            Method::Spline(params) => Ok(interpolate_spline(series, params, observer)?.samples),
        }
    }
}
