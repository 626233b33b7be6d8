//! Mean-preserving interpolation of period-averaged series.
//!
//! Given one value per period (for example monthly means) and the number of
//! fine-grained samples in each period (for example days per month), the
//! engine produces a smooth fine-grained series whose mean over every period
//! equals that period's value.
//!
//! Two algorithms are provided:
//! - [`interpolate_autoregressive`]: iterated circular three-point smoothing
//!   with per-period mean restoration and optional global bounds;
//! - [`interpolate_spline`]: iterated cubic spline fits of the remaining
//!   period residuals, summed until the residuals fall below a tolerance.
//!
//! Both are pure functions of their input. Progress and numerical
//! degeneracies are reported to an [`Observer`].
//!
//! ```
//! use mean_interp::{Bounds, LogObserver, PeriodSeries, interpolate_autoregressive};
//!
//! let series = PeriodSeries::new(vec![10.0, 20.0, 30.0], vec![2, 2, 2])?;
//! let samples = interpolate_autoregressive(&series, Bounds::none(), &mut LogObserver)?;
//! assert_eq!(samples.len(), 6);
//! # Ok::<(), mean_interp::InterpError>(())
//! ```

pub mod accumulate;
pub mod autoregressive;
pub mod error;
pub mod method;
pub mod observer;
pub mod residual;
pub mod series;
pub mod spline;
pub mod stats;

pub use accumulate::{accumulate, split_points};
pub use autoregressive::{Bounds, interpolate_autoregressive};
pub use error::{InterpError, Result};
pub use method::Method;
pub use observer::{Bound, LogObserver, Notice, Observer};
pub use residual::{Interpolation, SplineParams, Termination, interpolate_spline};
pub use series::PeriodSeries;
pub use spline::CubicSpline;
pub use stats::DeviationReport;
