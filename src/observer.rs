//! Diagnostic notices emitted while interpolating.

use std::fmt;

/// Which bound a degenerate correction concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min => write!(f, "minimum"),
            Bound::Max => write!(f, "maximum"),
        }
    }
}

/// Informational event produced by an interpolation run.
///
/// Notices never change the result of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A run has started.
    Start { description: String },

    /// A period's headroom (or floor-room) sum was zero, or its ratio was
    /// unusable, so its bound correction was skipped for one iteration.
    DegenerateBoundCorrection { period: usize, bound: Bound },

    /// The spline residual corrector reached the tolerance.
    Converged { iterations: usize, tol: f64 },

    /// The spline residual corrector hit its iteration cap.
    NonConvergence { max_iter: usize, max_residual: f64 },
}

/// Receiver for [`Notice`]s.
pub trait Observer {
    fn notice(&mut self, notice: &Notice);
}

/// Forward notices to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notice(&mut self, notice: &Notice) {
        match notice {
            Notice::Start { description } => log::info!("{description}"),
            Notice::DegenerateBoundCorrection { period, bound } => {
                log::debug!("skipped {bound} bound correction of period {period}")
            }
            Notice::Converged { iterations, tol } => {
                log::info!("converged after {iterations} iterations with the tolerance of {tol}")
            }
            Notice::NonConvergence {
                max_iter,
                max_residual,
            } => log::warn!(
                "did not converge within {max_iter} iterations (max residual: {max_residual})"
            ),
        }
    }
}

impl Observer for Vec<Notice> {
    fn notice(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

impl Observer for () {
    fn notice(&mut self, _notice: &Notice) {}
}
