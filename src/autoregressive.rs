//! Bounded autoregressive smoother.
//!
//! Mean-preserving smoothing after Rymes & Myers (2001), "Mean preserving
//! algorithm for smoothly interpolating averaged data", Solar Energy 71(4).
//! The bound corrections use the redistribution that keeps the period mean,
//! rather than the equations printed in the paper.

use crate::error::{InterpError, Result};
use crate::observer::{Bound, Notice, Observer};
use crate::series::PeriodSeries;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Optional global bounds on the interpolated samples.
///
/// Missing bounds are `None` when deserialized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    /// Lower bound for every sample.
    pub min_val: Option<f64>,
    /// Upper bound for every sample.
    pub max_val: Option<f64>,
}

impl Bounds {
    /// No bounds at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check that bounds are finite and ordered.
    ///
    /// # Errors
    /// Returns [`InterpError::InvalidBounds`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let finite = self.min_val.is_none_or(f64::is_finite)
            && self.max_val.is_none_or(f64::is_finite);
        let ordered = match (self.min_val, self.max_val) {
            (Some(min_val), Some(max_val)) => min_val <= max_val,
            _ => true,
        };
        if !finite || !ordered {
            return Err(InterpError::InvalidBounds {
                min_val: self.min_val,
                max_val: self.max_val,
            });
        }
        Ok(())
    }

    fn describe(&self) -> &'static str {
        match (self.min_val, self.max_val) {
            (None, None) => "no bounds",
            (None, Some(_)) => "maximum bound",
            (Some(_), None) => "minimum bound",
            (Some(_), Some(_)) => "minimum and maximum bounds",
        }
    }
}

/// Interpolate `series` with the bounded autoregressive smoother.
///
/// Runs one smoothing/correction step per fine-grained sample. Without bounds
/// the period means of the result equal the period values up to rounding.
/// With bounds the result never leaves `[min_val, max_val]`, and period means
/// are restored as closely as the bounds allow. A period whose bound
/// correction cannot be applied is reported once per bound through a
/// [`Notice::DegenerateBoundCorrection`], however many steps skip it.
///
/// # Errors
/// Returns [`InterpError::InvalidBounds`] if `bounds` fail validation.
pub fn interpolate_autoregressive(
    series: &PeriodSeries,
    bounds: Bounds,
    observer: &mut dyn Observer,
) -> Result<Vec<f64>> {
    bounds.validate()?;
    observer.notice(&Notice::Start {
        description: format!("interpolating with {}", bounds.describe()),
    });

    let mut smoother = Smoother::new(series);
    for _ in 0..series.n_samples() {
        smoother.perform_step(bounds, observer);
    }

    Ok(smoother.curr)
}

struct Smoother {
    ranges: Vec<Range<usize>>,
    target: Vec<f64>,
    curr: Vec<f64>,
    next: Vec<f64>,
    // Periods already reported as degenerate, per bound.
    degenerate_max: Vec<bool>,
    degenerate_min: Vec<bool>,
}

impl Smoother {
    fn new(series: &PeriodSeries) -> Self {
        let target = series.expand();
        let n_periods = series.n_periods();
        Self {
            ranges: series.ranges().collect(),
            curr: target.clone(),
            next: vec![0.0; target.len()],
            target,
            degenerate_max: vec![false; n_periods],
            degenerate_min: vec![false; n_periods],
        }
    }

    fn perform_step(&mut self, bounds: Bounds, observer: &mut dyn Observer) {
        self.smooth();

        self.restore_means();

        if let Some(max_val) = bounds.max_val {
            self.correct_max(max_val, observer);
        }

        if let Some(min_val) = bounds.min_val {
            self.correct_min(min_val, observer);
        }

        // The minimum correction may lift samples above the maximum.
        if let (Some(_), Some(max_val)) = (bounds.min_val, bounds.max_val) {
            self.curr.iter_mut().for_each(|val| *val = val.min(max_val));
        }
    }

    /// Circular three-point moving average.
    fn smooth(&mut self) {
        let n = self.curr.len();
        for i in 0..n {
            let prev = self.curr[(i + n - 1) % n];
            let next = self.curr[(i + 1) % n];
            self.next[i] = (prev + self.curr[i] + next) / 3.0;
        }
        std::mem::swap(&mut self.curr, &mut self.next);
    }

    fn restore_means(&mut self) {
        for range in &self.ranges {
            let diff_sum: f64 = self.target[range.clone()]
                .iter()
                .zip(&self.curr[range.clone()])
                .map(|(target, val)| target - val)
                .sum();
            let corr = diff_sum / range.len() as f64;
            self.curr[range.clone()]
                .iter_mut()
                .for_each(|val| *val += corr);
        }
    }

    fn correct_max(&mut self, max_val: f64, observer: &mut dyn Observer) {
        self.curr.iter_mut().for_each(|val| *val = val.min(max_val));

        for (period, range) in self.ranges.iter().enumerate() {
            let room_target: f64 = self.target[range.clone()]
                .iter()
                .map(|target| max_val - target)
                .sum();
            let room_curr: f64 = self.curr[range.clone()]
                .iter()
                .map(|val| max_val - val)
                .sum();

            let Some(ratio) = room_ratio(room_target, room_curr) else {
                if !std::mem::replace(&mut self.degenerate_max[period], true) {
                    observer.notice(&Notice::DegenerateBoundCorrection {
                        period,
                        bound: Bound::Max,
                    });
                }
                continue;
            };

            // Shrink the headroom of samples below their target.
            for i in range.clone() {
                if self.target[i] > self.curr[i] {
                    self.curr[i] = max_val - ratio * (max_val - self.curr[i]);
                }
            }
        }
    }

    fn correct_min(&mut self, min_val: f64, observer: &mut dyn Observer) {
        self.curr.iter_mut().for_each(|val| *val = val.max(min_val));

        for (period, range) in self.ranges.iter().enumerate() {
            let room_target: f64 = self.target[range.clone()]
                .iter()
                .map(|target| target - min_val)
                .sum();
            let room_curr: f64 = self.curr[range.clone()]
                .iter()
                .map(|val| val - min_val)
                .sum();

            let Some(ratio) = room_ratio(room_target, room_curr) else {
                if !std::mem::replace(&mut self.degenerate_min[period], true) {
                    observer.notice(&Notice::DegenerateBoundCorrection {
                        period,
                        bound: Bound::Min,
                    });
                }
                continue;
            };

            // Shrink the floor-room of samples above their target.
            for i in range.clone() {
                if self.target[i] < self.curr[i] {
                    self.curr[i] = min_val + ratio * (self.curr[i] - min_val);
                }
            }
        }
    }
}

/// Ratio of target to current room, or `None` when it cannot be applied
/// without leaving the bound.
fn room_ratio(room_target: f64, room_curr: f64) -> Option<f64> {
    if room_curr == 0.0 {
        return None;
    }
    let ratio = room_target / room_curr;
    (ratio.is_finite() && ratio >= 0.0).then_some(ratio)
}
