//! Period series data types.

use crate::accumulate::accumulate;
use crate::error::{InterpError, Result};
use std::ops::Range;

/// Period-averaged values together with the number of samples in each period.
///
/// Construction validates the series, so every `PeriodSeries` has at least one
/// period, matching value and length counts, positive lengths and finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSeries {
    values: Vec<f64>,
    lengths: Vec<usize>,
    boundaries: Vec<usize>,
}

impl PeriodSeries {
    /// Create a new series from period values and period lengths.
    ///
    /// # Errors
    /// Returns an error if the series is empty, if the number of values and
    /// lengths differ, if a length is zero or if a value is not finite.
    pub fn new(values: Vec<f64>, lengths: Vec<usize>) -> Result<Self> {
        if values.len() != lengths.len() {
            return Err(InterpError::LengthMismatch {
                n_values: values.len(),
                n_lengths: lengths.len(),
            });
        }
        if let Some(period) = lengths.iter().position(|&length| length == 0) {
            return Err(InterpError::NonPositiveLength { period, length: 0 });
        }
        if let Some(period) = values.iter().position(|val| !val.is_finite()) {
            return Err(InterpError::NonFiniteValue {
                period,
                value: values[period],
            });
        }
        let boundaries = accumulate(&lengths)?;

        Ok(Self {
            values,
            lengths,
            boundaries,
        })
    }

    /// Get the period values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the period lengths.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Get the cumulative period boundaries.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Number of periods.
    pub fn n_periods(&self) -> usize {
        self.values.len()
    }

    /// Total number of fine-grained samples.
    pub fn n_samples(&self) -> usize {
        self.boundaries.last().copied().unwrap_or(0)
    }

    /// Sample index range covered by each period.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.boundaries
            .iter()
            .zip(&self.lengths)
            .map(|(&end, &length)| end - length..end)
    }

    /// Step function holding each period value over all samples of the period.
    pub fn expand(&self) -> Vec<f64> {
        let mut samples = Vec::with_capacity(self.n_samples());
        for (&val, &length) in self.values.iter().zip(&self.lengths) {
            samples.extend(std::iter::repeat_n(val, length));
        }
        samples
    }

    /// Mean of `samples` over each period.
    ///
    /// # Errors
    /// Returns [`InterpError::SampleCountMismatch`] if `samples` does not
    /// have one entry per fine-grained sample and
    /// [`InterpError::NonFiniteSample`] if a sample is NaN or infinite.
    pub fn period_means(&self, samples: &[f64]) -> Result<Vec<f64>> {
        self.check_samples(samples)?;
        Ok(self.ranges().map(|range| mean(&samples[range])).collect())
    }

    fn check_samples(&self, samples: &[f64]) -> Result<()> {
        let expected = self.n_samples();
        if samples.len() != expected {
            return Err(InterpError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        if let Some(index) = samples.iter().position(|val| !val.is_finite()) {
            return Err(InterpError::NonFiniteSample {
                index,
                value: samples[index],
            });
        }
        Ok(())
    }
}

pub(crate) fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}
