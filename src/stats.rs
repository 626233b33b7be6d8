use crate::error::Result;
use crate::series::PeriodSeries;
use serde::{Deserialize, Serialize};

/// Online mean, variance and extreme magnitude of a stream of values.
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
    max_abs: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
            max_abs: 0.0,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;

        // NaN must stick, `f64::max` would drop it.
        let abs = val.abs();
        if abs.is_nan() || abs > self.max_abs {
            self.max_abs = abs;
        }
    }

    pub fn mean(&self) -> f64 {
        if self.n_vals == 0 {
            return f64::NAN;
        }
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        if self.n_vals < 2 {
            return f64::NAN;
        }
        (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
    }

    pub fn max_abs(&self) -> f64 {
        self.max_abs
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of how far the period means of an interpolation are from the
/// period values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationReport {
    /// Number of periods compared.
    pub n_periods: usize,
    /// Largest absolute deviation.
    pub max_abs_dev: f64,
    /// Mean of the absolute deviations.
    pub mean_abs_dev: f64,
    /// Sample standard deviation of the signed deviations (NaN for one period).
    pub std_dev: f64,
}

impl DeviationReport {
    /// Compare the period means of `samples` with the values of `series`.
    ///
    /// # Errors
    /// Returns an error if `samples` has the wrong length or contains
    /// non-finite values.
    pub fn compute(series: &PeriodSeries, samples: &[f64]) -> Result<Self> {
        let means = series.period_means(samples)?;

        let mut signed = Accumulator::new();
        let mut abs = Accumulator::new();
        for (&val, &mean) in series.values().iter().zip(&means) {
            let dev = mean - val;
            signed.add(dev);
            abs.add(dev.abs());
        }

        Ok(Self {
            n_periods: means.len(),
            max_abs_dev: signed.max_abs(),
            mean_abs_dev: abs.mean(),
            std_dev: signed.std_dev(),
        })
    }
}
