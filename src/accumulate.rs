//! Running totals of period lengths.

use crate::error::{InterpError, Result};

/// Compute the cumulative period boundaries of `lengths`.
///
/// The `k`-th output is the index one past the last sample of period `k`,
/// so the final boundary equals the total number of samples.
///
/// # Errors
/// Returns [`InterpError::EmptySeries`] if `lengths` is empty and
/// [`InterpError::SampleCountOverflow`] if the total does not fit a `usize`.
pub fn accumulate(lengths: &[usize]) -> Result<Vec<usize>> {
    if lengths.is_empty() {
        return Err(InterpError::EmptySeries);
    }

    let mut boundaries = Vec::with_capacity(lengths.len());
    let mut total: usize = 0;
    for (period, &length) in lengths.iter().enumerate() {
        total = total
            .checked_add(length)
            .ok_or(InterpError::SampleCountOverflow { period })?;
        boundaries.push(total);
    }
    Ok(boundaries)
}

/// Boundaries at which a fine-grained series is split into periods.
///
/// Same as [`accumulate`] without the last boundary, which is the series
/// length and needs no split point.
pub fn split_points(lengths: &[usize]) -> Result<Vec<usize>> {
    let mut boundaries = accumulate(lengths)?;
    boundaries.pop();
    Ok(boundaries)
}
