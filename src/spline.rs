//! Cubic interpolating spline with not-a-knot end conditions.

use crate::error::{InterpError, Result};

/// Piecewise cubic through a set of knots, stored as knot values and second
/// derivatives ("moments").
///
/// With four or more knots the third derivative is continuous at the second
/// and second-to-last knots. Fewer knots give the unique interpolating
/// polynomial: a constant, a line or a parabola. Evaluation outside the knot
/// range extends the first or last piece.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through `(xs[i], ys[i])`.
    ///
    /// # Errors
    /// Returns [`InterpError::InvalidKnots`] if the slices differ in length,
    /// are empty, contain non-finite numbers or if `xs` is not strictly
    /// increasing.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(InterpError::InvalidKnots(format!(
                "{} abscissae for {} ordinates",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(InterpError::InvalidKnots("no knots".to_string()));
        }
        if xs.iter().chain(ys).any(|val| !val.is_finite()) {
            return Err(InterpError::InvalidKnots("non-finite knot".to_string()));
        }
        if xs.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(InterpError::InvalidKnots(
                "abscissae must be strictly increasing".to_string(),
            ));
        }

        let moments = compute_moments(xs, ys);

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            moments,
        })
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let (xs, ys, ms) = (&self.xs, &self.ys, &self.moments);
        if xs.len() == 1 {
            return ys[0];
        }

        let i = find_interval(xs, x);
        let h = xs[i + 1] - xs[i];
        let a = xs[i + 1] - x;
        let b = x - xs[i];

        ms[i] * a * a * a / (6.0 * h)
            + ms[i + 1] * b * b * b / (6.0 * h)
            + (ys[i] / h - ms[i] * h / 6.0) * a
            + (ys[i + 1] / h - ms[i + 1] * h / 6.0) * b
    }
}

/// Index `i` of the piece `[xs[i], xs[i + 1]]` used to evaluate `x`.
fn find_interval(xs: &[f64], x: f64) -> usize {
    let last = xs.len() - 2;
    xs[1..=last].partition_point(|&knot| knot < x)
}

fn compute_moments(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    match n {
        1 | 2 => return vec![0.0; n],
        3 => {
            // A parabola has a constant second derivative.
            let d0 = (ys[1] - ys[0]) / (xs[1] - xs[0]);
            let d1 = (ys[2] - ys[1]) / (xs[2] - xs[1]);
            let m = 2.0 * (d1 - d0) / (xs[2] - xs[0]);
            return vec![m; 3];
        }
        _ => {}
    }

    let h: Vec<f64> = xs.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let mut rhs: Vec<f64> = (1..n - 1)
        .map(|i| 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]))
        .collect();

    // Interior unknowns M_1 ..= M_{n-2}.
    let m = n - 2;

    // M_0 = alpha_l * M_1 + beta_l * M_2
    let alpha_l = (h[0] + h[1]) / h[1];
    let beta_l = -h[0] / h[1];
    // M_{n-1} = alpha_r * M_{n-2} + beta_r * M_{n-3}
    let alpha_r = (h[n - 3] + h[n - 2]) / h[n - 3];
    let beta_r = -h[n - 2] / h[n - 3];

    let mut lower = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut upper = vec![0.0; m];
    for j in 0..m {
        let i = j + 1;
        lower[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        upper[j] = h[i];
    }
    diag[0] += h[0] * alpha_l;
    upper[0] += h[0] * beta_l;
    lower[m - 1] += h[n - 2] * beta_r;
    diag[m - 1] += h[n - 2] * alpha_r;

    // Thomas algorithm.
    for i in 1..m {
        let w = lower[i] / diag[i - 1];
        diag[i] -= w * upper[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }
    let mut interior = vec![0.0; m];
    interior[m - 1] = rhs[m - 1] / diag[m - 1];
    for i in (0..m - 1).rev() {
        interior[i] = (rhs[i] - upper[i] * interior[i + 1]) / diag[i];
    }

    let mut moments = vec![0.0; n];
    moments[1..n - 1].copy_from_slice(&interior);
    moments[0] = alpha_l * moments[1] + beta_l * moments[2];
    moments[n - 1] = alpha_r * moments[n - 2] + beta_r * moments[n - 3];
    moments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(x: f64) -> f64 {
        x * x * x - 2.0 * x + 1.0
    }

    #[test]
    fn passes_through_knots() {
        let xs = [0.0, 1.0, 2.5, 4.0, 5.5];
        let ys = [1.0, 3.0, 2.0, 5.0, 4.0];
        let spline = CubicSpline::fit(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(&ys) {
            assert!((spline.eval(x) - y).abs() < 1e-12, "at {x}");
        }
    }

    #[test]
    fn reproduces_cubics_exactly() {
        let xs = [0.0, 1.0, 2.0, 3.5, 4.0, 6.0];
        let ys: Vec<f64> = xs.iter().map(|&x| cubic(x)).collect();
        let spline = CubicSpline::fit(&xs, &ys).unwrap();
        for x in [0.5, 1.5, 2.7, 3.9, 5.0, -1.0, 7.0] {
            assert!(
                (spline.eval(x) - cubic(x)).abs() < 1e-9,
                "at {x}: {} vs {}",
                spline.eval(x),
                cubic(x)
            );
        }
    }

    #[test]
    fn few_knots_give_low_order_polynomials() {
        let constant = CubicSpline::fit(&[2.0], &[7.0]).unwrap();
        assert_eq!(constant.eval(-10.0), 7.0);

        let line = CubicSpline::fit(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert!((line.eval(3.0) - 7.0).abs() < 1e-12);

        let parabola = CubicSpline::fit(&[0.0, 1.0, 3.0], &[0.0, 1.0, 9.0]).unwrap();
        assert!((parabola.eval(2.0) - 4.0).abs() < 1e-12);
        assert!((parabola.eval(-2.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_unsorted_knots() {
        assert!(CubicSpline::fit(&[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]).is_err());
        assert!(CubicSpline::fit(&[0.0, 1.0], &[1.0]).is_err());
        assert!(CubicSpline::fit(&[], &[]).is_err());
    }
}
