//! Least-squares quadratic fit with conditioning checks.

use nalgebra::{DMatrix, DVector};

use super::config::FitOptions;

/// Reasons a local fit is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Fewer samples than coefficients.
    TooFewPoints {
        /// Required minimum number of points.
        needed: usize,
        /// Provided number of points.
        got: usize,
    },
    /// The normalized design matrix is (numerically) rank deficient.
    IllConditioned {
        /// Ratio of largest to smallest singular value (may be infinite).
        condition: f64,
    },
    /// Input or solution contains NaN or infinities.
    NonFinite,
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints { needed, got } => {
                write!(f, "too few points: need {}, got {}", needed, got)
            }
            Self::IllConditioned { condition } => {
                write!(f, "ill-conditioned fit (condition number {:.3e})", condition)
            }
            Self::NonFinite => write!(f, "non-finite values in fit"),
        }
    }
}

impl std::error::Error for FitError {}

/// `y = a x² + b x + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadraticFit {
    /// Fit to paired samples.
    ///
    /// Columns of the Vandermonde matrix `[x², x, 1]` are scaled to unit norm
    /// before the SVD so the condition number reflects the geometry of the
    /// samples rather than their magnitude.
    pub fn fit(xs: &[f64], ys: &[f64], opts: &FitOptions) -> Result<Self, FitError> {
        let n = xs.len().min(ys.len());
        if n < 3 {
            return Err(FitError::TooFewPoints { needed: 3, got: n });
        }
        if xs[..n].iter().chain(&ys[..n]).any(|v| !v.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let mut design = DMatrix::<f64>::zeros(n, 3);
        for (i, &x) in xs[..n].iter().enumerate() {
            design[(i, 0)] = x * x;
            design[(i, 1)] = x;
            design[(i, 2)] = 1.0;
        }

        let mut scale = [1.0; 3];
        for (j, s) in scale.iter_mut().enumerate() {
            let norm = design.column(j).norm();
            if norm > 0.0 {
                *s = norm;
                design.column_mut(j).unscale_mut(norm);
            }
        }

        let svd = design.svd(true, true);
        let s_max = svd.singular_values.max();
        let s_min = svd.singular_values.min();
        let condition = if s_min > 0.0 { s_max / s_min } else { f64::INFINITY };
        if !condition.is_finite() || condition > opts.max_condition_number {
            return Err(FitError::IllConditioned { condition });
        }

        let rhs = DVector::from_column_slice(&ys[..n]);
        let sol = svd
            .solve(&rhs, f64::EPSILON * s_max)
            .map_err(|_| FitError::IllConditioned { condition })?;

        let fit = Self {
            a: sol[0] / scale[0],
            b: sol[1] / scale[1],
            c: sol[2] / scale[2],
        };
        if !(fit.a.is_finite() && fit.b.is_finite() && fit.c.is_finite()) {
            return Err(FitError::NonFinite);
        }
        Ok(fit)
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    /// First derivative `2a x + b`.
    #[inline]
    pub fn slope(&self, x: f64) -> f64 {
        2.0 * self.a * x + self.b
    }

    /// Second derivative `2a` (constant).
    #[inline]
    pub fn second_derivative(&self) -> f64 {
        2.0 * self.a
    }

    /// Unsigned curvature of the graph `y(x)`: `|y''| / (1 + y'²)^1.5`.
    #[inline]
    pub fn curvature_at(&self, x: f64) -> f64 {
        let d1 = self.slope(x);
        self.second_derivative().abs() / (1.0 + d1 * d1).powf(1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;

    #[test]
    fn exact_parabola_is_recovered() {
        let xs: Vec<f64> = (-5..=5).map(|i| i as f64 * 0.7).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 0.3 * x * x - 1.2 * x + 4.0).collect();
        let fit = QuadraticFit::fit(&xs, &ys, &FitOptions::default()).unwrap();
        assert_relative_eq!(fit.a, 0.3, epsilon = 1e-10);
        assert_relative_eq!(fit.b, -1.2, epsilon = 1e-10);
        assert_relative_eq!(fit.c, 4.0, epsilon = 1e-10);
        assert_relative_eq!(fit.eval(2.0), 0.3 * 4.0 - 2.4 + 4.0, epsilon = 1e-10);
        assert_relative_eq!(fit.second_derivative(), 0.6, epsilon = 1e-10);
    }

    #[test]
    fn three_points_interpolate() {
        let fit =
            QuadraticFit::fit(&[-1.0, 0.0, 1.0], &[1.0, 0.0, 1.0], &FitOptions::default()).unwrap();
        assert_relative_eq!(fit.a, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.b, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.c, 0.0, epsilon = 1e-12);
        // Vertex of y = x² has curvature 2.
        assert_relative_eq!(fit.curvature_at(0.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn noisy_line_has_small_quadratic_term() {
        let mut rng = StdRng::seed_from_u64(7);
        let xs: Vec<f64> = (0..40).map(|i| i as f64 * 0.5 - 10.0).collect();
        let ys: Vec<f64> = xs
            .iter()
            .map(|x| 0.5 * x + 2.0 + (rng.gen::<f64>() - 0.5) * 0.02)
            .collect();
        let fit = QuadraticFit::fit(&xs, &ys, &FitOptions::default()).unwrap();
        assert!(fit.a.abs() < 1e-3, "a = {}", fit.a);
        assert_relative_eq!(fit.b, 0.5, epsilon = 1e-2);
    }

    #[test]
    fn too_few_points_rejected() {
        let err = QuadraticFit::fit(&[0.0, 1.0], &[0.0, 1.0], &FitOptions::default()).unwrap_err();
        assert_eq!(err, FitError::TooFewPoints { needed: 3, got: 2 });
    }

    #[test]
    fn repeated_abscissa_is_ill_conditioned() {
        let err = QuadraticFit::fit(
            &[1.0, 1.0, 1.0, 1.0],
            &[0.0, 1.0, 2.0, 3.0],
            &FitOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FitError::IllConditioned { .. }), "{err:?}");

        // Two distinct abscissae cannot determine a parabola either.
        let err = QuadraticFit::fit(
            &[0.0, 0.0, 2.0, 2.0],
            &[0.0, 0.1, 1.0, 1.1],
            &FitOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FitError::IllConditioned { .. }), "{err:?}");
    }

    #[test]
    fn tight_tolerance_rejects_clustered_samples() {
        let xs = [0.0, 1e-4, 2e-4, 1.0];
        let ys = [0.0, 0.0, 0.0, 1.0];
        assert!(QuadraticFit::fit(&xs, &ys, &FitOptions::default()).is_ok());
        let strict = FitOptions {
            max_condition_number: 2.0,
        };
        assert!(matches!(
            QuadraticFit::fit(&xs, &ys, &strict),
            Err(FitError::IllConditioned { .. })
        ));
    }

    #[test]
    fn non_finite_input_rejected() {
        let err = QuadraticFit::fit(
            &[0.0, 1.0, f64::NAN],
            &[0.0, 1.0, 2.0],
            &FitOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, FitError::NonFinite);
    }
}
