//! Per-point curvature from a local quadratic in a tangent-aligned frame.
//!
//! For contour point `i` with window `w`:
//! 1. take `contour[i - w/2 ..= i + w/2]`, clamped to the contour ends
//!    (no wraparound, even for closed contours);
//! 2. estimate one tangent angle from the discrete gradient at the
//!    neighborhood midpoint and use it for the whole neighborhood;
//! 3. translate so the point is the origin and rotate by minus that angle;
//! 4. fit `y = a x² + b x + c` to the rotated samples;
//! 5. average `|y''| / (1 + y'²)^1.5` over the rotated abscissae.
//!
//! Step 2 is an approximation: the rotation is not re-estimated per
//! sample. Near clamped contour ends the midpoint is not the point itself,
//! so estimates there are biased.

use super::config::FitOptions;
use super::polyfit::{FitError, QuadraticFit};

/// Local estimate at one contour point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCurvature {
    /// Mean unsigned curvature over the neighborhood.
    pub magnitude: f64,
    /// Second derivative `2a` of the local quadratic; its sign tells
    /// which side of the tangent the curve bends to.
    pub second_derivative: f64,
    /// Tangent angle (radians, `atan2(Δrow, Δcol)`) used for the rotation.
    pub tangent_angle: f64,
    /// Number of contour points in the neighborhood.
    pub n_neighbors: usize,
}

/// Index range `[start, end)` of the neighborhood of `index`.
#[inline]
pub fn neighborhood_range(index: usize, len: usize, window_size: usize) -> (usize, usize) {
    let half = window_size / 2;
    let start = index.saturating_sub(half);
    let end = (index + half + 1).min(len);
    (start, end)
}

/// Discrete derivative at `i` with unit spacing: central inside,
/// one-sided at the ends.
#[inline]
fn gradient_at(values: impl Fn(usize) -> f64, i: usize, len: usize) -> f64 {
    if i == 0 {
        values(1) - values(0)
    } else if i == len - 1 {
        values(len - 1) - values(len - 2)
    } else {
        (values(i + 1) - values(i - 1)) * 0.5
    }
}

/// Estimate curvature at `point`, the `index`-th point of `contour`.
///
/// Points are `(row, col)`; the local frame uses `col` as x and `row` as y.
/// Requires at least 3 neighborhood points.
pub fn compute_curvature(
    point: [f64; 2],
    index: usize,
    contour: &[[f64; 2]],
    window_size: usize,
    opts: &FitOptions,
) -> Result<PointCurvature, FitError> {
    let (start, end) = neighborhood_range(index, contour.len(), window_size);
    let hood = &contour[start..end];
    let m = hood.len();
    if m < 3 {
        return Err(FitError::TooFewPoints { needed: 3, got: m });
    }

    let mid = m / 2;
    let d_row = gradient_at(|k| hood[k][0], mid, m);
    let d_col = gradient_at(|k| hood[k][1], mid, m);
    let theta = d_row.atan2(d_col);

    let (sin, cos) = (-theta).sin_cos();
    let mut xs = Vec::with_capacity(m);
    let mut ys = Vec::with_capacity(m);
    for p in hood {
        let tx = p[1] - point[1];
        let ty = p[0] - point[0];
        xs.push(tx * cos - ty * sin);
        ys.push(tx * sin + ty * cos);
    }

    let fit = QuadraticFit::fit(&xs, &ys, opts)?;
    let magnitude = xs.iter().map(|&x| fit.curvature_at(x)).sum::<f64>() / m as f64;

    Ok(PointCurvature {
        magnitude,
        second_derivative: fit.second_derivative(),
        tangent_angle: theta,
        n_neighbors: m,
    })
}
