use crate::contour::{find_contours, Contour};
use crate::mask::Mask;

use super::config::{CurvatureConfig, CurvatureOutput, InstabilityPolicy};
use super::estimator::{compute_curvature, PointCurvature};
use super::CurvatureError;

/// Where one analyzed contour landed in the profile.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContourSpan {
    /// Index of the contour in extraction order.
    pub contour_index: usize,
    /// Number of points on the contour.
    pub n_points: usize,
    /// Window size used for its neighborhoods.
    pub window_size: usize,
    /// First profile index belonging to this contour.
    pub start: usize,
    /// One past the last profile index belonging to this contour.
    pub end: usize,
    /// Points whose local fit was rejected (skipped or emitted as NaN).
    pub n_unstable: usize,
}

/// Summary statistics over the finite values of a profile.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProfileStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// 95th percentile of absolute values.
    pub p95_abs: f64,
    pub max: f64,
}

/// Edge pixels paired 1:1 with curvature values.
///
/// Ordered by contour extraction order, then by position along the contour.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct CurvatureProfile {
    edge_pixels: Vec<[f64; 2]>,
    values: Vec<f64>,
    spans: Vec<ContourSpan>,
    n_contours: usize,
}

impl CurvatureProfile {
    /// `(row, col)` of every analyzed edge pixel.
    pub fn edge_pixels(&self) -> &[[f64; 2]] {
        &self.edge_pixels
    }

    /// Value for every edge pixel, same length and order as [`Self::edge_pixels`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// One entry per analyzed contour.
    pub fn spans(&self) -> &[ContourSpan] {
        &self.spans
    }

    /// Number of contours extracted, including those too short to analyze.
    pub fn n_contours(&self) -> usize {
        self.n_contours
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ([f64; 2], f64)> + '_ {
        self.edge_pixels
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Split into `(edge_pixels, values)`.
    pub fn into_parts(self) -> (Vec<[f64; 2]>, Vec<f64>) {
        (self.edge_pixels, self.values)
    }

    /// Statistics over finite values; `None` when there are none.
    pub fn stats(&self) -> Option<ProfileStats> {
        let mut finite: Vec<f64> = self.values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        finite.sort_by(f64::total_cmp);
        let median = percentile_sorted(&finite, 0.5);
        let max = finite[count - 1];

        let mut abs: Vec<f64> = finite.iter().map(|v| v.abs()).collect();
        abs.sort_by(f64::total_cmp);
        let p95_abs = percentile_sorted(&abs, 0.95);

        Some(ProfileStats {
            count,
            mean,
            median,
            p95_abs,
            max,
        })
    }
}

/// Linear-interpolated quantile of an ascending slice.
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let t = pos - lo as f64;
    sorted[lo] * (1.0 - t) + sorted[hi] * t
}

fn output_value(pc: &PointCurvature, output: CurvatureOutput) -> f64 {
    match output {
        CurvatureOutput::Magnitude => pc.magnitude,
        CurvatureOutput::SecondDerivative => pc.second_derivative,
        CurvatureOutput::Convexity => {
            if pc.second_derivative > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
    }
}

/// Trace the contours of `mask` and compute a curvature value for every
/// point of each contour longer than `config.min_contour_length`.
///
/// A mask without qualifying contours yields an empty profile.
pub fn compute_curvature_profile(
    mask: &Mask,
    config: &CurvatureConfig,
) -> Result<CurvatureProfile, CurvatureError> {
    config.validate()?;
    let contours = find_contours(mask, config.level);
    curvature_profile_from_contours(&contours, config)
}

/// Validate nested rows as a mask, then run [`compute_curvature_profile`].
pub fn curvature_profile_from_rows<R: AsRef<[f64]>>(
    rows: &[R],
    config: &CurvatureConfig,
) -> Result<CurvatureProfile, CurvatureError> {
    let mask = Mask::from_rows(rows)?;
    compute_curvature_profile(&mask, config)
}

/// Profile over already-traced contours (`(row, col)` points).
pub fn curvature_profile_from_contours(
    contours: &[Contour],
    config: &CurvatureConfig,
) -> Result<CurvatureProfile, CurvatureError> {
    config.validate()?;
    let opts = config.fit_options();
    let mut profile = CurvatureProfile {
        n_contours: contours.len(),
        ..Default::default()
    };

    for (contour_index, contour) in contours.iter().enumerate() {
        let points = contour.points();
        let n_points = points.len();
        if n_points <= config.min_contour_length {
            tracing::debug!(
                "contour {}: {} points <= {}, not analyzed",
                contour_index,
                n_points,
                config.min_contour_length
            );
            continue;
        }

        let window_size = config.window_size(n_points);
        let start = profile.values.len();
        let mut n_unstable = 0usize;

        for (i, &point) in points.iter().enumerate() {
            match compute_curvature(point, i, points, window_size, &opts) {
                Ok(pc) => {
                    profile.edge_pixels.push(point);
                    profile.values.push(output_value(&pc, config.output));
                }
                Err(e) => {
                    n_unstable += 1;
                    tracing::trace!("contour {} point {}: {}", contour_index, i, e);
                    if config.on_unstable == InstabilityPolicy::Nan {
                        profile.edge_pixels.push(point);
                        profile.values.push(f64::NAN);
                    }
                }
            }
        }

        if n_unstable > 0 {
            tracing::warn!(
                "contour {}: {}/{} local fits rejected (window {}, policy {:?})",
                contour_index,
                n_unstable,
                n_points,
                window_size,
                config.on_unstable
            );
        }
        tracing::debug!(
            "contour {}: {} points analyzed with window {}",
            contour_index,
            n_points,
            window_size
        );

        profile.spans.push(ContourSpan {
            contour_index,
            n_points,
            window_size,
            start,
            end: profile.values.len(),
            n_unstable,
        });
    }

    tracing::info!(
        "curvature profile: {} edge pixels from {}/{} contours",
        profile.values.len(),
        profile.spans.len(),
        profile.n_contours
    );
    Ok(profile)
}
