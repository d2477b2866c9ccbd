use std::collections::BTreeMap;

use nalgebra::{Matrix2, Vector2};

use crate::curvature::{compute_curvature_profile, CurvatureConfig, CurvatureProfile};
use crate::mask::Mask;

use super::category::Category;
use super::record::Detections;

/// Length measurements over a specimen's detections.
///
/// Returning `None` means the measurement could not be made.
pub trait BodyMeasure<R> {
    fn body_length(&self, detections: &Detections<R>) -> Option<f64>;
    fn tail_length(&self, detections: &Detections<R>) -> Option<f64>;
    fn spine_length(&self, detections: &Detections<R>) -> Option<f64>;
}

/// Bend angle and mean curvature of the spine.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpineCurve {
    /// Deviation from a straight body, in degrees.
    pub angle_deg: f64,
    pub curvature: f64,
}

/// Result of a spine-curve measurement plus the profile it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveReport {
    pub curve: SpineCurve,
    pub profile: Option<CurvatureProfile>,
}

pub trait CurveMeasure<R> {
    fn body_curve(&self, detections: &Detections<R>) -> Option<CurveReport>;
}

/// Region type that can expose a segmentation mask.
pub trait RegionMask {
    fn region_mask(&self) -> Option<&Mask>;
}

impl RegionMask for Mask {
    fn region_mask(&self) -> Option<&Mask> {
        Some(self)
    }
}

/// Spine curve from the mask of the first `spine` (else `bent spine`)
/// detection.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpineMaskCurve {
    pub config: CurvatureConfig,
}

impl SpineMaskCurve {
    pub fn new(config: CurvatureConfig) -> Self {
        Self { config }
    }
}

impl<R: RegionMask> CurveMeasure<R> for SpineMaskCurve {
    fn body_curve(&self, detections: &Detections<R>) -> Option<CurveReport> {
        let region = detections
            .first(Category::Spine)
            .or_else(|| detections.first(Category::BentSpine))?;
        let Some(mask) = region.region_mask() else {
            tracing::debug!("spine region carries no mask");
            return None;
        };

        let profile = match compute_curvature_profile(mask, &self.config) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("spine curvature profile failed: {}", e);
                return None;
            }
        };
        let curvature = profile.stats()?.mean;
        let angle_deg = bend_angle_deg(mask, self.config.level)?;
        tracing::debug!(
            "spine curve: angle {:.2} deg, mean curvature {:.4}",
            angle_deg,
            curvature
        );

        Some(CurveReport {
            curve: SpineCurve {
                angle_deg,
                curvature,
            },
            profile: Some(profile),
        })
    }
}

/// Three-point bend angle of the foreground of `mask`, in degrees.
///
/// The foreground is reduced to a centerline by averaging pixels in unit
/// bins along the principal axis. Endpoints are the first and last
/// centerline samples, the apex is the sample farthest from their chord.
/// `None` with fewer than three samples.
pub fn bend_angle_deg(mask: &Mask, level: f64) -> Option<f64> {
    let pts: Vec<Vector2<f64>> = mask
        .foreground(level)
        .map(|[r, c]| Vector2::new(r as f64, c as f64))
        .collect();
    if pts.len() < 3 {
        return None;
    }

    let n = pts.len() as f64;
    let mean = pts.iter().fold(Vector2::<f64>::zeros(), |acc, p| acc + p) / n;
    let cov = pts.iter().fold(Matrix2::<f64>::zeros(), |acc, p| {
        let d = p - mean;
        acc + d * d.transpose()
    }) / n;
    let eig = cov.symmetric_eigen();
    let axis: Vector2<f64> = eig.eigenvectors.column(eig.eigenvalues.imax()).into_owned();

    let mut bins: BTreeMap<i64, (Vector2<f64>, usize)> = BTreeMap::new();
    for p in &pts {
        let k = (p - mean).dot(&axis).round() as i64;
        let slot = bins.entry(k).or_insert((Vector2::zeros(), 0));
        slot.0 += p;
        slot.1 += 1;
    }
    let centerline: Vec<Vector2<f64>> = bins
        .into_values()
        .map(|(sum, count)| sum / count as f64)
        .collect();
    if centerline.len() < 3 {
        return None;
    }

    let a = centerline[0];
    let b = centerline[centerline.len() - 1];
    let chord = b - a;
    let chord_len = chord.norm();

    let mut apex = (0.0f64, 0usize);
    for (i, p) in centerline.iter().enumerate() {
        let d = p - a;
        let dist = (d.x * chord.y - d.y * chord.x).abs() / chord_len;
        if dist > apex.0 {
            apex = (dist, i);
        }
    }
    if apex.0 < 1e-9 {
        return Some(0.0);
    }

    let v1 = a - centerline[apex.1];
    let v2 = b - centerline[apex.1];
    let cos = (v1.dot(&v2) / (v1.norm() * v2.norm())).clamp(-1.0, 1.0);
    Some(180.0 - cos.acos().to_degrees())
}
