//! larvamorph: morphology analysis for zebrafish larva segmentation masks.
//!
//! The crate has two halves:
//!
//! 1. **Curvature** – marching-squares contour tracing of a mask, then a
//!    per-edge-pixel curvature estimate from a local quadratic fit in a
//!    tangent-aligned frame.
//! 2. **Specimen** – a per-larva record over detector output that derives
//!    phenotypes (dead, unhatched, edemas, ...), resolves landmark regions
//!    and gates length and spine-curve measurements.
//!
//! # Public API
//! - [`compute_curvature_profile`] with [`CurvatureConfig`] as the main
//!   entry point of the curvature engine
//! - [`Mask`] / [`find_contours`] for callers that trace contours themselves
//! - [`Zebrafish`] and [`Detections`] for classification, with the
//!   [`BodyMeasure`] / [`CurveMeasure`] collaborator traits
//!
//! All coordinates are `(row, col)` in pixel units.

mod contour;
mod curvature;
mod mask;
mod specimen;

pub use contour::{find_contours, Contour};
pub use curvature::{
    compute_curvature, compute_curvature_profile, curvature_profile_from_contours,
    curvature_profile_from_rows, neighborhood_range, ContourSpan, CurvatureConfig,
    CurvatureError, CurvatureOutput, CurvatureProfile, FitError, FitOptions, InstabilityPolicy,
    PointCurvature, ProfileStats, QuadraticFit,
};
pub use mask::{Mask, MaskError};
pub use specimen::{
    bend_angle_deg, BodyMeasure, Category, CurveMeasure, CurveReport, Detections, Landmark,
    Measurement, Phenotype, RegionMask, SpineCurve, SpineMaskCurve, Zebrafish,
};

#[cfg(test)]
mod test_utils;
