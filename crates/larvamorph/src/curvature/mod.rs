//! Contour curvature profiling.
//!
//! Implements:
//! - per-point curvature from a local quadratic in a tangent-aligned frame;
//! - profile assembly over all sufficiently long contours of a mask;
//! - configuration of output kind and handling of unstable fits.

mod config;
mod estimator;
mod polyfit;
mod profile;

pub use config::{CurvatureConfig, CurvatureOutput, FitOptions, InstabilityPolicy};
pub use estimator::{compute_curvature, neighborhood_range, PointCurvature};
pub use polyfit::{FitError, QuadraticFit};
pub use profile::{
    compute_curvature_profile, curvature_profile_from_contours, curvature_profile_from_rows,
    ContourSpan, CurvatureProfile, ProfileStats,
};

use crate::mask::MaskError;

/// Errors returned by profile computation.
#[derive(Debug, Clone, PartialEq)]
pub enum CurvatureError {
    /// The mask is empty, not 2D, or holds non-finite values.
    InvalidInput(MaskError),
    /// A configuration field is out of range.
    InvalidConfig {
        /// Offending field name.
        field: &'static str,
        /// Human-readable constraint.
        reason: &'static str,
    },
}

impl CurvatureError {
    pub(crate) fn invalid_config(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }
}

impl std::fmt::Display for CurvatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {}", e),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config: {} {}", field, reason)
            }
        }
    }
}

impl std::error::Error for CurvatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
            Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<MaskError> for CurvatureError {
    fn from(e: MaskError) -> Self {
        Self::InvalidInput(e)
    }
}
