use std::path::Path;

use super::CurvatureError;

/// Value emitted for each analyzed edge pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvatureOutput {
    /// Mean of `|y''| / (1 + y'²)^1.5` over the neighborhood (non-negative).
    #[default]
    Magnitude,
    /// Signed second derivative `y''` of the local quadratic.
    SecondDerivative,
    /// `+1.0` where `y'' > 0`, `-1.0` otherwise.
    Convexity,
}

/// What to do with a point whose local fit is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstabilityPolicy {
    /// Drop the point from both edge pixels and values.
    #[default]
    Skip,
    /// Keep the edge pixel and emit `NaN`.
    Nan,
}

/// Numerical acceptance options for the local quadratic fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Largest accepted condition number of the column-normalized design matrix.
    pub max_condition_number: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_condition_number: 1e10,
        }
    }
}

/// Configuration for [`compute_curvature_profile`](super::compute_curvature_profile).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CurvatureConfig {
    /// Contours with this many points or fewer are not analyzed.
    pub min_contour_length: usize,
    /// Window size is `contour_len / window_size_ratio`; larger ratios give
    /// more local estimates.
    pub window_size_ratio: usize,
    /// Iso-level at which contours are traced.
    pub level: f64,
    /// Kind of value emitted per edge pixel.
    pub output: CurvatureOutput,
    /// Handling of ill-conditioned or under-determined local fits.
    pub on_unstable: InstabilityPolicy,
    /// See [`FitOptions::max_condition_number`].
    pub max_condition_number: f64,
}

impl Default for CurvatureConfig {
    fn default() -> Self {
        Self {
            min_contour_length: 20,
            window_size_ratio: 5,
            level: 0.5,
            output: CurvatureOutput::Magnitude,
            on_unstable: InstabilityPolicy::Skip,
            max_condition_number: FitOptions::default().max_condition_number,
        }
    }
}

impl CurvatureConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges of all fields.
    pub fn validate(&self) -> Result<(), CurvatureError> {
        if self.min_contour_length == 0 {
            return Err(CurvatureError::invalid_config(
                "min_contour_length",
                "must be positive",
            ));
        }
        if self.window_size_ratio == 0 {
            return Err(CurvatureError::invalid_config(
                "window_size_ratio",
                "must be positive",
            ));
        }
        if !self.level.is_finite() {
            return Err(CurvatureError::invalid_config("level", "must be finite"));
        }
        if !self.max_condition_number.is_finite() || self.max_condition_number < 1.0 {
            return Err(CurvatureError::invalid_config(
                "max_condition_number",
                "must be finite and >= 1",
            ));
        }
        Ok(())
    }

    /// Window size used for a contour of `contour_len` points.
    pub fn window_size(&self, contour_len: usize) -> usize {
        contour_len / self.window_size_ratio.max(1)
    }

    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            max_condition_number: self.max_condition_number,
        }
    }
}
