//! Per-specimen classification record.
//!
//! A [`Zebrafish`] wraps the detector output for one larva and derives
//! phenotypes, landmark regions and gated measurements from it. Length and
//! curve measurements are delegated to [`BodyMeasure`] / [`CurveMeasure`]
//! implementations; [`SpineMaskCurve`] covers mask-carrying regions.

mod category;
mod measure;
mod record;
mod rules;

pub use category::Category;
pub use measure::{
    bend_angle_deg, BodyMeasure, CurveMeasure, CurveReport, RegionMask, SpineCurve,
    SpineMaskCurve,
};
pub use record::{Detections, Zebrafish};
pub use rules::{Landmark, Measurement, Phenotype};
