use std::collections::BTreeMap;

use crate::curvature::CurvatureProfile;

use super::category::Category;
use super::measure::{BodyMeasure, CurveMeasure, SpineCurve};
use super::rules::{Landmark, Measurement, Phenotype, CURVE_GATE};

/// Detections per category for one specimen.
///
/// Categories that were never inserted read as empty.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Detections<R> {
    by_category: BTreeMap<Category, Vec<R>>,
}

impl<R> Default for Detections<R> {
    fn default() -> Self {
        Self {
            by_category: BTreeMap::new(),
        }
    }
}

impl<R> Detections<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, category: Category, regions: Vec<R>) -> Self {
        self.insert(category, regions);
        self
    }

    /// Append `regions` to `category`.
    pub fn insert(&mut self, category: Category, regions: Vec<R>) {
        self.by_category.entry(category).or_default().extend(regions);
    }

    /// Build from detector label strings; unknown labels are ignored.
    pub fn from_labeled<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<R>)>,
        S: AsRef<str>,
    {
        let mut out = Self::new();
        for (label, regions) in entries {
            match Category::from_label(label.as_ref()) {
                Some(category) => out.insert(category, regions),
                None => tracing::debug!("ignoring unknown detection label '{}'", label.as_ref()),
            }
        }
        out
    }

    /// All detections of `category` (empty when absent).
    pub fn get(&self, category: Category) -> &[R] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first(&self, category: Category) -> Option<&R> {
        self.get(category).first()
    }

    pub fn is_present(&self, category: Category) -> bool {
        !self.get(category).is_empty()
    }
}

impl<R> FromIterator<(Category, Vec<R>)> for Detections<R> {
    fn from_iter<I: IntoIterator<Item = (Category, Vec<R>)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (category, regions) in iter {
            out.insert(category, regions);
        }
        out
    }
}

impl<'de, R: serde::Deserialize<'de>> serde::Deserialize<'de> for Detections<R> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Vec<R>> = serde::Deserialize::deserialize(deserializer)?;
        Ok(Self::from_labeled(raw))
    }
}

/// Per-specimen classification record.
///
/// All queries are read-only except [`Zebrafish::curve`], which remembers
/// the curvature profile of the latest spine-curve measurement.
#[derive(Debug, Clone)]
pub struct Zebrafish<R> {
    detections: Detections<R>,
    curvature_plot: Option<CurvatureProfile>,
}

impl<R> Zebrafish<R> {
    pub fn new(detections: Detections<R>) -> Self {
        Self {
            detections,
            curvature_plot: None,
        }
    }

    pub fn detections(&self) -> &Detections<R> {
        &self.detections
    }

    /// Evaluate one phenotype predicate.
    pub fn has(&self, phenotype: Phenotype) -> bool {
        phenotype.rule().holds(&self.detections)
    }

    /// Every phenotype with its value, in declaration order.
    pub fn phenotypes(&self) -> Vec<(Phenotype, bool)> {
        Phenotype::ALL.iter().map(|&p| (p, self.has(p))).collect()
    }

    /// First detection of the landmark's normal category, else of its
    /// abnormal counterpart; `None` when the gate fails or neither exists.
    pub fn landmark(&self, landmark: Landmark) -> Option<&R> {
        let rule = landmark.rule();
        if !self.has(rule.gate) {
            return None;
        }
        self.detections
            .first(rule.primary)
            .or_else(|| rule.fallback.and_then(|c| self.detections.first(c)))
    }

    /// Delegate a gated length measurement to `measurer`.
    pub fn measure<M>(&self, measurement: Measurement, measurer: &M) -> Option<f64>
    where
        M: BodyMeasure<R> + ?Sized,
    {
        if !measurement.gates().iter().all(|&p| self.has(p)) {
            return None;
        }
        match measurement {
            Measurement::BodyLength => measurer.body_length(&self.detections),
            Measurement::TailLength => measurer.tail_length(&self.detections),
            Measurement::SpineLength => measurer.spine_length(&self.detections),
        }
    }

    /// Body length; available only for hatched, live larvae with an eye.
    pub fn length<M>(&self, measurer: &M) -> Option<f64>
    where
        M: BodyMeasure<R> + ?Sized,
    {
        self.measure(Measurement::BodyLength, measurer)
    }

    pub fn tail_length<M>(&self, measurer: &M) -> Option<f64>
    where
        M: BodyMeasure<R> + ?Sized,
    {
        self.measure(Measurement::TailLength, measurer)
    }

    pub fn spine_length<M>(&self, measurer: &M) -> Option<f64>
    where
        M: BodyMeasure<R> + ?Sized,
    {
        self.measure(Measurement::SpineLength, measurer)
    }

    /// Spine bend angle and curvature, when a spine was detected.
    ///
    /// Replaces the cached curvature plot with whatever the measurement
    /// produced, including nothing.
    pub fn curve<C>(&mut self, measurer: &C) -> Option<SpineCurve>
    where
        C: CurveMeasure<R> + ?Sized,
    {
        if !self.has(CURVE_GATE) {
            return None;
        }
        let report = measurer.body_curve(&self.detections);
        match report {
            Some(report) => {
                self.curvature_plot = report.profile;
                Some(report.curve)
            }
            None => {
                self.curvature_plot = None;
                None
            }
        }
    }

    /// Profile behind the most recent [`Self::curve`] result.
    pub fn curvature_plot(&self) -> Option<&CurvatureProfile> {
        self.curvature_plot.as_ref()
    }
}
