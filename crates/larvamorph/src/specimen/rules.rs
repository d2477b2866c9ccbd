//! Declarative tables behind the record's predicates and accessors.

use super::category::Category;
use super::record::Detections;

/// Derived boolean trait of a specimen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phenotype {
    Larva,
    Dead,
    Embryo,
    BentSpine,
    JawMalformation,
    PericardialEdema,
    YolkEdema,
    HeadHemorrhage,
    SwimBladderAbsence,
    HasEye,
    HasTail,
    HasSpine,
}

/// Presence rule over detection categories.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Rule {
    /// At least one listed category has a detection.
    AnyOf(&'static [Category]),
    /// None of the listed categories has a detection.
    NoneOf(&'static [Category]),
}

impl Rule {
    pub(crate) fn holds<R>(self, detections: &Detections<R>) -> bool {
        match self {
            Self::AnyOf(cats) => cats.iter().any(|&c| detections.is_present(c)),
            Self::NoneOf(cats) => !cats.iter().any(|&c| detections.is_present(c)),
        }
    }
}

/// Indexed by `Phenotype as usize`.
const PHENOTYPE_RULES: [(Phenotype, Rule); 12] = [
    (
        Phenotype::Larva,
        Rule::NoneOf(&[Category::Dead, Category::UnhatchedEmbryo]),
    ),
    (Phenotype::Dead, Rule::AnyOf(&[Category::Dead])),
    (Phenotype::Embryo, Rule::AnyOf(&[Category::UnhatchedEmbryo])),
    (Phenotype::BentSpine, Rule::AnyOf(&[Category::BentSpine])),
    (
        Phenotype::JawMalformation,
        Rule::AnyOf(&[Category::JawMalformation]),
    ),
    (
        Phenotype::PericardialEdema,
        Rule::AnyOf(&[Category::PericardialEdema]),
    ),
    (Phenotype::YolkEdema, Rule::AnyOf(&[Category::YolkEdema])),
    (
        Phenotype::HeadHemorrhage,
        Rule::AnyOf(&[Category::HeadHemorrhage]),
    ),
    (
        Phenotype::SwimBladderAbsence,
        Rule::AnyOf(&[Category::SwimBladderAbsence]),
    ),
    (Phenotype::HasEye, Rule::AnyOf(&[Category::Eye])),
    (Phenotype::HasTail, Rule::AnyOf(&[Category::Tail])),
    (
        Phenotype::HasSpine,
        Rule::AnyOf(&[Category::Spine, Category::BentSpine]),
    ),
];

impl Phenotype {
    pub const ALL: [Phenotype; 12] = [
        Self::Larva,
        Self::Dead,
        Self::Embryo,
        Self::BentSpine,
        Self::JawMalformation,
        Self::PericardialEdema,
        Self::YolkEdema,
        Self::HeadHemorrhage,
        Self::SwimBladderAbsence,
        Self::HasEye,
        Self::HasTail,
        Self::HasSpine,
    ];

    pub(crate) fn rule(self) -> Rule {
        PHENOTYPE_RULES[self as usize].1
    }
}

/// Anatomical landmark resolved to one representative detection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Head,
    Eye,
    Heart,
    Yolk,
    SwimBladder,
    Jaw,
}

/// Gate phenotype, preferred normal-anatomy category, abnormal fallback.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LandmarkRule {
    pub gate: Phenotype,
    pub primary: Category,
    pub fallback: Option<Category>,
}

/// Indexed by `Landmark as usize`.
const LANDMARK_RULES: [(Landmark, LandmarkRule); 6] = [
    (
        Landmark::Head,
        LandmarkRule {
            gate: Phenotype::Larva,
            primary: Category::Head,
            fallback: Some(Category::HeadHemorrhage),
        },
    ),
    (
        Landmark::Eye,
        LandmarkRule {
            gate: Phenotype::HasEye,
            primary: Category::Eye,
            fallback: None,
        },
    ),
    (
        Landmark::Heart,
        LandmarkRule {
            gate: Phenotype::Larva,
            primary: Category::Heart,
            fallback: Some(Category::PericardialEdema),
        },
    ),
    (
        Landmark::Yolk,
        LandmarkRule {
            gate: Phenotype::Larva,
            primary: Category::Yolk,
            fallback: Some(Category::YolkEdema),
        },
    ),
    (
        Landmark::SwimBladder,
        LandmarkRule {
            gate: Phenotype::Larva,
            primary: Category::SwimBladder,
            fallback: Some(Category::SwimBladderAbsence),
        },
    ),
    (
        Landmark::Jaw,
        LandmarkRule {
            gate: Phenotype::Larva,
            primary: Category::LowerJaw,
            fallback: Some(Category::JawMalformation),
        },
    ),
];

impl Landmark {
    pub const ALL: [Landmark; 6] = [
        Self::Head,
        Self::Eye,
        Self::Heart,
        Self::Yolk,
        Self::SwimBladder,
        Self::Jaw,
    ];

    pub(crate) fn rule(self) -> LandmarkRule {
        LANDMARK_RULES[self as usize].1
    }
}

/// Scalar body measurement delegated to a [`BodyMeasure`](super::BodyMeasure).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    BodyLength,
    TailLength,
    SpineLength,
}

/// Indexed by `Measurement as usize`; every listed phenotype must hold.
const MEASUREMENT_GATES: [(Measurement, &[Phenotype]); 3] = [
    (
        Measurement::BodyLength,
        &[Phenotype::Larva, Phenotype::HasEye],
    ),
    (Measurement::TailLength, &[Phenotype::HasTail]),
    (Measurement::SpineLength, &[Phenotype::HasSpine]),
];

impl Measurement {
    pub const ALL: [Measurement; 3] = [Self::BodyLength, Self::TailLength, Self::SpineLength];

    pub(crate) fn gates(self) -> &'static [Phenotype] {
        MEASUREMENT_GATES[self as usize].1
    }
}

/// Gate for the spine curve measurement.
pub(crate) const CURVE_GATE: Phenotype = Phenotype::HasSpine;
