/// Detection category produced by the upstream detector.
///
/// Serialized as the detector's label strings (`"unhatched embryo"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Category {
    #[serde(rename = "dead")]
    Dead,
    #[serde(rename = "unhatched embryo")]
    UnhatchedEmbryo,
    #[serde(rename = "bent spine")]
    BentSpine,
    #[serde(rename = "jaw malformation")]
    JawMalformation,
    #[serde(rename = "pericardial edema")]
    PericardialEdema,
    #[serde(rename = "yolk edema")]
    YolkEdema,
    #[serde(rename = "head hemorrhage")]
    HeadHemorrhage,
    #[serde(rename = "swim bladder absence")]
    SwimBladderAbsence,
    #[serde(rename = "eye")]
    Eye,
    #[serde(rename = "tail")]
    Tail,
    #[serde(rename = "spine")]
    Spine,
    #[serde(rename = "head")]
    Head,
    #[serde(rename = "heart")]
    Heart,
    #[serde(rename = "yolk")]
    Yolk,
    #[serde(rename = "swim bladder")]
    SwimBladder,
    #[serde(rename = "lower jaw")]
    LowerJaw,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Self::Dead,
        Self::UnhatchedEmbryo,
        Self::BentSpine,
        Self::JawMalformation,
        Self::PericardialEdema,
        Self::YolkEdema,
        Self::HeadHemorrhage,
        Self::SwimBladderAbsence,
        Self::Eye,
        Self::Tail,
        Self::Spine,
        Self::Head,
        Self::Heart,
        Self::Yolk,
        Self::SwimBladder,
        Self::LowerJaw,
    ];

    /// Detector label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dead => "dead",
            Self::UnhatchedEmbryo => "unhatched embryo",
            Self::BentSpine => "bent spine",
            Self::JawMalformation => "jaw malformation",
            Self::PericardialEdema => "pericardial edema",
            Self::YolkEdema => "yolk edema",
            Self::HeadHemorrhage => "head hemorrhage",
            Self::SwimBladderAbsence => "swim bladder absence",
            Self::Eye => "eye",
            Self::Tail => "tail",
            Self::Spine => "spine",
            Self::Head => "head",
            Self::Heart => "heart",
            Self::Yolk => "yolk",
            Self::SwimBladder => "swim bladder",
            Self::LowerJaw => "lower jaw",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// True for categories that record an abnormality rather than anatomy.
    pub fn is_abnormality(self) -> bool {
        matches!(
            self,
            Self::Dead
                | Self::UnhatchedEmbryo
                | Self::BentSpine
                | Self::JawMalformation
                | Self::PericardialEdema
                | Self::YolkEdema
                | Self::HeadHemorrhage
                | Self::SwimBladderAbsence
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown detection category '{}'", s))
    }
}
