use thiserror::Error;

/// Problems found while loading or navigating a tour.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TourError {
    #[error("unknown scene `{0}`")]
    UnknownScene(String),

    #[error("scene `{scene}`: hotspot `{hotspot}` targets missing scene `{target}`")]
    DanglingTarget {
        scene: String,
        hotspot: String,
        target: String,
    },

    #[error("scene `{scene}`: hotspot id `{hotspot}` is used more than once")]
    DuplicateHotspot { scene: String, hotspot: String },

    #[error("scene `{scene}`: hotspot `{hotspot}` is malformed: {reason}")]
    MalformedHotspot {
        scene: String,
        hotspot: String,
        reason: &'static str,
    },

    #[error("start scene `{0}` is not defined")]
    MissingStartScene(String),

    #[error("tour defines no scenes")]
    EmptyTour,

    #[error("tour file could not be parsed: {0}")]
    Parse(String),

    #[error("tour configuration has {} problem(s)", .0.len())]
    Invalid(Vec<TourError>),
}

impl From<serde_json::Error> for TourError {
    fn from(e: serde_json::Error) -> Self {
        TourError::Parse(e.to_string())
    }
}

impl TourError {
    /// Flatten an `Invalid` wrapper into its individual problems.
    pub fn problems(&self) -> Vec<&TourError> {
        match self {
            TourError::Invalid(all) => all.iter().collect(),
            other => vec![other],
        }
    }
}
