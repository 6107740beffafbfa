use super::UNKNOWN;
use serde::{Deserialize, Serialize};
use vidmeta_av::RawTrack;

/// Resolution class derived from the long edge of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionClass {
    #[serde(rename = "4K")]
    Uhd4k,
    #[serde(rename = "2K")]
    Qhd2k,
    #[serde(rename = "FullHD")]
    FullHd,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "SD")]
    Sd,
    #[serde(rename = "unknown")]
    Unknown,
}

impl ResolutionClass {
    pub fn label(self) -> &'static str {
        match self {
            ResolutionClass::Uhd4k => "4K",
            ResolutionClass::Qhd2k => "2K",
            ResolutionClass::FullHd => "FullHD",
            ResolutionClass::Hd => "HD",
            ResolutionClass::Sd => "SD",
            ResolutionClass::Unknown => UNKNOWN,
        }
    }
}

impl std::fmt::Display for ResolutionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Long-edge thresholds, highest first.
const THRESHOLDS: [(u32, ResolutionClass); 4] = [
    (3840, ResolutionClass::Uhd4k),
    (2560, ResolutionClass::Qhd2k),
    (1920, ResolutionClass::FullHd),
    (1280, ResolutionClass::Hd),
];

/// Classify a frame size by `max(width, height)`.
///
/// A zero dimension means the size is unknown.
pub fn classify(width: u32, height: u32) -> ResolutionClass {
    if width == 0 || height == 0 {
        return ResolutionClass::Unknown;
    }

    let long_edge = width.max(height);
    THRESHOLDS
        .iter()
        .find(|(min, _)| long_edge >= *min)
        .map(|(_, class)| *class)
        .unwrap_or(ResolutionClass::Sd)
}

/// Display text and class for a video track's frame size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub class: ResolutionClass,
}

/// Read `Width`/`Height` from the video track.
///
/// Missing, zero or unparseable dimensions give `"unknown"` for both the
/// text and the class.
pub fn normalize_resolution(video: Option<&RawTrack>) -> Resolution {
    let dimension = |key: &str| {
        video
            .and_then(|t| t.number(key))
            .filter(|n| *n >= 1.0 && *n <= f64::from(u32::MAX))
            .map(|n| n.round() as u32)
            .unwrap_or(0)
    };
    let (width, height) = (dimension("Width"), dimension("Height"));

    match classify(width, height) {
        ResolutionClass::Unknown => Resolution {
            text: UNKNOWN.to_string(),
            class: ResolutionClass::Unknown,
        },
        class => Resolution {
            text: format!("{} x {}", width, height),
            class,
        },
    }
}
