use super::UNKNOWN;
use vidmeta_av::RawTrack;

/// Formatted bit rate plus the encoder's rate-control mode when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRate {
    pub text: String,
    pub mode: Option<String>,
}

/// Video stream bit rate, falling back to the container's overall rate.
///
/// The mode label follows the same fallback and is dropped entirely when
/// neither track reports one.
pub fn normalize_bit_rate(video: Option<&RawTrack>, general: Option<&RawTrack>) -> BitRate {
    let bits_per_sec = video
        .and_then(|t| t.number("BitRate"))
        .filter(|n| *n > 0.0)
        .or_else(|| {
            general
                .and_then(|t| t.number("OverallBitRate"))
                .filter(|n| *n > 0.0)
        });

    let text = match bits_per_sec {
        Some(bps) => format!("{:.2} Mbps", bps / 1_000_000.0),
        None => UNKNOWN.to_string(),
    };

    let mode = video
        .and_then(|t| mode_label(t, "BitRate_Mode"))
        .or_else(|| general.and_then(|t| mode_label(t, "OverallBitRate_Mode")));

    BitRate { text, mode }
}

fn mode_label(track: &RawTrack, key: &str) -> Option<String> {
    track
        .text(key)
        .filter(|mode| !mode.eq_ignore_ascii_case(UNKNOWN))
}
