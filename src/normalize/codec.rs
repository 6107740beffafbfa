//! Codec identity resolution.
//!
//! MediaInfo reports a short format code (`AVC`) and sometimes a longer
//! description (`Format_Info`). Well-known codes are mapped to their
//! standards-body names: the ISO/IEC long name and the ITU-T (or common)
//! short name. A code missing from the table is not an error; the
//! description is used instead.

use super::UNKNOWN;
use vidmeta_av::RawTrack;

/// Canonical names for a format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CodecNames {
    /// ISO/IEC-style long name.
    long: &'static str,
    /// ITU-T-style short name.
    short: &'static str,
}

const fn names(long: &'static str, short: &'static str) -> CodecNames {
    CodecNames { long, short }
}

/// Format code → canonical names. Order does not matter.
static CODEC_TABLE: &[(&str, CodecNames)] = &[
    ("AVC", names("Advanced Video Coding", "H.264")),
    ("HEVC", names("High Efficiency Video Coding", "H.265")),
    ("VVC", names("Versatile Video Coding", "H.266")),
    ("MPEG-4 Visual", names("MPEG-4 Part 2", "Visual")),
    ("AV1", names("AOMedia Video 1", "AV1")),
    ("AAC", names("Advanced Audio Coding", "MPEG-4 AAC")),
    ("AC-3", names("Dolby Digital", "AC-3")),
    ("E-AC-3", names("Dolby Digital Plus", "E-AC-3")),
    ("MLP FBA", names("Dolby TrueHD", "MLP FBA")),
];

/// Profiles too common to be worth showing.
const HIDDEN_PROFILES: [&str; 2] = ["Base", "Main"];

/// Look up the canonical names for a format code.
fn lookup(code: &str) -> Option<CodecNames> {
    CODEC_TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, names)| *names)
}

/// `"Long"` when both names agree, `"Long（Short）"` otherwise.
fn compose(long: &str, short: &str) -> String {
    if long == short {
        long.to_string()
    } else {
        format!("{}（{}）", long, short)
    }
}

/// Human-readable codec identity for a track.
///
/// Falls back to the raw `CodecID` when no name can be composed, then to
/// `"unknown"`.
pub fn resolve_codec(track: Option<&RawTrack>) -> String {
    let Some(track) = track else {
        return UNKNOWN.to_string();
    };

    let description = track
        .text("Format_Info")
        .or_else(|| track.text("Format_Information"));

    let composed = match track.text("Format").as_deref().and_then(lookup) {
        Some(names) => Some(compose(names.long, names.short)),
        None => description.map(|d| compose(&d, &d)),
    };

    match composed {
        Some(mut name) => {
            if let Some(profile) = track.text("Format_Profile") {
                if !HIDDEN_PROFILES.contains(&profile.as_str()) && !name.contains(&profile) {
                    name = format!("{} [{}]", name, profile);
                }
            }
            name
        }
        None => track
            .text("CodecID")
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidmeta_av::TrackKind;

    fn video() -> RawTrack {
        RawTrack::new(TrackKind::Video)
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(lookup("HEVC").map(|n| n.short), Some("H.265"));
        assert_eq!(lookup("hevc"), None);
        assert_eq!(lookup("VP9"), None);
    }

    #[test]
    fn test_profile_appended() {
        let track = video().with("Format", "AVC").with("Format_Profile", "High");
        assert_eq!(
            resolve_codec(Some(&track)),
            "Advanced Video Coding（H.264） [High]"
        );
    }

    #[test]
    fn test_common_profiles_hidden() {
        let track = video().with("Format", "AVC").with("Format_Profile", "Main");
        assert_eq!(resolve_codec(Some(&track)), "Advanced Video Coding（H.264）");

        let track = video().with("Format", "HEVC").with("Format_Profile", "Base");
        assert_eq!(
            resolve_codec(Some(&track)),
            "High Efficiency Video Coding（H.265）"
        );
    }

    #[test]
    fn test_profile_already_in_name() {
        let track = video().with("Format", "AV1").with("Format_Profile", "AV1");
        assert_eq!(resolve_codec(Some(&track)), "AOMedia Video 1（AV1）");
    }

    #[test]
    fn test_unknown_code_uses_description() {
        let track = video()
            .with("Format", "VP9")
            .with("Format_Info", "Google VP9")
            .with("Format_Profile", "0");
        assert_eq!(resolve_codec(Some(&track)), "Google VP9 [0]");

        let track = video()
            .with("Format", "Theora")
            .with("Format_Information", "Xiph Theora");
        assert_eq!(resolve_codec(Some(&track)), "Xiph Theora");
    }

    #[test]
    fn test_table_wins_over_description() {
        let track = RawTrack::new(TrackKind::Audio)
            .with("Format", "AAC")
            .with("Format_Info", "Advanced Audio Codec Low Complexity")
            .with("Format_Profile", "LC");
        assert_eq!(
            resolve_codec(Some(&track)),
            "Advanced Audio Coding（MPEG-4 AAC） [LC]"
        );
    }

    #[test]
    fn test_codec_id_fallback() {
        let track = video().with("Format", "XYZ").with("CodecID", "xyz1");
        assert_eq!(resolve_codec(Some(&track)), "xyz1");

        let track = video().with("Format", "XYZ");
        assert_eq!(resolve_codec(Some(&track)), "unknown");

        assert_eq!(resolve_codec(None), "unknown");
    }
}
