//! Matroska (MKV/WebM) container parsing

use std::io::{Read, Seek};

use matroska::Matroska;

use super::ContainerContents;
use crate::probe::types::{RawTrack, TrackKind};
use crate::{Error, Result};

/// Parse a Matroska stream into MediaInfo-style tracks.
pub(crate) fn probe<R: Read + Seek>(reader: R) -> Result<ContainerContents> {
    let mkv = Matroska::open(reader)
        .map_err(|e| Error::ContainerParse(format!("MKV parse error: {}", e)))?;

    let duration_ms = mkv.info.duration.map(|d| d.as_millis() as u64);
    let mut streams = Vec::with_capacity(mkv.tracks.len());

    for track in &mkv.tracks {
        let (format, profile) = codec_id_to_format(&track.codec_id);

        let mut raw = match &track.settings {
            matroska::Settings::Video(video) => {
                let mut raw = RawTrack::new(TrackKind::Video)
                    .with("Width", video.pixel_width as u64)
                    .with("Height", video.pixel_height as u64);
                if let Some(frame) = track.default_duration.filter(|d| !d.is_zero()) {
                    let fps = (1.0 / frame.as_secs_f64() * 1000.0).round() / 1000.0;
                    raw.insert("FrameRate", fps);
                }
                raw
            }
            matroska::Settings::Audio(audio) => {
                let mut raw = RawTrack::new(TrackKind::Audio)
                    .with("Channels", audio.channels as u64)
                    .with("SamplingRate", audio.sample_rate as f64);
                if let Some(bits) = audio.bit_depth {
                    raw.insert("BitDepth", bits as u64);
                }
                raw
            }
            matroska::Settings::None => {
                if track.tracktype == matroska::Tracktype::Subtitle {
                    RawTrack::new(TrackKind::Other("Text".to_string()))
                } else {
                    continue;
                }
            }
        };

        raw.insert("Format", format);
        raw.insert("CodecID", track.codec_id.as_str());
        if let Some(profile) = profile {
            raw.insert("Format_Profile", profile);
        }
        if let Some(language) = &track.language {
            raw.insert("Language", language.to_string());
        }
        if let Some(title) = &track.name {
            raw.insert("Title", title.as_str());
        }
        streams.push(raw);
    }

    Ok(ContainerContents {
        duration_ms,
        streams,
    })
}

/// Map a Matroska codec ID to the MediaInfo format code and, where the ID
/// implies one, its profile.
fn codec_id_to_format(codec_id: &str) -> (String, Option<&'static str>) {
    let (format, profile) = match codec_id {
        // Video codecs
        "V_MPEG4/ISO/AVC" => ("AVC", None),
        "V_MPEGH/ISO/HEVC" => ("HEVC", None),
        "V_MPEGI/ISO/VVC" => ("VVC", None),
        "V_AV1" => ("AV1", None),
        "V_VP8" => ("VP8", None),
        "V_VP9" => ("VP9", None),
        "V_MPEG1" | "V_MPEG2" => ("MPEG Video", None),
        "V_MPEG4/ISO/SP" => ("MPEG-4 Visual", Some("Simple")),
        "V_MPEG4/ISO/ASP" => ("MPEG-4 Visual", Some("Advanced Simple")),
        "V_MPEG4/ISO/AP" => ("MPEG-4 Visual", Some("Advanced")),
        "V_THEORA" => ("Theora", None),

        // Audio codecs
        "A_AAC" | "A_AAC/MPEG2/LC" | "A_AAC/MPEG4/LC" => ("AAC", Some("LC")),
        "A_AAC/MPEG4/LC/SBR" => ("AAC", Some("HE-AAC")),
        "A_AC3" => ("AC-3", None),
        "A_EAC3" => ("E-AC-3", None),
        "A_DTS" | "A_DTS/EXPRESS" | "A_DTS/LOSSLESS" => ("DTS", None),
        "A_TRUEHD" => ("MLP FBA", None),
        "A_FLAC" => ("FLAC", None),
        "A_VORBIS" => ("Vorbis", None),
        "A_OPUS" => ("Opus", None),
        "A_PCM/INT/LIT" | "A_PCM/INT/BIG" | "A_PCM/FLOAT/IEEE" => ("PCM", None),
        "A_MPEG/L3" => ("MPEG Audio", Some("Layer 3")),
        "A_MPEG/L2" => ("MPEG Audio", Some("Layer 2")),

        // Subtitle codecs
        "S_TEXT/UTF8" => ("UTF-8", None),
        "S_TEXT/SSA" | "S_TEXT/ASS" => ("ASS", None),
        "S_HDMV/PGS" => ("PGS", None),
        "S_VOBSUB" => ("VobSub", None),
        "S_TEXT/WEBVTT" => ("WebVTT", None),

        // Unknown: strip the track-type prefix
        other => {
            let stripped = other
                .strip_prefix("V_")
                .or_else(|| other.strip_prefix("A_"))
                .or_else(|| other.strip_prefix("S_"))
                .unwrap_or(other);
            return (stripped.to_string(), None);
        }
    };

    (format.to_string(), profile)
}
