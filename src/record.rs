//! The normalized metadata record and its assembly from a probe result.

use crate::config::DisplayConfig;
use crate::normalize::{
    self, format_size, normalize_bit_rate, normalize_duration, normalize_frame_rate,
    normalize_resolution, resolve_codec, ResolutionClass, UNKNOWN,
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;
use vidmeta_av::ProbeResult;

/// Errors that end an analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Probing worked but found neither a General nor a Video track.
    #[error("no General or Video track found in the file")]
    NoMediaTrack,

    /// The probing engine failed (unreadable file, unsupported container, ...).
    #[error("failed to probe file: {0}")]
    ProbeFailure(#[from] vidmeta_av::Error),
}

/// Identity of the analyzed file, gathered outside the probing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl FileMeta {
    /// Read name, size and modification time from the filesystem.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
        })
    }

    /// Format the modification time, or `"unknown"` when it is missing or
    /// the pattern cannot be rendered.
    pub fn modified_display(&self, timestamp_format: &str) -> String {
        let Some(modified) = self.modified else {
            return UNKNOWN.to_string();
        };

        let mut out = String::new();
        match write!(out, "{}", modified.format(timestamp_format)) {
            Ok(()) if !out.is_empty() => out,
            _ => UNKNOWN.to_string(),
        }
    }
}

/// Display-ready metadata for one file.
///
/// Every field holds a value or `"unknown"`; only the bit-rate mode is
/// optional, since an unknown mode is simply not shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    pub file_name: String,
    pub modified: String,
    pub duration: String,
    pub size: String,
    pub resolution: String,
    pub resolution_class: ResolutionClass,
    pub bit_rate: String,
    pub bit_rate_mode: Option<String>,
    pub frame_rate: String,
    pub container: String,
    pub video_codec: String,
    pub audio_codec: String,
}

/// One line of the presentation: label, value and an optional badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: &'static str,
    pub value: String,
    pub badge: Option<String>,
}

impl DisplayRow {
    fn new(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            badge: None,
        }
    }

    fn with_badge(mut self, badge: Option<String>) -> Self {
        self.badge = badge;
        self
    }
}

impl NormalizedMetadata {
    /// Rows in their fixed display order.
    pub fn rows(&self) -> Vec<DisplayRow> {
        let class_badge = match self.resolution_class {
            ResolutionClass::Unknown => None,
            class => Some(class.label().to_string()),
        };

        vec![
            DisplayRow::new("File Name", &self.file_name),
            DisplayRow::new("Modified", &self.modified),
            DisplayRow::new("Duration", &self.duration),
            DisplayRow::new("Size", &self.size),
            DisplayRow::new("Resolution", &self.resolution).with_badge(class_badge),
            DisplayRow::new("Bit Rate", &self.bit_rate).with_badge(self.bit_rate_mode.clone()),
            DisplayRow::new("Frame Rate", &self.frame_rate),
            DisplayRow::new("Container", &self.container),
            DisplayRow::new("Video Codec", &self.video_codec),
            DisplayRow::new("Audio Codec", &self.audio_codec),
        ]
    }
}

/// Build the normalized record for a probe result.
///
/// Fails only when the probe has neither a General nor a Video track;
/// every field normalizer is total beyond that point.
pub fn assemble(
    probe: &ProbeResult,
    file: &FileMeta,
    display: &DisplayConfig,
) -> Result<NormalizedMetadata, AnalysisError> {
    let selected = normalize::select(&probe.tracks);
    if !selected.is_viable() {
        return Err(AnalysisError::NoMediaTrack);
    }

    let resolution = normalize_resolution(selected.video);
    let bit_rate = normalize_bit_rate(selected.video, selected.general);
    let container = selected
        .general
        .and_then(|t| t.text("Format"))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let name = if file.name.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        file.name.clone()
    };

    Ok(NormalizedMetadata {
        file_name: name,
        modified: file.modified_display(&display.timestamp_format),
        duration: normalize_duration(&selected, probe),
        size: format_size(file.size),
        resolution: resolution.text,
        resolution_class: resolution.class,
        bit_rate: bit_rate.text,
        bit_rate_mode: bit_rate.mode,
        frame_rate: normalize_frame_rate(selected.video),
        container,
        video_codec: resolve_codec(selected.video),
        audio_codec: resolve_codec(selected.audio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vidmeta_av::{RawTrack, TrackKind};

    fn file() -> FileMeta {
        FileMeta {
            name: "clip.mp4".to_string(),
            size: 1536,
            modified: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single(),
        }
    }

    fn probe(tracks: Vec<RawTrack>) -> ProbeResult {
        ProbeResult {
            engine: "test".to_string(),
            reference: None,
            tracks,
        }
    }

    #[test]
    fn test_modified_display() {
        let meta = file();
        assert_eq!(meta.modified_display("%Y-%m-%d %H:%M:%S"), "2024-03-09 14:05:00");
        assert_eq!(meta.modified_display("%d/%m/%Y"), "09/03/2024");
        assert_eq!(meta.modified_display("%Q"), "unknown");

        let meta = FileMeta {
            modified: None,
            ..file()
        };
        assert_eq!(meta.modified_display("%Y"), "unknown");
    }

    #[test]
    fn test_assemble_full_probe() {
        let probe = probe(vec![
            RawTrack::new(TrackKind::General)
                .with("Format", "MPEG-4")
                .with("Duration_String3", "00:02:15.500")
                .with("OverallBitRate", "5000000"),
            RawTrack::new(TrackKind::Video)
                .with("Format", "AVC")
                .with("Format_Profile", "High")
                .with("Width", "1920")
                .with("Height", "1080")
                .with("BitRate", "4500000")
                .with("BitRate_Mode", "VBR")
                .with("FrameRate", "29.970"),
            RawTrack::new(TrackKind::Audio)
                .with("Format", "AAC")
                .with("Format_Profile", "LC"),
        ]);

        let record = assemble(&probe, &file(), &DisplayConfig::default()).unwrap();
        assert_eq!(record.file_name, "clip.mp4");
        assert_eq!(record.modified, "2024-03-09 14:05:00");
        assert_eq!(record.duration, "00:02:15");
        assert_eq!(record.size, "1.5 KB");
        assert_eq!(record.resolution, "1920 x 1080");
        assert_eq!(record.resolution_class, ResolutionClass::FullHd);
        assert_eq!(record.bit_rate, "4.50 Mbps");
        assert_eq!(record.bit_rate_mode.as_deref(), Some("VBR"));
        assert_eq!(record.frame_rate, "29.970 fps");
        assert_eq!(record.container, "MPEG-4");
        assert_eq!(record.video_codec, "Advanced Video Coding（H.264） [High]");
        assert_eq!(record.audio_codec, "Advanced Audio Coding（MPEG-4 AAC） [LC]");
    }

    #[test]
    fn test_assemble_requires_general_or_video() {
        let audio_only = probe(vec![RawTrack::new(TrackKind::Audio).with("Format", "AAC")]);
        assert!(matches!(
            assemble(&audio_only, &file(), &DisplayConfig::default()),
            Err(AnalysisError::NoMediaTrack)
        ));

        let empty = probe(vec![]);
        assert!(matches!(
            assemble(&empty, &file(), &DisplayConfig::default()),
            Err(AnalysisError::NoMediaTrack)
        ));
    }

    #[test]
    fn test_video_only_probe_is_viable() {
        let probe = probe(vec![RawTrack::new(TrackKind::Video)
            .with("Width", 1280u32)
            .with("Height", 720u32)]);
        let record = assemble(&probe, &file(), &DisplayConfig::default()).unwrap();
        assert_eq!(record.container, "unknown");
        assert_eq!(record.resolution_class, ResolutionClass::Hd);
        assert_eq!(record.audio_codec, "unknown");
    }

    #[test]
    fn test_rows_order_and_badges() {
        let probe = probe(vec![RawTrack::new(TrackKind::General).with("Format", "Matroska")]);
        let record = assemble(&probe, &file(), &DisplayConfig::default()).unwrap();
        let rows = record.rows();

        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "File Name",
                "Modified",
                "Duration",
                "Size",
                "Resolution",
                "Bit Rate",
                "Frame Rate",
                "Container",
                "Video Codec",
                "Audio Codec",
            ]
        );
        assert!(rows.iter().all(|r| r.badge.is_none()));
        assert!(rows.iter().all(|r| !r.value.is_empty()));
    }

    #[test]
    fn test_blank_file_name_is_unknown() {
        let probe = probe(vec![RawTrack::new(TrackKind::General)]);
        let meta = FileMeta {
            name: String::new(),
            ..file()
        };
        let record = assemble(&probe, &meta, &DisplayConfig::default()).unwrap();
        assert_eq!(record.file_name, "unknown");
    }
}
