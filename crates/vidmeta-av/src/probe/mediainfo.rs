//! MediaInfo-based probing.
//!
//! Runs the `mediainfo` CLI with JSON output and keeps every scalar field of
//! every track, so the normalization layer sees exactly what MediaInfo
//! reported (strings stay strings, numbers stay numbers).

use super::types::{FieldValue, ProbeResult, RawTrack, TrackKind};
use super::ProbeEngine;
use crate::source::ByteSource;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

const TOOL: &str = "mediainfo";

/// MediaInfo reports this field in seconds.
const DURATION_FIELD: &str = "Duration";

#[derive(Debug, Deserialize)]
struct MediaInfoOutput {
    #[serde(default)]
    media: Option<MediaInfoMedia>,
}

#[derive(Debug, Deserialize)]
struct MediaInfoMedia {
    #[serde(rename = "@ref", default)]
    file_ref: Option<String>,
    #[serde(default)]
    track: Option<TrackList>,
}

/// MediaInfo normally emits an array, but single-track output has been seen
/// as a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TrackList {
    Many(Vec<Map<String, Value>>),
    One(Map<String, Value>),
}

impl TrackList {
    fn into_vec(self) -> Vec<Map<String, Value>> {
        match self {
            TrackList::Many(tracks) => tracks,
            TrackList::One(track) => vec![track],
        }
    }
}

/// Probing engine backed by the `mediainfo` command-line tool.
#[derive(Debug, Clone)]
pub struct MediaInfoEngine {
    binary: PathBuf,
}

impl MediaInfoEngine {
    /// Use `mediainfo` from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(TOOL),
        }
    }

    /// Use a specific `mediainfo` executable.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run mediainfo on a file path and parse its output.
    pub fn probe_path(&self, path: &Path) -> Result<ProbeResult> {
        tracing::debug!(binary = %self.binary.display(), path = %path.display(), "running mediainfo");

        let output = Command::new(&self.binary)
            .args(["--Output=JSON", "--Full"])
            .arg(path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(TOOL)
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed(TOOL, stderr.trim().to_string()));
        }

        let json_str = String::from_utf8(output.stdout)
            .map_err(|e| Error::parse_error(TOOL, format!("Invalid UTF-8: {}", e)))?;

        if json_str.trim().is_empty() {
            return Err(Error::parse_error(TOOL, "empty output"));
        }

        parse_mediainfo_json(&json_str)
    }
}

impl Default for MediaInfoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeEngine for MediaInfoEngine {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn analyze(&self, source: &mut dyn ByteSource) -> Result<ProbeResult> {
        let path = source.path().ok_or_else(|| {
            Error::Unsupported("mediainfo can only probe sources backed by a file".to_string())
        })?;
        self.probe_path(path)
    }
}

/// Parse MediaInfo JSON output into a [`ProbeResult`].
///
/// A missing `media` object or track list yields an empty result rather
/// than an error; deciding whether that is usable is up to the caller.
pub fn parse_mediainfo_json(json: &str) -> Result<ProbeResult> {
    let output: MediaInfoOutput = serde_json::from_str(json)?;

    let Some(media) = output.media else {
        tracing::debug!("mediainfo output has no media object");
        return Ok(ProbeResult {
            engine: TOOL.to_string(),
            reference: None,
            tracks: Vec::new(),
        });
    };

    let tracks = media
        .track
        .map(TrackList::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(convert_track)
        .collect();

    Ok(ProbeResult {
        engine: TOOL.to_string(),
        reference: media.file_ref,
        tracks,
    })
}

fn convert_track(map: Map<String, Value>) -> Option<RawTrack> {
    let Some(kind) = map.get("@type").and_then(Value::as_str).map(TrackKind::parse) else {
        tracing::debug!("skipping mediainfo track without @type");
        return None;
    };

    let mut track = RawTrack::new(kind);
    for (key, value) in map {
        if key == "@type" {
            continue;
        }
        // Nested objects such as "extra" carry no fields the normalizers read.
        let field = match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(n) => FieldValue::Number(n),
                None => continue,
            },
            _ => continue,
        };

        if key == DURATION_FIELD {
            track.insert(&key, seconds_to_ms(field));
        } else {
            track.insert(&key, field);
        }
    }

    Some(track)
}

/// Rescale a duration in seconds to milliseconds, the unit the native
/// engine reports. Unparseable values are kept as they are.
fn seconds_to_ms(field: FieldValue) -> FieldValue {
    match field.as_f64() {
        Some(secs) => FieldValue::Number((secs * 1000.0).round()),
        None => field,
    }
}
