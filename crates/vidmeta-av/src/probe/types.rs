//! Raw probe output types.
//!
//! These mirror what a probing engine reports before any normalization:
//! loosely typed tracks keyed by field name, in the order the engine emitted
//! them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Track type discriminator (the `@type` field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    General,
    Video,
    Audio,
    /// Any other track type (`Text`, `Menu`, `Image`, ...), keeping the raw name.
    Other(String),
}

impl TrackKind {
    /// Map an `@type` value to a track kind.
    pub fn parse(s: &str) -> Self {
        match s {
            "General" => TrackKind::General,
            "Video" => TrackKind::Video,
            "Audio" => TrackKind::Audio,
            other => TrackKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::General => write!(f, "General"),
            TrackKind::Video => write!(f, "Video"),
            TrackKind::Audio => write!(f, "Audio"),
            TrackKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A single scalar field value as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Interpret the value as a number.
    ///
    /// Text values are trimmed and parsed as-is first, then by their first
    /// whitespace-separated token (so `"1920 pixels"` reads as 1920).
    /// Non-finite results are rejected.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => {
                let s = s.trim();
                s.parse::<f64>()
                    .ok()
                    .or_else(|| s.split_whitespace().next()?.parse().ok())
            }
        }?;
        n.is_finite().then_some(n)
    }

    /// Render the value as display text, dropping blank strings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Number(n) => Some(format_number(*n)),
            FieldValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

/// Format a number the way a script engine would print it: integral values
/// without a fractional part, everything else in shortest round-trip form.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One track of probe output: a type tag plus named scalar fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    /// Track type (`@type`).
    pub kind: TrackKind,
    /// Fields keyed by engine field name.
    pub fields: BTreeMap<String, FieldValue>,
}

impl RawTrack {
    /// Create an empty track of the given kind.
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: impl Into<FieldValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Field as non-blank text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)?.as_text()
    }

    /// Field as a finite number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }
}

/// Everything an engine reported for one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Name of the engine that produced this result.
    pub engine: String,
    /// Top-level file reference reported by the engine (`@ref`), if any.
    pub reference: Option<String>,
    /// Tracks in engine order.
    pub tracks: Vec<RawTrack>,
}
