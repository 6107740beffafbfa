//! Duration normalization.
//!
//! Engines disagree on how they report duration: an already formatted
//! `HH:MM:SS.mmm` string, a number of milliseconds, or a number of seconds,
//! and different tracks of the same file can disagree with each other.
//! Every fallback step is an explicit, ordered candidate list so each can be
//! checked on its own.
//!
//! The millisecond/second decision is a heuristic. A raw value is read as
//! milliseconds unless that rounds down to zero, in which case it is read
//! as seconds. Values below 1000 are therefore ambiguous: a 45 ms clip and
//! a 45 s clip both render as `0:45`.

use super::select::SelectedTracks;
use super::UNKNOWN;
use vidmeta_av::{ProbeResult, RawTrack};

/// Preformatted `HH:MM:SS.mmm` field.
pub const PREFORMATTED_FIELD: &str = "Duration_String3";

/// Raw numeric duration field.
pub const RAW_FIELD: &str = "Duration";

/// Where a raw duration was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSource {
    General,
    Video,
    Audio,
    /// Largest duration reported by any track of the probe.
    LongestTrack,
}

/// Raw duration sources, most trusted first.
pub const SOURCE_CHAIN: [DurationSource; 4] = [
    DurationSource::General,
    DurationSource::Video,
    DurationSource::Audio,
    DurationSource::LongestTrack,
];

/// Unit a raw duration is assumed to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Milliseconds,
    Seconds,
}

/// Unit assumptions, tried in order until one yields a non-zero length.
pub const UNIT_CHAIN: [DurationUnit; 2] = [DurationUnit::Milliseconds, DurationUnit::Seconds];

impl DurationUnit {
    /// Whole seconds for `raw` under this unit, rounded down.
    pub fn whole_seconds(self, raw: f64) -> u64 {
        let secs = match self {
            DurationUnit::Milliseconds => raw / 1000.0,
            DurationUnit::Seconds => raw,
        };
        secs.floor() as u64
    }
}

fn usable(raw: f64) -> bool {
    raw.is_finite() && raw > 0.0
}

fn raw_duration(track: Option<&RawTrack>) -> Option<f64> {
    track?.number(RAW_FIELD).filter(|n| usable(*n))
}

/// Pick the first usable raw duration along [`SOURCE_CHAIN`].
pub fn select_raw_duration(
    selected: &SelectedTracks<'_>,
    probe: &ProbeResult,
) -> Option<(DurationSource, f64)> {
    SOURCE_CHAIN.iter().find_map(|source| {
        let raw = match source {
            DurationSource::General => raw_duration(selected.general),
            DurationSource::Video => raw_duration(selected.video),
            DurationSource::Audio => raw_duration(selected.audio),
            DurationSource::LongestTrack => probe
                .tracks
                .iter()
                .filter_map(|t| raw_duration(Some(t)))
                .reduce(f64::max),
        };
        raw.map(|r| (*source, r))
    })
}

/// Resolve a raw duration to whole seconds along [`UNIT_CHAIN`].
///
/// Returns `None` for non-positive or non-finite input. A positive value
/// that is zero under every unit (a sub-second clip) resolves to zero.
pub fn resolve_seconds(raw: f64) -> Option<u64> {
    if !usable(raw) {
        return None;
    }

    let secs = UNIT_CHAIN
        .iter()
        .map(|unit| unit.whole_seconds(raw))
        .find(|secs| *secs > 0)
        .unwrap_or(0);
    Some(secs)
}

/// `H:MM:SS` when there is at least one hour, `M:SS` otherwise.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Strip the fractional seconds from a preformatted duration.
///
/// Only strings containing a `:` separator are accepted.
fn truncate_preformatted(s: &str) -> Option<&str> {
    let s = s.trim();
    if !s.contains(':') {
        return None;
    }
    let whole = s.split('.').next().unwrap_or(s);
    (!whole.is_empty()).then_some(whole)
}

/// Format a duration from an optional preformatted string and an optional
/// raw value. The preformatted string wins when it is usable.
pub fn format_duration(preformatted: Option<&str>, raw: Option<f64>) -> String {
    if let Some(whole) = preformatted.and_then(truncate_preformatted) {
        return whole.to_string();
    }

    raw.and_then(resolve_seconds)
        .map(format_hms)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Duration for the selected tracks of a probe.
pub fn normalize_duration(selected: &SelectedTracks<'_>, probe: &ProbeResult) -> String {
    let preformatted = selected
        .by_priority()
        .filter_map(|t| t.text(PREFORMATTED_FIELD))
        .find(|s| s.contains(':'));

    let raw = select_raw_duration(selected, probe);
    if let Some((source, value)) = raw {
        tracing::trace!(?source, value, "raw duration");
    }

    format_duration(preformatted.as_deref(), raw.map(|(_, value)| value))
}
