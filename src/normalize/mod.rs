//! Field normalizers.
//!
//! Each normalizer is a total, pure function from the selected raw tracks
//! to one display value. Missing or unparseable input yields [`UNKNOWN`]
//! instead of an error.

mod bitrate;
mod codec;
pub mod duration;
mod frame_rate;
mod resolution;
mod select;
mod size;

pub use bitrate::{normalize_bit_rate, BitRate};
pub use codec::resolve_codec;
pub use duration::{format_duration, normalize_duration};
pub use frame_rate::normalize_frame_rate;
pub use resolution::{classify, normalize_resolution, Resolution, ResolutionClass};
pub use select::{select, SelectedTracks};
pub use size::format_size;

/// Sentinel for values that could not be determined.
pub const UNKNOWN: &str = "unknown";
