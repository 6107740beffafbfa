//! # vidmeta-av
//!
//! Probing engines and byte sources for vidmeta.
//!
//! This crate provides:
//! - [`ByteSource`]: a size accessor plus random-access range reads, with
//!   file-backed and in-memory implementations
//! - [`ChunkedReader`]: `Read + Seek` over a source in bounded chunks
//! - Probing engines that report raw, loosely typed tracks ([`ProbeResult`])
//!   via the `mediainfo` CLI or in-process Matroska/MP4 parsing
//!
//! ## Example
//!
//! ```no_run
//! use vidmeta_av::{probe_file, ProbeBackend};
//!
//! let result = probe_file("/path/to/video.mkv", ProbeBackend::Auto)?;
//! for track in &result.tracks {
//!     println!("{}: {:?}", track.kind, track.text("Format"));
//! }
//! # Ok::<(), vidmeta_av::Error>(())
//! ```

mod error;
pub mod probe;
pub mod source;
pub mod tools;

// Re-exports
pub use error::{Error, Result};
pub use probe::{
    engine_for, EngineOptions, FieldValue, NativeEngine, ProbeBackend, ProbeEngine, ProbeResult,
    RawTrack, TrackKind,
};
pub use source::{ByteSource, ChunkedReader, FileSource, MemorySource, DEFAULT_CHUNK_SIZE};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};

/// Probe a file on disk with default engine options.
pub fn probe_file<P: AsRef<std::path::Path>>(path: P, backend: ProbeBackend) -> Result<ProbeResult> {
    let mut source = FileSource::open(path)?;
    probe::probe_with(&mut source, backend, &EngineOptions::default())
}
