//! Pure Rust probing.
//!
//! Identifies the container from its magic bytes and parses it with the
//! `matroska` or `mp4parse` crates. All reads go through a
//! [`ChunkedReader`], so the source is consumed in bounded range reads and
//! never held in memory as a whole. Results use MediaInfo field names so the
//! normalizers treat both engines alike.

mod mkv;
mod mp4;

use super::types::{ProbeResult, RawTrack, TrackKind};
use super::ProbeEngine;
use crate::source::{ByteSource, ChunkedReader, DEFAULT_CHUNK_SIZE};
use crate::{Error, Result};
use std::io::{Read, Seek};

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Matroska (.mkv, .webm)
    Matroska,
    /// ISO base media (.mp4, .m4v, .mov)
    Mp4,
}

impl Container {
    /// Container name as MediaInfo reports it.
    pub fn format_name(self) -> &'static str {
        match self {
            Container::Matroska => "Matroska",
            Container::Mp4 => "MPEG-4",
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_name())
    }
}

/// Streams found inside a container, before the General track is built.
pub(crate) struct ContainerContents {
    pub duration_ms: Option<u64>,
    pub streams: Vec<RawTrack>,
}

/// Detect the container format from the first bytes of a reader.
///
/// The reader is rewound afterwards.
pub fn detect_container<R: Read + Seek>(reader: &mut R) -> Result<Container> {
    let mut magic = [0u8; 12];
    reader.read_exact(&mut magic).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::UnsupportedContainer("source is too short to identify".to_string())
        } else {
            Error::Io(e)
        }
    })?;
    reader.rewind()?;

    // EBML header
    if magic[0..4] == [0x1A, 0x45, 0xDF, 0xA3] {
        return Ok(Container::Matroska);
    }

    // ISO-BMFF: box type at offset 4
    if matches!(&magic[4..8], b"ftyp" | b"moov" | b"mdat" | b"free" | b"wide") {
        return Ok(Container::Mp4);
    }

    Err(Error::UnsupportedContainer(
        "unable to detect container format from magic bytes".to_string(),
    ))
}

/// Probing engine that parses containers in-process.
#[derive(Debug, Clone)]
pub struct NativeEngine {
    chunk_size: usize,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Cap individual range reads at `chunk_size` bytes.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeEngine for NativeEngine {
    fn name(&self) -> &'static str {
        "native"
    }

    fn analyze(&self, source: &mut dyn ByteSource) -> Result<ProbeResult> {
        let reference = source.path().map(|p| p.display().to_string());
        let file_size = source.size();
        let mut reader = ChunkedReader::new(source, self.chunk_size);

        let container = detect_container(&mut reader)?;
        tracing::debug!(%container, file_size, "detected container");

        let contents = match container {
            Container::Matroska => mkv::probe(&mut reader)?,
            Container::Mp4 => mp4::probe(&mut reader)?,
        };

        let mut tracks = Vec::with_capacity(contents.streams.len() + 1);
        tracks.push(general_track(container, file_size, contents.duration_ms));
        tracks.extend(contents.streams);

        Ok(ProbeResult {
            engine: self.name().to_string(),
            reference,
            tracks,
        })
    }
}

fn general_track(container: Container, file_size: u64, duration_ms: Option<u64>) -> RawTrack {
    let mut general = RawTrack::new(TrackKind::General)
        .with("Format", container.format_name())
        .with("FileSize", file_size);

    if let Some(ms) = duration_ms.filter(|ms| *ms > 0) {
        general.insert("Duration", ms);
        general.insert("OverallBitRate", file_size.saturating_mul(8000) / ms);
    }

    general
}
