//! Media probing.
//!
//! A probing engine turns a [`ByteSource`] into a [`ProbeResult`]: an
//! ordered list of loosely typed tracks. Two engines are provided:
//!
//! - **MediaInfo** (`mediainfo` CLI, JSON output): the richest field set
//! - **Native**: in-process Matroska/MP4 parsing over chunked reads
//!
//! [`CompositeEngine`] layers them; [`ProbeBackend::Auto`] tries MediaInfo
//! first and falls back to the native engine.

mod composite;
mod mediainfo;
mod native;
mod types;

pub use composite::CompositeEngine;
pub use mediainfo::{parse_mediainfo_json, MediaInfoEngine};
pub use native::{detect_container, Container, NativeEngine};
pub use types::*;

use crate::source::{ByteSource, DEFAULT_CHUNK_SIZE};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A capability that probes a byte source and reports its tracks.
///
/// Implementations only see the source through range reads; they must not
/// assume the whole file fits in memory.
pub trait ProbeEngine: Send + Sync {
    /// Human-readable name identifying this engine.
    fn name(&self) -> &'static str;

    /// Probe the source and return its raw tracks.
    fn analyze(&self, source: &mut dyn ByteSource) -> Result<ProbeResult>;
}

/// Backend to use for probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    /// MediaInfo when it works, native parsing otherwise.
    #[default]
    Auto,
    /// `mediainfo` CLI only.
    MediaInfo,
    /// In-process container parsing only.
    Native,
}

impl std::fmt::Display for ProbeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeBackend::Auto => write!(f, "auto"),
            ProbeBackend::MediaInfo => write!(f, "mediainfo"),
            ProbeBackend::Native => write!(f, "native"),
        }
    }
}

/// Settings used to build an engine for a [`ProbeBackend`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Explicit `mediainfo` executable; `PATH` lookup when unset.
    pub mediainfo_path: Option<PathBuf>,
    /// Upper bound for a single range read.
    pub chunk_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            mediainfo_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineOptions {
    fn mediainfo(&self) -> MediaInfoEngine {
        match &self.mediainfo_path {
            Some(path) => MediaInfoEngine::with_binary(path),
            None => MediaInfoEngine::new(),
        }
    }

    fn native(&self) -> NativeEngine {
        NativeEngine::with_chunk_size(self.chunk_size)
    }
}

/// Build the engine for a backend.
pub fn engine_for(backend: ProbeBackend, options: &EngineOptions) -> Box<dyn ProbeEngine> {
    match backend {
        ProbeBackend::Auto => Box::new(CompositeEngine::new(vec![
            Box::new(options.mediainfo()),
            Box::new(options.native()),
        ])),
        ProbeBackend::MediaInfo => Box::new(options.mediainfo()),
        ProbeBackend::Native => Box::new(options.native()),
    }
}

/// Probe a source with the given backend.
pub fn probe_with(
    source: &mut dyn ByteSource,
    backend: ProbeBackend,
    options: &EngineOptions,
) -> Result<ProbeResult> {
    engine_for(backend, options).analyze(source)
}
