use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vidmeta_av::{EngineOptions, ProbeBackend, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Which probing engine to use (auto, mediainfo, native)
    #[serde(default)]
    pub backend: ProbeBackend,

    /// Explicit mediainfo executable (PATH lookup when unset)
    #[serde(default)]
    pub mediainfo_path: Option<PathBuf>,

    /// Upper bound in bytes for a single range read
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            backend: ProbeBackend::default(),
            mediainfo_path: None,
            chunk_size: default_chunk_size(),
        }
    }
}

impl ProbeConfig {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            mediainfo_path: self.mediainfo_path.clone(),
            chunk_size: self.chunk_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// strftime pattern for the modified timestamp
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}
