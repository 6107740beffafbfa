mod types;

pub use types::*;

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use std::path::Path;
use vidmeta_av::ProbeBackend;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./vidmeta.toml", "~/.config/vidmeta/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.probe.chunk_size == 0 {
        anyhow::bail!("probe.chunk_size must be greater than 0");
    }

    match &config.probe.mediainfo_path {
        Some(path) if !path.exists() => {
            tracing::warn!("mediainfo_path does not exist: {:?}", path);
        }
        None if config.probe.backend == ProbeBackend::MediaInfo => {
            if vidmeta_av::require_tool("mediainfo").is_err() {
                tracing::warn!("backend is mediainfo but mediainfo is not on PATH");
            }
        }
        _ => {}
    }

    let format = config.display.timestamp_format.as_str();
    if format.trim().is_empty() {
        anyhow::bail!("display.timestamp_format cannot be empty");
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("display.timestamp_format is not a valid strftime pattern: {format}");
    }

    Ok(())
}
