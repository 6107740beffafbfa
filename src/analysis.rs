//! One analysis: probe a source, then assemble the normalized record.

use crate::config::{Config, DisplayConfig};
use crate::record::{assemble, AnalysisError, FileMeta, NormalizedMetadata};
use std::path::Path;
use vidmeta_av::{engine_for, ByteSource, FileSource, ProbeEngine, ProbeResult};

/// Runs analyses with one probing engine and display configuration.
pub struct Analyzer {
    engine: Box<dyn ProbeEngine>,
    display: DisplayConfig,
}

impl Analyzer {
    pub fn new(engine: Box<dyn ProbeEngine>, display: DisplayConfig) -> Self {
        Self { engine, display }
    }

    /// Build an analyzer from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let engine = engine_for(config.probe.backend, &config.probe.engine_options());
        Self::new(engine, config.display.clone())
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Probe a source and normalize the result.
    pub fn analyze(
        &self,
        source: &mut dyn ByteSource,
        file: &FileMeta,
    ) -> Result<NormalizedMetadata, AnalysisError> {
        let probe = self.engine.analyze(source)?;
        tracing::debug!(
            engine = %probe.engine,
            tracks = probe.tracks.len(),
            "probe finished"
        );
        assemble(&probe, file, &self.display)
    }

    /// Analyze a file on disk.
    pub fn analyze_path(&self, path: &Path) -> Result<NormalizedMetadata, AnalysisError> {
        tracing::info!("Analyzing {:?}", path);
        let mut source = FileSource::open(path)?;
        let file = FileMeta::from_path(path).map_err(vidmeta_av::Error::from)?;
        self.analyze(&mut source, &file)
    }

    /// Probe a file on disk without normalizing it.
    pub fn probe_path(&self, path: &Path) -> Result<ProbeResult, AnalysisError> {
        let mut source = FileSource::open(path)?;
        Ok(self.engine.analyze(&mut source)?)
    }
}
