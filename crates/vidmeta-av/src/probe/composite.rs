//! A composite engine that delegates to multiple [`ProbeEngine`] implementations.

use super::{ProbeEngine, ProbeResult};
use crate::source::ByteSource;
use crate::{Error, Result};

/// Tries each registered [`ProbeEngine`] in order and returns the first successful result.
///
/// Sources are random-access, so a failed engine leaves nothing behind for
/// the next one to trip over.
pub struct CompositeEngine {
    engines: Vec<Box<dyn ProbeEngine>>,
}

impl CompositeEngine {
    /// Create a new `CompositeEngine` from an ordered list of engines.
    pub fn new(engines: Vec<Box<dyn ProbeEngine>>) -> Self {
        Self { engines }
    }
}

impl ProbeEngine for CompositeEngine {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn analyze(&self, source: &mut dyn ByteSource) -> Result<ProbeResult> {
        let mut last_err = None;

        for engine in &self.engines {
            match engine.analyze(source) {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::debug!(
                        engine = engine.name(),
                        error = %e,
                        "engine failed, trying next"
                    );
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| Error::Unsupported("no probing engine configured".to_string())))
    }
}
