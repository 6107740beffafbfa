//! Current display state of the inspector.
//!
//! The state is one replaceable value: idle, a finished record, or an
//! error. Each analysis holds a ticket; only the newest ticket may write,
//! so an analysis that was superseded by a newer request is discarded
//! instead of overwriting fresher output.

use crate::record::{AnalysisError, NormalizedMetadata};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// What the presentation layer should show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Idle,
    Ready { metadata: NormalizedMetadata },
    Failed { error: String },
}

/// Handle for one in-flight analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    display: DisplayState,
}

/// Shared, cloneable display state.
#[derive(Debug, Clone, Default)]
pub struct InspectorState {
    inner: Arc<RwLock<Inner>>,
}

impl InspectorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new analysis, superseding any in-flight one.
    pub fn begin(&self) -> AnalysisTicket {
        let mut inner = self.inner.write();
        inner.generation += 1;
        AnalysisTicket {
            generation: inner.generation,
        }
    }

    /// Publish the outcome of an analysis.
    ///
    /// Success replaces the record and clears any error; failure clears the
    /// record and stores the error. Returns `false` when the ticket was
    /// superseded and the outcome was dropped.
    pub fn complete(
        &self,
        ticket: AnalysisTicket,
        outcome: Result<NormalizedMetadata, AnalysisError>,
    ) -> bool {
        let mut inner = self.inner.write();
        if ticket.generation != inner.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = inner.generation,
                "dropping superseded analysis"
            );
            return false;
        }

        inner.display = match outcome {
            Ok(metadata) => DisplayState::Ready { metadata },
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                DisplayState::Failed {
                    error: e.to_string(),
                }
            }
        };
        true
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> DisplayState {
        self.inner.read().display.clone()
    }

    pub fn metadata(&self) -> Option<NormalizedMetadata> {
        match &self.inner.read().display {
            DisplayState::Ready { metadata } => Some(metadata.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match &self.inner.read().display {
            DisplayState::Failed { error } => Some(error.clone()),
            _ => None,
        }
    }
}
