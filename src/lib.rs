//! vidmeta - video metadata inspector
//!
//! This library crate exposes the core functionality for integration testing.

pub mod analysis;
pub mod config;
pub mod normalize;
pub mod record;
pub mod render;
pub mod state;

pub use analysis::Analyzer;
pub use record::{assemble, AnalysisError, DisplayRow, FileMeta, NormalizedMetadata};
pub use state::{DisplayState, InspectorState};
