//! Annotation provenance metadata.

use serde::{Deserialize, Serialize};

/// Provenance record attached to every independently-produced layer.
///
/// The tool string names the pipeline that produced the layer, optionally
/// suffixed with a per-layer detail (a dependency flavor, a tagger name).
/// Confidence is fixed at 1.0 throughout assembly: this engine records what
/// the analyzers said, it does not model uncertainty about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMetadata {
    /// Name of the tool that produced the annotation
    pub tool: String,
    /// Annotation time, epoch seconds
    pub timestamp: i64,
    /// Confidence in the annotation, fixed at 1.0
    pub confidence: f32,
}

impl AnnotationMetadata {
    /// Create metadata for a tool at a given timestamp.
    #[must_use]
    pub fn new(tool: impl Into<String>, timestamp: i64) -> Self {
        Self {
            tool: tool.into(),
            timestamp,
            confidence: 1.0,
        }
    }

    /// Append a per-layer detail to the tool name.
    #[must_use]
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.tool.push(' ');
        self.tool.push_str(detail);
        self
    }
}
