//! Assembly configuration.

use serde::{Deserialize, Serialize};

/// What to do when a per-sentence or per-mention error surfaces during
/// assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FailurePolicy {
    /// Drop the failing annotation layer (or mention/chain), log a
    /// warning, and keep assembling the rest of the document.
    #[default]
    Degrade,
    /// Fail the whole document on the first error.
    Abort,
}

/// Configuration record for one assembler instance.
///
/// The three behavior flags travel together as one explicit record rather
/// than as loose booleans threaded through call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Emit explicit empty collections (constituent lists, edge lists,
    /// mention-id lists) instead of treating empty input as an error or
    /// omitting the layer.
    pub allow_empty_collections: bool,
    /// Record each token's provenance span in the source material.
    pub record_provenance_spans: bool,
    /// Trust analyzer-supplied raw offsets for provenance spans instead of
    /// reconstructing them from token lengths. Only consulted when
    /// provenance spans are recorded.
    pub trust_source_offsets: bool,
    /// Skip every annotation layer and emit only the document shell with
    /// section and sentence spans.
    pub raw_extraction_only: bool,
    /// Degrade-vs-abort choice for recoverable assembly errors.
    pub failure_policy: FailurePolicy,
    /// Tool name stamped into every layer's provenance metadata.
    pub tool: String,
}

impl AssemblyConfig {
    /// Default tool name for provenance metadata.
    pub const DEFAULT_TOOL: &'static str = "graft annotation pipeline";

    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_empty_collections: false,
            record_provenance_spans: false,
            trust_source_offsets: false,
            raw_extraction_only: false,
            failure_policy: FailurePolicy::Degrade,
            tool: Self::DEFAULT_TOOL.to_string(),
        }
    }

    /// Emit explicit empty collections instead of omitting or erring.
    #[must_use]
    pub fn allow_empty_collections(mut self, allow: bool) -> Self {
        self.allow_empty_collections = allow;
        self
    }

    /// Record per-token provenance spans.
    #[must_use]
    pub fn record_provenance_spans(mut self, record: bool) -> Self {
        self.record_provenance_spans = record;
        self
    }

    /// Trust analyzer-supplied raw offsets for provenance spans.
    #[must_use]
    pub fn trust_source_offsets(mut self, trust: bool) -> Self {
        self.trust_source_offsets = trust;
        self
    }

    /// Emit only the document shell.
    #[must_use]
    pub fn raw_extraction_only(mut self, raw: bool) -> Self {
        self.raw_extraction_only = raw;
        self
    }

    /// Set the degrade-vs-abort policy.
    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the tool name stamped into provenance metadata.
    #[must_use]
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self::new()
    }
}
