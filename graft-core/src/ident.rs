//! Identifier and timestamp source.
//!
//! Every annotation object carries a globally unique id so that layers can
//! reference each other by value (a mention names its tokenization without
//! holding it). Ids are random v4 UUIDs: generation never fails, needs no
//! coordination, and repeated calls yield distinct values even across
//! concurrently-converted documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Globally unique identifier for one annotation object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    /// Mint a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for AnnotationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Current annotation timestamp in epoch seconds.
///
/// Captured once per assembler instance, not once per object, so every layer
/// of one conversion run carries the same stamp.
#[must_use]
pub fn annotation_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
