//! The document shell: document, section, sentence.
//!
//! One [`Document`] per input unit, holding the flattened text, one
//! [`Section`] spanning it, and the ordered [`Sentence`]s. Entity and
//! mention sets are attached in a final pass once every tokenization
//! exists.

use crate::entity::{EntityMentionSet, EntitySet};
use crate::ident::AnnotationId;
use crate::metadata::AnnotationMetadata;
use crate::span::TextSpan;
use crate::tokenization::Tokenization;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum DocumentKind {
    /// Newswire
    #[default]
    News,
    /// Anything else, named
    Other(String),
}

impl DocumentKind {
    /// Kind name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DocumentKind::News => "news",
            DocumentKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum SectionKind {
    /// Running prose
    #[default]
    Passage,
}

/// One sentence: a text span plus its tokenization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Unique id
    pub id: AnnotationId,
    /// Character span over the document's flattened text
    pub text_span: TextSpan,
    /// Token-level annotation layers. Absent only in raw-extraction mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenization: Option<Tokenization>,
}

/// A contiguous stretch of sentences over the document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique id
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// Kind of section
    pub kind: SectionKind,
    /// Character span over the document's flattened text
    pub text_span: TextSpan,
    /// Ordered sentences; spans strictly increasing and non-overlapping
    pub sentences: Vec<Sentence>,
}

/// One fully assembled document annotation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source document id
    pub id: String,
    /// Flattened text: sentence tokens joined by single spaces, one
    /// newline after every sentence
    pub text: String,
    /// Kind of document
    pub kind: DocumentKind,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// The single section spanning the whole text
    pub section: Section,
    /// Pool of entity mentions, attached after all sentences are assembled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<EntityMentionSet>,
    /// Resolved entities, attached after all sentences are assembled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<EntitySet>,
}

impl Document {
    /// Iterate the assembled tokenizations in sentence order.
    pub fn tokenizations(&self) -> impl Iterator<Item = &Tokenization> {
        self.section
            .sentences
            .iter()
            .filter_map(|s| s.tokenization.as_ref())
    }

    /// Tokenization by id, if present.
    #[must_use]
    pub fn tokenization(&self, id: AnnotationId) -> Option<&Tokenization> {
        self.tokenizations().find(|t| t.id == id)
    }
}
