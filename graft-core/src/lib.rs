//! # graft-core
//!
//! Core types for the graft annotation assembler: the document annotation
//! graph and the pieces it is made of.
//!
//! This crate provides:
//! - **Document graph**: `Document`, `Section`, `Sentence`, `Tokenization`
//!   and the token-level layers (`TokenTagging`, `Parse`, `DependencyParse`)
//! - **Entity layer**: `Entity`, `EntityMention` and their sets
//! - **Bookkeeping**: `TextSpan`/`TokenSpan`, `AnnotationId`,
//!   `AnnotationMetadata`, the shared `Error` type
//!
//! The assembly engine lives in the `graft` crate; everything here is
//! passive data with serde derives so an external collaborator can
//! serialize the graph in any format.

#![warn(missing_docs)]

pub mod document;
pub mod entity;
pub mod error;
pub mod ident;
pub mod metadata;
pub mod span;
pub mod tokenization;

// Re-exports for convenience
pub use document::{Document, DocumentKind, Section, SectionKind, Sentence};
pub use entity::{Entity, EntityMention, EntityMentionSet, EntitySet, EntityType};
pub use error::{Error, Result};
pub use ident::{annotation_timestamp, AnnotationId};
pub use metadata::AnnotationMetadata;
pub use span::{TextSpan, TokenSpan};
pub use tokenization::{
    Constituent, Dependency, DependencyFlavor, DependencyParse, Parse, TagKind, TaggedToken,
    Token, TokenRefSequence, TokenTagging, Tokenization,
};
