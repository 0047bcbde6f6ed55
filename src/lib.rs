//! # graft
//!
//! Assembles per-sentence analyzer output into one validated,
//! cross-referenced document annotation graph.
//!
//! The analyzers themselves — tokenizer, taggers, constituency and
//! dependency parsers, coreference resolver — are external collaborators:
//! they hand over already-computed data per sentence, and `graft`
//! reconciles those loosely-coupled layers into a single [`Document`]
//! graph with stable identifiers, character-offset bookkeeping and
//! explicit provenance, enforcing the invariants none of the upstream
//! tools guarantee on their own (matching token/leaf counts,
//! non-overlapping spans, unique ids).
//!
//! ## Quick start
//!
//! ```rust
//! use graft::{AssemblyConfig, DocumentAssembler, SourceDocument, SourceSentence, SourceToken};
//!
//! let sentence = SourceSentence::new(vec![
//!     SourceToken::new("Dogs", "dog", "NNS", "O"),
//!     SourceToken::new("bite", "bite", "VBP", "O"),
//!     SourceToken::new(".", ".", ".", "O"),
//! ]);
//! let source = SourceDocument::new("doc0", vec![sentence]);
//!
//! let assembler = DocumentAssembler::new(AssemblyConfig::default());
//! let document = assembler.assemble(&source).unwrap();
//! assert_eq!(document.text, "Dogs bite .\n");
//! ```
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`offset`] | Flattened text and the running character-offset cursor |
//! | [`tree`] | Constituency tree → flat, span-indexed constituent list |
//! | [`deps`] | Dependency triples → per-flavor edge lists |
//! | [`tagging`] | Lemma/POS/NER tag lists aligned to token position |
//! | [`coref`] | Coreference chains → entities and mentions |
//! | [`assembler`] | Per-document orchestration of the above |
//!
//! ## Design
//!
//! - **Trust boundaries are explicit.** Dependency input is trusted (no
//!   cycle checks); tree/token agreement is not (leaf counts are
//!   enforced). What cannot be checked is passed through verbatim.
//! - **Degrade or abort, never silently.** Recoverable per-sentence and
//!   per-mention errors follow the configured
//!   [`FailurePolicy`](config::FailurePolicy): drop the layer with a
//!   warning, or fail the document.
//! - **Ids decouple the layers.** Mentions reference tokenizations by id,
//!   so the entity pass is indifferent to assembly order.

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod coref;
pub mod deps;
pub mod offset;
pub mod source;
pub mod tagging;
pub mod tree;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use graft::prelude::*;
    //!
    //! let assembler = DocumentAssembler::default();
    //! let document = assembler
    //!     .assemble(&SourceDocument::new("doc0", vec![]))
    //!     .unwrap();
    //! assert!(document.text.is_empty());
    //! ```
    pub use crate::assembler::DocumentAssembler;
    pub use crate::config::{AssemblyConfig, FailurePolicy};
    pub use crate::source::{
        ChainMention, DepTriple, MentionChain, SourceDocument, SourceSentence, SourceToken,
        TreeNode,
    };
    pub use crate::tree::{HeadFinder, RightmostHead};
    pub use graft_core::{Document, Error, Result};
}

// Re-exports
pub use assembler::DocumentAssembler;
pub use config::{AssemblyConfig, FailurePolicy};
pub use coref::{assign_canonical_names, convert_coref, convert_mention, extract_token_ref_sequence};
pub use source::{
    ChainMention, DepTriple, MentionChain, SourceDocument, SourceSentence, SourceToken, TreeNode,
};
pub use tree::{HeadFinder, RightmostHead};

// The data model lives in graft-core; surface it at the root so callers
// need a single crate.
pub use graft_core::{
    annotation_timestamp, AnnotationId, AnnotationMetadata, Constituent, Dependency,
    DependencyFlavor, DependencyParse, Document, DocumentKind, Entity, EntityMention,
    EntityMentionSet, EntitySet, EntityType, Error, Parse, Result, Section, SectionKind, Sentence,
    TagKind, TaggedToken, TextSpan, Token, TokenRefSequence, TokenSpan, TokenTagging,
    Tokenization,
};
