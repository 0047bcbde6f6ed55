//! Token-level annotation layers for one sentence.
//!
//! A [`Tokenization`] is the hub every other layer hangs off: the ordered
//! token list plus the tag lists, the optional constituency [`Parse`], and
//! one [`DependencyParse`] per grammar flavor. Mentions elsewhere in the
//! document reference a tokenization by id, never by position, so the
//! layers stay decoupled from assembly order.
//!
//! # Invariants
//!
//! - Token indices are contiguous from 0 and equal their list position.
//! - Tag lookup goes through the [`TagKind`] discriminator, never through
//!   list position: a tokenization may carry several tagging theories of
//!   the same kind (multiple NER runs), and their order is not meaningful.
//! - Constituent ids are assigned in pre-order and are unique per parse.

use crate::ident::AnnotationId;
use crate::metadata::AnnotationMetadata;
use crate::span::{TextSpan, TokenSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Tokens
// =============================================================================

/// One surface token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// 0-based position within the sentence, equal to the list position
    pub index: usize,
    /// Surface form
    pub text: String,
    /// Character span relative to the sentence's flattened text
    pub text_span: TextSpan,
    /// Provenance span in the source material, when recorded.
    /// Documents where the token came from; nothing downstream computes
    /// with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_span: Option<TextSpan>,
}

/// The token list plus all derived tag/parse layers for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tokenization {
    /// Unique id, referenced by value from mentions
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// Ordered tokens
    pub tokens: Vec<Token>,
    /// Tag lists (lemma/POS/NER theories), discriminated by [`TagKind`]
    pub taggings: Vec<TokenTagging>,
    /// Constituency parse, when one was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<Parse>,
    /// One dependency parse per grammar flavor
    pub dependency_parses: Vec<DependencyParse>,
}

impl Tokenization {
    /// Number of tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// First tagging of the given kind, if any.
    #[must_use]
    pub fn tagging(&self, kind: TagKind) -> Option<&TokenTagging> {
        self.taggings.iter().find(|t| t.kind == kind)
    }

    /// All tagging theories of the given kind, in insertion order.
    pub fn taggings_of(&self, kind: TagKind) -> impl Iterator<Item = &TokenTagging> {
        self.taggings.iter().filter(move |t| t.kind == kind)
    }

    /// Dependency parse for one flavor, if present.
    #[must_use]
    pub fn dependency_parse(&self, flavor: DependencyFlavor) -> Option<&DependencyParse> {
        self.dependency_parses.iter().find(|d| d.flavor == flavor)
    }
}

// =============================================================================
// Token taggings
// =============================================================================

/// Discriminator for a tag list. Lookup must go through this, never
/// through list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TagKind {
    /// Lemmas
    Lemma,
    /// Part-of-speech tags
    Pos,
    /// Named-entity tags (BIO-less; `O` marks outside)
    Ner,
}

impl TagKind {
    /// Upstream tag-type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TagKind::Lemma => "LEMMA",
            TagKind::Pos => "POS",
            TagKind::Ner => "NER",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (token index, tag) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Index of the tagged token
    pub token_index: usize,
    /// The tag
    pub tag: String,
    /// Fixed at 1.0
    pub confidence: f32,
}

impl TaggedToken {
    /// Create a tagged token with full confidence.
    #[must_use]
    pub fn new(token_index: usize, tag: impl Into<String>) -> Self {
        Self {
            token_index,
            tag: tag.into(),
            confidence: 1.0,
        }
    }
}

/// One tag list aligned to token position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTagging {
    /// Unique id
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// What the tags are
    pub kind: TagKind,
    /// Ordered pairs, token indices strictly increasing from 0
    pub tags: Vec<TaggedToken>,
}

impl TokenTagging {
    /// Tag at a token index, if present.
    #[must_use]
    pub fn tag_at(&self, token_index: usize) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.token_index == token_index)
            .map(|t| t.tag.as_str())
    }
}

// =============================================================================
// Constituency parse
// =============================================================================

/// One phrase-structure tree node, covering a contiguous token span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    /// Pre-order id, unique within the parse
    pub id: usize,
    /// Syntactic tag
    pub tag: String,
    /// Covered tokens, half-open
    pub span: TokenSpan,
    /// Ids of child constituents, left to right
    pub children: Vec<usize>,
    /// Index of the head child within `children`, set for internal nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_child: Option<usize>,
}

impl Constituent {
    /// Check if this constituent is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A flat, span-indexed constituency parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parse {
    /// Unique id
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// Constituents ordered by pre-order id
    pub constituents: Vec<Constituent>,
}

impl Parse {
    /// Constituent by id, if present.
    #[must_use]
    pub fn constituent(&self, id: usize) -> Option<&Constituent> {
        self.constituents.iter().find(|c| c.id == id)
    }

    /// Number of leaves, which equals the token count of a well-formed
    /// parse.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.constituents.iter().filter(|c| c.is_leaf()).count()
    }
}

// =============================================================================
// Dependency parses
// =============================================================================

/// Grammar flavor of a dependency parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DependencyFlavor {
    /// Plain grammatical relations
    Basic,
    /// Prepositions and conjuncts collapsed into relations
    Collapsed,
    /// Collapsed, with relations propagated across conjuncts
    CollapsedPropagated,
}

impl DependencyFlavor {
    /// Wire name of the flavor.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DependencyFlavor::Basic => "basic-deps",
            DependencyFlavor::Collapsed => "col-deps",
            DependencyFlavor::CollapsedPropagated => "col-ccproc-deps",
        }
    }

    /// All flavors, in assembly order.
    #[must_use]
    pub const fn all() -> [DependencyFlavor; 3] {
        [
            DependencyFlavor::Basic,
            DependencyFlavor::Collapsed,
            DependencyFlavor::CollapsedPropagated,
        ]
    }
}

impl fmt::Display for DependencyFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dependency edge. A missing governor marks a root dependent, which
/// is distinct from a genuine governor at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependent token index
    pub dependent: usize,
    /// Governor token index, absent for root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governor: Option<usize>,
    /// Relation label
    pub relation: String,
}

/// Edge list for one grammar flavor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyParse {
    /// Unique id
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// Grammar flavor
    pub flavor: DependencyFlavor,
    /// Ordered edges, one per input triple
    pub edges: Vec<Dependency>,
}

// =============================================================================
// Token references
// =============================================================================

/// A named, optionally anchored subset of token indices within one
/// tokenization, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRefSequence {
    /// Id of the tokenization the indices point into
    pub tokenization: AnnotationId,
    /// Ordered token indices
    pub indices: Vec<usize>,
    /// Anchor token index (a mention's head), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<usize>,
}

impl TokenRefSequence {
    /// Check if the sequence covers no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagging(kind: TagKind, tags: &[&str]) -> TokenTagging {
        TokenTagging {
            id: AnnotationId::random(),
            metadata: AnnotationMetadata::new("test", 0),
            kind,
            tags: tags
                .iter()
                .enumerate()
                .map(|(i, t)| TaggedToken::new(i, *t))
                .collect(),
        }
    }

    #[test]
    fn tagging_lookup_is_by_kind_not_position() {
        let tok = Tokenization {
            id: AnnotationId::random(),
            metadata: AnnotationMetadata::new("test", 0),
            tokens: vec![],
            taggings: vec![
                tagging(TagKind::Ner, &["O"]),
                tagging(TagKind::Lemma, &["dog"]),
                tagging(TagKind::Pos, &["NNS"]),
            ],
            parse: None,
            dependency_parses: vec![],
        };
        assert_eq!(tok.tagging(TagKind::Lemma).unwrap().tag_at(0), Some("dog"));
        assert_eq!(tok.tagging(TagKind::Pos).unwrap().tag_at(0), Some("NNS"));
        assert_eq!(tok.taggings_of(TagKind::Ner).count(), 1);
    }

    #[test]
    fn parse_leaf_count_ignores_internal_nodes() {
        let parse = Parse {
            id: AnnotationId::random(),
            metadata: AnnotationMetadata::new("test", 0),
            constituents: vec![
                Constituent {
                    id: 0,
                    tag: "S".into(),
                    span: TokenSpan::new(0, 2),
                    children: vec![1, 2],
                    head_child: Some(1),
                },
                Constituent {
                    id: 1,
                    tag: "NN".into(),
                    span: TokenSpan::new(0, 1),
                    children: vec![],
                    head_child: None,
                },
                Constituent {
                    id: 2,
                    tag: "VB".into(),
                    span: TokenSpan::new(1, 2),
                    children: vec![],
                    head_child: None,
                },
            ],
        };
        assert_eq!(parse.leaf_count(), 2);
        assert_eq!(parse.constituent(2).unwrap().tag, "VB");
    }

    #[test]
    fn flavor_wire_names() {
        assert_eq!(DependencyFlavor::Basic.as_str(), "basic-deps");
        assert_eq!(DependencyFlavor::Collapsed.as_str(), "col-deps");
        assert_eq!(
            DependencyFlavor::CollapsedPropagated.as_str(),
            "col-ccproc-deps"
        );
    }

    #[test]
    fn root_edge_serializes_without_governor() {
        let edge = Dependency {
            dependent: 1,
            governor: None,
            relation: "root".into(),
        };
        let json = serde_json::to_string(&edge).unwrap();
        assert!(!json.contains("governor"));
    }
}
