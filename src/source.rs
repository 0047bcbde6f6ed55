//! Input model: what the external analyzers deliver.
//!
//! Everything here is already computed by upstream collaborators — the
//! tokenizer, the taggers, the parsers, the coreference resolver — and is
//! fully materialized in memory before assembly begins. The assembler
//! trusts the shape of this data only as far as the invariants it can
//! check; everything it cannot check (dependency well-formedness, tag
//! inventories) is passed through as-is.

use graft_core::DocumentKind;
use serde::{Deserialize, Serialize};

/// One analyzed token: surface form plus its per-token tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceToken {
    /// Surface form
    pub text: String,
    /// Lemma
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: String,
    /// Named-entity tag, `O` for outside
    pub ner: String,
    /// Character offsets in the source material, when the analyzer
    /// supplied them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_span: Option<(usize, usize)>,
}

impl SourceToken {
    /// Create a token with all tag layers and no raw offsets.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<String>,
        ner: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            ner: ner.into(),
            raw_span: None,
        }
    }

    /// Attach analyzer-supplied raw offsets.
    #[must_use]
    pub fn with_raw_span(mut self, start: usize, end: usize) -> Self {
        self.raw_span = Some((start, end));
        self
    }
}

/// One node of a constituency tree. A leaf is a node with no children and
/// covers exactly one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Syntactic tag
    pub tag: String,
    /// Ordered children; empty for leaves
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
        }
    }

    /// Create an internal node.
    #[must_use]
    pub fn internal(tag: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            tag: tag.into(),
            children,
        }
    }

    /// Check if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of leaves under this node (1 for a leaf).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }
}

/// One dependency triple for a single grammar flavor. A missing governor
/// marks the root dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepTriple {
    /// Dependent token index
    pub dependent: usize,
    /// Governor token index, absent for root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governor: Option<usize>,
    /// Relation label
    pub relation: String,
}

impl DepTriple {
    /// Create an edge with a governor.
    #[must_use]
    pub fn new(dependent: usize, governor: usize, relation: impl Into<String>) -> Self {
        Self {
            dependent,
            governor: Some(governor),
            relation: relation.into(),
        }
    }

    /// Create a root edge.
    #[must_use]
    pub fn root(dependent: usize, relation: impl Into<String>) -> Self {
        Self {
            dependent,
            governor: None,
            relation: relation.into(),
        }
    }
}

/// One analyzed sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SourceSentence {
    /// Ordered tokens
    pub tokens: Vec<SourceToken>,
    /// Constituency tree, when the parser produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeNode>,
    /// Basic dependency triples
    #[serde(default)]
    pub basic_deps: Vec<DepTriple>,
    /// Collapsed dependency triples
    #[serde(default)]
    pub collapsed_deps: Vec<DepTriple>,
    /// Collapsed-and-propagated dependency triples
    #[serde(default)]
    pub collapsed_propagated_deps: Vec<DepTriple>,
}

impl SourceSentence {
    /// Create a sentence from tokens alone.
    #[must_use]
    pub fn new(tokens: Vec<SourceToken>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    /// Check if this sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One mention inside a coreference chain. Token offsets are half-open
/// `[start, end)` within the mention's sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainMention {
    /// Sentence index within the document
    pub sentence: usize,
    /// First covered token index (inclusive)
    pub start: usize,
    /// One past the last covered token index (exclusive)
    pub end: usize,
    /// Head token index, when the resolver supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<usize>,
    /// Whether this mention is the chain's representative
    #[serde(default)]
    pub representative: bool,
}

/// One coreference chain: the mentions believed to co-refer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionChain {
    /// Ordered mentions
    pub mentions: Vec<ChainMention>,
}

/// One analyzed document, ready for assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document id, carried through to the output graph
    pub id: String,
    /// Kind of document
    #[serde(default)]
    pub kind: DocumentKind,
    /// Ordered sentences
    pub sentences: Vec<SourceSentence>,
    /// Coreference chains over the whole document
    #[serde(default)]
    pub chains: Vec<MentionChain>,
}

impl SourceDocument {
    /// Create a document from sentences, with no coreference chains.
    #[must_use]
    pub fn new(id: impl Into<String>, sentences: Vec<SourceSentence>) -> Self {
        Self {
            id: id.into(),
            kind: DocumentKind::default(),
            sentences,
            chains: Vec::new(),
        }
    }
}
