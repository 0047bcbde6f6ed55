//! Entities and entity mentions.
//!
//! A coreference chain resolves to one [`Entity`] with one
//! [`EntityMention`] per textual occurrence. Mentions live in a shared
//! document-level [`EntityMentionSet`]; entities link to them by id, so the
//! entity layer stays decoupled from mention storage order.

use crate::ident::AnnotationId;
use crate::metadata::AnnotationMetadata;
use crate::tokenization::TokenRefSequence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved type of an entity or mention.
///
/// `Display` renders the upstream NER tag spelling, so a resolved
/// `Person` prints as `PERSON` and an unresolved mention prints as
/// `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum EntityType {
    /// A person
    Person,
    /// An organization
    Organization,
    /// A geographic or political location
    Location,
    /// No type could be resolved
    #[default]
    Unknown,
    /// A tag outside the closed set, carried verbatim
    Other(String),
}

impl EntityType {
    /// Map an upstream NER tag to a type. The outside tag `O` maps to
    /// `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PERSON" => EntityType::Person,
            "ORGANIZATION" => EntityType::Organization,
            "LOCATION" => EntityType::Location,
            "O" => EntityType::Unknown,
            other => EntityType::Other(other.to_string()),
        }
    }

    /// Upstream tag spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Organization => "ORGANIZATION",
            EntityType::Location => "LOCATION",
            EntityType::Unknown => "Unknown",
            EntityType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One textual occurrence referring to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    /// Unique id, linked from the owning entity's mention-id list
    pub id: AnnotationId,
    /// The covered tokens
    pub tokens: TokenRefSequence,
    /// Covered surface forms joined by single spaces
    pub text: String,
    /// Resolved type, when type resolution ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntityType>,
    /// Fixed at 1.0
    pub confidence: f32,
}

/// The document-level pool of entity mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMentionSet {
    /// Unique id
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// All mentions, in chain order
    pub mentions: Vec<EntityMention>,
}

impl EntityMentionSet {
    /// Create an empty mention set.
    #[must_use]
    pub fn new(metadata: AnnotationMetadata) -> Self {
        Self {
            id: AnnotationId::random(),
            metadata,
            mentions: Vec::new(),
        }
    }

    /// Mention by id, if present.
    #[must_use]
    pub fn mention(&self, id: AnnotationId) -> Option<&EntityMention> {
        self.mentions.iter().find(|m| m.id == id)
    }
}

/// A resolved referent: one coreference chain's worth of mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique id
    pub id: AnnotationId,
    /// Ids of this entity's mentions, in chain order
    pub mention_ids: Vec<AnnotationId>,
    /// The representative mention's text, when one was flagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    /// Resolved type, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntityType>,
}

/// The document-level set of resolved entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySet {
    /// Unique id
    pub id: AnnotationId,
    /// Provenance
    pub metadata: AnnotationMetadata,
    /// One entity per coreference chain, in chain order
    pub entities: Vec<Entity>,
}

impl EntitySet {
    /// Create an empty entity set.
    #[must_use]
    pub fn new(metadata: AnnotationMetadata) -> Self {
        Self {
            id: AnnotationId::random(),
            metadata,
            entities: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_maps_outside_tag_to_unknown() {
        assert_eq!(EntityType::from_tag("O"), EntityType::Unknown);
        assert_eq!(EntityType::from_tag("PERSON"), EntityType::Person);
        assert_eq!(
            EntityType::from_tag("MISC"),
            EntityType::Other("MISC".into())
        );
    }

    #[test]
    fn entity_type_display_uses_upstream_spelling() {
        assert_eq!(EntityType::Person.to_string(), "PERSON");
        assert_eq!(EntityType::Unknown.to_string(), "Unknown");
        assert_eq!(EntityType::Other("MISC".into()).to_string(), "MISC");
    }

    #[test]
    fn mention_lookup_by_id() {
        let mut set = EntityMentionSet::new(AnnotationMetadata::new("test", 0));
        let mention = EntityMention {
            id: AnnotationId::random(),
            tokens: TokenRefSequence {
                tokenization: AnnotationId::random(),
                indices: vec![0, 1],
                anchor: Some(1),
            },
            text: "the dog".into(),
            kind: None,
            confidence: 1.0,
        };
        let id = mention.id;
        set.mentions.push(mention);
        assert!(set.mention(id).is_some());
        assert!(set.mention(AnnotationId::random()).is_none());
    }
}
