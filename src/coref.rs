//! Mention and entity resolution.
//!
//! Converts raw coreference chains into the entity layer: one
//! [`Entity`] per chain, one [`EntityMention`] per mention, all mentions
//! pooled in the shared document-level [`EntityMentionSet`]. Mentions
//! reference their tokenization by id, so this pass runs once every
//! tokenization exists and is indifferent to assembly order.
//!
//! Two enrichments ride along:
//!
//! - **Type resolution**: each mention's type is resolved by polling the
//!   tokenization's NER tagging theories over the mention's anchor or
//!   span. The vote is deterministic — counts accumulate in first-seen
//!   order and a strict maximum wins, so reruns agree.
//! - **Canonical names**: entities that end up nameless can borrow the
//!   name of a named-entity run overlapping one of their mentions' heads
//!   (see [`assign_canonical_names`]).

use crate::config::{AssemblyConfig, FailurePolicy};
use crate::source::{ChainMention, MentionChain};
use graft_core::{
    AnnotationId, Document, Entity, EntityMention, EntityMentionSet, EntityType, Error, Result,
    TagKind, TokenRefSequence, Tokenization,
};

/// The outside tag of the NER tag inventory.
const OUTSIDE_TAG: &str = "O";

// =============================================================================
// Token reference extraction
// =============================================================================

/// Extract the token reference sequence for a half-open token range
/// `[left, right)` with an optional anchor.
///
/// An inverted range is invalid. An empty range (`left == right`) is
/// unusual but accepted: it yields an empty index list carrying the anchor
/// verbatim. For a non-empty range the anchor is kept only when it falls
/// inside the range; an out-of-range anchor is dropped with a warning
/// rather than rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidSpan`] when `right < left`.
pub fn extract_token_ref_sequence(
    left: usize,
    right: usize,
    anchor: Option<usize>,
    tokenization: AnnotationId,
) -> Result<TokenRefSequence> {
    if right < left {
        return Err(Error::invalid_span(format!(
            "mention span end {right} precedes start {left}"
        )));
    }
    if left == right {
        log::warn!("mention covers no tokens at [{left}, {right}) in tokenization {tokenization}");
        return Ok(TokenRefSequence {
            tokenization,
            indices: Vec::new(),
            anchor,
        });
    }
    let anchor = anchor.and_then(|head| {
        if (left..right).contains(&head) {
            Some(head)
        } else {
            log::warn!(
                "anchor {head} outside mention span [{left}, {right}) in tokenization {tokenization}, dropping"
            );
            None
        }
    });
    Ok(TokenRefSequence {
        tokenization,
        indices: (left..right).collect(),
        anchor,
    })
}

// =============================================================================
// Entity type resolution
// =============================================================================

/// Resolve an entity type from the tokenization's NER tagging theories
/// over a mention's anchor or span.
///
/// With exactly one theory and an anchor, the answer is that theory's tag
/// at the anchor (outside tag included, mapped to `Unknown`). Otherwise
/// every theory votes over the mention's span — or the singleton anchor
/// when the span is empty — counting non-outside tags; the strict maximum
/// wins and ties break toward the first-seen tag. Zero theories, an empty
/// span, or all-outside votes resolve to `Unknown`.
#[must_use]
pub fn resolve_entity_kind(tokenization: &Tokenization, tokens: &TokenRefSequence) -> EntityType {
    let theories: Vec<_> = tokenization.taggings_of(TagKind::Ner).collect();
    if theories.is_empty() {
        return EntityType::Unknown;
    }

    if theories.len() == 1 {
        if let Some(anchor) = tokens.anchor {
            return match theories[0].tag_at(anchor) {
                Some(tag) => EntityType::from_tag(tag),
                None => EntityType::Unknown,
            };
        }
    }

    let anchor_index;
    let indices: &[usize] = if tokens.indices.is_empty() {
        match tokens.anchor {
            Some(anchor) => {
                anchor_index = [anchor];
                &anchor_index
            }
            None => return EntityType::Unknown,
        }
    } else {
        &tokens.indices
    };

    // First-seen insertion order makes the tie-break deterministic.
    let mut votes: Vec<(&str, usize)> = Vec::new();
    for theory in &theories {
        for &index in indices {
            match theory.tag_at(index) {
                Some(tag) if tag != OUTSIDE_TAG => {
                    match votes.iter_mut().find(|(seen, _)| *seen == tag) {
                        Some((_, count)) => *count += 1,
                        None => votes.push((tag, 1)),
                    }
                }
                _ => {}
            }
        }
    }

    let mut winner: Option<(&str, usize)> = None;
    for &(tag, count) in &votes {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((tag, count));
        }
    }
    winner.map_or(EntityType::Unknown, |(tag, _)| EntityType::from_tag(tag))
}

// =============================================================================
// Mention and chain conversion
// =============================================================================

/// Convert one chain mention against its tokenization.
///
/// The mention text is the covered tokens' surface forms joined by single
/// spaces; confidence is fixed at 1.0.
///
/// # Errors
///
/// Returns [`Error::InvalidSpan`] when the mention span is inverted or
/// reaches past the tokenization's token count.
pub fn convert_mention(
    mention: &ChainMention,
    tokenization: &Tokenization,
) -> Result<EntityMention> {
    let tokens = extract_token_ref_sequence(
        mention.start,
        mention.end,
        mention.head,
        tokenization.id,
    )?;
    let count = tokenization.token_count();
    if mention.end > count {
        return Err(Error::invalid_span(format!(
            "mention span [{}, {}) reaches past {count} tokens in tokenization {}",
            mention.start, mention.end, tokenization.id
        )));
    }
    let text = tokenization.tokens[mention.start..mention.end]
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let kind = resolve_entity_kind(tokenization, &tokens);
    Ok(EntityMention {
        id: AnnotationId::random(),
        tokens,
        text,
        kind: Some(kind),
        confidence: 1.0,
    })
}

/// Convert one coreference chain into an entity, appending its mentions
/// to the shared mention set.
///
/// The representative mention's text becomes the entity's canonical name;
/// with no flagged mention the name stays unset. Under
/// [`FailurePolicy::Degrade`] a failing mention is dropped with a warning
/// and the entity keeps the rest; under [`FailurePolicy::Abort`] the first
/// failure propagates.
///
/// # Errors
///
/// Returns [`Error::EmptyRequiredCollection`] for a zero-mention chain
/// unless empty collections are allowed, [`Error::StructuralMismatch`]
/// when a mention's sentence index has no tokenization, and any mention
/// conversion error under the abort policy.
pub fn convert_coref(
    chain: &MentionChain,
    tokenizations: &[&Tokenization],
    mention_set: &mut EntityMentionSet,
    config: &AssemblyConfig,
) -> Result<Entity> {
    if chain.mentions.is_empty() && !config.allow_empty_collections {
        return Err(Error::empty_required("coreference chain has no mentions"));
    }

    let mut mention_ids = Vec::with_capacity(chain.mentions.len());
    let mut canonical_name = None;
    for mention in &chain.mentions {
        let converted = tokenizations
            .get(mention.sentence)
            .ok_or_else(|| {
                Error::structural_mismatch(format!(
                    "mention references sentence {} but only {} tokenizations exist",
                    mention.sentence,
                    tokenizations.len()
                ))
            })
            .and_then(|tokenization| convert_mention(mention, tokenization));
        let entity_mention = match converted {
            Ok(entity_mention) => entity_mention,
            Err(err) if config.failure_policy == FailurePolicy::Degrade => {
                log::warn!("dropping mention in sentence {}: {err}", mention.sentence);
                continue;
            }
            Err(err) => return Err(err),
        };
        if mention.representative && canonical_name.is_none() {
            canonical_name = Some(entity_mention.text.clone());
        }
        mention_ids.push(entity_mention.id);
        mention_set.mentions.push(entity_mention);
    }

    Ok(Entity {
        id: AnnotationId::random(),
        mention_ids,
        canonical_name,
        kind: None,
    })
}

// =============================================================================
// Canonical name enrichment
// =============================================================================

/// A maximal run of same-tagged named-entity tokens in one tokenization.
#[derive(Debug, Clone)]
struct NamedRun {
    text: String,
    kind: EntityType,
    indices: Vec<usize>,
}

/// Assign canonical names to nameless entities from named-entity runs.
///
/// Each tokenization's first NER tagging is scanned for maximal runs of
/// `PERSON`, `ORGANIZATION` and `LOCATION` tags, with each run's surface
/// string rebuilt from token spans so inter-token spacing survives. A
/// mention whose anchor token falls inside a run adopts the run as its
/// head named entity. Every entity still lacking a canonical name takes
/// the first head string among its mentions whose run type is compatible
/// with the entity's kind (any run, when the entity has no kind), and
/// back-fills the kind when unset. Entities with no surviving candidate
/// are left untouched.
pub fn assign_canonical_names(document: &mut Document) {
    let Some(mention_set) = document.mentions.clone() else {
        return;
    };
    let Some(mut entity_set) = document.entities.take() else {
        return;
    };

    // Head named-entity run for each mention, keyed by mention id.
    let mut head_runs: Vec<(AnnotationId, NamedRun)> = Vec::new();
    for mention in &mention_set.mentions {
        let Some(anchor) = mention.tokens.anchor else {
            continue;
        };
        let Some(tokenization) = document.tokenization(mention.tokens.tokenization) else {
            continue;
        };
        if let Some(run) = named_runs(tokenization)
            .into_iter()
            .find(|run| run.indices.contains(&anchor))
        {
            head_runs.push((mention.id, run));
        }
    }

    for entity in &mut entity_set.entities {
        if entity.canonical_name.is_some() {
            continue;
        }
        let candidate = entity
            .mention_ids
            .iter()
            .filter_map(|id| {
                head_runs
                    .iter()
                    .find(|(mention_id, _)| mention_id == id)
                    .map(|(_, run)| run)
            })
            .find(|run| match &entity.kind {
                None => true,
                Some(kind) => *kind == run.kind,
            });
        if let Some(run) = candidate {
            entity.canonical_name = Some(run.text.clone());
            if entity.kind.is_none() {
                entity.kind = Some(run.kind.clone());
            }
        }
    }

    document.entities = Some(entity_set);
}

/// Maximal named-entity runs in a tokenization's first NER tagging.
fn named_runs(tokenization: &Tokenization) -> Vec<NamedRun> {
    let Some(tagging) = tokenization.tagging(TagKind::Ner) else {
        return Vec::new();
    };
    let mut runs = Vec::new();
    let mut current: Option<(String, Vec<usize>)> = None;
    let mut last_tag: Option<&str> = None;
    for tagged in &tagging.tags {
        if last_tag != Some(tagged.tag.as_str()) {
            last_tag = Some(tagged.tag.as_str());
            if let Some((tag, indices)) = current.take() {
                runs.push(finish_run(tokenization, &tag, indices));
            }
        }
        if matches!(tagged.tag.as_str(), "PERSON" | "ORGANIZATION" | "LOCATION") {
            current
                .get_or_insert_with(|| (tagged.tag.clone(), Vec::new()))
                .1
                .push(tagged.token_index);
        }
    }
    if let Some((tag, indices)) = current.take() {
        runs.push(finish_run(tokenization, &tag, indices));
    }
    runs
}

fn finish_run(tokenization: &Tokenization, tag: &str, indices: Vec<usize>) -> NamedRun {
    let mut text = String::new();
    let mut last_end: Option<usize> = None;
    for &index in &indices {
        if let Some(token) = tokenization.tokens.get(index) {
            if let Some(end) = last_end {
                for _ in end..token.text_span.start {
                    text.push(' ');
                }
            }
            text.push_str(&token.text);
            last_end = Some(token.text_span.end);
        }
    }
    NamedRun {
        text,
        kind: EntityType::from_tag(tag),
        indices,
    }
}
