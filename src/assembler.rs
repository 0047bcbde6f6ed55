//! Document assembly.
//!
//! [`DocumentAssembler`] drives the whole conversion for one document:
//! build the shell, span one passage section over the flattened text, walk
//! the sentences with a running offset cursor assembling one tokenization
//! each, then resolve coreference against the collected tokenizations and
//! attach the entity layer. Conversion is a pure function of its input
//! apart from id minting and the timestamp captured at construction, so
//! assembling documents concurrently is safe as long as the output sink
//! serializes writes.
//!
//! Recoverable trouble follows the configured [`FailurePolicy`]: a
//! sentence whose tree disagrees with its token count loses its parse (or
//! fails the document under `Abort`), and mention/chain errors degrade the
//! same way. Identifier and timestamp generation never fail.

use crate::config::{AssemblyConfig, FailurePolicy};
use crate::coref;
use crate::deps;
use crate::offset::{self, OffsetCursor};
use crate::source::{DepTriple, MentionChain, SourceDocument, SourceSentence};
use crate::tagging;
use crate::tree::{self, HeadFinder, RightmostHead};
use graft_core::{
    annotation_timestamp, AnnotationId, AnnotationMetadata, DependencyFlavor, DependencyParse,
    Document, EntityMentionSet, EntitySet, Error, Parse, Result, Section, SectionKind, Sentence,
    TagKind, TextSpan, Tokenization,
};

/// Assembles analyzed documents into annotation graphs.
pub struct DocumentAssembler {
    config: AssemblyConfig,
    head_finder: Box<dyn HeadFinder>,
    timestamp: i64,
}

impl DocumentAssembler {
    /// Create an assembler with the given configuration and the rightmost
    /// head finder. The annotation timestamp is captured once, here, so
    /// every layer of every document this assembler produces carries the
    /// same stamp.
    #[must_use]
    pub fn new(config: AssemblyConfig) -> Self {
        Self {
            config,
            head_finder: Box::new(RightmostHead),
            timestamp: annotation_timestamp(),
        }
    }

    /// Replace the head-selection capability.
    #[must_use]
    pub fn with_head_finder(mut self, finder: Box<dyn HeadFinder>) -> Self {
        self.head_finder = finder;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    fn metadata(&self, detail: Option<&str>) -> AnnotationMetadata {
        let metadata = AnnotationMetadata::new(self.config.tool.clone(), self.timestamp);
        match detail {
            Some(detail) => metadata.with_detail(detail),
            None => metadata,
        }
    }

    /// Assemble one document.
    ///
    /// Empty sentences are skipped (and logged), so they are neither
    /// spanned nor counted; coreference chains index into the assembled
    /// tokenizations. In raw-extraction mode only the shell with section
    /// and sentence spans is produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingOffset`] when trusted provenance spans are
    /// requested but a token carries no raw offsets, and any per-sentence
    /// or per-chain error under [`FailurePolicy::Abort`].
    pub fn assemble(&self, source: &SourceDocument) -> Result<Document> {
        let text = offset::flatten_document(&source.sentences);
        let mut cursor = OffsetCursor::new();
        let mut sentences = Vec::new();
        for (index, sentence) in source.sentences.iter().enumerate() {
            if sentence.is_empty() {
                log::warn!("skipping empty sentence {index} in document {}", source.id);
                continue;
            }
            let flattened = offset::flatten_sentence(sentence);
            let text_span = cursor.claim(flattened.chars().count());
            let tokenization = if self.config.raw_extraction_only {
                None
            } else {
                Some(self.convert_tokenization(sentence)?)
            };
            sentences.push(Sentence {
                id: AnnotationId::random(),
                text_span,
                tokenization,
            });
        }

        let section = Section {
            id: AnnotationId::random(),
            metadata: self.metadata(None),
            kind: SectionKind::Passage,
            text_span: TextSpan::new(0, text.chars().count()),
            sentences,
        };

        let (mentions, entities) = if self.config.raw_extraction_only {
            (None, None)
        } else {
            let tokenizations: Vec<&Tokenization> = section
                .sentences
                .iter()
                .filter_map(|s| s.tokenization.as_ref())
                .collect();
            let (mention_set, entity_set) =
                self.resolve_entities(&source.chains, &tokenizations)?;
            (Some(mention_set), Some(entity_set))
        };

        Ok(Document {
            id: source.id.clone(),
            text,
            kind: source.kind.clone(),
            metadata: self.metadata(None),
            section,
            mentions,
            entities,
        })
    }

    /// Assemble the tokenization for one non-empty sentence: tokens with
    /// spans, the three tag lists, the indexed parse, and one dependency
    /// parse per flavor.
    fn convert_tokenization(&self, sentence: &SourceSentence) -> Result<Tokenization> {
        let tokens = offset::build_tokens(sentence, &self.config)?;
        let taggings = [TagKind::Lemma, TagKind::Pos, TagKind::Ner]
            .into_iter()
            .map(|kind| tagging::token_tagging(kind, &sentence.tokens, self.metadata(None)))
            .collect();
        let parse = self.index_parse(sentence)?;
        let dependency_parses = self.dependency_parses(sentence);
        Ok(Tokenization {
            id: AnnotationId::random(),
            metadata: self.metadata(None),
            tokens,
            taggings,
            parse,
            dependency_parses,
        })
    }

    /// Index the sentence's constituency tree, if any.
    ///
    /// No tree: an explicit empty constituent list under
    /// `allow_empty_collections`, otherwise no parse. A leaf-count
    /// mismatch drops the parse with a warning, or fails the document
    /// under the abort policy.
    fn index_parse(&self, sentence: &SourceSentence) -> Result<Option<Parse>> {
        let Some(root) = &sentence.tree else {
            if self.config.allow_empty_collections {
                return Ok(Some(Parse {
                    id: AnnotationId::random(),
                    metadata: self.metadata(Some("constituency")),
                    constituents: Vec::new(),
                }));
            }
            log::debug!("no constituency tree supplied, omitting parse");
            return Ok(None);
        };
        match tree::index_constituents(root, sentence.tokens.len(), self.head_finder.as_ref()) {
            Ok(constituents) => Ok(Some(Parse {
                id: AnnotationId::random(),
                metadata: self.metadata(Some("constituency")),
                constituents,
            })),
            Err(err) if self.config.failure_policy == FailurePolicy::Degrade => {
                log::warn!("dropping parse: {err}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn dependency_parses(&self, sentence: &SourceSentence) -> Vec<DependencyParse> {
        DependencyFlavor::all()
            .into_iter()
            .filter_map(|flavor| {
                let triples = match flavor {
                    DependencyFlavor::Basic => &sentence.basic_deps,
                    DependencyFlavor::Collapsed => &sentence.collapsed_deps,
                    DependencyFlavor::CollapsedPropagated => &sentence.collapsed_propagated_deps,
                    _ => unreachable!("DependencyFlavor::all() yields only known flavors"),
                };
                self.dependency_parse(triples, flavor)
            })
            .collect()
    }

    /// Convert one flavor's triples. Empty input yields an explicit empty
    /// edge list under `allow_empty_collections`, otherwise no parse.
    fn dependency_parse(
        &self,
        triples: &[DepTriple],
        flavor: DependencyFlavor,
    ) -> Option<DependencyParse> {
        if triples.is_empty() && !self.config.allow_empty_collections {
            return None;
        }
        Some(DependencyParse {
            id: AnnotationId::random(),
            metadata: self.metadata(Some(flavor.as_str())),
            flavor,
            edges: deps::convert_edges(triples),
        })
    }

    /// Resolve all coreference chains against the collected tokenizations.
    fn resolve_entities(
        &self,
        chains: &[MentionChain],
        tokenizations: &[&Tokenization],
    ) -> Result<(EntityMentionSet, EntitySet)> {
        let mut mention_set = EntityMentionSet::new(self.metadata(Some("coreference")));
        let mut entity_set = EntitySet::new(self.metadata(Some("coreference")));
        for (index, chain) in chains.iter().enumerate() {
            match coref::convert_coref(chain, tokenizations, &mut mention_set, &self.config) {
                Ok(entity) => entity_set.entities.push(entity),
                Err(err) if self.config.failure_policy == FailurePolicy::Degrade => {
                    log::warn!("dropping coreference chain {index}: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok((mention_set, entity_set))
    }

    /// Attach analyzer layers to an already-assembled document.
    ///
    /// `sentences` must align one-to-one with the document's assembled
    /// sentences. Each sentence's token count and token-by-token surface
    /// text must agree with the existing tokenization; any disagreement is
    /// a structural mismatch. Fresh tag lists and dependency parses are
    /// appended; a supplied tree becomes the parse only when the
    /// tokenization has none yet (an existing parse is left in place with
    /// a warning).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralMismatch`] on sentence-count,
    /// token-count or token-text disagreement, or when a sentence has no
    /// tokenization to annotate.
    pub fn add_sentence_annotations(
        &self,
        document: &mut Document,
        sentences: &[SourceSentence],
    ) -> Result<()> {
        let assembled = &mut document.section.sentences;
        if assembled.len() != sentences.len() {
            return Err(Error::structural_mismatch(format!(
                "sentence counts differ: {} assembled, {} supplied",
                assembled.len(),
                sentences.len()
            )));
        }
        for (sentence, source) in assembled.iter_mut().zip(sentences) {
            let tokenization = sentence.tokenization.as_mut().ok_or_else(|| {
                Error::structural_mismatch("sentence has no tokenization to annotate")
            })?;
            check_matching_tokens(source, tokenization)?;
            for kind in [TagKind::Lemma, TagKind::Pos, TagKind::Ner] {
                tokenization
                    .taggings
                    .push(tagging::token_tagging(kind, &source.tokens, self.metadata(None)));
            }
            if source.tree.is_some() {
                if tokenization.parse.is_some() {
                    log::warn!(
                        "tokenization {} already has a parse, leaving it in place",
                        tokenization.id
                    );
                } else {
                    tokenization.parse = self.index_parse(source)?;
                }
            }
            tokenization
                .dependency_parses
                .extend(self.dependency_parses(source));
        }
        Ok(())
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(AssemblyConfig::default())
    }
}

/// Check that a source sentence and an assembled tokenization agree token
/// for token.
fn check_matching_tokens(source: &SourceSentence, tokenization: &Tokenization) -> Result<()> {
    if source.tokens.len() != tokenization.token_count() {
        return Err(Error::structural_mismatch(format!(
            "token counts differ: {} supplied, {} assembled",
            source.tokens.len(),
            tokenization.token_count()
        )));
    }
    for (supplied, assembled) in source.tokens.iter().zip(&tokenization.tokens) {
        if supplied.text != assembled.text {
            return Err(Error::structural_mismatch(format!(
                "token text differs at index {}: {:?} supplied, {:?} assembled",
                assembled.index, supplied.text, assembled.text
            )));
        }
    }
    Ok(())
}
