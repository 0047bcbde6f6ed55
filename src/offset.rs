//! Character-offset tracking over flattened text.
//!
//! The flattened document text is reconstructed from the tokens: sentence
//! tokens joined by one space, and one newline after every sentence. All
//! sentence and token spans point into this reconstruction, which makes
//! them exact by construction — the running cursor for sentence `i+1`
//! starts exactly one character (the newline) past the end of sentence
//! `i`.
//!
//! Provenance spans are the exception: they point back into the source
//! material and are recorded only to document where a token came from.
//! In trusted mode they come verbatim from the analyzer's raw offsets; in
//! reconstructed mode they mirror the flattened-text span.

use crate::config::AssemblyConfig;
use crate::source::{SourceSentence, SourceToken};
use graft_core::{Error, Result, TextSpan, Token};

/// Flattened text of one sentence: tokens joined by one space.
#[must_use]
pub fn flatten_sentence(sentence: &SourceSentence) -> String {
    let mut text = String::new();
    for (i, token) in sentence.tokens.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&token.text);
    }
    text
}

/// Flattened text of a whole document: one newline after every non-empty
/// sentence. Empty sentences contribute nothing, matching the assembler's
/// skip rule.
#[must_use]
pub fn flatten_document(sentences: &[SourceSentence]) -> String {
    let mut text = String::new();
    for sentence in sentences.iter().filter(|s| !s.is_empty()) {
        text.push_str(&flatten_sentence(sentence));
        text.push('\n');
    }
    text
}

/// Running cursor over flattened document text.
///
/// Each claimed span starts at the cursor; the cursor then skips one
/// character for the sentence-terminating newline.
#[derive(Debug, Clone, Default)]
pub struct OffsetCursor {
    next: usize,
}

impl OffsetCursor {
    /// Create a cursor at offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a span of `len` characters and advance past its newline.
    pub fn claim(&mut self, len: usize) -> TextSpan {
        let span = TextSpan::new(self.next, self.next + len);
        self.next = span.end + 1;
        span
    }

    /// Offset the next claim would start at.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.next
    }
}

/// Build the [`Token`] list for one sentence, with spans relative to the
/// sentence's flattened text.
///
/// Provenance spans follow the configuration: with
/// `record_provenance_spans` unset they are omitted; set, they come from
/// the analyzer's raw offsets under `trust_source_offsets` (a token
/// without raw offsets is a [`Error::MissingOffset`]), otherwise they
/// mirror the reconstructed span.
///
/// # Errors
///
/// Returns [`Error::MissingOffset`] when trusted provenance is requested
/// and a token carries no raw offsets.
pub fn build_tokens(sentence: &SourceSentence, config: &AssemblyConfig) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(sentence.tokens.len());
    let mut offset = 0usize;
    for (index, source) in sentence.tokens.iter().enumerate() {
        let text_span = TextSpan::new(offset, offset + source.text.chars().count());
        let raw_span = provenance_span(source, index, text_span, config)?;
        tokens.push(Token {
            index,
            text: source.text.clone(),
            text_span,
            raw_span,
        });
        offset = text_span.end + 1;
    }
    Ok(tokens)
}

fn provenance_span(
    source: &SourceToken,
    index: usize,
    reconstructed: TextSpan,
    config: &AssemblyConfig,
) -> Result<Option<TextSpan>> {
    if !config.record_provenance_spans {
        return Ok(None);
    }
    if config.trust_source_offsets {
        let (start, end) = source.raw_span.ok_or_else(|| {
            Error::missing_offset(format!(
                "provenance span requested for token {index} ({:?}) but no source offset is available",
                source.text
            ))
        })?;
        return TextSpan::checked(start, end).map(Some);
    }
    Ok(Some(reconstructed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> SourceToken {
        SourceToken::new(text, text, "NN", "O")
    }

    fn sentence(words: &[&str]) -> SourceSentence {
        SourceSentence::new(words.iter().map(|w| token(w)).collect())
    }

    #[test]
    fn sentence_flattens_with_single_spaces() {
        assert_eq!(
            flatten_sentence(&sentence(&["Dogs", "bite", "."])),
            "Dogs bite ."
        );
        assert_eq!(flatten_sentence(&sentence(&[])), "");
    }

    #[test]
    fn document_flattens_with_newline_per_sentence() {
        let text = flatten_document(&[sentence(&["Dogs", "bite", "."]), sentence(&["Ouch"])]);
        assert_eq!(text, "Dogs bite .\nOuch\n");
    }

    #[test]
    fn document_flattening_skips_empty_sentences() {
        let text = flatten_document(&[sentence(&[]), sentence(&["Ouch"]), sentence(&[])]);
        assert_eq!(text, "Ouch\n");
    }

    #[test]
    fn cursor_advances_one_past_each_span() {
        let mut cursor = OffsetCursor::new();
        let first = cursor.claim(11);
        let second = cursor.claim(4);
        assert_eq!(first, TextSpan::new(0, 11));
        assert_eq!(second, TextSpan::new(12, 16));
        assert!(!first.overlaps(&second));
        assert_eq!(cursor.position(), 17);
    }

    #[test]
    fn token_spans_are_sentence_relative() {
        let config = AssemblyConfig::default();
        let tokens = build_tokens(&sentence(&["Man", "bites", "dog", "."]), &config).unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].text_span, TextSpan::new(0, 3));
        assert_eq!(tokens[1].text_span, TextSpan::new(4, 9));
        assert_eq!(tokens[3].text_span, TextSpan::new(14, 15));
        assert!(tokens.iter().all(|t| t.raw_span.is_none()));
    }

    #[test]
    fn reconstructed_provenance_mirrors_text_span() {
        let config = AssemblyConfig::new().record_provenance_spans(true);
        let tokens = build_tokens(&sentence(&["Dogs", "bite"]), &config).unwrap();
        assert_eq!(tokens[1].raw_span, Some(tokens[1].text_span));
    }

    #[test]
    fn trusted_provenance_uses_source_offsets() {
        let config = AssemblyConfig::new()
            .record_provenance_spans(true)
            .trust_source_offsets(true);
        let mut sent = sentence(&["Dogs"]);
        sent.tokens[0] = sent.tokens[0].clone().with_raw_span(100, 104);
        let tokens = build_tokens(&sent, &config).unwrap();
        assert_eq!(tokens[0].raw_span, Some(TextSpan::new(100, 104)));
    }

    #[test]
    fn trusted_provenance_without_offsets_fails() {
        let config = AssemblyConfig::new()
            .record_provenance_spans(true)
            .trust_source_offsets(true);
        let err = build_tokens(&sentence(&["Dogs"]), &config).unwrap_err();
        assert!(matches!(err, graft_core::Error::MissingOffset(_)));
    }
}
