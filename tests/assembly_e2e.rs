//! End-to-end assembly of a small two-sentence document.

use graft::{
    AssemblyConfig, DocumentAssembler, Document, SourceDocument, SourceSentence, SourceToken,
    TreeNode,
};

fn token(text: &str) -> SourceToken {
    SourceToken::new(text, text.to_lowercase(), "NN", "O")
}

fn sentence_with_tree(words: &[&str]) -> SourceSentence {
    let mut sentence = SourceSentence::new(words.iter().map(|w| token(w)).collect());
    // Trivial one-leaf-per-token tree under one root.
    sentence.tree = Some(TreeNode::internal(
        "S",
        words.iter().map(|w| TreeNode::leaf(*w)).collect(),
    ));
    sentence
}

fn dog_bites_man() -> SourceDocument {
    SourceDocument::new(
        "dog-bites-man",
        vec![
            sentence_with_tree(&["Dogs", "bite", "."]),
            sentence_with_tree(&["Man", "bites", "dog", "."]),
        ],
    )
}

fn assemble() -> Document {
    DocumentAssembler::default().assemble(&dog_bites_man()).unwrap()
}

#[test]
fn two_sentences_yield_two_tokenizations() {
    let document = assemble();
    let counts: Vec<usize> = document.tokenizations().map(|t| t.token_count()).collect();
    assert_eq!(counts, vec![3, 4]);
}

#[test]
fn flattened_text_and_sentence_spans_agree() {
    let document = assemble();
    assert_eq!(document.text, "Dogs bite .\nMan bites dog .\n");

    let spans: Vec<_> = document
        .section
        .sentences
        .iter()
        .map(|s| s.text_span)
        .collect();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans[0].end, "Dogs bite .".len());
    // The second sentence starts exactly one character past the first
    // sentence's flattened-text end.
    assert_eq!(spans[1].start, spans[0].end + 1);
    assert_eq!(spans[1].end, spans[1].start + "Man bites dog .".len());
    assert!(!spans[0].overlaps(&spans[1]));

    // Spans slice the document text exactly.
    for (span, expected) in spans.iter().zip(["Dogs bite .", "Man bites dog ."]) {
        assert_eq!(&document.text[span.range()], expected);
    }
}

#[test]
fn parse_leaf_counts_match_token_counts() {
    let document = assemble();
    let leaf_counts: Vec<usize> = document
        .tokenizations()
        .map(|t| t.parse.as_ref().expect("parse emitted").leaf_count())
        .collect();
    assert_eq!(leaf_counts, vec![3, 4]);
}

#[test]
fn mention_and_entity_sets_are_attached() {
    let document = assemble();
    assert!(document.mentions.is_some());
    assert!(document.entities.is_some());
    assert!(document.entities.unwrap().entities.is_empty());
}

#[test]
fn document_round_trips_through_serde() {
    let document = assemble();
    let json = serde_json::to_string(&document).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(document, back);
}

#[test]
fn documents_share_no_state_but_ids() {
    let assembler = DocumentAssembler::new(AssemblyConfig::default());
    let first = assembler.assemble(&dog_bites_man()).unwrap();
    let second = assembler.assemble(&dog_bites_man()).unwrap();
    // Identical content apart from freshly minted ids.
    assert_eq!(first.text, second.text);
    let first_ids: Vec<_> = first.tokenizations().map(|t| t.id).collect();
    let second_ids: Vec<_> = second.tokenizations().map(|t| t.id).collect();
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
}
