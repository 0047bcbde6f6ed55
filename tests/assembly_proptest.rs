//! Property-based tests for assembly invariants.
//!
//! These verify the offset recurrence and the constituent indexing
//! invariants for arbitrary inputs, not just the shapes the unit tests
//! pick.

use graft::{
    extract_token_ref_sequence, AnnotationId, DocumentAssembler, SourceDocument, SourceSentence,
    SourceToken, TreeNode,
};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn sentences() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(word(), 1..6), 1..6)
}

fn tree() -> impl Strategy<Value = TreeNode> {
    let leaf = word().prop_map(TreeNode::leaf);
    leaf.prop_recursive(4, 32, 4, |inner| {
        (prop::collection::vec(inner, 1..4), "[A-Z]{1,3}")
            .prop_map(|(children, tag)| TreeNode::internal(tag, children))
    })
}

fn source_sentence(words: &[String]) -> SourceSentence {
    SourceSentence::new(
        words
            .iter()
            .map(|w| SourceToken::new(w.clone(), w.clone(), "NN", "O"))
            .collect(),
    )
}

proptest! {
    #[test]
    fn sentence_offsets_follow_the_recurrence(word_lists in sentences()) {
        let source = SourceDocument::new(
            "doc0",
            word_lists.iter().map(|words| source_sentence(words)).collect(),
        );
        let document = DocumentAssembler::default().assemble(&source).unwrap();
        let spans: Vec<_> = document
            .section
            .sentences
            .iter()
            .map(|s| s.text_span)
            .collect();

        prop_assert_eq!(spans.len(), word_lists.len());
        for (i, (span, words)) in spans.iter().zip(&word_lists).enumerate() {
            // Span length is the flattened sentence length.
            let flattened_len: usize =
                words.iter().map(String::len).sum::<usize>() + words.len() - 1;
            prop_assert_eq!(span.len(), flattened_len);
            // offset(i+1) = offset(i) + len + 1, so spans never overlap.
            if let Some(next) = spans.get(i + 1) {
                prop_assert_eq!(next.start, span.end + 1);
                prop_assert!(!span.overlaps(next));
            }
        }
    }

    #[test]
    fn constituent_invariants_hold_for_any_tree_shape(root in tree()) {
        let token_count = root.leaf_count();
        let words: Vec<String> = (0..token_count).map(|i| format!("w{i}")).collect();
        let mut sentence = source_sentence(&words);
        sentence.tree = Some(root);
        let document = DocumentAssembler::default()
            .assemble(&SourceDocument::new("doc0", vec![sentence]))
            .unwrap();
        let tokenization = document.tokenizations().next().unwrap();
        let parse = tokenization.parse.as_ref().expect("matching tree parses");

        // Exactly one leaf per token.
        prop_assert_eq!(parse.leaf_count(), token_count);

        // Pre-order ids: unique, equal to list position, parents before
        // children.
        for (position, constituent) in parse.constituents.iter().enumerate() {
            prop_assert_eq!(constituent.id, position);
            for &child in &constituent.children {
                prop_assert!(child > constituent.id);
            }
        }

        // Spans concatenate gap-free across children; heads in range.
        for constituent in &parse.constituents {
            if constituent.is_leaf() {
                prop_assert_eq!(constituent.span.width(), 1);
                prop_assert!(constituent.head_child.is_none());
                continue;
            }
            let head = constituent.head_child.expect("internal nodes have heads");
            prop_assert!(head < constituent.children.len());
            let mut boundary = constituent.span.left;
            for &child_id in &constituent.children {
                let child = parse.constituent(child_id).unwrap();
                prop_assert_eq!(child.span.left, boundary);
                boundary = child.span.right;
            }
            prop_assert_eq!(boundary, constituent.span.right);
        }
    }

    #[test]
    fn token_ref_extraction_total_for_ordered_spans(
        left in 0usize..20,
        width in 0usize..20,
        anchor in proptest::option::of(0usize..40),
    ) {
        let right = left + width;
        let seq = extract_token_ref_sequence(left, right, anchor, AnnotationId::random()).unwrap();
        let expected: Vec<usize> = (left..right).collect();
        prop_assert_eq!(&seq.indices, &expected);
        match (width, anchor) {
            // Empty spans keep the anchor verbatim.
            (0, a) => prop_assert_eq!(seq.anchor, a),
            // Otherwise only in-range anchors survive.
            (_, Some(a)) if (left..right).contains(&a) => {
                prop_assert_eq!(seq.anchor, Some(a));
            }
            _ => prop_assert!(seq.anchor.is_none()),
        }
    }

    #[test]
    fn inverted_spans_always_rejected(left in 1usize..30, slack in 1usize..10) {
        // right < left by construction.
        let right = left.saturating_sub(slack);
        let result = extract_token_ref_sequence(left, right, None, AnnotationId::random());
        prop_assert!(result.is_err());
    }
}
