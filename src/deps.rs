//! Dependency edge conversion.
//!
//! One edge per input triple, per grammar flavor, input trusted: the
//! converter performs no tree or cycle validation. The only semantic rule
//! is the root encoding — a missing governor marks a root dependent, which
//! keeps a genuine governor at token index 0 unambiguous.

use crate::source::DepTriple;
use graft_core::Dependency;

/// Convert one flavor's triples into an edge list.
#[must_use]
pub fn convert_edges(triples: &[DepTriple]) -> Vec<Dependency> {
    triples
        .iter()
        .map(|t| Dependency {
            dependent: t.dependent,
            governor: t.governor,
            relation: t.relation.clone(),
        })
        .collect()
}
