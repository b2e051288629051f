//! Candidate enumeration for `Personality::nodes`.
//!
//! A finder only narrows the search; the fit test has the final word.

use crate::graph::GraphStore;
use crate::vocab::rdf;
use crate::{Node, Triple};
use std::collections::BTreeSet;

/// How to enumerate the nodes that might fit a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finder {
    /// Every subject and object in the graph.
    Any,
    /// Subjects of `rdf:type` with one of the listed objects.
    Typed(&'static [&'static str]),
    /// Subjects of the given predicate.
    SubjectsOf(&'static str),
    /// Every subject in the graph.
    Subjects,
}

impl Finder {
    pub fn candidates(&self, graph: &dyn GraphStore) -> BTreeSet<Node> {
        match self {
            Finder::Any => graph
                .find(None, None, None)
                .into_iter()
                .flat_map(|t| [t.subject, t.object])
                .filter(|n| !n.is_literal())
                .collect(),
            Finder::Typed(types) => {
                let rdf_type = Node::iri(rdf::TYPE);
                types
                    .iter()
                    .flat_map(|ty| graph.find(None, Some(&rdf_type), Some(&Node::iri(*ty))))
                    .map(|t| t.subject)
                    .collect()
            }
            Finder::SubjectsOf(predicate) => graph
                .find(None, Some(&Node::iri(*predicate)), None)
                .into_iter()
                .map(|t| t.subject)
                .collect(),
            Finder::Subjects => graph
                .find(None, None, None)
                .into_iter()
                .map(|t: Triple| t.subject)
                .collect(),
        }
    }
}
