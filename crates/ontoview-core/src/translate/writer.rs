//! Triple writer used by every encoder.

use crate::axiom::Entity;
use crate::graph::GraphStore;
use crate::personality::{Builtins, EntityKind};
use crate::vocab::{rdf, swrl};
use crate::{Node, Triple};
use std::collections::BTreeSet;

/// Outcome of one encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Written {
    /// Every triple the axiom owns, whether or not it was already present.
    pub witnesses: BTreeSet<Triple>,
    /// The root statement, when the encoder named one.
    pub root: Option<Triple>,
    /// The graph changed.
    pub changed: bool,
    /// At least one implicit declaration was added.
    pub declared: bool,
}

/// Writes triples into a graph while recording them as witnesses.
///
/// Named entities the axiom mentions get an implicit declaration unless
/// they are builtins or already declared. Declarations belong to their own
/// `Declaration` axioms, so they are never witnesses here.
pub struct Writer<'g> {
    graph: &'g mut dyn GraphStore,
    builtins: Builtins,
    written: Written,
}

impl<'g> Writer<'g> {
    pub fn new(graph: &'g mut dyn GraphStore, personality: &crate::Personality) -> Self {
        Self {
            graph,
            builtins: personality.builtins().clone(),
            written: Written::default(),
        }
    }

    /// Assert `s p o` and record it as a witness.
    pub fn triple(&mut self, subject: Node, predicate: &str, object: Node) -> Triple {
        let triple = Triple::new(subject, Node::iri(predicate), object);
        if self.graph.add(triple.clone()) {
            self.written.changed = true;
        }
        self.written.witnesses.insert(triple.clone());
        triple
    }

    /// Like `triple`, and mark it as the root statement.
    pub fn root(&mut self, subject: Node, predicate: &str, object: Node) -> Triple {
        let triple = self.triple(subject, predicate, object);
        self.written.root = Some(triple.clone());
        triple
    }

    pub fn blank(&mut self) -> Node {
        self.graph.fresh_blank()
    }

    /// Write an RDF list and return its head (`rdf:nil` when empty).
    pub fn list(&mut self, items: Vec<Node>) -> Node {
        let mut head = Node::iri(rdf::NIL);
        for item in items.into_iter().rev() {
            let cell = self.blank();
            self.triple(cell.clone(), rdf::FIRST, item);
            self.triple(cell.clone(), rdf::REST, head);
            head = cell;
        }
        head
    }

    /// Declare `entity` unless it is a builtin or already declared.
    pub fn declare(&mut self, entity: &Entity) {
        if self.builtins.contains(entity.kind, &entity.iri) {
            return;
        }
        self.declare_type(entity.node(), entity.kind.type_iri());
    }

    pub fn declare_kind(&mut self, kind: EntityKind, iri: &str) {
        self.declare(&Entity::new(kind, iri));
    }

    pub fn declare_variable(&mut self, iri: &str) {
        self.declare_type(Node::iri(iri), swrl::VARIABLE);
    }

    fn declare_type(&mut self, node: Node, type_iri: &str) {
        let triple = Triple::new(node, Node::iri(rdf::TYPE), Node::iri(type_iri));
        if self.graph.add(triple) {
            self.written.changed = true;
            self.written.declared = true;
        }
    }

    pub fn finish(self) -> Written {
        self.written
    }
}
