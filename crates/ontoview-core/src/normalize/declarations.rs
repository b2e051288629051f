//! Missing-declaration repair.
//!
//! Translators only read entities that are declared (or builtin). Graphs
//! from the wild often skip declarations, so this pass infers them from
//! usage: operands of class axioms are classes, the property of a
//! restriction takes its kind from the filler, and so on. RDFS classes are
//! rewritten as OWL classes.
//!
//! Inference is repeated until nothing new can be declared, so one run is
//! enough. Statements whose entities stay undecidable are reported.

use super::{QueryView, Transform, WriteView};
use crate::personality::{EntityKind, Personality};
use crate::vocab::{owl, rdf, rdfs};
use crate::{Node, OntError, Triple};
use std::collections::BTreeSet;
use std::fmt;

/// Adds the declarations a graph's usage implies.
#[derive(Clone)]
pub struct DeclarationTransform {
    personality: Personality,
}

impl DeclarationTransform {
    #[must_use]
    pub fn new(personality: &Personality) -> Self {
        Self {
            personality: personality.clone(),
        }
    }
}

impl fmt::Debug for DeclarationTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeclarationTransform")
    }
}

#[derive(Debug, Default)]
struct Plan {
    add: BTreeSet<Triple>,
    delete: BTreeSet<Triple>,
    unhandled: BTreeSet<Triple>,
}

impl Plan {
    fn has_edits(&self) -> bool {
        !self.add.is_empty() || !self.delete.is_empty()
    }

    fn declare(&mut self, node: &Node, kind: EntityKind) {
        self.add.insert(type_triple(node, kind.type_iri()));
    }
}

fn type_triple(node: &Node, type_iri: &str) -> Triple {
    Triple::new(node.clone(), Node::iri(rdf::TYPE), Node::iri(type_iri))
}

const CLASS_OPERANDS: [&str; 3] = [rdfs::SUB_CLASS_OF, owl::EQUIVALENT_CLASS, owl::DISJOINT_WITH];
const PROPERTY_OPERANDS: [&str; 2] = [rdfs::SUB_PROPERTY_OF, owl::EQUIVALENT_PROPERTY];
const PROPERTY_KINDS: [EntityKind; 3] = [
    EntityKind::ObjectProperty,
    EntityKind::DataProperty,
    EntityKind::AnnotationProperty,
];

impl DeclarationTransform {
    fn kind_of(&self, node: &Node, graph: &QueryView<'_>) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| self.personality.is_declared(node, *kind, graph.graph()))
    }

    /// A user IRI with no declaration of any kind.
    fn is_open(&self, node: &Node, graph: &QueryView<'_>) -> bool {
        node.as_iri()
            .is_some_and(|iri| !self.personality.reserved().is_reserved(iri))
            && self.kind_of(node, graph).is_none()
    }

    fn is_class_like(&self, node: &Node, graph: &QueryView<'_>) -> bool {
        match node {
            Node::Iri(_) => self.kind_of(node, graph) == Some(EntityKind::Class),
            Node::Blank(_) => {
                graph.graph().has_type(node, owl::CLASS) || graph.graph().has_type(node, owl::RESTRICTION)
            }
            Node::Literal(_) => false,
        }
    }

    fn is_datatype_like(&self, node: &Node, graph: &QueryView<'_>) -> bool {
        match node {
            Node::Iri(_) => self.kind_of(node, graph) == Some(EntityKind::Datatype),
            Node::Blank(_) => graph.graph().has_type(node, rdfs::DATATYPE),
            Node::Literal(_) => false,
        }
    }

    fn plan(&self, graph: &QueryView<'_>) -> Plan {
        let mut plan = Plan::default();
        self.plan_rdfs_classes(graph, &mut plan);
        self.plan_class_operands(graph, &mut plan);
        self.plan_property_operands(graph, &mut plan);
        self.plan_restrictions(graph, &mut plan);
        self.plan_predicates(graph, &mut plan);
        plan
    }

    fn plan_rdfs_classes(&self, graph: &QueryView<'_>, plan: &mut Plan) {
        let rdf_type = Node::iri(rdf::TYPE);
        for triple in graph.find(None, Some(&rdf_type), Some(&Node::iri(rdfs::CLASS))) {
            let reserved = triple
                .subject
                .as_iri()
                .is_none_or(|iri| self.personality.reserved().is_reserved(iri));
            if reserved {
                continue;
            }
            plan.declare(&triple.subject, EntityKind::Class);
            plan.delete.insert(triple);
        }
    }

    fn plan_class_operands(&self, graph: &QueryView<'_>, plan: &mut Plan) {
        for predicate in CLASS_OPERANDS {
            for triple in graph.find(None, Some(&Node::iri(predicate)), None) {
                for node in [&triple.subject, &triple.object] {
                    if self.is_open(node, graph) {
                        plan.declare(node, EntityKind::Class);
                    }
                }
            }
        }
        for predicate in [owl::COMPLEMENT_OF, rdf::TYPE] {
            for triple in graph.find(None, Some(&Node::iri(predicate)), None) {
                if self.is_open(&triple.object, graph) {
                    plan.declare(&triple.object, EntityKind::Class);
                }
            }
        }
    }

    fn plan_property_operands(&self, graph: &QueryView<'_>, plan: &mut Plan) {
        for triple in graph.find(None, Some(&Node::iri(owl::INVERSE_OF)), None) {
            for node in [&triple.subject, &triple.object] {
                if self.is_open(node, graph) {
                    plan.declare(node, EntityKind::ObjectProperty);
                }
            }
        }
        for triple in graph.find(None, Some(&Node::iri(owl::PROPERTY_CHAIN_AXIOM)), None) {
            if self.is_open(&triple.subject, graph) {
                plan.declare(&triple.subject, EntityKind::ObjectProperty);
            }
        }
        // Sub/equivalent properties share their kind.
        for predicate in PROPERTY_OPERANDS {
            for triple in graph.find(None, Some(&Node::iri(predicate)), None) {
                let property_kind = |node: &Node| {
                    self.kind_of(node, graph)
                        .filter(|kind| PROPERTY_KINDS.contains(kind))
                };
                let (a, b) = (&triple.subject, &triple.object);
                match (self.is_open(a, graph), self.is_open(b, graph)) {
                    (true, true) => {
                        plan.unhandled.insert(triple.clone());
                    }
                    (true, false) => match property_kind(b) {
                        Some(kind) => plan.declare(a, kind),
                        None => {
                            plan.unhandled.insert(triple.clone());
                        }
                    },
                    (false, true) => match property_kind(a) {
                        Some(kind) => plan.declare(b, kind),
                        None => {
                            plan.unhandled.insert(triple.clone());
                        }
                    },
                    (false, false) => {}
                }
            }
        }
    }

    fn plan_restrictions(&self, graph: &QueryView<'_>, plan: &mut Plan) {
        let store = graph.graph();
        for on_property in graph.find(None, Some(&Node::iri(owl::ON_PROPERTY)), None) {
            let r = &on_property.subject;
            let p = &on_property.object;

            if self.is_open(p, graph) {
                match self.restriction_kind(r, graph) {
                    Some(kind) => plan.declare(p, kind),
                    None => {
                        plan.unhandled.insert(on_property.clone());
                    }
                }
                continue;
            }

            // The property is known: its kind settles the filler.
            let filler_kind = match self.kind_of(p, graph) {
                Some(EntityKind::ObjectProperty) => EntityKind::Class,
                Some(EntityKind::DataProperty) => EntityKind::Datatype,
                _ => continue,
            };
            for predicate in [owl::SOME_VALUES_FROM, owl::ALL_VALUES_FROM] {
                for filler in store.objects(r, predicate) {
                    if self.is_open(&filler, graph) {
                        plan.declare(&filler, filler_kind);
                    }
                }
            }
        }
        for (predicate, kind) in [
            (owl::ON_CLASS, EntityKind::Class),
            (owl::ON_DATA_RANGE, EntityKind::Datatype),
        ] {
            for triple in graph.find(None, Some(&Node::iri(predicate)), None) {
                if self.is_open(&triple.object, graph) {
                    plan.declare(&triple.object, kind);
                }
            }
        }
    }

    /// Property kind implied by the rest of restriction `r`.
    fn restriction_kind(&self, r: &Node, graph: &QueryView<'_>) -> Option<EntityKind> {
        let store = graph.graph();
        if store.object(r, owl::HAS_SELF).is_some() || store.object(r, owl::ON_CLASS).is_some() {
            return Some(EntityKind::ObjectProperty);
        }
        if store.object(r, owl::ON_DATA_RANGE).is_some() {
            return Some(EntityKind::DataProperty);
        }
        if let Some(value) = store.object(r, owl::HAS_VALUE) {
            return Some(if value.is_literal() {
                EntityKind::DataProperty
            } else {
                EntityKind::ObjectProperty
            });
        }
        let filler = store
            .object(r, owl::SOME_VALUES_FROM)
            .or_else(|| store.object(r, owl::ALL_VALUES_FROM))?;
        if self.is_class_like(&filler, graph) {
            Some(EntityKind::ObjectProperty)
        } else if self.is_datatype_like(&filler, graph) {
            Some(EntityKind::DataProperty)
        } else {
            None
        }
    }

    /// Statements whose predicate is an undeclared user IRI could be
    /// annotation, object or data assertions; that cannot be decided here.
    fn plan_predicates(&self, graph: &QueryView<'_>, plan: &mut Plan) {
        let mut open = BTreeSet::new();
        let mut closed = BTreeSet::new();
        for triple in graph.find(None, None, None) {
            if closed.contains(&triple.predicate) {
                continue;
            }
            if open.contains(&triple.predicate) || self.is_open(&triple.predicate, graph) {
                open.insert(triple.predicate.clone());
                plan.unhandled.insert(triple);
            } else {
                closed.insert(triple.predicate);
            }
        }
    }
}

impl Transform for DeclarationTransform {
    fn name(&self) -> &'static str {
        "declarations"
    }

    fn applicable(&self, graph: &QueryView<'_>) -> bool {
        let plan = self.plan(graph);
        plan.has_edits() || !plan.unhandled.is_empty()
    }

    fn run(&self, graph: &mut WriteView<'_>) -> Result<BTreeSet<Triple>, OntError> {
        loop {
            let plan = self.plan(&graph.query());
            if !plan.has_edits() {
                return Ok(plan.unhandled);
            }
            for triple in &plan.delete {
                graph.delete(triple);
            }
            for triple in plan.add {
                graph.add(triple);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, GraphStore};

    fn ex(local: &str) -> Node {
        Node::iri(format!("http://example.org/{}", local))
    }

    fn t(s: Node, p: &str, o: Node) -> Triple {
        Triple::new(s, Node::iri(p), o)
    }

    fn run(graph: &mut Graph) -> BTreeSet<Triple> {
        let pass = DeclarationTransform::new(&Personality::default());
        let mut view = WriteView::new(graph);
        pass.run(&mut view).expect("run")
    }

    #[test]
    fn class_axiom_operands_become_classes() {
        let mut graph = Graph::new();
        graph.add(t(ex("A"), rdfs::SUB_CLASS_OF, ex("B")));
        assert!(run(&mut graph).is_empty());
        assert!(graph.has_type(&ex("A"), owl::CLASS));
        assert!(graph.has_type(&ex("B"), owl::CLASS));

        let pass = DeclarationTransform::new(&Personality::default());
        assert!(!pass.applicable(&QueryView::new(&graph)));
    }

    #[test]
    fn rdfs_class_is_rewritten() {
        let mut graph = Graph::new();
        graph.add(t(ex("A"), rdf::TYPE, Node::iri(rdfs::CLASS)));
        run(&mut graph);
        assert!(graph.has_type(&ex("A"), owl::CLASS));
        assert!(!graph.has_type(&ex("A"), rdfs::CLASS));
    }

    #[test]
    fn restriction_property_follows_filler() {
        let mut graph = Graph::new();
        let r = Node::blank("r");
        graph.add(t(ex("C"), rdf::TYPE, Node::iri(owl::CLASS)));
        graph.add(t(r.clone(), rdf::TYPE, Node::iri(owl::RESTRICTION)));
        graph.add(t(r.clone(), owl::ON_PROPERTY, ex("p")));
        graph.add(t(r.clone(), owl::SOME_VALUES_FROM, ex("C")));
        let s = Node::blank("s");
        graph.add(t(s.clone(), rdf::TYPE, Node::iri(owl::RESTRICTION)));
        graph.add(t(s.clone(), owl::ON_PROPERTY, ex("d")));
        graph.add(t(s, owl::HAS_VALUE, Node::literal("7")));

        assert!(run(&mut graph).is_empty());
        assert!(graph.has_type(&ex("p"), owl::OBJECT_PROPERTY));
        assert!(graph.has_type(&ex("d"), owl::DATATYPE_PROPERTY));
    }

    #[test]
    fn filler_is_settled_once_property_is_known() {
        let mut graph = Graph::new();
        let r = Node::blank("r");
        graph.add(t(r.clone(), owl::ON_PROPERTY, ex("p")));
        graph.add(t(r, owl::ALL_VALUES_FROM, ex("F")));
        graph.add(t(ex("p"), owl::INVERSE_OF, ex("q")));
        assert!(run(&mut graph).is_empty());
        assert!(graph.has_type(&ex("q"), owl::OBJECT_PROPERTY));
        assert!(graph.has_type(&ex("F"), owl::CLASS));
    }

    #[test]
    fn undeclared_predicate_is_reported() {
        let mut graph = Graph::new();
        let statement = t(ex("a"), "http://example.org/p", Node::literal("x"));
        graph.add(statement.clone());
        let unhandled = run(&mut graph);
        assert_eq!(unhandled, BTreeSet::from([statement]));
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn sub_property_inherits_kind() {
        let mut graph = Graph::new();
        graph.add(t(ex("q"), rdf::TYPE, Node::iri(owl::DATATYPE_PROPERTY)));
        graph.add(t(ex("p"), rdfs::SUB_PROPERTY_OF, ex("q")));
        assert!(run(&mut graph).is_empty());
        assert!(graph.has_type(&ex("p"), owl::DATATYPE_PROPERTY));
    }
}
