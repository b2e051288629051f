//! # Validation Tier Tests (T0-T5)
//!
//! End-to-end scenarios through the public API.
//!
//! ## Tiers
//! - T0: View Resolution
//! - T1: Annotation Reading
//! - T2: Error Isolation
//! - T3: Round Trip
//! - T4: Cache Coherence and Guards
//! - T5: Normalization

use ontoview_core::vocab::{owl, rdf, rdfs, xsd};
use ontoview_core::{
    Annotation, AnnotationSubject, AnnotationValue, Axiom, AxiomBody, AxiomType, ClassExpression,
    Entity, EntityKind, Graph, GraphStore, Individual, InternalModel, Literal, ModelConfig, Node,
    ObjectPropertyExpression, OntError, Personality, QueryView, ReadSettings, RecursionEliminator,
    Triple, View, Witnessed,
};
use std::collections::BTreeSet;

fn ex(local: &str) -> String {
    format!("http://example.org/{}", local)
}

fn node(local: &str) -> Node {
    Node::iri(ex(local))
}

fn t(s: Node, p: &str, o: Node) -> Triple {
    Triple::new(s, Node::iri(p), o)
}

fn class(local: &str) -> ClassExpression {
    ClassExpression::class(ex(local))
}

fn declaration(kind: EntityKind, local: &str) -> Axiom {
    Axiom::new(AxiomBody::Declaration(Entity::new(kind, ex(local))))
}

fn values(model: &mut InternalModel<Graph>) -> BTreeSet<Axiom> {
    model
        .all_axioms()
        .expect("readable")
        .iter()
        .map(|o| o.value().clone())
        .collect()
}

// =============================================================================
// TIER T0: VIEW RESOLUTION
// =============================================================================

mod t0_view_resolution {
    use super::*;

    /// T0.1: A blank node typed by a declared class is an anonymous individual.
    #[test]
    fn blank_instance_of_declared_class() {
        let mut graph = Graph::new();
        graph.add(t(node("C"), rdf::TYPE, Node::iri(owl::CLASS)));
        graph.add(t(Node::blank("b"), rdf::TYPE, node("C")));
        let personality = Personality::default();
        assert!(personality.test(&Node::blank("b"), View::AnonymousIndividual, &graph));
        assert!(personality.test(&Node::blank("b"), View::Individual, &graph));
    }

    /// T0.2: A blank `owl:AllDifferent` node is not an individual.
    #[test]
    fn all_different_node_is_not_an_individual() {
        let mut graph = Graph::new();
        graph.add(t(Node::blank("b2"), rdf::TYPE, Node::iri(owl::ALL_DIFFERENT)));
        let personality = Personality::default();
        assert!(!personality.test(&Node::blank("b2"), View::AnonymousIndividual, &graph));
    }

    /// T0.3: Failed conversions name the node and the view.
    #[test]
    fn conversion_failure_is_recoverable() {
        let graph = Graph::new();
        let err = Personality::default()
            .as_view(&node("nothing"), View::Class, &graph)
            .expect_err("undeclared");
        assert!(matches!(err, OntError::Conversion { view: View::Class, .. }));
        assert!(err.is_recoverable());
    }
}

// =============================================================================
// TIER T1: ANNOTATION READING
// =============================================================================

mod t1_annotation_reading {
    use super::*;

    fn commented_class() -> Graph {
        Graph::from_triples([
            t(node("C"), rdf::TYPE, Node::iri(owl::CLASS)),
            t(node("C"), rdfs::COMMENT, Node::literal("x")),
        ])
    }

    /// T1.1: With annotation axioms on, the comment is its own axiom.
    #[test]
    fn comment_is_separate_assertion() {
        let mut model = InternalModel::new(commented_class(), ModelConfig::default());
        let expected = BTreeSet::from([
            declaration(EntityKind::Class, "C"),
            Axiom::new(AxiomBody::AnnotationAssertion {
                property: rdfs::COMMENT.to_string(),
                subject: AnnotationSubject::Iri(ex("C")),
                value: AnnotationValue::Literal(Literal::plain("x")),
            }),
        ]);
        assert_eq!(values(&mut model), expected);
    }

    /// T1.2: With annotation axioms off, the comment annotates the declaration.
    #[test]
    fn comment_folds_into_declaration() {
        let config = ModelConfig::default()
            .with_settings(ReadSettings::default().with_read_annotation_axioms(false));
        let mut model = InternalModel::new(commented_class(), config);
        let expected = declaration(EntityKind::Class, "C")
            .with_annotations([Annotation::literal(rdfs::COMMENT, "x")]);
        assert_eq!(values(&mut model), BTreeSet::from([expected]));
    }

    /// T1.3: Repeated bulk annotations merge or split per configuration.
    #[test]
    fn repeated_bulk_annotations() {
        let base = Axiom::new(AxiomBody::SubClassOf {
            sub: class("A"),
            sup: class("B"),
        });
        let mut writer = InternalModel::new(Graph::new(), ModelConfig::default());
        for text in ["one", "two"] {
            writer
                .add(base.clone().with_annotations([Annotation::literal(rdfs::COMMENT, text)]))
                .expect("add");
        }
        let graph = writer.into_graph();

        let mut merged = InternalModel::new(graph.clone(), ModelConfig::default());
        let read = merged.axioms(AxiomType::SubClassOf).expect("readable");
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].value().annotations.len(), 2);

        let config = ModelConfig::default()
            .with_settings(ReadSettings::default().with_split_axiom_annotations(true));
        let mut split = InternalModel::new(graph, config);
        assert_eq!(split.axioms(AxiomType::SubClassOf).expect("readable").len(), 2);
    }
}

// =============================================================================
// TIER T2: ERROR ISOLATION
// =============================================================================

mod t2_error_isolation {
    use super::*;

    /// `A subClassOf [onProperty undeclared; someValuesFrom A]` plus a
    /// healthy `B subClassOf C`.
    fn broken_graph() -> (Graph, Triple) {
        let r = Node::blank("r");
        let broken = t(node("A"), rdfs::SUB_CLASS_OF, r.clone());
        let graph = Graph::from_triples([
            t(node("A"), rdf::TYPE, Node::iri(owl::CLASS)),
            t(node("B"), rdf::TYPE, Node::iri(owl::CLASS)),
            t(node("C"), rdf::TYPE, Node::iri(owl::CLASS)),
            t(r.clone(), rdf::TYPE, Node::iri(owl::RESTRICTION)),
            t(r.clone(), owl::ON_PROPERTY, node("undeclared")),
            t(r, owl::SOME_VALUES_FROM, node("A")),
            broken.clone(),
            t(node("B"), rdfs::SUB_CLASS_OF, node("C")),
        ]);
        (graph, broken)
    }

    /// T2.1: Without tolerance the failure names the offending statement.
    #[test]
    fn strict_read_reports_statement() {
        let (graph, broken) = broken_graph();
        let mut model = InternalModel::new(graph, ModelConfig::default());
        let err = model.axioms(AxiomType::SubClassOf).expect_err("broken");
        assert!(matches!(&err, OntError::Decode { triple, .. } if *triple == broken));
        assert!(err.is_recoverable());
    }

    /// T2.2: With tolerance the rest of the shape is still read.
    #[test]
    fn tolerant_read_skips_statement() {
        let (graph, _) = broken_graph();
        let config = ModelConfig::default()
            .with_settings(ReadSettings::default().with_ignore_axiom_read_errors(true));
        let mut model = InternalModel::new(graph, config);
        let read: Vec<Axiom> = model
            .axioms(AxiomType::SubClassOf)
            .expect("tolerant")
            .iter()
            .map(|o| o.value().clone())
            .collect();
        assert_eq!(
            read,
            vec![Axiom::new(AxiomBody::SubClassOf {
                sub: class("B"),
                sup: class("C"),
            })]
        );
    }

    /// T2.3: Normalization repairs the missing declaration.
    #[test]
    fn normalization_makes_statement_readable() {
        let (graph, _) = broken_graph();
        let mut model = InternalModel::new(graph, ModelConfig::default());
        let report = model.normalize().expect("normalize");
        assert!(report.changes() > 0);
        assert!(report.is_clean());
        let repaired = Axiom::new(AxiomBody::SubClassOf {
            sub: class("A"),
            sup: ClassExpression::ObjectSomeValuesFrom(
                ObjectPropertyExpression::named(ex("undeclared")),
                Box::new(class("A")),
            ),
        });
        assert!(model.contains(&repaired).expect("readable"));
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("readable").len(), 2);
    }
}

// =============================================================================
// TIER T3: ROUND TRIP
// =============================================================================

mod t3_round_trip {
    use super::*;

    fn axioms() -> Vec<Axiom> {
        let p = ObjectPropertyExpression::named(ex("p"));
        vec![
            Axiom::new(AxiomBody::SubClassOf {
                sub: class("A"),
                sup: ClassExpression::ObjectSomeValuesFrom(p.clone(), Box::new(class("B"))),
            }),
            Axiom::new(AxiomBody::EquivalentClasses(BTreeSet::from([
                class("C"),
                ClassExpression::ObjectUnionOf(BTreeSet::from([class("A"), class("B")])),
            ]))),
            Axiom::new(AxiomBody::DisjointClasses(BTreeSet::from([
                class("A"),
                class("B"),
                class("C"),
            ]))),
            Axiom::new(AxiomBody::ClassAssertion {
                class: class("A"),
                individual: Individual::named(ex("i")),
            }),
            Axiom::new(AxiomBody::ObjectPropertyAssertion {
                property: p.clone(),
                subject: Individual::named(ex("i")),
                object: Individual::named(ex("j")),
            }),
            Axiom::new(AxiomBody::DataPropertyAssertion {
                property: ex("d"),
                subject: Individual::named(ex("i")),
                value: Literal::typed("42", xsd::INTEGER),
            }),
            Axiom::new(AxiomBody::ObjectPropertyDomain {
                property: p,
                domain: class("A"),
            }),
            Axiom::new(AxiomBody::SubClassOf {
                sub: class("B"),
                sup: class("C"),
            })
            .with_annotations([Annotation::literal(rdfs::COMMENT, "why")]),
            Axiom::new(AxiomBody::AnnotationAssertion {
                property: rdfs::LABEL.to_string(),
                subject: AnnotationSubject::Iri(ex("A")),
                value: AnnotationValue::Literal(Literal::lang("Apple", "en")),
            }),
        ]
    }

    fn implicit_declarations() -> Vec<Axiom> {
        vec![
            declaration(EntityKind::Class, "A"),
            declaration(EntityKind::Class, "B"),
            declaration(EntityKind::Class, "C"),
            declaration(EntityKind::ObjectProperty, "p"),
            declaration(EntityKind::DataProperty, "d"),
            declaration(EntityKind::NamedIndividual, "i"),
            declaration(EntityKind::NamedIndividual, "j"),
        ]
    }

    /// T3.1: Decoding an encoded graph yields the encoded axioms.
    #[test]
    fn encoded_axioms_decode_unchanged() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        for axiom in axioms() {
            model.add(axiom).expect("encodable");
        }
        let mut fresh = InternalModel::new(model.into_graph(), ModelConfig::default());
        let expected: BTreeSet<Axiom> = axioms().into_iter().chain(implicit_declarations()).collect();
        assert_eq!(values(&mut fresh), expected);
    }

    /// T3.2: Decoding does not depend on the order shapes are read in.
    #[test]
    fn shape_order_is_irrelevant() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        for axiom in axioms() {
            model.add(axiom).expect("encodable");
        }
        let graph = model.into_graph();
        let forward = values(&mut InternalModel::new(graph.clone(), ModelConfig::default()));
        let mut backward_model = InternalModel::new(graph, ModelConfig::default());
        let mut backward = BTreeSet::new();
        for ty in AxiomType::ALL.into_iter().rev() {
            for object in backward_model.axioms(ty).expect("readable") {
                backward.insert(object.value().clone());
            }
        }
        assert_eq!(forward, backward);
    }

    /// T3.3: Removing everything that was added empties the graph of axioms.
    #[test]
    fn remove_all_leaves_only_declarations() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        for axiom in axioms() {
            model.add(axiom).expect("encodable");
        }
        for axiom in axioms() {
            assert!(model.remove(&axiom).expect("removable"));
        }
        let left = values(&mut model);
        assert_eq!(left, implicit_declarations().into_iter().collect());
        assert_eq!(model.graph().size(), implicit_declarations().len());
    }
}

// =============================================================================
// TIER T4: CACHE COHERENCE AND GUARDS
// =============================================================================

mod t4_cache_coherence {
    use super::*;

    fn member(class_name: &str, label: &str) -> Axiom {
        Axiom::new(AxiomBody::ClassAssertion {
            class: class(class_name),
            individual: Individual::Anonymous(label.to_string()),
        })
    }

    /// T4.1: get after add returns the value; get after remove returns none.
    #[test]
    fn add_get_remove() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        let axiom = Axiom::new(AxiomBody::SubClassOf {
            sub: class("A"),
            sup: class("B"),
        });
        model.add(axiom.clone()).expect("add");
        let found = model.get(&axiom).expect("get").expect("present");
        assert_eq!(found.value(), &axiom);
        assert!(model.remove(&axiom).expect("remove"));
        assert!(model.get(&axiom).expect("get").is_none());
    }

    /// T4.2: The last class assertion of an anonymous individual stays.
    #[test]
    fn anonymous_individual_guard() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        let first = member("C", "b");
        let second = member("D", "b");
        model.add(first.clone()).expect("add");
        model.add(second.clone()).expect("add");

        assert!(model.remove(&first).expect("two assertions"));
        assert!(matches!(model.remove(&second), Err(OntError::IllegalState(_))));
        assert!(model.contains(&second).expect("readable"));
    }

    /// T4.3: Reads observe every write made through the model.
    #[test]
    fn loaded_maps_follow_writes() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        assert!(model.axioms(AxiomType::Declaration).expect("readable").is_empty());
        model.add(declaration(EntityKind::Class, "A")).expect("add");
        assert_eq!(model.axioms(AxiomType::Declaration).expect("readable").len(), 1);
        model
            .add(Axiom::new(AxiomBody::SubClassOf {
                sub: class("A"),
                sup: class("B"),
            }))
            .expect("add");
        assert_eq!(model.axioms(AxiomType::Declaration).expect("readable").len(), 2);
        assert_eq!(model.entities(EntityKind::Class).expect("readable").len(), 2);
    }

    /// T4.4: An axiom stated both pairwise and as a members list is removed
    /// in both forms, loaded or not.
    #[test]
    fn doubly_stated_axiom_is_removed_whole() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        for c in ["A", "B"] {
            personality.declare(&node(c), View::Class, &mut graph).expect("declare");
        }
        graph.add(t(node("A"), owl::DISJOINT_WITH, node("B")));
        let (x, first, second) = (Node::blank("x"), Node::blank("l0"), Node::blank("l1"));
        graph.add(t(x.clone(), rdf::TYPE, Node::iri(owl::ALL_DISJOINT_CLASSES)));
        graph.add(t(x, owl::MEMBERS, first.clone()));
        graph.add(t(first.clone(), rdf::FIRST, node("A")));
        graph.add(t(first, rdf::REST, second.clone()));
        graph.add(t(second.clone(), rdf::FIRST, node("B")));
        graph.add(t(second, rdf::REST, Node::iri(rdf::NIL)));
        let axiom = Axiom::new(AxiomBody::DisjointClasses(BTreeSet::from([class("A"), class("B")])));

        for preload in [false, true] {
            let mut model = InternalModel::new(graph.clone(), ModelConfig::default());
            if preload {
                model.axioms(AxiomType::DisjointClasses).expect("readable");
            }
            let found = model.get(&axiom).expect("get").expect("present");
            assert_eq!(found.triples().len(), 7);
            assert!(model.remove(&axiom).expect("remove"));
            assert!(!model.contains(&axiom).expect("contains"));
            model.clear_cache();
            assert!(model.axioms(AxiomType::DisjointClasses).expect("readable").is_empty());
        }
    }

    /// T4.5: A statement that still witnesses another axiom is kept, and the
    /// axiom it states stays readable.
    #[test]
    fn protected_statement_is_not_removed() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        for p in ["p", "q"] {
            personality.declare(&node(p), View::ObjectProperty, &mut graph).expect("declare");
            personality.declare(&node(p), View::DataProperty, &mut graph).expect("declare");
        }
        let statement = t(node("p"), rdfs::SUB_PROPERTY_OF, node("q"));
        graph.add(statement.clone());
        let mut model = InternalModel::new(graph, ModelConfig::default());
        assert_eq!(model.axioms(AxiomType::SubObjectPropertyOf).expect("readable").len(), 1);

        let axiom = Axiom::new(AxiomBody::SubObjectPropertyOf {
            sub: ObjectPropertyExpression::named(ex("p")),
            sup: ObjectPropertyExpression::named(ex("q")),
        });
        assert!(!model.remove(&axiom).expect("remove"));
        assert!(model.graph().contains(&statement));
        assert_eq!(model.axioms(AxiomType::SubObjectPropertyOf).expect("readable").len(), 1);
        assert!(model.contains(&axiom).expect("contains"));
    }
}

// =============================================================================
// TIER T5: NORMALIZATION
// =============================================================================

mod t5_normalization {
    use super::*;

    /// T5.1: Blank cycles are broken and a second run changes nothing.
    #[test]
    fn cycles_broken_once() {
        let mut graph = Graph::new();
        for (s, o) in [("x", "y"), ("y", "z"), ("z", "x")] {
            graph.add(t(Node::blank(s), rdf::REST, Node::blank(o)));
        }
        let mut model = InternalModel::new(graph, ModelConfig::default());
        let first = model.normalize().expect("normalize");
        assert_eq!(first.unhandled().len(), 1);
        assert!(RecursionEliminator::default()
            .find_cycles(&QueryView::new(model.graph()))
            .is_empty());
        let second = model.normalize().expect("normalize");
        assert_eq!(second.changes(), 0);
    }

    /// T5.2: A graph produced by encoding is already normal.
    #[test]
    fn encoded_graph_is_normal() {
        let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
        model
            .add(Axiom::new(AxiomBody::DisjointClasses(BTreeSet::from([
                class("A"),
                class("B"),
                class("C"),
            ]))))
            .expect("add");
        let report = model.normalize().expect("normalize");
        assert_eq!(report.changes(), 0);
        assert!(report.is_clean());
    }

    /// T5.3: Exceeding the cap rejects the graph.
    #[test]
    fn cap_is_fatal() {
        let mut graph = Graph::new();
        for i in 0..3 {
            let b = Node::blank(format!("c{}", i));
            graph.add(t(b.clone(), rdf::FIRST, b));
        }
        let err = ontoview_core::Transforms::empty()
            .with(RecursionEliminator::default().with_limit(2))
            .run(&mut graph)
            .expect_err("rejected");
        assert!(matches!(err, OntError::TooManyRecursions { .. }));
    }
}
