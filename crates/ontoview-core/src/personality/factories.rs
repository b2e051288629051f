//! Standard view factories: fit tests, finders and makers.
//!
//! Fit tests are plain functions so a `ViewFactory` stays `Copy` and a
//! personality can be rebuilt without any allocation per view.

use super::{EntityKind, Finder, Personality, View, ViewFactory};
use crate::config::AnonymousIndividualPolicy;
use crate::graph::GraphStore;
use crate::vocab::{self, owl, rdf, rdfs, swrl};
use crate::{Node, Triple};
use std::collections::{BTreeMap, BTreeSet};

const CLASS_TYPES: &[&str] = &[owl::CLASS];
const DATATYPE_TYPES: &[&str] = &[rdfs::DATATYPE];
const OBJECT_PROPERTY_TYPES: &[&str] = &[owl::OBJECT_PROPERTY];
const DATA_PROPERTY_TYPES: &[&str] = &[owl::DATATYPE_PROPERTY];
const ANNOTATION_PROPERTY_TYPES: &[&str] = &[owl::ANNOTATION_PROPERTY];
const CLASS_EXPRESSION_TYPES: &[&str] = &[owl::CLASS, owl::RESTRICTION];
const VARIABLE_TYPES: &[&str] = &[swrl::VARIABLE];

/// Restriction predicates that, together with `owl:onProperty`, make a
/// restriction.
const RESTRICTION_PREDICATES: [&str; 10] = [
    owl::SOME_VALUES_FROM,
    owl::ALL_VALUES_FROM,
    owl::HAS_VALUE,
    owl::HAS_SELF,
    owl::CARDINALITY,
    owl::MIN_CARDINALITY,
    owl::MAX_CARDINALITY,
    owl::QUALIFIED_CARDINALITY,
    owl::MIN_QUALIFIED_CARDINALITY,
    owl::MAX_QUALIFIED_CARDINALITY,
];

const BOOLEAN_CLASS_PREDICATES: [&str; 4] = [
    owl::INTERSECTION_OF,
    owl::UNION_OF,
    owl::COMPLEMENT_OF,
    owl::ONE_OF,
];

const DATA_RANGE_PREDICATES: [&str; 5] = [
    owl::ONE_OF,
    owl::DATATYPE_COMPLEMENT_OF,
    owl::ON_DATATYPE,
    owl::INTERSECTION_OF,
    owl::UNION_OF,
];

/// Reserved predicates that still allow a blank subject to be an individual.
const SUBJECT_ALLOWED: [&str; 2] = [owl::SAME_AS, owl::DIFFERENT_FROM];

/// Reserved predicates that still allow a blank object to be an individual.
const OBJECT_ALLOWED: [&str; 10] = [
    owl::SAME_AS,
    owl::DIFFERENT_FROM,
    owl::SOURCE_INDIVIDUAL,
    owl::TARGET_INDIVIDUAL,
    owl::HAS_VALUE,
    owl::ANNOTATED_SOURCE,
    owl::ANNOTATED_TARGET,
    rdf::FIRST,
    swrl::ARGUMENT1,
    swrl::ARGUMENT2,
];

/// Object positions that place a node as an individual without any typing.
const INDIVIDUAL_OBJECT_SLOTS: [&str; 5] = [
    owl::HAS_VALUE,
    owl::SOURCE_INDIVIDUAL,
    owl::TARGET_INDIVIDUAL,
    swrl::ARGUMENT1,
    swrl::ARGUMENT2,
];

const FORBIDDEN_SUBJECT_KEY: &str = "individual.forbidden-subject-predicates";
const FORBIDDEN_OBJECT_KEY: &str = "individual.forbidden-object-predicates";

/// The factory table every builder starts from.
pub(super) fn standard() -> BTreeMap<View, ViewFactory> {
    BTreeMap::from([
        (
            View::Class,
            ViewFactory::new(Finder::Typed(CLASS_TYPES), class).with_maker(make_class),
        ),
        (
            View::Datatype,
            ViewFactory::new(Finder::Typed(DATATYPE_TYPES), datatype).with_maker(make_datatype),
        ),
        (
            View::ObjectProperty,
            ViewFactory::new(Finder::Typed(OBJECT_PROPERTY_TYPES), object_property)
                .with_maker(make_object_property),
        ),
        (
            View::DataProperty,
            ViewFactory::new(Finder::Typed(DATA_PROPERTY_TYPES), data_property)
                .with_maker(make_data_property),
        ),
        (
            View::AnnotationProperty,
            ViewFactory::new(Finder::Typed(ANNOTATION_PROPERTY_TYPES), annotation_property)
                .with_maker(make_annotation_property),
        ),
        (
            View::NamedIndividual,
            ViewFactory::new(Finder::SubjectsOf(rdf::TYPE), named_individual)
                .with_maker(make_named_individual),
        ),
        (
            View::AnonymousIndividual,
            ViewFactory::new(Finder::Any, anonymous_individual),
        ),
        (
            View::Individual,
            ViewFactory::new(Finder::Any, individual).with_maker(make_named_individual),
        ),
        (
            View::AnonymousClass,
            ViewFactory::new(Finder::Typed(CLASS_EXPRESSION_TYPES), anonymous_class),
        ),
        (
            View::ClassExpression,
            ViewFactory::new(Finder::Typed(CLASS_EXPRESSION_TYPES), class_expression)
                .with_maker(make_class),
        ),
        (
            View::InverseObjectProperty,
            ViewFactory::new(Finder::SubjectsOf(owl::INVERSE_OF), inverse_object_property),
        ),
        (
            View::ObjectPropertyExpression,
            ViewFactory::new(Finder::Any, object_property_expression)
                .with_maker(make_object_property),
        ),
        (
            View::DataRange,
            ViewFactory::new(Finder::Typed(DATATYPE_TYPES), data_range).with_maker(make_datatype),
        ),
        (
            View::FacetRestriction,
            ViewFactory::new(Finder::Subjects, facet_restriction),
        ),
        (
            View::SwrlVariable,
            ViewFactory::new(Finder::Typed(VARIABLE_TYPES), swrl_variable)
                .with_maker(make_swrl_variable),
        ),
        (
            View::SwrlAtom,
            ViewFactory::new(Finder::Typed(&vocab::SWRL_ATOM_TYPES), swrl_atom),
        ),
        (
            View::PunningConflict,
            ViewFactory::new(Finder::SubjectsOf(rdf::TYPE), punning_conflict),
        ),
    ])
}

// =============================================================================
// NAMED ENTITIES
// =============================================================================

/// Shared test for the six entity views.
fn named(kind: EntityKind, node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    let Some(iri) = node.as_iri() else {
        return false;
    };
    if p.builtins().contains(kind, iri) {
        return true;
    }
    if p.reserved().is_reserved(iri) {
        return false;
    }
    let declared = graph.has_type(node, kind.type_iri())
        || (kind == EntityKind::NamedIndividual && has_class_assertion(node, graph, p));
    declared && compatible(kind, node, graph, p)
}

/// No other declared kind of `node` is forbidden alongside `kind`.
fn compatible(kind: EntityKind, node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    EntityKind::ALL
        .into_iter()
        .filter(|other| *other != kind)
        .all(|other| p.punnings().allows(kind, other) || !graph.has_type(node, other.type_iri()))
}

fn has_class_assertion(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    graph
        .types(node)
        .iter()
        .any(|ty| p.test(ty, View::ClassExpression, graph))
}

fn class(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named(EntityKind::Class, node, graph, p)
}

fn datatype(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named(EntityKind::Datatype, node, graph, p)
}

fn object_property(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named(EntityKind::ObjectProperty, node, graph, p)
}

fn data_property(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named(EntityKind::DataProperty, node, graph, p)
}

fn annotation_property(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named(EntityKind::AnnotationProperty, node, graph, p)
}

fn named_individual(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named(EntityKind::NamedIndividual, node, graph, p)
}

fn punning_conflict(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    if !node.is_iri() {
        return false;
    }
    let declared: Vec<EntityKind> = EntityKind::ALL
        .into_iter()
        .filter(|k| graph.has_type(node, k.type_iri()))
        .collect();
    declared.iter().enumerate().any(|(i, a)| {
        declared
            .iter()
            .skip(i.saturating_add(1))
            .any(|b| !p.punnings().allows(*a, *b))
    })
}

// =============================================================================
// ANONYMOUS INDIVIDUALS
// =============================================================================

fn reserved_minus(p: &Personality, allowed: &[&str]) -> BTreeSet<Node> {
    p.reserved()
        .properties()
        .filter(|iri| !allowed.contains(iri))
        .filter(|iri| !p.builtins().contains(EntityKind::AnnotationProperty, iri))
        .map(Node::iri)
        .collect()
}

fn anonymous_individual(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    if !node.is_blank() {
        return false;
    }
    let as_subject = graph.find(Some(node), None, None);
    let as_object = graph.find(None, None, Some(node));
    if as_subject.is_empty() && as_object.is_empty() {
        return false;
    }

    // (a) typing: one class-expression type is enough, any other type excludes.
    let types = graph.types(node);
    if types.iter().any(|ty| p.test(ty, View::ClassExpression, graph)) {
        return true;
    }
    if !types.is_empty() {
        return false;
    }

    // (b) reserved predicates with the node as subject.
    let forbidden_subject = p.memo(FORBIDDEN_SUBJECT_KEY, |p| reserved_minus(p, &SUBJECT_ALLOWED));
    if as_subject
        .iter()
        .any(|t| forbidden_subject.contains(&t.predicate))
    {
        return false;
    }

    // (c) reserved predicates with the node as object.
    let forbidden_object = p.memo(FORBIDDEN_OBJECT_KEY, |p| reserved_minus(p, &OBJECT_ALLOWED));
    if as_object
        .iter()
        .any(|t| forbidden_object.contains(&t.predicate))
    {
        return false;
    }

    match p.anonymous_policy() {
        AnonymousIndividualPolicy::Tolerant => true,
        AnonymousIndividualPolicy::Strict => {
            in_individual_position(&as_subject, &as_object, graph, p)
        }
    }
}

fn in_individual_position(
    as_subject: &[Triple],
    as_object: &[Triple],
    graph: &dyn GraphStore,
    p: &Personality,
) -> bool {
    let equality = |t: &Triple| t.has_predicate(owl::SAME_AS) || t.has_predicate(owl::DIFFERENT_FROM);
    if as_subject.iter().any(|t| equality(t)) || as_object.iter().any(|t| equality(t)) {
        return true;
    }
    if as_object
        .iter()
        .any(|t| INDIVIDUAL_OBJECT_SLOTS.iter().any(|slot| t.has_predicate(slot)))
    {
        return true;
    }
    as_subject.iter().any(|t| {
        p.test(&t.predicate, View::ObjectProperty, graph)
            || p.test(&t.predicate, View::DataProperty, graph)
    }) || as_object
        .iter()
        .any(|t| p.test(&t.predicate, View::ObjectProperty, graph))
}

fn individual(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    named_individual(node, graph, p) || anonymous_individual(node, graph, p)
}

// =============================================================================
// ANONYMOUS EXPRESSIONS
// =============================================================================

fn has_any(node: &Node, graph: &dyn GraphStore, predicates: &[&str]) -> bool {
    predicates
        .iter()
        .any(|pred| graph.has(Some(node), Some(&Node::iri(*pred)), None))
}

fn anonymous_class(node: &Node, graph: &dyn GraphStore, _p: &Personality) -> bool {
    if !node.is_blank() {
        return false;
    }
    let restriction = graph.has_type(node, owl::RESTRICTION)
        && has_any(node, graph, &[owl::ON_PROPERTY])
        && has_any(node, graph, &RESTRICTION_PREDICATES);
    restriction
        || (graph.has_type(node, owl::CLASS) && has_any(node, graph, &BOOLEAN_CLASS_PREDICATES))
}

fn class_expression(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    class(node, graph, p) || anonymous_class(node, graph, p)
}

fn data_range(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    if datatype(node, graph, p) {
        return true;
    }
    if !node.is_blank() || !graph.has_type(node, rdfs::DATATYPE) {
        return false;
    }
    if has_any(node, graph, &[owl::ON_DATATYPE]) {
        return has_any(node, graph, &[owl::WITH_RESTRICTIONS]);
    }
    has_any(node, graph, &DATA_RANGE_PREDICATES)
}

fn inverse_object_property(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    node.is_blank()
        && graph
            .object(node, owl::INVERSE_OF)
            .is_some_and(|inner| object_property(&inner, graph, p))
}

fn object_property_expression(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    object_property(node, graph, p) || inverse_object_property(node, graph, p)
}

fn facet_restriction(node: &Node, graph: &dyn GraphStore, p: &Personality) -> bool {
    node.is_blank()
        && graph.find(Some(node), None, None).iter().any(|t| {
            t.object.is_literal()
                && t.predicate
                    .as_iri()
                    .is_some_and(|iri| p.builtins().is_facet(iri))
        })
}

fn swrl_variable(node: &Node, graph: &dyn GraphStore, _p: &Personality) -> bool {
    node.is_iri() && graph.has_type(node, swrl::VARIABLE)
}

fn swrl_atom(node: &Node, graph: &dyn GraphStore, _p: &Personality) -> bool {
    node.is_blank()
        && vocab::SWRL_ATOM_TYPES
            .iter()
            .any(|ty| graph.has_type(node, ty))
}

// =============================================================================
// MAKERS
// =============================================================================

fn typed(node: &Node, type_iri: &str) -> Option<Vec<Triple>> {
    node.is_iri().then(|| {
        vec![Triple::new(
            node.clone(),
            Node::iri(rdf::TYPE),
            Node::iri(type_iri),
        )]
    })
}

fn make_class(node: &Node) -> Option<Vec<Triple>> {
    typed(node, owl::CLASS)
}

fn make_datatype(node: &Node) -> Option<Vec<Triple>> {
    typed(node, rdfs::DATATYPE)
}

fn make_object_property(node: &Node) -> Option<Vec<Triple>> {
    typed(node, owl::OBJECT_PROPERTY)
}

fn make_data_property(node: &Node) -> Option<Vec<Triple>> {
    typed(node, owl::DATATYPE_PROPERTY)
}

fn make_annotation_property(node: &Node) -> Option<Vec<Triple>> {
    typed(node, owl::ANNOTATION_PROPERTY)
}

fn make_named_individual(node: &Node) -> Option<Vec<Triple>> {
    typed(node, owl::NAMED_INDIVIDUAL)
}

fn make_swrl_variable(node: &Node) -> Option<Vec<Triple>> {
    typed(node, swrl::VARIABLE)
}

// =============================================================================
// TESTS
// =============================================================================
