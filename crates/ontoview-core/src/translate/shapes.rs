//! Table-driven translators for every shape except declarations and
//! annotation assertions.
//!
//! Each `Shape` pairs the root statements it is found under with three
//! plain functions: a cheap statement test, a reader and a writer.

use super::expressions::literal;
use super::{Anchor, AxiomTranslator, Decoded, Malformed, ReadContext, Writer, annotations, assemble};
use crate::axiom::{
    Axiom, AxiomBody, AxiomType, Characteristic, ClassExpression, Individual,
    ObjectPropertyExpression,
};
use crate::object::OntObject;
use crate::personality::{EntityKind, View};
use crate::vocab::{owl, rdf, rdfs, swrl};
use crate::{Node, OntError, Triple};
use std::collections::BTreeSet;

type Read = fn(&Triple, &ReadContext<'_>) -> Result<Decoded, Malformed>;
type Write = fn(&AxiomBody, &mut Writer<'_>) -> Result<Anchor, &'static str>;
type Test = fn(&Triple, &ReadContext<'_>) -> bool;

// =============================================================================
// ROOT PATTERNS
// =============================================================================

/// Where root statements of a shape are looked for.
#[derive(Debug, Clone, Copy)]
enum Root {
    /// `?s <predicate> ?o`.
    Predicate(&'static str),
    /// `?s rdf:type <type>`.
    Typed(&'static str),
    /// `?s rdf:type ?o`.
    AnyType,
    /// `?s ?p ?o` where `?p` fits the view.
    PropertyOf(View),
}

impl Root {
    fn find(self, ctx: &ReadContext<'_>) -> Vec<Triple> {
        let graph = ctx.graph();
        match self {
            Root::Predicate(p) => graph.find(None, Some(&Node::iri(p)), None),
            Root::Typed(ty) => graph.find(None, Some(&Node::iri(rdf::TYPE)), Some(&Node::iri(ty))),
            Root::AnyType => graph.find(None, Some(&Node::iri(rdf::TYPE)), None),
            Root::PropertyOf(view) => ctx
                .personality()
                .nodes(view, graph)
                .iter()
                .flat_map(|h| graph.find(None, Some(h.node()), None))
                .collect(),
        }
    }

    fn matches(self, triple: &Triple, ctx: &ReadContext<'_>) -> bool {
        match self {
            Root::Predicate(p) => triple.has_predicate(p),
            Root::Typed(ty) => triple.has_predicate(rdf::TYPE) && triple.object.is(ty),
            Root::AnyType => triple.has_predicate(rdf::TYPE),
            Root::PropertyOf(view) => ctx.fits(&triple.predicate, view),
        }
    }
}

// =============================================================================
// SHAPE
// =============================================================================

pub(crate) struct Shape {
    axiom_type: AxiomType,
    roots: Vec<Root>,
    symmetric: bool,
    test: Test,
    read: Read,
    write: Write,
}

impl Shape {
    fn new(axiom_type: AxiomType, roots: Vec<Root>, test: Test, read: Read, write: Write) -> Self {
        Self {
            axiom_type,
            roots,
            symmetric: false,
            test,
            read,
            write,
        }
    }

    fn symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }
}

impl AxiomTranslator for Shape {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Triple> {
        let found: BTreeSet<Triple> = self.roots.iter().flat_map(|r| r.find(ctx)).collect();
        found.into_iter().collect()
    }

    fn test_statement(&self, triple: &Triple, ctx: &ReadContext<'_>) -> bool {
        self.roots.iter().any(|r| r.matches(triple, ctx)) && (self.test)(triple, ctx)
    }

    fn decode(&self, root: &Triple, ctx: &ReadContext<'_>) -> Result<Vec<OntObject<Axiom>>, OntError> {
        let decoded = (self.read)(root, ctx).map_err(|m| m.at(root))?;
        Ok(assemble(root, decoded, ctx, true))
    }

    fn encode(&self, axiom: &Axiom, writer: &mut Writer<'_>) -> Result<(), OntError> {
        let anchor = (self.write)(&axiom.body, writer).map_err(|reason| OntError::UnsupportedAxiom {
            shape: self.axiom_type,
            reason: reason.to_string(),
        })?;
        annotations::write(writer, &anchor, &axiom.annotations);
        Ok(())
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    fn alternate_statements(&self, ctx: &ReadContext<'_>) -> Vec<Triple> {
        if self.roots.len() < 2 {
            return Vec::new();
        }
        self.roots
            .iter()
            .filter(|r| matches!(r, Root::Typed(_)))
            .flat_map(|r| r.find(ctx))
            .filter(|t| self.test_statement(t, ctx))
            .collect()
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape")
            .field("axiom_type", &self.axiom_type)
            .field("roots", &self.roots)
            .finish()
    }
}

// =============================================================================
// SHARED READ HELPERS
// =============================================================================

fn on_triple(root: &Triple, body: AxiomBody, object: OntObject<()>) -> Decoded {
    Decoded {
        body,
        object,
        anchor: Anchor::Triple(root.clone()),
    }
}

fn class(ctx: &ReadContext<'_>, node: &Node, object: &mut OntObject<()>) -> Result<ClassExpression, Malformed> {
    let ce = ctx.class_expression(node)?;
    let value = ce.value().clone();
    object.add_part(ce);
    Ok(value)
}

fn property(
    ctx: &ReadContext<'_>,
    node: &Node,
    object: &mut OntObject<()>,
) -> Result<ObjectPropertyExpression, Malformed> {
    let ope = ctx.object_property(node)?;
    Ok(object.absorb(ope))
}

fn iri(node: &Node) -> Result<String, Malformed> {
    node.as_iri()
        .map(str::to_string)
        .ok_or_else(|| Malformed::new(format!("{} is not an IRI", node)))
}

fn both(triple: &Triple, ctx: &ReadContext<'_>, subject: View, object: View) -> bool {
    ctx.fits(&triple.subject, subject) && ctx.fits(&triple.object, object)
}

/// Annotation-property axioms are read only when enabled, and not for
/// properties that are also object or data properties when overlaps are
/// ignored.
///
/// `properties` are the positions holding a property: both ends of a
/// sub-property statement, only the subject of a domain or range (its
/// object is a class or datatype, whose punning is irrelevant here).
fn annotation_gate(properties: &[&Node], ctx: &ReadContext<'_>) -> bool {
    let settings = ctx.settings();
    if !settings.read_annotation_axioms {
        return false;
    }
    let overlaps = properties
        .iter()
        .any(|p| ctx.fits(p, View::ObjectProperty) || ctx.fits(p, View::DataProperty));
    !(settings.ignore_annotation_axiom_overlaps && overlaps)
}

/// Members of a blank n-ary root, from the first list predicate present.
fn members(
    root: &Triple,
    ctx: &ReadContext<'_>,
    predicates: &[&str],
    object: &mut OntObject<()>,
) -> Result<Vec<Node>, Malformed> {
    for predicate in predicates {
        if let Some((head, t)) = ctx.optional(&root.subject, predicate)? {
            object.add_triple(t);
            let list = ctx.list(&head)?;
            return Ok(object.absorb(list));
        }
    }
    Err(Malformed::new(format!("{} has no member list", root.subject)))
}

fn has_single(ctx: &ReadContext<'_>, node: &Node, predicates: &[&str]) -> bool {
    node.is_blank() && predicates.iter().any(|p| ctx.graph().object(node, p).is_some())
}

// =============================================================================
// SHARED WRITE HELPERS
// =============================================================================

fn rooted(writer: &mut Writer<'_>, subject: Node, predicate: &str, object: Node) -> Anchor {
    Anchor::Triple(writer.root(subject, predicate, object))
}

/// Pair-or-blank-root writer for disjointness and difference.
fn write_nary(
    writer: &mut Writer<'_>,
    nodes: Vec<Node>,
    pairwise: &str,
    type_iri: &str,
    list_predicate: &str,
) -> Result<Anchor, &'static str> {
    match nodes.len() {
        0..=2 => write_pair(writer, nodes, pairwise),
        _ => {
            let x = writer.blank();
            writer.root(x.clone(), rdf::TYPE, Node::iri(type_iri));
            let head = writer.list(nodes);
            writer.triple(x.clone(), list_predicate, head);
            Ok(Anchor::Node(x))
        }
    }
}

fn check_pair(len: usize) -> Result<(), &'static str> {
    match len {
        2 => Ok(()),
        0 | 1 => Err("needs two operands"),
        _ => Err("more than two operands have no single-statement form"),
    }
}

/// Exactly two operands, as one symmetric statement.
fn write_pair(writer: &mut Writer<'_>, nodes: Vec<Node>, predicate: &str) -> Result<Anchor, &'static str> {
    let mut it = nodes.into_iter();
    match (it.next(), it.next()) {
        (Some(a), Some(b)) => Ok(rooted(writer, a, predicate, b)),
        _ => Err("needs two operands"),
    }
}

const WRONG_BODY: &str = "axiom body does not match the translator";

// =============================================================================
// ANNOTATION PROPERTY AXIOMS
// =============================================================================

fn test_sub_annotation(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    annotation_gate(&[&t.subject, &t.object], ctx)
        && both(t, ctx, View::AnnotationProperty, View::AnnotationProperty)
}

fn read_sub_annotation(root: &Triple, _ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::SubAnnotationPropertyOf {
        sub: iri(&root.subject)?,
        sup: iri(&root.object)?,
    };
    Ok(Decoded::simple(root, body))
}

fn write_sub_annotation(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SubAnnotationPropertyOf { sub, sup } = body else {
        return Err(WRONG_BODY);
    };
    w.declare_kind(EntityKind::AnnotationProperty, sub);
    w.declare_kind(EntityKind::AnnotationProperty, sup);
    Ok(rooted(w, Node::iri(sub.as_str()), rdfs::SUB_PROPERTY_OF, Node::iri(sup.as_str())))
}

fn test_annotation_domain_or_range(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    annotation_gate(&[&t.subject], ctx) && ctx.fits(&t.subject, View::AnnotationProperty) && t.object.is_iri()
}

fn read_annotation_domain(root: &Triple, _ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::AnnotationPropertyDomain {
        property: iri(&root.subject)?,
        domain: iri(&root.object)?,
    };
    Ok(Decoded::simple(root, body))
}

fn read_annotation_range(root: &Triple, _ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::AnnotationPropertyRange {
        property: iri(&root.subject)?,
        range: iri(&root.object)?,
    };
    Ok(Decoded::simple(root, body))
}

fn write_annotation_domain_or_range(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let (property, predicate, target) = match body {
        AxiomBody::AnnotationPropertyDomain { property, domain } => (property, rdfs::DOMAIN, domain),
        AxiomBody::AnnotationPropertyRange { property, range } => (property, rdfs::RANGE, range),
        _ => return Err(WRONG_BODY),
    };
    w.declare_kind(EntityKind::AnnotationProperty, property);
    Ok(rooted(w, Node::iri(property.as_str()), predicate, Node::iri(target.as_str())))
}

// =============================================================================
// CLASS AXIOMS
// =============================================================================

fn test_class_pair(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::ClassExpression, View::ClassExpression)
}

fn read_sub_class(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let sub = class(ctx, &root.subject, &mut object)?;
    let sup = class(ctx, &root.object, &mut object)?;
    Ok(on_triple(root, AxiomBody::SubClassOf { sub, sup }, object))
}

fn write_sub_class(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SubClassOf { sub, sup } = body else {
        return Err(WRONG_BODY);
    };
    let s = w.class_expression(sub);
    let o = w.class_expression(sup);
    Ok(rooted(w, s, rdfs::SUB_CLASS_OF, o))
}

fn read_class_set(root: &Triple, ctx: &ReadContext<'_>) -> Result<(BTreeSet<ClassExpression>, OntObject<()>), Malformed> {
    let mut object = OntObject::new(());
    let a = class(ctx, &root.subject, &mut object)?;
    let b = class(ctx, &root.object, &mut object)?;
    Ok((BTreeSet::from([a, b]), object))
}

fn read_equivalent_classes(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let (set, object) = read_class_set(root, ctx)?;
    Ok(on_triple(root, AxiomBody::EquivalentClasses(set), object))
}

fn write_equivalent_classes(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::EquivalentClasses(set) = body else {
        return Err(WRONG_BODY);
    };
    check_pair(set.len())?;
    let nodes = set.iter().map(|ce| w.class_expression(ce)).collect();
    write_pair(w, nodes, owl::EQUIVALENT_CLASS)
}

fn test_disjoint_classes(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    if t.has_predicate(owl::DISJOINT_WITH) {
        return test_class_pair(t, ctx);
    }
    has_single(ctx, &t.subject, &[owl::MEMBERS])
}

fn read_disjoint_classes(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    if root.has_predicate(owl::DISJOINT_WITH) {
        let (set, object) = read_class_set(root, ctx)?;
        return Ok(on_triple(root, AxiomBody::DisjointClasses(set), object));
    }
    let mut object = OntObject::new(());
    let nodes = members(root, ctx, &[owl::MEMBERS], &mut object)?;
    let mut set = BTreeSet::new();
    for node in &nodes {
        set.insert(class(ctx, node, &mut object)?);
    }
    if set.len() < 2 {
        return Err(Malformed::new("owl:AllDisjointClasses needs two members"));
    }
    Ok(Decoded {
        body: AxiomBody::DisjointClasses(set),
        object,
        anchor: Anchor::Node(root.subject.clone()),
    })
}

fn write_disjoint_classes(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::DisjointClasses(set) = body else {
        return Err(WRONG_BODY);
    };
    if set.len() < 2 {
        return Err("needs at least two operands");
    }
    let nodes = set.iter().map(|ce| w.class_expression(ce)).collect();
    write_nary(w, nodes, owl::DISJOINT_WITH, owl::ALL_DISJOINT_CLASSES, owl::MEMBERS)
}

// =============================================================================
// ASSERTIONS
// =============================================================================

fn test_class_assertion(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::Individual, View::ClassExpression)
}

fn read_class_assertion(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let individual = ctx.individual(&root.subject)?;
    let class = class(ctx, &root.object, &mut object)?;
    Ok(on_triple(root, AxiomBody::ClassAssertion { class, individual }, object))
}

fn write_class_assertion(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::ClassAssertion { class, individual } = body else {
        return Err(WRONG_BODY);
    };
    let s = w.individual(individual);
    let o = w.class_expression(class);
    Ok(rooted(w, s, rdf::TYPE, o))
}

fn test_object_assertion(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::Individual, View::Individual)
}

fn read_object_assertion(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::ObjectPropertyAssertion {
        property: ObjectPropertyExpression::Named(iri(&root.predicate)?),
        subject: ctx.individual(&root.subject)?,
        object: ctx.individual(&root.object)?,
    };
    Ok(Decoded::simple(root, body))
}

fn write_object_assertion(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::ObjectPropertyAssertion {
        property,
        subject,
        object,
    } = body
    else {
        return Err(WRONG_BODY);
    };
    let ObjectPropertyExpression::Named(p) = property else {
        return Err("assertions on inverse properties have no direct statement form");
    };
    w.declare_kind(EntityKind::ObjectProperty, p);
    let s = w.individual(subject);
    let o = w.individual(object);
    Ok(rooted(w, s, p, o))
}

fn test_data_assertion(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    t.object.is_literal() && ctx.fits(&t.subject, View::Individual)
}

fn read_data_assertion(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::DataPropertyAssertion {
        property: iri(&root.predicate)?,
        subject: ctx.individual(&root.subject)?,
        value: literal(&root.object)?,
    };
    Ok(Decoded::simple(root, body))
}

fn write_data_assertion(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::DataPropertyAssertion {
        property,
        subject,
        value,
    } = body
    else {
        return Err(WRONG_BODY);
    };
    w.declare_kind(EntityKind::DataProperty, property);
    let s = w.individual(subject);
    Ok(rooted(w, s, property, Node::Literal(value.clone())))
}

fn test_individual_pair(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::Individual, View::Individual)
}

fn read_individual_pair(root: &Triple, ctx: &ReadContext<'_>) -> Result<BTreeSet<Individual>, Malformed> {
    Ok(BTreeSet::from([
        ctx.individual(&root.subject)?,
        ctx.individual(&root.object)?,
    ]))
}

fn read_same_individual(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let set = read_individual_pair(root, ctx)?;
    Ok(Decoded::simple(root, AxiomBody::SameIndividual(set)))
}

fn write_same_individual(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SameIndividual(set) = body else {
        return Err(WRONG_BODY);
    };
    check_pair(set.len())?;
    let nodes = set.iter().map(|i| w.individual(i)).collect();
    write_pair(w, nodes, owl::SAME_AS)
}

fn test_different_individuals(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    if t.has_predicate(owl::DIFFERENT_FROM) {
        return test_individual_pair(t, ctx);
    }
    has_single(ctx, &t.subject, &[owl::DISTINCT_MEMBERS, owl::MEMBERS])
}

fn read_different_individuals(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    if root.has_predicate(owl::DIFFERENT_FROM) {
        let set = read_individual_pair(root, ctx)?;
        return Ok(Decoded::simple(root, AxiomBody::DifferentIndividuals(set)));
    }
    let mut object = OntObject::new(());
    let nodes = members(root, ctx, &[owl::DISTINCT_MEMBERS, owl::MEMBERS], &mut object)?;
    let set = nodes
        .iter()
        .map(|n| ctx.individual(n))
        .collect::<Result<BTreeSet<_>, _>>()?;
    if set.len() < 2 {
        return Err(Malformed::new("owl:AllDifferent needs two members"));
    }
    Ok(Decoded {
        body: AxiomBody::DifferentIndividuals(set),
        object,
        anchor: Anchor::Node(root.subject.clone()),
    })
}

fn write_different_individuals(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::DifferentIndividuals(set) = body else {
        return Err(WRONG_BODY);
    };
    if set.len() < 2 {
        return Err("needs at least two operands");
    }
    let nodes = set.iter().map(|i| w.individual(i)).collect();
    write_nary(w, nodes, owl::DIFFERENT_FROM, owl::ALL_DIFFERENT, owl::DISTINCT_MEMBERS)
}

// =============================================================================
// PROPERTY AXIOMS
// =============================================================================

fn test_object_property_pair(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(
        t,
        ctx,
        View::ObjectPropertyExpression,
        View::ObjectPropertyExpression,
    )
}

fn test_data_property_pair(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::DataProperty, View::DataProperty)
}

fn read_sub_object_property(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let sub = property(ctx, &root.subject, &mut object)?;
    let sup = property(ctx, &root.object, &mut object)?;
    Ok(on_triple(root, AxiomBody::SubObjectPropertyOf { sub, sup }, object))
}

fn write_sub_object_property(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SubObjectPropertyOf { sub, sup } = body else {
        return Err(WRONG_BODY);
    };
    let s = w.object_property(sub);
    let o = w.object_property(sup);
    Ok(rooted(w, s, rdfs::SUB_PROPERTY_OF, o))
}

fn read_sub_data_property(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::SubDataPropertyOf {
        sub: ctx.data_property(&root.subject)?,
        sup: ctx.data_property(&root.object)?,
    };
    Ok(Decoded::simple(root, body))
}

fn write_sub_data_property(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SubDataPropertyOf { sub, sup } = body else {
        return Err(WRONG_BODY);
    };
    let s = w.data_property(sub);
    let o = w.data_property(sup);
    Ok(rooted(w, s, rdfs::SUB_PROPERTY_OF, o))
}

fn read_equivalent_object_properties(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let a = property(ctx, &root.subject, &mut object)?;
    let b = property(ctx, &root.object, &mut object)?;
    let body = AxiomBody::EquivalentObjectProperties(BTreeSet::from([a, b]));
    Ok(on_triple(root, body, object))
}

fn write_equivalent_object_properties(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::EquivalentObjectProperties(set) = body else {
        return Err(WRONG_BODY);
    };
    check_pair(set.len())?;
    let nodes = set.iter().map(|p| w.object_property(p)).collect();
    write_pair(w, nodes, owl::EQUIVALENT_PROPERTY)
}

fn read_equivalent_data_properties(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::EquivalentDataProperties(BTreeSet::from([
        ctx.data_property(&root.subject)?,
        ctx.data_property(&root.object)?,
    ]));
    Ok(Decoded::simple(root, body))
}

fn write_equivalent_data_properties(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::EquivalentDataProperties(set) = body else {
        return Err(WRONG_BODY);
    };
    check_pair(set.len())?;
    let nodes = set.iter().map(|p| w.data_property(p)).collect();
    write_pair(w, nodes, owl::EQUIVALENT_PROPERTY)
}

fn test_object_property_class(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::ObjectPropertyExpression, View::ClassExpression)
}

fn read_object_property_domain(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let property = property(ctx, &root.subject, &mut object)?;
    let domain = class(ctx, &root.object, &mut object)?;
    Ok(on_triple(root, AxiomBody::ObjectPropertyDomain { property, domain }, object))
}

fn read_object_property_range(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let property = property(ctx, &root.subject, &mut object)?;
    let range = class(ctx, &root.object, &mut object)?;
    Ok(on_triple(root, AxiomBody::ObjectPropertyRange { property, range }, object))
}

fn write_object_property_domain_or_range(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let (property, predicate, target) = match body {
        AxiomBody::ObjectPropertyDomain { property, domain } => (property, rdfs::DOMAIN, domain),
        AxiomBody::ObjectPropertyRange { property, range } => (property, rdfs::RANGE, range),
        _ => return Err(WRONG_BODY),
    };
    let s = w.object_property(property);
    let o = w.class_expression(target);
    Ok(rooted(w, s, predicate, o))
}

fn test_data_property_domain(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::DataProperty, View::ClassExpression)
}

fn read_data_property_domain(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let property = ctx.data_property(&root.subject)?;
    let domain = class(ctx, &root.object, &mut object)?;
    Ok(on_triple(root, AxiomBody::DataPropertyDomain { property, domain }, object))
}

fn write_data_property_domain(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::DataPropertyDomain { property, domain } = body else {
        return Err(WRONG_BODY);
    };
    let s = w.data_property(property);
    let o = w.class_expression(domain);
    Ok(rooted(w, s, rdfs::DOMAIN, o))
}

fn test_data_property_range(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::DataProperty, View::DataRange)
}

fn read_data_property_range(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let property = ctx.data_property(&root.subject)?;
    let range = ctx.data_range(&root.object)?;
    let range = object.absorb(range);
    Ok(on_triple(root, AxiomBody::DataPropertyRange { property, range }, object))
}

fn write_data_property_range(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::DataPropertyRange { property, range } = body else {
        return Err(WRONG_BODY);
    };
    let s = w.data_property(property);
    let o = w.data_range(range);
    Ok(rooted(w, s, rdfs::RANGE, o))
}

fn test_inverse_properties(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    both(t, ctx, View::ObjectProperty, View::ObjectProperty)
}

fn read_inverse_properties(root: &Triple, _ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::InverseObjectProperties(
        ObjectPropertyExpression::Named(iri(&root.subject)?),
        ObjectPropertyExpression::Named(iri(&root.object)?),
    );
    Ok(Decoded::simple(root, body))
}

fn write_inverse_properties(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::InverseObjectProperties(a, b) = body else {
        return Err(WRONG_BODY);
    };
    if !matches!(
        (a, b),
        (ObjectPropertyExpression::Named(_), ObjectPropertyExpression::Named(_))
    ) {
        return Err("inverse expressions cannot be stated as owl:inverseOf operands");
    }
    let s = w.object_property(a);
    let o = w.object_property(b);
    Ok(rooted(w, s, owl::INVERSE_OF, o))
}

fn test_characteristic(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    ctx.fits(&t.subject, View::ObjectPropertyExpression)
}

fn read_characteristic(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let Some(characteristic) = Characteristic::ALL
        .into_iter()
        .find(|c| root.object.is(c.type_iri()))
    else {
        return Err(Malformed::new(format!("{} is not a property characteristic", root.object)));
    };
    let mut object = OntObject::new(());
    let property = property(ctx, &root.subject, &mut object)?;
    let body = AxiomBody::ObjectPropertyCharacteristic(characteristic, property);
    Ok(on_triple(root, body, object))
}

fn write_characteristic(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::ObjectPropertyCharacteristic(characteristic, property) = body else {
        return Err(WRONG_BODY);
    };
    let s = w.object_property(property);
    Ok(rooted(w, s, rdf::TYPE, Node::iri(characteristic.type_iri())))
}

fn test_functional_data(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    ctx.fits(&t.subject, View::DataProperty)
}

fn read_functional_data(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let body = AxiomBody::FunctionalDataProperty(ctx.data_property(&root.subject)?);
    Ok(Decoded::simple(root, body))
}

fn write_functional_data(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::FunctionalDataProperty(property) = body else {
        return Err(WRONG_BODY);
    };
    let s = w.data_property(property);
    Ok(rooted(w, s, rdf::TYPE, Node::iri(owl::FUNCTIONAL_PROPERTY)))
}

fn test_chain(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    ctx.fits(&t.subject, View::ObjectPropertyExpression)
}

fn read_chain(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let sup = property(ctx, &root.subject, &mut object)?;
    let list = ctx.list(&root.object)?;
    let mut chain = Vec::new();
    for node in object.absorb(list) {
        chain.push(property(ctx, &node, &mut object)?);
    }
    if chain.is_empty() {
        return Err(Malformed::new("empty property chain"));
    }
    Ok(on_triple(root, AxiomBody::SubPropertyChainOf { chain, sup }, object))
}

fn write_chain(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SubPropertyChainOf { chain, sup } = body else {
        return Err(WRONG_BODY);
    };
    if chain.is_empty() {
        return Err("empty property chain");
    }
    let s = w.object_property(sup);
    let items = chain.iter().map(|p| w.object_property(p)).collect();
    let head = w.list(items);
    Ok(rooted(w, s, owl::PROPERTY_CHAIN_AXIOM, head))
}

// =============================================================================
// RULES
// =============================================================================

fn test_rule(t: &Triple, ctx: &ReadContext<'_>) -> bool {
    let graph = ctx.graph();
    graph.object(&t.subject, swrl::BODY).is_some() && graph.object(&t.subject, swrl::HEAD).is_some()
}

fn read_rule(root: &Triple, ctx: &ReadContext<'_>) -> Result<Decoded, Malformed> {
    let mut object = OntObject::new(());
    let (body_head, t) = ctx.required(&root.subject, swrl::BODY)?;
    object.add_triple(t);
    let body = ctx.swrl_atoms(&body_head, &mut object)?;
    let (head_head, t) = ctx.required(&root.subject, swrl::HEAD)?;
    object.add_triple(t);
    let head = ctx.swrl_atoms(&head_head, &mut object)?;
    Ok(Decoded {
        body: AxiomBody::SwrlRule { body, head },
        object,
        anchor: Anchor::Node(root.subject.clone()),
    })
}

fn write_rule(body: &AxiomBody, w: &mut Writer<'_>) -> Result<Anchor, &'static str> {
    let AxiomBody::SwrlRule { body, head } = body else {
        return Err(WRONG_BODY);
    };
    let x = w.blank();
    w.root(x.clone(), rdf::TYPE, Node::iri(swrl::IMP));
    let body = body.iter().map(|a| w.swrl_atom(a)).collect();
    let body = w.list(body);
    w.triple(x.clone(), swrl::BODY, body);
    let head = head.iter().map(|a| w.swrl_atom(a)).collect();
    let head = w.list(head);
    w.triple(x.clone(), swrl::HEAD, head);
    Ok(Anchor::Node(x))
}

// =============================================================================
// TABLE
// =============================================================================

/// Every table-driven shape.
pub(crate) fn all() -> Vec<Shape> {
    use AxiomType as T;
    use Root::{Predicate, Typed};

    let mut shapes = vec![
        Shape::new(
            T::SubAnnotationPropertyOf,
            vec![Predicate(rdfs::SUB_PROPERTY_OF)],
            test_sub_annotation,
            read_sub_annotation,
            write_sub_annotation,
        ),
        Shape::new(
            T::AnnotationPropertyDomain,
            vec![Predicate(rdfs::DOMAIN)],
            test_annotation_domain_or_range,
            read_annotation_domain,
            write_annotation_domain_or_range,
        ),
        Shape::new(
            T::AnnotationPropertyRange,
            vec![Predicate(rdfs::RANGE)],
            test_annotation_domain_or_range,
            read_annotation_range,
            write_annotation_domain_or_range,
        ),
        Shape::new(
            T::SubClassOf,
            vec![Predicate(rdfs::SUB_CLASS_OF)],
            test_class_pair,
            read_sub_class,
            write_sub_class,
        ),
        Shape::new(
            T::EquivalentClasses,
            vec![Predicate(owl::EQUIVALENT_CLASS)],
            test_class_pair,
            read_equivalent_classes,
            write_equivalent_classes,
        )
        .symmetric(),
        Shape::new(
            T::DisjointClasses,
            vec![Predicate(owl::DISJOINT_WITH), Typed(owl::ALL_DISJOINT_CLASSES)],
            test_disjoint_classes,
            read_disjoint_classes,
            write_disjoint_classes,
        )
        .symmetric(),
        Shape::new(
            T::ClassAssertion,
            vec![Root::AnyType],
            test_class_assertion,
            read_class_assertion,
            write_class_assertion,
        ),
        Shape::new(
            T::ObjectPropertyAssertion,
            vec![Root::PropertyOf(View::ObjectProperty)],
            test_object_assertion,
            read_object_assertion,
            write_object_assertion,
        ),
        Shape::new(
            T::DataPropertyAssertion,
            vec![Root::PropertyOf(View::DataProperty)],
            test_data_assertion,
            read_data_assertion,
            write_data_assertion,
        ),
        Shape::new(
            T::SubObjectPropertyOf,
            vec![Predicate(rdfs::SUB_PROPERTY_OF)],
            test_object_property_pair,
            read_sub_object_property,
            write_sub_object_property,
        ),
        Shape::new(
            T::SubDataPropertyOf,
            vec![Predicate(rdfs::SUB_PROPERTY_OF)],
            test_data_property_pair,
            read_sub_data_property,
            write_sub_data_property,
        ),
        Shape::new(
            T::EquivalentObjectProperties,
            vec![Predicate(owl::EQUIVALENT_PROPERTY)],
            test_object_property_pair,
            read_equivalent_object_properties,
            write_equivalent_object_properties,
        )
        .symmetric(),
        Shape::new(
            T::EquivalentDataProperties,
            vec![Predicate(owl::EQUIVALENT_PROPERTY)],
            test_data_property_pair,
            read_equivalent_data_properties,
            write_equivalent_data_properties,
        )
        .symmetric(),
        Shape::new(
            T::ObjectPropertyDomain,
            vec![Predicate(rdfs::DOMAIN)],
            test_object_property_class,
            read_object_property_domain,
            write_object_property_domain_or_range,
        ),
        Shape::new(
            T::ObjectPropertyRange,
            vec![Predicate(rdfs::RANGE)],
            test_object_property_class,
            read_object_property_range,
            write_object_property_domain_or_range,
        ),
        Shape::new(
            T::DataPropertyDomain,
            vec![Predicate(rdfs::DOMAIN)],
            test_data_property_domain,
            read_data_property_domain,
            write_data_property_domain,
        ),
        Shape::new(
            T::DataPropertyRange,
            vec![Predicate(rdfs::RANGE)],
            test_data_property_range,
            read_data_property_range,
            write_data_property_range,
        ),
        Shape::new(
            T::InverseObjectProperties,
            vec![Predicate(owl::INVERSE_OF)],
            test_inverse_properties,
            read_inverse_properties,
            write_inverse_properties,
        ),
        Shape::new(
            T::FunctionalDataProperty,
            vec![Typed(owl::FUNCTIONAL_PROPERTY)],
            test_functional_data,
            read_functional_data,
            write_functional_data,
        ),
        Shape::new(
            T::SubPropertyChainOf,
            vec![Predicate(owl::PROPERTY_CHAIN_AXIOM)],
            test_chain,
            read_chain,
            write_chain,
        ),
        Shape::new(
            T::SameIndividual,
            vec![Predicate(owl::SAME_AS)],
            test_individual_pair,
            read_same_individual,
            write_same_individual,
        )
        .symmetric(),
        Shape::new(
            T::DifferentIndividuals,
            vec![Predicate(owl::DIFFERENT_FROM), Typed(owl::ALL_DIFFERENT)],
            test_different_individuals,
            read_different_individuals,
            write_different_individuals,
        )
        .symmetric(),
        Shape::new(
            T::SwrlRule,
            vec![Typed(swrl::IMP)],
            test_rule,
            read_rule,
            write_rule,
        ),
    ];
    for characteristic in Characteristic::ALL {
        shapes.push(Shape::new(
            characteristic.axiom_type(),
            vec![Typed(characteristic.type_iri())],
            test_characteristic,
            read_characteristic,
            write_characteristic,
        ));
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::{Annotation, SwrlArg, SwrlAtom};
    use crate::config::ModelConfig;
    use crate::graph::{Graph, GraphStore};
    use crate::object::Witnessed;
    use crate::translate::Translators;
    use crate::Personality;

    fn ex(s: &str) -> String {
        format!("http://example.org/{}", s)
    }

    fn read_back(axiom: &Axiom) -> Vec<Axiom> {
        let mut graph = Graph::new();
        let registry = Translators::standard();
        registry
            .encode(axiom, &mut graph, &Personality::default())
            .expect("encode");
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        registry
            .get(axiom.axiom_type())
            .expect("registered")
            .axioms(&ctx)
            .expect("decode")
            .into_iter()
            .map(OntObject::into_value)
            .collect()
    }

    #[test]
    fn table_covers_all_but_two_shapes() {
        let types: BTreeSet<AxiomType> = all().iter().map(|s| s.axiom_type()).collect();
        assert_eq!(types.len(), AxiomType::ALL.len() - 2);
        assert!(!types.contains(&AxiomType::Declaration));
        assert!(!types.contains(&AxiomType::AnnotationAssertion));
    }

    #[test]
    fn shapes_read_back_what_they_write() {
        let a = ClassExpression::class(ex("A"));
        let b = ClassExpression::class(ex("B"));
        let p = ObjectPropertyExpression::named(ex("p"));
        let bodies = [
            AxiomBody::SubClassOf { sub: a.clone(), sup: b.clone() },
            AxiomBody::EquivalentClasses(BTreeSet::from([a.clone(), b.clone()])),
            AxiomBody::DisjointClasses(BTreeSet::from([
                a.clone(),
                b.clone(),
                ClassExpression::class(ex("C")),
            ])),
            AxiomBody::ClassAssertion {
                class: a.clone(),
                individual: Individual::named(ex("i")),
            },
            AxiomBody::ObjectPropertyAssertion {
                property: p.clone(),
                subject: Individual::named(ex("i")),
                object: Individual::named(ex("j")),
            },
            AxiomBody::ObjectPropertyCharacteristic(Characteristic::Transitive, p.clone()),
            AxiomBody::SubPropertyChainOf {
                chain: vec![p.clone(), ObjectPropertyExpression::named(ex("q"))],
                sup: p.clone(),
            },
            AxiomBody::DifferentIndividuals(BTreeSet::from([
                Individual::named(ex("i")),
                Individual::named(ex("j")),
                Individual::named(ex("k")),
            ])),
            AxiomBody::SwrlRule {
                body: vec![SwrlAtom::Class(a.clone(), SwrlArg::variable(ex("x")))],
                head: vec![SwrlAtom::Class(b.clone(), SwrlArg::variable(ex("x")))],
            },
        ];
        for body in bodies {
            let axiom = Axiom::new(body);
            assert_eq!(read_back(&axiom), vec![axiom.clone()], "{:?}", axiom.axiom_type());
        }
    }

    #[test]
    fn annotated_sub_class_round_trip() {
        let axiom = Axiom::new(AxiomBody::SubClassOf {
            sub: ClassExpression::class(ex("A")),
            sup: ClassExpression::thing(),
        })
        .with_annotations([Annotation::literal(crate::vocab::rdfs::COMMENT, "why")]);
        assert_eq!(read_back(&axiom), vec![axiom]);
    }

    #[test]
    fn oversized_equivalence_is_unsupported() {
        let axiom = Axiom::new(AxiomBody::EquivalentClasses(BTreeSet::from([
            ClassExpression::class(ex("A")),
            ClassExpression::class(ex("B")),
            ClassExpression::class(ex("C")),
        ])));
        let mut graph = Graph::new();
        let err = Translators::standard()
            .encode(&axiom, &mut graph, &Personality::default())
            .expect_err("unsupported");
        assert!(matches!(err, OntError::UnsupportedAxiom { .. }));
        assert!(graph.is_empty());
    }

    #[test]
    fn reversed_equivalence_is_found() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        for c in ["A", "B"] {
            personality
                .declare(&Node::iri(ex(c)), View::Class, &mut graph)
                .expect("declare");
        }
        // Stored as B = A while the set orders A first.
        graph.add(Triple::new(
            Node::iri(ex("B")),
            Node::iri(owl::EQUIVALENT_CLASS),
            Node::iri(ex("A")),
        ));
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        let axiom = Axiom::new(AxiomBody::EquivalentClasses(BTreeSet::from([
            ClassExpression::class(ex("A")),
            ClassExpression::class(ex("B")),
        ])));
        let registry = Translators::standard();
        let translator = registry.get(AxiomType::EquivalentClasses).expect("registered");
        assert!(translator.contains(&axiom, &ctx));
    }

    #[test]
    fn punned_annotation_property_overlap_is_skipped() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        let p = Node::iri(ex("p"));
        personality.declare(&p, View::AnnotationProperty, &mut graph).expect("declare");
        personality.declare(&p, View::ObjectProperty, &mut graph).expect("declare");
        personality
            .declare(&Node::iri(ex("A")), View::Class, &mut graph)
            .expect("declare");
        graph.add(Triple::new(p.clone(), Node::iri(rdfs::DOMAIN), Node::iri(ex("A"))));

        let count = |config: &ModelConfig, ty: AxiomType| {
            let ctx = ReadContext::new(&graph, config);
            Translators::standard()
                .get(ty)
                .map(|t| t.axioms(&ctx).expect("decode").len())
                .unwrap_or_default()
        };
        let config = ModelConfig::default();
        assert_eq!(count(&config, AxiomType::ObjectPropertyDomain), 1);
        assert_eq!(count(&config, AxiomType::AnnotationPropertyDomain), 0);

        let lenient = config.with_settings(
            crate::config::ReadSettings::default().with_ignore_annotation_axiom_overlaps(false),
        );
        assert_eq!(count(&lenient, AxiomType::AnnotationPropertyDomain), 1);
    }

    #[test]
    fn broken_restriction_fails_or_is_skipped() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        personality
            .declare(&Node::iri(ex("A")), View::Class, &mut graph)
            .expect("declare");
        let r = Node::blank("r");
        graph.add(Triple::new(r.clone(), Node::iri(rdf::TYPE), Node::iri(owl::RESTRICTION)));
        graph.add(Triple::new(r.clone(), Node::iri(owl::ON_PROPERTY), Node::iri(ex("undeclared"))));
        graph.add(Triple::new(r.clone(), Node::iri(owl::SOME_VALUES_FROM), Node::iri(ex("A"))));
        graph.add(Triple::new(Node::iri(ex("A")), Node::iri(rdfs::SUB_CLASS_OF), r));

        let registry = Translators::standard();
        let translator = registry.get(AxiomType::SubClassOf).expect("registered");
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        assert!(matches!(translator.axioms(&ctx), Err(OntError::Decode { .. })));

        let tolerant = config.with_settings(
            crate::config::ReadSettings::default().with_ignore_axiom_read_errors(true),
        );
        let ctx = ReadContext::new(&graph, &tolerant);
        assert!(translator.axioms(&ctx).expect("skipped").is_empty());
    }

    fn disjoint_list(graph: &mut Graph, classes: &[&str]) -> Triple {
        let x = Node::blank("x");
        let typed = Triple::new(x.clone(), Node::iri(rdf::TYPE), Node::iri(owl::ALL_DISJOINT_CLASSES));
        graph.add(typed.clone());
        let mut next = Node::iri(rdf::NIL);
        for (i, c) in classes.iter().enumerate().rev() {
            let cell = Node::blank(format!("l{}", i));
            graph.add(Triple::new(cell.clone(), Node::iri(rdf::FIRST), Node::iri(ex(c))));
            graph.add(Triple::new(cell.clone(), Node::iri(rdf::REST), next));
            next = cell;
        }
        graph.add(Triple::new(x, Node::iri(owl::MEMBERS), next));
        typed
    }

    #[test]
    fn point_lookup_sees_every_disjointness_form() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        for c in ["A", "B"] {
            personality
                .declare(&Node::iri(ex(c)), View::Class, &mut graph)
                .expect("declare");
        }
        let typed = disjoint_list(&mut graph, &["A", "B"]);
        let axiom = Axiom::new(AxiomBody::DisjointClasses(BTreeSet::from([
            ClassExpression::class(ex("A")),
            ClassExpression::class(ex("B")),
        ])));
        let registry = Translators::standard();
        let translator = registry.get(AxiomType::DisjointClasses).expect("registered");
        let config = ModelConfig::default();

        // Only the list form is present.
        let ctx = ReadContext::new(&graph, &config);
        let found = translator.find(&axiom, &ctx).expect("find").expect("list form");
        assert!(found.triples().contains(&typed));

        let pairwise = Triple::new(
            Node::iri(ex("A")),
            Node::iri(owl::DISJOINT_WITH),
            Node::iri(ex("B")),
        );
        graph.add(pairwise.clone());
        let ctx = ReadContext::new(&graph, &config);
        let found = translator.find(&axiom, &ctx).expect("find").expect("both forms");
        let witnesses = found.triples();
        assert!(witnesses.contains(&pairwise));
        assert!(witnesses.contains(&typed));
        assert_eq!(witnesses.len(), 7);
    }

    #[test]
    fn punned_super_property_blocks_sub_annotation() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        let p = Node::iri(ex("p"));
        let q = Node::iri(ex("q"));
        personality.declare(&p, View::AnnotationProperty, &mut graph).expect("declare");
        personality.declare(&q, View::AnnotationProperty, &mut graph).expect("declare");
        personality.declare(&q, View::ObjectProperty, &mut graph).expect("declare");
        graph.add(Triple::new(p, Node::iri(rdfs::SUB_PROPERTY_OF), q));

        let count = |config: &ModelConfig| {
            let ctx = ReadContext::new(&graph, config);
            Translators::standard()
                .get(AxiomType::SubAnnotationPropertyOf)
                .map(|t| t.axioms(&ctx).expect("decode").len())
                .unwrap_or_default()
        };
        let config = ModelConfig::default();
        assert_eq!(count(&config), 0);
        let lenient = config.with_settings(
            crate::config::ReadSettings::default().with_ignore_annotation_axiom_overlaps(false),
        );
        assert_eq!(count(&lenient), 1);
    }
}
