//! Bulk annotations: reading them around a root, writing them back.
//!
//! A statement `s p o` is annotated through reification nodes:
//!
//! ```text
//! _:x rdf:type owl:Axiom ;
//!     owl:annotatedSource s ; owl:annotatedProperty p ; owl:annotatedTarget o ;
//!     rdfs:comment "why" .
//! ```
//!
//! Annotations of annotations use the same layout typed `owl:Annotation`.
//! Blank-rooted shapes carry their annotations directly on the root node.

use super::{Anchor, ReadContext, Writer};
use crate::axiom::{Annotation, AnnotationValue};
use crate::personality::{EntityKind, View};
use crate::vocab::{owl, rdf};
use crate::{Node, Triple};
use std::collections::BTreeSet;

/// Annotations carried by one reification node (or one blank root).
#[derive(Debug, Default)]
pub(crate) struct Bulk {
    pub annotations: BTreeSet<Annotation>,
    pub triples: BTreeSet<Triple>,
}

impl Bulk {
    fn extend(&mut self, other: Bulk) {
        self.annotations.extend(other.annotations);
        self.triples.extend(other.triples);
    }
}

/// One bulk per reification node of a triple anchor; at most one for a
/// node anchor.
pub(crate) fn read(anchor: &Anchor, ctx: &ReadContext<'_>) -> Vec<Bulk> {
    let mut visited = BTreeSet::new();
    match anchor {
        Anchor::Triple(root) => {
            let mut bulks = Vec::new();
            for x in reifications(root, owl::AXIOM, ctx) {
                if !visited.insert(x.clone()) {
                    continue;
                }
                let mut bulk = on_node(&x, ctx, &mut visited);
                bulk.triples.extend(header(&x, root, owl::AXIOM));
                bulks.push(bulk);
            }
            bulks
        }
        Anchor::Node(node) => {
            let bulk = on_node(node, ctx, &mut visited);
            if bulk.annotations.is_empty() {
                Vec::new()
            } else {
                vec![bulk]
            }
        }
    }
}

/// Check whether `triple` has at least one `owl:Axiom` reification.
pub(crate) fn is_annotated(triple: &Triple, ctx: &ReadContext<'_>) -> bool {
    !reifications(triple, owl::AXIOM, ctx).is_empty()
}

/// All annotations of one reified triple, merged.
pub(crate) fn read_merged(triple: &Triple, ctx: &ReadContext<'_>) -> Bulk {
    let mut merged = Bulk::default();
    for bulk in read(&Anchor::Triple(triple.clone()), ctx) {
        merged.extend(bulk);
    }
    merged
}

fn reifications(triple: &Triple, type_iri: &str, ctx: &ReadContext<'_>) -> Vec<Node> {
    let graph = ctx.graph();
    graph
        .subjects(owl::ANNOTATED_SOURCE, &triple.subject)
        .into_iter()
        .filter(|x| x.is_blank() && graph.has_type(x, type_iri))
        .filter(|x| {
            graph.contains(&Triple::new(
                x.clone(),
                Node::iri(owl::ANNOTATED_PROPERTY),
                triple.predicate.clone(),
            )) && graph.contains(&Triple::new(
                x.clone(),
                Node::iri(owl::ANNOTATED_TARGET),
                triple.object.clone(),
            ))
        })
        .collect()
}

fn header(x: &Node, triple: &Triple, type_iri: &str) -> [Triple; 4] {
    [
        Triple::new(x.clone(), Node::iri(rdf::TYPE), Node::iri(type_iri)),
        Triple::new(x.clone(), Node::iri(owl::ANNOTATED_SOURCE), triple.subject.clone()),
        Triple::new(x.clone(), Node::iri(owl::ANNOTATED_PROPERTY), triple.predicate.clone()),
        Triple::new(x.clone(), Node::iri(owl::ANNOTATED_TARGET), triple.object.clone()),
    ]
}

fn on_node(subject: &Node, ctx: &ReadContext<'_>, visited: &mut BTreeSet<Node>) -> Bulk {
    let mut bulk = Bulk::default();
    for triple in ctx.graph().find(Some(subject), None, None) {
        let Some(property) = triple.predicate.as_iri() else {
            continue;
        };
        if !ctx.fits(&triple.predicate, View::AnnotationProperty) {
            continue;
        }
        let mut nested = Bulk::default();
        for y in reifications(&triple, owl::ANNOTATION, ctx) {
            if visited.insert(y.clone()) {
                nested.extend(on_node(&y, ctx, visited));
                nested.triples.extend(header(&y, &triple, owl::ANNOTATION));
            }
        }
        bulk.annotations.insert(
            Annotation::new(property, AnnotationValue::from_node(&triple.object))
                .with_annotations(nested.annotations),
        );
        bulk.triples.extend(nested.triples);
        bulk.triples.insert(triple);
    }
    bulk
}

// =============================================================================
// WRITING
// =============================================================================

pub(crate) fn write(writer: &mut Writer<'_>, anchor: &Anchor, annotations: &BTreeSet<Annotation>) {
    if annotations.is_empty() {
        return;
    }
    let subject = match anchor {
        Anchor::Triple(root) => {
            let x = writer.blank();
            write_header(writer, &x, root, owl::AXIOM);
            x
        }
        Anchor::Node(node) => node.clone(),
    };
    for annotation in annotations {
        write_one(writer, &subject, annotation);
    }
}

fn write_header(writer: &mut Writer<'_>, x: &Node, triple: &Triple, type_iri: &str) {
    writer.triple(x.clone(), rdf::TYPE, Node::iri(type_iri));
    writer.triple(x.clone(), owl::ANNOTATED_SOURCE, triple.subject.clone());
    writer.triple(x.clone(), owl::ANNOTATED_PROPERTY, triple.predicate.clone());
    writer.triple(x.clone(), owl::ANNOTATED_TARGET, triple.object.clone());
}

fn write_one(writer: &mut Writer<'_>, subject: &Node, annotation: &Annotation) {
    writer.declare_kind(EntityKind::AnnotationProperty, &annotation.property);
    let triple = writer.triple(subject.clone(), &annotation.property, annotation.value.node());
    if annotation.annotations.is_empty() {
        return;
    }
    let y = writer.blank();
    write_header(writer, &y, &triple, owl::ANNOTATION);
    for nested in &annotation.annotations {
        write_one(writer, &y, nested);
    }
}
