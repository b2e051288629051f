//! Declarations and annotation assertions.
//!
//! These two shapes are coupled: depending on `ReadSettings`, annotation
//! assertions are either read as axioms of their own or folded into the
//! declaration of their subject.

use super::{Anchor, AxiomTranslator, Decoded, ReadContext, Writer, annotations, assemble};
use crate::axiom::{Annotation, AnnotationSubject, AnnotationValue, Axiom, AxiomBody, AxiomType, Entity};
use crate::object::OntObject;
use crate::personality::{EntityKind, View};
use crate::vocab::{owl, rdf};
use crate::{Node, OntError, Triple};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The first kind, in declaration-priority order, `subject` is declared as.
fn declared_kind(subject: &Node, ctx: &ReadContext<'_>) -> Option<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .find(|k| ctx.graph().has_type(subject, k.type_iri()) && ctx.fits(subject, k.view()))
}

/// Annotation assertions on `subject` that belong to its declaration
/// rather than standing alone.
fn folded_assertions(subject: &Node, ctx: &ReadContext<'_>) -> Vec<Triple> {
    let settings = ctx.settings();
    ctx.graph()
        .find(Some(subject), None, None)
        .into_iter()
        .filter(|t| ctx.fits(&t.predicate, View::AnnotationProperty))
        .filter(|t| {
            !settings.read_annotation_axioms
                || (!settings.allow_bulk_annotation_assertions && annotations::is_annotated(t, ctx))
        })
        .collect()
}

fn unsupported(shape: AxiomType) -> OntError {
    OntError::UnsupportedAxiom {
        shape,
        reason: "axiom body does not match the translator".to_string(),
    }
}

// =============================================================================
// DECLARATIONS
// =============================================================================

/// `E rdf:type <kind>` for a named entity.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DeclarationTranslator;

impl AxiomTranslator for DeclarationTranslator {
    fn axiom_type(&self) -> AxiomType {
        AxiomType::Declaration
    }

    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Triple> {
        let rdf_type = Node::iri(rdf::TYPE);
        EntityKind::ALL
            .into_iter()
            .flat_map(|k| ctx.graph().find(None, Some(&rdf_type), Some(&Node::iri(k.type_iri()))))
            .collect()
    }

    fn test_statement(&self, triple: &Triple, ctx: &ReadContext<'_>) -> bool {
        if !ctx.settings().allow_read_declarations || !triple.has_predicate(rdf::TYPE) {
            return false;
        }
        let Some(kind) = triple.object.as_iri().and_then(EntityKind::from_type_iri) else {
            return false;
        };
        triple.subject.is_iri() && ctx.fits(&triple.subject, kind.view())
    }

    fn decode(&self, root: &Triple, ctx: &ReadContext<'_>) -> Result<Vec<OntObject<Axiom>>, OntError> {
        let (Some(iri), Some(kind)) = (
            root.subject.as_iri(),
            root.object.as_iri().and_then(EntityKind::from_type_iri),
        ) else {
            return Err(OntError::decode(root, "not a declaration statement"));
        };
        let body = AxiomBody::Declaration(Entity::new(kind, iri));
        let objects = assemble(root, Decoded::simple(root, body), ctx, true);

        // Folded assertions go to one declaration only.
        if declared_kind(&root.subject, ctx) != Some(kind) {
            return Ok(objects);
        }
        let mut folded = BTreeSet::new();
        let mut witnesses = BTreeSet::new();
        for assertion in folded_assertions(&root.subject, ctx) {
            let Some(property) = assertion.predicate.as_iri() else {
                continue;
            };
            let nested = annotations::read_merged(&assertion, ctx);
            folded.insert(
                Annotation::new(property, AnnotationValue::from_node(&assertion.object))
                    .with_annotations(nested.annotations),
            );
            witnesses.extend(nested.triples);
            witnesses.insert(assertion);
        }
        if folded.is_empty() {
            return Ok(objects);
        }
        let witnesses = Arc::new(OntObject::new(()).with_triples(witnesses));
        Ok(objects
            .into_iter()
            .map(|mut object| {
                object.add_part(witnesses.clone());
                object.map(|a| a.with_annotations(folded.iter().cloned()))
            })
            .collect())
    }

    fn encode(&self, axiom: &Axiom, writer: &mut Writer<'_>) -> Result<(), OntError> {
        let AxiomBody::Declaration(entity) = &axiom.body else {
            return Err(unsupported(self.axiom_type()));
        };
        let root = writer.root(entity.node(), rdf::TYPE, Node::iri(entity.kind.type_iri()));
        annotations::write(writer, &Anchor::Triple(root), &axiom.annotations);
        Ok(())
    }
}

// =============================================================================
// ANNOTATION ASSERTIONS
// =============================================================================

/// `s p o` where `p` is an annotation property.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AnnotationAssertionTranslator;

impl AnnotationAssertionTranslator {
    fn subject_fits(subject: &Node, ctx: &ReadContext<'_>) -> bool {
        match subject {
            Node::Iri(_) => !ctx.graph().has_type(subject, owl::ONTOLOGY),
            Node::Blank(_) => ctx.fits(subject, View::AnonymousIndividual),
            Node::Literal(_) => false,
        }
    }
}

impl AxiomTranslator for AnnotationAssertionTranslator {
    fn axiom_type(&self) -> AxiomType {
        AxiomType::AnnotationAssertion
    }

    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Triple> {
        let graph = ctx.graph();
        let personality = ctx.personality();
        let mut properties: BTreeSet<Node> = personality
            .nodes(View::AnnotationProperty, graph)
            .into_iter()
            .map(|h| h.into_node())
            .collect();
        properties.extend(
            personality
                .builtins()
                .of_kind(EntityKind::AnnotationProperty)
                .map(Node::iri),
        );
        properties
            .iter()
            .flat_map(|p| graph.find(None, Some(p), None))
            .collect()
    }

    fn test_statement(&self, triple: &Triple, ctx: &ReadContext<'_>) -> bool {
        let settings = ctx.settings();
        if !settings.read_annotation_axioms
            || !ctx.fits(&triple.predicate, View::AnnotationProperty)
            || !Self::subject_fits(&triple.subject, ctx)
        {
            return false;
        }
        // Annotated assertions without bulk support belong to the
        // subject's declaration when there is one to carry them.
        let folded = !settings.allow_bulk_annotation_assertions
            && settings.allow_read_declarations
            && annotations::is_annotated(triple, ctx)
            && declared_kind(&triple.subject, ctx).is_some();
        !folded
    }

    fn decode(&self, root: &Triple, ctx: &ReadContext<'_>) -> Result<Vec<OntObject<Axiom>>, OntError> {
        let (Some(property), Some(subject)) = (
            root.predicate.as_iri(),
            AnnotationSubject::from_node(&root.subject),
        ) else {
            return Err(OntError::decode(root, "not an annotation assertion"));
        };
        let body = AxiomBody::AnnotationAssertion {
            property: property.to_string(),
            subject,
            value: AnnotationValue::from_node(&root.object),
        };
        let bulk = ctx.settings().allow_bulk_annotation_assertions;
        Ok(assemble(root, Decoded::simple(root, body), ctx, bulk))
    }

    fn encode(&self, axiom: &Axiom, writer: &mut Writer<'_>) -> Result<(), OntError> {
        let AxiomBody::AnnotationAssertion {
            property,
            subject,
            value,
        } = &axiom.body
        else {
            return Err(unsupported(self.axiom_type()));
        };
        writer.declare_kind(EntityKind::AnnotationProperty, property);
        let root = writer.root(subject.node(), property, value.node());
        annotations::write(writer, &Anchor::Triple(root), &axiom.annotations);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelConfig, ReadSettings};
    use crate::graph::{Graph, GraphStore};
    use crate::object::Witnessed;
    use crate::translate::Translators;
    use crate::vocab::rdfs;
    use crate::Personality;

    const C: &str = "http://example.org/C";

    /// `C` declared as a class, with one annotated and one plain comment.
    fn annotated_graph() -> Graph {
        let mut graph = Graph::new();
        let registry = Translators::standard();
        let personality = Personality::default();
        let annotated = Axiom::new(AxiomBody::AnnotationAssertion {
            property: rdfs::COMMENT.to_string(),
            subject: AnnotationSubject::Iri(C.to_string()),
            value: AnnotationValue::Literal(crate::Literal::plain("annotated")),
        })
        .with_annotations([Annotation::literal(rdfs::LABEL, "note")]);
        let plain = Axiom::new(AxiomBody::AnnotationAssertion {
            property: rdfs::COMMENT.to_string(),
            subject: AnnotationSubject::Iri(C.to_string()),
            value: AnnotationValue::Literal(crate::Literal::plain("plain")),
        });
        for axiom in [
            Axiom::new(AxiomBody::Declaration(Entity::class(C))),
            annotated,
            plain,
        ] {
            registry.encode(&axiom, &mut graph, &personality).expect("encode");
        }
        graph
    }

    fn read(graph: &Graph, settings: ReadSettings, ty: AxiomType) -> Vec<Axiom> {
        let config = ModelConfig::default().with_settings(settings);
        let ctx = ReadContext::new(graph, &config);
        let registry = Translators::standard();
        registry
            .get(ty)
            .expect("registered")
            .axioms(&ctx)
            .expect("decode")
            .into_iter()
            .map(OntObject::into_value)
            .collect()
    }

    #[test]
    fn bulk_assertions_stand_alone_by_default() {
        let graph = annotated_graph();
        let assertions = read(&graph, ReadSettings::default(), AxiomType::AnnotationAssertion);
        assert_eq!(assertions.len(), 2);
        assert!(assertions.iter().any(Axiom::is_annotated));
        let declarations = read(&graph, ReadSettings::default(), AxiomType::Declaration);
        assert!(declarations.iter().all(|a| !a.is_annotated()));
    }

    #[test]
    fn annotated_assertion_folds_without_bulk_support() {
        let graph = annotated_graph();
        let settings = ReadSettings::default().with_allow_bulk_annotation_assertions(false);
        let assertions = read(&graph, settings, AxiomType::AnnotationAssertion);
        assert_eq!(assertions.len(), 1);
        assert!(!assertions[0].is_annotated());

        let declarations = read(&graph, settings, AxiomType::Declaration);
        assert_eq!(declarations.len(), 1);
        let folded: Vec<&Annotation> = declarations[0].annotations.iter().collect();
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].annotations.len(), 1);
    }

    #[test]
    fn declarations_can_be_switched_off() {
        let graph = annotated_graph();
        let settings = ReadSettings::default().with_allow_read_declarations(false);
        assert!(read(&graph, settings, AxiomType::Declaration).is_empty());
    }

    #[test]
    fn ontology_header_is_not_an_assertion() {
        let mut graph = Graph::new();
        let ontology = Node::iri("http://example.org/onto");
        graph.add(Triple::new(ontology.clone(), Node::iri(rdf::TYPE), Node::iri(owl::ONTOLOGY)));
        graph.add(Triple::new(ontology, Node::iri(rdfs::COMMENT), Node::literal("header")));
        assert!(read(&graph, ReadSettings::default(), AxiomType::AnnotationAssertion).is_empty());
    }

    #[test]
    fn folded_witnesses_include_reification() {
        let graph = annotated_graph();
        let settings = ReadSettings::default().with_read_annotation_axioms(false);
        let config = ModelConfig::default().with_settings(settings);
        let ctx = ReadContext::new(&graph, &config);
        let objects = DeclarationTranslator.axioms(&ctx).expect("decode");
        assert_eq!(objects.len(), 1);
        // Declaration, two assertions, and the reification of one of them.
        let reification_size = 4 + 1;
        assert_eq!(objects[0].triples().len(), 1 + 2 + reification_size);
        assert_eq!(objects[0].value().annotations.len(), 2);
    }
}
