//! # Internal Model
//!
//! The write-through object cache over one graph.
//!
//! `InternalModel` owns the graph, one `ObjectMap` per axiom shape and one
//! per entity kind. Reads are served from the maps and fall back to the
//! translators; writes go to the graph and the maps together.
//!
//! The model's mutation API is the only sanctioned way to change the graph
//! while caches are alive. Edits made on the graph behind its back (through
//! `graph_mut` or before `from_graph`) require `clear_cache`.

use crate::axiom::{Axiom, AxiomBody, AxiomType, Entity, Individual};
use crate::cache::ObjectMap;
use crate::config::ModelConfig;
use crate::graph::GraphStore;
use crate::normalize::{TransformReport, Transforms};
use crate::object::{OntObject, Witnessed};
use crate::personality::EntityKind;
use crate::translate::{AxiomTranslator, ReadContext, Translators};
use crate::vocab::rdf;
use crate::{Node, OntError, Triple};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, trace};

// =============================================================================
// MODEL
// =============================================================================

/// Structured, cached view of one graph.
#[derive(Debug)]
pub struct InternalModel<G: GraphStore> {
    graph: G,
    config: ModelConfig,
    translators: Translators,
    axioms: BTreeMap<AxiomType, ObjectMap<Axiom>>,
    entities: BTreeMap<EntityKind, ObjectMap<Entity>>,
}

impl<G: GraphStore> InternalModel<G> {
    /// Wrap `graph`. Nothing is read until the first query.
    pub fn new(graph: G, config: ModelConfig) -> Self {
        let axioms = AxiomType::ALL
            .into_iter()
            .map(|ty| (ty, ObjectMap::new(ty.to_string())))
            .collect();
        let entities = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, ObjectMap::new(format!("{:?}", kind))))
            .collect();
        Self {
            graph,
            config,
            translators: Translators::standard(),
            axioms,
            entities,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Direct graph access. Any change made through it invalidates the
    /// caches until `clear_cache` is called.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    /// Switch configuration. Cached objects were read under the old one.
    pub fn set_config(&mut self, config: ModelConfig) {
        self.config = config;
        self.clear_cache();
    }

    fn context(&self) -> ReadContext<'_> {
        ReadContext::new(&self.graph, &self.config)
    }

    // -------------------------------------------------------------------------
    // Axiom reads
    // -------------------------------------------------------------------------

    /// Every axiom of one shape. Loads the shape's map on first use.
    pub fn axioms(&mut self, ty: AxiomType) -> Result<Vec<Arc<OntObject<Axiom>>>, OntError> {
        let translator = translator(&self.translators, ty)?;
        let ctx = ReadContext::new(&self.graph, &self.config);
        let map = axiom_map(&mut self.axioms, ty);
        if map.has_new() {
            // Manual additions would block the load; reread everything.
            map.clear();
        }
        map.load(|| translator.axioms(&ctx))?;
        Ok(map.values().cloned().collect())
    }

    /// Every axiom of every shape, in shape order.
    pub fn all_axioms(&mut self) -> Result<Vec<Arc<OntObject<Axiom>>>, OntError> {
        let mut all = Vec::new();
        for ty in AxiomType::ALL {
            all.extend(self.axioms(ty)?);
        }
        Ok(all)
    }

    /// Point lookup. Never loads the whole shape.
    pub fn get(&mut self, axiom: &Axiom) -> Result<Option<Arc<OntObject<Axiom>>>, OntError> {
        let ty = axiom.axiom_type();
        let translator = translator(&self.translators, ty)?;
        let ctx = ReadContext::new(&self.graph, &self.config);
        axiom_map(&mut self.axioms, ty).get(axiom, |a| translator.find(a, &ctx))
    }

    pub fn contains(&mut self, axiom: &Axiom) -> Result<bool, OntError> {
        Ok(self.get(axiom)?.is_some())
    }

    /// Whether the map for `ty` holds every axiom of its shape.
    #[must_use]
    pub fn is_loaded(&self, ty: AxiomType) -> bool {
        self.axioms.get(&ty).is_some_and(ObjectMap::is_loaded)
    }

    /// Number of axioms currently cached for `ty`, loaded or not.
    #[must_use]
    pub fn cached(&self, ty: AxiomType) -> usize {
        self.axioms.get(&ty).map_or(0, ObjectMap::len)
    }

    // -------------------------------------------------------------------------
    // Entity reads
    // -------------------------------------------------------------------------

    /// Every node that currently fits the kind's view. Builtins that appear
    /// in the graph are included; their objects carry no witnesses.
    pub fn entities(&mut self, kind: EntityKind) -> Result<Vec<Arc<OntObject<Entity>>>, OntError> {
        let personality = self.config.personality();
        let graph = &self.graph;
        let map = entity_map(&mut self.entities, kind);
        map.load(|| {
            Ok::<_, OntError>(
                personality
                    .nodes(kind.view(), graph)
                    .into_iter()
                    .filter_map(|handle| entity_object(kind, handle.node(), graph))
                    .collect(),
            )
        })?;
        Ok(map.values().cloned().collect())
    }

    /// One entity, if `iri` fits the kind's view.
    pub fn entity(
        &mut self,
        kind: EntityKind,
        iri: &str,
    ) -> Result<Option<Arc<OntObject<Entity>>>, OntError> {
        let personality = self.config.personality();
        let graph = &self.graph;
        entity_map(&mut self.entities, kind).get(&Entity::new(kind, iri), |entity| {
            let node = entity.node();
            if !personality.test(&node, kind.view(), graph) {
                return Ok::<_, OntError>(None);
            }
            Ok(entity_object(kind, &node, graph))
        })
    }

    // -------------------------------------------------------------------------
    // Axiom writes
    // -------------------------------------------------------------------------

    /// Encode `axiom` into the graph and cache it.
    ///
    /// A shape that cannot encode the value fails before touching the graph.
    pub fn add(&mut self, axiom: Axiom) -> Result<Arc<OntObject<Axiom>>, OntError> {
        let ty = axiom.axiom_type();
        let written = self
            .translators
            .encode(&axiom, &mut self.graph, self.config.personality())?;
        debug!(
            shape = %ty,
            witnesses = written.witnesses.len(),
            changed = written.changed,
            declared = written.declared,
            "axiom added"
        );
        if written.changed {
            // New triples can change how existing statements decode,
            // including statements of this very shape.
            self.clear_cache();
        }
        let mut object = OntObject::new(axiom).with_triples(written.witnesses);
        if let Some(root) = written.root {
            object = object.with_root(root);
        }
        if !written.changed {
            // Already stated; other forms of the same axiom are witnesses too.
            let translator = translator(&self.translators, ty)?;
            let ctx = ReadContext::new(&self.graph, &self.config);
            if let Some(found) = translator.find(object.value(), &ctx)? {
                object.merge(found);
            }
        }
        Ok(axiom_map(&mut self.axioms, ty).insert(object))
    }

    /// Delete the axiom's witness triples and evict it.
    ///
    /// Triples that still witness another axiom stay in the graph: those of
    /// cached objects, those of other axioms decoded from the same
    /// statements, and blank-node structure still referenced from outside.
    /// Returns `false` when the axiom is not present, or when every witness
    /// is protected and the graph is left unchanged.
    pub fn remove(&mut self, axiom: &Axiom) -> Result<bool, OntError> {
        let Some(object) = self.get(axiom)? else {
            return Ok(false);
        };
        self.guard_anonymous(axiom)?;

        let mut doomed = object.triples();
        for map in self.axioms.values() {
            for other in map.values().filter(|o| o.value() != axiom) {
                for triple in other.triples() {
                    doomed.remove(&triple);
                }
            }
        }
        self.protect_shared(axiom, &mut doomed);
        self.protect_referenced(object.root(), &mut doomed);

        let mut deleted = 0usize;
        for triple in &doomed {
            if self.graph.delete(triple) {
                deleted += 1;
            }
        }
        debug!(
            shape = %axiom.axiom_type(),
            witnesses = object.triples().len(),
            deleted,
            "axiom removed"
        );

        if deleted == 0 {
            // Every witness is shared or imported: the graph still states
            // the axiom, so it stays cached.
            let ty = axiom.axiom_type();
            let translator = translator(&self.translators, ty)?;
            let still_read = translator.find(axiom, &self.context())?.is_some();
            if !still_read {
                axiom_map(&mut self.axioms, ty).remove(axiom);
            }
            return Ok(false);
        }
        // Deleted triples can change how any statement decodes, an equal
        // axiom in another form included.
        self.clear_cache();
        Ok(true)
    }

    /// An anonymous individual must keep at least one class assertion, or
    /// nothing would identify it any more.
    fn guard_anonymous(&self, axiom: &Axiom) -> Result<(), OntError> {
        let AxiomBody::ClassAssertion {
            individual: individual @ Individual::Anonymous(_),
            ..
        } = &axiom.body
        else {
            return Ok(());
        };
        let node = individual.node();
        let ctx = self.context();
        let assertions = translator(&self.translators, AxiomType::ClassAssertion)?;
        let remaining = self
            .graph
            .find(Some(&node), Some(&Node::iri(rdf::TYPE)), None)
            .into_iter()
            .filter(|t| assertions.test_statement(t, &ctx))
            .count();
        if remaining <= 1 {
            return Err(OntError::IllegalState(format!(
                "removing the last class assertion of anonymous individual {}",
                node
            )));
        }
        Ok(())
    }

    /// Keep the witnesses of every other axiom some translator reads from a
    /// doomed statement.
    fn protect_shared(&self, axiom: &Axiom, doomed: &mut BTreeSet<Triple>) {
        let ctx = self.context();
        let statements: Vec<Triple> = doomed.iter().cloned().collect();
        for statement in &statements {
            for translator in self.translators.iter() {
                if !translator.test_statement(statement, &ctx) {
                    continue;
                }
                let Ok(objects) = translator.decode(statement, &ctx) else {
                    continue;
                };
                for other in objects.iter().filter(|o| o.value() != axiom) {
                    for triple in other.triples() {
                        doomed.remove(&triple);
                    }
                }
            }
        }
    }

    /// Keep blank-node structure that a surviving triple still points at.
    fn protect_referenced(&self, root: Option<&Triple>, doomed: &mut BTreeSet<Triple>) {
        loop {
            let subjects: BTreeSet<Node> = doomed
                .iter()
                .filter(|t| Some(*t) != root && t.subject.is_blank())
                .map(|t| t.subject.clone())
                .collect();
            let referenced: Vec<Node> = subjects
                .into_iter()
                .filter(|b| {
                    self.graph
                        .find(None, None, Some(b))
                        .iter()
                        .any(|t| !doomed.contains(t))
                })
                .collect();
            if referenced.is_empty() {
                return;
            }
            for b in &referenced {
                trace!(node = %b, "keeping referenced blank node");
            }
            doomed.retain(|t| Some(t) == root || !referenced.contains(&t.subject));
        }
    }

    // -------------------------------------------------------------------------
    // Raw edits and cache control
    // -------------------------------------------------------------------------

    /// Assert one triple through the model. Caches are dropped on change.
    pub fn add_triple(&mut self, triple: Triple) -> bool {
        let changed = self.graph.add(triple);
        if changed {
            self.clear_cache();
        }
        changed
    }

    /// Retract one triple through the model. Caches are dropped on change.
    pub fn delete_triple(&mut self, triple: &Triple) -> bool {
        let changed = self.graph.delete(triple);
        if changed {
            self.clear_cache();
        }
        changed
    }

    /// Drop every cached object; the next reads go to the graph.
    pub fn clear_cache(&mut self) {
        for map in self.axioms.values_mut() {
            map.clear();
        }
        self.clear_entities();
    }

    fn clear_entities(&mut self) {
        for map in self.entities.values_mut() {
            map.clear();
        }
    }

    /// Run the standard normalization passes over the graph.
    pub fn normalize(&mut self) -> Result<TransformReport, OntError> {
        let report = Transforms::standard(self.config.personality()).run(&mut self.graph)?;
        if report.changes() > 0 {
            self.clear_cache();
        }
        Ok(report)
    }
}

fn translator(translators: &Translators, ty: AxiomType) -> Result<&dyn AxiomTranslator, OntError> {
    translators
        .get(ty)
        .ok_or_else(|| OntError::UnsupportedAxiom {
            shape: ty,
            reason: "no translator registered".to_string(),
        })
}

fn axiom_map(
    maps: &mut BTreeMap<AxiomType, ObjectMap<Axiom>>,
    ty: AxiomType,
) -> &mut ObjectMap<Axiom> {
    maps.entry(ty)
        .or_insert_with(|| ObjectMap::new(ty.to_string()))
}

fn entity_map(
    maps: &mut BTreeMap<EntityKind, ObjectMap<Entity>>,
    kind: EntityKind,
) -> &mut ObjectMap<Entity> {
    maps.entry(kind)
        .or_insert_with(|| ObjectMap::new(format!("{:?}", kind)))
}

/// Named entities only; the declaration triple is the witness when present.
fn entity_object(kind: EntityKind, node: &Node, graph: &dyn GraphStore) -> Option<OntObject<Entity>> {
    let iri = node.as_iri()?;
    let object = OntObject::new(Entity::new(kind, iri));
    let declaration = Triple::new(node.clone(), Node::iri(rdf::TYPE), Node::iri(kind.type_iri()));
    if graph.contains(&declaration) {
        return Some(object.with_root(declaration));
    }
    Some(object)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::{Annotation, ClassExpression, ObjectPropertyExpression};
    use crate::config::ReadSettings;
    use crate::graph::{Graph, UnionGraph};
    use crate::personality::{Personality, View};
    use crate::vocab::{owl, rdfs};

    fn ex(local: &str) -> String {
        format!("http://example.org/{}", local)
    }

    fn sub_class(sub: ClassExpression, sup: ClassExpression) -> Axiom {
        Axiom::new(AxiomBody::SubClassOf { sub, sup })
    }

    fn named(local: &str) -> ClassExpression {
        ClassExpression::class(ex(local))
    }

    fn some(property: &str, filler: &str) -> ClassExpression {
        ClassExpression::ObjectSomeValuesFrom(
            ObjectPropertyExpression::named(ex(property)),
            Box::new(named(filler)),
        )
    }

    fn anonymous_member(class: &str, label: &str) -> Axiom {
        Axiom::new(AxiomBody::ClassAssertion {
            class: named(class),
            individual: Individual::Anonymous(label.to_string()),
        })
    }

    fn model() -> InternalModel<Graph> {
        InternalModel::new(Graph::new(), ModelConfig::default())
    }

    fn values(objects: &[Arc<OntObject<Axiom>>]) -> BTreeSet<Axiom> {
        objects.iter().map(|o| o.value().clone()).collect()
    }

    #[test]
    fn get_after_add_is_served_from_cache() {
        let mut model = model();
        let axiom = sub_class(named("A"), named("B"));
        model.add(axiom.clone()).expect("add");
        assert!(!model.is_loaded(AxiomType::SubClassOf));
        let found = model.get(&axiom).expect("get").expect("present");
        assert_eq!(found.value(), &axiom);
        assert!(!model.is_loaded(AxiomType::SubClassOf));
        assert_eq!(model.cached(AxiomType::SubClassOf), 1);
    }

    #[test]
    fn full_read_after_add_rereads_graph() {
        let mut model = model();
        model.add(sub_class(named("A"), named("B"))).expect("add");
        model.add(sub_class(named("B"), named("C"))).expect("add");
        let all = model.axioms(AxiomType::SubClassOf).expect("axioms");
        assert_eq!(all.len(), 2);
        assert!(model.is_loaded(AxiomType::SubClassOf));
        // Implicit declarations are axioms of their own.
        assert_eq!(model.axioms(AxiomType::Declaration).expect("axioms").len(), 3);
    }

    #[test]
    fn remove_deletes_expression_structure() {
        let mut model = model();
        let doomed = sub_class(named("A"), some("p", "B"));
        model.add(doomed.clone()).expect("add");
        model.add(sub_class(named("C"), named("B"))).expect("add");
        assert!(model.remove(&doomed).expect("remove"));
        assert!(!model.graph().has(None, Some(&Node::iri(owl::SOME_VALUES_FROM)), None));
        assert!(!model.graph().has(None, Some(&Node::iri(owl::ON_PROPERTY)), None));
        let left = values(&model.axioms(AxiomType::SubClassOf).expect("axioms"));
        assert_eq!(left, BTreeSet::from([sub_class(named("C"), named("B"))]));
        assert!(!model.contains(&doomed).expect("contains"));
    }

    #[test]
    fn remove_missing_axiom_is_false() {
        let mut model = model();
        assert!(!model.remove(&sub_class(named("A"), named("B"))).expect("remove"));
    }

    #[test]
    fn shared_blank_expression_survives() {
        let mut model = model();
        let first = sub_class(named("A"), some("p", "B"));
        let written = model.add(first.clone()).expect("add");
        let root = written.root().cloned().expect("root");
        model
            .add(Axiom::new(AxiomBody::Declaration(Entity::class(ex("C")))))
            .expect("add");
        // A second axiom pointing at the same restriction node.
        model.add_triple(Triple::new(
            Node::iri(ex("C")),
            Node::iri(rdfs::SUB_CLASS_OF),
            root.object.clone(),
        ));
        assert!(model.remove(&first).expect("remove"));
        assert!(!model.graph().contains(&root));
        let left = values(&model.axioms(AxiomType::SubClassOf).expect("axioms"));
        assert_eq!(left, BTreeSet::from([sub_class(named("C"), some("p", "B"))]));
    }

    #[test]
    fn split_sibling_keeps_root_statement() {
        let config = ModelConfig::default()
            .with_settings(ReadSettings::default().with_split_axiom_annotations(true));
        let mut model = InternalModel::new(Graph::new(), config);
        let base = sub_class(named("A"), named("B"));
        let one = base.clone().with_annotations([Annotation::literal(rdfs::COMMENT, "one")]);
        let two = base.with_annotations([Annotation::literal(rdfs::COMMENT, "two")]);
        model.add(one.clone()).expect("add");
        model.add(two.clone()).expect("add");
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("axioms").len(), 2);

        assert!(model.remove(&one).expect("remove"));
        let left = values(&model.axioms(AxiomType::SubClassOf).expect("axioms"));
        assert_eq!(left, BTreeSet::from([two]));
    }

    #[test]
    fn last_anonymous_class_assertion_is_guarded() {
        let mut model = model();
        let only = anonymous_member("C", "b1");
        model.add(only.clone()).expect("add");
        let err = model.remove(&only).expect_err("guarded");
        assert!(matches!(err, OntError::IllegalState(_)));
        assert!(model.contains(&only).expect("contains"));
    }

    #[test]
    fn second_anonymous_class_assertion_can_go() {
        let mut model = model();
        let first = anonymous_member("C", "b1");
        let second = anonymous_member("D", "b1");
        model.add(first.clone()).expect("add");
        model.add(second.clone()).expect("add");
        assert!(model.remove(&first).expect("remove"));
        let left = values(&model.axioms(AxiomType::ClassAssertion).expect("axioms"));
        assert_eq!(left, BTreeSet::from([second.clone()]));
        assert!(model.remove(&second).is_err());
    }

    #[test]
    fn raw_edits_invalidate_loaded_maps() {
        let mut model = model();
        model.add(sub_class(named("A"), named("B"))).expect("add");
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("axioms").len(), 1);
        assert!(model.add_triple(Triple::new(
            Node::iri(ex("B")),
            Node::iri(rdfs::SUB_CLASS_OF),
            Node::iri(ex("A")),
        )));
        assert!(!model.is_loaded(AxiomType::SubClassOf));
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("axioms").len(), 2);
        assert!(model.delete_triple(&Triple::new(
            Node::iri(ex("B")),
            Node::iri(rdfs::SUB_CLASS_OF),
            Node::iri(ex("A")),
        )));
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("axioms").len(), 1);
    }

    #[test]
    fn unsupported_encoding_leaves_graph_alone() {
        let mut model = model();
        let three = Axiom::new(AxiomBody::EquivalentClasses(BTreeSet::from([
            named("A"),
            named("B"),
            named("C"),
        ])));
        let err = model.add(three).expect_err("unsupported");
        assert!(matches!(err, OntError::UnsupportedAxiom { .. }));
        assert_eq!(model.graph().size(), 0);
    }

    #[test]
    fn entities_follow_declarations() {
        let mut model = model();
        model.add(sub_class(named("A"), named("B"))).expect("add");
        let classes: BTreeSet<Entity> = model
            .entities(EntityKind::Class)
            .expect("entities")
            .iter()
            .map(|o| o.value().clone())
            .collect();
        assert!(classes.contains(&Entity::class(ex("A"))));
        assert!(classes.contains(&Entity::class(ex("B"))));

        let a = model
            .entity(EntityKind::Class, &ex("A"))
            .expect("entity")
            .expect("declared");
        assert_eq!(a.triples().len(), 1);
        assert!(model.entity(EntityKind::Class, &ex("Z")).expect("entity").is_none());
    }

    #[test]
    fn removing_declaration_refreshes_entities() {
        let mut model = model();
        let declaration = Axiom::new(AxiomBody::Declaration(Entity::class(ex("A"))));
        model.add(declaration.clone()).expect("add");
        assert_eq!(model.entities(EntityKind::Class).expect("entities").len(), 1);
        assert!(model.remove(&declaration).expect("remove"));
        assert!(model.entities(EntityKind::Class).expect("entities").is_empty());
    }

    /// A and B declared, disjoint both pairwise and through an
    /// `owl:AllDisjointClasses` list.
    fn doubly_disjoint() -> (Graph, Axiom) {
        let mut graph = Graph::new();
        for c in ["A", "B"] {
            Personality::default()
                .declare(&Node::iri(ex(c)), View::Class, &mut graph)
                .expect("declare");
        }
        graph.add(Triple::new(Node::iri(ex("A")), Node::iri(owl::DISJOINT_WITH), Node::iri(ex("B"))));
        let x = Node::blank("x");
        let (first, second) = (Node::blank("l0"), Node::blank("l1"));
        graph.add(Triple::new(x.clone(), Node::iri(rdf::TYPE), Node::iri(owl::ALL_DISJOINT_CLASSES)));
        graph.add(Triple::new(x, Node::iri(owl::MEMBERS), first.clone()));
        graph.add(Triple::new(first.clone(), Node::iri(rdf::FIRST), Node::iri(ex("A"))));
        graph.add(Triple::new(first, Node::iri(rdf::REST), second.clone()));
        graph.add(Triple::new(second.clone(), Node::iri(rdf::FIRST), Node::iri(ex("B"))));
        graph.add(Triple::new(second, Node::iri(rdf::REST), Node::iri(rdf::NIL)));
        let axiom = Axiom::new(AxiomBody::DisjointClasses(BTreeSet::from([named("A"), named("B")])));
        (graph, axiom)
    }

    #[test]
    fn re_adding_keeps_every_form() {
        let (graph, axiom) = doubly_disjoint();
        let mut model = InternalModel::new(graph.clone(), ModelConfig::default());
        assert_eq!(model.axioms(AxiomType::DisjointClasses).expect("axioms").len(), 1);
        let added = model.add(axiom.clone()).expect("add");
        assert_eq!(added.triples().len(), 7);

        // Same on a model that never loaded the shape.
        let mut partial = InternalModel::new(graph, ModelConfig::default());
        assert_eq!(partial.add(axiom.clone()).expect("add").triples().len(), 7);
        assert!(partial.remove(&axiom).expect("remove"));
        partial.clear_cache();
        assert!(partial.axioms(AxiomType::DisjointClasses).expect("axioms").is_empty());
    }

    #[test]
    fn imported_axiom_is_not_removed() {
        let mut import = Graph::new();
        let axiom = sub_class(named("A"), named("B"));
        Translators::standard()
            .encode(&axiom, &mut import, &Personality::default())
            .expect("encode");
        let mut union = UnionGraph::new(Graph::new());
        union.add_import(Arc::new(import));
        let mut model = InternalModel::new(union, ModelConfig::default());
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("axioms").len(), 1);

        assert!(!model.remove(&axiom).expect("remove"));
        assert!(model.contains(&axiom).expect("contains"));
        assert_eq!(model.axioms(AxiomType::SubClassOf).expect("axioms").len(), 1);
    }
}
