//! # Axiom Translation
//!
//! Stateless per-shape codecs between root statements and structured axioms.
//!
//! Decoding always starts from a root statement: the single triple that is
//! the spine of an axiom (or, for blank-rooted n-ary shapes and rules, the
//! typing triple of the root node). Annotations are then collected around
//! that root according to `ReadSettings`.
//!
//! Encoding goes through a `Writer`, which records every triple the axiom
//! owns so the model can later delete exactly those.
//!
//! ```
//! use ontoview_core::{Graph, GraphStore, ModelConfig, Node, Triple};
//! use ontoview_core::axiom::AxiomType;
//! use ontoview_core::translate::{ReadContext, Translators};
//! use ontoview_core::vocab::{owl, rdf};
//!
//! let mut graph = Graph::new();
//! graph.add(Triple::new(
//!     Node::iri("http://example.org/C"),
//!     Node::iri(rdf::TYPE),
//!     Node::iri(owl::CLASS),
//! ));
//! let config = ModelConfig::default();
//! let ctx = ReadContext::new(&graph, &config);
//! let registry = Translators::standard();
//! let declarations = registry
//!     .get(AxiomType::Declaration)
//!     .map(|t| t.axioms(&ctx))
//!     .transpose()
//!     .expect("decode")
//!     .unwrap_or_default();
//! assert_eq!(declarations.len(), 1);
//! ```

mod annotations;
mod declarations;
mod expressions;
mod lists;
mod shapes;
mod writer;

pub use writer::{Writer, Written};

use crate::axiom::{Axiom, AxiomBody, AxiomType, ClassExpression};
use crate::config::{ModelConfig, ReadSettings};
use crate::graph::{Graph, GraphStore};
use crate::object::{OntObject, Witnessed};
use crate::personality::{Personality, View};
use crate::{Node, OntError, Triple};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

// =============================================================================
// DECODING PRIMITIVES
// =============================================================================

/// A sub-structure that could not be decoded. The translator attaches the
/// root statement when it turns this into an `OntError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed(pub String);

impl Malformed {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub(crate) fn at(self, root: &Triple) -> OntError {
        OntError::decode(root, self.0)
    }
}

/// Where an axiom's annotations hang.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Reified through `owl:Axiom` nodes pointing at the triple.
    Triple(Triple),
    /// Directly on a blank root node.
    Node(Node),
}

/// Body and witnesses of one root statement, before annotations.
pub(crate) struct Decoded {
    pub body: AxiomBody,
    pub object: OntObject<()>,
    pub anchor: Anchor,
}

impl Decoded {
    /// A body whose only witness is the root itself.
    pub fn simple(root: &Triple, body: AxiomBody) -> Self {
        Self {
            body,
            object: OntObject::new(()),
            anchor: Anchor::Triple(root.clone()),
        }
    }
}

// =============================================================================
// READ CONTEXT
// =============================================================================

/// Everything a translator reads through: graph, personality and settings,
/// plus a per-context class-expression memo.
pub struct ReadContext<'a> {
    graph: &'a dyn GraphStore,
    personality: &'a Personality,
    settings: &'a ReadSettings,
    class_expressions: RefCell<BTreeMap<Node, Arc<OntObject<ClassExpression>>>>,
    visiting: RefCell<BTreeSet<Node>>,
}

impl<'a> ReadContext<'a> {
    pub fn new(graph: &'a dyn GraphStore, config: &'a ModelConfig) -> Self {
        Self::with_parts(graph, config.personality(), config.settings())
    }

    pub fn with_parts(
        graph: &'a dyn GraphStore,
        personality: &'a Personality,
        settings: &'a ReadSettings,
    ) -> Self {
        Self {
            graph,
            personality,
            settings,
            class_expressions: RefCell::new(BTreeMap::new()),
            visiting: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn graph(&self) -> &'a dyn GraphStore {
        self.graph
    }

    pub fn personality(&self) -> &'a Personality {
        self.personality
    }

    pub fn settings(&self) -> &'a ReadSettings {
        self.settings
    }

    /// Shorthand for `Personality::test` against this context's graph.
    pub fn fits(&self, node: &Node, view: View) -> bool {
        self.personality.test(node, view, self.graph)
    }
}

impl fmt::Debug for ReadContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadContext")
            .field("settings", self.settings)
            .field("memoized", &self.class_expressions.borrow().len())
            .finish()
    }
}

// =============================================================================
// TRANSLATOR TRAIT
// =============================================================================

/// Codec for one axiom shape.
pub trait AxiomTranslator: Send + Sync {
    fn axiom_type(&self) -> AxiomType;

    /// Candidate root statements, before `test_statement`.
    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Triple>;

    /// Cheap check: can `triple` be a root statement of this shape?
    fn test_statement(&self, triple: &Triple, ctx: &ReadContext<'_>) -> bool;

    /// Decode one root statement. Yields several axioms when split
    /// annotations are configured.
    fn decode(&self, root: &Triple, ctx: &ReadContext<'_>)
    -> Result<Vec<OntObject<Axiom>>, OntError>;

    /// Write the axiom's triples, annotations included.
    fn encode(&self, axiom: &Axiom, writer: &mut Writer<'_>) -> Result<(), OntError>;

    /// The root statement may be stated either way round.
    fn is_symmetric(&self) -> bool {
        false
    }

    /// Root statements `find` should try for `axiom` before falling back to
    /// a scan. Empty when the root would carry a blank node.
    fn roots(&self, axiom: &Axiom, personality: &Personality) -> Vec<Triple> {
        let mut scratch = Graph::new();
        let mut writer = Writer::new(&mut scratch, personality);
        if self.encode(&axiom.unannotated(), &mut writer).is_err() {
            return Vec::new();
        }
        let Some(root) = writer.finish().root.filter(|t| !t.has_blank()) else {
            return Vec::new();
        };
        if self.is_symmetric() && root.subject != root.object {
            let reversed = Triple::new(root.object.clone(), root.predicate.clone(), root.subject.clone());
            return vec![root, reversed];
        }
        vec![root]
    }

    /// Root statements that pass `test_statement`.
    fn statements(&self, ctx: &ReadContext<'_>) -> Vec<Triple> {
        self.candidates(ctx)
            .into_iter()
            .filter(|t| self.test_statement(t, ctx))
            .collect()
    }

    /// Decode every axiom of this shape. Equal axioms from different roots
    /// are merged into one object with the union of their witnesses.
    fn axioms(&self, ctx: &ReadContext<'_>) -> Result<Vec<OntObject<Axiom>>, OntError> {
        let mut merged: BTreeMap<Axiom, OntObject<Axiom>> = BTreeMap::new();
        for root in self.statements(ctx) {
            match self.decode(&root, ctx) {
                Ok(objects) => {
                    for object in objects {
                        merge_into(&mut merged, object);
                    }
                }
                Err(e) if ctx.settings().ignore_axiom_read_errors => {
                    warn!(shape = %self.axiom_type(), statement = %root, error = %e, "skipping unreadable statement");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(merged.into_values().collect())
    }

    /// Root statements of the shape's other encodings (an `owl:members`
    /// list next to the pairwise statement). `find` decodes them all, since
    /// an equal axiom may be stated in either form.
    fn alternate_statements(&self, _ctx: &ReadContext<'_>) -> Vec<Triple> {
        Vec::new()
    }

    /// Point lookup without decoding the whole graph when the root is named.
    /// The object carries the witnesses of every form the axiom is stated in.
    fn find(
        &self,
        axiom: &Axiom,
        ctx: &ReadContext<'_>,
    ) -> Result<Option<OntObject<Axiom>>, OntError> {
        if axiom.axiom_type() != self.axiom_type() {
            return Ok(None);
        }
        let roots = self.roots(axiom, ctx.personality());
        if roots.is_empty() {
            return Ok(self.axioms(ctx)?.into_iter().find(|o| o.value() == axiom));
        }
        let mut statements: Vec<Triple> = roots
            .into_iter()
            .filter(|root| ctx.graph().contains(root) && self.test_statement(root, ctx))
            .collect();
        for statement in self.alternate_statements(ctx) {
            if !statements.contains(&statement) {
                statements.push(statement);
            }
        }
        let mut found: Option<OntObject<Axiom>> = None;
        for root in statements {
            let objects = match self.decode(&root, ctx) {
                Ok(objects) => objects,
                Err(e) if ctx.settings().ignore_axiom_read_errors => {
                    warn!(shape = %self.axiom_type(), statement = %root, error = %e, "skipping unreadable statement");
                    continue;
                }
                Err(e) => return Err(e),
            };
            for object in objects.into_iter().filter(|o| o.value() == axiom) {
                match found.as_mut() {
                    Some(existing) => existing.merge(object),
                    None => found = Some(object),
                }
            }
        }
        Ok(found)
    }

    fn contains(&self, axiom: &Axiom, ctx: &ReadContext<'_>) -> bool {
        matches!(self.find(axiom, ctx), Ok(Some(_)))
    }
}

fn merge_into(map: &mut BTreeMap<Axiom, OntObject<Axiom>>, object: OntObject<Axiom>) {
    match map.get_mut(object.value()) {
        Some(existing) => existing.merge(object),
        None => {
            map.insert(object.value().clone(), object);
        }
    }
}

/// Attach annotations to a decoded body, honoring split/merge settings.
pub(crate) fn assemble(
    root: &Triple,
    decoded: Decoded,
    ctx: &ReadContext<'_>,
    read_annotations: bool,
) -> Vec<OntObject<Axiom>> {
    let Decoded {
        body,
        object,
        anchor,
    } = decoded;
    let base = object.with_root(root.clone()).map(|()| Axiom::new(body));
    let bulks = if read_annotations {
        annotations::read(&anchor, ctx)
    } else {
        Vec::new()
    };
    if bulks.is_empty() {
        return vec![base];
    }
    if ctx.settings().split_axiom_annotations {
        return bulks
            .into_iter()
            .map(|bulk| {
                let mut copy = base.clone();
                copy.add_part(Arc::new(OntObject::new(()).with_triples(bulk.triples)));
                copy.map(|a| a.with_annotations(bulk.annotations))
            })
            .collect();
    }
    let mut all = BTreeSet::new();
    let mut merged = base;
    for bulk in bulks {
        all.extend(bulk.annotations);
        merged.add_part(Arc::new(OntObject::new(()).with_triples(bulk.triples)));
    }
    vec![merged.map(|a| a.with_annotations(all))]
}

// =============================================================================
// REGISTRY
// =============================================================================

/// One translator per axiom shape, looked up by `AxiomType`.
pub struct Translators {
    by_type: BTreeMap<AxiomType, Box<dyn AxiomTranslator>>,
}

impl Translators {
    /// All 32 standard shapes.
    #[must_use]
    pub fn standard() -> Self {
        let mut by_type: BTreeMap<AxiomType, Box<dyn AxiomTranslator>> = BTreeMap::new();
        by_type.insert(
            AxiomType::Declaration,
            Box::new(declarations::DeclarationTranslator),
        );
        by_type.insert(
            AxiomType::AnnotationAssertion,
            Box::new(declarations::AnnotationAssertionTranslator),
        );
        for shape in shapes::all() {
            by_type.insert(shape.axiom_type(), Box::new(shape));
        }
        Self { by_type }
    }

    pub fn get(&self, axiom_type: AxiomType) -> Option<&dyn AxiomTranslator> {
        self.by_type.get(&axiom_type).map(|b| b.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn AxiomTranslator> {
        self.by_type.values().map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Encode `axiom` into `graph` with the translator for its shape.
    pub fn encode(
        &self,
        axiom: &Axiom,
        graph: &mut dyn GraphStore,
        personality: &Personality,
    ) -> Result<Written, OntError> {
        let translator = self
            .get(axiom.axiom_type())
            .ok_or_else(|| OntError::UnsupportedAxiom {
                shape: axiom.axiom_type(),
                reason: "no translator registered".to_string(),
            })?;
        let mut writer = Writer::new(graph, personality);
        translator.encode(axiom, &mut writer)?;
        Ok(writer.finish())
    }
}

impl Default for Translators {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Translators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.by_type.keys()).finish()
    }
}

/// Witness triples of `object` as an `Arc` part.
pub(crate) fn part<X: fmt::Debug + Send + Sync + 'static>(object: OntObject<X>) -> Arc<dyn Witnessed> {
    Arc::new(object)
}

// =============================================================================
// TESTS
// =============================================================================
