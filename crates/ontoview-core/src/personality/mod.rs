//! # Personality
//!
//! The view resolution engine: decides which ontology-construct views a graph
//! node currently supports, and materializes nodes as typed handles.
//!
//! A `Personality` is an immutable bundle of:
//! - one `ViewFactory` per `View` (fit test, finder, optional maker)
//! - the vocabulary policy (`Builtins`, `Reserved`, `Punnings`)
//! - the anonymous-individual policy
//!
//! Customizing a personality goes through `PersonalityBuilder` and always
//! yields a new value; a personality another caller holds never changes.
//!
//! ## Usage
//!
//! ```
//! use ontoview_core::{Graph, GraphStore, Node, Personality, Triple, View};
//! use ontoview_core::vocab::{owl, rdf};
//!
//! let mut graph = Graph::new();
//! let c = Node::iri("http://example.org/C");
//! graph.add(Triple::new(c.clone(), Node::iri(rdf::TYPE), Node::iri(owl::CLASS)));
//!
//! let personality = Personality::default();
//! assert!(personality.test(&c, View::Class, &graph));
//! assert!(!personality.test(&c, View::NamedIndividual, &graph));
//! ```

mod factories;
mod finder;
mod vocabulary;

pub use finder::Finder;
pub use vocabulary::{Builtins, Punnings, Reserved};

use crate::config::{AnonymousIndividualPolicy, PersonalitySettings, PunningMode};
use crate::graph::GraphStore;
use crate::vocab::{owl, rdfs};
use crate::{Node, OntError, Triple};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

// =============================================================================
// VIEWS
// =============================================================================

/// An ontology-construct kind a node may be viewed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum View {
    /// Named class (`owl:Class` or builtin).
    Class,
    /// Named datatype (`rdfs:Datatype` or builtin).
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
    /// Blank node used as an individual.
    AnonymousIndividual,
    /// Named or anonymous individual.
    Individual,
    /// Restriction or boolean class expression on a blank node.
    AnonymousClass,
    /// Named class or anonymous class expression.
    ClassExpression,
    /// `[ owl:inverseOf P ]`.
    InverseObjectProperty,
    /// Named object property or inverse expression.
    ObjectPropertyExpression,
    /// Named datatype or anonymous data range.
    DataRange,
    /// `[ xsd:facet "value" ]` inside a datatype restriction.
    FacetRestriction,
    SwrlVariable,
    SwrlAtom,
    /// Named node declared under two kinds the punnings forbid. Read-only.
    PunningConflict,
}

impl View {
    pub const ALL: [View; 17] = [
        View::Class,
        View::Datatype,
        View::ObjectProperty,
        View::DataProperty,
        View::AnnotationProperty,
        View::NamedIndividual,
        View::AnonymousIndividual,
        View::Individual,
        View::AnonymousClass,
        View::ClassExpression,
        View::InverseObjectProperty,
        View::ObjectPropertyExpression,
        View::DataRange,
        View::FacetRestriction,
        View::SwrlVariable,
        View::SwrlAtom,
        View::PunningConflict,
    ];
}

/// Kinds of named OWL entities, in declaration-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Class,
        EntityKind::Datatype,
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::AnnotationProperty,
        EntityKind::NamedIndividual,
    ];

    /// The `rdf:type` object that declares this kind.
    #[must_use]
    pub const fn type_iri(self) -> &'static str {
        match self {
            EntityKind::Class => owl::CLASS,
            EntityKind::Datatype => rdfs::DATATYPE,
            EntityKind::ObjectProperty => owl::OBJECT_PROPERTY,
            EntityKind::DataProperty => owl::DATATYPE_PROPERTY,
            EntityKind::AnnotationProperty => owl::ANNOTATION_PROPERTY,
            EntityKind::NamedIndividual => owl::NAMED_INDIVIDUAL,
        }
    }

    #[must_use]
    pub fn from_type_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_iri() == iri)
    }

    #[must_use]
    pub const fn view(self) -> View {
        match self {
            EntityKind::Class => View::Class,
            EntityKind::Datatype => View::Datatype,
            EntityKind::ObjectProperty => View::ObjectProperty,
            EntityKind::DataProperty => View::DataProperty,
            EntityKind::AnnotationProperty => View::AnnotationProperty,
            EntityKind::NamedIndividual => View::NamedIndividual,
        }
    }
}

// =============================================================================
// HANDLE
// =============================================================================

/// A node materialized under a view.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    node: Node,
    view: View,
}

impl Handle {
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn into_node(self) -> Node {
        self.node
    }
}

// =============================================================================
// VIEW FACTORY
// =============================================================================

/// Pure fit test for one view.
pub type FitTest = fn(&Node, &dyn GraphStore, &Personality) -> bool;

/// Defining triples for a fresh instance of a view, or `None` when the node
/// cannot host the view at all.
pub type Maker = fn(&Node) -> Option<Vec<Triple>>;

/// Fit test, candidate finder and optional maker for one view.
#[derive(Clone, Copy)]
pub struct ViewFactory {
    finder: Finder,
    test: FitTest,
    maker: Option<Maker>,
}

impl ViewFactory {
    /// A read-only factory: declaring through it is unsupported.
    #[must_use]
    pub const fn new(finder: Finder, test: FitTest) -> Self {
        Self {
            finder,
            test,
            maker: None,
        }
    }

    #[must_use]
    pub const fn with_maker(self, maker: Maker) -> Self {
        Self {
            maker: Some(maker),
            ..self
        }
    }

    #[must_use]
    pub fn finder(&self) -> Finder {
        self.finder
    }

    #[must_use]
    pub fn can_declare(&self) -> bool {
        self.maker.is_some()
    }
}

impl fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewFactory")
            .field("finder", &self.finder)
            .field("can_declare", &self.can_declare())
            .finish()
    }
}

// =============================================================================
// PERSONALITY
// =============================================================================

struct Inner {
    factories: BTreeMap<View, ViewFactory>,
    builtins: Builtins,
    reserved: Reserved,
    punnings: Punnings,
    punning_mode: PunningMode,
    anonymous_policy: AnonymousIndividualPolicy,
    /// Derived node sets keyed by a stable tag. Only ever filled, never
    /// rewritten: a new personality starts with an empty memo.
    memo: Mutex<BTreeMap<&'static str, Arc<BTreeSet<Node>>>>,
}

/// Immutable view registry plus vocabulary policy. Cheap to clone.
#[derive(Clone)]
pub struct Personality {
    inner: Arc<Inner>,
}

impl Default for Personality {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Personality")
            .field("views", &self.inner.factories.keys().collect::<Vec<_>>())
            .field("punning_mode", &self.inner.punning_mode)
            .field("anonymous_policy", &self.inner.anonymous_policy)
            .finish()
    }
}

impl Personality {
    /// Builder preloaded with the standard factories and OWL 2 vocabulary.
    #[must_use]
    pub fn builder() -> PersonalityBuilder {
        PersonalityBuilder {
            factories: factories::standard(),
            builtins: Builtins::owl2(),
            reserved: Reserved::owl2(),
            punning_mode: PunningMode::default(),
            extra_forbidden: Vec::new(),
            anonymous_policy: AnonymousIndividualPolicy::default(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &PersonalitySettings) -> Self {
        Self::builder()
            .punnings(settings.punnings)
            .anonymous_individuals(settings.anonymous_individuals)
            .build()
    }

    /// A builder holding a copy of this personality's configuration.
    #[must_use]
    pub fn to_builder(&self) -> PersonalityBuilder {
        PersonalityBuilder {
            factories: self.inner.factories.clone(),
            builtins: self.inner.builtins.clone(),
            reserved: self.inner.reserved.clone(),
            punning_mode: self.inner.punning_mode,
            extra_forbidden: Vec::new(),
            anonymous_policy: self.inner.anonymous_policy,
        }
        .with_punnings(self.inner.punnings.clone())
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Check whether `node` fits `view`. Never mutates, never fails.
    pub fn test(&self, node: &Node, view: View, graph: &dyn GraphStore) -> bool {
        self.inner
            .factories
            .get(&view)
            .is_some_and(|f| (f.test)(node, graph, self))
    }

    /// View `node` as `view`, failing with a conversion error if it does not fit.
    pub fn as_view(
        &self,
        node: &Node,
        view: View,
        graph: &dyn GraphStore,
    ) -> Result<Handle, OntError> {
        if self.test(node, view, graph) {
            Ok(Handle {
                node: node.clone(),
                view,
            })
        } else {
            Err(OntError::Conversion {
                node: node.clone(),
                view,
            })
        }
    }

    /// Assert the defining triples of `view` for `node` (those already present
    /// are left alone), then view the node.
    pub fn declare(
        &self,
        node: &Node,
        view: View,
        graph: &mut dyn GraphStore,
    ) -> Result<Handle, OntError> {
        let factory = self.inner.factories.get(&view).ok_or(OntError::Unsupported {
            view,
            reason: "no factory registered".to_string(),
        })?;
        let maker = factory.maker.ok_or(OntError::Unsupported {
            view,
            reason: "view has no defining triples".to_string(),
        })?;
        let triples = maker(node).ok_or(OntError::Conversion {
            node: node.clone(),
            view,
        })?;
        for triple in triples {
            if !graph.contains(&triple) {
                graph.add(triple);
            }
        }
        self.as_view(node, view, &*graph)
    }

    /// Every node in the graph that fits `view`, found through its finder.
    pub fn nodes(&self, view: View, graph: &dyn GraphStore) -> Vec<Handle> {
        let Some(factory) = self.inner.factories.get(&view) else {
            return Vec::new();
        };
        factory
            .finder
            .candidates(graph)
            .into_iter()
            .filter(|n| (factory.test)(n, graph, self))
            .map(|node| Handle { node, view })
            .collect()
    }

    /// All registered views `node` currently fits.
    pub fn views_of(&self, node: &Node, graph: &dyn GraphStore) -> Vec<View> {
        self.inner
            .factories
            .iter()
            .filter(|(_, f)| (f.test)(node, graph, self))
            .map(|(v, _)| *v)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Vocabulary policy
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn builtins(&self) -> &Builtins {
        &self.inner.builtins
    }

    #[must_use]
    pub fn reserved(&self) -> &Reserved {
        &self.inner.reserved
    }

    #[must_use]
    pub fn punnings(&self) -> &Punnings {
        &self.inner.punnings
    }

    #[must_use]
    pub fn punning_mode(&self) -> PunningMode {
        self.inner.punning_mode
    }

    #[must_use]
    pub fn anonymous_policy(&self) -> AnonymousIndividualPolicy {
        self.inner.anonymous_policy
    }

    #[must_use]
    pub fn factory(&self, view: View) -> Option<&ViewFactory> {
        self.inner.factories.get(&view)
    }

    /// Check whether `node` is declared (or builtin) as `kind`, ignoring
    /// punning rules.
    pub fn is_declared(&self, node: &Node, kind: EntityKind, graph: &dyn GraphStore) -> bool {
        node.as_iri().is_some_and(|iri| {
            self.inner.builtins.contains(kind, iri) || graph.has_type(node, kind.type_iri())
        })
    }

    /// Derived vocabulary set, computed once per personality under `key`.
    pub(crate) fn memo(
        &self,
        key: &'static str,
        compute: impl FnOnce(&Self) -> BTreeSet<Node>,
    ) -> Arc<BTreeSet<Node>> {
        {
            let memo = self.inner.memo.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = memo.get(key) {
                return Arc::clone(found);
            }
        }
        let computed = Arc::new(compute(self));
        let mut memo = self.inner.memo.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(memo.entry(key).or_insert(computed))
    }

    #[cfg(test)]
    fn memo_len(&self) -> usize {
        self.inner
            .memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Produces new personalities. Never touches an existing one.
#[derive(Debug, Clone)]
pub struct PersonalityBuilder {
    factories: BTreeMap<View, ViewFactory>,
    builtins: Builtins,
    reserved: Reserved,
    punning_mode: PunningMode,
    extra_forbidden: Vec<(EntityKind, EntityKind)>,
    anonymous_policy: AnonymousIndividualPolicy,
}

impl PersonalityBuilder {
    /// Register or replace the factory for `view`.
    #[must_use]
    pub fn factory(mut self, view: View, factory: ViewFactory) -> Self {
        self.factories.insert(view, factory);
        self
    }

    /// Drop the factory for `view`; the view then never fits.
    #[must_use]
    pub fn without(mut self, view: View) -> Self {
        self.factories.remove(&view);
        self
    }

    #[must_use]
    pub fn builtins(mut self, builtins: Builtins) -> Self {
        self.builtins = builtins;
        self
    }

    #[must_use]
    pub fn reserved(mut self, reserved: Reserved) -> Self {
        self.reserved = reserved;
        self
    }

    #[must_use]
    pub fn punnings(mut self, mode: PunningMode) -> Self {
        self.punning_mode = mode;
        self
    }

    /// Forbid one more pair of entity kinds on top of the punning mode.
    #[must_use]
    pub fn forbid_punning(mut self, a: EntityKind, b: EntityKind) -> Self {
        self.extra_forbidden.push((a, b));
        self
    }

    #[must_use]
    pub fn anonymous_individuals(mut self, policy: AnonymousIndividualPolicy) -> Self {
        self.anonymous_policy = policy;
        self
    }

    fn with_punnings(mut self, punnings: Punnings) -> Self {
        // Recover custom pairs: anything forbidden beyond the mode's own set.
        let base = Punnings::from_mode(self.punning_mode);
        for a in EntityKind::ALL {
            for b in EntityKind::ALL {
                if a < b && !punnings.allows(a, b) && base.allows(a, b) {
                    self.extra_forbidden.push((a, b));
                }
            }
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Personality {
        let punnings = self
            .extra_forbidden
            .iter()
            .fold(Punnings::from_mode(self.punning_mode), |p, &(a, b)| {
                p.forbid(a, b)
            });
        Personality {
            inner: Arc::new(Inner {
                factories: self.factories,
                builtins: self.builtins,
                reserved: self.reserved,
                punnings,
                punning_mode: self.punning_mode,
                anonymous_policy: self.anonymous_policy,
                memo: Mutex::new(BTreeMap::new()),
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
