//! # ontoview-core
//!
//! Typed OWL views over a generic RDF triple graph.
//!
//! The crate reads a plain set of triples as an ontology and writes
//! ontology edits back as triples:
//! - `personality` decides which ontology constructs a node may be viewed as
//! - `translate` decodes root statements into structured axioms and encodes
//!   axioms back, tracking the exact triples each one owns
//! - `model` caches decoded objects per shape and keeps the cache and the
//!   graph in step
//! - `normalize` repairs a graph before anything is read from it
//!
//! ## Architectural Constraints
//!
//! - Synchronous: no async, no network, no file formats
//! - Deterministic: ordered collections everywhere, no randomness
//! - The graph is a collaborator: anything implementing `GraphStore` works
//!
//! ```
//! use ontoview_core::{Axiom, AxiomBody, AxiomType, ClassExpression, Graph, InternalModel, ModelConfig};
//!
//! let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
//! model
//!     .add(Axiom::new(AxiomBody::SubClassOf {
//!         sub: ClassExpression::class("http://example.org/Cat"),
//!         sup: ClassExpression::class("http://example.org/Animal"),
//!     }))
//!     .expect("encodable");
//! assert_eq!(model.axioms(AxiomType::SubClassOf).expect("readable").len(), 1);
//! assert_eq!(model.axioms(AxiomType::Declaration).expect("readable").len(), 2);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod axiom;
pub mod cache;
pub mod config;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod object;
pub mod personality;
pub mod primitives;
pub mod translate;
pub mod types;
pub mod vocab;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Literal, Node, OntError, Triple};

// =============================================================================
// RE-EXPORTS: Graph and Views
// =============================================================================

pub use graph::{Graph, GraphStore, PrefixMapping, UnionGraph};
pub use personality::{EntityKind, Handle, Personality, PersonalityBuilder, View};

// =============================================================================
// RE-EXPORTS: Configuration
// =============================================================================

pub use config::{
    AnonymousIndividualPolicy, ModelConfig, PersonalitySettings, PunningMode, ReadSettings,
};

// =============================================================================
// RE-EXPORTS: Axioms and Objects
// =============================================================================

pub use axiom::{
    Annotation, AnnotationSubject, AnnotationValue, Axiom, AxiomBody, AxiomType, ClassExpression,
    DataRange, Entity, Individual, ObjectPropertyExpression,
};
pub use cache::ObjectMap;
pub use model::InternalModel;
pub use object::{OntObject, Witnessed};

// =============================================================================
// RE-EXPORTS: Translation and Normalization
// =============================================================================

pub use normalize::{
    DeclarationTransform, PassReport, QueryView, RecursionEliminator, RecursionMode, Transform,
    TransformReport, Transforms, WriteView,
};
pub use translate::{AxiomTranslator, ReadContext, Translators, Writer, Written};
