//! Builtins, reserved terms and punning rules.
//!
//! Pure data tables. A `Personality` owns one of each; changing them means
//! building a new personality.

use super::EntityKind;
use crate::config::PunningMode;
use crate::vocab::{owl, rdf, rdfs, swrl, xsd};
use std::collections::{BTreeMap, BTreeSet};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// BUILTINS
// =============================================================================

/// Nodes valid under an entity view without any declaration triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builtins {
    entities: BTreeMap<EntityKind, BTreeSet<String>>,
    facets: BTreeSet<String>,
}

impl Builtins {
    /// The OWL 2 builtin entities and XSD facets.
    #[must_use]
    pub fn owl2() -> Self {
        let mut entities = BTreeMap::new();
        entities.insert(EntityKind::Class, set(&[owl::THING, owl::NOTHING]));
        entities.insert(
            EntityKind::Datatype,
            set(&[
                rdfs::LITERAL,
                rdf::PLAIN_LITERAL,
                rdf::LANG_STRING,
                rdf::XML_LITERAL,
                owl::RATIONAL,
                owl::REAL,
                xsd::STRING,
                xsd::BOOLEAN,
                xsd::INTEGER,
                xsd::NON_NEGATIVE_INTEGER,
                xsd::INT,
                xsd::LONG,
                xsd::DECIMAL,
                xsd::DOUBLE,
                xsd::FLOAT,
                xsd::DATE_TIME,
                xsd::ANY_URI,
                xsd::TOKEN,
            ]),
        );
        entities.insert(
            EntityKind::ObjectProperty,
            set(&[owl::TOP_OBJECT_PROPERTY, owl::BOTTOM_OBJECT_PROPERTY]),
        );
        entities.insert(
            EntityKind::DataProperty,
            set(&[owl::TOP_DATA_PROPERTY, owl::BOTTOM_DATA_PROPERTY]),
        );
        entities.insert(
            EntityKind::AnnotationProperty,
            set(&[
                rdfs::LABEL,
                rdfs::COMMENT,
                rdfs::SEE_ALSO,
                rdfs::IS_DEFINED_BY,
                owl::VERSION_INFO,
                owl::DEPRECATED,
                owl::PRIOR_VERSION,
                owl::BACKWARD_COMPATIBLE_WITH,
                owl::INCOMPATIBLE_WITH,
            ]),
        );
        entities.insert(EntityKind::NamedIndividual, BTreeSet::new());
        let facets = set(&[
            xsd::MIN_INCLUSIVE,
            xsd::MAX_INCLUSIVE,
            xsd::MIN_EXCLUSIVE,
            xsd::MAX_EXCLUSIVE,
            xsd::LENGTH,
            xsd::MIN_LENGTH,
            xsd::MAX_LENGTH,
            xsd::PATTERN,
        ]);
        Self { entities, facets }
    }

    /// Copy with one more builtin of `kind`.
    #[must_use]
    pub fn with(&self, kind: EntityKind, iri: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.entities.entry(kind).or_default().insert(iri.into());
        copy
    }

    #[must_use]
    pub fn contains(&self, kind: EntityKind, iri: &str) -> bool {
        self.entities.get(&kind).is_some_and(|s| s.contains(iri))
    }

    /// Check whether `iri` is a builtin of any kind.
    #[must_use]
    pub fn is_builtin(&self, iri: &str) -> bool {
        self.entities.values().any(|s| s.contains(iri))
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &str> {
        self.entities
            .get(&kind)
            .into_iter()
            .flat_map(|s| s.iter().map(String::as_str))
    }

    #[must_use]
    pub fn is_facet(&self, iri: &str) -> bool {
        self.facets.contains(iri)
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::owl2()
    }
}

// =============================================================================
// RESERVED
// =============================================================================

/// Terms meaningful to the ontology language itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reserved {
    properties: BTreeSet<String>,
    resources: BTreeSet<String>,
    namespaces: BTreeSet<String>,
}

impl Reserved {
    /// The RDF/RDFS/OWL 2/SWRL reserved vocabulary.
    #[must_use]
    pub fn owl2() -> Self {
        let properties = set(&[
            rdf::TYPE,
            rdf::FIRST,
            rdf::REST,
            rdfs::SUB_CLASS_OF,
            rdfs::SUB_PROPERTY_OF,
            rdfs::DOMAIN,
            rdfs::RANGE,
            rdfs::LABEL,
            rdfs::COMMENT,
            rdfs::SEE_ALSO,
            rdfs::IS_DEFINED_BY,
            owl::ON_PROPERTY,
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
            owl::ON_CLASS,
            owl::ON_DATA_RANGE,
            owl::INTERSECTION_OF,
            owl::UNION_OF,
            owl::COMPLEMENT_OF,
            owl::ONE_OF,
            owl::DATATYPE_COMPLEMENT_OF,
            owl::ON_DATATYPE,
            owl::WITH_RESTRICTIONS,
            owl::INVERSE_OF,
            owl::EQUIVALENT_CLASS,
            owl::DISJOINT_WITH,
            owl::MEMBERS,
            owl::DISTINCT_MEMBERS,
            owl::EQUIVALENT_PROPERTY,
            owl::PROPERTY_CHAIN_AXIOM,
            owl::SAME_AS,
            owl::DIFFERENT_FROM,
            owl::SOURCE_INDIVIDUAL,
            owl::TARGET_INDIVIDUAL,
            owl::ASSERTION_PROPERTY,
            owl::IMPORTS,
            owl::VERSION_INFO,
            owl::DEPRECATED,
            owl::PRIOR_VERSION,
            owl::BACKWARD_COMPATIBLE_WITH,
            owl::INCOMPATIBLE_WITH,
            owl::ANNOTATED_SOURCE,
            owl::ANNOTATED_PROPERTY,
            owl::ANNOTATED_TARGET,
            swrl::BODY,
            swrl::HEAD,
            swrl::CLASS_PREDICATE,
            swrl::PROPERTY_PREDICATE,
            swrl::DATA_RANGE,
            swrl::BUILTIN,
            swrl::ARGUMENTS,
            swrl::ARGUMENT1,
            swrl::ARGUMENT2,
        ]);
        let resources = set(&[
            rdf::LIST,
            rdf::NIL,
            rdf::PROPERTY,
            rdfs::CLASS,
            rdfs::DATATYPE,
            owl::CLASS,
            owl::OBJECT_PROPERTY,
            owl::DATATYPE_PROPERTY,
            owl::ANNOTATION_PROPERTY,
            owl::NAMED_INDIVIDUAL,
            owl::ONTOLOGY,
            owl::RESTRICTION,
            owl::ALL_DISJOINT_CLASSES,
            owl::ALL_DIFFERENT,
            owl::NEGATIVE_PROPERTY_ASSERTION,
            owl::FUNCTIONAL_PROPERTY,
            owl::INVERSE_FUNCTIONAL_PROPERTY,
            owl::TRANSITIVE_PROPERTY,
            owl::SYMMETRIC_PROPERTY,
            owl::ASYMMETRIC_PROPERTY,
            owl::REFLEXIVE_PROPERTY,
            owl::IRREFLEXIVE_PROPERTY,
            owl::AXIOM,
            owl::ANNOTATION,
            swrl::IMP,
            swrl::VARIABLE,
            swrl::ATOM_LIST,
        ]);
        let namespaces = set(&[rdf::NS, rdfs::NS, owl::NS, xsd::NS, swrl::NS]);
        Self {
            properties,
            resources,
            namespaces,
        }
    }

    /// Check whether `iri` is reserved in any position.
    #[must_use]
    pub fn is_reserved(&self, iri: &str) -> bool {
        self.properties.contains(iri)
            || self.resources.contains(iri)
            || self.namespaces.iter().any(|ns| iri.starts_with(ns.as_str()))
    }

    /// Check whether `iri` is a reserved predicate.
    #[must_use]
    pub fn is_reserved_property(&self, iri: &str) -> bool {
        self.properties.contains(iri)
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }

    /// Copy with one more reserved predicate.
    #[must_use]
    pub fn with_property(&self, iri: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.properties.insert(iri.into());
        copy
    }
}

impl Default for Reserved {
    fn default() -> Self {
        Self::owl2()
    }
}

// =============================================================================
// PUNNINGS
// =============================================================================

/// Pairs of entity kinds that must not be declared on the same IRI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Punnings {
    forbidden: BTreeSet<(EntityKind, EntityKind)>,
}

fn ordered(a: EntityKind, b: EntityKind) -> (EntityKind, EntityKind) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Punnings {
    #[must_use]
    pub fn from_mode(mode: PunningMode) -> Self {
        use EntityKind::{AnnotationProperty, Class, DataProperty, Datatype, ObjectProperty};
        let pairs: &[(EntityKind, EntityKind)] = match mode {
            PunningMode::Strict => &[
                (Class, Datatype),
                (ObjectProperty, DataProperty),
                (ObjectProperty, AnnotationProperty),
                (DataProperty, AnnotationProperty),
            ],
            PunningMode::DlWeak => &[(Class, Datatype), (ObjectProperty, DataProperty)],
            PunningMode::Lax => &[],
        };
        Self {
            forbidden: pairs.iter().map(|&(a, b)| ordered(a, b)).collect(),
        }
    }

    /// Copy with one more forbidden pair.
    #[must_use]
    pub fn forbid(&self, a: EntityKind, b: EntityKind) -> Self {
        let mut copy = self.clone();
        if a != b {
            copy.forbidden.insert(ordered(a, b));
        }
        copy
    }

    /// Check whether kinds `a` and `b` may coexist on one node.
    #[must_use]
    pub fn allows(&self, a: EntityKind, b: EntityKind) -> bool {
        a == b || !self.forbidden.contains(&ordered(a, b))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }
}
