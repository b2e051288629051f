//! # Structured Axioms
//!
//! Immutable ontology values decoded from (and encoded to) triples:
//! - Entities and individuals (`Entity`, `Individual`)
//! - Expressions (`ClassExpression`, `ObjectPropertyExpression`, `DataRange`)
//! - Annotations, possibly nested
//! - SWRL atoms and rules
//! - `Axiom` = `AxiomBody` + annotations, tagged by `AxiomType`
//!
//! Every value compares by content. Sets use `BTreeSet` so that two axioms
//! with the same operands in a different graph order are equal; sequences
//! that carry meaning (property chains, rule atoms) stay `Vec`.

use crate::personality::EntityKind;
use crate::vocab::{owl, swrl};
use crate::{Literal, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// ENTITIES
// =============================================================================

/// A named OWL entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub iri: String,
}

impl Entity {
    #[must_use]
    pub fn new(kind: EntityKind, iri: impl Into<String>) -> Self {
        Self {
            kind,
            iri: iri.into(),
        }
    }

    #[must_use]
    pub fn class(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::Class, iri)
    }

    #[must_use]
    pub fn node(&self) -> Node {
        Node::iri(self.iri.as_str())
    }
}

/// A named or anonymous individual.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Individual {
    Named(String),
    /// Blank-node label.
    Anonymous(String),
}

impl Individual {
    #[must_use]
    pub fn named(iri: impl Into<String>) -> Self {
        Self::Named(iri.into())
    }

    #[must_use]
    pub fn node(&self) -> Node {
        match self {
            Self::Named(iri) => Node::iri(iri.as_str()),
            Self::Anonymous(label) => Node::blank(label.as_str()),
        }
    }

    #[must_use]
    pub fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Iri(iri) => Some(Self::Named(iri.clone())),
            Node::Blank(label) => Some(Self::Anonymous(label.clone())),
            Node::Literal(_) => None,
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

/// Subject of an annotation assertion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnnotationSubject {
    Iri(String),
    Anonymous(String),
}

impl AnnotationSubject {
    #[must_use]
    pub fn node(&self) -> Node {
        match self {
            Self::Iri(iri) => Node::iri(iri.as_str()),
            Self::Anonymous(label) => Node::blank(label.as_str()),
        }
    }

    #[must_use]
    pub fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Iri(iri) => Some(Self::Iri(iri.clone())),
            Node::Blank(label) => Some(Self::Anonymous(label.clone())),
            Node::Literal(_) => None,
        }
    }
}

/// Value of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnnotationValue {
    Iri(String),
    Literal(Literal),
    Anonymous(String),
}

impl AnnotationValue {
    #[must_use]
    pub fn node(&self) -> Node {
        match self {
            Self::Iri(iri) => Node::iri(iri.as_str()),
            Self::Literal(lit) => Node::Literal(lit.clone()),
            Self::Anonymous(label) => Node::blank(label.as_str()),
        }
    }

    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        match node {
            Node::Iri(iri) => Self::Iri(iri.clone()),
            Node::Blank(label) => Self::Anonymous(label.clone()),
            Node::Literal(lit) => Self::Literal(lit.clone()),
        }
    }
}

/// `property value`, optionally annotated itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub property: String,
    pub value: AnnotationValue,
    pub annotations: BTreeSet<Annotation>,
}

impl Annotation {
    #[must_use]
    pub fn new(property: impl Into<String>, value: AnnotationValue) -> Self {
        Self {
            property: property.into(),
            value,
            annotations: BTreeSet::new(),
        }
    }

    /// Shorthand for a plain-literal annotation.
    #[must_use]
    pub fn literal(property: impl Into<String>, lexical: impl Into<String>) -> Self {
        Self::new(property, AnnotationValue::Literal(Literal::plain(lexical)))
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }
}

// =============================================================================
// PROPERTY EXPRESSIONS
// =============================================================================

/// A named object property or the inverse of one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectPropertyExpression {
    Named(String),
    Inverse(String),
}

impl ObjectPropertyExpression {
    #[must_use]
    pub fn named(iri: impl Into<String>) -> Self {
        Self::Named(iri.into())
    }

    /// The underlying named property.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::Named(iri) | Self::Inverse(iri) => iri,
        }
    }
}

// =============================================================================
// CLASS EXPRESSIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardinalityKind {
    Min,
    Max,
    Exact,
}

impl CardinalityKind {
    pub const ALL: [CardinalityKind; 3] = [Self::Min, Self::Max, Self::Exact];

    /// Predicate for the unqualified form.
    #[must_use]
    pub const fn predicate(self) -> &'static str {
        match self {
            Self::Min => owl::MIN_CARDINALITY,
            Self::Max => owl::MAX_CARDINALITY,
            Self::Exact => owl::CARDINALITY,
        }
    }

    /// Predicate for the qualified form.
    #[must_use]
    pub const fn qualified_predicate(self) -> &'static str {
        match self {
            Self::Min => owl::MIN_QUALIFIED_CARDINALITY,
            Self::Max => owl::MAX_QUALIFIED_CARDINALITY,
            Self::Exact => owl::QUALIFIED_CARDINALITY,
        }
    }
}

/// Named class or anonymous class expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    Class(String),
    ObjectIntersectionOf(BTreeSet<ClassExpression>),
    ObjectUnionOf(BTreeSet<ClassExpression>),
    ObjectComplementOf(Box<ClassExpression>),
    ObjectOneOf(BTreeSet<Individual>),
    ObjectSomeValuesFrom(ObjectPropertyExpression, Box<ClassExpression>),
    ObjectAllValuesFrom(ObjectPropertyExpression, Box<ClassExpression>),
    ObjectHasValue(ObjectPropertyExpression, Individual),
    ObjectHasSelf(ObjectPropertyExpression),
    ObjectCardinality {
        kind: CardinalityKind,
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    DataSomeValuesFrom(String, DataRange),
    DataAllValuesFrom(String, DataRange),
    DataHasValue(String, Literal),
    DataCardinality {
        kind: CardinalityKind,
        cardinality: u32,
        property: String,
        filler: Option<DataRange>,
    },
}

impl ClassExpression {
    #[must_use]
    pub fn class(iri: impl Into<String>) -> Self {
        Self::Class(iri.into())
    }

    #[must_use]
    pub fn thing() -> Self {
        Self::Class(owl::THING.to_string())
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    #[must_use]
    pub fn as_class(&self) -> Option<&str> {
        match self {
            Self::Class(iri) => Some(iri),
            _ => None,
        }
    }
}

// =============================================================================
// DATA RANGES
// =============================================================================

/// `facet value` inside a datatype restriction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacetRestriction {
    pub facet: String,
    pub value: Literal,
}

/// Named datatype or anonymous data range.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataRange {
    Datatype(String),
    DataOneOf(BTreeSet<Literal>),
    DatatypeRestriction(String, BTreeSet<FacetRestriction>),
    DataComplementOf(Box<DataRange>),
    DataIntersectionOf(BTreeSet<DataRange>),
    DataUnionOf(BTreeSet<DataRange>),
}

impl DataRange {
    #[must_use]
    pub fn datatype(iri: impl Into<String>) -> Self {
        Self::Datatype(iri.into())
    }
}

// =============================================================================
// SWRL
// =============================================================================

/// Argument of a SWRL atom.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SwrlArg {
    Variable(String),
    Individual(Individual),
    Literal(Literal),
}

impl SwrlArg {
    #[must_use]
    pub fn variable(iri: impl Into<String>) -> Self {
        Self::Variable(iri.into())
    }

    #[must_use]
    pub fn node(&self) -> Node {
        match self {
            Self::Variable(iri) => Node::iri(iri.as_str()),
            Self::Individual(i) => i.node(),
            Self::Literal(lit) => Node::Literal(lit.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SwrlAtom {
    Class(ClassExpression, SwrlArg),
    ObjectProperty(ObjectPropertyExpression, SwrlArg, SwrlArg),
    DataProperty(String, SwrlArg, SwrlArg),
    SameIndividual(SwrlArg, SwrlArg),
    DifferentIndividuals(SwrlArg, SwrlArg),
    DataRange(DataRange, SwrlArg),
    /// Builtin IRI and its ordered arguments.
    Builtin(String, Vec<SwrlArg>),
}

impl SwrlAtom {
    /// The `rdf:type` of the atom node.
    #[must_use]
    pub const fn type_iri(&self) -> &'static str {
        match self {
            Self::Class(..) => swrl::CLASS_ATOM,
            Self::ObjectProperty(..) => swrl::INDIVIDUAL_PROPERTY_ATOM,
            Self::DataProperty(..) => swrl::DATAVALUED_PROPERTY_ATOM,
            Self::SameIndividual(..) => swrl::SAME_INDIVIDUAL_ATOM,
            Self::DifferentIndividuals(..) => swrl::DIFFERENT_INDIVIDUALS_ATOM,
            Self::DataRange(..) => swrl::DATA_RANGE_ATOM,
            Self::Builtin(..) => swrl::BUILTIN_ATOM,
        }
    }
}

// =============================================================================
// AXIOMS
// =============================================================================

/// Object property characteristics, each its own axiom shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    Functional,
    InverseFunctional,
    Transitive,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
}

impl Characteristic {
    pub const ALL: [Characteristic; 7] = [
        Self::Functional,
        Self::InverseFunctional,
        Self::Transitive,
        Self::Symmetric,
        Self::Asymmetric,
        Self::Reflexive,
        Self::Irreflexive,
    ];

    #[must_use]
    pub const fn type_iri(self) -> &'static str {
        match self {
            Self::Functional => owl::FUNCTIONAL_PROPERTY,
            Self::InverseFunctional => owl::INVERSE_FUNCTIONAL_PROPERTY,
            Self::Transitive => owl::TRANSITIVE_PROPERTY,
            Self::Symmetric => owl::SYMMETRIC_PROPERTY,
            Self::Asymmetric => owl::ASYMMETRIC_PROPERTY,
            Self::Reflexive => owl::REFLEXIVE_PROPERTY,
            Self::Irreflexive => owl::IRREFLEXIVE_PROPERTY,
        }
    }

    #[must_use]
    pub const fn axiom_type(self) -> AxiomType {
        match self {
            Self::Functional => AxiomType::FunctionalObjectProperty,
            Self::InverseFunctional => AxiomType::InverseFunctionalObjectProperty,
            Self::Transitive => AxiomType::TransitiveObjectProperty,
            Self::Symmetric => AxiomType::SymmetricObjectProperty,
            Self::Asymmetric => AxiomType::AsymmetricObjectProperty,
            Self::Reflexive => AxiomType::ReflexiveObjectProperty,
            Self::Irreflexive => AxiomType::IrreflexiveObjectProperty,
        }
    }
}

/// The axiom shapes the translators understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxiomType {
    Declaration,
    AnnotationAssertion,
    SubAnnotationPropertyOf,
    AnnotationPropertyDomain,
    AnnotationPropertyRange,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    ClassAssertion,
    ObjectPropertyAssertion,
    DataPropertyAssertion,
    SubObjectPropertyOf,
    SubDataPropertyOf,
    EquivalentObjectProperties,
    EquivalentDataProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    DataPropertyDomain,
    DataPropertyRange,
    InverseObjectProperties,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    TransitiveObjectProperty,
    SymmetricObjectProperty,
    AsymmetricObjectProperty,
    ReflexiveObjectProperty,
    IrreflexiveObjectProperty,
    FunctionalDataProperty,
    SubPropertyChainOf,
    SameIndividual,
    DifferentIndividuals,
    SwrlRule,
}

impl AxiomType {
    pub const ALL: [AxiomType; 32] = [
        Self::Declaration,
        Self::AnnotationAssertion,
        Self::SubAnnotationPropertyOf,
        Self::AnnotationPropertyDomain,
        Self::AnnotationPropertyRange,
        Self::SubClassOf,
        Self::EquivalentClasses,
        Self::DisjointClasses,
        Self::ClassAssertion,
        Self::ObjectPropertyAssertion,
        Self::DataPropertyAssertion,
        Self::SubObjectPropertyOf,
        Self::SubDataPropertyOf,
        Self::EquivalentObjectProperties,
        Self::EquivalentDataProperties,
        Self::ObjectPropertyDomain,
        Self::ObjectPropertyRange,
        Self::DataPropertyDomain,
        Self::DataPropertyRange,
        Self::InverseObjectProperties,
        Self::FunctionalObjectProperty,
        Self::InverseFunctionalObjectProperty,
        Self::TransitiveObjectProperty,
        Self::SymmetricObjectProperty,
        Self::AsymmetricObjectProperty,
        Self::ReflexiveObjectProperty,
        Self::IrreflexiveObjectProperty,
        Self::FunctionalDataProperty,
        Self::SubPropertyChainOf,
        Self::SameIndividual,
        Self::DifferentIndividuals,
        Self::SwrlRule,
    ];
}

impl fmt::Display for AxiomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The logical content of an axiom, without its annotations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxiomBody {
    Declaration(Entity),
    AnnotationAssertion {
        property: String,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },
    SubAnnotationPropertyOf {
        sub: String,
        sup: String,
    },
    AnnotationPropertyDomain {
        property: String,
        domain: String,
    },
    AnnotationPropertyRange {
        property: String,
        range: String,
    },
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    EquivalentClasses(BTreeSet<ClassExpression>),
    DisjointClasses(BTreeSet<ClassExpression>),
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        subject: Individual,
        object: Individual,
    },
    DataPropertyAssertion {
        property: String,
        subject: Individual,
        value: Literal,
    },
    SubObjectPropertyOf {
        sub: ObjectPropertyExpression,
        sup: ObjectPropertyExpression,
    },
    SubDataPropertyOf {
        sub: String,
        sup: String,
    },
    EquivalentObjectProperties(BTreeSet<ObjectPropertyExpression>),
    EquivalentDataProperties(BTreeSet<String>),
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },
    DataPropertyDomain {
        property: String,
        domain: ClassExpression,
    },
    DataPropertyRange {
        property: String,
        range: DataRange,
    },
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),
    ObjectPropertyCharacteristic(Characteristic, ObjectPropertyExpression),
    FunctionalDataProperty(String),
    SubPropertyChainOf {
        chain: Vec<ObjectPropertyExpression>,
        sup: ObjectPropertyExpression,
    },
    SameIndividual(BTreeSet<Individual>),
    DifferentIndividuals(BTreeSet<Individual>),
    SwrlRule {
        body: Vec<SwrlAtom>,
        head: Vec<SwrlAtom>,
    },
}

impl AxiomBody {
    #[must_use]
    pub const fn axiom_type(&self) -> AxiomType {
        match self {
            Self::Declaration(_) => AxiomType::Declaration,
            Self::AnnotationAssertion { .. } => AxiomType::AnnotationAssertion,
            Self::SubAnnotationPropertyOf { .. } => AxiomType::SubAnnotationPropertyOf,
            Self::AnnotationPropertyDomain { .. } => AxiomType::AnnotationPropertyDomain,
            Self::AnnotationPropertyRange { .. } => AxiomType::AnnotationPropertyRange,
            Self::SubClassOf { .. } => AxiomType::SubClassOf,
            Self::EquivalentClasses(_) => AxiomType::EquivalentClasses,
            Self::DisjointClasses(_) => AxiomType::DisjointClasses,
            Self::ClassAssertion { .. } => AxiomType::ClassAssertion,
            Self::ObjectPropertyAssertion { .. } => AxiomType::ObjectPropertyAssertion,
            Self::DataPropertyAssertion { .. } => AxiomType::DataPropertyAssertion,
            Self::SubObjectPropertyOf { .. } => AxiomType::SubObjectPropertyOf,
            Self::SubDataPropertyOf { .. } => AxiomType::SubDataPropertyOf,
            Self::EquivalentObjectProperties(_) => AxiomType::EquivalentObjectProperties,
            Self::EquivalentDataProperties(_) => AxiomType::EquivalentDataProperties,
            Self::ObjectPropertyDomain { .. } => AxiomType::ObjectPropertyDomain,
            Self::ObjectPropertyRange { .. } => AxiomType::ObjectPropertyRange,
            Self::DataPropertyDomain { .. } => AxiomType::DataPropertyDomain,
            Self::DataPropertyRange { .. } => AxiomType::DataPropertyRange,
            Self::InverseObjectProperties(..) => AxiomType::InverseObjectProperties,
            Self::ObjectPropertyCharacteristic(c, _) => c.axiom_type(),
            Self::FunctionalDataProperty(_) => AxiomType::FunctionalDataProperty,
            Self::SubPropertyChainOf { .. } => AxiomType::SubPropertyChainOf,
            Self::SameIndividual(_) => AxiomType::SameIndividual,
            Self::DifferentIndividuals(_) => AxiomType::DifferentIndividuals,
            Self::SwrlRule { .. } => AxiomType::SwrlRule,
        }
    }

    /// Named entities the body mentions, with the kind each position implies.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut sig = Signature::default();
        sig.body(self);
        sig.0
    }
}

/// An annotated axiom.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Axiom {
    pub body: AxiomBody,
    pub annotations: BTreeSet<Annotation>,
}

impl Axiom {
    #[must_use]
    pub fn new(body: AxiomBody) -> Self {
        Self {
            body,
            annotations: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    #[must_use]
    pub fn axiom_type(&self) -> AxiomType {
        self.body.axiom_type()
    }

    #[must_use]
    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Same body, no annotations.
    #[must_use]
    pub fn unannotated(&self) -> Self {
        Self::new(self.body.clone())
    }

    /// Entities of the body plus the annotation properties used on it.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut sig = Signature::default();
        sig.body(&self.body);
        for a in &self.annotations {
            sig.annotation(a);
        }
        sig.0
    }
}

impl From<AxiomBody> for Axiom {
    fn from(body: AxiomBody) -> Self {
        Self::new(body)
    }
}

// =============================================================================
// SIGNATURE COLLECTION
// =============================================================================

#[derive(Default)]
struct Signature(BTreeSet<Entity>);

impl Signature {
    fn add(&mut self, kind: EntityKind, iri: &str) {
        self.0.insert(Entity::new(kind, iri));
    }

    fn individual(&mut self, i: &Individual) {
        if let Individual::Named(iri) = i {
            self.add(EntityKind::NamedIndividual, iri);
        }
    }

    fn ope(&mut self, p: &ObjectPropertyExpression) {
        self.add(EntityKind::ObjectProperty, p.property());
    }

    fn annotation(&mut self, a: &Annotation) {
        self.add(EntityKind::AnnotationProperty, &a.property);
        for nested in &a.annotations {
            self.annotation(nested);
        }
    }

    fn class_expression(&mut self, ce: &ClassExpression) {
        match ce {
            ClassExpression::Class(iri) => self.add(EntityKind::Class, iri),
            ClassExpression::ObjectIntersectionOf(ops) | ClassExpression::ObjectUnionOf(ops) => {
                ops.iter().for_each(|op| self.class_expression(op));
            }
            ClassExpression::ObjectComplementOf(inner) => self.class_expression(inner),
            ClassExpression::ObjectOneOf(members) => {
                members.iter().for_each(|i| self.individual(i));
            }
            ClassExpression::ObjectSomeValuesFrom(p, filler)
            | ClassExpression::ObjectAllValuesFrom(p, filler) => {
                self.ope(p);
                self.class_expression(filler);
            }
            ClassExpression::ObjectHasValue(p, i) => {
                self.ope(p);
                self.individual(i);
            }
            ClassExpression::ObjectHasSelf(p) => self.ope(p),
            ClassExpression::ObjectCardinality {
                property, filler, ..
            } => {
                self.ope(property);
                if let Some(filler) = filler {
                    self.class_expression(filler);
                }
            }
            ClassExpression::DataSomeValuesFrom(p, range)
            | ClassExpression::DataAllValuesFrom(p, range) => {
                self.add(EntityKind::DataProperty, p);
                self.data_range(range);
            }
            ClassExpression::DataHasValue(p, _) => self.add(EntityKind::DataProperty, p),
            ClassExpression::DataCardinality {
                property, filler, ..
            } => {
                self.add(EntityKind::DataProperty, property);
                if let Some(filler) = filler {
                    self.data_range(filler);
                }
            }
        }
    }

    fn data_range(&mut self, range: &DataRange) {
        match range {
            DataRange::Datatype(iri) | DataRange::DatatypeRestriction(iri, _) => {
                self.add(EntityKind::Datatype, iri);
            }
            DataRange::DataOneOf(_) => {}
            DataRange::DataComplementOf(inner) => self.data_range(inner),
            DataRange::DataIntersectionOf(ops) | DataRange::DataUnionOf(ops) => {
                ops.iter().for_each(|op| self.data_range(op));
            }
        }
    }

    fn swrl_arg(&mut self, arg: &SwrlArg) {
        if let SwrlArg::Individual(i) = arg {
            self.individual(i);
        }
    }

    fn swrl_atom(&mut self, atom: &SwrlAtom) {
        match atom {
            SwrlAtom::Class(ce, a) => {
                self.class_expression(ce);
                self.swrl_arg(a);
            }
            SwrlAtom::ObjectProperty(p, a, b) => {
                self.ope(p);
                self.swrl_arg(a);
                self.swrl_arg(b);
            }
            SwrlAtom::DataProperty(p, a, b) => {
                self.add(EntityKind::DataProperty, p);
                self.swrl_arg(a);
                self.swrl_arg(b);
            }
            SwrlAtom::SameIndividual(a, b) | SwrlAtom::DifferentIndividuals(a, b) => {
                self.swrl_arg(a);
                self.swrl_arg(b);
            }
            SwrlAtom::DataRange(range, a) => {
                self.data_range(range);
                self.swrl_arg(a);
            }
            SwrlAtom::Builtin(_, args) => args.iter().for_each(|a| self.swrl_arg(a)),
        }
    }

    fn body(&mut self, body: &AxiomBody) {
        match body {
            AxiomBody::Declaration(e) => self.add(e.kind, &e.iri),
            AxiomBody::AnnotationAssertion { property, .. } => {
                self.add(EntityKind::AnnotationProperty, property);
            }
            AxiomBody::SubAnnotationPropertyOf { sub, sup } => {
                self.add(EntityKind::AnnotationProperty, sub);
                self.add(EntityKind::AnnotationProperty, sup);
            }
            AxiomBody::AnnotationPropertyDomain { property, .. }
            | AxiomBody::AnnotationPropertyRange { property, .. } => {
                self.add(EntityKind::AnnotationProperty, property);
            }
            AxiomBody::SubClassOf { sub, sup } => {
                self.class_expression(sub);
                self.class_expression(sup);
            }
            AxiomBody::EquivalentClasses(ops) | AxiomBody::DisjointClasses(ops) => {
                ops.iter().for_each(|op| self.class_expression(op));
            }
            AxiomBody::ClassAssertion { class, individual } => {
                self.class_expression(class);
                self.individual(individual);
            }
            AxiomBody::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                self.ope(property);
                self.individual(subject);
                self.individual(object);
            }
            AxiomBody::DataPropertyAssertion {
                property, subject, ..
            } => {
                self.add(EntityKind::DataProperty, property);
                self.individual(subject);
            }
            AxiomBody::SubObjectPropertyOf { sub, sup }
            | AxiomBody::InverseObjectProperties(sub, sup) => {
                self.ope(sub);
                self.ope(sup);
            }
            AxiomBody::SubDataPropertyOf { sub, sup } => {
                self.add(EntityKind::DataProperty, sub);
                self.add(EntityKind::DataProperty, sup);
            }
            AxiomBody::EquivalentObjectProperties(ops) => ops.iter().for_each(|p| self.ope(p)),
            AxiomBody::EquivalentDataProperties(ops) => ops
                .iter()
                .for_each(|p| self.add(EntityKind::DataProperty, p)),
            AxiomBody::ObjectPropertyDomain { property, domain } => {
                self.ope(property);
                self.class_expression(domain);
            }
            AxiomBody::ObjectPropertyRange { property, range } => {
                self.ope(property);
                self.class_expression(range);
            }
            AxiomBody::DataPropertyDomain { property, domain } => {
                self.add(EntityKind::DataProperty, property);
                self.class_expression(domain);
            }
            AxiomBody::DataPropertyRange { property, range } => {
                self.add(EntityKind::DataProperty, property);
                self.data_range(range);
            }
            AxiomBody::ObjectPropertyCharacteristic(_, p) => self.ope(p),
            AxiomBody::FunctionalDataProperty(p) => self.add(EntityKind::DataProperty, p),
            AxiomBody::SubPropertyChainOf { chain, sup } => {
                chain.iter().for_each(|p| self.ope(p));
                self.ope(sup);
            }
            AxiomBody::SameIndividual(members) | AxiomBody::DifferentIndividuals(members) => {
                members.iter().for_each(|i| self.individual(i));
            }
            AxiomBody::SwrlRule { body, head } => {
                body.iter().chain(head).for_each(|a| self.swrl_atom(a));
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::rdfs;

    #[test]
    fn equality_ignores_operand_order() {
        let a = AxiomBody::EquivalentClasses(BTreeSet::from([
            ClassExpression::class("http://example.org/A"),
            ClassExpression::class("http://example.org/B"),
        ]));
        let b = AxiomBody::EquivalentClasses(BTreeSet::from([
            ClassExpression::class("http://example.org/B"),
            ClassExpression::class("http://example.org/A"),
        ]));
        assert_eq!(a, b);
    }

    #[test]
    fn chain_order_matters() {
        let p = ObjectPropertyExpression::named("http://example.org/p");
        let q = ObjectPropertyExpression::named("http://example.org/q");
        let r = ObjectPropertyExpression::named("http://example.org/r");
        let pq = AxiomBody::SubPropertyChainOf {
            chain: vec![p.clone(), q.clone()],
            sup: r.clone(),
        };
        let qp = AxiomBody::SubPropertyChainOf {
            chain: vec![q, p],
            sup: r,
        };
        assert_ne!(pq, qp);
    }

    #[test]
    fn characteristic_types_are_distinct() {
        let types: BTreeSet<AxiomType> = Characteristic::ALL
            .into_iter()
            .map(Characteristic::axiom_type)
            .collect();
        assert_eq!(types.len(), 7);
        assert!(!types.contains(&AxiomType::FunctionalDataProperty));
    }

    #[test]
    fn signature_assigns_kinds_by_position() {
        let body = AxiomBody::SubClassOf {
            sub: ClassExpression::class("http://example.org/A"),
            sup: ClassExpression::ObjectSomeValuesFrom(
                ObjectPropertyExpression::named("http://example.org/p"),
                Box::new(ClassExpression::class("http://example.org/B")),
            ),
        };
        let axiom = Axiom::new(body).with_annotations([Annotation::literal(rdfs::COMMENT, "x")]);
        let sig = axiom.signature();
        assert!(sig.contains(&Entity::class("http://example.org/A")));
        assert!(sig.contains(&Entity::new(EntityKind::ObjectProperty, "http://example.org/p")));
        assert!(sig.contains(&Entity::new(EntityKind::AnnotationProperty, rdfs::COMMENT)));
        assert_eq!(sig.len(), 4);
    }

    #[test]
    fn unannotated_drops_annotations_only() {
        let axiom = Axiom::new(AxiomBody::Declaration(Entity::class("http://example.org/C")))
            .with_annotations([Annotation::literal(rdfs::LABEL, "C")]);
        assert!(axiom.is_annotated());
        let bare = axiom.unannotated();
        assert!(!bare.is_annotated());
        assert_eq!(bare.body, axiom.body);
    }
}
