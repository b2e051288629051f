//! Class expressions, property expressions, data ranges, individuals and
//! SWRL atoms: decoding on `ReadContext`, encoding on `Writer`.

use super::lists::read_list;
use super::{Malformed, ReadContext, Writer, part};
use crate::axiom::{
    CardinalityKind, ClassExpression, DataRange, FacetRestriction, Individual,
    ObjectPropertyExpression, SwrlArg, SwrlAtom,
};
use crate::object::OntObject;
use crate::personality::{EntityKind, View};
use crate::vocab::{self, owl, rdf, rdfs, swrl, xsd};
use crate::{Literal, Node, Triple};
use std::collections::BTreeSet;
use std::sync::Arc;

type Decoding<T> = Result<T, Malformed>;

fn typing(node: &Node, type_iri: &str) -> Triple {
    Triple::new(node.clone(), Node::iri(rdf::TYPE), Node::iri(type_iri))
}

// =============================================================================
// DECODING
// =============================================================================

impl ReadContext<'_> {
    /// The single object of `node predicate ?o`, with the triple as witness.
    pub(crate) fn required(&self, node: &Node, predicate: &str) -> Decoding<(Node, Triple)> {
        let object = self.graph.object(node, predicate).ok_or_else(|| {
            Malformed::new(format!("{} needs exactly one <{}>", node, predicate))
        })?;
        let triple = Triple::new(node.clone(), Node::iri(predicate), object.clone());
        Ok((object, triple))
    }

    pub(crate) fn optional(&self, node: &Node, predicate: &str) -> Decoding<Option<(Node, Triple)>> {
        match self.graph.objects(node, predicate).len() {
            0 => Ok(None),
            _ => self.required(node, predicate).map(Some),
        }
    }

    pub(crate) fn list(&self, head: &Node) -> Decoding<OntObject<Vec<Node>>> {
        read_list(self.graph, head)
    }

    /// Enter a blank node; fails if it is already being decoded.
    fn enter(&self, node: &Node) -> Decoding<()> {
        if self.visiting.borrow_mut().insert(node.clone()) {
            Ok(())
        } else {
            Err(Malformed::new(format!("recursive expression at {}", node)))
        }
    }

    fn leave(&self, node: &Node) {
        self.visiting.borrow_mut().remove(node);
    }

    // -------------------------------------------------------------------------
    // Class expressions
    // -------------------------------------------------------------------------

    /// Decode a class expression. Anonymous ones are memoized per context.
    pub(crate) fn class_expression(&self, node: &Node) -> Decoding<Arc<OntObject<ClassExpression>>> {
        match node {
            Node::Iri(iri) if self.fits(node, View::Class) => {
                Ok(Arc::new(OntObject::new(ClassExpression::Class(iri.clone()))))
            }
            Node::Blank(_) => {
                let cached = self.class_expressions.borrow().get(node).cloned();
                if let Some(found) = cached {
                    return Ok(found);
                }
                self.enter(node)?;
                let decoded = self.anonymous_class(node);
                self.leave(node);
                let object = Arc::new(decoded?);
                self.class_expressions
                    .borrow_mut()
                    .insert(node.clone(), Arc::clone(&object));
                Ok(object)
            }
            _ => Err(Malformed::new(format!("{} is not a class expression", node))),
        }
    }

    fn anonymous_class(&self, node: &Node) -> Decoding<OntObject<ClassExpression>> {
        if self.graph.has_type(node, owl::RESTRICTION) {
            return self.restriction(node);
        }
        if !self.graph.has_type(node, owl::CLASS) {
            return Err(Malformed::new(format!("{} is not typed as a class", node)));
        }
        let mut obj = OntObject::new(()).with_triples([typing(node, owl::CLASS)]);
        if let Some((head, t)) = self.optional(node, owl::INTERSECTION_OF)? {
            obj.add_triple(t);
            let ops = self.class_list(&mut obj, &head)?;
            return Ok(obj.map(|()| ClassExpression::ObjectIntersectionOf(ops)));
        }
        if let Some((head, t)) = self.optional(node, owl::UNION_OF)? {
            obj.add_triple(t);
            let ops = self.class_list(&mut obj, &head)?;
            return Ok(obj.map(|()| ClassExpression::ObjectUnionOf(ops)));
        }
        if let Some((inner, t)) = self.optional(node, owl::COMPLEMENT_OF)? {
            obj.add_triple(t);
            let inner = self.class_expression(&inner)?;
            let value = inner.value().clone();
            obj.add_part(inner);
            return Ok(obj.map(|()| ClassExpression::ObjectComplementOf(Box::new(value))));
        }
        if let Some((head, t)) = self.optional(node, owl::ONE_OF)? {
            obj.add_triple(t);
            let list = self.list(&head)?;
            let members = obj.absorb(list);
            let individuals = members
                .iter()
                .map(|m| self.individual(m))
                .collect::<Decoding<BTreeSet<_>>>()?;
            return Ok(obj.map(|()| ClassExpression::ObjectOneOf(individuals)));
        }
        Err(Malformed::new(format!("{} has no class constructor", node)))
    }

    fn class_list(
        &self,
        obj: &mut OntObject<()>,
        head: &Node,
    ) -> Decoding<BTreeSet<ClassExpression>> {
        let list = self.list(head)?;
        let items = obj.absorb(list);
        let mut ops = BTreeSet::new();
        for item in &items {
            let ce = self.class_expression(item)?;
            ops.insert(ce.value().clone());
            obj.add_part(ce);
        }
        Ok(ops)
    }

    fn restriction(&self, node: &Node) -> Decoding<OntObject<ClassExpression>> {
        let (property, on_property) = self.required(node, owl::ON_PROPERTY)?;
        let mut obj = OntObject::new(()).with_triples([typing(node, owl::RESTRICTION), on_property]);
        if self.fits(&property, View::ObjectPropertyExpression) {
            let ope = self.object_property(&property)?;
            let ope = obj.absorb(ope);
            let value = self.object_restriction(node, ope, &mut obj)?;
            return Ok(obj.map(|()| value));
        }
        if self.fits(&property, View::DataProperty) {
            let dp = self.data_property(&property)?;
            let value = self.data_restriction(node, dp, &mut obj)?;
            return Ok(obj.map(|()| value));
        }
        Err(Malformed::new(format!(
            "restriction property {} is neither an object nor a data property",
            property
        )))
    }

    fn cardinality(&self, node: &Node, predicate: &str) -> Decoding<Option<(u32, Triple)>> {
        let Some((value, t)) = self.optional(node, predicate)? else {
            return Ok(None);
        };
        let n = value
            .as_literal()
            .and_then(Literal::as_cardinality)
            .ok_or_else(|| Malformed::new(format!("malformed cardinality {}", value)))?;
        Ok(Some((n, t)))
    }

    fn object_restriction(
        &self,
        node: &Node,
        ope: ObjectPropertyExpression,
        obj: &mut OntObject<()>,
    ) -> Decoding<ClassExpression> {
        for (predicate, universal) in [(owl::SOME_VALUES_FROM, false), (owl::ALL_VALUES_FROM, true)] {
            if let Some((filler, t)) = self.optional(node, predicate)? {
                obj.add_triple(t);
                let filler = self.class_expression(&filler)?;
                let value = Box::new(filler.value().clone());
                obj.add_part(filler);
                return Ok(if universal {
                    ClassExpression::ObjectAllValuesFrom(ope, value)
                } else {
                    ClassExpression::ObjectSomeValuesFrom(ope, value)
                });
            }
        }
        if let Some((value, t)) = self.optional(node, owl::HAS_VALUE)? {
            obj.add_triple(t);
            return Ok(ClassExpression::ObjectHasValue(ope, self.individual(&value)?));
        }
        if let Some((flag, t)) = self.optional(node, owl::HAS_SELF)? {
            let truthy = flag
                .as_literal()
                .is_some_and(|l| l.lexical == "true" || l.lexical == "1");
            if !truthy {
                return Err(Malformed::new(format!("owl:hasSelf must be true, got {}", flag)));
            }
            obj.add_triple(t);
            return Ok(ClassExpression::ObjectHasSelf(ope));
        }
        for kind in CardinalityKind::ALL {
            if let Some((cardinality, t)) = self.cardinality(node, kind.predicate())? {
                obj.add_triple(t);
                return Ok(ClassExpression::ObjectCardinality {
                    kind,
                    cardinality,
                    property: ope,
                    filler: None,
                });
            }
            if let Some((cardinality, t)) = self.cardinality(node, kind.qualified_predicate())? {
                obj.add_triple(t);
                let (filler, on_class) = self.required(node, owl::ON_CLASS)?;
                obj.add_triple(on_class);
                let filler = self.class_expression(&filler)?;
                let value = Box::new(filler.value().clone());
                obj.add_part(filler);
                return Ok(ClassExpression::ObjectCardinality {
                    kind,
                    cardinality,
                    property: ope,
                    filler: Some(value),
                });
            }
        }
        Err(Malformed::new(format!("{} has no object restriction", node)))
    }

    fn data_restriction(
        &self,
        node: &Node,
        property: String,
        obj: &mut OntObject<()>,
    ) -> Decoding<ClassExpression> {
        for (predicate, universal) in [(owl::SOME_VALUES_FROM, false), (owl::ALL_VALUES_FROM, true)] {
            if let Some((filler, t)) = self.optional(node, predicate)? {
                obj.add_triple(t);
                let range = self.data_range(&filler)?;
                let range = obj.absorb(range);
                return Ok(if universal {
                    ClassExpression::DataAllValuesFrom(property, range)
                } else {
                    ClassExpression::DataSomeValuesFrom(property, range)
                });
            }
        }
        if let Some((value, t)) = self.optional(node, owl::HAS_VALUE)? {
            obj.add_triple(t);
            return Ok(ClassExpression::DataHasValue(property, literal(&value)?));
        }
        for kind in CardinalityKind::ALL {
            if let Some((cardinality, t)) = self.cardinality(node, kind.predicate())? {
                obj.add_triple(t);
                return Ok(ClassExpression::DataCardinality {
                    kind,
                    cardinality,
                    property,
                    filler: None,
                });
            }
            if let Some((cardinality, t)) = self.cardinality(node, kind.qualified_predicate())? {
                obj.add_triple(t);
                let (filler, on_range) = self.required(node, owl::ON_DATA_RANGE)?;
                obj.add_triple(on_range);
                let range = self.data_range(&filler)?;
                let range = obj.absorb(range);
                return Ok(ClassExpression::DataCardinality {
                    kind,
                    cardinality,
                    property,
                    filler: Some(range),
                });
            }
        }
        Err(Malformed::new(format!("{} has no data restriction", node)))
    }

    // -------------------------------------------------------------------------
    // Properties and individuals
    // -------------------------------------------------------------------------

    pub(crate) fn object_property(&self, node: &Node) -> Decoding<OntObject<ObjectPropertyExpression>> {
        match node {
            Node::Iri(iri) if self.fits(node, View::ObjectProperty) => {
                Ok(OntObject::new(ObjectPropertyExpression::Named(iri.clone())))
            }
            Node::Blank(_) if self.fits(node, View::InverseObjectProperty) => {
                let (inner, t) = self.required(node, owl::INVERSE_OF)?;
                let iri = inner
                    .as_iri()
                    .ok_or_else(|| Malformed::new("inverse of a non-IRI"))?;
                Ok(OntObject::new(ObjectPropertyExpression::Inverse(iri.to_string())).with_triples([t]))
            }
            _ => Err(Malformed::new(format!("{} is not an object property", node))),
        }
    }

    pub(crate) fn data_property(&self, node: &Node) -> Decoding<String> {
        match node {
            Node::Iri(iri) if self.fits(node, View::DataProperty) => Ok(iri.clone()),
            _ => Err(Malformed::new(format!("{} is not a data property", node))),
        }
    }

    pub(crate) fn individual(&self, node: &Node) -> Decoding<Individual> {
        match node {
            Node::Iri(iri) if !self.personality.reserved().is_reserved(iri) => {
                Ok(Individual::Named(iri.clone()))
            }
            Node::Blank(label) if self.fits(node, View::AnonymousIndividual) => {
                Ok(Individual::Anonymous(label.clone()))
            }
            _ => Err(Malformed::new(format!("{} is not an individual", node))),
        }
    }

    // -------------------------------------------------------------------------
    // Data ranges
    // -------------------------------------------------------------------------

    pub(crate) fn data_range(&self, node: &Node) -> Decoding<OntObject<DataRange>> {
        match node {
            Node::Iri(iri) if self.fits(node, View::Datatype) => {
                Ok(OntObject::new(DataRange::Datatype(iri.clone())))
            }
            Node::Blank(_) if self.graph.has_type(node, rdfs::DATATYPE) => {
                self.enter(node)?;
                let decoded = self.anonymous_data_range(node);
                self.leave(node);
                decoded
            }
            _ => Err(Malformed::new(format!("{} is not a data range", node))),
        }
    }

    fn anonymous_data_range(&self, node: &Node) -> Decoding<OntObject<DataRange>> {
        let mut obj = OntObject::new(()).with_triples([typing(node, rdfs::DATATYPE)]);
        if let Some((head, t)) = self.optional(node, owl::ONE_OF)? {
            obj.add_triple(t);
            let list = self.list(&head)?;
            let values = obj
                .absorb(list)
                .iter()
                .map(literal)
                .collect::<Decoding<BTreeSet<_>>>()?;
            return Ok(obj.map(|()| DataRange::DataOneOf(values)));
        }
        if let Some((inner, t)) = self.optional(node, owl::DATATYPE_COMPLEMENT_OF)? {
            obj.add_triple(t);
            let inner = self.data_range(&inner)?;
            let inner = obj.absorb(inner);
            return Ok(obj.map(|()| DataRange::DataComplementOf(Box::new(inner))));
        }
        if let Some((base, t)) = self.optional(node, owl::ON_DATATYPE)? {
            obj.add_triple(t);
            let Some(base) = base.as_iri().map(str::to_string) else {
                return Err(Malformed::new("owl:onDatatype must name a datatype"));
            };
            let (head, t) = self.required(node, owl::WITH_RESTRICTIONS)?;
            obj.add_triple(t);
            let list = self.list(&head)?;
            let mut facets = BTreeSet::new();
            for facet_node in obj.absorb(list) {
                facets.insert(self.facet(&facet_node, &mut obj)?);
            }
            return Ok(obj.map(|()| DataRange::DatatypeRestriction(base, facets)));
        }
        for (predicate, union) in [(owl::INTERSECTION_OF, false), (owl::UNION_OF, true)] {
            if let Some((head, t)) = self.optional(node, predicate)? {
                obj.add_triple(t);
                let list = self.list(&head)?;
                let mut ops = BTreeSet::new();
                for item in obj.absorb(list) {
                    let range = self.data_range(&item)?;
                    ops.insert(obj.absorb(range));
                }
                return Ok(obj.map(|()| {
                    if union {
                        DataRange::DataUnionOf(ops)
                    } else {
                        DataRange::DataIntersectionOf(ops)
                    }
                }));
            }
        }
        Err(Malformed::new(format!("{} has no data range constructor", node)))
    }

    fn facet(&self, node: &Node, obj: &mut OntObject<()>) -> Decoding<FacetRestriction> {
        let mut found = self
            .graph
            .find(Some(node), None, None)
            .into_iter()
            .filter(|t| {
                t.predicate
                    .as_iri()
                    .is_some_and(|p| self.personality.builtins().is_facet(p))
            });
        let (Some(t), None) = (found.next(), found.next()) else {
            return Err(Malformed::new(format!("{} needs exactly one facet", node)));
        };
        let value = literal(&t.object)?;
        let facet = t.predicate.as_iri().map(str::to_string).unwrap_or_default();
        obj.add_triple(t);
        Ok(FacetRestriction { facet, value })
    }

    // -------------------------------------------------------------------------
    // SWRL
    // -------------------------------------------------------------------------

    pub(crate) fn swrl_atom(&self, node: &Node) -> Decoding<OntObject<SwrlAtom>> {
        let Some(atom_type) = vocab::SWRL_ATOM_TYPES
            .into_iter()
            .find(|ty| self.graph.has_type(node, ty))
        else {
            return Err(Malformed::new(format!("{} is not a SWRL atom", node)));
        };
        let mut obj = OntObject::new(()).with_triples([typing(node, atom_type)]);
        let atom = match atom_type {
            swrl::CLASS_ATOM => {
                let (class, t) = self.required(node, swrl::CLASS_PREDICATE)?;
                obj.add_triple(t);
                let class = self.class_expression(&class)?;
                let value = class.value().clone();
                obj.add_part(class);
                SwrlAtom::Class(value, self.swrl_arg(node, swrl::ARGUMENT1, &mut obj)?)
            }
            swrl::INDIVIDUAL_PROPERTY_ATOM => {
                let (property, t) = self.required(node, swrl::PROPERTY_PREDICATE)?;
                obj.add_triple(t);
                let property = self.object_property(&property)?;
                let property = obj.absorb(property);
                SwrlAtom::ObjectProperty(
                    property,
                    self.swrl_arg(node, swrl::ARGUMENT1, &mut obj)?,
                    self.swrl_arg(node, swrl::ARGUMENT2, &mut obj)?,
                )
            }
            swrl::DATAVALUED_PROPERTY_ATOM => {
                let (property, t) = self.required(node, swrl::PROPERTY_PREDICATE)?;
                obj.add_triple(t);
                SwrlAtom::DataProperty(
                    self.data_property(&property)?,
                    self.swrl_arg(node, swrl::ARGUMENT1, &mut obj)?,
                    self.swrl_arg(node, swrl::ARGUMENT2, &mut obj)?,
                )
            }
            swrl::SAME_INDIVIDUAL_ATOM => SwrlAtom::SameIndividual(
                self.swrl_arg(node, swrl::ARGUMENT1, &mut obj)?,
                self.swrl_arg(node, swrl::ARGUMENT2, &mut obj)?,
            ),
            swrl::DIFFERENT_INDIVIDUALS_ATOM => SwrlAtom::DifferentIndividuals(
                self.swrl_arg(node, swrl::ARGUMENT1, &mut obj)?,
                self.swrl_arg(node, swrl::ARGUMENT2, &mut obj)?,
            ),
            swrl::DATA_RANGE_ATOM => {
                let (range, t) = self.required(node, swrl::DATA_RANGE)?;
                obj.add_triple(t);
                let range = self.data_range(&range)?;
                let range = obj.absorb(range);
                SwrlAtom::DataRange(range, self.swrl_arg(node, swrl::ARGUMENT1, &mut obj)?)
            }
            _ => {
                let (builtin, t) = self.required(node, swrl::BUILTIN)?;
                obj.add_triple(t);
                let Some(builtin) = builtin.as_iri().map(str::to_string) else {
                    return Err(Malformed::new("swrl:builtin must be an IRI"));
                };
                let (head, t) = self.required(node, swrl::ARGUMENTS)?;
                obj.add_triple(t);
                let list = self.list(&head)?;
                let args = obj
                    .absorb(list)
                    .iter()
                    .map(|n| self.swrl_value(n))
                    .collect::<Decoding<Vec<_>>>()?;
                SwrlAtom::Builtin(builtin, args)
            }
        };
        Ok(obj.map(|()| atom))
    }

    fn swrl_arg(&self, node: &Node, predicate: &str, obj: &mut OntObject<()>) -> Decoding<SwrlArg> {
        let (value, t) = self.required(node, predicate)?;
        obj.add_triple(t);
        self.swrl_value(&value)
    }

    fn swrl_value(&self, node: &Node) -> Decoding<SwrlArg> {
        match node {
            Node::Iri(iri) if self.graph.has_type(node, swrl::VARIABLE) => {
                Ok(SwrlArg::Variable(iri.clone()))
            }
            Node::Literal(lit) => Ok(SwrlArg::Literal(lit.clone())),
            _ => self.individual(node).map(SwrlArg::Individual),
        }
    }

    /// Decode a list of SWRL atoms, keeping graph order.
    pub(crate) fn swrl_atoms(&self, head: &Node, obj: &mut OntObject<()>) -> Decoding<Vec<SwrlAtom>> {
        let list = self.list(head)?;
        let mut atoms = Vec::new();
        for node in obj.absorb(list) {
            let atom = self.swrl_atom(&node)?;
            atoms.push(atom.value().clone());
            obj.add_part(part(atom));
        }
        Ok(atoms)
    }
}

pub(crate) fn literal(node: &Node) -> Decoding<Literal> {
    node.as_literal()
        .cloned()
        .ok_or_else(|| Malformed::new(format!("{} is not a literal", node)))
}

// =============================================================================
// ENCODING
// =============================================================================

fn cardinality_literal(n: u32) -> Node {
    Node::typed_literal(n.to_string(), xsd::NON_NEGATIVE_INTEGER)
}

impl Writer<'_> {
    pub(crate) fn class_expression(&mut self, ce: &ClassExpression) -> Node {
        let ClassExpression::Class(iri) = ce else {
            return self.anonymous_class(ce);
        };
        self.declare_kind(EntityKind::Class, iri);
        Node::iri(iri.as_str())
    }

    fn anonymous_class(&mut self, ce: &ClassExpression) -> Node {
        let x = self.blank();
        match ce {
            ClassExpression::Class(_) => {}
            ClassExpression::ObjectIntersectionOf(ops) | ClassExpression::ObjectUnionOf(ops) => {
                let predicate = if matches!(ce, ClassExpression::ObjectUnionOf(_)) {
                    owl::UNION_OF
                } else {
                    owl::INTERSECTION_OF
                };
                self.triple(x.clone(), rdf::TYPE, Node::iri(owl::CLASS));
                let items = ops.iter().map(|op| self.class_expression(op)).collect();
                let head = self.list(items);
                self.triple(x.clone(), predicate, head);
            }
            ClassExpression::ObjectComplementOf(inner) => {
                self.triple(x.clone(), rdf::TYPE, Node::iri(owl::CLASS));
                let inner = self.class_expression(inner);
                self.triple(x.clone(), owl::COMPLEMENT_OF, inner);
            }
            ClassExpression::ObjectOneOf(members) => {
                self.triple(x.clone(), rdf::TYPE, Node::iri(owl::CLASS));
                let items = members.iter().map(|i| self.individual(i)).collect();
                let head = self.list(items);
                self.triple(x.clone(), owl::ONE_OF, head);
            }
            ClassExpression::ObjectSomeValuesFrom(p, filler)
            | ClassExpression::ObjectAllValuesFrom(p, filler) => {
                let predicate = if matches!(ce, ClassExpression::ObjectAllValuesFrom(..)) {
                    owl::ALL_VALUES_FROM
                } else {
                    owl::SOME_VALUES_FROM
                };
                self.object_restriction_head(&x, p);
                let filler = self.class_expression(filler);
                self.triple(x.clone(), predicate, filler);
            }
            ClassExpression::ObjectHasValue(p, i) => {
                self.object_restriction_head(&x, p);
                let value = self.individual(i);
                self.triple(x.clone(), owl::HAS_VALUE, value);
            }
            ClassExpression::ObjectHasSelf(p) => {
                self.object_restriction_head(&x, p);
                self.triple(x.clone(), owl::HAS_SELF, Node::typed_literal("true", xsd::BOOLEAN));
            }
            ClassExpression::ObjectCardinality {
                kind,
                cardinality,
                property,
                filler,
            } => {
                self.object_restriction_head(&x, property);
                match filler {
                    Some(filler) => {
                        self.triple(x.clone(), kind.qualified_predicate(), cardinality_literal(*cardinality));
                        let filler = self.class_expression(filler);
                        self.triple(x.clone(), owl::ON_CLASS, filler);
                    }
                    None => {
                        self.triple(x.clone(), kind.predicate(), cardinality_literal(*cardinality));
                    }
                }
            }
            ClassExpression::DataSomeValuesFrom(p, range)
            | ClassExpression::DataAllValuesFrom(p, range) => {
                let predicate = if matches!(ce, ClassExpression::DataAllValuesFrom(..)) {
                    owl::ALL_VALUES_FROM
                } else {
                    owl::SOME_VALUES_FROM
                };
                self.data_restriction_head(&x, p);
                let range = self.data_range(range);
                self.triple(x.clone(), predicate, range);
            }
            ClassExpression::DataHasValue(p, value) => {
                self.data_restriction_head(&x, p);
                self.triple(x.clone(), owl::HAS_VALUE, Node::Literal(value.clone()));
            }
            ClassExpression::DataCardinality {
                kind,
                cardinality,
                property,
                filler,
            } => {
                self.data_restriction_head(&x, property);
                match filler {
                    Some(range) => {
                        self.triple(x.clone(), kind.qualified_predicate(), cardinality_literal(*cardinality));
                        let range = self.data_range(range);
                        self.triple(x.clone(), owl::ON_DATA_RANGE, range);
                    }
                    None => {
                        self.triple(x.clone(), kind.predicate(), cardinality_literal(*cardinality));
                    }
                }
            }
        }
        x
    }

    fn object_restriction_head(&mut self, x: &Node, property: &ObjectPropertyExpression) {
        self.triple(x.clone(), rdf::TYPE, Node::iri(owl::RESTRICTION));
        let p = self.object_property(property);
        self.triple(x.clone(), owl::ON_PROPERTY, p);
    }

    fn data_restriction_head(&mut self, x: &Node, property: &str) {
        self.triple(x.clone(), rdf::TYPE, Node::iri(owl::RESTRICTION));
        let p = self.data_property(property);
        self.triple(x.clone(), owl::ON_PROPERTY, p);
    }

    pub(crate) fn object_property(&mut self, property: &ObjectPropertyExpression) -> Node {
        match property {
            ObjectPropertyExpression::Named(iri) => {
                self.declare_kind(EntityKind::ObjectProperty, iri);
                Node::iri(iri.as_str())
            }
            ObjectPropertyExpression::Inverse(iri) => {
                self.declare_kind(EntityKind::ObjectProperty, iri);
                let x = self.blank();
                self.triple(x.clone(), owl::INVERSE_OF, Node::iri(iri.as_str()));
                x
            }
        }
    }

    pub(crate) fn data_property(&mut self, iri: &str) -> Node {
        self.declare_kind(EntityKind::DataProperty, iri);
        Node::iri(iri)
    }

    pub(crate) fn individual(&mut self, individual: &Individual) -> Node {
        if let Individual::Named(iri) = individual {
            self.declare_kind(EntityKind::NamedIndividual, iri);
        }
        individual.node()
    }

    pub(crate) fn data_range(&mut self, range: &DataRange) -> Node {
        if let DataRange::Datatype(iri) = range {
            self.declare_kind(EntityKind::Datatype, iri);
            return Node::iri(iri.as_str());
        }
        let x = self.blank();
        self.triple(x.clone(), rdf::TYPE, Node::iri(rdfs::DATATYPE));
        match range {
            DataRange::Datatype(_) => {}
            DataRange::DataOneOf(values) => {
                let items = values.iter().cloned().map(Node::Literal).collect();
                let head = self.list(items);
                self.triple(x.clone(), owl::ONE_OF, head);
            }
            DataRange::DatatypeRestriction(base, facets) => {
                self.declare_kind(EntityKind::Datatype, base);
                self.triple(x.clone(), owl::ON_DATATYPE, Node::iri(base.as_str()));
                let items = facets
                    .iter()
                    .map(|f| {
                        let cell = self.blank();
                        self.triple(cell.clone(), &f.facet, Node::Literal(f.value.clone()));
                        cell
                    })
                    .collect();
                let head = self.list(items);
                self.triple(x.clone(), owl::WITH_RESTRICTIONS, head);
            }
            DataRange::DataComplementOf(inner) => {
                let inner = self.data_range(inner);
                self.triple(x.clone(), owl::DATATYPE_COMPLEMENT_OF, inner);
            }
            DataRange::DataIntersectionOf(ops) | DataRange::DataUnionOf(ops) => {
                let predicate = if matches!(range, DataRange::DataUnionOf(_)) {
                    owl::UNION_OF
                } else {
                    owl::INTERSECTION_OF
                };
                let items = ops.iter().map(|op| self.data_range(op)).collect();
                let head = self.list(items);
                self.triple(x.clone(), predicate, head);
            }
        }
        x
    }

    pub(crate) fn swrl_atom(&mut self, atom: &SwrlAtom) -> Node {
        let x = self.blank();
        self.triple(x.clone(), rdf::TYPE, Node::iri(atom.type_iri()));
        match atom {
            SwrlAtom::Class(ce, a) => {
                let class = self.class_expression(ce);
                self.triple(x.clone(), swrl::CLASS_PREDICATE, class);
                self.swrl_arg(&x, swrl::ARGUMENT1, a);
            }
            SwrlAtom::ObjectProperty(p, a, b) => {
                let p = self.object_property(p);
                self.triple(x.clone(), swrl::PROPERTY_PREDICATE, p);
                self.swrl_arg(&x, swrl::ARGUMENT1, a);
                self.swrl_arg(&x, swrl::ARGUMENT2, b);
            }
            SwrlAtom::DataProperty(p, a, b) => {
                let p = self.data_property(p);
                self.triple(x.clone(), swrl::PROPERTY_PREDICATE, p);
                self.swrl_arg(&x, swrl::ARGUMENT1, a);
                self.swrl_arg(&x, swrl::ARGUMENT2, b);
            }
            SwrlAtom::SameIndividual(a, b) | SwrlAtom::DifferentIndividuals(a, b) => {
                self.swrl_arg(&x, swrl::ARGUMENT1, a);
                self.swrl_arg(&x, swrl::ARGUMENT2, b);
            }
            SwrlAtom::DataRange(range, a) => {
                let range = self.data_range(range);
                self.triple(x.clone(), swrl::DATA_RANGE, range);
                self.swrl_arg(&x, swrl::ARGUMENT1, a);
            }
            SwrlAtom::Builtin(builtin, args) => {
                self.triple(x.clone(), swrl::BUILTIN, Node::iri(builtin.as_str()));
                let items = args.iter().map(|a| self.swrl_value(a)).collect();
                let head = self.list(items);
                self.triple(x.clone(), swrl::ARGUMENTS, head);
            }
        }
        x
    }

    fn swrl_arg(&mut self, atom: &Node, predicate: &str, arg: &SwrlArg) {
        let value = self.swrl_value(arg);
        self.triple(atom.clone(), predicate, value);
    }

    fn swrl_value(&mut self, arg: &SwrlArg) -> Node {
        match arg {
            SwrlArg::Variable(iri) => {
                self.declare_variable(iri);
                Node::iri(iri.as_str())
            }
            SwrlArg::Individual(i) => self.individual(i),
            SwrlArg::Literal(lit) => Node::Literal(lit.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::graph::{Graph, GraphStore};
    use crate::object::Witnessed;
    use crate::Personality;

    fn ex(s: &str) -> String {
        format!("http://example.org/{}", s)
    }

    fn round_trip(ce: &ClassExpression) -> ClassExpression {
        let mut graph = Graph::new();
        let personality = Personality::default();
        let mut writer = Writer::new(&mut graph, &personality);
        let node = writer.class_expression(ce);
        drop(writer);
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        ctx.class_expression(&node).expect("decode").value().clone()
    }

    #[test]
    fn restrictions_round_trip() {
        let p = ObjectPropertyExpression::named(ex("p"));
        let expressions = [
            ClassExpression::ObjectSomeValuesFrom(p.clone(), Box::new(ClassExpression::class(ex("B")))),
            ClassExpression::ObjectAllValuesFrom(
                ObjectPropertyExpression::Inverse(ex("p")),
                Box::new(ClassExpression::thing()),
            ),
            ClassExpression::ObjectHasSelf(p.clone()),
            ClassExpression::ObjectCardinality {
                kind: CardinalityKind::Max,
                cardinality: 2,
                property: p.clone(),
                filler: Some(Box::new(ClassExpression::class(ex("B")))),
            },
            ClassExpression::DataCardinality {
                kind: CardinalityKind::Exact,
                cardinality: 1,
                property: ex("d"),
                filler: None,
            },
            ClassExpression::DataSomeValuesFrom(
                ex("d"),
                DataRange::DatatypeRestriction(
                    xsd::INTEGER.to_string(),
                    BTreeSet::from([FacetRestriction {
                        facet: xsd::MIN_INCLUSIVE.to_string(),
                        value: Literal::typed("5", xsd::INTEGER),
                    }]),
                ),
            ),
        ];
        for ce in &expressions {
            assert_eq!(&round_trip(ce), ce);
        }
    }

    #[test]
    fn boolean_classes_round_trip() {
        let ce = ClassExpression::ObjectUnionOf(BTreeSet::from([
            ClassExpression::class(ex("A")),
            ClassExpression::ObjectComplementOf(Box::new(ClassExpression::class(ex("B")))),
            ClassExpression::ObjectOneOf(BTreeSet::from([Individual::named(ex("i"))])),
        ]));
        assert_eq!(round_trip(&ce), ce);
    }

    #[test]
    fn self_referential_class_is_malformed() {
        let mut graph = Graph::new();
        let x = Node::blank("x");
        graph.add(typing(&x, owl::CLASS));
        graph.add(Triple::new(x.clone(), Node::iri(owl::COMPLEMENT_OF), x.clone()));
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        assert!(ctx.class_expression(&x).is_err());
    }

    #[test]
    fn malformed_cardinality_is_reported() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        personality
            .declare(&Node::iri(ex("p")), View::ObjectProperty, &mut graph)
            .expect("declare");
        let r = Node::blank("r");
        graph.add(typing(&r, owl::RESTRICTION));
        graph.add(Triple::new(r.clone(), Node::iri(owl::ON_PROPERTY), Node::iri(ex("p"))));
        graph.add(Triple::new(r.clone(), Node::iri(owl::MIN_CARDINALITY), Node::literal("lots")));
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        let err = ctx.class_expression(&r).expect_err("malformed");
        assert!(err.0.contains("cardinality"));
    }

    #[test]
    fn witnesses_cover_structure() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        let ce = ClassExpression::ObjectIntersectionOf(BTreeSet::from([
            ClassExpression::class(ex("A")),
            ClassExpression::class(ex("B")),
        ]));
        let mut writer = Writer::new(&mut graph, &personality);
        let node = writer.class_expression(&ce);
        let written = writer.finish();
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        let decoded = ctx.class_expression(&node).expect("decode");
        assert_eq!(decoded.triples(), written.witnesses);
    }

    #[test]
    fn swrl_atom_round_trip() {
        let mut graph = Graph::new();
        let personality = Personality::default();
        let atom = SwrlAtom::Builtin(
            "http://www.w3.org/2003/11/swrlb#greaterThan".to_string(),
            vec![SwrlArg::variable(ex("x")), SwrlArg::Literal(Literal::typed("3", xsd::INTEGER))],
        );
        let mut writer = Writer::new(&mut graph, &personality);
        let node = writer.swrl_atom(&atom);
        drop(writer);
        let config = ModelConfig::default();
        let ctx = ReadContext::new(&graph, &config);
        assert_eq!(ctx.swrl_atom(&node).expect("decode").into_value(), atom);
        assert!(graph.has_type(&Node::iri(ex("x")), swrl::VARIABLE));
    }
}
