//! # Graph Engine
//!
//! The deterministic triple store the ontology core reads and writes.
//!
//! This module implements the `GraphStore` trait for two backends:
//! - `Graph`: a single in-memory graph with SPO/POS/OSP indices
//! - `UnionGraph`: a local `Graph` composed with shared, read-only imports
//!
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic ordering.

use crate::primitives::BLANK_PREFIX;
use crate::{Node, Triple};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

type Index = BTreeMap<Node, BTreeMap<Node, BTreeSet<Node>>>;

// =============================================================================
// PREFIX MAPPING
// =============================================================================

/// Prefix name to namespace IRI side table.
///
/// Independent of the triples: changing a prefix never touches the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMapping {
    prefixes: BTreeMap<String, String>,
}

impl PrefixMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping preloaded with `rdf`, `rdfs`, `owl`, `xsd` and `swrl`.
    #[must_use]
    pub fn standard() -> Self {
        use crate::vocab::{owl, rdf, rdfs, swrl, xsd};
        let mut mapping = Self::new();
        mapping.set_prefix("rdf", rdf::NS);
        mapping.set_prefix("rdfs", rdfs::NS);
        mapping.set_prefix("owl", owl::NS);
        mapping.set_prefix("xsd", xsd::NS);
        mapping.set_prefix("swrl", swrl::NS);
        mapping
    }

    /// Bind `prefix` to `namespace`, replacing any previous binding.
    pub fn set_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Remove a binding. Returns the namespace it was bound to.
    pub fn remove_prefix(&mut self, prefix: &str) -> Option<String> {
        self.prefixes.remove(prefix)
    }

    #[must_use]
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Expand `prefix:local` into a full IRI. Unknown prefixes yield `None`.
    #[must_use]
    pub fn expand(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.prefixes
            .get(prefix)
            .map(|ns| format!("{}{}", ns, local))
    }

    /// Shorten an IRI with the longest matching namespace.
    #[must_use]
    pub fn shorten(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(p, ns)| (p.as_str(), ns.as_str()))
    }
}

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The GraphStore trait defines the triple operations the core relies on.
///
/// `find` returns an owned snapshot, so callers may mutate the store while
/// walking the result. Implementations must not be assumed to keep sizes or
/// contents stable across calls: a host may release a lock in between.
pub trait GraphStore {
    /// All triples matching the pattern; `None` is a wildcard.
    fn find(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> Vec<Triple>;

    /// Add a triple. Returns `true` if the graph changed.
    fn add(&mut self, triple: Triple) -> bool;

    /// Delete a triple. Returns `true` if the graph changed.
    fn delete(&mut self, triple: &Triple) -> bool;

    /// Check whether the triple is visible in the graph.
    fn contains(&self, triple: &Triple) -> bool;

    /// Check whether the triple is asserted directly, as opposed to being
    /// visible only through an import.
    fn is_local(&self, triple: &Triple) -> bool;

    /// Number of visible triples.
    fn size(&self) -> usize;

    /// Mint a blank node not yet used anywhere in the graph.
    fn fresh_blank(&mut self) -> Node;

    fn prefixes(&self) -> &PrefixMapping;

    fn prefixes_mut(&mut self) -> &mut PrefixMapping;

    // -------------------------------------------------------------------------
    // Provided helpers
    // -------------------------------------------------------------------------

    /// Check whether any triple matches the pattern.
    fn has(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> bool {
        !self.find(s, p, o).is_empty()
    }

    /// Objects of `subject predicate ?o`.
    fn objects(&self, subject: &Node, predicate: &str) -> Vec<Node> {
        let p = Node::iri(predicate);
        self.find(Some(subject), Some(&p), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    /// Subjects of `?s predicate object`.
    fn subjects(&self, predicate: &str, object: &Node) -> Vec<Node> {
        let p = Node::iri(predicate);
        self.find(None, Some(&p), Some(object))
            .into_iter()
            .map(|t| t.subject)
            .collect()
    }

    /// The single object of `subject predicate ?o`, if there is exactly one.
    fn object(&self, subject: &Node, predicate: &str) -> Option<Node> {
        let mut objects = self.objects(subject, predicate);
        if objects.len() == 1 { objects.pop() } else { None }
    }

    /// `rdf:type` objects of `subject`.
    fn types(&self, subject: &Node) -> Vec<Node> {
        self.objects(subject, crate::vocab::rdf::TYPE)
    }

    /// Check for `subject rdf:type type_iri`.
    fn has_type(&self, subject: &Node, type_iri: &str) -> bool {
        self.contains(&Triple::new(
            subject.clone(),
            Node::iri(crate::vocab::rdf::TYPE),
            Node::iri(type_iri),
        ))
    }
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// The main in-memory Graph structure.
///
/// Three indices over the same triples; every mutation keeps them in step.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// subject -> predicate -> objects
    spo: Index,
    /// predicate -> object -> subjects
    pos: Index,
    /// object -> subject -> predicates
    osp: Index,
    /// Number of triples.
    len: usize,
    /// Next blank label counter.
    next_blank: u64,
    prefixes: PrefixMapping,
}

fn index_insert(index: &mut Index, a: &Node, b: &Node, c: &Node) -> bool {
    index
        .entry(a.clone())
        .or_default()
        .entry(b.clone())
        .or_default()
        .insert(c.clone())
}

fn index_remove(index: &mut Index, a: &Node, b: &Node, c: &Node) -> bool {
    let Some(level1) = index.get_mut(a) else {
        return false;
    };
    let Some(level2) = level1.get_mut(b) else {
        return false;
    };
    let removed = level2.remove(c);
    if level2.is_empty() {
        level1.remove(b);
    }
    if level1.is_empty() {
        index.remove(a);
    }
    removed
}

/// Enumerate `(a, b, c)` entries of an index under optional bindings.
fn index_scan(
    index: &Index,
    a: Option<&Node>,
    b: Option<&Node>,
    c: Option<&Node>,
) -> Vec<(Node, Node, Node)> {
    let mut out = Vec::new();
    let level1: Vec<(&Node, &BTreeMap<Node, BTreeSet<Node>>)> = match a {
        Some(a) => index.get_key_value(a).into_iter().collect(),
        None => index.iter().collect(),
    };
    for (ka, l2) in level1 {
        let level2: Vec<(&Node, &BTreeSet<Node>)> = match b {
            Some(b) => l2.get_key_value(b).into_iter().collect(),
            None => l2.iter().collect(),
        };
        for (kb, l3) in level2 {
            match c {
                Some(c) => {
                    if l3.contains(c) {
                        out.push((ka.clone(), kb.clone(), c.clone()));
                    }
                }
                None => {
                    for kc in l3 {
                        out.push((ka.clone(), kb.clone(), kc.clone()));
                    }
                }
            }
        }
    }
    out
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the standard prefix table.
    #[must_use]
    pub fn with_standard_prefixes() -> Self {
        Self {
            prefixes: PrefixMapping::standard(),
            ..Self::default()
        }
    }

    /// Build a graph from triples.
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut graph = Self::new();
        for t in triples {
            graph.add(t);
        }
        graph
    }

    /// All triples in SPO order.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        self.spo.iter().flat_map(|(s, pos)| {
            pos.iter().flat_map(move |(p, objects)| {
                objects
                    .iter()
                    .map(move |o| Triple::new(s.clone(), p.clone(), o.clone()))
            })
        })
    }

    /// Check whether the node occurs in any position.
    #[must_use]
    pub fn mentions(&self, node: &Node) -> bool {
        self.spo.contains_key(node) || self.pos.contains_key(node) || self.osp.contains_key(node)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl GraphStore for Graph {
    fn find(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> Vec<Triple> {
        // Pick the index whose leading positions are bound.
        match (s, p, o) {
            (Some(_), _, _) if o.is_none() || p.is_some() => index_scan(&self.spo, s, p, o)
                .into_iter()
                .map(|(s, p, o)| Triple::new(s, p, o))
                .collect(),
            (_, Some(_), _) => index_scan(&self.pos, p, o, s)
                .into_iter()
                .map(|(p, o, s)| Triple::new(s, p, o))
                .collect(),
            (_, None, Some(_)) => index_scan(&self.osp, o, s, p)
                .into_iter()
                .map(|(o, s, p)| Triple::new(s, p, o))
                .collect(),
            _ => self.triples().collect(),
        }
    }

    fn add(&mut self, triple: Triple) -> bool {
        let Triple {
            subject,
            predicate,
            object,
        } = triple;
        if !index_insert(&mut self.spo, &subject, &predicate, &object) {
            return false;
        }
        index_insert(&mut self.pos, &predicate, &object, &subject);
        index_insert(&mut self.osp, &object, &subject, &predicate);
        self.len = self.len.saturating_add(1);
        true
    }

    fn delete(&mut self, triple: &Triple) -> bool {
        if !index_remove(&mut self.spo, &triple.subject, &triple.predicate, &triple.object) {
            return false;
        }
        index_remove(&mut self.pos, &triple.predicate, &triple.object, &triple.subject);
        index_remove(&mut self.osp, &triple.object, &triple.subject, &triple.predicate);
        self.len = self.len.saturating_sub(1);
        true
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.spo
            .get(&triple.subject)
            .and_then(|pos| pos.get(&triple.predicate))
            .is_some_and(|objects| objects.contains(&triple.object))
    }

    fn is_local(&self, triple: &Triple) -> bool {
        self.contains(triple)
    }

    fn size(&self) -> usize {
        self.len
    }

    fn fresh_blank(&mut self) -> Node {
        loop {
            let node = Node::blank(format!("{}{}", BLANK_PREFIX, self.next_blank));
            self.next_blank = self.next_blank.saturating_add(1);
            if !self.mentions(&node) {
                return node;
            }
        }
    }

    fn prefixes(&self) -> &PrefixMapping {
        &self.prefixes
    }

    fn prefixes_mut(&mut self) -> &mut PrefixMapping {
        &mut self.prefixes
    }
}

// =============================================================================
// UNION GRAPH (local + imports)
// =============================================================================

/// A local graph composed with read-only imported graphs.
///
/// Reads see the union; writes only ever touch the local graph. Deleting a
/// triple that is visible only through an import is a no-op.
#[derive(Debug, Clone, Default)]
pub struct UnionGraph {
    local: Graph,
    imports: Vec<Arc<Graph>>,
}

impl UnionGraph {
    #[must_use]
    pub fn new(local: Graph) -> Self {
        Self {
            local,
            imports: Vec::new(),
        }
    }

    /// Attach an imported graph. Imports are shared, never copied.
    pub fn add_import(&mut self, import: Arc<Graph>) {
        self.imports.push(import);
    }

    #[must_use]
    pub fn local(&self) -> &Graph {
        &self.local
    }

    pub fn imports(&self) -> impl Iterator<Item = &Arc<Graph>> {
        self.imports.iter()
    }

    fn mentions(&self, node: &Node) -> bool {
        self.local.mentions(node) || self.imports.iter().any(|g| g.mentions(node))
    }
}

impl GraphStore for UnionGraph {
    fn find(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> Vec<Triple> {
        if self.imports.is_empty() {
            return self.local.find(s, p, o);
        }
        let mut seen: BTreeSet<Triple> = self.local.find(s, p, o).into_iter().collect();
        for import in &self.imports {
            seen.extend(import.find(s, p, o));
        }
        seen.into_iter().collect()
    }

    fn add(&mut self, triple: Triple) -> bool {
        if self.imports.iter().any(|g| g.contains(&triple)) {
            // Already visible; record locally without reporting a visible change.
            self.local.add(triple);
            return false;
        }
        self.local.add(triple)
    }

    fn delete(&mut self, triple: &Triple) -> bool {
        let removed = self.local.delete(triple);
        removed && !self.imports.iter().any(|g| g.contains(triple))
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.local.contains(triple) || self.imports.iter().any(|g| g.contains(triple))
    }

    fn is_local(&self, triple: &Triple) -> bool {
        self.local.contains(triple)
    }

    fn size(&self) -> usize {
        if self.imports.is_empty() {
            return self.local.size();
        }
        self.find(None, None, None).len()
    }

    fn fresh_blank(&mut self) -> Node {
        loop {
            let node = self.local.fresh_blank();
            if !self.mentions(&node) {
                return node;
            }
        }
    }

    fn prefixes(&self) -> &PrefixMapping {
        self.local.prefixes()
    }

    fn prefixes_mut(&mut self) -> &mut PrefixMapping {
        self.local.prefixes_mut()
    }
}

// =============================================================================
// TESTS
// =============================================================================
