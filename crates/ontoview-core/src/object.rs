//! # Ontology Objects
//!
//! `OntObject<X>` pairs a structured value with the triples that evidence it.
//!
//! An object exclusively owns its own witness triples. Sub-objects (operand
//! class expressions, data ranges, ...) are shared through `Arc` with the
//! cache entry that produced them and are only ever read.

use crate::Triple;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Anything that can report the triples it was decoded from.
pub trait Witnessed: fmt::Debug + Send + Sync {
    /// Triples owned directly by this object.
    fn own_triples(&self) -> &BTreeSet<Triple>;

    /// Own triples plus those of every sub-object, transitively.
    fn triples(&self) -> BTreeSet<Triple>;
}

/// A structured value plus its witness set.
///
/// Equality, ordering and hashing use the value only: two objects decoded
/// from different triples but with equal content are the same object.
#[derive(Clone)]
pub struct OntObject<X> {
    value: X,
    root: Option<Triple>,
    own: BTreeSet<Triple>,
    parts: Vec<Arc<dyn Witnessed>>,
}

impl<X> OntObject<X> {
    pub fn new(value: X) -> Self {
        Self {
            value,
            root: None,
            own: BTreeSet::new(),
            parts: Vec::new(),
        }
    }

    /// Record the root statement; it also becomes a witness.
    #[must_use]
    pub fn with_root(mut self, root: Triple) -> Self {
        self.own.insert(root.clone());
        self.root = Some(root);
        self
    }

    #[must_use]
    pub fn with_triples(mut self, triples: impl IntoIterator<Item = Triple>) -> Self {
        self.own.extend(triples);
        self
    }

    #[must_use]
    pub fn with_part(mut self, part: Arc<dyn Witnessed>) -> Self {
        self.parts.push(part);
        self
    }

    pub fn add_triple(&mut self, triple: Triple) {
        self.own.insert(triple);
    }

    pub fn add_part(&mut self, part: Arc<dyn Witnessed>) {
        self.parts.push(part);
    }

    pub fn value(&self) -> &X {
        &self.value
    }

    pub fn into_value(self) -> X {
        self.value
    }

    /// The statement this object was decoded from, if it has one.
    pub fn root(&self) -> Option<&Triple> {
        self.root.as_ref()
    }

    pub fn parts(&self) -> &[Arc<dyn Witnessed>] {
        &self.parts
    }

    /// Same witnesses, different value.
    pub fn map<Y>(self, f: impl FnOnce(X) -> Y) -> OntObject<Y> {
        OntObject {
            value: f(self.value),
            root: self.root,
            own: self.own,
            parts: self.parts,
        }
    }

    /// Take over the witnesses of `other` and hand back its value.
    pub fn absorb<Y>(&mut self, other: OntObject<Y>) -> Y {
        self.own.extend(other.own);
        self.parts.extend(other.parts);
        other.value
    }

    /// Union the witnesses of an equal object into this one.
    pub fn merge(&mut self, other: OntObject<X>) {
        if self.root.is_none() {
            self.root = other.root;
        }
        self.own.extend(other.own);
        self.parts.extend(other.parts);
    }
}

impl<X: fmt::Debug + Send + Sync> Witnessed for OntObject<X> {
    fn own_triples(&self) -> &BTreeSet<Triple> {
        &self.own
    }

    fn triples(&self) -> BTreeSet<Triple> {
        let mut all = self.own.clone();
        for part in &self.parts {
            all.extend(part.triples());
        }
        all
    }
}

impl<X: fmt::Debug> fmt::Debug for OntObject<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntObject")
            .field("value", &self.value)
            .field("root", &self.root)
            .field("own", &self.own.len())
            .field("parts", &self.parts.len())
            .finish()
    }
}

impl<X: PartialEq> PartialEq for OntObject<X> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<X: Eq> Eq for OntObject<X> {}

impl<X: std::hash::Hash> std::hash::Hash for OntObject<X> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
