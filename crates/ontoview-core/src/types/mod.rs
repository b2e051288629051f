//! # Core Type Definitions
//!
//! This module contains the graph-level types every other module builds on:
//! - Graph terms (`Node`, `Literal`)
//! - Statements (`Triple`)
//! - Error types (`OntError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Compare by content, never by identity

use crate::axiom::AxiomType;
use crate::personality::View;
use crate::vocab::xsd;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// LITERAL
// =============================================================================

/// An RDF literal: lexical form, datatype IRI and optional language tag.
///
/// Plain literals are stored with `xsd:string`; language-tagged literals keep
/// `rdf:langString` as their datatype.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The lexical form.
    pub lexical: String,
    /// The datatype IRI.
    pub datatype: String,
    /// Language tag, lower-cased.
    pub lang: Option<String>,
}

impl Literal {
    /// Create a plain `xsd:string` literal.
    #[must_use]
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: xsd::STRING.to_string(),
            lang: None,
        }
    }

    /// Create a typed literal.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: datatype.into(),
            lang: None,
        }
    }

    /// Create a language-tagged literal.
    #[must_use]
    pub fn lang(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: crate::vocab::rdf::LANG_STRING.to_string(),
            lang: Some(lang.into().to_ascii_lowercase()),
        }
    }

    /// Parse the lexical form as a non-negative integer (cardinality values).
    #[must_use]
    pub fn as_cardinality(&self) -> Option<u32> {
        self.lexical.trim().parse::<u32>().ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lang {
            Some(lang) => write!(f, "\"{}\"@{}", self.lexical, lang),
            None if self.datatype == xsd::STRING => write!(f, "\"{}\"", self.lexical),
            None => write!(f, "\"{}\"^^<{}>", self.lexical, self.datatype),
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A graph-local term: IRI, blank node or literal.
///
/// Nodes are never owned by the core beyond the triples that mention them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Node {
    /// A named resource.
    Iri(String),
    /// A blank node, identified by its graph-local label.
    Blank(String),
    /// A literal value.
    Literal(Literal),
}

impl Node {
    /// Create an IRI node.
    #[must_use]
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Create a blank node with the given label.
    #[must_use]
    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank(label.into())
    }

    /// Create a plain string literal node.
    #[must_use]
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal(Literal::plain(lexical))
    }

    /// Create a typed literal node.
    #[must_use]
    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal(Literal::typed(lexical, datatype))
    }

    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// The IRI string, if this is an IRI node.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The blank label, if this is a blank node.
    #[must_use]
    pub fn as_blank(&self) -> Option<&str> {
        match self {
            Self::Blank(label) => Some(label),
            _ => None,
        }
    }

    /// The literal, if this is a literal node.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Check whether this node is the IRI `iri`.
    #[must_use]
    pub fn is(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{}>", iri),
            Self::Blank(label) => write!(f, "_:{}", label),
            Self::Literal(lit) => lit.fmt(f),
        }
    }
}

impl From<Literal> for Node {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

// =============================================================================
// TRIPLE
// =============================================================================

/// A single RDF statement.
///
/// Field order matches the SPO index so the derived `Ord` is the natural
/// subject-predicate-object ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
}

impl Triple {
    /// Create a new triple.
    #[must_use]
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Check whether the predicate is the IRI `iri`.
    #[must_use]
    pub fn has_predicate(&self, iri: &str) -> bool {
        self.predicate.is(iri)
    }

    /// Check whether any position holds a blank node.
    #[must_use]
    pub fn has_blank(&self) -> bool {
        self.subject.is_blank() || self.object.is_blank()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the ontology core.
///
/// - "Does not fit" and "not found" are answered with `Option`/`bool`,
///   never with an error
/// - Every variant carries enough context to reproduce the decision
#[derive(Debug, Error)]
pub enum OntError {
    /// The node cannot be viewed as the requested view.
    #[error("Cannot convert {node} to {view:?}")]
    Conversion { node: Node, view: View },

    /// The operation is structurally impossible for the view or shape.
    #[error("Unsupported operation on {view:?}: {reason}")]
    Unsupported { view: View, reason: String },

    /// The axiom shape cannot encode the given value.
    #[error("Cannot encode {shape} axiom: {reason}")]
    UnsupportedAxiom { shape: AxiomType, reason: String },

    /// The operation would break a reachability invariant.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A single root statement could not be decoded.
    #[error("Cannot decode {triple}: {reason}")]
    Decode { triple: Triple, reason: String },

    /// The normalization cap was exceeded; the graph is rejected.
    #[error("Too many recursions: more than {limit} cycles broken")]
    TooManyRecursions { limit: usize },

    /// The configuration document is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OntError {
    /// Build a decode error for `triple`.
    pub fn decode(triple: &Triple, reason: impl Into<String>) -> Self {
        Self::Decode {
            triple: triple.clone(),
            reason: reason.into(),
        }
    }

    /// Conversion and decode failures are expected outcomes; the caller may
    /// skip the node or statement and continue.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Conversion { .. } | Self::Decode { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
