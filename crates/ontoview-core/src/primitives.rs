//! # Innate Primitives
//!
//! Hardcoded constants for the ontology core.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Maximum number of blank-node cycles the recursion eliminator may break in
/// a single graph before the graph is rejected.
pub const MAX_RECURSION_BREAKS: usize = 10_000;

/// Sentinel IRI written in place of a cycle-closing blank node when the
/// recursion eliminator runs in replace mode.
pub const RECURSION_SENTINEL: &str = "urn:ontoview:error#Recursion";

/// Label prefix for blank nodes minted by the core.
pub const BLANK_PREFIX: &str = "ov";

/// Maximum length of an RDF list before it is treated as malformed.
///
/// Guards list walks against `rdf:rest` chains that never reach `rdf:nil`.
pub const MAX_LIST_LENGTH: usize = 100_000;
