//! # Normalization
//!
//! Graph-rewriting passes run once before any cache is populated.
//!
//! Each pass reads through a `QueryView` and writes through a `WriteView`
//! over the same store. Query results are owned snapshots, so a pass can
//! iterate them while it mutates. The write view only forwards edits that
//! change the graph and counts them.
//!
//! Triples a pass cannot resolve are handed back to the caller, never
//! dropped silently.

mod declarations;
mod recursion;

pub use declarations::DeclarationTransform;
pub use recursion::{RecursionEliminator, RecursionMode};

use crate::graph::GraphStore;
use crate::personality::Personality;
use crate::{Node, OntError, Triple};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

// =============================================================================
// VIEWS
// =============================================================================

/// Read-only access to the graph under normalization.
#[derive(Clone, Copy)]
pub struct QueryView<'a> {
    graph: &'a dyn GraphStore,
}

impl<'a> QueryView<'a> {
    pub fn new(graph: &'a dyn GraphStore) -> Self {
        Self { graph }
    }

    pub fn find(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> Vec<Triple> {
        self.graph.find(s, p, o)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.graph.contains(triple)
    }

    pub fn graph(&self) -> &'a dyn GraphStore {
        self.graph
    }
}

impl fmt::Debug for QueryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryView")
            .field("size", &self.graph.size())
            .finish()
    }
}

/// Mutating access that skips edits which would not change the graph.
pub struct WriteView<'a> {
    graph: &'a mut dyn GraphStore,
    added: usize,
    deleted: usize,
}

impl<'a> WriteView<'a> {
    pub fn new(graph: &'a mut dyn GraphStore) -> Self {
        Self {
            graph,
            added: 0,
            deleted: 0,
        }
    }

    /// Snapshot queries against the current state.
    pub fn query(&self) -> QueryView<'_> {
        QueryView::new(&*self.graph)
    }

    pub fn add(&mut self, triple: Triple) -> bool {
        if self.graph.contains(&triple) {
            return false;
        }
        let added = self.graph.add(triple);
        if added {
            self.added += 1;
        }
        added
    }

    pub fn delete(&mut self, triple: &Triple) -> bool {
        if !self.graph.contains(triple) {
            return false;
        }
        let deleted = self.graph.delete(triple);
        if deleted {
            self.deleted += 1;
        }
        deleted
    }

    /// Edits forwarded to the graph so far.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.added + self.deleted
    }
}

impl fmt::Debug for WriteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteView")
            .field("added", &self.added)
            .field("deleted", &self.deleted)
            .finish()
    }
}

// =============================================================================
// TRANSFORM TRAIT
// =============================================================================

/// One normalization pass.
pub trait Transform: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap check whether `run` has anything to do.
    fn applicable(&self, graph: &QueryView<'_>) -> bool;

    /// Rewrite the graph. Returns the triples the pass could not resolve.
    fn run(&self, graph: &mut WriteView<'_>) -> Result<BTreeSet<Triple>, OntError>;
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Outcome of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub name: &'static str,
    /// `false` when the pass found nothing to do and was skipped.
    pub applied: bool,
    pub changes: usize,
    pub unhandled: BTreeSet<Triple>,
}

/// Outcome of a whole pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub passes: Vec<PassReport>,
}

impl TransformReport {
    /// Total edits across passes.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.passes.iter().map(|p| p.changes).sum()
    }

    /// Union of every pass's unresolved triples.
    #[must_use]
    pub fn unhandled(&self) -> BTreeSet<Triple> {
        self.passes
            .iter()
            .flat_map(|p| p.unhandled.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.passes.iter().all(|p| p.unhandled.is_empty())
    }
}

/// Ordered list of passes.
pub struct Transforms {
    passes: Vec<Box<dyn Transform>>,
}

impl Transforms {
    #[must_use]
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Cycle breaking first, then declaration repair.
    #[must_use]
    pub fn standard(personality: &Personality) -> Self {
        Self::empty()
            .with(RecursionEliminator::default())
            .with(DeclarationTransform::new(personality))
    }

    #[must_use]
    pub fn with(mut self, pass: impl Transform + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|p| p.name())
    }

    /// Run every applicable pass in order. The first failing pass aborts
    /// the pipeline.
    pub fn run(&self, graph: &mut dyn GraphStore) -> Result<TransformReport, OntError> {
        let mut report = TransformReport::default();
        for pass in &self.passes {
            if !pass.applicable(&QueryView::new(&*graph)) {
                debug!(pass = pass.name(), "pass not applicable");
                report.passes.push(PassReport {
                    name: pass.name(),
                    applied: false,
                    changes: 0,
                    unhandled: BTreeSet::new(),
                });
                continue;
            }
            let mut view = WriteView::new(&mut *graph);
            let unhandled = pass.run(&mut view)?;
            debug!(
                pass = pass.name(),
                changes = view.changes(),
                unhandled = unhandled.len(),
                "pass finished"
            );
            report.passes.push(PassReport {
                name: pass.name(),
                applied: true,
                changes: view.changes(),
                unhandled,
            });
        }
        Ok(report)
    }
}

impl fmt::Debug for Transforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(Node::iri(s), Node::iri(p), Node::iri(o))
    }

    #[test]
    fn write_view_counts_real_changes_only() {
        let mut graph = Graph::new();
        graph.add(t("a", "p", "b"));
        let mut view = WriteView::new(&mut graph);
        assert!(!view.add(t("a", "p", "b")));
        assert!(view.add(t("a", "p", "c")));
        assert!(!view.delete(&t("x", "p", "y")));
        assert!(view.delete(&t("a", "p", "b")));
        assert_eq!(view.changes(), 2);
        assert_eq!(view.query().find(None, None, None), vec![t("a", "p", "c")]);
    }

    #[test]
    fn query_snapshot_survives_mutation() {
        let mut graph = Graph::new();
        graph.add(t("a", "p", "b"));
        graph.add(t("a", "p", "c"));
        let mut view = WriteView::new(&mut graph);
        let snapshot = view.query().find(Some(&Node::iri("a")), None, None);
        for triple in &snapshot {
            view.delete(triple);
        }
        assert_eq!(view.changes(), 2);
        assert_eq!(graph.size(), 0);
    }

    #[test]
    fn standard_pipeline_order() {
        let transforms = Transforms::standard(&Personality::default());
        assert_eq!(
            transforms.names().collect::<Vec<_>>(),
            vec!["recursion", "declarations"]
        );
    }

    #[test]
    fn empty_graph_skips_every_pass() {
        let mut graph = Graph::new();
        let report = Transforms::standard(&Personality::default())
            .run(&mut graph)
            .expect("run");
        assert!(report.passes.iter().all(|p| !p.applied));
        assert_eq!(report.changes(), 0);
        assert!(report.is_clean());
    }
}
