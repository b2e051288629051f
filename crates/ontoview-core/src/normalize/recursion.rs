//! Blank-node cycle breaking.
//!
//! Blank nodes are meant to form trees: a class expression, a list, a
//! reification. A chain `_:x ... _:y ... _:x` makes every recursive reader
//! loop, so the pass finds each cycle-closing triple with an iterative
//! depth-first walk over blank-to-blank edges and removes it (or points it
//! at a sentinel IRI).
//!
//! The walk keeps its own stack, so cycle length never touches the call
//! stack. Removing the back edges of one depth-first walk leaves the blank
//! subgraph acyclic, so a second run finds nothing.

use super::{QueryView, Transform, WriteView};
use crate::primitives::{MAX_RECURSION_BREAKS, RECURSION_SENTINEL};
use crate::{Node, OntError, Triple};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// What to do with a cycle-closing triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecursionMode {
    /// Drop it.
    #[default]
    Delete,
    /// Keep the subject and predicate, replace the object with the sentinel.
    Replace,
}

/// Breaks blank-node cycles, up to a hard cap per graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionEliminator {
    mode: RecursionMode,
    limit: usize,
}

impl Default for RecursionEliminator {
    fn default() -> Self {
        Self::new(RecursionMode::default())
    }
}

impl RecursionEliminator {
    #[must_use]
    pub fn new(mode: RecursionMode) -> Self {
        Self {
            mode,
            limit: MAX_RECURSION_BREAKS,
        }
    }

    /// Lower the cap. Mostly useful in tests.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn mode(&self) -> RecursionMode {
        self.mode
    }

    /// Cycle-closing triples, in walk order. Read-only.
    pub fn find_cycles(&self, graph: &QueryView<'_>) -> Vec<Triple> {
        back_edges(graph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Done,
}

fn blank_subjects(graph: &QueryView<'_>) -> BTreeSet<Node> {
    graph
        .find(None, None, None)
        .into_iter()
        .filter(|t| t.subject.is_blank() && t.object.is_blank())
        .map(|t| t.subject)
        .collect()
}

fn blank_edges(graph: &QueryView<'_>, node: &Node) -> Vec<Triple> {
    graph
        .find(Some(node), None, None)
        .into_iter()
        .filter(|t| t.object.is_blank())
        .collect()
}

fn back_edges(graph: &QueryView<'_>) -> Vec<Triple> {
    let mut marks: BTreeMap<Node, Mark> = BTreeMap::new();
    let mut closing = Vec::new();
    for start in blank_subjects(graph) {
        if marks.contains_key(&start) {
            continue;
        }
        marks.insert(start.clone(), Mark::Open);
        let edges = blank_edges(graph, &start).into_iter();
        let mut stack = vec![(start, edges)];
        while let Some((_, edges)) = stack.last_mut() {
            let Some(edge) = edges.next() else {
                if let Some((node, _)) = stack.pop() {
                    marks.insert(node, Mark::Done);
                }
                continue;
            };
            match marks.get(&edge.object) {
                Some(Mark::Open) => closing.push(edge),
                Some(Mark::Done) => {}
                None => {
                    let next = edge.object;
                    marks.insert(next.clone(), Mark::Open);
                    let edges = blank_edges(graph, &next).into_iter();
                    stack.push((next, edges));
                }
            }
        }
    }
    closing
}

impl Transform for RecursionEliminator {
    fn name(&self) -> &'static str {
        "recursion"
    }

    fn applicable(&self, graph: &QueryView<'_>) -> bool {
        !blank_subjects(graph).is_empty()
    }

    /// Fails without touching the graph when more than `limit` cycles
    /// would have to be broken.
    fn run(&self, graph: &mut WriteView<'_>) -> Result<BTreeSet<Triple>, OntError> {
        let closing = back_edges(&graph.query());
        if closing.len() > self.limit {
            return Err(OntError::TooManyRecursions { limit: self.limit });
        }
        let mut broken = BTreeSet::new();
        for triple in closing {
            warn!(statement = %triple, mode = ?self.mode, "breaking blank-node cycle");
            graph.delete(&triple);
            if self.mode == RecursionMode::Replace {
                graph.add(Triple::new(
                    triple.subject.clone(),
                    triple.predicate.clone(),
                    Node::iri(RECURSION_SENTINEL),
                ));
            }
            broken.insert(triple);
        }
        Ok(broken)
    }
}
