//! RDF list reading.

use super::Malformed;
use crate::graph::GraphStore;
use crate::object::OntObject;
use crate::primitives::MAX_LIST_LENGTH;
use crate::vocab::{rdf, swrl};
use crate::{Node, Triple};
use std::collections::BTreeSet;

/// Walk an `rdf:first`/`rdf:rest` chain from `head`, preserving order.
///
/// Every cell must carry exactly one `rdf:first` and one `rdf:rest`. Typing
/// triples on cells (`rdf:List`, `swrl:AtomList`) are taken as witnesses.
pub(crate) fn read_list(
    graph: &dyn GraphStore,
    head: &Node,
) -> Result<OntObject<Vec<Node>>, Malformed> {
    let mut items = Vec::new();
    let mut triples = Vec::new();
    let mut seen = BTreeSet::new();
    let mut cell = head.clone();
    while !cell.is(rdf::NIL) {
        if cell.is_literal() {
            return Err(Malformed::new("literal in list position"));
        }
        if !seen.insert(cell.clone()) {
            return Err(Malformed::new(format!("cyclic list at {}", cell)));
        }
        if items.len() >= MAX_LIST_LENGTH {
            return Err(Malformed::new("list exceeds maximum length"));
        }
        let first = single(graph, &cell, rdf::FIRST)?;
        let rest = single(graph, &cell, rdf::REST)?;
        for ty in [rdf::LIST, swrl::ATOM_LIST] {
            if graph.has_type(&cell, ty) {
                triples.push(Triple::new(cell.clone(), Node::iri(rdf::TYPE), Node::iri(ty)));
            }
        }
        triples.push(Triple::new(cell.clone(), Node::iri(rdf::FIRST), first.clone()));
        triples.push(Triple::new(cell.clone(), Node::iri(rdf::REST), rest.clone()));
        items.push(first);
        cell = rest;
    }
    Ok(OntObject::new(items).with_triples(triples))
}

fn single(graph: &dyn GraphStore, cell: &Node, predicate: &str) -> Result<Node, Malformed> {
    graph.object(cell, predicate).ok_or_else(|| {
        Malformed::new(format!("list cell {} needs exactly one <{}>", cell, predicate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::object::Witnessed;

    fn cell(graph: &mut Graph, id: &str, first: &str, rest: Node) -> Node {
        let node = Node::blank(id);
        graph.add(Triple::new(node.clone(), Node::iri(rdf::FIRST), Node::iri(first)));
        graph.add(Triple::new(node.clone(), Node::iri(rdf::REST), rest));
        node
    }

    #[test]
    fn reads_in_order() {
        let mut graph = Graph::new();
        let tail = cell(&mut graph, "l2", "b", Node::iri(rdf::NIL));
        let head = cell(&mut graph, "l1", "a", tail);
        let list = read_list(&graph, &head).expect("list");
        assert_eq!(list.value(), &vec![Node::iri("a"), Node::iri("b")]);
        assert_eq!(list.triples().len(), 4);
    }

    #[test]
    fn empty_list_is_nil() {
        let graph = Graph::new();
        let list = read_list(&graph, &Node::iri(rdf::NIL)).expect("list");
        assert!(list.value().is_empty());
    }

    #[test]
    fn cycle_is_malformed() {
        let mut graph = Graph::new();
        let head = cell(&mut graph, "l1", "a", Node::blank("l1"));
        assert!(read_list(&graph, &head).is_err());
    }

    #[test]
    fn dangling_cell_is_malformed() {
        let mut graph = Graph::new();
        graph.add(Triple::new(Node::blank("l1"), Node::iri(rdf::FIRST), Node::iri("a")));
        assert!(read_list(&graph, &Node::blank("l1")).is_err());
    }
}
