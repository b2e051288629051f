//! # Model Benchmarks
//!
//! View resolution, full axiom reads and normalization over growing graphs.
//!
//! Run with: `cargo bench -p ontoview-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ontoview_core::vocab::rdf;
use ontoview_core::{
    Axiom, AxiomBody, AxiomType, ClassExpression, Graph, GraphStore, InternalModel, ModelConfig,
    Node, ObjectPropertyExpression, Personality, Transforms, Triple, View,
};
use std::hint::black_box;

fn class(i: usize) -> ClassExpression {
    ClassExpression::class(format!("http://example.org/C{}", i))
}

/// `C(i) SubClassOf p some C(i+1)` for every i, written through a model.
fn create_ontology(size: usize) -> Graph {
    let mut model = InternalModel::new(Graph::new(), ModelConfig::default());
    for i in 0..size {
        let sup = ClassExpression::ObjectSomeValuesFrom(
            ObjectPropertyExpression::named("http://example.org/p"),
            Box::new(class(i + 1)),
        );
        let _ = model.add(Axiom::new(AxiomBody::SubClassOf { sub: class(i), sup }));
    }
    model.into_graph()
}

/// One rdf:rest ring of blank nodes per ten nodes.
fn create_rings(size: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..size {
        let ring = i / 10;
        let next = ring * 10 + (i + 1) % 10;
        graph.add(Triple::new(
            Node::blank(format!("r{}", i)),
            Node::iri(rdf::REST),
            Node::blank(format!("r{}", next)),
        ));
    }
    graph
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_view_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_fit");
    let personality = Personality::default();

    for size in [100, 1000].iter() {
        let graph = create_ontology(*size);
        let subjects: Vec<Node> = graph.triples().map(|t| t.subject).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &subjects, |b, subjects| {
            b.iter(|| {
                let fits = subjects
                    .iter()
                    .filter(|node| personality.test(node, View::ClassExpression, &graph))
                    .count();
                black_box(fits)
            });
        });
    }

    group.finish();
}

fn bench_full_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_read");

    for size in [100, 1000].iter() {
        let graph = create_ontology(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut model = InternalModel::new(graph.clone(), ModelConfig::default());
                let read = model.axioms(AxiomType::SubClassOf).map(|a| a.len());
                black_box(read)
            });
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let transforms = Transforms::standard(&Personality::default());

    for size in [100, 1000, 10000].iter() {
        let graph = create_rings(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                let report = transforms.run(&mut graph).map(|r| r.changes());
                black_box(report)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_view_fit, bench_full_read, bench_normalize);
criterion_main!(benches);
