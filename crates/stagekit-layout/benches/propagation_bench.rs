//! Benchmarks for alignment propagation and resize re-resolution.
//!
//! Run with: cargo bench -p stagekit-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stagekit_core::reactive::Observable;
use stagekit_layout::{Coordinate, Extent, LayoutNode};
use std::hint::black_box;

/// Build a chain of `n` nodes, each left-aligned to the previous one's right.
fn make_chain(n: usize) -> Vec<LayoutNode> {
    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(n);
    for i in 0..n {
        let node = LayoutNode::with_size(Coordinate::Absolute(20), Coordinate::Absolute(10))
            .expect("static size");
        if let Some(prev) = nodes.last() {
            node.align_left_to_right(prev, 2).expect("chain is acyclic");
        } else {
            node.move_to(Coordinate::Absolute(i as i32), Coordinate::Absolute(0));
        }
        nodes.push(node);
    }
    nodes
}

fn bench_chain_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/chain_move");

    for n in [2, 10, 50, 200] {
        let chain = make_chain(n);
        group.bench_with_input(BenchmarkId::new("move_head", n), &chain, |b, chain| {
            let mut x = 0;
            b.iter(|| {
                x += 1;
                chain[0].set_center_x(Coordinate::Absolute(x));
                black_box(chain[chain.len() - 1].center_x())
            })
        });
    }

    group.finish();
}

fn bench_resize_fractional(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/resize_fractional");
    let width = Observable::new(800);
    let height = Observable::new(600);

    for n in [10, 100, 1000] {
        let nodes: Vec<LayoutNode> = (0..n)
            .map(|i| {
                let node = LayoutNode::new();
                node.set_width(Coordinate::Fraction(0.1)).expect("size");
                node.set_height(Coordinate::Fraction(0.05)).expect("size");
                node.move_to(
                    Coordinate::Fraction((i % 10) as f64 / 10.0),
                    Coordinate::Fraction((i / 10 % 20) as f64 / 20.0),
                );
                node.attach(Extent::new(&width, &height));
                node
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("resolve", n), &nodes, |b, nodes| {
            let mut w = 800;
            b.iter(|| {
                w = if w == 800 { 1024 } else { 800 };
                width.set(w);
                for node in nodes {
                    node.resolve_relative_coordinates();
                }
                for node in nodes {
                    node.resolve_relative_alignment();
                }
                black_box(nodes[0].width())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chain_move, bench_resize_fractional);

criterion_main!(benches);
