use std::cmp::Ordering;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use ordered_tree::{Matcher, OrderedTree, SlotMatcher};

fn cmp(a: &i32, b: &i32) -> Option<Ordering> {
    Some(a.cmp(b))
}

fn jsonify(v: &i32) -> Value {
    json!(v)
}

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by inserting values in an ascending manner. Since the tree never rebalances
/// this is a single chain `num_nodes` deep.
fn get_unbalanced_tree(num_levels: usize) -> OrderedTree<i32> {
    let tree_size = num_nodes_in_full_tree(num_levels) as i32;
    let mut tree = OrderedTree::new(0, cmp, jsonify).unwrap();
    for x in 1..tree_size {
        tree.insert(x).unwrap();
    }

    tree
}

/// Builds a tree by inserting values in a balanced manner. This adds elements so that the
/// resultant tree has `num_levels` of nodes, all full.
fn get_balanced_tree(num_levels: usize) -> OrderedTree<i32> {
    let xs = (0..num_nodes_in_full_tree(num_levels) as i32).collect::<Vec<_>>();
    let mid = xs.len() / 2;
    let mut tree = OrderedTree::new(xs[mid], cmp, jsonify).unwrap();
    fill_balanced_tree(&mut tree, &xs[..mid]);
    fill_balanced_tree(&mut tree, &xs[mid + 1..]);
    tree
}

/// Recursive helper for [`get_balanced_tree`].
fn fill_balanced_tree(tree: &mut OrderedTree<i32>, xs: &[i32]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        tree.insert(xs[mid]).unwrap();
        fill_balanced_tree(tree, &xs[..mid]);
        fill_balanced_tree(tree, &xs[mid + 1..]);
    }
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// shapes of trees before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut OrderedTree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    // Chains get deep quickly and every operation recurses, so stay well clear of the stack limit.
    for num_levels in [3, 7, 11] {
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) as i32 - 1;
        let shapes: [(&str, fn(usize) -> OrderedTree<i32>); 2] = [
            ("unbalanced", get_unbalanced_tree),
            ("balanced", get_balanced_tree),
        ];
        for (name, build) in shapes {
            let id = BenchmarkId::new(name, largest_element_in_tree);
            let mut tree = build(num_levels);

            group.bench_function(id, |b| {
                b.iter(|| f(&mut tree, black_box(largest_element_in_tree)))
            });
        }
    }

    group.finish();
}

/// All operations are run against balanced and unbalanced trees of various sizes and cover
/// hits and misses.
pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(Matcher::Value(&i)));
    });
    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(Matcher::Value(&(i + 1))));
    });
    bench_helper(c, "find-predicate", |tree, i| {
        let _value = black_box(tree.find(Matcher::Predicate(&|x: &i32| *x >= i)));
    });

    // Replacing an existing value leaves the shape alone so the tree can be reused.
    bench_helper(c, "insert-replace", |tree, i| {
        let _displaced = black_box(tree.insert(i).unwrap());
    });
    bench_helper(c, "remove-miss", |tree, i| {
        let _removed = black_box(tree.remove(SlotMatcher::Value(&(i + 1))));
    });
    bench_helper(c, "is-equal", |tree, _| {
        let _equal = black_box(tree.is_equal(&*tree));
    });

    bench_helper(c, "to-record", |tree, _| {
        let _record = black_box(tree.to_record());
    });
    bench_helper(c, "parse", |tree, _| {
        let record = tree.to_record();
        let _parsed = black_box(OrderedTree::parse(&record, cmp, jsonify).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
