use std::cmp::Ordering;
use std::collections::HashSet;

use ordered_tree::{Matcher, OrderedTree, SlotMatcher, Subtree};
use serde_json::{json, Value};

fn cmp(a: &i8, b: &i8) -> Option<Ordering> {
    Some(a.cmp(b))
}

fn jsonify(v: &i8) -> Value {
    json!(v)
}

fn build(root: i8, xs: &[i8]) -> OrderedTree<i8> {
    let mut tree = OrderedTree::new(root, cmp, jsonify).unwrap();
    for x in xs {
        tree.insert(*x).unwrap();
    }
    tree
}

/// Checks, at every node, that the left child orders `Less` and the right child `Greater` than
/// its parent under `cmp(parent, child)`.
fn children_ordered(tree: &OrderedTree<i8>) -> bool {
    let ok = |slot: &Subtree<i8>, want: Ordering| match slot.node() {
        None => true,
        Some(child) => cmp(tree.value(), child.value()) == Some(want) && children_ordered(child),
    };
    ok(tree.left(), Ordering::Less) && ok(tree.right(), Ordering::Greater)
}

#[quickcheck]
fn contains(root: i8, xs: Vec<i8>) -> bool {
    let tree = build(root, &xs);

    xs.iter().all(|x| tree.find(Matcher::Value(x)) == Some(x))
}

#[quickcheck]
fn contains_not(root: i8, xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = build(root, &xs);
    let mut added: HashSet<_> = xs.into_iter().collect();
    added.insert(root);
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(Matcher::Value(x)).is_none())
}

#[quickcheck]
fn node_count_tracks_distinct_values(root: i8, xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new(root, cmp, jsonify).unwrap();
    let mut seen = HashSet::new();
    seen.insert(root);

    xs.iter().all(|x| {
        let before = tree.len();
        let displaced = tree.insert(*x).unwrap();
        let is_new = seen.insert(*x);
        if is_new {
            displaced.is_none() && tree.len() == before + 1
        } else {
            displaced == Some(*x) && tree.len() == before
        }
    })
}

#[quickcheck]
fn insert_keeps_children_ordered(root: i8, xs: Vec<i8>) -> bool {
    children_ordered(&build(root, &xs))
}

#[quickcheck]
fn is_equal_is_reflexive(root: i8, xs: Vec<i8>) -> bool {
    let a = build(root, &xs);
    let b = build(root, &xs);

    a.is_equal(&a) && a.is_equal(&b) && b.is_equal(&a)
}

#[quickcheck]
fn record_round_trip(root: i8, xs: Vec<i8>) -> bool {
    let tree = build(root, &xs);
    let parsed = OrderedTree::parse(&tree.to_record(), cmp, jsonify).unwrap();

    parsed.is_equal(&tree) && parsed.len() == tree.len()
}

#[quickcheck]
fn remove_detaches_whole_subtree(root: i8, xs: Vec<i8>) -> bool {
    let mut tree = build(root, &xs);
    let before = tree.len();
    let right_len = tree.right().len();
    let had_left = !tree.left().is_leaf();

    let detached = tree.remove(SlotMatcher::Predicate(&|slot: &Subtree<i8>| !slot.is_leaf()));
    let total = tree.len() + detached.len();

    // The right child only goes when there is no left child.
    total == before && (!had_left || tree.right().len() == right_len)
}
