//! This crate exposes a small, unbalanced Binary Search Tree (BST) whose ordering comes from a
//! caller-supplied comparator instead of [`Ord`].
//!
//! ## Binary Search Tree
//!
//! Every [`OrderedTree`] is a single node: a value and two children, each of which is either a
//! [`Leaf`][Subtree::Leaf] or another node. All nodes of one tree share the root's comparator and
//! its `jsonify` function. `insert` places a value by walking down with
//! `cmp(node_value, new_value)`:
//!
//! 1. `Less` descends into the left child.
//! 2. `Greater` descends into the right child.
//! 3. `Equal` swaps the new value in and hands back the one it displaced.
//!
//! > Note that the tree never rebalances. Its shape is decided entirely by insertion order, or
//! > by the literal shape of a record handed to [`OrderedTree::parse`].
//!
//! Lookups with [`OrderedTree::find`] are exhaustive pre-order searches and removals with
//! [`OrderedTree::remove`] only look at the two immediate children.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Matcher, OrderedTree};
//! use serde_json::json;
//!
//! let mut tree = OrderedTree::new(3, |a: &i32, b: &i32| Some(a.cmp(b)), |v: &i32| json!(v))?;
//! tree.insert(5)?;
//! tree.insert(1)?;
//!
//! assert_eq!(tree.find(Matcher::Value(&5)), Some(&5));
//! assert_eq!(tree.find(Matcher::Predicate(&|v: &i32| *v > 4)), Some(&5));
//! # Ok::<(), ordered_tree::TreeError>(())
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod record;
pub mod tree;
mod util;


pub use error::{Result, TreeError};
pub use record::RecordKeys;
pub use tree::{Matcher, OrderedTree, SlotMatcher, Subtree};
pub use util::three_way;
