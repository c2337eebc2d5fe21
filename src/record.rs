//! Reading and writing trees as nested records: JSON objects with a left, middle, and right
//! field, where the middle field holds the value and the other two hold child records.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, RecordKeys};
//! use serde_json::json;
//!
//! let cmp = |a: &i64, b: &i64| Some(a.cmp(b));
//! let tree = OrderedTree::parse(&json!({ "l": { "m": 2 }, "m": 1 }), cmp, |v: &i64| json!(v))?;
//! assert_eq!(tree.left().value(), Some(&2));
//!
//! // Field names can follow an existing schema.
//! let keys = RecordKeys::new("lo", "val", "hi");
//! assert_eq!(tree.to_record_with_keys(&keys), json!({ "lo": { "val": 2 }, "val": 1 }));
//! # Ok::<(), ordered_tree::TreeError>(())
//! ```

use std::cmp::Ordering;
use std::rc::Rc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TreeError};
use crate::tree::{OrderedTree, Shared, Subtree};
use crate::util::format_path;

/// Field names used for the three parts of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordKeys {
    /// Field holding the left child record. Defaults to `"l"`.
    pub left: String,
    /// Field holding the node's value. Defaults to `"m"`.
    pub middle: String,
    /// Field holding the right child record. Defaults to `"r"`.
    pub right: String,
}

impl Default for RecordKeys {
    fn default() -> Self {
        Self::new("l", "m", "r")
    }
}

impl RecordKeys {
    /// Uses the given names for the left, middle, and right fields.
    pub fn new(left: impl Into<String>, middle: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            middle: middle.into(),
            right: right.into(),
        }
    }
}

impl<T> OrderedTree<T>
where
    T: DeserializeOwned,
{
    /// Builds a tree from a nested record using the default `l`/`m`/`r` field names. See
    /// [`parse_with_keys`][Self::parse_with_keys].
    pub fn parse<C, J>(record: &Value, cmp: C, jsonify: J) -> Result<Self>
    where
        C: Fn(&T, &T) -> Option<Ordering> + 'static,
        J: Fn(&T) -> Value + 'static,
    {
        Self::parse_with_keys(record, cmp, jsonify, &RecordKeys::default())
    }

    /// Builds a tree whose shape is exactly the shape of `record`. A missing or `null` left or
    /// right field is a [`Leaf`][Subtree::Leaf]; anything else there is parsed as a child
    /// record. Every node shares `cmp` and `jsonify`.
    ///
    /// The ordering between levels is not checked, so a record that is out of order produces a
    /// tree that is out of order.
    ///
    /// Fails with [`TreeError::MissingValue`] if any record's middle field is missing or `null`,
    /// [`TreeError::Decode`] if a middle value isn't a `T`, and
    /// [`TreeError::InvalidComparator`] if a value isn't equal to itself under `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    /// use serde_json::json;
    ///
    /// let cmp = |a: &i64, b: &i64| Some(a.cmp(b));
    /// let record = json!({ "m": 3, "r": { "l": {} , "m": 4 } });
    ///
    /// match OrderedTree::parse(&record, cmp, |v: &i64| json!(v)) {
    ///     Err(TreeError::MissingValue { path }) => assert_eq!(path, "r, l, m"),
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// ```
    pub fn parse_with_keys<C, J>(record: &Value, cmp: C, jsonify: J, keys: &RecordKeys) -> Result<Self>
    where
        C: Fn(&T, &T) -> Option<Ordering> + 'static,
        J: Fn(&T) -> Value + 'static,
    {
        debug!("parsing tree record with keys {:?}", keys);
        parse_node(record, &Shared::new(cmp, jsonify), keys, &[])
    }
}

/// Materializes one record, and recursively its children, into a node sharing `shared`. `path`
/// is the list of keys walked to reach `record`.
fn parse_node<T>(
    record: &Value,
    shared: &Rc<Shared<T>>,
    keys: &RecordKeys,
    path: &[&str],
) -> Result<OrderedTree<T>>
where
    T: DeserializeOwned,
{
    let middle_path = || format_path(&extend_path(path, &keys.middle));

    let middle = match field(record, &keys.middle) {
        Some(middle) => middle,
        None => {
            let path = middle_path();
            warn!("record at [{}] has no middle value", path);
            return Err(TreeError::MissingValue { path });
        }
    };
    let value = T::deserialize(middle).map_err(|source| TreeError::Decode {
        path: middle_path(),
        source,
    })?;

    let mut node = OrderedTree::with_shared(value, Rc::clone(shared))?;
    node.left = parse_child(record, shared, keys, path, &keys.left)?;
    node.right = parse_child(record, shared, keys, path, &keys.right)?;
    Ok(node)
}

fn parse_child<T>(
    record: &Value,
    shared: &Rc<Shared<T>>,
    keys: &RecordKeys,
    path: &[&str],
    key: &str,
) -> Result<Subtree<T>>
where
    T: DeserializeOwned,
{
    match field(record, key) {
        None => Ok(Subtree::Leaf),
        Some(child) => {
            let child_path = extend_path(path, key);
            let node = parse_node(child, shared, keys, &child_path)?;
            Ok(Subtree::Node(Box::new(node)))
        }
    }
}

fn extend_path<'a>(path: &[&'a str], key: &'a str) -> Vec<&'a str> {
    let mut path = path.to_vec();
    path.push(key);
    path
}

/// A field that is present and not `null`. Anything that isn't an object has no fields.
fn field<'v>(record: &'v Value, key: &str) -> Option<&'v Value> {
    record.get(key).filter(|v| !v.is_null())
}

impl<T> OrderedTree<T> {
    /// Writes the tree out as a nested record using the default `l`/`m`/`r` field names. See
    /// [`to_record_with_keys`][Self::to_record_with_keys].
    pub fn to_record(&self) -> Value {
        self.to_record_with_keys(&RecordKeys::default())
    }

    /// Writes the tree out in the shape [`parse_with_keys`][Self::parse_with_keys] reads. The
    /// middle field holds `jsonify(value)` and empty children are left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    /// use serde_json::json;
    ///
    /// let cmp = |a: &i64, b: &i64| Some(a.cmp(b));
    /// let mut tree = OrderedTree::new(3, cmp, |v: &i64| json!(v))?;
    /// tree.insert(5)?;
    /// tree.insert(1)?;
    ///
    /// let record = tree.to_record();
    /// assert_eq!(record, json!({ "l": { "m": 5 }, "m": 3, "r": { "m": 1 } }));
    ///
    /// let parsed = OrderedTree::parse(&record, cmp, |v: &i64| json!(v))?;
    /// assert!(parsed.is_equal(&tree));
    /// # Ok::<(), ordered_tree::TreeError>(())
    /// ```
    pub fn to_record_with_keys(&self, keys: &RecordKeys) -> Value {
        let mut record = Map::new();
        if let Some(left) = self.left.node() {
            record.insert(keys.left.clone(), left.to_record_with_keys(keys));
        }
        record.insert(keys.middle.clone(), (self.shared.jsonify)(&self.value));
        if let Some(right) = self.right.node() {
            record.insert(keys.right.clone(), right.to_record_with_keys(keys));
        }

        Value::Object(record)
    }
}
