//! The tree itself. Each [`OrderedTree`] is one node owning its two [`Subtree`]s, so any node
//! (including one detached by [`OrderedTree::remove`]) is a complete tree in its own right.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Matcher, OrderedTree, SlotMatcher};
//! use serde_json::json;
//!
//! let mut tree = OrderedTree::new(10, |a: &i32, b: &i32| Some(a.cmp(b)), |v: &i32| json!(v))?;
//!
//! // `cmp(10, 20)` is `Less`, so 20 becomes the left child.
//! assert_eq!(tree.insert(20)?, None);
//! assert_eq!(tree.insert(5)?, None);
//! assert_eq!(tree.left().value(), Some(&20));
//! assert_eq!(tree.right().value(), Some(&5));
//!
//! // Inserting an equal value hands back the one it replaced.
//! assert_eq!(tree.insert(20)?, Some(20));
//!
//! // Removal only looks at immediate children.
//! let detached = tree.remove(SlotMatcher::Value(&5));
//! assert_eq!(detached.value(), Some(&5));
//! assert_eq!(tree.find(Matcher::Value(&5)), None);
//! # Ok::<(), ordered_tree::TreeError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::rc::Rc;

use log::trace;
use serde_json::Value;

use crate::error::{Result, TreeError};

/// Three-way comparator shared by every node of a tree. `None` means the two values could not be
/// ordered.
pub type Comparator<T> = dyn Fn(&T, &T) -> Option<Ordering>;

/// Turns a stored value into JSON when the tree is written back out as a record.
pub type Jsonify<T> = dyn Fn(&T) -> Value;

/// The comparator and `jsonify` pair of one tree. Every node holds a handle to the same instance.
pub(crate) struct Shared<T> {
    pub(crate) cmp: Box<Comparator<T>>,
    pub(crate) jsonify: Box<Jsonify<T>>,
}

impl<T> Shared<T> {
    pub(crate) fn new<C, J>(cmp: C, jsonify: J) -> Rc<Self>
    where
        C: Fn(&T, &T) -> Option<Ordering> + 'static,
        J: Fn(&T) -> Value + 'static,
    {
        Rc::new(Self {
            cmp: Box::new(cmp),
            jsonify: Box::new(jsonify),
        })
    }
}

/// One node of a Binary Search Tree ordered by a caller-supplied comparator.
pub struct OrderedTree<T> {
    pub(crate) value: T,
    pub(crate) left: Subtree<T>,
    pub(crate) right: Subtree<T>,
    pub(crate) shared: Rc<Shared<T>>,
}

/// A child slot of a node: either empty or an owned child tree.
pub enum Subtree<T> {
    /// A marker for the empty slot at the bottom of a tree.
    Leaf,
    /// An owned child node along with everything below it.
    Node(Box<OrderedTree<T>>),
}

/// Selects a stored value for [`OrderedTree::find`].
pub enum Matcher<'a, T> {
    /// Matches a value equal (by [`PartialEq`], not the comparator) to this one.
    Value(&'a T),
    /// Matches any value the predicate accepts.
    Predicate(&'a dyn Fn(&T) -> bool),
}

/// Selects a child slot for [`OrderedTree::remove`].
pub enum SlotMatcher<'a, T> {
    /// Matches a child node whose value is equal (by [`PartialEq`]) to this one. A
    /// [`Leaf`][Subtree::Leaf] never matches.
    Value(&'a T),
    /// Matches any slot the predicate accepts, [`Leaf`][Subtree::Leaf]s included.
    Predicate(&'a dyn Fn(&Subtree<T>) -> bool),
}

impl<T> Clone for Matcher<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Matcher<'_, T> {}

impl<T> OrderedTree<T> {
    /// Creates a single-node tree holding `value`. `cmp` and `jsonify` are shared by every node
    /// that is later inserted below this one.
    ///
    /// Fails with [`TreeError::InvalidComparator`] unless `cmp(value, value)` is `Equal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    /// use serde_json::json;
    ///
    /// let tree = OrderedTree::new(1.5, f64::partial_cmp, |v: &f64| json!(v))?;
    /// assert_eq!(tree.value(), &1.5);
    ///
    /// // NaN is not equal to itself, so it can't be ordered.
    /// let nan = OrderedTree::new(f64::NAN, f64::partial_cmp, |v: &f64| json!(v));
    /// assert!(matches!(nan, Err(TreeError::InvalidComparator)));
    /// # Ok::<(), TreeError>(())
    /// ```
    ///
    /// A tree is not a comparator:
    ///
    /// ```compile_fail
    /// use ordered_tree::OrderedTree;
    /// use serde_json::json;
    ///
    /// let other = OrderedTree::new(1, |a: &i32, b: &i32| Some(a.cmp(b)), |v: &i32| json!(v)).unwrap();
    /// let _ = OrderedTree::new(1, other, |v: &i32| json!(v));
    /// ```
    pub fn new<C, J>(value: T, cmp: C, jsonify: J) -> Result<Self>
    where
        C: Fn(&T, &T) -> Option<Ordering> + 'static,
        J: Fn(&T) -> Value + 'static,
    {
        Self::with_shared(value, Shared::new(cmp, jsonify))
    }

    /// Construct a node for `value` that joins the tree owning `shared`.
    pub(crate) fn with_shared(value: T, shared: Rc<Shared<T>>) -> Result<Self> {
        if (shared.cmp)(&value, &value) != Some(Ordering::Equal) {
            return Err(TreeError::InvalidComparator);
        }

        Ok(Self {
            value,
            left: Subtree::Leaf,
            right: Subtree::Leaf,
            shared,
        })
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The left child slot.
    pub fn left(&self) -> &Subtree<T> {
        &self.left
    }

    /// The right child slot.
    pub fn right(&self) -> &Subtree<T> {
        &self.right
    }

    /// Counts the nodes in this tree, this one included.
    pub fn len(&self) -> usize {
        1 + self.left.len() + self.right.len()
    }

    /// A node always holds a value so a tree is never empty. Provided to pair with
    /// [`len`][Self::len].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Inserts `value` by descending on `cmp(node_value, value)`. If some node compares
    /// `Equal`, its value is replaced and the displaced value is returned. Otherwise a new node
    /// is attached at the first empty slot and `None` is returned.
    ///
    /// Fails with [`TreeError::InvalidComparisonResult`] if the comparator can't order `value`
    /// against a node on the way down, and with [`TreeError::InvalidComparator`] if a new node
    /// would hold a value that isn't equal to itself. The tree is unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    /// use serde_json::json;
    ///
    /// // Keyed on the first element only.
    /// let by_key = |a: &(u8, &str), b: &(u8, &str)| Some(a.0.cmp(&b.0));
    /// let mut tree = OrderedTree::new((1, "one"), by_key, |v: &(u8, &str)| json!(v.0))?;
    ///
    /// assert_eq!(tree.insert((2, "two"))?, None);
    /// assert_eq!(tree.insert((2, "deux"))?, Some((2, "two")));
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), ordered_tree::TreeError>(())
    /// ```
    pub fn insert(&mut self, value: T) -> Result<Option<T>> {
        match (self.shared.cmp)(&self.value, &value) {
            Some(Ordering::Less) => self.left.insert(value, &self.shared),
            Some(Ordering::Greater) => self.right.insert(value, &self.shared),
            Some(Ordering::Equal) => {
                trace!("insert replaced an equal value in place");
                Ok(Some(mem::replace(&mut self.value, value)))
            }
            None => Err(TreeError::InvalidComparisonResult),
        }
    }

    /// Detaches the first immediate child matching `matcher`, checking the left slot before the
    /// right one. The detached slot becomes a [`Leaf`][Subtree::Leaf] and the child is returned
    /// with its whole subtree still attached. Returns a `Leaf` if neither slot matches.
    ///
    /// Nothing deeper than one level is examined and the comparator is not used.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, SlotMatcher, Subtree};
    /// use serde_json::json;
    ///
    /// let mut tree = OrderedTree::new(2, |a: &i32, b: &i32| Some(a.cmp(b)), |v: &i32| json!(v))?;
    /// tree.insert(3)?;
    /// tree.insert(4)?;
    ///
    /// // 4 sits below 3, so it is out of reach from the root.
    /// assert!(tree.remove(SlotMatcher::Value(&4)).is_leaf());
    ///
    /// let detached = tree.remove(SlotMatcher::Predicate(&|slot: &Subtree<i32>| !slot.is_leaf()));
    /// assert_eq!(detached.len(), 2);
    /// assert_eq!(tree.len(), 1);
    /// # Ok::<(), ordered_tree::TreeError>(())
    /// ```
    pub fn remove(&mut self, matcher: SlotMatcher<'_, T>) -> Subtree<T>
    where
        T: PartialEq,
    {
        match matcher {
            SlotMatcher::Value(target) => {
                self.remove_by(&|slot: &Subtree<T>| slot.value() == Some(target))
            }
            SlotMatcher::Predicate(predicate) => self.remove_by(predicate),
        }
    }

    /// [`remove`][Self::remove] with a predicate over the child slots. Needs no [`PartialEq`]
    /// on `T`.
    pub fn remove_by(&mut self, predicate: &dyn Fn(&Subtree<T>) -> bool) -> Subtree<T> {
        if predicate(&self.left) {
            trace!("remove detached the left child");
            mem::take(&mut self.left)
        } else if predicate(&self.right) {
            trace!("remove detached the right child");
            mem::take(&mut self.right)
        } else {
            Subtree::Leaf
        }
    }

    /// Searches the whole tree in pre-order (this node, then the left subtree, then the right
    /// subtree) and returns the first value matching `matcher`. The comparator is not used to
    /// prune the search.
    pub fn find(&self, matcher: Matcher<'_, T>) -> Option<&T>
    where
        T: PartialEq,
    {
        match matcher {
            Matcher::Value(target) => self.find_by(&|value: &T| value == target),
            Matcher::Predicate(predicate) => self.find_by(predicate),
        }
    }

    /// [`find`][Self::find] with a predicate over the stored values. Needs no [`PartialEq`] on
    /// `T`.
    pub fn find_by(&self, predicate: &dyn Fn(&T) -> bool) -> Option<&T> {
        if predicate(&self.value) {
            return Some(&self.value);
        }

        self.left
            .find_by(predicate)
            .or_else(|| self.right.find_by(predicate))
    }

    /// Structural equality: both roots compare `Equal` under this tree's comparator and the left
    /// and right subtrees are, recursively, structurally equal (or both empty).
    pub fn is_equal(&self, other: &Self) -> bool {
        (self.shared.cmp)(&self.value, &other.value) == Some(Ordering::Equal)
            && self.left.is_equal(&other.left)
            && self.right.is_equal(&other.right)
    }
}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<T> Default for Subtree<T> {
    fn default() -> Self {
        Self::Leaf
    }
}

impl<T> fmt::Debug for Subtree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("Leaf"),
            Self::Node(n) => fmt::Debug::fmt(n, f),
        }
    }
}

impl<T> Subtree<T> {
    /// Whether this slot is empty.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// The child node in this slot, if any.
    pub fn node(&self) -> Option<&OrderedTree<T>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(&**n),
        }
    }

    /// Takes ownership of the child node in this slot, if any.
    pub fn into_node(self) -> Option<OrderedTree<T>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(*n),
        }
    }

    /// The value of the child node in this slot, if any.
    pub fn value(&self) -> Option<&T> {
        self.node().map(OrderedTree::value)
    }

    /// Counts the nodes below this slot. A `Leaf` has none.
    pub fn len(&self) -> usize {
        self.node().map_or(0, OrderedTree::len)
    }

    /// Whether this slot holds no nodes. Same as [`is_leaf`][Self::is_leaf].
    pub fn is_empty(&self) -> bool {
        self.is_leaf()
    }

    /// [`OrderedTree::find`] for a slot. An empty slot finds nothing.
    pub fn find(&self, matcher: Matcher<'_, T>) -> Option<&T>
    where
        T: PartialEq,
    {
        self.node().and_then(|n| n.find(matcher))
    }

    /// [`OrderedTree::find_by`] for a slot. An empty slot finds nothing.
    pub fn find_by(&self, predicate: &dyn Fn(&T) -> bool) -> Option<&T> {
        self.node().and_then(|n| n.find_by(predicate))
    }

    fn insert(&mut self, value: T, shared: &Rc<Shared<T>>) -> Result<Option<T>> {
        match self {
            Self::Leaf => {
                let node = OrderedTree::with_shared(value, Rc::clone(shared))?;
                trace!("insert attached a new node");
                *self = Self::Node(Box::new(node));
                Ok(None)
            }
            Self::Node(n) => n.insert(value),
        }
    }

    fn is_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf, Self::Leaf) => true,
            (Self::Node(a), Self::Node(b)) => a.is_equal(b),
            _ => false,
        }
    }
}
