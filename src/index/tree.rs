// =====================================================================
// File: index/tree.rs
//
// Description:
//   Implements `Tree`, the public B-tree index backing the key-value
//   store. `Tree` owns the root `Node` and the minimum degree `t`; it
//   is the only place height changes (root split on overflow, root
//   collapse on underflow) happen. Everything else — the recursive
//   insert/search/update/remove and all rebalancing — lives on `Node`
//   itself (see `node.rs`).
//
// Notes:
//   * `t` determines node capacity: `2t - 1` items, `2t` children.
//   * Root-splitting grows the tree's height by one; root-collapsing
//     shrinks it by one. Both are Tree-level concerns because only the
//     tree knows which node is currently the root.
// =====================================================================
use crate::{Error, Item, Node, Value};

/// B-tree index backing the key-value store.
///
/// Holds the minimum degree `t` and the root node. `t` fixes node
/// capacity at `2t - 1` items and `2t` children; the network layers
/// that sit in front of this crate construct it with `t = 3`, but any
/// `t >= 2` is accepted.
#[derive(Debug)]
pub struct Tree {
    pub(crate) t: usize,
    pub(crate) root: Box<Node>,
}

// BTree referencing:
// https://build-your-own.org/database/
// https://www.geeksforgeeks.org/dsa/introduction-of-b-tree-2/
impl Tree {
    /// Creates a new, empty tree with minimum degree `t`.
    ///
    /// # Panics
    /// Panics if `t < 2`; `t` is a structural constant a caller picks
    /// once, not unchecked user input, so an invalid value is a
    /// programmer error rather than a recoverable one.
    ///
    /// # Example
    /// ```
    /// use kv_btree::Tree;
    /// let tree = Tree::new(3);
    /// assert_eq!(tree.search("missing"), None);
    /// ```
    pub fn new(t: usize) -> Self {
        assert!(t >= 2, "B-tree minimum degree t must be >= 2, got {t}");
        Self {
            t,
            root: Box::new(Node::new(true)),
        }
    }

    /// The minimum degree this tree was constructed with.
    pub fn min_degree(&self) -> usize {
        self.t
    }

    /// Looks up `key`, returning a deep copy of its value if present.
    ///
    /// # Example
    /// ```
    /// use kv_btree::{Tree, Value};
    ///
    /// let mut tree = Tree::new(3);
    /// tree.insert("dog", Value::from([("sound", "bark")]));
    /// assert_eq!(tree.search("dog").unwrap().get("sound"), Some("bark"));
    /// assert_eq!(tree.search("cat"), None);
    /// ```
    pub fn search(&self, key: &str) -> Option<Value> {
        self.root.search(key)
    }

    /// Inserts `key` with `value`, overwriting any existing value for
    /// `key` (last-write-wins). Never fails.
    ///
    /// If the root is full, a new root is allocated with the old root
    /// as its sole child, which is then split — growing the tree's
    /// height by one — before the insert proceeds.
    ///
    /// # Example
    /// ```
    /// use kv_btree::{Tree, Value};
    ///
    /// let mut tree = Tree::new(3);
    /// tree.insert("dog", Value::from([("sound", "bark")]));
    /// tree.insert("dog", Value::from([("sound", "woof")]));
    /// assert_eq!(tree.search("dog").unwrap().get("sound"), Some("woof"));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let item = Item::new(key, value);

        if self.root.items.len() == 2 * self.t - 1 {
            log::debug!("root full (t={}), growing tree height", self.t);

            let old_root = std::mem::replace(&mut self.root, Box::new(Node::new(true)));
            let mut new_root = Box::new(Node::new(false));
            new_root.children.push(old_root);
            new_root.split_child(self.t, 0);
            new_root.insert(self.t, item);

            self.root = new_root;
        } else {
            self.root.insert(self.t, item);
        }
    }

    /// Replaces the value stored at `key`.
    ///
    /// # Errors
    /// Returns [`Error::KeyDoesNotExist`] if `key` is absent; the tree
    /// is left completely unchanged in that case.
    pub fn update(&mut self, key: &str, value: Value) -> Result<(), Error> {
        self.root.update(key, value)
    }

    /// Removes `key` and its value.
    ///
    /// # Errors
    /// Returns [`Error::KeyDoesNotExist`] if `key` is absent; the tree
    /// is left completely unchanged in that case (checked via a
    /// read-only membership test before any rebalancing is attempted).
    pub fn remove(&mut self, key: &str) -> Result<(), Error> {
        if !self.root.contains(key) {
            return Err(Error::key_does_not_exist(key));
        }

        self.root.remove(self.t, key)?;

        if !self.root.is_leaf && self.root.items.is_empty() {
            log::debug!("root empty and internal, collapsing tree height");
            let only_child = self
                .root
                .children
                .pop()
                .expect("empty internal root must retain exactly one child");
            self.root = only_child;
        }

        Ok(())
    }
}
