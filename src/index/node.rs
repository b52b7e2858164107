// =====================================================================
// File: index/node.rs
//
// Description:
//   Defines the B-tree node (`Node`) used by the in-memory index. Each
//   node holds:
//
//   - `items`    : ordered, pairwise-distinct (key, value) pairs.
//   - `children` : child subtrees, empty iff the node is a leaf.
//   - `is_leaf`  : whether this node has no children.
//
//   `items.len()` and `children.len()` ARE the occupancy counters —
//   unlike a fixed-capacity slot array plus a separate counter, a
//   `Vec`'s length can never drift out of sync with what it actually
//   holds, so there is no vacated-slot bookkeeping to get wrong during
//   split/merge/borrow.
//
// Notes:
//   * This file holds the node representation and its recursive
//     operations (insert, search, update, remove, and the rebalancing
//     helpers). `tree.rs` only owns the root and the height-changing
//     operations (root split, root collapse).
//   * Minimum degree `t` is threaded through as a parameter rather
//     than stored on every node, since only the tree-level operations
//     ever need it.
// =====================================================================
use crate::{Error, Item, Value};

/// A single B-tree node.
///
/// Capacity is conceptual, not allocated: `items` never grows past
/// `2t - 1` entries and `children` never grows past `2t`, but those
/// bounds are enforced by the call discipline in this module (always
/// split before the vector would overflow), not by a fixed-size
/// backing array.
#[derive(Debug)]
pub struct Node {
    pub(crate) items: Vec<Item>,
    pub(crate) children: Vec<Box<Node>>,
    pub(crate) is_leaf: bool,
}

impl Node {
    pub(crate) fn new(is_leaf: bool) -> Self {
        Self {
            items: Vec::new(),
            children: Vec::new(),
            is_leaf,
        }
    }

    /// Smallest index `i` such that `i == items.len()` or
    /// `items[i].key >= key`. Binary search over the sorted items.
    pub(crate) fn find_key(&self, key: &str) -> usize {
        self.items.partition_point(|item| item.key.as_str() < key)
    }

    /// Whether `key` is present anywhere in this subtree, without
    /// cloning any stored value.
    pub(crate) fn contains(&self, key: &str) -> bool {
        let idx = self.find_key(key);
        if idx < self.items.len() && self.items[idx].key == key {
            return true;
        }
        !self.is_leaf && self.children[idx].contains(key)
    }

    pub(crate) fn search(&self, key: &str) -> Option<Value> {
        let idx = self.find_key(key);
        if idx < self.items.len() && self.items[idx].key == key {
            return Some(self.items[idx].value.clone());
        }
        if self.is_leaf {
            None
        } else {
            self.children[idx].search(key)
        }
    }

    pub(crate) fn update(&mut self, key: &str, value: Value) -> Result<(), Error> {
        let idx = self.find_key(key);
        if idx < self.items.len() && self.items[idx].key == key {
            self.items[idx].value = value;
            return Ok(());
        }
        if self.is_leaf {
            return Err(Error::key_does_not_exist(key));
        }
        self.children[idx].update(key, value)
    }

    /// Inserts `item`, overwriting an existing item with the same key
    /// (last-write-wins — see the duplicate-key open question in
    /// `DESIGN.md`). Precondition: `self` is not full.
    pub(crate) fn insert(&mut self, t: usize, item: Item) {
        debug_assert!(
            self.items.len() < 2 * t - 1,
            "insert called on a full node"
        );

        let idx = self.find_key(&item.key);

        if self.is_leaf {
            if idx < self.items.len() && self.items[idx].key == item.key {
                self.items[idx].value = item.value;
            } else {
                self.items.insert(idx, item);
            }
            return;
        }

        if idx < self.items.len() && self.items[idx].key == item.key {
            self.items[idx].value = item.value;
            return;
        }

        let mut idx = idx;
        if self.children[idx].items.len() == 2 * t - 1 {
            self.split_child(t, idx);
            match item.key.as_str().cmp(self.items[idx].key.as_str()) {
                std::cmp::Ordering::Greater => idx += 1,
                std::cmp::Ordering::Equal => {
                    self.items[idx].value = item.value;
                    return;
                }
                std::cmp::Ordering::Less => {}
            }
        }
        self.children[idx].insert(t, item);
    }

    /// Splits the full child at `self.children[i]` into two nodes of
    /// `t - 1` items each, promoting the median into `self` at
    /// position `i`. Children only migrate to the new sibling when the
    /// child being split is not a leaf.
    pub(crate) fn split_child(&mut self, t: usize, i: usize) {
        let child = &mut self.children[i];
        debug_assert_eq!(child.items.len(), 2 * t - 1, "split_child on a non-full child");

        let mut sibling = Box::new(Node::new(child.is_leaf));
        sibling.items = child.items.split_off(t);
        let median = child.items.pop().expect("full child has a median item");

        if !child.is_leaf {
            sibling.children = child.children.split_off(t);
        }

        log::trace!("split_child: promoting `{}` at position {i}", median.key);

        self.items.insert(i, median);
        self.children.insert(i + 1, sibling);
    }

    /// Removes `key` from this subtree. Before descending into a
    /// child, restores it to at least `t` items via [`Node::fill`] if
    /// it would otherwise underflow.
    pub(crate) fn remove(&mut self, t: usize, key: &str) -> Result<(), Error> {
        let idx = self.find_key(key);

        if idx < self.items.len() && self.items[idx].key == key {
            if self.is_leaf {
                self.items.remove(idx);
            } else {
                self.remove_from_internal(t, idx);
            }
            return Ok(());
        }

        if self.is_leaf {
            return Err(Error::key_does_not_exist(key));
        }

        if self.children[idx].items.len() < t {
            self.fill(t, idx);
        }

        let next = idx.min(self.items.len());
        self.children[next].remove(t, key)
    }

    /// The key being removed lives at `items[idx]` of a non-leaf node:
    /// replace it with its predecessor or successor (borrowing a key
    /// from whichever neighboring child can spare one), or merge the
    /// two children when neither can.
    fn remove_from_internal(&mut self, t: usize, idx: usize) {
        if self.children[idx].items.len() >= t {
            let pred = Self::max_item(&mut self.children[idx]);
            let pred_key = pred.key.clone();
            self.items[idx] = pred;
            self.children[idx]
                .remove(t, &pred_key)
                .expect("predecessor key must exist in its own subtree");
        } else if self.children[idx + 1].items.len() >= t {
            let succ = Self::min_item(&mut self.children[idx + 1]);
            let succ_key = succ.key.clone();
            self.items[idx] = succ;
            self.children[idx + 1]
                .remove(t, &succ_key)
                .expect("successor key must exist in its own subtree");
        } else {
            let key = self.items[idx].key.clone();
            self.merge(t, idx);
            self.children[idx]
                .remove(t, &key)
                .expect("merged child must contain the removed key");
        }
    }

    /// The in-order predecessor of an item in a non-leaf node: the
    /// rightmost item of its left subtree.
    fn max_item(node: &mut Node) -> Item {
        let mut cur = node;
        while !cur.is_leaf {
            debug_assert_eq!(cur.children.len(), cur.items.len() + 1);
            let last = cur.children.len() - 1;
            cur = &mut cur.children[last];
        }
        cur.items
            .last()
            .expect("leaf reached while descending for a predecessor must be non-empty")
            .clone()
    }

    /// The in-order successor: the leftmost item of the right subtree.
    fn min_item(node: &mut Node) -> Item {
        let mut cur = node;
        while !cur.is_leaf {
            debug_assert_eq!(cur.children.len(), cur.items.len() + 1);
            cur = &mut cur.children[0];
        }
        cur.items
            .first()
            .expect("leaf reached while descending for a successor must be non-empty")
            .clone()
    }

    /// Restores `children[idx]` to at least `t` items before a
    /// descent, by borrowing from a sibling that can spare one or, if
    /// neither can, merging with a sibling.
    fn fill(&mut self, t: usize, idx: usize) {
        if idx > 0 && self.children[idx - 1].items.len() >= t {
            self.borrow_from_prev(idx);
        } else if idx < self.items.len() && self.children[idx + 1].items.len() >= t {
            self.borrow_from_next(idx);
        } else if idx < self.items.len() {
            self.merge(t, idx);
        } else {
            self.merge(t, idx - 1);
        }
    }

    /// Rotates one item from the left sibling through the parent into
    /// `children[idx]`.
    fn borrow_from_prev(&mut self, idx: usize) {
        log::trace!("borrow_from_prev at child {idx}");

        let sinking_item = self.items[idx - 1].clone();
        let sibling = &mut self.children[idx - 1];
        let rising_item = sibling.items.pop().expect("left sibling has items to lend");
        let lent_child = if !sibling.is_leaf {
            Some(sibling.children.pop().expect("left sibling has a child to lend"))
        } else {
            None
        };

        self.items[idx - 1] = rising_item;

        let child = &mut self.children[idx];
        child.items.insert(0, sinking_item);
        if let Some(c) = lent_child {
            child.children.insert(0, c);
        }
    }

    /// Rotates one item from the right sibling through the parent into
    /// `children[idx]`.
    fn borrow_from_next(&mut self, idx: usize) {
        log::trace!("borrow_from_next at child {idx}");

        let sinking_item = self.items[idx].clone();
        let sibling = &mut self.children[idx + 1];
        let rising_item = sibling.items.remove(0);
        let lent_child = if !sibling.is_leaf {
            Some(sibling.children.remove(0))
        } else {
            None
        };

        self.items[idx] = rising_item;

        let child = &mut self.children[idx];
        child.items.push(sinking_item);
        if let Some(c) = lent_child {
            child.children.push(c);
        }
    }

    /// Fuses `children[idx]`, `items[idx]`, and `children[idx + 1]`
    /// into `children[idx]`, which ends up with `2t - 1` items. Always
    /// iterates over the sibling's own item/child counts, never the
    /// parent's — with `Vec`-backed nodes there is no other count to
    /// confuse it with.
    fn merge(&mut self, t: usize, idx: usize) {
        log::debug!("merge at child {idx}");

        let mut sibling = self.children.remove(idx + 1);
        let middle = self.items.remove(idx);
        let child = &mut self.children[idx];

        child.items.push(middle);
        child.items.append(&mut sibling.items);
        if !child.is_leaf {
            child.children.append(&mut sibling.children);
        }

        debug_assert_eq!(child.items.len(), 2 * t - 1, "merged child has the wrong size");
    }

    /// In-order key traversal, used by the tree-invariant tests.
    #[cfg(test)]
    pub(crate) fn collect_keys(&self, out: &mut Vec<String>) {
        if self.is_leaf {
            out.extend(self.items.iter().map(|item| item.key.clone()));
            return;
        }
        for i in 0..self.items.len() {
            self.children[i].collect_keys(out);
            out.push(self.items[i].key.clone());
        }
        self.children[self.items.len()].collect_keys(out);
    }
}
