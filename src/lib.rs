//! # kv-btree
//! An in-memory, ordered key-value store backed by a B-tree.
//!
//! Keys are sortable text; values are flat `attribute -> attribute`
//! maps ([`Value`]). The crate exposes exactly four operations —
//! insert, update, search, remove — through [`Tree`] and the
//! [`Store`] trait; everything else (HTTP routing, RPC framing,
//! persistence, transactions) is a concern for a collaborator that
//! embeds this crate, not this crate itself.
//!
//! ## Example
//! ```
//! use kv_btree::{Tree, Value};
//!
//! let mut tree = Tree::new(3);
//! tree.insert("A", Value::from([("val", "Hi, I am A")]));
//! assert_eq!(tree.search("A").unwrap().get("val"), Some("Hi, I am A"));
//!
//! tree.remove("A").unwrap();
//! assert_eq!(tree.search("A"), None);
//! ```
// =====================================================================
// File: lib.rs
//
// Description:
//   Crate root. Re-exports the public types (`Value`, `Item`, `Node`,
//   `Tree`, `Error`) and defines the `Store` trait, which names the
//   four-operation contract a network-facing collaborator (HTTP
//   handlers, RPC handlers — not implemented in this crate) is
//   expected to consume. `Tree` implements `Store` directly so such a
//   collaborator can hold a `Box<dyn Store>` without depending on the
//   B-tree internals.
// =====================================================================
mod error;
mod item;
mod value;

pub mod index;

pub use error::Error;
pub use index::{Node, Tree};
pub use item::Item;
pub use value::Value;

/// The operation set a network-facing collaborator (HTTP handlers, RPC
/// handlers) is expected to call against. [`Tree`] is the only
/// implementation in this crate; the trait exists so such a
/// collaborator can depend on `dyn Store` rather than on `Tree`
/// directly.
pub trait Store {
    /// Inserts `key` with `value`, overwriting any existing value.
    fn insert(&mut self, key: &str, value: Value);

    /// Replaces the value stored at `key`.
    ///
    /// # Errors
    /// [`Error::KeyDoesNotExist`] if `key` is absent.
    fn update(&mut self, key: &str, value: Value) -> Result<(), Error>;

    /// Looks up `key`, returning a deep copy of its value if present.
    fn search(&self, key: &str) -> Option<Value>;

    /// Removes `key` and its value.
    ///
    /// # Errors
    /// [`Error::KeyDoesNotExist`] if `key` is absent.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

impl Store for Tree {
    fn insert(&mut self, key: &str, value: Value) {
        Tree::insert(self, key, value)
    }

    fn update(&mut self, key: &str, value: Value) -> Result<(), Error> {
        Tree::update(self, key, value)
    }

    fn search(&self, key: &str) -> Option<Value> {
        Tree::search(self, key)
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        Tree::remove(self, key)
    }
}
