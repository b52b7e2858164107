// =====================================================================
// File: error.rs
//
// Description:
//   The single error condition the B-tree core can surface: a key
//   referenced by Update or Remove that is not present in the tree.
//   Everything else (malformed keys, empty values, wire decoding) is
//   the responsibility of whatever network layer sits in front of the
//   tree and never reaches this type.
// =====================================================================
use thiserror::Error;

/// Error surfaced by [`crate::Tree::update`] and [`crate::Tree::remove`].
///
/// Insert never fails; Search signals absence with `None` rather than
/// an error. This is intentionally a single-variant enum instead of a
/// unit struct so adding a distinguishable error later (see the
/// duplicate-key open question in the design notes) won't break
/// existing `match`/`matches!` call sites.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `key` was not present in the tree at the time of the call.
    #[error("key `{key}` does not exist")]
    KeyDoesNotExist { key: String },
}

impl Error {
    pub(crate) fn key_does_not_exist(key: impl Into<String>) -> Self {
        Error::KeyDoesNotExist { key: key.into() }
    }
}
