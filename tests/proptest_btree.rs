// =====================================================================
// File: proptest_btree.rs
//
// Description:
//   Property-based tests over randomized insert/update/remove
//   sequences. Each case builds a tree alongside a reference
//   `BTreeMap<String, Value>`, applies the same operations to both,
//   and checks they agree after every step — this is the cheapest way
//   to gain confidence across the astronomically large space of
//   possible operation interleavings that hand-written cases can't
//   enumerate.
// =====================================================================
use std::collections::BTreeMap;

use kv_btree::{Tree, Value};
use proptest::collection::vec;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(String, String),
    Update(String, String),
    Remove(String),
}

fn small_key() -> impl Strategy<Value = String> {
    (0u8..12).prop_map(|n| format!("key{n}"))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (small_key(), "[a-z]{1,6}").prop_map(|(k, v)| Op::Insert(k, v)),
        (small_key(), "[a-z]{1,6}").prop_map(|(k, v)| Op::Update(k, v)),
        small_key().prop_map(Op::Remove),
    ]
}

fn value_of(s: &str) -> Value {
    Value::from([("val", s)])
}

proptest! {
    /// After any sequence of insert/update/remove, the tree agrees with
    /// a reference `BTreeMap` on every key it was ever asked about.
    #[test]
    fn agrees_with_reference_map(ops in vec(op_strategy(), 0..200), degree in 2usize..6) {
        let mut tree = Tree::new(degree);
        let mut reference: BTreeMap<String, Value> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    tree.insert(k.clone(), value_of(&v));
                    reference.insert(k, value_of(&v));
                }
                Op::Update(k, v) => {
                    let tree_result = tree.update(&k, value_of(&v));
                    if reference.contains_key(&k) {
                        prop_assert!(tree_result.is_ok());
                        reference.insert(k, value_of(&v));
                    } else {
                        prop_assert!(tree_result.is_err());
                    }
                }
                Op::Remove(k) => {
                    let tree_result = tree.remove(&k);
                    if reference.remove(&k).is_some() {
                        prop_assert!(tree_result.is_ok());
                    } else {
                        prop_assert!(tree_result.is_err());
                    }
                }
            }
        }

        for (k, v) in &reference {
            let found = tree.search(k);
            prop_assert_eq!(found.as_ref(), Some(v));
        }
    }

    /// Every key inserted in a batch remains searchable regardless of
    /// the minimum degree used to store it.
    #[test]
    fn every_inserted_key_is_searchable(keys in vec(small_key(), 0..60), degree in 2usize..6) {
        let mut tree = Tree::new(degree);
        let mut unique: Vec<String> = Vec::new();
        for k in &keys {
            tree.insert(k.clone(), value_of(k));
            if !unique.contains(k) {
                unique.push(k.clone());
            }
        }
        for k in &unique {
            prop_assert_eq!(tree.search(k).and_then(|v| v.get("val").map(str::to_owned)), Some(k.clone()));
        }
    }
}
