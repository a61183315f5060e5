//! Tests for the prefix trie backends.
//!
//! Every test runs against both backends; property tests compare them with an
//! ordered-set model and with each other.

use crate::data_structures::prefix_trie::{build_trie, PrefixTrie, TrieBackend, TrieConfig};
use crate::tests::test_utils::{key_strategy, op_strategy, Model, Op};
use proptest::prelude::*;
use test_case::test_case;

fn audited(backend: TrieBackend) -> Box<dyn PrefixTrie> {
    build_trie(
        &TrieConfig::new()
            .with_backend(backend)
            .with_audit_mutations(true),
    )
}

/// Checks every observable answer of `trie` against `model`.
fn assert_matches_model(trie: &mut dyn PrefixTrie, model: &Model) {
    assert_eq!(trie.len(), model.sort("").len());
    for prefix in model.all_prefixes() {
        assert_eq!(trie.sort(&prefix), model.sort(&prefix), "sort({prefix:?})");
        assert_eq!(trie.count_prefix(&prefix), model.count_prefix(&prefix), "count({prefix:?})");
        assert_eq!(trie.search(&prefix), model.contains(&prefix), "search({prefix:?})");
    }
    trie.audit().unwrap();
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_cat_scenario(backend: TrieBackend) {
    let mut trie = audited(backend);
    for word in ["cat", "cats", "car", "dog"] {
        trie.insert(word);
    }
    assert_eq!(trie.sort("ca"), vec!["car", "cat", "cats"]);

    trie.delete("cat").unwrap();
    assert!(!trie.search("cat"));
    assert!(trie.search("cats"));
    assert_eq!(trie.sort(""), vec!["car", "cats", "dog"]);
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_demo_sequence(backend: TrieBackend) {
    let mut trie = audited(backend);
    trie.insert("cats");
    trie.insert("cat");
    trie.insert("dad");
    trie.insert("");
    trie.delete("cat").unwrap();
    for _ in 0..5 {
        trie.insert("cat");
    }
    trie.insert("cart");
    trie.insert("catq");
    trie.delete("cats").unwrap();
    trie.insert("ca");

    assert!(trie.sort("cae").is_empty());
    assert_eq!(trie.sort(""), vec!["", "ca", "cart", "cat", "catq", "dad"]);
    assert_eq!(trie.len(), 6);
    assert_eq!(trie.count_prefix("ca"), 4);
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_long_keys_stay_off_the_call_stack(backend: TrieBackend) {
    let long = "a".repeat(100_000);
    let longer = format!("{long}b");
    let mut trie = audited(backend);
    trie.insert(&long);
    trie.insert(&longer);

    assert_eq!(trie.sort(""), vec![long.clone(), longer.clone()]);
    assert_eq!(trie.count_prefix(&long), 2);
    assert!(format!("{trie:?}").contains("len: 2"));

    trie.delete(&longer).unwrap();
    assert_eq!(trie.sort(&long[..50_000]), vec![long.clone()]);
    trie.delete(&long).unwrap();
    assert!(trie.is_empty());
    assert!(trie.sort("").is_empty());

    trie.insert(&longer);
    drop(trie);
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_delete_missing_leaves_trie_untouched(backend: TrieBackend) {
    let mut trie = audited(backend);
    trie.insert("abc");

    assert!(trie.delete("ab").is_err());
    assert!(trie.delete("abcd").is_err());
    assert!(trie.delete("").is_err());
    assert_eq!(trie.count_prefix("a"), 1);
    assert_eq!(trie.count_prefix("abc"), 1);
    assert_eq!(trie.sort(""), vec!["abc"]);
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_terminal_orders_before_extensions(backend: TrieBackend) {
    let mut trie = audited(backend);
    for word in ["ab", "a", "abc", "b", "", "aa"] {
        trie.insert(word);
    }
    assert_eq!(trie.sort(""), vec!["", "a", "aa", "ab", "abc", "b"]);
    assert_eq!(trie.sort("a"), vec!["a", "aa", "ab", "abc"]);
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_unicode_keys_order_by_scalar_value(backend: TrieBackend) {
    let mut trie = audited(backend);
    for word in ["zebra", "élan", "eagle", "日本", "Zoo"] {
        trie.insert(word);
    }
    assert_eq!(trie.sort(""), vec!["Zoo", "eagle", "zebra", "élan", "日本"]);
    assert_eq!(trie.sort("日"), vec!["日本"]);
}

#[test_case(TrieBackend::OrderedSibling ; "ordered sibling")]
#[test_case(TrieBackend::HashedHeap ; "hashed heap")]
fn test_clear_then_reuse(backend: TrieBackend) {
    let mut trie = audited(backend);
    trie.insert("one");
    trie.insert("two");
    trie.clear();
    assert!(trie.is_empty());
    assert!(!trie.search("one"));

    trie.insert("three");
    assert_eq!(trie.sort(""), vec!["three"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Property: inserting a set and sorting the empty prefix returns the set in order
    #[test]
    fn prop_round_trip(keys in prop::collection::vec(key_strategy(), 0..40)) {
        for backend in [TrieBackend::OrderedSibling, TrieBackend::HashedHeap] {
            let mut trie = build_trie(&TrieConfig::new().with_backend(backend));
            let mut model = Model::default();
            for key in &keys {
                trie.insert(key);
                model.insert(key);
            }
            prop_assert_eq!(trie.sort(""), model.sort(""));
        }
    }

    // Property: inserting then deleting a fresh key is observationally a no-op
    #[test]
    fn prop_delete_undoes_insert(
        keys in prop::collection::vec(key_strategy(), 0..20),
        extra in key_strategy(),
    ) {
        for backend in [TrieBackend::OrderedSibling, TrieBackend::HashedHeap] {
            let mut trie = audited(backend);
            let mut model = Model::default();
            for key in keys.iter().filter(|key| **key != extra) {
                trie.insert(key);
                model.insert(key);
            }
            trie.insert(&extra);
            trie.delete(&extra).unwrap();
            assert_matches_model(trie.as_mut(), &model);
        }
    }

    // Property: a second insert changes nothing observable
    #[test]
    fn prop_insert_idempotent(keys in prop::collection::vec(key_strategy(), 1..20)) {
        for backend in [TrieBackend::OrderedSibling, TrieBackend::HashedHeap] {
            let mut trie = audited(backend);
            let mut model = Model::default();
            for key in &keys {
                trie.insert(key);
                model.insert(key);
            }
            for key in &keys {
                trie.insert(key);
            }
            assert_matches_model(trie.as_mut(), &model);
        }
    }

    // Property: random operation sequences agree with the model and across backends,
    // with reference counts matching an independent recount after every step
    #[test]
    fn prop_backends_agree(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut sibling = audited(TrieBackend::OrderedSibling);
        let mut heap = audited(TrieBackend::HashedHeap);
        let mut model = Model::default();

        for op in &ops {
            match op {
                Op::Insert(key) => {
                    sibling.insert(key);
                    heap.insert(key);
                    model.insert(key);
                }
                Op::Delete(key) => {
                    let present = model.delete(key);
                    prop_assert_eq!(sibling.delete(key).is_ok(), present);
                    prop_assert_eq!(heap.delete(key).is_ok(), present);
                }
                Op::Sort(prefix) => {
                    let expected = model.sort(prefix);
                    prop_assert_eq!(sibling.sort(prefix), expected.clone());
                    prop_assert_eq!(heap.sort(prefix), expected);
                }
            }
        }

        assert_matches_model(sibling.as_mut(), &model);
        assert_matches_model(heap.as_mut(), &model);
    }
}
