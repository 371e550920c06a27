#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// bucket internals (sort order, routing, capacity).

use crate::error::TableError;
use crate::hash::bucket_index;
use crate::table::HashTable;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

// Pool-indexed operations so that shrinking converges on earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, i32),
    AddUnique(usize, i32),
    Del(usize),
    Find(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (
        prop_oneof![Just(1usize), Just(2), Just(8), Just(64)],
        proptest::collection::vec("[a-z]{0,5}", 1..=12),
    )
        .prop_flat_map(|(buckets, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Add(i, v)),
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::AddUnique(i, v)),
                idx.clone().prop_map(Op::Del),
                idx.prop_map(Op::Find),
                Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..120)
                .prop_map(move |ops| (buckets, pool.clone(), ops))
        })
}

fn check_structure(t: &HashTable<String, i32>) -> Result<(), TestCaseError> {
    let n = t.bucket_count();
    let mut used = 0;
    for i in 0..n {
        let b = t.bucket(i).expect("bucket in range");
        prop_assert!(b.len() <= b.capacity());
        for pair in b.entries().windows(2) {
            prop_assert!(pair[0].key < pair[1].key, "bucket {} not strictly sorted", i);
        }
        for e in b.entries() {
            prop_assert_eq!(bucket_index(&e.key, n), i);
        }
        used += b.len();
    }
    prop_assert_eq!(used, t.count());
    Ok(())
}

// Property: state-machine equivalence against a model map.
// - `add` inserts or replaces; replaced values reach the destructor.
// - `add_unique` rejects present keys without side effects.
// - `del` removes present keys (value to destructor), `NotFound` otherwise.
// - `find` parity with the model; full iteration equals the model's entries.
// - Buckets stay sorted, correctly routed, within capacity; count is the sum.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let disposed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&disposed);
        let mut sut: HashTable<String, i32> =
            HashTable::with_destructor(buckets, move |v: i32| sink.borrow_mut().push(v))
                .unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut expected_disposed: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Add(i, v) => {
                    let k = pool[i].clone();
                    prop_assert_eq!(sut.add(k.clone(), v), Ok(()));
                    if let Some(old) = model.insert(k, v) {
                        expected_disposed.push(old);
                    }
                }
                Op::AddUnique(i, v) => {
                    let k = pool[i].clone();
                    let res = sut.add_unique(k.clone(), v);
                    if model.contains_key(&k) {
                        prop_assert_eq!(res, Err(TableError::DuplicateKey));
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        model.insert(k, v);
                    }
                }
                Op::Del(i) => {
                    let k = &pool[i];
                    match model.remove(k) {
                        Some(old) => {
                            prop_assert_eq!(sut.del(k), Ok(()));
                            expected_disposed.push(old);
                        }
                        None => {
                            prop_assert_eq!(sut.del(k), Err(TableError::NotFound));
                        }
                    }
                    prop_assert!(sut.find(k).is_none());
                }
                Op::Find(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.find(k), model.get(k));
                }
                Op::Iterate => {
                    let seen: BTreeSet<(String, i32)> =
                        sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    let want: BTreeSet<(String, i32)> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(sut.iter().count(), sut.count());
                    prop_assert_eq!(seen, want);
                }
            }

            check_structure(&sut)?;
            prop_assert_eq!(sut.count(), model.len());
            let got = disposed.borrow().clone();
            prop_assert_eq!(&got, &expected_disposed);
        }

        // Dropping hands every remaining value to the destructor exactly once.
        let remaining = sut.count();
        drop(sut);
        let total = disposed.borrow().len();
        prop_assert_eq!(total, expected_disposed.len() + remaining);
    }
}

// Property: capacity is always a whole number of steps and never more than
// one step beyond what the growth rule needs, under a single-bucket table
// where every key collides.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_capacity_tracks_steps(
        ops in proptest::collection::vec((any::<bool>(), 0u8..48), 1..200),
    ) {
        let mut t: HashTable<String, u8> = HashTable::new(1).unwrap();
        let step = t.step();
        for (insert, n) in ops {
            let k = format!("k{n:02}");
            if insert {
                t.add(k, n).unwrap();
            } else {
                let _ = t.del(&k);
            }
            let usage = t.bucket_usage().next().expect("one bucket");
            prop_assert_eq!(usage.capacity % step, 0);
            if usage.capacity > 0 {
                prop_assert!(usage.used < usage.capacity);
                prop_assert!(usage.capacity <= (usage.used / step + 2) * step);
            }
        }
    }
}
