#![cfg(test)]

// Property tests for MtfTable kept inside the crate so they can observe the
// entry order directly.

use crate::table::MtfTable;
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Mutex;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i32),
    Lookup(u8),
    LookupMut(u8, i32),
    Remove(u8),
    Clear,
}

// Small key space so duplicates and hits are common.
fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u8..6;
    let op = prop_oneof![
        4 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        4 => key.clone().prop_map(Op::Lookup),
        2 => (key.clone(), any::<i32>()).prop_map(|(k, d)| Op::LookupMut(k, d)),
        2 => key.prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..80)
}

// Reference model: front-first Vec with explicit move-to-front.
fn model_lookup(model: &mut Vec<(u8, i32)>, k: u8) -> Option<&mut i32> {
    let i = model.iter().position(|&(mk, _)| mk == k)?;
    let entry = model.remove(i);
    model.insert(0, entry);
    Some(&mut model[0].1)
}

type Released = Mutex<Vec<(u8, i32)>>;

fn hooked_table(released: &Released) -> MtfTable<'_, u8, i32> {
    let mut t = MtfTable::new();
    // Pair key and value releases back up; keys always arrive first.
    t.set_key_destructor(move |k| released.lock().unwrap().push((k, 0)));
    t.set_value_destructor(move |v| {
        if let Some(last) = released.lock().unwrap().last_mut() {
            last.1 = v;
        }
    });
    t
}

// Property: state-machine equivalence against a move-to-front Vec model.
// Invariants exercised across random operation sequences:
// - Entry order (keys and values) matches the model after every op.
// - Lookup hits the first match and relocates only that entry.
// - Remove releases every match in front-to-back order, each exactly once.
// - Clear and drop release all remaining entries in order.
// - The list stays acyclic with every node reachable.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let released: Released = Mutex::new(Vec::new());
        let mut sut = hooked_table(&released);
        let mut model: Vec<(u8, i32)> = Vec::new();
        let mut expected_released: Vec<(u8, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    sut.insert(k, v).expect("insert");
                    model.insert(0, (k, v));
                }
                Op::Lookup(k) => {
                    let got = sut.lookup(&k).copied();
                    let want = model_lookup(&mut model, k).map(|v| *v);
                    prop_assert_eq!(got, want);
                }
                Op::LookupMut(k, d) => {
                    let got = sut.lookup_mut(&k).map(|v| {
                        *v = v.wrapping_add(d);
                        *v
                    });
                    let want = model_lookup(&mut model, k).map(|v| {
                        *v = v.wrapping_add(d);
                        *v
                    });
                    prop_assert_eq!(got, want);
                }
                Op::Remove(k) => {
                    let n = sut.remove(&k);
                    let before = model.len();
                    expected_released.extend(model.iter().filter(|e| e.0 == k).copied());
                    model.retain(|e| e.0 != k);
                    prop_assert_eq!(n, before - model.len());
                }
                Op::Clear => {
                    sut.clear();
                    expected_released.append(&mut model);
                }
            }

            prop_assert_eq!(sut.snapshot(), model.clone());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(&*released.lock().unwrap(), &expected_released);
            prop_assert!(sut.check_invariants().is_ok());
        }

        drop(sut);
        expected_released.append(&mut model);
        prop_assert_eq!(&*released.lock().unwrap(), &expected_released);
    }
}

// Property: repeated lookups of one key cost a single comparison each once
// it has been moved to the front, whatever its starting depth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_hit_is_cheap_after_first_lookup(len in 1usize..40, pick in any::<prop::sample::Index>()) {
        let compares = Rc::new(Cell::new(0usize));
        let c = compares.clone();
        let mut t = MtfTable::with_comparator(move |a: &usize, b: &usize| {
            c.set(c.get() + 1);
            a.cmp(b)
        });
        for k in 0..len {
            t.insert(k, k).expect("insert");
        }
        let k = pick.index(len);

        compares.set(0);
        prop_assert_eq!(t.lookup(&k), Some(&k));
        // Keys were pushed in ascending order, so `k` sat at depth len-1-k.
        prop_assert_eq!(compares.get(), len - k);

        for _ in 0..3 {
            compares.set(0);
            prop_assert_eq!(t.lookup(&k), Some(&k));
            prop_assert_eq!(compares.get(), 1);
        }
        prop_assert!(t.check_invariants().is_ok());
    }
}
