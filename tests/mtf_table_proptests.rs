use mtf_table::MtfTable;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8),
    Lookup(u8),
    Remove(u8),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => (0u8..8).prop_map(Op::Insert),
        3 => (0u8..8).prop_map(Op::Lookup),
        1 => (0u8..8).prop_map(Op::Remove),
    ];
    proptest::collection::vec(op, 0..100)
}

// Property: every inserted key and value reaches its hook exactly once,
// either through remove or when the table is dropped; nothing is released
// early and lookups see exactly the keys still stored.
// Values carry a unique serial number so double or missed releases show up.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_each_entry_released_once(ops in arb_ops()) {
        let released_keys = Mutex::new(Vec::new());
        let released_values = Mutex::new(Vec::new());
        let mut t: MtfTable<u8, u32> = MtfTable::new();
        t.set_key_destructor(|k| released_keys.lock().unwrap().push(k));
        t.set_value_destructor(|v| released_values.lock().unwrap().push(v));

        let mut live: HashMap<u8, usize> = HashMap::new();
        let mut serial = 0u32;
        for op in ops {
            match op {
                Op::Insert(k) => {
                    t.insert(k, serial).unwrap();
                    serial += 1;
                    *live.entry(k).or_default() += 1;
                }
                Op::Lookup(k) => {
                    prop_assert_eq!(t.lookup(&k).is_some(), live.contains_key(&k));
                }
                Op::Remove(k) => {
                    let expected = live.remove(&k).unwrap_or(0);
                    let before = released_keys.lock().unwrap().len();
                    prop_assert_eq!(t.remove(&k), expected);
                    let after = released_keys.lock().unwrap().len();
                    prop_assert_eq!(after - before, expected);
                    prop_assert!(released_keys.lock().unwrap()[before..].iter().all(|&x| x == k));
                }
            }
            prop_assert_eq!(t.len(), live.values().sum::<usize>());
            prop_assert_eq!(released_values.lock().unwrap().len(), released_keys.lock().unwrap().len());
        }

        drop(t);
        let mut values = released_values.lock().unwrap().clone();
        values.sort_unstable();
        let all: Vec<u32> = (0..serial).collect();
        prop_assert_eq!(values, all);
        prop_assert_eq!(released_keys.lock().unwrap().len(), serial as usize);
    }
}
