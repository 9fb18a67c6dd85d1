use alloc::vec::Vec;

use hashbrown::HashMap;
use proptest::prelude::*;

use crate::Error;
use crate::ProbeTable;
use crate::Validity;

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u32),
    Get(Vec<u8>),
    Remove(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet keeps collisions and repeated keys frequent.
    prop::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(0u8)], 0..5)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    prop::collection::vec(
        prop_oneof![
            3 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => key.clone().prop_map(Op::Get),
            2 => key.prop_map(Op::Remove),
        ],
        0..300,
    )
}

fn config_strategy() -> impl Strategy<Value = (usize, &'static str, &'static str, &'static str)> {
    (
        1usize..40,
        prop_oneof![Just("linear"), Just("quadratic"), Just("double")],
        prop_oneof![Just("sum"), Just("length"), Just("weighted")],
        prop_oneof![Just("sum"), Just("length"), Just("weighted")],
    )
}

fn validate<V>(t: &ProbeTable<V>) {
    let live = t
        .slots()
        .iter()
        .filter(|s| s.validity() == Validity::Used)
        .count();
    assert_eq!(live, t.len());
    assert!(t.len() <= t.capacity());

    let mut seen = hashbrown::HashSet::new();
    for (key, _) in t.iter() {
        assert!(seen.insert(key), "duplicate live key {key:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_model(
        (capacity, probe, hash, secondary) in config_strategy(),
        ops in ops_strategy(),
    ) {
        let mut table = ProbeTable::new(capacity, probe, hash, secondary).unwrap();
        let mut model: HashMap<Vec<u8>, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => match table.insert(&k, v) {
                    Ok(index) => {
                        prop_assert!(index < table.capacity());
                        prop_assert!(model.insert(k, v).is_none());
                    }
                    Err(Error::DuplicateKey) => prop_assert!(model.contains_key(&k)),
                    Err(Error::CapacityExhausted) => {
                        prop_assert!(table.len() == table.capacity() || !model.contains_key(&k))
                    }
                    Err(e) => prop_assert!(false, "unexpected error {e:?}"),
                },
                Op::Get(k) => {
                    prop_assert_eq!(table.contains_key(&k), model.contains_key(&k));
                    prop_assert_eq!(table.get(&k).ok(), model.get(&k));
                }
                Op::Remove(k) => prop_assert_eq!(table.remove(&k).ok(), model.remove(&k)),
            }
        }

        prop_assert_eq!(table.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(table.get(k), Ok(v));
        }
        validate(&table);
    }

    #[test]
    fn prop_reinsert_after_remove(
        (capacity, probe, hash, secondary) in config_strategy(),
        keys in prop::collection::vec(key_strategy(), 1..20),
    ) {
        let mut table = ProbeTable::new(capacity, probe, hash, secondary).unwrap();
        let mut placed = Vec::new();
        for k in keys {
            if table.insert(&k, 1u8).is_ok() {
                placed.push(k);
            }
        }

        for k in &placed {
            prop_assert_eq!(table.remove(k), Ok(1));
            prop_assert_eq!(table.get(k), Err(Error::NotFound));
            prop_assert!(table.insert(k, 2).is_ok());
            prop_assert_eq!(table.get(k), Ok(&2));
        }
        validate(&table);
    }
}

#[test]
fn cost_counters_only_grow() {
    let mut table = ProbeTable::new(17, "quadratic", "length", "sum").unwrap();
    let mut last = table.costs();
    for i in 0..40u32 {
        let key = i.to_le_bytes();
        let _ = table.insert(&key[..(i as usize % 4) + 1], i);
        let _ = table.get(&key);
        let _ = table.remove(&key[..1]);

        let now = table.costs();
        assert!(now.insert >= last.insert);
        assert!(now.search >= last.search);
        assert!(now.delete >= last.delete);
        last = now;
    }
}
