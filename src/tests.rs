//! Integration tests for shifttable

use std::collections::{HashMap, HashSet};

use crate::observer::ProbeObserver;
use crate::probe::ProbeSeq;
use crate::strategy::{KeyEq, KeyHasher};
use crate::table::ShiftTable;
use crate::TableConfig;

/// Assert reachability, key uniqueness and the size count
fn check_invariants<H, C, O>(table: &ShiftTable<H, C, O>)
where
    H: KeyHasher,
    C: KeyEq,
    O: ProbeObserver,
{
    let capacity = table.capacity();
    assert!(capacity.is_power_of_two());
    assert_eq!(table.iter().count(), table.len());

    let mut seen = HashSet::new();
    for (idx, item) in table.iter() {
        assert!(seen.insert(item.key().to_vec()), "duplicate key at slot {idx}");

        let hash = table.hasher().hash(item.key());
        for probe in ProbeSeq::new(hash, capacity) {
            if probe == idx {
                break;
            }
            assert!(
                table.slot(probe).is_some(),
                "slot {idx} unreachable: empty slot {probe} on its probe path"
            );
        }
    }
}

fn check_matches_model<H, C, O>(table: &ShiftTable<H, C, O>, model: &HashMap<Vec<u8>, Vec<u8>>)
where
    H: KeyHasher,
    C: KeyEq,
    O: ProbeObserver,
{
    assert_eq!(table.len(), model.len());
    for (key, value) in model {
        let item = table.get(key).expect("key from model missing");
        assert_eq!(item.key(), key.as_slice());
        assert_eq!(item.value(), value.as_slice());
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::strategy::{ByteHash, BytesEq, FastHash};
    use crate::table::grow_threshold;
    use crate::Counters;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn always_collide(_: &[u8]) -> u64 {
        0
    }

    fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
        (0..len).map(|_| rng.gen_range(1..=255u8)).collect()
    }

    fn torture<H: KeyHasher>(hasher: H, size: usize, rounds: usize) {
        let config = TableConfig::new().initial_capacity(1024);
        let mut table = ShiftTable::with_observer(hasher, BytesEq, config, Counters::new()).unwrap();
        let mut model = HashMap::new();
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..rounds {
            let key = random_bytes(&mut rng, size);
            let value = random_bytes(&mut rng, size);

            let idx = table.put(&key, &value).unwrap();
            assert!(idx < table.capacity());
            let stored = table.slot(idx).unwrap();
            assert_eq!(stored.key(), key.as_slice());
            assert_eq!(stored.value(), value.as_slice());

            let item = table.get(&key).unwrap();
            assert_eq!(item.key_len(), size);
            assert_eq!(item.value_len(), size);
            assert_eq!(item.value(), value.as_slice());

            model.insert(key, value);
        }

        check_invariants(&table);
        check_matches_model(&table, &model);
    }

    #[test]
    fn test_torture_low_collision_rate() {
        torture(FastHash, 4096, 1000);
    }

    #[test]
    fn test_torture_medium_collision_rate() {
        torture(FastHash, 256, 10_000);
    }

    #[test]
    fn test_torture_high_collision_rate() {
        // two-byte keys repeat often, exercising overwrites
        torture(FastHash, 2, 10_000);
    }

    #[test]
    fn test_torture_weak_hash() {
        torture(ByteHash, 2, 2000);
    }

    #[test]
    fn test_fuzz_sequence() {
        let inputs: [&[u8]; 4] = [b"", b"\0", b"some bytes", &[0xFF; 300]];

        for data in inputs {
            let config = TableConfig::new().initial_capacity(16);
            let mut table = ShiftTable::with_config(FastHash, BytesEq, config).unwrap();

            table.put(data, data).unwrap();
            assert_eq!(table.get(data).unwrap().value(), data);

            let capacity = table.capacity();
            table.grow().unwrap();
            assert!(table.capacity() > capacity);
            assert_eq!(table.len(), 1);

            assert!(table.delete(data));
            assert!(table.get(data).is_none());
            assert!(!table.delete(data));
            assert!(table.get(data).is_none());

            table.put(data, data).unwrap();
            table.put(data, data).unwrap();
            assert_eq!(table.len(), 1);
            assert_eq!(table.get(data).unwrap().key(), data);
        }
    }

    #[test]
    fn test_growth_at_boundary_then_delete() {
        let config = TableConfig::new().initial_capacity(8);
        let mut table = ShiftTable::with_config(always_collide, BytesEq, config).unwrap();
        let threshold = grow_threshold(table.capacity());

        for i in 0..threshold as u8 {
            table.put(&[i], &[i]).unwrap();
        }
        assert_eq!(table.capacity(), 8);

        // the delete opens a gap, so the next put stays below the threshold
        assert!(table.delete(&[0]));
        check_invariants(&table);
        table.put(&[100], b"x").unwrap();
        assert_eq!(table.capacity(), 8);

        // now at the threshold again; this put grows first
        table.put(&[101], b"y").unwrap();
        assert_eq!(table.capacity(), 16);
        check_invariants(&table);

        for i in 1..threshold as u8 {
            assert!(table.delete(&[i]));
            check_invariants(&table);
        }
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&[100]).unwrap().value(), b"x");
        assert_eq!(table.get(&[101]).unwrap().value(), b"y");
    }

    #[test]
    fn test_interleaved_growth_and_deletes() {
        let config = TableConfig::new().initial_capacity(4);
        let mut table = ShiftTable::with_config(ByteHash, BytesEq, config).unwrap();
        let mut model = HashMap::new();

        for i in 0u16..500 {
            let key = i.to_le_bytes().to_vec();
            table.put(&key, &key).unwrap();
            model.insert(key, i.to_le_bytes().to_vec());

            if i % 3 == 0 {
                let victim = (i / 2).to_le_bytes().to_vec();
                assert_eq!(table.delete(&victim), model.remove(&victim).is_some());
            }
            check_invariants(&table);
        }

        check_matches_model(&table, &model);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::strategy::{ByteHash, BytesEq, FastHash};
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Put(Vec<u8>, Vec<u8>),
        Get(Vec<u8>),
        Delete(Vec<u8>),
        Grow,
    }

    fn key() -> impl Strategy<Value = Vec<u8>> {
        // a small alphabet keeps keys repeating
        proptest::collection::vec(0u8..4, 0..4)
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (key(), proptest::collection::vec(any::<u8>(), 0..8))
                .prop_map(|(k, v)| Op::Put(k, v)),
            2 => key().prop_map(Op::Get),
            3 => key().prop_map(Op::Delete),
            1 => Just(Op::Grow),
        ]
    }

    fn run<H: KeyHasher>(hasher: H, ops: &[Op]) {
        let config = TableConfig::new().initial_capacity(4);
        let mut table = ShiftTable::with_config(hasher, BytesEq, config).unwrap();
        let mut model: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let idx = table.put(k, v).unwrap();
                    assert_eq!(table.slot(idx).map(|item| item.value()), Some(v.as_slice()));
                    model.insert(k.clone(), v.clone());
                }
                Op::Get(k) => {
                    let got = table.get(k).map(|item| item.value().to_vec());
                    assert_eq!(got.as_ref(), model.get(k));
                }
                Op::Delete(k) => {
                    let before = table.len();
                    let removed = table.delete(k);
                    assert_eq!(removed, model.remove(k).is_some());
                    assert_eq!(table.len(), before - usize::from(removed));
                    assert!(table.get(k).is_none());
                }
                Op::Grow => {
                    let capacity = table.capacity();
                    table.grow().unwrap();
                    assert_eq!(table.capacity(), capacity * 2);
                }
            }
            check_invariants(&table);
            check_matches_model(&table, &model);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: if cfg!(miri) { 8 } else { 128 },
            .. ProptestConfig::default()
        })]

        #[test]
        fn proptest_matches_hashmap(ops in proptest::collection::vec(op(), 0..64)) {
            run(FastHash, &ops);
        }

        #[test]
        fn proptest_matches_hashmap_weak_hash(ops in proptest::collection::vec(op(), 0..64)) {
            run(ByteHash, &ops);
        }

        #[test]
        fn proptest_matches_hashmap_constant_hash(ops in proptest::collection::vec(op(), 0..64)) {
            run(|_: &[u8]| 3u64, &ops);
        }
    }
}
