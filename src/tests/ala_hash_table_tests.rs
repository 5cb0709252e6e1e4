// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Scenario tests for the Ala Hash Table.

use mockall::predicate::eq;
use test_case::test_case;

use crate::data_structures::ala_hash_table::{
    is_prime, start_index, AlaHashTable, AlaHashTableError, Key, MockProbeObserver, ProbeEvent,
    ProbingMode, SlotOutcome, MAX_LOAD_FACTOR, MIN_CAPACITY,
};
use crate::tests::{colliding_int_keys, RecordingObserver};

/// Keys "A" through "K".
fn letter_keys() -> Vec<String> {
    ('A'..='K').map(|c| c.to_string()).collect()
}

#[test_case(ProbingMode::Linear ; "linear")]
#[test_case(ProbingMode::Double ; "double")]
fn test_grows_before_eighth_insert(mode: ProbingMode) {
    let mut table = AlaHashTable::with_probing_mode(mode);
    let keys = letter_keys();

    for (i, key) in keys.iter().enumerate() {
        table.put(key.clone(), i).unwrap();
        let expected_capacity = if i < 7 { 11 } else { 23 };
        assert_eq!(table.capacity(), expected_capacity, "after inserting {key}");
    }

    for (i, key) in keys.iter().enumerate() {
        assert_eq!(table.get(key.as_str()), Ok(&i), "missing {key} after growth");
    }
    assert_eq!(table.len(), 11);
}

#[test]
fn test_growth_events() {
    let (observer, events) = RecordingObserver::new();
    let mut table = AlaHashTable::new().with_observer(Box::new(observer));

    for key in letter_keys().into_iter().take(8) {
        table.put(key, ()).unwrap();
    }

    let resizes: Vec<ProbeEvent> = events
        .borrow()
        .iter()
        .copied()
        .filter(|event| {
            matches!(
                event,
                ProbeEvent::ResizeStarted { .. } | ProbeEvent::ResizeCompleted { .. }
            )
        })
        .collect();
    assert_eq!(
        resizes,
        vec![
            ProbeEvent::ResizeStarted {
                from: 11,
                to: 23,
                entries: 7
            },
            ProbeEvent::ResizeCompleted {
                capacity: 23,
                count: 7
            },
        ]
    );
}

#[test_case(ProbingMode::Linear ; "linear")]
#[test_case(ProbingMode::Double ; "double")]
fn test_tombstone_transparency(mode: ProbingMode) {
    let mut table = AlaHashTable::with_probing_mode(mode);
    let keys = colliding_int_keys(11, 3);
    assert!(keys.iter().all(|key| start_index(key, 11) == start_index(&keys[0], 11)));

    for key in &keys {
        table.put(*key, key * 2).unwrap();
    }
    assert_eq!(table.remove(&keys[0]), Ok(keys[0] * 2));

    // Lookups must walk past the tombstone left by the first key
    assert_eq!(table.get(&keys[1]), Ok(&(keys[1] * 2)));
    assert_eq!(table.get(&keys[2]), Ok(&(keys[2] * 2)));
    assert!(!table.has_key(&keys[0]));
    assert_eq!(table.tombstone_count(), 1);
}

#[test]
fn test_double_hashing_separates_colliding_keys() {
    let mut table = AlaHashTable::with_probing_mode(ProbingMode::Double);
    let (observer, events) = RecordingObserver::new();
    table.set_observer(Some(Box::new(observer)));

    let keys = colliding_int_keys(11, 2);
    table.put(keys[0], "first").unwrap();
    table.put(keys[1], "second").unwrap();

    let resolved: Vec<usize> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            ProbeEvent::SlotResolved {
                index,
                outcome: SlotOutcome::Vacant,
                ..
            } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(resolved.len(), 2);
    assert_ne!(resolved[0], resolved[1]);

    assert_eq!(table.get(&keys[0]), Ok(&"first"));
    assert_eq!(table.get(&keys[1]), Ok(&"second"));
}

#[test]
fn test_deletion_contract() {
    let mut table = AlaHashTable::new();
    table.put("k".to_string(), 10).unwrap();

    assert_eq!(table.remove("k"), Ok(10));
    assert!(!table.has_key("k"));
    assert_eq!(
        table.get("k"),
        Err(AlaHashTableError::KeyNotFound("\"k\"".to_string()))
    );
    assert!(table.is_empty());
}

#[test_case(ProbingMode::Linear ; "linear")]
#[test_case(ProbingMode::Double ; "double")]
fn test_load_factor_bound_during_growth(mode: ProbingMode) {
    let mut table = AlaHashTable::with_probing_mode(mode);
    for i in 0..2_000i64 {
        table.put(i * 7 - 1_000, i).unwrap();
        assert!(table.load_factor() <= MAX_LOAD_FACTOR);
        assert!(is_prime(table.capacity()));
    }
    assert_eq!(table.len(), 2_000);
}

#[test]
fn test_shrink_bound() {
    let mut table = AlaHashTable::new();
    for i in 0..200i64 {
        table.put(i, ()).unwrap();
    }
    let grown = table.capacity();
    assert!(grown > MIN_CAPACITY);

    for i in 0..200i64 {
        let before = table.capacity();
        table.remove(&i).unwrap();
        let after = table.capacity();

        assert!(after >= MIN_CAPACITY);
        assert!(is_prime(after));
        if after != before {
            assert!(after < before);
            assert!((table.len() as f64 / before as f64) < 0.2);
        }
    }
    assert_eq!(table.capacity(), MIN_CAPACITY);
    assert!(table.is_empty());
}

#[test]
fn test_same_mode_twice_resizes_once() {
    let mut observer = MockProbeObserver::new();
    observer
        .expect_observe()
        .with(eq(ProbeEvent::ResizeStarted {
            from: 11,
            to: 11,
            entries: 0,
        }))
        .times(1)
        .return_const(());
    observer
        .expect_observe()
        .with(eq(ProbeEvent::ResizeCompleted {
            capacity: 11,
            count: 0,
        }))
        .times(1)
        .return_const(());

    let mut table: AlaHashTable<String, u8> = AlaHashTable::new().with_observer(Box::new(observer));
    table.set_probing_mode(ProbingMode::Double).unwrap();
    table.set_probing_mode(ProbingMode::Double).unwrap();
    assert_eq!(table.probing_mode(), ProbingMode::Double);
}

#[test]
fn test_mode_switch_keeps_entries() {
    let mut table = AlaHashTable::new();
    for key in letter_keys() {
        table.put(key.clone(), key.len()).unwrap();
    }
    let capacity = table.capacity();

    table.set_probing_mode(ProbingMode::Double).unwrap();
    assert_eq!(table.capacity(), capacity);
    for key in letter_keys() {
        assert!(table.has_key(key.as_str()));
    }

    table.set_probing_mode(ProbingMode::Linear).unwrap();
    assert_eq!(table.len(), 11);
}

#[test_case(ProbingMode::Linear ; "linear")]
#[test_case(ProbingMode::Double ; "double")]
fn test_churn_without_free_slots(mode: ProbingMode) {
    let mut table = AlaHashTable::with_probing_mode(mode);
    let mut live: Vec<i64> = (0..7).collect();
    for key in &live {
        table.put(*key, *key).unwrap();
    }

    // Replace entries one at a time; tombstones pile up at the minimum capacity
    for next in 7..500i64 {
        let oldest = live.remove(0);
        assert_eq!(table.remove(&oldest), Ok(oldest));
        table.put(next, next).unwrap();
        live.push(next);

        assert_eq!(table.capacity(), MIN_CAPACITY);
        assert!(!table.has_key(&oldest));
    }

    assert_eq!(table.len(), 7);
    for key in &live {
        assert_eq!(table.get(key), Ok(key));
    }
    assert!(!table.has_key(&-1i64));
}

#[test]
fn test_negative_and_extreme_integer_keys() {
    let mut table = AlaHashTable::new();
    for key in [i64::MIN, i64::MAX, -1, 0, 1, -11, 11] {
        table.put(key, key.to_string()).unwrap();
    }
    assert_eq!(table.len(), 7);
    assert_eq!(table.get(&i64::MIN), Ok(&i64::MIN.to_string()));
    assert_eq!(table.get(&-11i64), Ok(&"-11".to_string()));
    assert_eq!(table.get(&11i64), Ok(&"11".to_string()));
}

#[test]
fn test_mixed_dynamic_keys() {
    let mut table = AlaHashTable::new();
    for i in 0..50i64 {
        table.put(Key::Int(i), i).unwrap();
        table.put(Key::Str(i.to_string()), -i).unwrap();
    }
    assert_eq!(table.len(), 100);
    assert_eq!(table.get(&Key::Int(42)), Ok(&42));
    assert_eq!(table.get(&Key::from("42")), Ok(&-42));
}

#[test]
fn test_snapshots_agree_with_iteration() {
    let mut table = AlaHashTable::new();
    for (i, key) in letter_keys().into_iter().enumerate() {
        table.put(key, i).unwrap();
    }
    table.remove("C").unwrap();

    let keys = table.keys();
    let values = table.values();
    let items = table.items();

    assert_eq!(keys.len(), table.len());
    assert_eq!(keys, items.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>());
    assert_eq!(values, items.iter().map(|(_, v)| *v).collect::<Vec<_>>());
    assert!(!keys.contains(&"C".to_string()));

    let lazy: Vec<&String> = table.key_iter().collect();
    assert_eq!(lazy.len(), keys.len());
    assert_eq!(table.value_iter().count(), values.len());
}

#[test]
fn test_set_debug_installs_tracing() {
    let mut table = AlaHashTable::new();
    table.set_debug(true);
    for key in colliding_int_keys(11, 4) {
        table.put(key, ()).unwrap();
    }
    table.remove(&3i64).unwrap();
    assert!(!table.has_key(&3i64));
    table.set_debug(false);
    assert!(format!("{table:?}").contains("observed: false"));
}
