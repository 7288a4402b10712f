//! Cross-structure integration tests.
//!
//! Exercises the public API the way an application would: configuration
//! failures, capacity bounds under sustained load, expiry windows driven by
//! a manual clock, and routing stability across ring membership changes.

use evictkit::prelude::*;

#[test]
fn zero_parameters_are_rejected_consistently() {
    assert!(GenLruCache::<u32, u32>::try_new(0).is_err());
    assert!(RingBuffer::<u32>::try_new(0).is_err());
    assert!(ExpiringSet::<u32>::try_new(0).is_err());
    assert!(ExpiringArray::<u32>::try_new(0).is_err());
    assert!(HashRing::try_with_replicas(["a"], 0).is_err());

    // All configuration failures surface as the same error type.
    let err: ConfigError = GenLruCache::<u32, u32>::try_new(0).unwrap_err();
    assert!(!err.message().is_empty());
}

#[test]
fn lru_cache_never_exceeds_capacity_under_sustained_load() {
    let mut cache = GenLruCache::new(64);
    for i in 0u32..10_000 {
        cache.insert(i, i * 2);
        assert!(cache.len() <= 64);
        if i % 7 == 0 {
            cache.get(&i.saturating_sub(3));
        }
    }
    cache.debug_validate_invariants();
}

#[test]
fn lru_cache_recently_used_keys_survive_longer_than_idle_keys() {
    let mut cache = GenLruCache::new(8);
    let hot = "hot".to_owned();
    cache.insert(hot.clone(), 0u32);

    for i in 0u32..6 {
        cache.insert(format!("filler-{i}"), i);
        assert!(cache.get(&hot).is_some(), "touched key evicted at step {i}");
    }
}

#[test]
fn eviction_listener_observes_every_displaced_entry() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let evicted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&evicted);
    let mut cache = GenLruCache::try_with_listener(4, move |key: u32, value: u32| {
        sink.borrow_mut().push((key, value));
    })
    .unwrap();

    for i in 0u32..20 {
        cache.insert(i, i);
    }

    let evicted = evicted.borrow();
    // Everything not live was reported exactly once.
    assert_eq!(evicted.len() + cache.len(), 20);
    let mut seen: Vec<u32> = evicted.iter().map(|(k, _)| *k).collect();
    seen.extend(cache.keys().copied());
    seen.sort_unstable();
    assert_eq!(seen, (0..20).collect::<Vec<_>>());
}

#[test]
fn expiring_structures_agree_on_the_window_boundary() {
    let clock = ManualClock::new();
    let mut set = ExpiringSet::with_clock(1_000, clock.clone());
    let mut array = ExpiringArray::with_clock(1_000, clock.clone());

    set.insert("x");
    array.push("x");

    // At exactly the window edge both still report the entry.
    clock.set(1_000);
    assert!(set.contains(&"x"));
    assert_eq!(array.len(), 1);

    clock.set(1_001);
    assert!(!set.contains(&"x"));
    assert_eq!(array.len(), 0);
}

#[test]
fn ring_buffer_tracks_the_tail_of_an_event_stream() {
    let mut recent = RingBuffer::new(16);
    for i in 0u32..1_000 {
        recent.push(i);
    }

    assert_eq!(recent.len(), 16);
    assert_eq!(recent.to_vec(), (984..1_000).collect::<Vec<_>>());
    assert_eq!(recent.front(), Some(&984));
    assert_eq!(recent.back(), Some(&999));
    recent.debug_validate_invariants();
}

#[test]
fn hash_ring_rebalances_minimally_through_membership_churn() {
    let mut ring = HashRing::new(["a", "b", "c", "d"]);
    let keys: Vec<String> = (0..500).map(|i| format!("item-{i}")).collect();

    let before: Vec<String> = keys
        .iter()
        .map(|key| ring.get(key).unwrap().to_owned())
        .collect();

    ring.remove_server("c");
    for (key, owner) in keys.iter().zip(&before) {
        let after = ring.get(key).unwrap();
        if owner != "c" {
            assert_eq!(after, owner, "key {key} moved although its owner stayed");
        } else {
            assert_ne!(after, "c");
        }
    }

    ring.add_server("c");
    // Restoring the membership restores the original routing.
    for (key, owner) in keys.iter().zip(&before) {
        assert_eq!(ring.get(key), Some(owner.as_str()));
    }
    ring.debug_validate_invariants();
}

#[test]
fn cache_keyed_by_ring_assignment_round_trips() {
    // A small composition: route each key to a server, keep one cache per
    // server, and check that lookups come back from the same shard.
    let ring = HashRing::new(["s0", "s1", "s2"]);
    let mut shards: Vec<(String, GenLruCache<String, u32>)> = ring
        .servers()
        .iter()
        .map(|name| (name.clone(), GenLruCache::new(128)))
        .collect();

    for i in 0u32..100 {
        let key = format!("obj-{i}");
        let owner = ring.get(&key).unwrap().to_owned();
        let shard = shards.iter_mut().find(|(name, _)| *name == owner).unwrap();
        shard.1.insert(key, i);
    }

    for i in 0u32..100 {
        let key = format!("obj-{i}");
        let owner = ring.get(&key).unwrap().to_owned();
        let shard = shards.iter_mut().find(|(name, _)| *name == owner).unwrap();
        assert_eq!(shard.1.get(&key), Some(&i));
    }
}
