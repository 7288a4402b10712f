//! Example demonstrating the generational LRU cache.
//!
//! The cache keeps two insertion cohorts. New and touched entries live in
//! the current generation; once it fills, the whole previous generation is
//! evicted and the current one takes its place. Accessing an entry pulls it
//! into the current generation, so anything used recently survives the next
//! rotation.
//!
//! Run with: cargo run --example basic_gen_lru

use evictkit::policy::GenLruCache;

fn main() {
    println!("=== Generational LRU Cache Example ===\n");

    // Capacity 6 means two generations of 3 insertions each.
    let mut cache = GenLruCache::new(6);
    println!("Created cache: capacity={}\n", cache.capacity());

    for i in 1..=3 {
        cache.insert(i, format!("value-{}", i));
    }
    println!("Inserted keys 1-3 (fills the current generation)");
    println!("  len: {}", cache.len());

    for i in 4..=6 {
        cache.insert(i, format!("value-{}", i));
    }
    println!("Inserted keys 4-6 (keys 1-3 rotate into the previous generation)");
    println!("  len: {}", cache.len());

    // Touch key 1: it is pulled out of the previous generation, and the
    // rotation this triggers drops the idle keys 2 and 3.
    cache.get(&1);
    println!("\nAccessed key 1 (promoted into the newest cohort)");
    println!("  contains 1? {} (recently touched)", cache.contains(&1));
    println!("  contains 2? {} (idle, rotated out)", cache.contains(&2));
    println!("  len: {}", cache.len());

    // Watch evictions as they happen.
    println!("\n=== Eviction Listener Demo ===\n");

    let mut cache = GenLruCache::try_with_listener(4, |key: u32, value: String| {
        println!("  evicted: {} => {}", key, value);
    })
    .expect("capacity is non-zero");

    println!("Inserting keys 1-8 into a capacity-4 cache...");
    for i in 1..=8 {
        cache.insert(i, format!("value-{}", i));
    }
    println!("  live keys: {:?}", {
        let mut keys: Vec<_> = cache.keys().copied().collect();
        keys.sort_unstable();
        keys
    });

    println!("\nKey properties:");
    println!("  • Insertions and promotions land in the current generation");
    println!("  • A full current generation evicts the previous one wholesale");
    println!("  • Idle entries survive at most two rotations");
}
