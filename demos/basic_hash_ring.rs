//! Example demonstrating consistent hashing with the hash ring.
//!
//! Keys are routed to servers through virtual points on a 32-bit hash
//! circle. Adding or removing a server only remaps the keys whose points it
//! owned, so the rest of the fleet keeps its assignments.
//!
//! Run with: cargo run --example basic_hash_ring

use evictkit::ds::HashRing;

fn main() {
    println!("=== Hash Ring Example ===\n");

    let mut ring = HashRing::new(["cache-a", "cache-b", "cache-c"]);
    println!(
        "Created ring: {} servers x {} replicas = {} points\n",
        ring.len(),
        ring.replicas(),
        ring.continuum().len()
    );

    let keys: Vec<String> = (0..12).map(|i| format!("user:{}", i)).collect();
    println!("Initial assignments:");
    for key in &keys {
        println!("  {} -> {}", key, ring.get(key).unwrap());
    }

    // Count how the load spreads over a larger key set.
    let mut counts = std::collections::HashMap::new();
    for i in 0..10_000 {
        let server = ring.get(&format!("object:{}", i)).unwrap();
        *counts.entry(server.to_owned()).or_insert(0u32) += 1;
    }
    println!("\nLoad over 10,000 keys:");
    let mut servers: Vec<_> = counts.iter().collect();
    servers.sort();
    for (server, count) in servers {
        println!("  {}: {}", server, count);
    }

    // Remove a server and measure how many keys moved.
    println!("\n=== Removing cache-b ===\n");
    let before: Vec<String> = keys
        .iter()
        .map(|key| ring.get(key).unwrap().to_owned())
        .collect();
    ring.remove_server("cache-b");

    let mut moved = 0;
    for (key, owner) in keys.iter().zip(&before) {
        let after = ring.get(key).unwrap();
        let marker = if after == owner { " " } else { "*" };
        if after != owner {
            moved += 1;
        }
        println!("  {}{} -> {}", marker, key, after);
    }
    println!(
        "\n{} of {} keys moved (only the ones cache-b owned)",
        moved,
        keys.len()
    );

    println!("\nKey properties:");
    println!("  • Same key, same server, as long as membership is unchanged");
    println!("  • Membership changes remap only the affected arc of the circle");
    println!("  • More replicas smooth the load spread between servers");
}
