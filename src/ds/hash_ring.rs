//! Consistent hash ring mapping keys onto a changing set of servers.
//!
//! Each server is projected onto a 32-bit hash circle at `replicas` virtual
//! points; a key is routed to the server owning the first point at or after
//! the key's hash, wrapping past the top of the range. Adding or removing a
//! server only remaps the keys whose arcs that server's points covered.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          HashRing                                │
//!   │                                                                  │
//!   │   servers: Vec<String>            index_map: name → index        │
//!   │   continuum: Vec<ContinuumEntry>  sorted by hash, ascending      │
//!   │                                                                  │
//!   │               0x0000_0000                                        │
//!   │                    │  ◄─ wraparound target                       │
//!   │          ┌─────────┴─────────┐                                   │
//!   │        B#1                 A#0    each server appears at         │
//!   │          │     hash32       │     `replicas` points, hashed      │
//!   │        A#7     circle      B#4    from "{server}#{replica}"      │
//!   │          └─────────┬─────────┘                                   │
//!   │                    │                                             │
//!   │               0x8000_0000                                        │
//!   │                                                                  │
//!   │   get(key): binary-search the continuum for the first entry      │
//!   │   with hash ≥ hash32(key); past the end wraps to entry 0.        │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation       | Time           | Notes                            |
//! |-----------------|----------------|----------------------------------|
//! | `get`           | O(log v)       | v = servers × replicas           |
//! | `add_server`    | O(v log v)     | Full continuum rebuild           |
//! | `remove_server` | O(v log v)     | Full continuum rebuild           |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::ds::HashRing;
//!
//! let mut ring = HashRing::new(["cache-a", "cache-b", "cache-c"]);
//!
//! let owner = ring.get("user:42").unwrap().to_owned();
//! // Same key, same owner, as long as membership is unchanged.
//! assert_eq!(ring.get("user:42"), Some(owner.as_str()));
//!
//! ring.remove_server("cache-b");
//! assert_ne!(ring.get("user:42"), Some("cache-b"));
//! ```
//!
//! ## Implementation Notes
//!
//! Point placement hashes the vnode label with MD5 and takes the first four
//! digest bytes big-endian as a `u32`. MD5 is used purely for its uniform
//! spread over the circle; nothing here depends on it being collision
//! resistant. Ties between points from different servers are resolved by the
//! stable sort, which keeps insertion order among equal hashes.

use md5::{Digest, Md5};
use rustc_hash::FxHashMap;

use crate::error::ConfigError;

/// Default number of virtual points per server.
pub const DEFAULT_REPLICAS: usize = 100;

/// One virtual point on the hash circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuumEntry {
    /// Position on the 32-bit circle.
    pub hash: u32,
    /// Index into the ring's server list.
    pub server_idx: usize,
}

/// Consistent hash ring with a fixed number of virtual points per server.
#[derive(Debug, Clone)]
pub struct HashRing {
    servers: Vec<String>,
    index_map: FxHashMap<String, usize>,
    continuum: Vec<ContinuumEntry>,
    replicas: usize,
}

impl HashRing {
    /// Creates a ring over `servers` with [`DEFAULT_REPLICAS`] virtual
    /// points per server. Duplicate names are kept once.
    pub fn new<I, S>(servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match Self::try_with_replicas(servers, DEFAULT_REPLICAS) {
            Ok(ring) => ring,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a ring with an explicit virtual point count per server.
    ///
    /// # Panics
    ///
    /// Panics if `replicas` is zero. Use
    /// [`try_with_replicas`](Self::try_with_replicas) to handle invalid
    /// counts without panicking.
    pub fn with_replicas<I, S>(servers: I, replicas: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match Self::try_with_replicas(servers, replicas) {
            Ok(ring) => ring,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a ring with an explicit virtual point count per server.
    ///
    /// Returns a [`ConfigError`] if `replicas` is zero.
    pub fn try_with_replicas<I, S>(servers: I, replicas: usize) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if replicas == 0 {
            return Err(ConfigError::new("replicas must be greater than zero"));
        }
        let mut ring = Self {
            servers: Vec::new(),
            index_map: FxHashMap::default(),
            continuum: Vec::new(),
            replicas,
        };
        for server in servers {
            let server = server.into();
            if !ring.index_map.contains_key(&server) {
                ring.index_map.insert(server.clone(), ring.servers.len());
                ring.servers.push(server);
            }
        }
        ring.rebuild_continuum();
        Ok(ring)
    }

    /// Returns the server names in insertion order.
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Returns the configured virtual point count per server.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Returns the number of servers on the ring.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Returns `true` if the ring has no servers.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Returns a copy of the sorted continuum. Mutating the copy has no
    /// effect on routing.
    pub fn continuum(&self) -> Vec<ContinuumEntry> {
        self.continuum.clone()
    }

    /// Routes `key` to its owning server, or `None` if the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.continuum.is_empty() {
            return None;
        }
        let key_hash = hash32(key);
        let idx = self.continuum.partition_point(|entry| entry.hash < key_hash);
        let entry = if idx == self.continuum.len() {
            self.continuum[0]
        } else {
            self.continuum[idx]
        };
        Some(&self.servers[entry.server_idx])
    }

    /// Adds `server` and rebuilds the continuum. Returns `false` without
    /// changing anything if the server is already present.
    pub fn add_server(&mut self, server: impl Into<String>) -> bool {
        let server = server.into();
        if self.index_map.contains_key(&server) {
            return false;
        }
        self.index_map.insert(server.clone(), self.servers.len());
        self.servers.push(server);
        self.rebuild_continuum();
        true
    }

    /// Removes `server` and rebuilds the continuum. Returns `false` without
    /// changing anything if the server is not present.
    pub fn remove_server(&mut self, server: &str) -> bool {
        let Some(idx) = self.index_map.remove(server) else {
            return false;
        };
        self.servers.remove(idx);
        // Indices after the removed slot all shifted down by one.
        self.index_map.clear();
        for (i, name) in self.servers.iter().enumerate() {
            self.index_map.insert(name.clone(), i);
        }
        self.rebuild_continuum();
        true
    }

    fn rebuild_continuum(&mut self) {
        self.continuum.clear();
        self.continuum.reserve(self.servers.len() * self.replicas);
        for (server_idx, server) in self.servers.iter().enumerate() {
            for replica in 0..self.replicas {
                self.continuum.push(ContinuumEntry {
                    hash: hash32(&format!("{server}#{replica}")),
                    server_idx,
                });
            }
        }
        // Stable: equal hashes keep server insertion order.
        self.continuum.sort_by_key(|entry| entry.hash);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.continuum.len(), self.servers.len() * self.replicas);
        assert!(self.continuum.is_sorted_by_key(|entry| entry.hash));
        for entry in &self.continuum {
            assert!(entry.server_idx < self.servers.len());
        }
        for (name, &idx) in &self.index_map {
            assert_eq!(self.servers[idx], *name);
        }
        assert_eq!(self.index_map.len(), self.servers.len());
    }
}

/// First four MD5 digest bytes of `input`, big-endian.
fn hash32(input: &str) -> u32 {
    let digest = Md5::digest(input.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}
