//! Deterministic world generation.
//!
//! Every decision about the world (whether a cell holds a cache, how many
//! coins it starts with) comes from hashing a string key. The same key always
//! produces the same value, so a world can be regenerated cell by cell in any
//! order and still come out identical.

use std::fmt;
use std::io::Cursor;

use crate::board::Cell;

const INITIAL_VALUE_TAG: &str = "initialValue";
const HASH_RANGE: f64 = 4_294_967_296.0;

/// Source of reproducible pseudo-random values in `[0, 1)`.
pub trait SpawnOracle: Send + Sync {
    fn luck(&self, key: &str) -> f64;
}

/// The default oracle, MurmurHash3 (x86, 32 bit, seed 0) scaled into `[0, 1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Murmur3Luck;

impl SpawnOracle for Murmur3Luck {
    fn luck(&self, key: &str) -> f64 {
        luck(key)
    }
}

impl<F: Fn(&str) -> f64 + Send + Sync> SpawnOracle for F {
    fn luck(&self, key: &str) -> f64 {
        self(key)
    }
}

pub fn luck(key: &str) -> f64 {
    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_32(&mut Cursor::new(key.as_bytes()), 0).unwrap_or(0);
    f64::from(hash) / HASH_RANGE
}

/// Key deciding whether a cache exists at `cell`.
pub fn cache_key(cell: Cell) -> String {
    cell.to_string()
}

/// Key deciding how many coins a cache at `cell` starts with.
pub fn initial_value_key(cell: Cell) -> String {
    format!("{cell},{INITIAL_VALUE_TAG}")
}

/// Tunable rules turning oracle values into spawn decisions.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPolicy {
    cache_spawn_probability: f64,
    coin_thresholds: Vec<u32>,
}

impl SpawnPolicy {
    pub fn new(cache_spawn_probability: f64, coin_thresholds: Vec<u32>) -> Self {
        SpawnPolicy {
            cache_spawn_probability,
            coin_thresholds,
        }
    }

    pub fn cache_spawn_probability(&self) -> f64 {
        self.cache_spawn_probability
    }

    pub fn coin_thresholds(&self) -> &[u32] {
        &self.coin_thresholds
    }

    /// A cell holds a cache iff its luck is below the spawn probability.
    pub fn has_cache(&self, oracle: &dyn SpawnOracle, cell: Cell) -> bool {
        oracle.luck(&cache_key(cell)) < self.cache_spawn_probability
    }

    /// Integer percentage in `[0, 100)` rolled for the cache at `cell`.
    pub fn point_value(&self, oracle: &dyn SpawnOracle, cell: Cell) -> u32 {
        let value = (oracle.luck(&initial_value_key(cell)) * 100.0).floor();
        value.clamp(0.0, 99.0) as u32
    }

    /// Number of thresholds in the ladder that `point_value` strictly exceeds.
    pub fn coin_count_for(&self, point_value: u32) -> usize {
        self.coin_thresholds
            .iter()
            .filter(|threshold| point_value > **threshold)
            .count()
    }

    pub fn initial_coin_count(&self, oracle: &dyn SpawnOracle, cell: Cell) -> usize {
        let point_value = self.point_value(oracle, cell);
        let count = self.coin_count_for(point_value);
        log::trace!("Cell [{cell}] rolled point value {point_value} for {count} coins");
        count
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::new(0.1, vec![0, 33, 66])
    }
}

/// An oracle paired with the policy that interprets it.
pub struct Spawner {
    oracle: Box<dyn SpawnOracle>,
    policy: SpawnPolicy,
}

impl Spawner {
    pub fn new<O: SpawnOracle + 'static>(oracle: O, policy: SpawnPolicy) -> Self {
        Spawner {
            oracle: Box::new(oracle),
            policy,
        }
    }

    pub fn policy(&self) -> &SpawnPolicy {
        &self.policy
    }

    pub fn has_cache(&self, cell: Cell) -> bool {
        self.policy.has_cache(self.oracle.as_ref(), cell)
    }

    pub fn initial_coin_count(&self, cell: Cell) -> usize {
        self.policy.initial_coin_count(self.oracle.as_ref(), cell)
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
