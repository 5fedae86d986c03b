use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::luck::Spawner;
use crate::prelude::HashMap;
use crate::LedgerError;

/// A coin token. Its identity is where it was minted and its serial there,
/// which never changes as it moves between caches and the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Coin {
    origin: Cell,
    serial: u32,
}

impl Coin {
    pub(crate) fn mint(origin: Cell, serial: u32) -> Self {
        Coin { origin, serial }
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.origin.i, self.origin.j, self.serial)
    }
}

/// Per-cell stacks of resident coins. The end of each stack is its top.
#[derive(Debug, Default)]
pub struct CacheLedger {
    caches: HashMap<Cell, Vec<Coin>>,
    minted: usize,
}

impl CacheLedger {
    pub fn new() -> Self {
        CacheLedger::default()
    }

    /// Contents of the cache at `cell`, spawning them on the first call.
    ///
    /// Later calls never re-roll or refill the cache, they only report what is
    /// currently there.
    pub fn materialize(&mut self, cell: Cell, spawner: &Spawner) -> &[Coin] {
        let minted = &mut self.minted;
        self.caches.entry(cell).or_insert_with(|| {
            let count = spawner.initial_coin_count(cell);
            log::debug!("Spawning cache at [{cell}] with {count} coins");
            *minted += count;
            (1..=count as u32)
                .map(|serial| Coin::mint(cell, serial))
                .collect()
        })
    }

    pub fn has_cache(&self, cell: Cell) -> bool {
        self.caches.contains_key(&cell)
    }

    pub fn coins_at(&self, cell: Cell) -> Option<&[Coin]> {
        self.caches.get(&cell).map(Vec::as_slice)
    }

    /// Coins currently resident across all caches.
    pub fn total_coins(&self) -> usize {
        self.caches.values().map(Vec::len).sum()
    }

    /// Coins ever minted by this ledger.
    pub fn total_minted(&self) -> usize {
        self.minted
    }

    pub fn cache_count(&self) -> usize {
        self.caches.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.caches.keys().copied()
    }

    pub(crate) fn take(&mut self, cell: Cell) -> Result<Coin, LedgerError> {
        self.caches
            .get_mut(&cell)
            .ok_or(LedgerError::UnknownCell(cell))?
            .pop()
            .ok_or(LedgerError::EmptyCache(cell))
    }

    pub(crate) fn deposit(&mut self, cell: Cell, coin: Coin) -> Result<(), LedgerError> {
        self.caches
            .get_mut(&cell)
            .ok_or(LedgerError::UnknownCell(cell))?
            .push(coin);
        Ok(())
    }
}
