//! Custody changes between caches and the player.
//!
//! These are the only functions that move a coin. Each one either completes
//! or leaves both the ledger and the inventory exactly as they were.

use crate::board::Cell;
use crate::cache::{CacheLedger, Coin};
use crate::inventory::Inventory;
use crate::LedgerError;

/// Moves the top coin of the cache at `cell` into the inventory.
pub fn take_from_cache(
    ledger: &mut CacheLedger,
    inventory: &mut Inventory,
    cell: Cell,
) -> Result<Coin, LedgerError> {
    let coin = ledger.take(cell)?;
    inventory.take(coin);
    Ok(coin)
}

/// Moves the most recently acquired coin into the cache at `cell`.
///
/// The cache is checked before the inventory, so a deposit into a cell with
/// no cache reports `UnknownCell` even when the inventory is also empty.
pub fn deposit_to_cache(
    ledger: &mut CacheLedger,
    inventory: &mut Inventory,
    cell: Cell,
) -> Result<Coin, LedgerError> {
    if !ledger.has_cache(cell) {
        return Err(LedgerError::UnknownCell(cell));
    }
    let coin = inventory.give_last()?;
    ledger.deposit(cell, coin)?;
    Ok(coin)
}
