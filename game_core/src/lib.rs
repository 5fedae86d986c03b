pub mod board;
pub mod cache;
pub mod common;
pub mod configuration;
pub mod inventory;
pub mod luck;
pub mod op;
pub mod prelude;
pub mod session;
pub mod transfer;

use thiserror::Error;

use self::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GeocoinCoreSet {
    ProcessInputs,
    ProcessCommands,
}

/// Expected failures of coin custody operations. None of them leave the
/// session changed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("the cache at [{0}] has no coins left")]
    EmptyCache(Cell),
    #[error("no coins in inventory")]
    EmptyInventory,
    #[error("no cache is known at [{0}]")]
    UnknownCell(Cell),
}

#[derive(Debug)]
pub struct GeocoinCorePlugin;

impl Plugin for GeocoinCorePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Op<CoinOp>>()
            .add_event::<OpResult<CoinOp>>()
            .init_resource::<Session>()
            .configure_sets(
                Update,
                (GeocoinCoreSet::ProcessInputs, GeocoinCoreSet::ProcessCommands).chain(),
            )
            .add_systems(
                Update,
                op::sys_perform_coin_ops.in_set(GeocoinCoreSet::ProcessCommands),
            );
    }
}
