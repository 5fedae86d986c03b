use crate::board::Cell;
use crate::cache::Coin;
use crate::common::Compass;
use crate::configuration::GameConfiguration;
use crate::prelude::*;
use crate::session::GameSession;
use crate::LedgerError;

/// A request from the player, delivered as an event.
#[derive(Clone, Debug, Event)]
pub struct Op<O> {
    pub op: O,
}

pub trait OpSubtype: Clone {
    type Output;
    type Error;

    fn to_op(self) -> Op<Self> {
        Op::new(self)
    }
}

#[derive(Clone, Debug, Event, getset::Getters)]
pub struct OpResult<O: OpSubtype> {
    #[getset(get = "pub")]
    source: Op<O>,
    #[getset(get = "pub")]
    result: Result<O::Output, O::Error>,
}

impl<O: OpSubtype> OpResult<O> {
    pub fn new(source: &Op<O>, result: Result<O::Output, O::Error>) -> Self {
        OpResult {
            source: source.clone(),
            result,
        }
    }
}

impl<O> Op<O> {
    pub fn new(op: O) -> Self {
        Op { op }
    }

    pub fn op(&self) -> &O {
        &self.op
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinOp {
    Move(Compass),
    TakeFromCache(Cell),
    DepositToCache(Cell),
    TakeHere,
    DepositHere,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoinOpOutcome {
    Moved { cell: Cell, spawned: Vec<Cell> },
    Took { cell: Cell, coin: Coin },
    Deposited { cell: Cell, coin: Coin },
}

impl OpSubtype for CoinOp {
    type Output = CoinOpOutcome;
    type Error = LedgerError;
}

/// The game session as a bevy resource.
#[derive(Debug, Deref, DerefMut, Resource)]
pub struct Session(pub GameSession);

impl FromWorld for Session {
    fn from_world(world: &mut World) -> Self {
        let config = match world.get_resource::<GameConfiguration>() {
            Some(config) => match config.validate() {
                Ok(()) => config.clone(),
                Err(e) => {
                    log::warn!("Ignoring configuration resource: {e}");
                    GameConfiguration::default()
                },
            },
            None => GameConfiguration::default(),
        };
        Session(GameSession::new(config))
    }
}

impl CoinOp {
    pub fn apply(self, session: &mut GameSession) -> Result<CoinOpOutcome, LedgerError> {
        match self {
            CoinOp::Move(dir) => {
                let spawned = session.move_player(dir);
                Ok(CoinOpOutcome::Moved {
                    cell: session.player_cell(),
                    spawned,
                })
            },
            CoinOp::TakeFromCache(cell) => session
                .take_from_cache(cell)
                .map(|coin| CoinOpOutcome::Took { cell, coin }),
            CoinOp::DepositToCache(cell) => session
                .deposit_to_cache(cell)
                .map(|coin| CoinOpOutcome::Deposited { cell, coin }),
            CoinOp::TakeHere => CoinOp::TakeFromCache(session.player_cell()).apply(session),
            CoinOp::DepositHere => CoinOp::DepositToCache(session.player_cell()).apply(session),
        }
    }
}

pub fn sys_perform_coin_ops(
    mut session: ResMut<Session>,
    mut ops: EventReader<Op<CoinOp>>,
    mut ev_results: EventWriter<OpResult<CoinOp>>,
) {
    for op in ops.read() {
        let result = op.op().apply(&mut session);
        match &result {
            Ok(outcome) => log::debug!("Applied op {:?}: {:?}", op.op(), outcome),
            Err(e) => log::debug!("Op {:?} not applied: {}", op.op(), e),
        }
        ev_results.send(OpResult::new(op, result));
    }
}
