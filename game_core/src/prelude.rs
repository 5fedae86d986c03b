pub use bevy::utils::{HashMap, HashSet};

pub use bevy::prelude::{
    App, Deref, DerefMut, Event, EventReader, EventWriter, FromWorld, IntoSystemConfigs,
    IntoSystemSetConfigs, Plugin, PostUpdate, Res, ResMut, Resource, SystemSet, Update, World,
};

pub use crate::board::{Cell, LatLng};
pub use crate::cache::Coin;
pub use crate::common::Compass;
pub use crate::op::{CoinOp, CoinOpOutcome, Op, OpResult, OpSubtype, Session};
pub use crate::session::GameSession;
pub use crate::LedgerError;
