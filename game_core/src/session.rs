use getset::{CopyGetters, Getters};

use crate::board::{Board, Cell, LatLng};
use crate::cache::{CacheLedger, Coin};
use crate::common::Compass;
use crate::configuration::GameConfiguration;
use crate::inventory::Inventory;
use crate::luck::{Murmur3Luck, SpawnOracle, Spawner};
use crate::transfer;
use crate::LedgerError;

type Result<T> = std::result::Result<T, LedgerError>;

/// All state of one game, owned in one place.
#[derive(Debug, CopyGetters, Getters)]
pub struct GameSession {
    #[getset(get = "pub")]
    config: GameConfiguration,
    #[getset(get = "pub")]
    board: Board,
    #[getset(get = "pub")]
    ledger: CacheLedger,
    #[getset(get = "pub")]
    inventory: Inventory,
    spawner: Spawner,
    #[getset(get_copy = "pub")]
    player_position: LatLng,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new(GameConfiguration::default())
    }
}

impl GameSession {
    pub fn new(config: GameConfiguration) -> Self {
        GameSession::with_oracle(config, Murmur3Luck)
    }

    /// Starts a session at the configured origin and spawns the caches around
    /// it.
    pub fn with_oracle<O: SpawnOracle + 'static>(config: GameConfiguration, oracle: O) -> Self {
        let spawner = Spawner::new(oracle, config.spawn_policy());
        let mut session = GameSession {
            board: config.board(),
            ledger: CacheLedger::new(),
            inventory: Inventory::default(),
            spawner,
            player_position: config.origin,
            config,
        };
        let spawned = session.spawn_neighborhood();
        log::info!(
            "Started session at [{},{}] with {} caches nearby",
            session.player_position.lat,
            session.player_position.lng,
            spawned.len()
        );
        session
    }

    pub fn player_cell(&self) -> Cell {
        self.board.cell_coordinates_for_point(self.player_position)
    }

    /// Steps the player one tile and spawns any caches that come into range.
    /// Returns the cells that gained a cache.
    pub fn move_player(&mut self, dir: Compass) -> Vec<Cell> {
        let cell = self.player_cell() + dir;
        self.player_position = self.board.point_of(cell);
        log::debug!("Player moved {dir:?} to [{cell}]");
        self.spawn_neighborhood()
    }

    /// Makes spawn decisions for every cell in the neighborhood around the
    /// player. Cells that already hold a cache are left alone.
    pub fn spawn_neighborhood(&mut self) -> Vec<Cell> {
        let center = self.player_cell();
        let size = i32::try_from(self.config.neighborhood_size).unwrap_or(i32::MAX);
        let mut spawned = Vec::new();
        for di in -size..size {
            for dj in -size..size {
                let candidate = center.offset(di, dj);
                if self.ledger.has_cache(candidate) || !self.spawner.has_cache(candidate) {
                    continue;
                }
                let cell = self.board.canonicalize(candidate.i, candidate.j);
                self.ledger.materialize(cell, &self.spawner);
                spawned.push(cell);
            }
        }
        spawned
    }

    pub fn canonicalize(&mut self, i: i32, j: i32) -> Cell {
        self.board.canonicalize(i, j)
    }

    /// Current contents of the cache at a known cell, spawning them the first
    /// time the cell is asked about.
    pub fn materialize(&mut self, cell: Cell) -> Result<&[Coin]> {
        if !self.board.contains(cell) {
            return Err(LedgerError::UnknownCell(cell));
        }
        Ok(self.ledger.materialize(cell, &self.spawner))
    }

    pub fn take_from_cache(&mut self, cell: Cell) -> Result<Coin> {
        transfer::take_from_cache(&mut self.ledger, &mut self.inventory, cell)
    }

    pub fn deposit_to_cache(&mut self, cell: Cell) -> Result<Coin> {
        transfer::deposit_to_cache(&mut self.ledger, &mut self.inventory, cell)
    }

    pub fn take_here(&mut self) -> Result<Coin> {
        self.take_from_cache(self.player_cell())
    }

    pub fn deposit_here(&mut self) -> Result<Coin> {
        self.deposit_to_cache(self.player_cell())
    }

    /// Caches within the visibility radius of the player, with their coins.
    pub fn visible_caches(&self) -> Vec<(Cell, &[Coin])> {
        self.board
            .visible_cells(self.player_position)
            .into_iter()
            .filter_map(|cell| Some((cell, self.ledger.coins_at(cell)?)))
            .collect()
    }

    pub fn status_text(&self) -> String {
        match self.inventory.count() {
            0 => "No coins yet...".to_string(),
            1 => "1 coin held".to_string(),
            count => format!("{count} coins held"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use test_log::test;

    use super::*;
    use crate::luck::{self, SpawnPolicy};

    fn world(session: &GameSession) -> BTreeMap<Cell, Vec<Coin>> {
        session
            .ledger()
            .cells()
            .map(|cell| (cell, session.ledger().coins_at(cell).unwrap_or(&[]).to_vec()))
            .collect()
    }

    fn assert_conserved(session: &GameSession) {
        assert_eq!(
            session.ledger().total_minted(),
            session.ledger().total_coins() + session.inventory().count()
        );
    }

    #[test]
    fn world_generation_is_reproducible() {
        let first = GameSession::default();
        let second = GameSession::default();
        assert_eq!(world(&first), world(&second));
        assert!(first.ledger().cache_count() > 0);
    }

    #[test]
    fn initial_spawn_matches_oracle_scan() {
        let session = GameSession::default();
        let policy = SpawnPolicy::default();
        let expected: Vec<Cell> = (-8..8)
            .flat_map(|i| (-8..8).map(move |j| Cell::new(i, j)))
            .filter(|cell| policy.has_cache(&luck::Murmur3Luck, *cell))
            .collect();
        let spawned: Vec<Cell> = world(&session).into_keys().collect();
        assert_eq!(expected, spawned);
        for cell in expected {
            assert_eq!(
                policy.initial_coin_count(&luck::Murmur3Luck, cell),
                session.ledger().coins_at(cell).unwrap().len()
            );
        }
    }

    #[test]
    fn scenario_cell_two_three_holds_two_coins() {
        let oracle = |key: &str| match key {
            "2,3" => 0.05,
            "2,3,initialValue" => 0.5,
            _ => 0.9,
        };
        let mut session = GameSession::with_oracle(GameConfiguration::default(), oracle);
        assert_eq!(1, session.ledger().cache_count());
        let cell = session.canonicalize(2, 3);
        let coins = session.materialize(cell).unwrap();
        assert_eq!(2, coins.len());
        assert_eq!(vec![1, 2], coins.iter().map(Coin::serial).collect::<Vec<_>>());
        assert!(coins.iter().all(|coin| coin.origin() == Cell::new(2, 3)));
    }

    #[test]
    fn materialize_requires_a_known_cell() {
        let mut session = GameSession::with_oracle(GameConfiguration::default(), |_: &str| 0.9);
        assert!(matches!(
            session.materialize(Cell::new(0, 0)),
            Err(LedgerError::UnknownCell(_))
        ));
        let cell = session.canonicalize(0, 0);
        assert_eq!(3, session.materialize(cell).unwrap().len());
    }

    #[test]
    fn revisiting_does_not_reset_caches() {
        let mut session = GameSession::default();
        let (cell, _) = session
            .visible_caches()
            .into_iter()
            .find(|(_, coins)| !coins.is_empty())
            .map(|(cell, coins)| (cell, coins.len()))
            .expect("default world should have a non-empty cache nearby");
        session.take_from_cache(cell).unwrap();
        let after_take = session.materialize(cell).unwrap().to_vec();

        for _ in 0..20 {
            session.move_player(Compass::East);
        }
        for _ in 0..20 {
            session.move_player(Compass::West);
        }
        assert_eq!(after_take, session.materialize(cell).unwrap());
        assert_conserved(&session);
    }

    #[test]
    fn moving_spawns_only_new_cells() {
        let mut session = GameSession::default();
        let before = world(&session);
        let spawned = session.move_player(Compass::North);
        assert_eq!(Cell::new(1, 0), session.player_cell());
        assert!(spawned.iter().all(|cell| !before.contains_key(cell)));
        assert!(spawned.iter().all(|cell| cell.i == 8));
        assert_eq!(before.len() + spawned.len(), session.ledger().cache_count());
        assert!(session.move_player(Compass::South).is_empty());
    }

    #[test]
    fn registering_a_cell_early_does_not_change_the_world() {
        let oracle = |key: &str| match key {
            "20,0" => 0.0,
            "20,0,initialValue" => 0.99,
            _ => 0.9,
        };
        let mut plain = GameSession::with_oracle(GameConfiguration::default(), oracle);
        let mut touched = GameSession::with_oracle(GameConfiguration::default(), oracle);
        touched.canonicalize(20, 0);
        touched.canonicalize(19, 0);
        for _ in 0..15 {
            plain.move_player(Compass::North);
            touched.move_player(Compass::North);
        }
        assert_eq!(1, plain.ledger().cache_count());
        assert_eq!(world(&plain), world(&touched));
        assert_eq!(3, touched.take_from_cache(Cell::new(20, 0)).unwrap().serial());
        assert!(touched.ledger().coins_at(Cell::new(19, 0)).is_none());
        assert_conserved(&touched);
    }

    #[test]
    fn take_and_deposit_here_use_player_cell() {
        let oracle = |key: &str| match key {
            "0,0" => 0.0,
            "0,1" => 0.0,
            "0,0,initialValue" => 0.99,
            "0,1,initialValue" => 0.0,
            _ => 0.9,
        };
        let mut session = GameSession::with_oracle(GameConfiguration::default(), oracle);
        assert_eq!("No coins yet...", session.status_text());
        let coin = session.take_here().unwrap();
        assert_eq!("0:0#3", coin.to_string());
        assert_eq!("1 coin held", session.status_text());
        session.move_player(Compass::East);
        assert_eq!(coin, session.deposit_here().unwrap());
        assert_eq!(&[coin][..], session.materialize(Cell::new(0, 1)).unwrap());
        assert!(matches!(session.deposit_here(), Err(LedgerError::EmptyInventory)));
        session.move_player(Compass::East);
        assert!(matches!(session.take_here(), Err(LedgerError::UnknownCell(_))));
        assert_conserved(&session);
    }

    #[test]
    fn visible_caches_respect_radius() {
        let mut config = GameConfiguration::default();
        config.visibility_radius = 2;
        let session = GameSession::new(config);
        let player = session.player_cell();
        for (cell, coins) in session.visible_caches() {
            assert!(cell.i.abs_diff(player.i) <= 2 && cell.j.abs_diff(player.j) <= 2);
            assert_eq!(session.ledger().coins_at(cell).unwrap(), coins);
        }
    }
}
