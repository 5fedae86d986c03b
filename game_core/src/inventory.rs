use getset::Getters;

use crate::cache::Coin;
use crate::LedgerError;

/// Coins carried by the player, most recently picked up last.
#[derive(Clone, Debug, Default, Getters)]
pub struct Inventory {
    #[getset(get = "pub")]
    coins: Vec<Coin>,
}

impl Inventory {
    pub fn count(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub(crate) fn take(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    /// The coin `give_last` would hand over next.
    pub fn last(&self) -> Option<&Coin> {
        self.coins.last()
    }

    pub(crate) fn give_last(&mut self) -> Result<Coin, LedgerError> {
        self.coins.pop().ok_or(LedgerError::EmptyInventory)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn empty_inventory_has_nothing_to_give() {
        let mut inventory = Inventory::default();
        assert_eq!(0, inventory.count());
        assert_eq!(None, inventory.last());
        assert_eq!(Err(LedgerError::EmptyInventory), inventory.give_last());
    }

    #[test]
    fn newest_coin_is_given_first() {
        let mut inventory = Inventory::default();
        let coins = [
            Coin::mint(Cell::new(0, 0), 1),
            Coin::mint(Cell::new(0, 0), 2),
            Coin::mint(Cell::new(-4, 7), 1),
        ];
        for (held, coin) in coins.iter().enumerate() {
            assert_eq!(held, inventory.count());
            inventory.take(*coin);
        }
        assert_eq!(3, inventory.count());
        assert_eq!(&coins[..], inventory.coins().as_slice());
        assert_eq!(Some(&coins[2]), inventory.last());

        for (left, coin) in coins.iter().enumerate().rev() {
            assert_eq!(Ok(*coin), inventory.give_last());
            assert_eq!(left, inventory.count());
        }
        assert!(inventory.is_empty());
        assert_eq!(Err(LedgerError::EmptyInventory), inventory.give_last());
    }
}
