use crate::board::Cell;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Compass {
    North = 1,
    East = 2,
    South = 4,
    West = 8,
}

impl Compass {
    /// Grid offset as (di, dj). `i` follows latitude, `j` follows longitude.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Compass::North => (1, 0),
            Compass::East => (0, 1),
            Compass::South => (-1, 0),
            Compass::West => (0, -1),
        }
    }
}

impl std::ops::Add<Compass> for Cell {
    type Output = Cell;
    fn add(self, rhs: Compass) -> Self::Output {
        let (di, dj) = rhs.offset();
        self.offset(di, dj)
    }
}

pub trait GridPoints {
    fn chebyshev_distance(&self, rhs: &Self) -> u32;
}

impl GridPoints for Cell {
    fn chebyshev_distance(&self, rhs: &Cell) -> u32 {
        self.i.abs_diff(rhs.i).max(self.j.abs_diff(rhs.j))
    }
}
