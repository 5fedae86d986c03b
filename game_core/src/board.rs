use std::fmt;

use getset::CopyGetters;
use serde::{Deserialize, Serialize};

use crate::common::GridPoints;
use crate::prelude::HashSet;
use crate::LedgerError;

/// A continuous map coordinate in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Half-open: the south and west edges belong to the rectangle, the north
    /// and east edges belong to its neighbors.
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south_west.lat..self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..self.north_east.lng).contains(&point.lng)
    }
}

/// A grid cell, as a tile offset from the board origin. `i` runs north, `j`
/// runs east.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize,
)]
pub struct Cell {
    pub i: i32,
    pub j: i32,
}

impl Cell {
    pub fn new(i: i32, j: i32) -> Self {
        Cell { i, j }
    }

    /// Shifts the cell, stopping at the edge of the grid.
    pub fn offset(self, di: i32, dj: i32) -> Self {
        Cell::new(self.i.saturating_add(di), self.j.saturating_add(dj))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((i, j): (i32, i32)) -> Self {
        Cell::new(i, j)
    }
}

/// Registry of known cells laid over the map.
///
/// A cell becomes known when something decides it matters (a cache spawned
/// there) and stays known for the life of the board.
#[derive(Clone, Debug, CopyGetters)]
pub struct Board {
    #[getset(get_copy = "pub")]
    origin: LatLng,
    #[getset(get_copy = "pub")]
    tile_width: f64,
    #[getset(get_copy = "pub")]
    visibility_radius: u32,
    known_cells: HashSet<Cell>,
}

impl Board {
    pub fn new(origin: LatLng, tile_width: f64, visibility_radius: u32) -> Self {
        Board {
            origin,
            tile_width,
            visibility_radius,
            known_cells: HashSet::default(),
        }
    }

    /// Registers the cell if it is new and returns it.
    pub fn canonicalize(&mut self, i: i32, j: i32) -> Cell {
        let cell = Cell::new(i, j);
        if self.known_cells.insert(cell) {
            log::trace!("Registered cell [{cell}]");
        }
        cell
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.known_cells.contains(&cell)
    }

    pub fn known_count(&self) -> usize {
        self.known_cells.len()
    }

    /// The cell whose bounds contain `point`, whether or not it is known.
    pub fn cell_coordinates_for_point(&self, point: LatLng) -> Cell {
        // Cells are centered on grid points, so the enclosing cell is the
        // nearest one. floor(x + 0.5) keeps the north/east edges exclusive.
        let i = ((point.lat - self.origin.lat) / self.tile_width + 0.5).floor();
        let j = ((point.lng - self.origin.lng) / self.tile_width + 0.5).floor();
        Cell::new(i as i32, j as i32)
    }

    /// The known cell containing `point`.
    pub fn cell_for_point(&self, point: LatLng) -> Result<Cell, LedgerError> {
        let cell = self.cell_coordinates_for_point(point);
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(LedgerError::UnknownCell(cell))
        }
    }

    /// Map position of the center of `cell`.
    pub fn point_of(&self, cell: Cell) -> LatLng {
        LatLng::new(
            self.origin.lat + f64::from(cell.i) * self.tile_width,
            self.origin.lng + f64::from(cell.j) * self.tile_width,
        )
    }

    pub fn bounds_of(&self, cell: Cell) -> LatLngBounds {
        let center = self.point_of(cell);
        let half = self.tile_width / 2.0;
        LatLngBounds {
            south_west: LatLng::new(center.lat - half, center.lng - half),
            north_east: LatLng::new(center.lat + half, center.lng + half),
        }
    }

    /// Known cells within `radius` tiles (on both axes) of the cell containing
    /// `point`, in row-major order from the south-west corner.
    pub fn known_cells_near(&self, point: LatLng, radius: u32) -> Vec<Cell> {
        self.known_cells_around(self.cell_coordinates_for_point(point), radius)
    }

    pub fn known_cells_around(&self, center: Cell, radius: u32) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .known_cells
            .iter()
            .copied()
            .filter(|cell| center.chebyshev_distance(cell) <= radius)
            .collect();
        // Cell orders by (i, j), which is row-major from the south-west.
        cells.sort_unstable();
        cells
    }

    /// Known cells within the board's visibility radius of `point`.
    pub fn visible_cells(&self, point: LatLng) -> Vec<Cell> {
        self.known_cells_near(point, self.visibility_radius)
    }
}
