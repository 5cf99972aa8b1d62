// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Types that make up the game board.
use log::{info, trace};

use crate::ships::{Ship, ShipId};

pub use self::{
    coordinate::Coordinate,
    dimensions::{Dimensions, Neighbors},
    errors::{
        CannotPlaceReason, CannotShootReason, GridError, PlaceError, SetupError, ShotError,
    },
    grid::{Cell, CellState, Geometry, Grid, Palette, DEFAULT_CELL_SIZE},
    setup::{PlacementRules, ShipPlacer, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_RESTARTS},
};

#[cfg(feature = "rng_gen")]
pub use self::setup::{random_board, random_board_on};

mod coordinate;
mod dimensions;
mod errors;
mod grid;
pub mod setup;

/// Result of a successful hit on a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HitOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit the ship with the given ID, but did not sink it.
    Hit(ShipId),
    /// The shot sank the ship with the given ID, but other ships are still afloat.
    Sunk(ShipId),
    /// The shot sank the ship with the given ID, and it was the last ship afloat.
    Defeated(ShipId),
}

impl HitOutcome {
    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            HitOutcome::Miss => None,
            HitOutcome::Hit(id) | HitOutcome::Sunk(id) | HitOutcome::Defeated(id) => Some(id),
        }
    }

    /// State of the cell that was hit.
    pub fn state(&self) -> CellState {
        match self {
            HitOutcome::Miss => CellState::NoShip,
            _ => CellState::Ship,
        }
    }
}

/// Resolves hits against a populated grid and reports game progress. Obtained from
/// [`ShipPlacer::finish`] once every ship is placed; from then on only hit flags change.
#[derive(Debug, Clone)]
pub struct BoardController {
    /// Grid of cells occupied by ships.
    grid: Grid,

    /// Number of ship cells that have not been hit yet.
    remaining: usize,
}

impl BoardController {
    fn new(grid: Grid) -> Self {
        let remaining = grid.ships().map(Ship::remaining).sum();
        Self { grid, remaining }
    }

    /// Read-only view of the grid for rendering.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Set the display color of a cell. Occupancy and hits are unaffected.
    pub fn paint(&mut self, x: usize, y: usize, color: impl Into<String>) -> Result<(), GridError> {
        self.grid.paint(x, y, color)
    }

    /// Change the pixel geometry, recomputing every cell origin. On error the old
    /// geometry stays in place.
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), GridError> {
        self.grid.set_geometry(geometry)
    }

    /// Get the [`Dimensions`] of this board.
    pub fn dimensions(&self) -> &Dimensions {
        self.grid.dimensions()
    }

    /// Get the cell at the given position.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        self.grid.cell_at(x, y)
    }

    /// Get an iterator over all ships on this board, ordered by id.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.grid.ships()
    }

    /// Get the ship with the specified ID if it exists.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.grid.ship(id)
    }

    /// Number of ship cells still to be hit.
    pub fn remaining_cells(&self) -> usize {
        self.remaining
    }

    /// Number of ships that are not sunk yet.
    pub fn ships_afloat(&self) -> usize {
        self.grid.ships().filter(|ship| !ship.sunk()).count()
    }

    /// Fire at the cell at `(x, y)`. See [`hit_coord`][BoardController::hit_coord].
    pub fn hit(&mut self, x: usize, y: usize) -> Result<HitOutcome, ShotError> {
        self.hit_coord(Coordinate::new(x, y))
    }

    /// Fire at the given cell, marking it as hit and reporting what was there.
    ///
    /// Each cell can be hit once. Hitting it again returns a recoverable
    /// [`CannotShootReason::AlreadyHit`] error and changes nothing. Water can still be
    /// hit after the game is over.
    pub fn hit_coord(&mut self, coord: Coordinate) -> Result<HitOutcome, ShotError> {
        let cell = match self.grid.get_mut(&coord) {
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, coord)),
            Some(cell) if cell.hit => {
                return Err(ShotError::new(CannotShootReason::AlreadyHit, coord))
            }
            Some(cell) => cell,
        };
        cell.hit = true;
        let id = match cell.ship {
            None => {
                trace!("miss at {}", coord);
                return Ok(HitOutcome::Miss);
            }
            Some(id) => id,
        };
        let sunk = self.grid.record_hit(id);
        self.remaining -= 1;
        trace!("hit ship {} at {}", id, coord);
        Ok(if self.remaining == 0 {
            info!("ship {} sunk, no ships left", id);
            HitOutcome::Defeated(id)
        } else if sunk {
            HitOutcome::Sunk(id)
        } else {
            HitOutcome::Hit(id)
        })
    }

    /// Returns true if every cell of the ship has been hit. Unknown ids are never sunk.
    pub fn is_ship_sunk(&self, id: ShipId) -> bool {
        self.grid.ship(id).map_or(false, Ship::sunk)
    }

    /// Returns true once every ship cell on the board has been hit.
    pub fn is_game_over(&self) -> bool {
        self.remaining == 0
    }
}
