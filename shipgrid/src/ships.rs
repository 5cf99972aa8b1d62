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
//! Types used for defining ships and their shapes.
use std::fmt;

use enumflags2::BitFlags;

use crate::board::Coordinate;

pub use self::linear::Line;

mod linear;

/// Ship lengths of the classic fleet: carrier, battleship, cruiser, submarine and
/// destroyer.
pub const STANDARD_FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Identifies a ship within a single grid. The id is the index of the ship in the list
/// of lengths the fleet was requested with, independent of the order ships get placed
/// in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ShipId(usize);

impl ShipId {
    /// Construct the id for the ship at the given index of the fleet.
    pub fn new(index: usize) -> Self {
        ShipId(index)
    }

    /// Index of this ship in the fleet.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction a ship runs in. Usable as a bit flag to describe a set of allowed
/// orientations.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Orientation {
    /// The ship runs along the `x` direction, starting from its leftmost cell.
    Horizontal = 0b01,
    /// The ship runs along the `y` direction, starting from its topmost cell.
    Vertical = 0b10,
}

impl Orientation {
    /// Both orientations, horizontal first.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Work out the orientation of a run from its first two cells. Returns `None` for
    /// runs shorter than 2 or whose first cells do not share a row or column.
    pub fn of_run(run: &[Coordinate]) -> Option<Orientation> {
        match run {
            [first, second, ..] if first.y == second.y && first.x != second.x => {
                Some(Orientation::Horizontal)
            }
            [first, second, ..] if first.x == second.x && first.y != second.y => {
                Some(Orientation::Vertical)
            }
            _ => None,
        }
    }
}

/// A ship that has been placed on a grid, along with how many of its cells have been
/// hit.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    orientation: Orientation,
    /// Cells covered by the ship, ordered from the start along the orientation.
    coords: Vec<Coordinate>,
    hits: usize,
}

impl Ship {
    /// Build a ship covering the given run. The run must be non-empty.
    pub(crate) fn new(id: ShipId, orientation: Orientation, coords: Vec<Coordinate>) -> Self {
        debug_assert!(!coords.is_empty());
        Self {
            id,
            orientation,
            coords,
            hits: 0,
        }
    }

    /// Get the ID of the ship.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Number of cells covered by the ship.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Direction the ship runs in.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Leftmost or topmost cell of the ship.
    pub fn start(&self) -> Coordinate {
        // Ships are only ever built from non-empty runs.
        self.coords[0]
    }

    /// Coordinates covered by this ship.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Returns true if the ship covers the given coordinate.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.coords.contains(coord)
    }

    /// Number of cells of this ship that have been hit.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of cells of this ship that have not been hit yet.
    pub fn remaining(&self) -> usize {
        self.len() - self.hits
    }

    /// Check if this ship has been sunk.
    pub fn sunk(&self) -> bool {
        self.hits == self.len()
    }

    /// Record a hit on one of this ship's cells. Callers guarantee each cell is hit at
    /// most once.
    pub(crate) fn record_hit(&mut self) {
        debug_assert!(self.hits < self.len());
        self.hits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_of_run() {
        let horizontal = [Coordinate::new(2, 3), Coordinate::new(3, 3)];
        let vertical = [Coordinate::new(2, 3), Coordinate::new(2, 4)];
        let diagonal = [Coordinate::new(2, 3), Coordinate::new(3, 4)];
        assert_eq!(Orientation::of_run(&horizontal), Some(Orientation::Horizontal));
        assert_eq!(Orientation::of_run(&vertical), Some(Orientation::Vertical));
        assert_eq!(Orientation::of_run(&diagonal), None);
        assert_eq!(Orientation::of_run(&horizontal[..1]), None);
    }

    #[test]
    fn ship_sinks_after_every_cell_is_hit() {
        let mut ship = Ship::new(
            ShipId::new(0),
            Orientation::Vertical,
            vec![Coordinate::new(0, 0), Coordinate::new(0, 1)],
        );
        assert_eq!(ship.remaining(), 2);
        ship.record_hit();
        assert!(!ship.sunk());
        ship.record_hit();
        assert!(ship.sunk());
        assert_eq!(ship.remaining(), 0);
    }

    #[test]
    fn orientations_combine_as_flags() {
        let both: BitFlags<Orientation> = Orientation::Horizontal | Orientation::Vertical;
        assert_eq!(both, BitFlags::all());
        assert!(!BitFlags::from(Orientation::Vertical).contains(Orientation::Horizontal));
    }
}
