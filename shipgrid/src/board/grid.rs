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
//! Defines the cells that make up a board and the grid that owns them. The grid is
//! shared between the placement phase ([`ShipPlacer`][crate::board::ShipPlacer]) and the
//! playing phase ([`BoardController`][crate::board::BoardController]).
use std::{
    collections::BTreeMap,
    convert::TryFrom,
    ops::Index,
};

use crate::{
    board::{Coordinate, Dimensions, GridError},
    ships::{Ship, ShipId},
};

/// Default edge length of a cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Occupancy state of a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Open water.
    NoShip,
    /// Covered by a ship.
    Ship,
}

/// Maps logical cell coordinates onto pixel space. The origin of a cell is its top-left
/// corner: `offset + coordinate * cell_size` on each axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Geometry {
    cell_size: u32,
    offset: (u64, u64),
}

impl Geometry {
    /// Geometry with square cells of the given size and no offset.
    pub fn new(cell_size: u32) -> Result<Self, GridError> {
        if cell_size == 0 {
            Err(GridError::InvalidCellSize)
        } else {
            Ok(Self {
                cell_size,
                offset: (0, 0),
            })
        }
    }

    /// Shift the whole grid by the given pixel offset.
    pub fn with_offset(self, x: u64, y: u64) -> Self {
        Self {
            offset: (x, y),
            ..self
        }
    }

    /// Edge length of a cell in pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Pixel position of the top-left corner of cell `(0, 0)`.
    pub fn offset(&self) -> (u64, u64) {
        self.offset
    }

    /// Pixel origin of the cell at the given coordinate, or `None` if it does not fit in
    /// `u64` pixel space.
    pub fn origin(&self, coord: &Coordinate) -> Option<(u64, u64)> {
        let size = u64::from(self.cell_size);
        let axis = |idx: usize, offset: u64| -> Option<u64> {
            u64::try_from(idx)
                .ok()?
                .checked_mul(size)?
                .checked_add(offset)
        };
        Some((axis(coord.x, self.offset.0)?, axis(coord.y, self.offset.1)?))
    }

    /// Pixel origins of every cell of `dim`, in row-major order. Fails if any cell,
    /// including its far edge, would lie outside `u64` pixel space.
    fn origins(&self, dim: &Dimensions) -> Result<Vec<(u64, u64)>, GridError> {
        let far = Coordinate::new(dim.width(), dim.height());
        if self.origin(&far).is_none() {
            return Err(GridError::GeometryOverflow);
        }
        (0..dim.total_size())
            .map(|idx| {
                self.origin(&dim.un_linearize(idx))
                    .ok_or(GridError::GeometryOverflow)
            })
            .collect()
    }

    /// Inverse of [`origin`][Geometry::origin]: the coordinate of the cell containing
    /// the given pixel. Returns `None` for pixels above or left of the grid. Does not
    /// check the far bounds of any particular grid.
    pub fn coordinate_at(&self, px: u64, py: u64) -> Option<Coordinate> {
        let size = u64::from(self.cell_size);
        let x = px.checked_sub(self.offset.0)? / size;
        let y = py.checked_sub(self.offset.1)? / size;
        Some(Coordinate::new(
            usize::try_from(x).ok()?,
            usize::try_from(y).ok()?,
        ))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            offset: (0, 0),
        }
    }
}

/// Display colors applied to cells. Colors are opaque strings for the renderer; they
/// have no effect on the game.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Palette {
    water: String,
    ship: String,
}

impl Palette {
    /// Palette with the given water and ship colors.
    pub fn new(water: impl Into<String>, ship: impl Into<String>) -> Self {
        Self {
            water: water.into(),
            ship: ship.into(),
        }
    }

    /// Color given to every cell when the grid is created.
    pub fn water(&self) -> &str {
        &self.water
    }

    /// Color given to cells when a ship is placed on them.
    pub fn ship(&self) -> &str {
        &self.ship
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new("#1b4f72", "#808b96")
    }
}

/// A single square of the grid.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Logical position of the cell.
    pub(super) coord: Coordinate,

    /// Pixel origin derived from `coord` and the grid geometry.
    pub(super) origin: (u64, u64),

    /// The ID of the ship that occupies this cell, if any.
    pub(super) ship: Option<ShipId>,

    /// Whether this cell has been hit previously or not.
    pub(super) hit: bool,

    pub(super) color: String,
}

impl Cell {
    /// Horizontal grid coordinate.
    pub fn x(&self) -> usize {
        self.coord.x
    }

    /// Vertical grid coordinate.
    pub fn y(&self) -> usize {
        self.coord.y
    }

    /// The grid coordinate of this cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Horizontal pixel position of the cell's top-left corner.
    pub fn origin_x(&self) -> u64 {
        self.origin.0
    }

    /// Vertical pixel position of the cell's top-left corner.
    pub fn origin_y(&self) -> u64 {
        self.origin.1
    }

    /// Whether a ship occupies this cell.
    pub fn state(&self) -> CellState {
        match self.ship {
            Some(_) => CellState::Ship,
            None => CellState::NoShip,
        }
    }

    /// The id of the ship occupying this cell. Set if and only if the state is
    /// [`CellState::Ship`].
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    /// Whether this cell has been hit previously.
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Display color of the cell.
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Every cell of one board, stored row-major, plus the ships placed on it.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Dimensions of this grid.
    pub(super) dim: Dimensions,
    pub(super) geometry: Geometry,
    pub(super) palette: Palette,
    /// Cells that make up this grid.
    pub(super) cells: Box<[Cell]>,
    /// Placed ships. Cells refer back to these by id.
    pub(super) ships: BTreeMap<ShipId, Ship>,
}

impl Grid {
    /// Create an empty grid with the default geometry and palette.
    pub fn new(dim: Dimensions) -> Result<Self, GridError> {
        Self::with_layout(dim, Geometry::default(), Palette::default())
    }

    /// Create an empty `width` by `height` grid with the default geometry and palette.
    pub fn create(width: usize, height: usize) -> Result<Self, GridError> {
        let dim = Dimensions::try_new(width, height)
            .ok_or(GridError::InvalidDimension { width, height })?;
        Self::new(dim)
    }

    /// Create an empty grid with explicit geometry and colors. Fails with
    /// [`GridError::GeometryOverflow`] if the grid would not fit in pixel space.
    pub fn with_layout(
        dim: Dimensions,
        geometry: Geometry,
        palette: Palette,
    ) -> Result<Self, GridError> {
        let cells = geometry
            .origins(&dim)?
            .into_iter()
            .enumerate()
            .map(|(idx, origin)| Cell {
                coord: dim.un_linearize(idx),
                origin,
                ship: None,
                hit: false,
                color: palette.water.clone(),
            })
            .collect();
        Ok(Self {
            dim,
            geometry,
            palette,
            cells,
            ships: BTreeMap::new(),
        })
    }

    /// Get the [`Dimensions`] of this [`Grid`].
    pub fn dimensions(&self) -> &Dimensions {
        &self.dim
    }

    pub fn width(&self) -> usize {
        self.dim.width()
    }

    pub fn height(&self) -> usize {
        self.dim.height()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the pixel geometry, recomputing the origin of every cell. On
    /// [`GridError::GeometryOverflow`] the grid keeps its old geometry.
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), GridError> {
        let origins = geometry.origins(&self.dim)?;
        for (cell, origin) in self.cells.iter_mut().zip(origins) {
            cell.origin = origin;
        }
        self.geometry = geometry;
        Ok(())
    }

    /// Get the cell at the given position.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        let coord = Coordinate::new(x, y);
        self.get(&coord).ok_or(GridError::OutOfBounds(coord))
    }

    /// Get a reference to the cell at the given [`Coordinate`], or `None` if it is out
    /// of bounds.
    pub fn get(&self, coord: &Coordinate) -> Option<&Cell> {
        self.dim
            .try_linearize(coord)
            .and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut(&mut self, coord: &Coordinate) -> Option<&mut Cell> {
        self.dim
            .try_linearize(coord)
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// The up-to-4 orthogonally adjacent cells of `(x, y)`, in the order up, down, left,
    /// right.
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
    ) -> Result<impl Iterator<Item = &Cell> + '_, GridError> {
        let coord = Coordinate::new(x, y);
        if !self.dim.contains(&coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        let dim = self.dim;
        let cells = &self.cells;
        Ok(dim
            .neighbors(coord)
            .map(move |neighbor| &cells[dim.linearize(&neighbor)]))
    }

    /// Get an iterator over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Get an iterator over the rows of the grid, each a slice of cells ordered by `x`.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dim.width())
    }

    /// Get an iterator over the ships placed on this grid, ordered by id.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values()
    }

    /// Get the ship with the specified ID if it has been placed.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    /// Total number of cells covered by ships.
    pub fn ship_cells(&self) -> usize {
        self.ships.values().map(Ship::len).sum()
    }

    /// The coordinate of the cell under the given pixel, if the pixel lies on the grid.
    pub fn coordinate_at_pixel(&self, px: u64, py: u64) -> Option<Coordinate> {
        self.geometry
            .coordinate_at(px, py)
            .filter(|coord| self.dim.contains(coord))
    }

    /// The cell under the given pixel, if the pixel lies on the grid.
    pub fn cell_at_pixel(&self, px: u64, py: u64) -> Option<&Cell> {
        self.coordinate_at_pixel(px, py)
            .and_then(|coord| self.get(&coord))
    }

    /// Change the display color of a cell.
    pub fn paint(&mut self, x: usize, y: usize, color: impl Into<String>) -> Result<(), GridError> {
        let coord = Coordinate::new(x, y);
        match self.get_mut(&coord) {
            Some(cell) => {
                cell.color = color.into();
                Ok(())
            }
            None => Err(GridError::OutOfBounds(coord)),
        }
    }

    /// True while no ship has been placed and no cell has been hit.
    pub fn is_pristine(&self) -> bool {
        self.ships.is_empty() && self.cells.iter().all(|cell| cell.ship.is_none() && !cell.hit)
    }

    /// Mark every cell of the ship as occupied and take ownership of the ship. The
    /// caller has already checked that the run is in bounds and unoccupied.
    pub(super) fn occupy(&mut self, ship: Ship) {
        for coord in ship.coords() {
            let idx = self.dim.linearize(coord);
            let cell = &mut self.cells[idx];
            cell.ship = Some(ship.id());
            cell.color.clone_from(&self.palette.ship);
        }
        self.ships.insert(ship.id(), ship);
    }

    /// Count a hit against the given ship, returning whether it is now sunk.
    pub(super) fn record_hit(&mut self, id: ShipId) -> bool {
        match self.ships.get_mut(&id) {
            Some(ship) => {
                ship.record_hit();
                ship.sunk()
            }
            None => false,
        }
    }
}

impl Index<Coordinate> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        self.get(&coord).expect("coordinate out of bounds")
    }
}
