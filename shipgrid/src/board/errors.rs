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
//! Errors used by the [`Grid`][crate::board::Grid], the
//! [`ShipPlacer`][crate::board::ShipPlacer] and the
//! [`BoardController`][crate::board::BoardController].

use thiserror::Error;

use crate::{board::Coordinate, ships::ShipId};

/// Error returned when building or addressing a grid.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum GridError {
    /// Width or height was zero, or the grid would not fit in memory.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
    /// The coordinate lies outside the grid.
    #[error("coordinate {0} is out of bounds")]
    OutOfBounds(Coordinate),
    /// Cells must be at least one pixel wide.
    #[error("cell size must be nonzero")]
    InvalidCellSize,
    /// Some cell of the grid would lie beyond the largest representable pixel.
    #[error("grid geometry overflows pixel space")]
    GeometryOverflow,
}

/// Reason why a ship could not be placed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The grid passed to the placer already had ships or hits on it.
    #[error("the grid is already in use")]
    GridInUse,
    /// No ship lengths were given.
    #[error("no ships were requested")]
    EmptyFleet,
    /// A requested ship had length zero.
    #[error("ship lengths must be positive")]
    ZeroLength,
    /// A ship is longer than the grid in every allowed orientation.
    #[error("the ship does not fit on the grid in any allowed orientation")]
    DoesNotFit,
    /// The ships together cover more cells than the grid has.
    #[error("the requested ships cover more cells than the grid has")]
    FleetTooLarge,
    /// No ship with the given id was requested.
    #[error("no such ship")]
    UnknownShip,
    /// The ship was already placed.
    #[error("ship was already placed")]
    AlreadyPlaced,
    /// The orientation is not allowed by the placement rules.
    #[error("the orientation is not allowed")]
    DisallowedOrientation,
    /// The ship did not fit in the given direction.
    #[error("insufficient space for the ship at the specified position")]
    OutOfBounds,
    /// The run provided was not a straight run of the ship's length.
    #[error("the projection provided was not valid")]
    InvalidProjection,
    /// One or more of the cells in the run was already occupied.
    #[error("the requested position was already occupied")]
    AlreadyOccupied,
    /// The run would touch another ship while touching is disallowed.
    #[error("the ship would touch another ship")]
    Touching,
    /// Random placement ran out of attempts.
    #[error("no valid position found within the attempt limit")]
    Exhausted,
}

impl CannotPlaceReason {
    /// Returns true for reasons that mean the requested fleet or grid is unusable, as
    /// opposed to a single bad position.
    pub fn is_config_error(self) -> bool {
        match self {
            CannotPlaceReason::GridInUse
            | CannotPlaceReason::EmptyFleet
            | CannotPlaceReason::ZeroLength
            | CannotPlaceReason::DoesNotFit
            | CannotPlaceReason::FleetTooLarge
            | CannotPlaceReason::Exhausted => true,
            _ => false,
        }
    }
}

/// Error caused when attempting to place a ship in an invalid position, or when the
/// requested fleet cannot be placed at all.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place ship: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    ship: Option<ShipId>,
}

impl PlaceError {
    /// Construct a placement error from a reason and the ship it concerns, if any.
    pub(super) fn new(reason: CannotPlaceReason, ship: Option<ShipId>) -> Self {
        Self { reason, ship }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// The ship that could not be placed. `None` for errors about the fleet as a whole.
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }
}

/// Reason why a particular cell could not be hit.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The cell selected was out of bounds on the board.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,

    /// A shot has already been fired at that cell.
    #[error("the target cell was already hit")]
    AlreadyHit,
}

/// Error returned when trying to hit a cell. The board is never modified when this is
/// returned.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not hit cell {coord}: {reason}")]
pub struct ShotError {
    /// Reason why the cell could not be hit.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(super) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Repeated shots are a no-op the caller can ignore. Out of bounds shots are a bug
    /// in the caller.
    pub fn is_recoverable(&self) -> bool {
        self.reason == CannotShootReason::AlreadyHit
    }
}

/// Any error that can occur while building a board in one go.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum SetupError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Place(#[from] PlaceError),
}
