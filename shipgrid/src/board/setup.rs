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
//! Implements the placement phase of the board.
use enumflags2::BitFlags;
use log::debug;
#[cfg(feature = "rng_gen")]
use log::warn;
#[cfg(feature = "rng_gen")]
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

#[cfg(feature = "rng_gen")]
use crate::board::SetupError;
use crate::{
    board::{
        BoardController, CannotPlaceReason, Coordinate, Geometry, Grid, GridError, PlaceError,
    },
    ships::{Line, Orientation, Ship, ShipId},
};

/// Default number of random positions tried for a single ship before the layout is
/// restarted.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

/// Default number of times a random layout is restarted from scratch before giving up.
pub const DEFAULT_MAX_RESTARTS: usize = 16;

/// Constraints applied when placing ships.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PlacementRules {
    /// Whether ships may occupy orthogonally adjacent cells.
    allow_touching: bool,

    /// Set of orientations ships may be placed in.
    orientations: BitFlags<Orientation>,

    max_attempts: usize,
    max_restarts: usize,
}

impl PlacementRules {
    /// Allow or forbid ships touching each other orthogonally.
    pub fn with_touching(self, allow_touching: bool) -> Self {
        Self {
            allow_touching,
            ..self
        }
    }

    /// Restrict the orientations ships may be placed in.
    pub fn with_orientations<B: Into<BitFlags<Orientation>>>(self, orientations: B) -> Self {
        Self {
            orientations: orientations.into(),
            ..self
        }
    }

    /// Set how many random positions are tried per ship before restarting the layout.
    /// Values below 1 are raised to 1.
    pub fn with_max_attempts(self, max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..self
        }
    }

    /// Set how many times a failed random layout is restarted.
    pub fn with_max_restarts(self, max_restarts: usize) -> Self {
        Self {
            max_restarts,
            ..self
        }
    }

    pub fn allows_touching(&self) -> bool {
        self.allow_touching
    }

    pub fn orientations(&self) -> BitFlags<Orientation> {
        self.orientations
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn max_restarts(&self) -> usize {
        self.max_restarts
    }

    /// Iterate the allowed orientations, horizontal first.
    pub fn allowed_orientations(&self) -> impl Iterator<Item = Orientation> {
        let orientations = self.orientations;
        Orientation::ALL
            .iter()
            .copied()
            .filter(move |orientation| orientations.contains(*orientation))
    }
}

impl Default for PlacementRules {
    /// Classic rules: both orientations, ships may not touch.
    fn default() -> Self {
        Self {
            allow_touching: false,
            orientations: BitFlags::all(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_restarts: DEFAULT_MAX_RESTARTS,
        }
    }
}

/// Placement phase for a [`Grid`]. Owns the grid while ships are placed, manually or
/// randomly, and hands it to a [`BoardController`] once every ship is placed.
#[derive(Debug, Clone)]
pub struct ShipPlacer {
    /// Grid for placement of ships.
    grid: Grid,

    /// Requested ship shapes, indexed by [`ShipId`].
    fleet: Vec<Line>,

    rules: PlacementRules,
}

impl ShipPlacer {
    /// Begin placement of the given ship lengths on an empty grid. The position of each
    /// length in `lengths` becomes the [`ShipId`] of that ship.
    ///
    /// Fails if the grid is not empty, no ships are requested, or the requested ships
    /// cannot fit on the grid at all.
    pub fn new<L>(grid: Grid, lengths: L, rules: PlacementRules) -> Result<Self, PlaceError>
    where
        L: IntoIterator<Item = usize>,
    {
        if !grid.is_pristine() {
            return Err(PlaceError::new(CannotPlaceReason::GridInUse, None));
        }
        let fleet = lengths
            .into_iter()
            .enumerate()
            .map(|(idx, len)| {
                Line::try_new(len).ok_or_else(|| {
                    PlaceError::new(CannotPlaceReason::ZeroLength, Some(ShipId::new(idx)))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if fleet.is_empty() {
            return Err(PlaceError::new(CannotPlaceReason::EmptyFleet, None));
        }
        for (idx, shape) in fleet.iter().enumerate() {
            if !rules
                .allowed_orientations()
                .any(|orientation| shape.fits(orientation, grid.dimensions()))
            {
                return Err(PlaceError::new(
                    CannotPlaceReason::DoesNotFit,
                    Some(ShipId::new(idx)),
                ));
            }
        }
        let total: usize = fleet.iter().map(Line::len).sum();
        if total > grid.dimensions().total_size() {
            return Err(PlaceError::new(CannotPlaceReason::FleetTooLarge, None));
        }
        debug!(
            "placing {} ships ({} cells) on a {}x{} grid, touching allowed: {}",
            fleet.len(),
            total,
            grid.width(),
            grid.height(),
            rules.allows_touching(),
        );
        Ok(Self { grid, fleet, rules })
    }

    /// The grid being populated.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Set the display color of a cell. See [`Grid::paint`].
    pub fn paint(&mut self, x: usize, y: usize, color: impl Into<String>) -> Result<(), GridError> {
        self.grid.paint(x, y, color)
    }

    /// Change the pixel geometry of the grid. See [`Grid::set_geometry`].
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), GridError> {
        self.grid.set_geometry(geometry)
    }

    pub fn rules(&self) -> &PlacementRules {
        &self.rules
    }

    /// Number of ships requested.
    pub fn fleet_size(&self) -> usize {
        self.fleet.len()
    }

    /// Length of the ship with the given id, if it was requested.
    pub fn ship_length(&self, id: ShipId) -> Option<usize> {
        self.fleet.get(id.index()).map(Line::len)
    }

    /// Get an iterator over the IDs of any ships which still need to be placed.
    pub fn pending_ships(&self) -> impl Iterator<Item = ShipId> + '_ {
        (0..self.fleet.len())
            .map(ShipId::new)
            .filter(move |id| self.grid.ship(*id).is_none())
    }

    /// Returns true once every requested ship is placed.
    pub fn ready(&self) -> bool {
        self.grid.ships.len() == self.fleet.len()
    }

    /// Check whether the ship could be placed starting at `anchor` (its leftmost or
    /// topmost cell) along `orientation`, without placing it. Returns the cells the
    /// ship would cover.
    pub fn check_placement(
        &self,
        id: ShipId,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<Vec<Coordinate>, CannotPlaceReason> {
        let shape = self.pending_shape(id)?;
        if !self.rules.orientations.contains(orientation) {
            return Err(CannotPlaceReason::DisallowedOrientation);
        }
        let run = shape
            .project(anchor, orientation, self.grid.dimensions())
            .ok_or(CannotPlaceReason::OutOfBounds)?;
        check_run(&self.grid, &run, self.rules.allow_touching)?;
        Ok(run)
    }

    /// Place the ship starting at `anchor` along `orientation`.
    pub fn place_ship(
        &mut self,
        id: ShipId,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<(), PlaceError> {
        let run = self
            .check_placement(id, anchor, orientation)
            .map_err(|reason| PlaceError::new(reason, Some(id)))?;
        self.commit(id, orientation, run);
        Ok(())
    }

    /// Place the ship on an explicit list of cells. The cells must form a straight,
    /// gapless run of the ship's length, in either direction.
    pub fn place_projection(
        &mut self,
        id: ShipId,
        mut run: Vec<Coordinate>,
    ) -> Result<(), PlaceError> {
        let err = |reason| PlaceError::new(reason, Some(id));
        let shape = self.pending_shape(id).map_err(err)?;
        if !shape.is_valid_placement(&run, self.grid.dimensions()) {
            return Err(err(CannotPlaceReason::InvalidProjection));
        }
        let orientation = match Orientation::of_run(&run) {
            Some(orientation) if self.rules.orientations.contains(orientation) => orientation,
            Some(_) => return Err(err(CannotPlaceReason::DisallowedOrientation)),
            // Single cell ships have no direction of their own.
            None => self
                .rules
                .allowed_orientations()
                .next()
                .ok_or_else(|| err(CannotPlaceReason::DisallowedOrientation))?,
        };
        check_run(&self.grid, &run, self.rules.allow_touching).map_err(err)?;
        run.sort();
        self.commit(id, orientation, run);
        Ok(())
    }

    /// Randomly place every ship that has not been placed yet, longest first.
    ///
    /// Each ship gets up to `max_attempts` random positions. If a ship runs out, every
    /// ship placed by this call is discarded and the layout starts over, up to
    /// `max_restarts` times. On failure the grid is left exactly as it was.
    #[cfg(feature = "rng_gen")]
    pub fn place_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), PlaceError> {
        let mut order: Vec<ShipId> = self.pending_ships().collect();
        // Stable sort keeps request order among equal lengths.
        order.sort_by(|a, b| self.fleet[b.index()].len().cmp(&self.fleet[a.index()].len()));

        let mut failed = None;
        for round in 0..=self.rules.max_restarts {
            let mut scratch = self.grid.clone();
            match self.layout(&mut scratch, &order, rng) {
                Ok(()) => {
                    self.grid = scratch;
                    return Ok(());
                }
                Err(id) => {
                    debug!("round {}: no room for ship {}, restarting", round, id);
                    failed = Some(id);
                }
            }
        }
        warn!(
            "gave up placing ships after {} layouts of {} attempts each",
            self.rules.max_restarts + 1,
            self.rules.max_attempts
        );
        Err(PlaceError::new(CannotPlaceReason::Exhausted, failed))
    }

    /// Randomly place every remaining ship with a reproducible layout when `seed` is
    /// given, or an entropy-seeded one otherwise.
    #[cfg(feature = "rng_gen")]
    pub fn place_remaining_seeded(&mut self, seed: Option<u64>) -> Result<(), PlaceError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.place_remaining(&mut rng)
    }

    /// Tries to start the game. If all ships are placed, returns a [`BoardController`]
    /// for the populated grid, otherwise returns self.
    pub fn finish(self) -> Result<BoardController, Self> {
        if self.ready() {
            Ok(BoardController::new(self.grid))
        } else {
            Err(self)
        }
    }

    /// Shape of a requested ship which has not been placed yet.
    fn pending_shape(&self, id: ShipId) -> Result<Line, CannotPlaceReason> {
        let shape = *self
            .fleet
            .get(id.index())
            .ok_or(CannotPlaceReason::UnknownShip)?;
        if self.grid.ship(id).is_some() {
            Err(CannotPlaceReason::AlreadyPlaced)
        } else {
            Ok(shape)
        }
    }

    /// Already ensured that every position is valid and not occupied.
    fn commit(&mut self, id: ShipId, orientation: Orientation, run: Vec<Coordinate>) {
        debug!("placed ship {} {:?} at {}", id, orientation, run[0]);
        self.grid.occupy(Ship::new(id, orientation, run));
    }

    /// Place the ships in `order` onto `grid` at random. Returns the id of the first
    /// ship that could not be placed.
    #[cfg(feature = "rng_gen")]
    fn layout<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        order: &[ShipId],
        rng: &mut R,
    ) -> Result<(), ShipId> {
        for &id in order {
            let shape = self.fleet[id.index()];
            let orientations: Vec<Orientation> = self
                .rules
                .allowed_orientations()
                .filter(|orientation| shape.fits(*orientation, grid.dimensions()))
                .collect();
            let mut placed = None;
            for _ in 0..self.rules.max_attempts {
                let orientation = match orientations.choose(rng) {
                    Some(orientation) => *orientation,
                    None => break,
                };
                let anchor = shape.random_anchor(rng, orientation, grid.dimensions());
                if let Some(run) = shape.project(anchor, orientation, grid.dimensions()) {
                    if check_run(grid, &run, self.rules.allow_touching).is_ok() {
                        placed = Some((orientation, run));
                        break;
                    }
                }
            }
            let (orientation, run) = placed.ok_or(id)?;
            grid.occupy(Ship::new(id, orientation, run));
        }
        Ok(())
    }
}

/// Check that every cell of the run is in bounds and open water, and, unless touching
/// is allowed, that no orthogonal neighbor of the run belongs to a ship.
fn check_run(
    grid: &Grid,
    run: &[Coordinate],
    allow_touching: bool,
) -> Result<(), CannotPlaceReason> {
    for coord in run {
        match grid.get(coord) {
            None => return Err(CannotPlaceReason::OutOfBounds),
            Some(cell) if cell.ship.is_some() => return Err(CannotPlaceReason::AlreadyOccupied),
            Some(_) => {}
        }
        if !allow_touching
            && grid
                .dimensions()
                .neighbors(*coord)
                .any(|neighbor| grid[neighbor].ship.is_some())
        {
            return Err(CannotPlaceReason::Touching);
        }
    }
    Ok(())
}

/// Build a board of the given size with the given ship lengths placed at random.
/// The same seed always produces the same layout.
#[cfg(feature = "rng_gen")]
pub fn random_board<L>(
    width: usize,
    height: usize,
    lengths: L,
    rules: PlacementRules,
    seed: Option<u64>,
) -> Result<BoardController, SetupError>
where
    L: IntoIterator<Item = usize>,
{
    random_board_on(Grid::create(width, height)?, lengths, rules, seed)
}

/// Place the given ship lengths at random on an empty grid with its own geometry and
/// palette. The same seed always produces the same layout.
#[cfg(feature = "rng_gen")]
pub fn random_board_on<L>(
    grid: Grid,
    lengths: L,
    rules: PlacementRules,
    seed: Option<u64>,
) -> Result<BoardController, SetupError>
where
    L: IntoIterator<Item = usize>,
{
    let mut placer = ShipPlacer::new(grid, lengths, rules)?;
    placer.place_remaining_seeded(seed)?;
    Ok(BoardController::new(placer.grid))
}
