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
use shipgrid::{
    board::{
        random_board, BoardController, CannotShootReason, Cell, CellState, Coordinate, Geometry,
        Grid, GridError, HitOutcome, PlacementRules, ShipPlacer,
    },
    ships::{Orientation, ShipId, STANDARD_FLEET},
};

/// 5x5 board with a 3-long ship along the top and a 2-long ship in the bottom right.
fn small_board() -> BoardController {
    let grid = Grid::create(5, 5).unwrap();
    let mut placer = ShipPlacer::new(grid, vec![3, 2], PlacementRules::default()).unwrap();
    placer
        .place_ship(ShipId::new(0), Coordinate::new(0, 0), Orientation::Horizontal)
        .unwrap();
    placer
        .place_ship(ShipId::new(1), Coordinate::new(4, 3), Orientation::Vertical)
        .unwrap();
    placer.finish().unwrap()
}

fn snapshot(board: &BoardController) -> Vec<Cell> {
    board.grid().cells().cloned().collect()
}

#[test]
fn new_board_is_afloat() {
    let board = small_board();
    assert_eq!(board.remaining_cells(), 5);
    assert_eq!(board.ships_afloat(), 2);
    assert!(!board.is_game_over());
    assert!(!board.is_ship_sunk(ShipId::new(0)));
}

#[test]
fn miss_marks_water() {
    let mut board = small_board();
    let outcome = board.hit(0, 4).unwrap();
    assert_eq!(outcome, HitOutcome::Miss);
    assert_eq!(outcome.state(), CellState::NoShip);
    assert_eq!(outcome.ship(), None);
    let cell = board.cell_at(0, 4).unwrap();
    assert!(cell.hit());
    assert_eq!(cell.state(), CellState::NoShip);
    assert_eq!(board.remaining_cells(), 5);
}

#[test]
fn ship_sinks_after_its_last_cell() {
    let mut board = small_board();
    let id = ShipId::new(0);
    assert_eq!(board.hit(0, 0), Ok(HitOutcome::Hit(id)));
    assert_eq!(board.hit(2, 0), Ok(HitOutcome::Hit(id)));
    assert!(!board.is_ship_sunk(id));
    let outcome = board.hit(1, 0).unwrap();
    assert_eq!(outcome, HitOutcome::Sunk(id));
    assert_eq!(outcome.state(), CellState::Ship);
    assert!(board.is_ship_sunk(id));
    assert!(!board.is_ship_sunk(ShipId::new(1)));
    assert!(!board.is_game_over());
    assert_eq!(board.ships_afloat(), 1);
    assert_eq!(board.remaining_cells(), 2);
    assert_eq!(board.ship(id).unwrap().hits(), 3);
}

#[test]
fn last_ship_cell_defeats_the_board() {
    let mut board = small_board();
    for x in 0..3 {
        board.hit(x, 0).unwrap();
    }
    assert_eq!(board.hit(4, 3), Ok(HitOutcome::Hit(ShipId::new(1))));
    assert!(!board.is_game_over());
    assert_eq!(board.hit(4, 4), Ok(HitOutcome::Defeated(ShipId::new(1))));
    assert!(board.is_game_over());
    assert!(board.is_ship_sunk(ShipId::new(1)));
    assert_eq!(board.remaining_cells(), 0);
    assert_eq!(board.ships_afloat(), 0);
}

#[test]
fn repeated_hit_changes_nothing() {
    let mut board = small_board();
    board.hit(0, 0).unwrap();
    board.hit(3, 3).unwrap();
    let before = snapshot(&board);

    for &(x, y) in &[(0, 0), (3, 3)] {
        let err = board.hit(x, y).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::AlreadyHit);
        assert_eq!(err.coord(), Coordinate::new(x, y));
        assert!(err.is_recoverable());
    }
    assert_eq!(snapshot(&board), before);
    assert_eq!(board.remaining_cells(), 4);
    assert_eq!(board.ship(ShipId::new(0)).unwrap().hits(), 1);
}

#[test]
fn out_of_bounds_hit_changes_nothing() {
    let mut board = small_board();
    let before = snapshot(&board);
    let err = board.hit(5, 0).unwrap_err();
    assert_eq!(err.reason(), CannotShootReason::OutOfBounds);
    assert!(!err.is_recoverable());
    assert_eq!(board.hit(0, 5).unwrap_err().coord(), Coordinate::new(0, 5));
    assert_eq!(snapshot(&board), before);
}

#[test]
fn water_can_be_hit_after_game_over() {
    let mut board = small_board();
    for &(x, y) in &[(0, 0), (1, 0), (2, 0), (4, 3), (4, 4)] {
        board.hit(x, y).unwrap();
    }
    assert!(board.is_game_over());
    assert_eq!(board.hit(2, 2), Ok(HitOutcome::Miss));
    assert!(board.is_game_over());
}

#[test]
fn unknown_ships_are_never_sunk() {
    let board = small_board();
    assert!(!board.is_ship_sunk(ShipId::new(9)));
    assert!(board.ship(ShipId::new(9)).is_none());
}

#[test]
fn hits_can_target_pixels() {
    let mut board = small_board();
    // default cells are 32 pixels wide
    let coord = board.grid().coordinate_at_pixel(70, 10).unwrap();
    assert_eq!(coord, Coordinate::new(2, 0));
    assert_eq!(board.hit_coord(coord), Ok(HitOutcome::Hit(ShipId::new(0))));
}

#[test]
fn row_major_sweep_ends_on_last_ship_cell() {
    let mut board = random_board(
        10,
        10,
        STANDARD_FLEET.iter().copied(),
        PlacementRules::default(),
        Some(42),
    )
    .unwrap();
    let total: usize = STANDARD_FLEET.iter().sum();
    let mut ship_hits = 0;
    let mut defeats = 0;
    for y in 0..10 {
        for x in 0..10 {
            let outcome = board.hit(x, y).unwrap();
            if outcome.ship().is_some() {
                ship_hits += 1;
            }
            if let HitOutcome::Defeated(_) = outcome {
                defeats += 1;
            }
            assert_eq!(board.is_game_over(), ship_hits == total);
        }
    }
    assert_eq!(ship_hits, total);
    assert_eq!(defeats, 1);
    assert!(board.ships().all(|ship| board.is_ship_sunk(ship.id())));
}

#[test]
fn live_board_can_be_repainted() {
    let mut board = small_board();
    board.hit(0, 0).unwrap();
    board.paint(0, 0, "red").unwrap();
    board.paint(3, 3, "white").unwrap();

    let hit = board.cell_at(0, 0).unwrap();
    assert_eq!(hit.color(), "red");
    assert_eq!(hit.ship(), Some(ShipId::new(0)));
    assert!(hit.hit());
    assert_eq!(board.cell_at(3, 3).unwrap().color(), "white");
    assert_eq!(
        board.paint(5, 5, "red"),
        Err(GridError::OutOfBounds(Coordinate::new(5, 5)))
    );
    assert_eq!(board.remaining_cells(), 4);
}

#[test]
fn live_board_can_be_rescaled() {
    let mut board = small_board();
    board.hit(1, 0).unwrap();
    board
        .set_geometry(Geometry::new(10).unwrap().with_offset(100, 50))
        .unwrap();
    let cell = board.cell_at(4, 3).unwrap();
    assert_eq!((cell.origin_x(), cell.origin_y()), (140, 80));
    let coord = board.grid().coordinate_at_pixel(125, 55).unwrap();
    assert_eq!(coord, Coordinate::new(2, 0));
    assert_eq!(board.hit_coord(coord), Ok(HitOutcome::Hit(ShipId::new(0))));

    let huge = Geometry::new(10).unwrap().with_offset(u64::max_value(), 0);
    assert_eq!(board.set_geometry(huge), Err(GridError::GeometryOverflow));
    assert_eq!(board.cell_at(4, 3).unwrap().origin_x(), 140);
    assert_eq!(board.ship(ShipId::new(0)).unwrap().hits(), 2);
}
