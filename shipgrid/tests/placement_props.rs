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
use proptest::{prelude::*, test_runner::TestCaseError};

use shipgrid::{
    board::{
        random_board, CellState, Dimensions, Geometry, Grid, PlacementRules, Palette,
    },
    ships::{Line, ShipId, STANDARD_FLEET},
};

/// Check the structural guarantees of any finished layout.
fn check_layout(grid: &Grid, lengths: &[usize], touching: bool) -> Result<(), TestCaseError> {
    prop_assert_eq!(grid.ships().count(), lengths.len());
    for ship in grid.ships() {
        prop_assert_eq!(ship.len(), lengths[ship.id().index()]);
        prop_assert!(Line::new(ship.len()).is_valid_placement(ship.coords(), grid.dimensions()));
        for coord in ship.coords() {
            prop_assert_eq!(grid[*coord].ship(), Some(ship.id()));
        }
    }
    // Ships are disjoint, so the occupied cells add up to the fleet.
    let occupied = grid
        .cells()
        .filter(|cell| cell.state() == CellState::Ship)
        .count();
    prop_assert_eq!(occupied, lengths.iter().sum::<usize>());

    for cell in grid.cells() {
        let id = match cell.ship() {
            Some(id) => id,
            None => continue,
        };
        prop_assert_eq!(cell.state(), CellState::Ship);
        if !touching {
            for neighbor in grid.neighbors(cell.x(), cell.y()).unwrap() {
                if let Some(other) = neighbor.ship() {
                    prop_assert_eq!(other, id);
                }
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn standard_fleet_layouts_hold(
        seed in any::<u64>(),
        width in 10usize..=16,
        height in 10usize..=16,
        touching in any::<bool>(),
    ) {
        let rules = PlacementRules::default().with_touching(touching);
        let board = random_board(width, height, STANDARD_FLEET.iter().copied(), rules, Some(seed))
            .unwrap();
        check_layout(board.grid(), &STANDARD_FLEET, touching)?;
    }

    #[test]
    fn small_touching_layouts_hold(
        seed in any::<u64>(),
        width in 4usize..=8,
        height in 4usize..=8,
        lengths in prop::collection::vec(1usize..=4, 1..=3),
    ) {
        let rules = PlacementRules::default().with_touching(true);
        let board = random_board(width, height, lengths.iter().copied(), rules, Some(seed))
            .unwrap();
        check_layout(board.grid(), &lengths, true)?;
    }

    #[test]
    fn grids_cover_every_cell_once(
        width in 1usize..=40,
        height in 1usize..=40,
        cell_size in 1u32..=64,
        offset in (0u64..1000, 0u64..1000),
    ) {
        let geometry = Geometry::new(cell_size).unwrap().with_offset(offset.0, offset.1);
        let grid = Grid::with_layout(Dimensions::new(width, height), geometry, Palette::default())
            .unwrap();
        prop_assert_eq!(grid.cells().count(), width * height);
        for (idx, cell) in grid.cells().enumerate() {
            prop_assert_eq!((cell.x(), cell.y()), (idx % width, idx / width));
            prop_assert_eq!(cell.state(), CellState::NoShip);
            let px = cell.origin_x() + u64::from(cell_size) - 1;
            let py = cell.origin_y() + u64::from(cell_size) - 1;
            prop_assert_eq!(grid.coordinate_at_pixel(cell.origin_x(), cell.origin_y()), Some(cell.coord()));
            prop_assert_eq!(grid.coordinate_at_pixel(px, py), Some(cell.coord()));
        }
    }

    #[test]
    fn sinking_one_ship_leaves_game_running(seed in any::<u64>(), target in 0usize..5) {
        let mut board = random_board(
            10,
            10,
            STANDARD_FLEET.iter().copied(),
            PlacementRules::default(),
            Some(seed),
        )
        .unwrap();
        let id = ShipId::new(target);
        let coords = board.ship(id).unwrap().coords().to_vec();
        for coord in coords {
            prop_assert_eq!(board.hit_coord(coord).unwrap().ship(), Some(id));
        }
        prop_assert!(board.is_ship_sunk(id));
        prop_assert!(!board.is_game_over());
        for ship in board.ships() {
            prop_assert_eq!(board.is_ship_sunk(ship.id()), ship.id() == id);
        }
    }

    #[test]
    fn sinking_every_ship_ends_game(seed in any::<u64>()) {
        let mut board = random_board(
            10,
            10,
            STANDARD_FLEET.iter().copied(),
            PlacementRules::default(),
            Some(seed),
        )
        .unwrap();
        let coords: Vec<_> = board.ships().flat_map(|ship| ship.coords().to_vec()).collect();
        let (last, rest) = coords.split_last().unwrap();
        for coord in rest {
            board.hit_coord(*coord).unwrap();
            prop_assert!(!board.is_game_over());
        }
        board.hit_coord(*last).unwrap();
        prop_assert!(board.is_game_over());
    }
}
