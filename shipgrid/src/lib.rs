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
//! Board core for Battleship-style games.
//!
//! A [`Grid`][board::Grid] of [`Cell`][board::Cell]s is created empty, handed to a
//! [`ShipPlacer`][board::ShipPlacer] which places straight ships on it (manually, or at
//! random with the `rng_gen` feature), and finally becomes a
//! [`BoardController`][board::BoardController] which resolves hits and reports when
//! ships are sunk and the game is over.
//!
//! ```
//! use shipgrid::{
//!     board::{Grid, HitOutcome, PlacementRules, ShipPlacer},
//!     ships::{Orientation, ShipId},
//! };
//!
//! let grid = Grid::create(6, 6).unwrap();
//! let mut placer = ShipPlacer::new(grid, vec![3, 2], PlacementRules::default()).unwrap();
//! placer
//!     .place_ship(ShipId::new(0), (0, 0).into(), Orientation::Horizontal)
//!     .unwrap();
//! placer
//!     .place_ship(ShipId::new(1), (5, 4).into(), Orientation::Vertical)
//!     .unwrap();
//! let mut board = placer.finish().ok().unwrap();
//!
//! assert_eq!(board.hit(0, 0).unwrap(), HitOutcome::Hit(ShipId::new(0)));
//! assert_eq!(board.hit(3, 3).unwrap(), HitOutcome::Miss);
//! assert!(!board.is_game_over());
//! ```

pub mod board;
pub mod ships;
