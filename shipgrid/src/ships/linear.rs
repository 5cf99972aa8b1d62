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
#[cfg(feature = "rng_gen")]
use rand::Rng;

use crate::{
    board::{Coordinate, Dimensions},
    ships::Orientation,
};

/// A straight ship shape, with a given length.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Line(usize);

impl Line {
    /// Construct a linear ship with the specified length. Panics if len is 0.
    pub fn new(len: usize) -> Self {
        assert!(len > 0);
        Line(len)
    }

    /// Construct a linear ship with the specified length. Returns `None` if len is 0.
    pub fn try_new(len: usize) -> Option<Self> {
        if len > 0 {
            Some(Line(len))
        } else {
            None
        }
    }

    /// Get the length of this ship.
    pub fn len(&self) -> usize {
        self.0
    }

    /// Returns true if the grid is long enough along the orientation to hold this ship.
    pub fn fits(&self, orientation: Orientation, dim: &Dimensions) -> bool {
        self.0 <= dim.extent(orientation)
    }

    /// Get the run of cells this shape covers when started at `anchor` and extended
    /// along `orientation`. Returns `None` if any part of the run leaves the grid.
    /// Does not in any way account for whether cells are already occupied.
    pub fn project(
        &self,
        anchor: Coordinate,
        orientation: Orientation,
        dim: &Dimensions,
    ) -> Option<Vec<Coordinate>> {
        if !dim.contains(&anchor) {
            return None;
        }
        let mut route = Vec::with_capacity(self.0);
        route.push(anchor);
        let mut last = anchor;
        while route.len() < self.0 {
            last = dim.step(last, orientation)?;
            route.push(last);
        }
        Some(route)
    }

    /// Return true if the given run is a valid placement of this ship in the specified
    /// dimensions: the right length, in bounds, and each cell adjacent to and colinear
    /// with the previous ones. Does not account for whether cells are already occupied.
    pub fn is_valid_placement(&self, proj: &[Coordinate], dim: &Dimensions) -> bool {
        if proj.len() != self.len() {
            return false;
        }
        let mut proj = proj.iter();
        // Self len must be nonzero and proj len must equal self len, so unwrap is safe.
        let start = proj.next().unwrap();
        if !dim.contains(start) {
            return false;
        }
        let mut previous = start;
        let mut seen = vec![start];
        for coord in proj {
            if dim.is_neighbor(coord, previous)
                && is_colinear(start, previous, coord)
                && !seen.contains(&coord)
            {
                seen.push(coord);
                previous = coord;
            } else {
                return false;
            }
        }
        true
    }

    /// Pick a random anchor from which the whole run stays in bounds. The caller must
    /// check [`fits`][Line::fits] first.
    #[cfg(feature = "rng_gen")]
    pub(crate) fn random_anchor<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        orientation: Orientation,
        dim: &Dimensions,
    ) -> Coordinate {
        let (max_x, max_y) = match orientation {
            Orientation::Horizontal => (dim.width() - self.0, dim.height() - 1),
            Orientation::Vertical => (dim.width() - 1, dim.height() - self.0),
        };
        Coordinate::new(rng.gen_range(0, max_x + 1), rng.gen_range(0, max_y + 1))
    }
}

/// Returns true if the 3 coordinates lie on one row or one column.
fn is_colinear(c1: &Coordinate, c2: &Coordinate, c3: &Coordinate) -> bool {
    let difx = c1.x != c2.x || c2.x != c3.x;
    let dify = c1.y != c2.y || c2.y != c3.y;
    // Allowed to differ in only one direction.
    !(difx && dify)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(list: &[(usize, usize)]) -> Vec<Coordinate> {
        list.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn projects_right_and_down() {
        let dim = Dimensions::new(5, 5);
        let line = Line::new(3);
        assert_eq!(
            line.project(Coordinate::new(1, 4), Orientation::Horizontal, &dim),
            Some(coords(&[(1, 4), (2, 4), (3, 4)]))
        );
        assert_eq!(
            line.project(Coordinate::new(4, 0), Orientation::Vertical, &dim),
            Some(coords(&[(4, 0), (4, 1), (4, 2)]))
        );
    }

    #[test]
    fn projection_leaving_grid_is_rejected() {
        let dim = Dimensions::new(5, 5);
        let line = Line::new(3);
        assert_eq!(line.project(Coordinate::new(3, 0), Orientation::Horizontal, &dim), None);
        assert_eq!(line.project(Coordinate::new(0, 3), Orientation::Vertical, &dim), None);
        assert_eq!(line.project(Coordinate::new(5, 0), Orientation::Vertical, &dim), None);
    }

    #[test]
    fn single_cell_ship_projects_to_anchor() {
        let dim = Dimensions::new(2, 2);
        assert_eq!(
            Line::new(1).project(Coordinate::new(1, 1), Orientation::Horizontal, &dim),
            Some(coords(&[(1, 1)]))
        );
    }

    #[test]
    fn validates_straight_runs_only() {
        let dim = Dimensions::new(5, 5);
        let line = Line::new(3);
        assert!(line.is_valid_placement(&coords(&[(0, 0), (1, 0), (2, 0)]), &dim));
        assert!(line.is_valid_placement(&coords(&[(2, 2), (2, 1), (2, 0)]), &dim));
        // gap
        assert!(!line.is_valid_placement(&coords(&[(0, 0), (1, 0), (3, 0)]), &dim));
        // bend
        assert!(!line.is_valid_placement(&coords(&[(0, 0), (1, 0), (1, 1)]), &dim));
        // doubles back
        assert!(!line.is_valid_placement(&coords(&[(0, 0), (1, 0), (0, 0)]), &dim));
        // wrong length
        assert!(!line.is_valid_placement(&coords(&[(0, 0), (1, 0)]), &dim));
        // out of bounds
        assert!(!line.is_valid_placement(&coords(&[(3, 0), (4, 0), (5, 0)]), &dim));
    }

    #[test]
    fn fits_checks_extent() {
        let dim = Dimensions::new(4, 2);
        let line = Line::new(3);
        assert!(line.fits(Orientation::Horizontal, &dim));
        assert!(!line.fits(Orientation::Vertical, &dim));
        assert_eq!(Line::try_new(0), None);
    }
}
