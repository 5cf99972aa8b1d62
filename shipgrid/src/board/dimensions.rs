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
//! Rectangular bounds of a grid.
use crate::{board::Coordinate, ships::Orientation};

/// Width and height of a rectangular grid. Handles bounds checks, linearizing
/// coordinates into row-major indexes and computing neighbor cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dimensions {
    /// Width of the grid. This cooresponds to the `x` [`Coordinate`].
    width: usize,
    /// Height of the grid. This cooresponds to the `y` [`Coordinate`].
    height: usize,
}

impl Dimensions {
    /// Create new [`Dimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("Dimensions must be nonzero, got {}x{}", width, height);
                } else {
                    panic!(
                        "Dimensions too large: {} * {} > {}",
                        width,
                        height,
                        usize::max_value()
                    );
                }
            }
        }
    }

    /// Create new [`Dimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::max_value()` or if `width` or
    /// `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width
                .checked_mul(height)
                .map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`Dimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`Dimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Compute the total number of cells. Used to allocate storage for the grid.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Number of cells available along the given [`Orientation`].
    pub fn extent(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Returns true if the coordinate lies inside these [`Dimensions`].
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to a row-major index.
    /// Panics if the coordinate is out of range.
    pub fn linearize(&self, coord: &Coordinate) -> usize {
        match self.try_linearize(coord) {
            Some(v) => v,
            None => panic!("{:?} is out of bounds for {:?}", coord, self),
        }
    }

    /// Convert a coordinate to a row-major index.
    /// Returns `None` if the coordinate is out of range.
    pub fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    /// Get back a coordinate from a row-major index. The result is out of bounds if
    /// `idx >= total_size`.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate {
            x: idx % self.width,
            y: idx / self.width,
        }
    }

    /// The next in-bounds coordinate after `coord` moving right or down, depending on
    /// the orientation.
    pub fn step(&self, coord: Coordinate, orientation: Orientation) -> Option<Coordinate> {
        let next = match orientation {
            Orientation::Horizontal => Coordinate::new(coord.x.checked_add(1)?, coord.y),
            Orientation::Vertical => Coordinate::new(coord.x, coord.y.checked_add(1)?),
        };
        if self.contains(&next) {
            Some(next)
        } else {
            None
        }
    }

    /// Iterate the orthogonal neighbors of the given coordinate. Diagonals are not
    /// neighbors. Out of bounds coordinates have no neighbors.
    pub fn neighbors(&self, coord: Coordinate) -> Neighbors {
        Neighbors {
            dim: *self,
            coord,
            // If the coordinate is out of bounds, skip directly to the End state so we
            // don't have to check bounds every iteration.
            step: if self.contains(&coord) {
                NeighborStep::Up
            } else {
                NeighborStep::End
            },
        }
    }

    /// Return true if the given coordinates are orthogonal neighbors.
    pub fn is_neighbor(&self, c1: &Coordinate, c2: &Coordinate) -> bool {
        self.contains(c1)
            && self.contains(c2)
            && c1.x.max(c2.x) - c1.x.min(c2.x) + c1.y.max(c2.y) - c1.y.min(c2.y) == 1
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates of that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (0..self.height).map(move |y| (0..width).map(move |x| Coordinate { x, y }))
    }
}

impl Default for Dimensions {
    /// Construct the default dimensions, a 10x10 grid.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

/// Iterator over the orthogonal neighbors of a coordinate, in the order up, down, left,
/// right.
#[derive(Debug, Clone)]
pub struct Neighbors {
    dim: Dimensions,
    coord: Coordinate,
    step: NeighborStep,
}

#[derive(Debug, Copy, Clone)]
enum NeighborStep {
    Up,
    Down,
    Left,
    Right,
    End,
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        loop {
            match self.step {
                NeighborStep::Up => {
                    self.step = NeighborStep::Down;
                    if let Some(y) = self.coord.y.checked_sub(1) {
                        return Some(Coordinate::new(self.coord.x, y));
                    }
                }
                NeighborStep::Down => {
                    self.step = NeighborStep::Left;
                    let y = self.coord.y + 1;
                    if y < self.dim.height {
                        return Some(Coordinate::new(self.coord.x, y));
                    }
                }
                NeighborStep::Left => {
                    self.step = NeighborStep::Right;
                    if let Some(x) = self.coord.x.checked_sub(1) {
                        return Some(Coordinate::new(x, self.coord.y));
                    }
                }
                NeighborStep::Right => {
                    self.step = NeighborStep::End;
                    let x = self.coord.x + 1;
                    if x < self.dim.width {
                        return Some(Coordinate::new(x, self.coord.y));
                    }
                }
                NeighborStep::End => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(dim: &Dimensions, x: usize, y: usize) -> Vec<(usize, usize)> {
        dim.neighbors(Coordinate::new(x, y)).map(Into::into).collect()
    }

    #[test]
    fn rejects_empty_and_overflowing_dimensions() {
        assert!(Dimensions::try_new(0, 5).is_none());
        assert!(Dimensions::try_new(5, 0).is_none());
        assert!(Dimensions::try_new(usize::max_value(), 2).is_none());
        assert_eq!(Dimensions::try_new(3, 4).map(|d| d.total_size()), Some(12));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let dim = Dimensions::new(4, 3);
        assert_eq!(neighbors_of(&dim, 0, 0), vec![(0, 1), (1, 0)]);
        assert_eq!(neighbors_of(&dim, 3, 2), vec![(3, 1), (2, 2)]);
    }

    #[test]
    fn interior_has_four_neighbors_in_order() {
        let dim = Dimensions::new(4, 3);
        assert_eq!(
            neighbors_of(&dim, 1, 1),
            vec![(1, 0), (1, 2), (0, 1), (2, 1)]
        );
    }

    #[test]
    fn out_of_bounds_has_no_neighbors() {
        let dim = Dimensions::new(4, 3);
        assert!(neighbors_of(&dim, 4, 0).is_empty());
        assert!(neighbors_of(&dim, 0, 3).is_empty());
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let dim = Dimensions::new(1, 1);
        assert!(neighbors_of(&dim, 0, 0).is_empty());
    }

    #[test]
    fn linearize_is_row_major() {
        let dim = Dimensions::new(4, 3);
        assert_eq!(dim.try_linearize(&Coordinate::new(1, 2)), Some(9));
        assert_eq!(dim.un_linearize(9), Coordinate::new(1, 2));
        assert_eq!(dim.try_linearize(&Coordinate::new(4, 0)), None);
    }

    #[test]
    fn step_stops_at_edge() {
        let dim = Dimensions::new(3, 2);
        let edge = Coordinate::new(2, 1);
        assert_eq!(dim.step(edge, Orientation::Horizontal), None);
        assert_eq!(dim.step(edge, Orientation::Vertical), None);
        assert_eq!(
            dim.step(Coordinate::new(0, 0), Orientation::Vertical),
            Some(Coordinate::new(0, 1))
        );
    }

    #[test]
    fn diagonals_are_not_neighbors() {
        let dim = Dimensions::default();
        let center = Coordinate::new(5, 5);
        assert!(dim.is_neighbor(&center, &Coordinate::new(5, 6)));
        assert!(!dim.is_neighbor(&center, &Coordinate::new(6, 6)));
        assert!(!dim.is_neighbor(&center, &center));
    }
}
