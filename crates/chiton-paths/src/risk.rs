//! [`CostGrid`] as a search graph: 4-connected, entering a cell costs its risk.

use chiton_core::{CostGrid, Point};

use crate::PathRange;
use crate::pathrange::{PathError, UNREACHABLE};
use crate::traits::{Pather, WeightedPather};

impl Pather for CostGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.contains(n)));
    }
}

impl WeightedPather for CostGrid {
    #[inline]
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.cost(to).unwrap_or(UNREACHABLE)
    }
}

/// Minimal total risk of moving from `from` to `to` on `grid`.
///
/// One-shot convenience over [`PathRange::shortest_path`]; the distance
/// table is dropped on return.
pub fn shortest_path_cost(grid: &CostGrid, from: Point, to: Point) -> Result<i32, PathError> {
    PathRange::new(grid.bounds()).shortest_path(grid, from, to)
}
