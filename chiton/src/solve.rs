use std::fmt;
use std::fs;
use std::path::Path;

use chiton_core::{CostGrid, Point, Range};
use chiton_paths::{LogObserver, PathNode, PathRange};

use crate::error::SolveError;

/// What to solve on a loaded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveConfig {
    /// Tile expansion factors, solved in order.
    pub factors: Vec<i32>,
    /// Start cell; top-left when `None`.
    pub from: Option<Point>,
    /// Target cell; bottom-right of each expanded map when `None`.
    pub to: Option<Point>,
    /// Keep the route in each [`Solution`].
    pub show_path: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            factors: vec![1, 5],
            from: None,
            to: None,
            show_path: false,
        }
    }
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub factor: i32,
    pub from: Point,
    pub to: Point,
    pub cost: i32,
    /// Route from `from` to `to`, if requested.
    pub path: Option<Vec<PathNode>>,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "factor={} cost={}", self.factor, self.cost)?;
        if let Some(path) = &self.path {
            for (i, node) in path.iter().enumerate() {
                let sep = if i == 0 { "\n  " } else { " -> " };
                write!(f, "{sep}{}", node.pos)?;
            }
        }
        Ok(())
    }
}

/// Read and parse a map file.
pub fn load(path: impl AsRef<Path>) -> Result<CostGrid, SolveError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = CostGrid::parse(&text)?;
    log::debug!(
        "loaded {}x{} map from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

/// Solve every factor in `config` on `base`.
///
/// Stops at the first failing factor. One [`PathRange`] is reused across
/// all queries.
pub fn solve(base: &CostGrid, config: &SolveConfig) -> Result<Vec<Solution>, SolveError> {
    let mut pr = PathRange::new(Range::default());
    config
        .factors
        .iter()
        .map(|&factor| -> Result<Solution, SolveError> {
            let grid = base.tile(factor)?;
            pr.set_range(grid.bounds());
            let from = config.from.unwrap_or(grid.top_left());
            let to = config.to.unwrap_or(grid.bottom_right());

            // Progress roughly every tenth of the map.
            let mut observer = LogObserver::new(format!("factor {factor}")).every(grid.len() / 10);
            let cost = pr.shortest_path_with(&grid, from, to, &mut observer)?;
            log::info!(
                "factor {factor}: {}x{} map, ({from}) -> ({to}) costs {cost}",
                grid.width(),
                grid.height()
            );

            Ok(Solution {
                factor,
                from,
                to,
                cost,
                path: if config.show_path {
                    pr.path_to(to)
                } else {
                    None
                },
            })
        })
        .collect()
}
