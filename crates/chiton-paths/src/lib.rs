//! Shortest paths over weighted risk grids.
//!
//! The engine is Dijkstra's algorithm with a binary-heap frontier, run
//! through [`PathRange`], which owns and reuses its node arena so that
//! repeated queries incur no allocations after warm-up.
//!
//! - [`PathRange::shortest_path`] — minimal cost between two cells
//! - [`PathRange::path_to`] — the route found by the last search
//! - [`shortest_path_cost`] — one-shot query on a [`CostGrid`](chiton_core::CostGrid)
//!
//! Searches can be observed through a [`SearchObserver`]; [`LogObserver`]
//! reports progress and timing through the `log` facade.
//!
//! # Trait hierarchy
//!
//! | Trait | Role |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | edge costs, required by Dijkstra |

mod dijkstra;
mod observer;
mod pathrange;
mod risk;
mod traits;

pub use observer::{LogObserver, SearchObserver, SearchStats};
pub use pathrange::{PathError, PathNode, PathRange, UNREACHABLE};
pub use risk::shortest_path_cost;
pub use traits::{Pather, WeightedPather};
