//! **chiton-core** — core types for weighted risk-grid pathfinding.
//!
//! This crate provides the geometry primitives and the immutable cost grid
//! that the search crate operates on: loading a grid of single-digit risk
//! levels from text, and expanding it into a larger tiled map.

pub mod geom;
pub mod grid;

pub use geom::{ParsePointError, Point, Range};
pub use grid::{CostGrid, GridError, Risk, wrap};
