//! chiton — lowest-risk route through a cave map.
//!
//! Loads a grid of risk digits, optionally expands it into a tiled map, and
//! reports the minimal total risk between two cells (top-left to
//! bottom-right by default).

mod cli;
mod error;
mod solve;

pub use cli::Args;
pub use error::SolveError;
pub use solve::{Solution, SolveConfig, load, solve};
