use std::path::PathBuf;

use chiton_core::Point;
use clap::Parser;

use crate::solve::SolveConfig;

/// Find the lowest total risk route through a cave map.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Map file: rows of digits 1-9, all the same width.
    pub input: PathBuf,

    /// Tile expansion factor to solve; repeat for several (default: 1 and 5).
    #[arg(short, long = "factor", value_name = "N")]
    pub factors: Vec<i32>,

    /// Start cell as x,y (default: top-left).
    #[arg(long, value_name = "X,Y")]
    pub from: Option<Point>,

    /// Target cell as x,y (default: bottom-right of the expanded map).
    #[arg(long, value_name = "X,Y")]
    pub to: Option<Point>,

    /// Print the route as well as its cost.
    #[arg(short, long)]
    pub path: bool,

    /// Log search statistics (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The search settings these arguments describe.
    pub fn config(&self) -> SolveConfig {
        let mut config = SolveConfig {
            from: self.from,
            to: self.to,
            show_path: self.path,
            ..SolveConfig::default()
        };
        if !self.factors.is_empty() {
            config.factors = self.factors.clone();
        }
        config
    }
}
