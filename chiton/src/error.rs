use std::fmt;
use std::io;
use std::path::PathBuf;

use chiton_core::GridError;
use chiton_paths::PathError;

/// Errors surfaced by the solve driver.
#[derive(Debug)]
pub enum SolveError {
    /// The input file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The input was malformed or an expansion factor was invalid.
    Grid(GridError),
    /// An endpoint was out of bounds or the target could not be reached.
    Path(PathError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Grid(e) => fmt::Display::fmt(e, f),
            Self::Path(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            Self::Path(e) => Some(e),
        }
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PathError> for SolveError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}
