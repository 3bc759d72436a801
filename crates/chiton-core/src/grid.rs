//! Immutable grid of risk levels.
//!
//! [`Risk`] is a cell cost in `1..=9`. [`CostGrid`] is a dense rectangular
//! arena of risks addressed by `y * width + x`, loaded from rows of digits
//! and optionally expanded into a larger tiled map with [`CostGrid::tile`].

use crate::geom::{Point, Range};
use std::fmt;
use std::str::FromStr;

/// Remap an offset risk value back into `1..=9`, cycling so that nine wraps
/// to one rather than zero.
#[inline]
pub const fn wrap(v: i32) -> i32 {
    (v - 1).rem_euclid(9) + 1
}

/// A single cell's risk level, always in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Risk(u8);

impl Risk {
    pub const MIN: Risk = Risk(1);
    pub const MAX: Risk = Risk(9);

    /// Create a risk level, or `None` if `value` is outside `1..=9`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parse a single ASCII digit `'1'..='9'`.
    pub fn from_digit(ch: char) -> Option<Self> {
        ch.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    /// The underlying cost.
    pub const fn value(self) -> i32 {
        self.0 as i32
    }

    /// The risk raised by `n` levels, wrapping back into `1..=9`.
    pub const fn offset(self, n: i32) -> Self {
        Self(wrap(self.0 as i32 + n) as u8)
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Risk> for i32 {
    fn from(r: Risk) -> Self {
        r.value()
    }
}

/// A dense, immutable 2D grid of [`Risk`] values with its origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct CostGrid {
    cells: Vec<Risk>,
    width: i32,
    height: i32,
}

impl CostGrid {
    /// Parse a grid from newline-separated rows of digits.
    ///
    /// Trailing line breaks and `\r\n` endings are accepted. See
    /// [`from_lines`](Self::from_lines) for the row requirements.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        Self::from_lines(s.trim_end_matches(['\n', '\r']).lines())
    }

    /// Build a grid from rows of digits `'1'..='9'`.
    ///
    /// Every row must have the same length as the first one. The whole
    /// grid is rejected on the first malformed row.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0usize;

        for (y, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut row_len = 0usize;
            for (x, ch) in line.chars().enumerate() {
                let risk = Risk::from_digit(ch).ok_or(GridError::InvalidDigit {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(risk);
                row_len += 1;
            }
            match width {
                None => width = Some(row_len),
                Some(w) if w != row_len => {
                    return Err(GridError::Ragged {
                        row: y,
                        expected: w,
                        found: row_len,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        if cells.is_empty() {
            return Err(GridError::Empty);
        }
        let width = width.unwrap_or_default();
        let (Ok(w), Ok(h), Ok(_)) = (
            i32::try_from(width),
            i32::try_from(height),
            i32::try_from(cells.len()),
        ) else {
            return Err(GridError::TooLarge { width, height });
        };
        Ok(Self {
            cells,
            width: w,
            height: h,
        })
    }

    /// Expand the grid into `factor × factor` tiles.
    ///
    /// The tile at offset `(tx, ty)` holds the base risks raised by
    /// `tx + ty` levels, wrapped back into `1..=9`. A factor of 1 returns an
    /// identical grid.
    pub fn tile(&self, factor: i32) -> Result<Self, GridError> {
        if factor < 1 {
            return Err(GridError::InvalidFactor(factor));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        // Every cell index must stay addressable as an i32.
        let (Some(width), Some(height)) = (
            self.width.checked_mul(factor),
            self.height.checked_mul(factor),
        ) else {
            return Err(GridError::InvalidFactor(factor));
        };
        if width.checked_mul(height).is_none() {
            return Err(GridError::InvalidFactor(factor));
        }

        let cells = Range::new(0, 0, width, height)
            .iter()
            .map(|p| {
                let base = Point::new(p.x % self.width, p.y % self.height);
                self.cells[self.index(base)].offset(p.x / self.width + p.y / self.height)
            })
            .collect();
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// The rectangle covered by the grid, `[(0,0), (width,height))`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// The top-left cell, where searches start by default.
    pub fn top_left(&self) -> Point {
        Point::ZERO
    }

    /// The bottom-right cell, where searches end by default.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.width - 1, self.height - 1)
    }

    /// Get the risk at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Risk> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// The cost of entering `p`, or `None` if out of bounds.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<i32> {
        self.at(p).map(Risk::value)
    }

    /// Iterate over `(Point, Risk)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Risk)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width as usize).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for risk in row {
                write!(f, "{risk}")?;
            }
        }
        Ok(())
    }
}

impl From<CostGrid> for String {
    fn from(g: CostGrid) -> Self {
        g.to_string()
    }
}

impl TryFrom<String> for CostGrid {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

/// Errors that can occur when loading or expanding a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input holds no cells.
    Empty,
    /// A row's width differs from the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `'1'..='9'` was found.
    InvalidDigit { ch: char, pos: Point },
    /// Tile expansion factor below 1, or one whose result has more cells
    /// than an `i32` can count.
    InvalidFactor(i32),
    /// The input has more cells than an `i32` can count.
    TooLarge { width: usize, height: usize },
}

impl GridError {
    /// Whether the error comes from malformed input text rather than a bad
    /// argument.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::InvalidFactor(_))
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: empty input"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidDigit { ch, pos } => {
                write!(f, "grid: invalid risk \u{201c}{ch}\u{201d} at ({pos})")
            }
            Self::InvalidFactor(n) => write!(f, "grid: invalid expansion factor {n}"),
            Self::TooLarge { width, height } => {
                write!(f, "grid: {width}x{height} input is too large")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581";

    #[test]
    fn wrap_rule() {
        assert_eq!(wrap(1), 1);
        assert_eq!(wrap(9), 9);
        assert_eq!(wrap(10), 1);
        assert_eq!(wrap(11), 2);
        assert_eq!(wrap(18), 9);
        assert_eq!(wrap(19), 1);
        assert_eq!(Risk::MAX.offset(1), Risk::MIN);
        assert_eq!(Risk::MAX.offset(2), Risk::new(2).unwrap());
        assert_eq!(Risk::MIN.offset(9), Risk::MIN);
    }

    #[test]
    fn risk_bounds() {
        assert!(Risk::new(0).is_none());
        assert!(Risk::new(10).is_none());
        assert_eq!(Risk::from_digit('7').map(Risk::value), Some(7));
        assert!(Risk::from_digit('0').is_none());
        assert!(Risk::from_digit('x').is_none());
    }

    #[test]
    fn parse_and_size() {
        let g = CostGrid::parse(SAMPLE).unwrap();
        assert_eq!(g.size(), Point::new(10, 10));
        assert_eq!(g.len(), 100);
        assert_eq!(g.cost(Point::new(0, 0)), Some(1));
        assert_eq!(g.cost(Point::new(2, 0)), Some(6));
        assert_eq!(g.cost(Point::new(0, 2)), Some(2));
        assert_eq!(g.cost(Point::new(9, 9)), Some(1));
        assert_eq!(g.cost(Point::new(10, 0)), None);
        assert_eq!(g.cost(Point::new(0, -1)), None);
        assert_eq!(g.bottom_right(), Point::new(9, 9));
    }

    #[test]
    fn parse_tolerates_trailing_newline_and_crlf() {
        let g = CostGrid::parse("12\r\n34\r\n").unwrap();
        assert_eq!(g.size(), Point::new(2, 2));
        assert_eq!(g.cost(Point::new(1, 1)), Some(4));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(CostGrid::parse(""), Err(GridError::Empty));
        assert_eq!(CostGrid::parse("\n\n"), Err(GridError::Empty));
        assert_eq!(
            CostGrid::from_lines(Vec::<String>::new()),
            Err(GridError::Empty)
        );
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = CostGrid::parse("123\n12\n123").unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert!(err.is_malformed_input());
        assert!(matches!(
            CostGrid::parse("12\n\n12"),
            Err(GridError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn parse_rejects_non_digits_and_zero() {
        assert_eq!(
            CostGrid::parse("12\n3a"),
            Err(GridError::InvalidDigit {
                ch: 'a',
                pos: Point::new(1, 1)
            })
        );
        assert_eq!(
            CostGrid::parse("102"),
            Err(GridError::InvalidDigit {
                ch: '0',
                pos: Point::new(1, 0)
            })
        );
        assert!(CostGrid::parse("1 2").is_err());
    }

    #[test]
    fn display_round_trips() {
        let g = CostGrid::parse(SAMPLE).unwrap();
        assert_eq!(g.to_string(), SAMPLE);
        assert_eq!(g.to_string().parse::<CostGrid>().unwrap(), g);
    }

    #[test]
    fn tile_factor_one_is_identity() {
        let g = CostGrid::parse(SAMPLE).unwrap();
        assert_eq!(g.tile(1).unwrap(), g);
    }

    #[test]
    fn tile_rejects_factor_below_one() {
        let g = CostGrid::parse("8").unwrap();
        assert_eq!(g.tile(0), Err(GridError::InvalidFactor(0)));
        assert_eq!(g.tile(-3), Err(GridError::InvalidFactor(-3)));
        assert!(!GridError::InvalidFactor(0).is_malformed_input());
    }

    #[test]
    fn tile_rejects_unaddressable_size() {
        let g = CostGrid::parse("1").unwrap();
        // 46341 * 46341 cells overflow an i32 even though each side fits.
        assert_eq!(g.tile(46341), Err(GridError::InvalidFactor(46341)));
        assert_eq!(g.tile(i32::MAX), Err(GridError::InvalidFactor(i32::MAX)));
        let wide = CostGrid::parse(&"1".repeat(70_000)).unwrap();
        assert_eq!(wide.tile(200), Err(GridError::InvalidFactor(200)));
        assert_eq!(
            GridError::TooLarge {
                width: 70_000,
                height: 40_000
            }
            .to_string(),
            "grid: 70000x40000 input is too large"
        );
    }

    #[test]
    fn tile_single_cell() {
        let g = CostGrid::parse("8").unwrap().tile(5).unwrap();
        assert_eq!(
            g.to_string(),
            "\
89123
91234
12345
23456
34567"
        );
    }

    #[test]
    fn tile_size_and_wrapping() {
        let base = CostGrid::parse(SAMPLE).unwrap();
        let big = base.tile(5).unwrap();
        assert_eq!(big.size(), Point::new(50, 50));
        assert_eq!(big.len(), 2500);
        // Each tile repeats the base shifted by its offsets.
        for (p, risk) in base.iter() {
            for ty in 0..5 {
                for tx in 0..5 {
                    let q = Point::new(p.x + tx * 10, p.y + ty * 10);
                    assert_eq!(big.at(q), Some(risk.offset(tx + ty)));
                }
            }
        }
        assert_eq!(big.cost(Point::new(49, 49)), Some(9));
        let first_row: String = big.to_string().lines().next().unwrap().to_string();
        assert_eq!(
            first_row,
            "11637517422274862853338597396444961841755517295286"
        );
    }

    #[test]
    fn iter_is_row_major() {
        let g = CostGrid::parse("12\n34").unwrap();
        let items: Vec<_> = g.iter().map(|(p, r)| (p, r.value())).collect();
        assert_eq!(
            items,
            vec![
                (Point::new(0, 0), 1),
                (Point::new(1, 0), 2),
                (Point::new(0, 1), 3),
                (Point::new(1, 1), 4),
            ]
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = CostGrid::parse("123\n456").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "\"123\\n456\"");
        let back: CostGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn grid_deserialize_validates() {
        assert!(serde_json::from_str::<CostGrid>("\"12\\n3\"").is_err());
    }
}
