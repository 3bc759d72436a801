use std::collections::BinaryHeap;
use std::fmt;

use chiton_core::{Point, Range};

/// A position with the cumulative cost of reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

// ---------------------------------------------------------------------------
// Distance table entries
// ---------------------------------------------------------------------------

/// One distance-table entry. Only meaningful when `generation` matches the
/// owning [`PathRange`]'s current search; older entries read as absent.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) settled: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
            settled: false,
        }
    }
}

/// Heap entry: a node index with the tentative cost it was pushed with.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) g: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest g first.
        other.g.cmp(&self.g).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel cost meaning "not reached".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by shortest-path queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint lies outside the search range.
    OutOfBounds(Point),
    /// The frontier emptied before the target was settled.
    Unreachable { from: Point, to: Point },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "path: point ({p}) is out of bounds"),
            Self::Unreachable { from, to } => {
                write!(f, "path: no route from ({from}) to ({to})")
            }
        }
    }
}

impl std::error::Error for PathError {}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Search coordinator for a grid rectangle.
///
/// `PathRange` owns the distance table (a flat node arena indexed by
/// `y * width + x`), the heap and the neighbor scratch buffer. Each search
/// bumps a generation counter instead of clearing the arena, so repeated
/// queries incur no allocations after the first use.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    /// Index of the last search's source, if any search ran.
    pub(crate) source: Option<usize>,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            source: None,
            open: BinaryHeap::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// The node arena is kept when the new range fits in it; results of
    /// previous searches are forgotten either way.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.source = None;
        if rng.len() <= self.nodes.len() {
            self.next_generation();
            return;
        }
        self.nodes.clear();
        self.nodes.resize(rng.len(), Node::default());
        self.generation = 0;
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Start a new search generation, invalidating every table entry.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with the new ones.
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.generation = 1;
        }
        self.generation
    }

    /// The table entry for `idx` if it was written by the current search.
    #[inline]
    pub(crate) fn entry(&self, idx: usize) -> Option<&Node> {
        let n = &self.nodes[idx];
        (self.source.is_some() && n.generation == self.generation).then_some(n)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idx_point_round_trip_with_offset_origin() {
        let pr = PathRange::new(Range::new(2, 3, 7, 6));
        assert_eq!(pr.idx(Point::new(2, 3)), Some(0));
        assert_eq!(pr.idx(Point::new(3, 4)), Some(6));
        assert_eq!(pr.idx(Point::new(7, 3)), None);
        assert_eq!(pr.idx(Point::new(1, 3)), None);
        for i in 0..pr.range().len() {
            assert_eq!(pr.idx(pr.point(i)), Some(i));
        }
    }

    #[test]
    fn heap_pops_smallest_cost_first() {
        let mut heap = BinaryHeap::new();
        for (idx, g) in [(0, 7), (1, 2), (2, 9), (3, 2), (4, 0)] {
            heap.push(NodeRef { idx, g });
        }
        let order: Vec<i32> = std::iter::from_fn(|| heap.pop().map(|n| n.g)).collect();
        assert_eq!(order, vec![0, 2, 2, 7, 9]);
    }

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::new(0, 0, 20, 20));
        let gen_before = pr.generation;
        let small = Range::new(0, 0, 5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.nodes.len(), 400);
        assert_eq!(pr.width, 5);
        assert!(pr.generation > gen_before);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::new(0, 0, 5, 5));
        let big = Range::new(0, 0, 20, 20);
        pr.set_range(big);
        assert_eq!(pr.range(), big);
        assert_eq!(pr.nodes.len(), 400);
    }

    #[test]
    fn generation_wrap_resets_arena() {
        let mut pr = PathRange::new(Range::new(0, 0, 2, 2));
        pr.nodes[1].generation = 1;
        pr.nodes[1].g = 5;
        pr.generation = u32::MAX;
        assert_eq!(pr.next_generation(), 1);
        assert_eq!(pr.nodes[1].generation, 0);
        assert_eq!(pr.nodes[1].g, UNREACHABLE);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            PathError::OutOfBounds(Point::new(10, 0)).to_string(),
            "path: point (10,0) is out of bounds"
        );
        assert_eq!(
            PathError::Unreachable {
                from: Point::ZERO,
                to: Point::new(2, 2)
            }
            .to_string(),
            "path: no route from (0,0) to (2,2)"
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
