use std::time::Instant;

use chiton_core::Point;

use crate::PathRange;
use crate::observer::{SearchObserver, SearchStats};
use crate::pathrange::{NodeRef, PathError, PathNode, UNREACHABLE};
use crate::traits::WeightedPather;

impl PathRange {
    /// Compute the minimal cost of a path from `from` to `to`.
    ///
    /// The cost of a path is the sum of its edge costs, so with a grid's
    /// destination-cell costs the source cell itself is not counted.
    /// Returns `Ok(0)` when `from == to`.
    pub fn shortest_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<i32, PathError> {
        self.shortest_path_with(pather, from, to, &mut ())
    }

    /// Like [`shortest_path`](Self::shortest_path), reporting progress to
    /// `observer`.
    pub fn shortest_path_with<P: WeightedPather, O: SearchObserver>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        observer: &mut O,
    ) -> Result<i32, PathError> {
        let start_idx = self.idx(from).ok_or(PathError::OutOfBounds(from))?;
        let goal_idx = self.idx(to).ok_or(PathError::OutOfBounds(to))?;

        let started = Instant::now();
        let cur_gen = self.next_generation();
        self.source = Some(start_idx);

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = start_idx;
            node.generation = cur_gen;
            node.settled = false;
        }

        let mut open = std::mem::take(&mut self.open);
        open.clear();
        open.push(NodeRef {
            idx: start_idx,
            g: 0,
        });

        let mut stats = SearchStats {
            pushed: 1,
            ..SearchStats::default()
        };
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries left behind by cost improvements.
            let cn = &self.nodes[ci];
            if cn.settled || current.g != cn.g {
                stats.stale += 1;
                continue;
            }

            self.nodes[ci].settled = true;
            stats.settled += 1;
            let current_point = self.point(ci);
            observer.on_settle(current_point, current.g, open.len());

            if ci == goal_idx {
                break 'search true;
            }

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                // UNREACHABLE edges are impassable.
                let tentative = current.g.saturating_add(pather.cost(current_point, np));
                if tentative >= UNREACHABLE {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if n.settled || tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.settled = false;
                }

                n.g = tentative;
                n.parent = ci;
                open.push(NodeRef {
                    idx: ni,
                    g: tentative,
                });
                stats.pushed += 1;
            }
        };

        self.open = open;
        self.nbuf = nbuf;

        let result = if found {
            Ok(self.nodes[goal_idx].g)
        } else {
            Err(PathError::Unreachable { from, to })
        };
        stats.cost = result.ok();
        stats.elapsed = started.elapsed();
        observer.on_finish(&stats);
        result
    }

    /// Distance recorded for `p` by the last search.
    ///
    /// Final for settled nodes, tentative for frontier nodes, and
    /// [`UNREACHABLE`] for nodes never discovered or outside the range.
    pub fn distance_at(&self, p: Point) -> i32 {
        self.idx(p)
            .and_then(|i| self.entry(i))
            .map_or(UNREACHABLE, |n| n.g)
    }

    /// Whether `p` was settled (its distance finalized) by the last search.
    pub fn is_settled(&self, p: Point) -> bool {
        self.idx(p)
            .and_then(|i| self.entry(i))
            .is_some_and(|n| n.settled)
    }

    /// Route from the last search's source to `to`, both included, with the
    /// cumulative cost at each step.
    ///
    /// Returns `None` if `to` was not settled by the last search.
    pub fn path_to(&self, to: Point) -> Option<Vec<PathNode>> {
        let source = self.source?;
        let mut ci = self.idx(to)?;
        if !self.entry(ci)?.settled {
            return None;
        }

        let mut path = Vec::new();
        loop {
            let n = self.entry(ci)?;
            path.push(PathNode {
                pos: self.point(ci),
                cost: n.g,
            });
            if ci == source {
                break;
            }
            ci = n.parent;
        }
        path.reverse();
        Some(path)
    }
}
