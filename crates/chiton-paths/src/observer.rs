//! Search instrumentation hooks.

use std::time::Duration;

use chiton_core::Point;

/// Counters collected over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose distance was finalized.
    pub settled: usize,
    /// Heap insertions, including re-insertions after a cost improvement.
    pub pushed: usize,
    /// Heap entries discarded because their node had already settled.
    pub stale: usize,
    /// Final cost of the target, `None` when it was never settled.
    pub cost: Option<i32>,
    pub elapsed: Duration,
}

/// Receives progress events from a running search.
///
/// Every method has a no-op default, so implementors only override what
/// they need. `()` is the observer that ignores everything.
pub trait SearchObserver {
    /// Called when `pos` settles at `cost`, with `frontier` heap entries
    /// still pending.
    fn on_settle(&mut self, pos: Point, cost: i32, frontier: usize) {
        let _ = (pos, cost, frontier);
    }

    /// Called once when the search ends, whatever the outcome.
    fn on_finish(&mut self, stats: &SearchStats) {
        let _ = stats;
    }
}

impl SearchObserver for () {}

/// Observer that reports through the `log` facade.
///
/// Emits a `trace!` line every `every` settled nodes and a `debug!` summary
/// with timing when the search finishes.
#[derive(Debug, Clone)]
pub struct LogObserver {
    label: String,
    every: usize,
    settled: usize,
}

impl LogObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            every: 1000,
            settled: 0,
        }
    }

    /// Log progress every `every` settled nodes (at least 1).
    pub fn every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    /// Count one settled node; true when a progress line is due.
    fn tick(&mut self) -> bool {
        self.settled += 1;
        self.settled % self.every == 0
    }
}

impl SearchObserver for LogObserver {
    fn on_settle(&mut self, pos: Point, cost: i32, frontier: usize) {
        if self.tick() {
            log::trace!(
                "{}: settled {} nodes, at ({}) cost {}, frontier {}",
                self.label,
                self.settled,
                pos,
                cost,
                frontier
            );
        }
    }

    fn on_finish(&mut self, stats: &SearchStats) {
        match stats.cost {
            Some(cost) => log::debug!(
                "{}: cost {} in {:?} ({} settled, {} pushed, {} stale)",
                self.label,
                cost,
                stats.elapsed,
                stats.settled,
                stats.pushed,
                stats.stale
            ),
            None => log::debug!(
                "{}: target unreachable after {:?} ({} settled)",
                self.label,
                stats.elapsed,
                stats.settled
            ),
        }
        self.settled = 0;
    }
}
