//! Star count and discovery tracking

use std::collections::BTreeSet;

/// Stars earned and which creatures have been fully answered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub stars: u32,
    visited: BTreeSet<usize>,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            stars: 0,
            visited: BTreeSet::new(),
            total,
        }
    }

    /// Record a fully answered creature. Awards one star the first time only.
    pub fn record_discovery(&mut self, creature: usize) -> bool {
        if self.visited.insert(creature) {
            self.stars += 1;
            true
        } else {
            false
        }
    }

    /// Debug override: award a star without a discovery
    pub fn grant_star(&mut self) {
        self.stars += 1;
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Every star has been earned
    pub fn is_complete(&self) -> bool {
        self.stars as usize >= self.total
    }

    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total);
    }
}
