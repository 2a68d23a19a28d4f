use std::fmt;

use crate::solver::simplify::Cleaned;

/// Search counters. Only ever incremented; the search never reads them back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub branches: usize,
    pub backtracks: usize,
    pub unit_propagations: usize,
    pub purifications: usize,
    pub up_clauses_cleaned: usize,
    pub up_literals_cleaned: usize,
    pub max_depth: usize,
}

impl Stats {
    pub(crate) fn record_propagation(&mut self, cleaned: Cleaned) {
        self.unit_propagations += 1;
        self.up_clauses_cleaned += cleaned.clauses;
        self.up_literals_cleaned += cleaned.literals;
    }

    pub(crate) fn reach_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("branches", self.branches),
            ("backtracks", self.backtracks),
            ("unit propagations", self.unit_propagations),
            ("purifications", self.purifications),
            ("clauses cleaned", self.up_clauses_cleaned),
            ("literals cleaned", self.up_literals_cleaned),
            ("max depth", self.max_depth),
        ];
        for (name, value) in rows {
            writeln!(f, "c {name:<18} {value:>12}")?;
        }
        Ok(())
    }
}
