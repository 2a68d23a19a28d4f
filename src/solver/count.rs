use log::{debug, info, trace};

use crate::{
    error::{Error, Result},
    logging::targets,
    stats::Stats,
    types::{Formula, Model},
};

use super::{
    branching::{choose, Policy},
    simplify::{find_unit_clause, propagate},
    Builder,
};

/// Largest variable count whose model count always fits in a `u128`.
pub const MAX_COUNT_VARS: usize = 127;

impl Builder<DpllCount> {
    pub fn build(self) -> Result<DpllCount> {
        let (formula, policy) = self.into_parts()?;
        if formula.var_count > MAX_COUNT_VARS {
            return Err(Error::TooManyVariables {
                var_count: formula.var_count,
                max: MAX_COUNT_VARS,
            });
        }

        Ok(DpllCount {
            formula,
            policy,
            stats: Stats::default(),
            count: None,
        })
    }
}

/// Exact model counter (#SAT) over all declared variables.
pub struct DpllCount {
    formula: Formula,
    policy: Box<dyn Policy>,
    stats: Stats,
    count: Option<u128>,
}

impl DpllCount {
    pub fn builder() -> Builder<DpllCount> {
        Builder::default()
    }

    pub fn new(formula: Formula) -> Result<Self> {
        Self::builder().formula(formula).build()
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn count(&mut self) -> u128 {
        if let Some(count) = self.count {
            return count;
        }

        let count = self.count_from(self.formula.clone(), Model::new(), 0);
        info!(
            target: targets::COUNT,
            "{count} models after {} branches", self.stats.branches
        );
        self.count = Some(count);
        count
    }

    // Recursion only happens at branches, each of which fixes a fresh
    // variable, so the depth is at most `MAX_COUNT_VARS`.
    fn count_from(&mut self, mut formula: Formula, mut model: Model, depth: usize) -> u128 {
        self.stats.reach_depth(depth);

        loop {
            if formula.is_empty() {
                let free = formula.var_count - model.len();
                debug!(target: targets::COUNT, "leaf with {free} free variables");
                return 1u128 << free;
            }

            if formula.has_empty_clause() {
                self.stats.backtracks += 1;
                return 0;
            }

            match find_unit_clause(&formula.clauses) {
                Some(lit) => {
                    trace!(target: targets::PROPAGATION, "propagate {lit}");
                    model.assign(lit);
                    let (propagated, cleaned) = propagate(&formula, lit);
                    self.stats.record_propagation(cleaned);
                    formula = propagated;
                }
                None => break,
            }
        }

        let lit = choose(self.policy.as_mut(), &formula, &model);
        self.stats.branches += 1;
        trace!(target: targets::BRANCH, "branch on {lit} at depth {depth}");

        let mut negated = formula.clone();
        negated.clauses.push(vec![-lit]);
        formula.clauses.push(vec![lit]);

        let asserted = self.count_from(formula, model.clone(), depth + 1);
        asserted + self.count_from(negated, model, depth + 1)
    }
}
