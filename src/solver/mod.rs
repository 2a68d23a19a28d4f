pub mod branching;
pub mod count;
pub mod simplify;

use std::{marker::PhantomData, path::PathBuf};

use log::{debug, info, trace};

use crate::{
    error::{Error, Result},
    io,
    logging::targets,
    stats::Stats,
    types::{to_var, Clause, Formula, Lit, Model, Solution},
};

use self::{
    branching::{choose, Policy, RandomPolicy},
    simplify::{find_single_polarity, find_unit_clause, propagate},
};

pub use self::count::DpllCount;

/// Collects the inputs of a search engine. Either a formula or a CNF file is
/// required; the formula wins if both are given.
pub struct Builder<E> {
    formula: Option<Formula>,
    cnf_file: Option<PathBuf>,
    policy: Option<Box<dyn Policy>>,
    seed: Option<u64>,
    engine: PhantomData<E>,
}

impl<E> Default for Builder<E> {
    fn default() -> Self {
        Self {
            formula: None,
            cnf_file: None,
            policy: None,
            seed: None,
            engine: PhantomData,
        }
    }
}

impl<E> Builder<E> {
    pub fn formula(mut self, formula: Formula) -> Self {
        self.formula = Some(formula);
        self
    }

    pub fn cnf_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cnf_file = Some(path.into());
        self
    }

    pub fn policy(mut self, policy: impl Policy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Seeds the default random policy. Ignored when a policy is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn into_parts(self) -> Result<(Formula, Box<dyn Policy>)> {
        let formula = match (self.formula, self.cnf_file) {
            (Some(formula), _) => formula,
            (None, Some(path)) => io::read_formula_file(&path)?,
            (None, None) => return Err(Error::MissingInput),
        };
        formula.validate()?;

        let policy: Box<dyn Policy> = match (self.policy, self.seed) {
            (Some(policy), _) => policy,
            (None, Some(seed)) => Box::new(RandomPolicy::with_seed(seed)),
            (None, None) => Box::new(RandomPolicy::new()),
        };

        Ok((formula, policy))
    }
}

impl Builder<Dpll> {
    pub fn build(self) -> Result<Dpll> {
        let (formula, policy) = self.into_parts()?;
        Ok(Dpll {
            formula,
            policy,
            stats: Stats::default(),
            solution: None,
        })
    }
}

/// A pending alternative: the state before branching plus the literal
/// still to be tried on it.
struct ChoicePoint {
    formula: Formula,
    model: Model,
    lit: Lit,
}

/// Decision procedure. Solves its formula once and caches the result.
pub struct Dpll {
    formula: Formula,
    policy: Box<dyn Policy>,
    stats: Stats,
    solution: Option<Solution>,
}

impl Dpll {
    pub fn builder() -> Builder<Dpll> {
        Builder::default()
    }

    /// Solver over `formula` with an unseeded random policy.
    pub fn new(formula: Formula) -> Result<Self> {
        Self::builder().formula(formula).build()
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The model may be partial; unassigned variables can take either value.
    pub fn solve(&mut self) -> &Solution {
        let solution = match self.solution.take() {
            Some(solution) => solution,
            None => {
                let solution = match self.search(self.formula.clone(), Model::new()) {
                    Some(model) => Solution::Sat { model },
                    None => Solution::Unsat,
                };
                info!(
                    target: targets::SEARCH,
                    "{} after {} branches",
                    if solution.is_sat() { "SAT" } else { "UNSAT" },
                    self.stats.branches
                );
                solution
            }
        };
        self.solution.insert(solution)
    }

    /// Total assignment with free variables asserted, or empty if unsat.
    pub fn model_list(&mut self) -> Vec<Lit> {
        let var_count = self.formula.var_count;
        match self.solve() {
            Solution::Sat { model } => model.to_list(var_count),
            Solution::Unsat => vec![],
        }
    }

    /// [`Dpll::model_list`] as space separated DIMACS literals.
    pub fn model_str(&mut self) -> String {
        self.model_list()
            .iter()
            .map(|lit| lit.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn search(&mut self, mut formula: Formula, mut model: Model) -> Option<Model> {
        let mut choices: Vec<ChoicePoint> = vec![];

        loop {
            if formula.is_empty() {
                return Some(model);
            }

            if formula.has_empty_clause() {
                let ChoicePoint {
                    formula: snapshot,
                    model: snapshot_model,
                    lit,
                } = choices.pop()?;

                self.stats.backtracks += 1;
                debug!(target: targets::BRANCH, "backtrack to {lit} at depth {}", choices.len());

                formula = snapshot;
                model = snapshot_model;
                formula.clauses.push(vec![lit]);
                continue;
            }

            if let Some(lit) = find_unit_clause(&formula.clauses) {
                trace!(target: targets::PROPAGATION, "propagate {lit}");
                model.assign(lit);
                let (propagated, cleaned) = propagate(&formula, lit);
                self.stats.record_propagation(cleaned);
                formula = propagated;
                continue;
            }

            if let Some(lit) = find_single_polarity(&formula.clauses) {
                trace!(target: targets::PROPAGATION, "purify {lit}");
                self.stats.purifications += 1;
                formula.clauses.push(vec![lit]);
                continue;
            }

            let lit = choose(self.policy.as_mut(), &formula, &model);
            self.stats.branches += 1;
            trace!(target: targets::BRANCH, "branch on {lit} at depth {}", choices.len());

            choices.push(ChoicePoint {
                formula: formula.clone(),
                model: model.clone(),
                lit: -lit,
            });
            self.stats.reach_depth(choices.len());
            formula.clauses.push(vec![lit]);
        }
    }
}

/// Whether every clause has a literal agreeing with `assignment`, a total
/// assignment where index `i` holds the literal of variable `i + 1`.
pub fn check(clauses: &[Clause], assignment: &[Lit]) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            assignment
                .get(to_var(lit) - 1)
                .is_some_and(|&value| value != 0 && (value > 0) == (lit > 0))
        })
    })
}

/// Whether `solution` is the expected outcome and, if sat, its model
/// (with free variables asserted) satisfies `formula`.
pub fn verify(formula: &Formula, sat: bool, solution: &Solution) -> bool {
    match solution {
        Solution::Sat { model } => sat && check(&formula.clauses, &model.to_list(formula.var_count)),
        Solution::Unsat => !sat,
    }
}
