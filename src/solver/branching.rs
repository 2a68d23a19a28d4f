use std::cmp::Reverse;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::types::{to_var, Formula, Lit, Model, Var};

/// Picks the literal to branch on once no simplification applies.
///
/// The returned literal must belong to a variable that is unassigned in
/// `model`; either polarity may be returned.
pub trait Policy {
    fn choose(&mut self, formula: &Formula, model: &Model) -> Lit;
}

impl<F> Policy for F
where
    F: FnMut(&Formula, &Model) -> Lit,
{
    fn choose(&mut self, formula: &Formula, model: &Model) -> Lit {
        self(formula, model)
    }
}

/// Asks `policy` for a literal and enforces the policy contract.
pub(crate) fn choose(policy: &mut dyn Policy, formula: &Formula, model: &Model) -> Lit {
    let lit = policy.choose(formula, model);
    assert_ne!(lit, 0, "branching policy returned 0");
    let var = to_var(lit);
    assert!(
        var <= formula.var_count,
        "branching policy returned {lit} outside of {} variables",
        formula.var_count
    );
    assert!(
        !model.is_assigned(var),
        "branching policy returned {lit} but variable {var} is already assigned"
    );
    lit
}

/// Uniform choice over all unassigned (variable, polarity) pairs.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, formula: &Formula, model: &Model) -> Lit {
        let free: Vec<Var> = model.free_vars(formula.var_count).collect();
        assert!(!free.is_empty(), "no unassigned variable to branch on");

        let i = self.rng.gen_range(0..2 * free.len());
        let lit = free[i / 2] as Lit;
        if i % 2 == 0 {
            lit
        } else {
            -lit
        }
    }
}

/// Lowest unassigned variable with a fixed polarity.
#[derive(Clone, Copy, Debug)]
pub struct FirstUnassigned {
    positive: bool,
}

impl FirstUnassigned {
    pub fn new(positive: bool) -> Self {
        Self { positive }
    }
}

impl Default for FirstUnassigned {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Policy for FirstUnassigned {
    fn choose(&mut self, formula: &Formula, model: &Model) -> Lit {
        let var = model.free_vars(formula.var_count).next();
        let lit = var.expect("no unassigned variable to branch on") as Lit;
        if self.positive {
            lit
        } else {
            -lit
        }
    }
}

/// Unassigned variable occurring in the most remaining clause positions,
/// with its more frequent polarity.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostFrequent;

impl Policy for MostFrequent {
    fn choose(&mut self, formula: &Formula, model: &Model) -> Lit {
        // (positive, negative) occurrences per variable
        let mut freq: Vec<(usize, usize)> = vec![(0, 0); formula.var_count + 1];
        for &lit in formula.clauses.iter().flatten() {
            let (pos, neg) = &mut freq[to_var(lit)];
            if lit > 0 {
                *pos += 1;
            } else {
                *neg += 1;
            }
        }

        let best = freq
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(var, _)| !model.is_assigned(var))
            .max_by_key(|&(var, &(pos, neg))| (pos + neg, Reverse(var)));

        match best {
            Some((var, &(pos, neg))) if pos >= neg => var as Lit,
            Some((var, _)) => -(var as Lit),
            None => panic!("no unassigned variable to branch on"),
        }
    }
}
