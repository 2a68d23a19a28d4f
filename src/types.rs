use std::{collections::BTreeMap, fmt};

use crate::error::{Error, Result};

pub type Lit = i32;

pub type Var = usize;

pub type Clause = Vec<Lit>;

pub fn to_var(lit: Lit) -> Var {
    assert_ne!(lit, 0);
    lit.unsigned_abs() as Var
}

/// A CNF formula: a conjunction of clauses over the variables `1..=var_count`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    pub var_count: usize,
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(var_count: usize, clauses: Vec<Clause>) -> Self {
        Self { var_count, clauses }
    }

    /// Builds a formula whose variable count is the largest variable mentioned.
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let var_count = clauses
            .iter()
            .flatten()
            .map(|&lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self { var_count, clauses }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|clause| clause.is_empty())
    }

    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(|clause| clause.len()).sum()
    }

    /// Checks that every literal is non-zero and names a declared variable.
    pub fn validate(&self) -> Result<()> {
        match self
            .clauses
            .iter()
            .flatten()
            .find(|&&lit| lit == 0 || lit.unsigned_abs() as usize > self.var_count)
        {
            Some(&lit) => Err(Error::LiteralOutOfRange {
                lit,
                var_count: self.var_count,
            }),
            None => Ok(()),
        }
    }
}

/// Partial assignment. Each assigned variable maps to the literal made true,
/// so `|model[v]| == v` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model(BTreeMap<Var, Lit>);

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: Var) -> Option<Lit> {
        self.0.get(&var).copied()
    }

    pub fn is_assigned(&self, var: Var) -> bool {
        self.0.contains_key(&var)
    }

    pub fn assign(&mut self, lit: Lit) {
        let previous = self.0.insert(to_var(lit), lit);
        debug_assert!(previous.is_none() || previous == Some(lit));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assigned literals in variable order.
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.0.values().copied()
    }

    pub fn free_vars(&self, var_count: usize) -> impl Iterator<Item = Var> + '_ {
        (1..=var_count).filter(move |var| !self.is_assigned(*var))
    }

    /// Total assignment over `1..=var_count`; free variables are asserted.
    /// Index `i` holds the literal of variable `i + 1`.
    pub fn to_list(&self, var_count: usize) -> Vec<Lit> {
        (1..=var_count)
            .map(|var| self.get(var).unwrap_or(var as Lit))
            .collect()
    }

    /// Like [`Model::to_list`] but free variables are reported as `0`.
    pub fn to_partial_list(&self, var_count: usize) -> Vec<Lit> {
        (1..=var_count)
            .map(|var| self.get(var).unwrap_or(0))
            .collect()
    }
}

impl FromIterator<Lit> for Model {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        let mut model = Model::new();
        for lit in iter {
            model.assign(lit);
        }
        model
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for lit in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{lit}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    Sat { model: Model },
    Unsat,
}

impl Solution {
    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat { .. })
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Solution::Sat { model } => Some(model),
            Solution::Unsat => None,
        }
    }
}
