use crate::types::{to_var, Clause, Formula, Lit, Var};

/// Returns the literal of the first unit clause, in clause order.
pub fn find_unit_clause(clauses: &[Clause]) -> Option<Lit> {
    clauses.iter().find_map(|clause| match clause[..] {
        [lit] => Some(lit),
        _ => None,
    })
}

#[derive(Clone, Copy, PartialEq)]
enum Polarity {
    Unseen,
    Only(bool),
    Mixed,
}

/// Returns a literal whose variable occurs with a single polarity,
/// preferring the variable that occurs first.
pub fn find_single_polarity(clauses: &[Clause]) -> Option<Lit> {
    let mut polarity: Vec<Polarity> = vec![];
    let mut order: Vec<Var> = vec![];

    for &lit in clauses.iter().flatten() {
        let var = to_var(lit);
        if var >= polarity.len() {
            polarity.resize(var + 1, Polarity::Unseen);
        }

        let positive = lit.is_positive();
        match polarity[var] {
            Polarity::Unseen => {
                polarity[var] = Polarity::Only(positive);
                order.push(var);
            }
            Polarity::Only(seen) if seen != positive => polarity[var] = Polarity::Mixed,
            _ => (),
        }
    }

    order.into_iter().find_map(|var| match polarity[var] {
        Polarity::Only(true) => Some(var as Lit),
        Polarity::Only(false) => Some(-(var as Lit)),
        _ => None,
    })
}

/// What a single propagation step removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cleaned {
    pub clauses: usize,
    pub literals: usize,
}

pub(crate) fn propagate(formula: &Formula, lit: Lit) -> (Formula, Cleaned) {
    let mut cleaned = Cleaned::default();
    let mut clauses = Vec::with_capacity(formula.clauses.len());

    for clause in &formula.clauses {
        if clause.contains(&lit) {
            cleaned.clauses += 1;
            continue;
        }

        let reduced: Clause = clause.iter().copied().filter(|&other| other != -lit).collect();
        cleaned.literals += clause.len() - reduced.len();
        clauses.push(reduced);
    }

    let formula = Formula {
        var_count: formula.var_count,
        clauses,
    };
    (formula, cleaned)
}

/// Asserts `lit`: clauses containing it are satisfied and dropped, and `-lit`
/// is removed from every remaining clause. Exactly one step, no fixpoint.
pub fn unit_propagation(formula: &Formula, lit: Lit) -> Formula {
    propagate(formula, lit).0
}
