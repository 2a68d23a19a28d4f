use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use dpll_count::{
    check,
    solver::simplify::{find_single_polarity, find_unit_clause, unit_propagation},
    Clause, Dpll, DpllCount, Formula, Lit,
};

/// A small random CNF, small enough to enumerate all assignments.
#[derive(Clone, Debug)]
struct SmallCnf(Formula);

impl Arbitrary for SmallCnf {
    fn arbitrary(g: &mut Gen) -> Self {
        let var_count = usize::arbitrary(g) % 7 + 1;
        let clause_count = usize::arbitrary(g) % 12;
        let clauses = (0..clause_count)
            .map(|_| {
                // mostly short clauses, rarely an empty one
                let len = *g.choose(&[0, 1, 2, 2, 3, 3, 3, 3, 4]).unwrap();
                (0..len)
                    .map(|_| {
                        let var = (usize::arbitrary(g) % var_count + 1) as Lit;
                        if bool::arbitrary(g) {
                            var
                        } else {
                            -var
                        }
                    })
                    .collect::<Clause>()
            })
            .collect();
        SmallCnf(Formula::new(var_count, clauses))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let Formula { var_count, clauses } = self.0.clone();
        Box::new(
            clauses
                .shrink()
                .filter(|clauses| clauses.iter().flatten().all(|&lit| lit != 0))
                .map(move |clauses| SmallCnf(Formula::new(var_count, clauses))),
        )
    }
}

fn assignments(var_count: usize) -> impl Iterator<Item = Vec<Lit>> {
    (0..1u32 << var_count).map(move |mask| {
        (1..=var_count)
            .map(|var| {
                let lit = var as Lit;
                if mask >> (var - 1) & 1 == 1 {
                    lit
                } else {
                    -lit
                }
            })
            .collect()
    })
}

fn brute_force_count(formula: &Formula) -> u128 {
    assignments(formula.var_count)
        .filter(|assignment| check(&formula.clauses, assignment))
        .count() as u128
}

fn agrees(clause: &Clause, assignment: &[Lit]) -> bool {
    clause
        .iter()
        .any(|&lit| assignment[lit.unsigned_abs() as usize - 1] == lit)
}

#[quickcheck]
fn check_matches_definition(cnf: SmallCnf) -> bool {
    let SmallCnf(formula) = cnf;
    assignments(formula.var_count).all(|assignment| {
        let expected = formula.clauses.iter().all(|clause| agrees(clause, &assignment));
        check(&formula.clauses, &assignment) == expected
    })
}

#[quickcheck]
fn solve_is_sound_and_complete(cnf: SmallCnf, seed: u64) -> bool {
    let SmallCnf(formula) = cnf;
    let mut solver = Dpll::builder()
        .formula(formula.clone())
        .seed(seed)
        .build()
        .unwrap();

    let sat = brute_force_count(&formula) > 0;
    let model = solver.model_list();
    if sat {
        model.len() == formula.var_count && check(&formula.clauses, &model)
    } else {
        model.is_empty() && !solver.solve().is_sat()
    }
}

#[quickcheck]
fn count_matches_brute_force(cnf: SmallCnf, seed: u64) -> bool {
    let SmallCnf(formula) = cnf;
    let mut counter = DpllCount::builder()
        .formula(formula.clone())
        .seed(seed)
        .build()
        .unwrap();
    counter.count() == brute_force_count(&formula)
}

#[quickcheck]
fn count_is_zero_iff_unsat(cnf: SmallCnf, seed: u64) -> bool {
    let SmallCnf(formula) = cnf;
    let count = DpllCount::builder()
        .formula(formula.clone())
        .seed(seed)
        .build()
        .unwrap()
        .count();
    let sat = Dpll::builder()
        .formula(formula)
        .seed(seed)
        .build()
        .unwrap()
        .solve()
        .is_sat();
    (count == 0) == !sat
}

#[quickcheck]
fn model_literals_in_range(cnf: SmallCnf, seed: u64) -> bool {
    let SmallCnf(formula) = cnf;
    let mut solver = Dpll::builder()
        .formula(formula.clone())
        .seed(seed)
        .build()
        .unwrap();
    match solver.solve().model() {
        Some(model) => model
            .iter()
            .all(|lit| lit != 0 && lit.unsigned_abs() as usize <= formula.var_count),
        None => true,
    }
}

#[quickcheck]
fn propagation_removes_variable(cnf: SmallCnf, lit: i8) -> bool {
    let SmallCnf(formula) = cnf;
    let var = (lit.unsigned_abs() as usize % formula.var_count + 1) as Lit;
    let lit = if lit < 0 { -var } else { var };

    let propagated = unit_propagation(&formula, lit);
    let kept = formula.clauses.iter().filter(|clause| !clause.contains(&lit)).count();

    propagated.clauses.len() == kept
        && propagated
            .clauses
            .iter()
            .flatten()
            .all(|&other| other != lit && other != -lit)
}

#[quickcheck]
fn pure_literal_is_pure(cnf: SmallCnf) -> bool {
    let SmallCnf(formula) = cnf;
    let literals: Vec<Lit> = formula.clauses.iter().flatten().copied().collect();
    match find_single_polarity(&formula.clauses) {
        Some(lit) => literals.contains(&lit) && !literals.contains(&-lit),
        None => literals.iter().all(|lit| literals.contains(&-lit)),
    }
}

#[quickcheck]
fn unit_clause_is_first(cnf: SmallCnf) -> bool {
    let SmallCnf(formula) = cnf;
    let first = formula.clauses.iter().find(|clause| clause.len() == 1);
    find_unit_clause(&formula.clauses) == first.map(|clause| clause[0])
}
