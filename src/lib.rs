//! DPLL satisfiability search and exact model counting over CNF formulas.
//!
//! ```
//! use dpll_count::{Dpll, DpllCount, Formula};
//!
//! let formula = Formula::new(3, vec![vec![1, -2], vec![1, 3], vec![-3, -2]]);
//!
//! let mut solver = Dpll::builder().formula(formula.clone()).seed(7).build()?;
//! assert_eq!(solver.model_str(), "1 2 -3");
//!
//! let mut counter = DpllCount::new(formula)?;
//! assert_eq!(counter.count(), 4);
//! # Ok::<(), dpll_count::Error>(())
//! ```

pub mod error;
pub mod io;
pub mod logging;
pub mod solver;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
pub use solver::{check, verify, Builder, Dpll, DpllCount};
pub use types::{Clause, Formula, Lit, Model, Solution, Var};
