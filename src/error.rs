use thiserror::Error;

use crate::types::Lit;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A builder was given neither a formula nor a CNF file.
    #[error("either a CNF file or a formula must be provided")]
    MissingInput,

    #[error("literal {lit} is outside of the declared {var_count} variables")]
    LiteralOutOfRange { lit: Lit, var_count: usize },

    /// The model count would not fit in a `u128`.
    #[error("cannot count models over {var_count} variables (at most {max})")]
    TooManyVariables { var_count: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
