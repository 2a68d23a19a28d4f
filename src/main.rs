use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use dpll_count::{
    io,
    solver::branching::{FirstUnassigned, MostFrequent},
    Builder, Dpll, DpllCount,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log search progress
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide satisfiability and print a model
    Solve(Args),
    /// Count satisfying assignments
    Count(Args),
}

#[derive(clap::Args, Debug)]
struct Args {
    /// DIMACS CNF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Seed for the random branching policy
    #[arg(long)]
    seed: Option<u64>,

    /// Branching policy
    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    policy: PolicyKind,

    /// Print search statistics
    #[arg(long)]
    stats: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyKind {
    Random,
    First,
    Frequent,
}

fn builder<E>(args: &Args) -> Builder<E> {
    let builder = Builder::default().cnf_file(&args.input);
    let builder = match args.seed {
        Some(seed) => builder.seed(seed),
        None => builder,
    };
    match args.policy {
        PolicyKind::Random => builder,
        PolicyKind::First => builder.policy(FirstUnassigned::default()),
        PolicyKind::Frequent => builder.policy(MostFrequent),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    info!("args = {:?}", cli);

    let mut output = std::io::stdout();
    match cli.command {
        Command::Solve(args) => {
            let mut solver = builder::<Dpll>(&args).build()?;
            let var_count = solver.formula().var_count;
            let solution = solver.solve().clone();
            io::write_solution(&mut output, var_count, &solution)?;
            if args.stats {
                print!("{}", solver.stats());
            }
        }
        Command::Count(args) => {
            let mut counter = builder::<DpllCount>(&args).build()?;
            let count = counter.count();
            io::write_count(&mut output, count)?;
            if args.stats {
                print!("{}", counter.stats());
            }
        }
    }

    Ok(())
}
