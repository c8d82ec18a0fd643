use clap::{Parser, Subcommand};

use crate::logging;

use self::{
    batch::BatchArg,
    evaluate::{CriticalArg, PValueArg},
    table::TableArg,
};

mod batch;
mod evaluate;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// What to compute
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute a critical value from a significance level
    Critical(#[clap(flatten)] CriticalArg),
    /// Compute a p-value from an observed test statistic
    PValue(#[clap(flatten)] PValueArg),
    /// Print a table of critical values across degrees of freedom and levels
    Table(#[clap(flatten)] TableArg),
    /// Evaluate every request in a JSON file
    Batch(#[clap(flatten)] BatchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init_tracing(args.verbose);

    match args.mode.unwrap_or(Mode::Critical(CriticalArg::default())) {
        Mode::Critical(arg) => evaluate::run_critical(&arg)?,
        Mode::PValue(arg) => evaluate::run_p_value(&arg)?,
        Mode::Table(arg) => table::run(&arg)?,
        Mode::Batch(arg) => batch::run(&arg)?,
    }
    Ok(())
}
