//! Command line front end: argument parsing, command dispatch and status output.

pub mod args;
pub mod commands;
pub mod output;

use std::io::{self, Write};

use pcb_core::SystemClock;

use crate::errors::CliError;

pub use args::{CliArgs, Command};
pub use commands::execute;

/// Parses `args` (without the program name) and runs the command against stdout.
pub fn run<I, S>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args = CliArgs::parse(args)?;
    crate::init_with(args.debug);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args, &SystemClock, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Prints `err` the way the binary reports failures, including command suggestions.
pub fn report_error(err: &CliError) {
    output::error(err);
    if let CliError::UnknownCommand {
        suggestion: Some(best),
        ..
    } = err
    {
        output::info(format!("Suggestion: `{best}`?"));
    } else if matches!(err, CliError::UnknownCommand { .. }) {
        output::warning("Type `pcb help` to see available commands.");
    }
}
