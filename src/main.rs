use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Parser, error::ErrorKind};
use colored::Colorize;
use tracing::debug;

use crate::{
    cli::{Cli, USAGE},
    commands::App,
    error::AppError,
    git::{GitConfig, SystemGit},
    storage::ProfileStore,
};

mod cli;
mod commands;
mod error;
mod git;
mod logging;
mod profile;
mod storage;
#[cfg(test)]
mod test_utils;
mod validation;

fn main() -> ExitCode {
    logging::init_logging();

    let parsed: Result<Cli, clap::Error> = Cli::try_parse();

    let store: ProfileStore = match ProfileStore::locate() {
        Ok(store) => store,
        Err(err) => {
            report("Error locating profiles", &err);
            return ExitCode::FAILURE;
        }
    };
    debug!(path = %store.path().display(), "using profiles file");
    let app = App::new(store, GitConfig::new(SystemGit));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let quiet: bool = parsed.as_ref().is_ok_and(|cli| cli.quiet);
    if !quiet {
        if let Err(err) = app.print_banner(&mut out) {
            report("Error printing banner", &err);
            return ExitCode::FAILURE;
        }
    }

    let cli: Cli = match parsed {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            if !matches!(
                err.kind(),
                ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument
            ) {
                eprint!("{err}");
            }
            let _ = writeln!(out, "Unknown command. {USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let Some(command) = cli.command else {
        let _ = writeln!(out, "{USAGE}");
        return ExitCode::SUCCESS;
    };

    let mut input = io::stdin().lock();
    match app.run(&command, &mut out, &mut input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(msg)) => {
            let _ = writeln!(out, "{msg}");
            ExitCode::FAILURE
        }
        Err(err) => {
            let _ = out.flush();
            report(command.error_context(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Prints a failure to stderr, prefixed with what was being attempted
fn report(context: &str, err: &AppError) {
    eprintln!("{}: {}", context.red(), err);
}
