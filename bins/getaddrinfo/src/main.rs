//! getaddrinfo command - resolve a host into socket address candidates.
//!
//! Prints one tab-separated line per candidate: socket type, protocol,
//! port and numeric address.

mod cli;

use std::io;
use std::process::ExitCode;

use addrinfo::SystemResolver;
use addrinfo::report;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors: diagnostic on stderr, usage on stdout.
            let _ = e.print();
            let _ = Cli::command().print_help();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let request = cli.request();

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    let written = report::run(
        &SystemResolver::new(),
        &request,
        cli.format(),
        cli.output_options(),
        &mut out,
        &mut err,
    )?;
    tracing::debug!(written, "done");

    Ok(())
}
