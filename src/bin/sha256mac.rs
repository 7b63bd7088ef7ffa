use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sha256_lenext::command::{read_message, Command, Options};

fn main() -> ExitCode {
    // Library logging goes through `log`; the fmt subscriber picks it up. Set RUST_LOG=debug
    // to see attack parameters.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(options) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> anyhow::Result<ExitCode> {
    let command = Command::try_from(options)?;
    let message = read_message(io::stdin().lock()).context("failed to read message from stdin")?;
    let report = command.run(&message)?;

    let mut stdout = io::stdout().lock();
    for line in &report.lines {
        writeln!(stdout, "{line}")?;
    }

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
