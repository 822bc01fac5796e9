mod cli;
mod compiler;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

use bcpl_session::diagnostics::PrettyDiagnosticEmitter;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::compiler::Compiler;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("errors while compiling")]
    HadErrors,
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CompilerResult<()> {
    let mut compiler = Compiler::new(PrettyDiagnosticEmitter::new(cli.color.into()));
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Tokens(input) => compiler.tokens(input.load()?, &mut out),
        Command::Parse(input) => compiler.parse(input.load()?, &mut out),
    }
}

/// Default log filter when `RUST_LOG` is unset. Targets are crate paths, so
/// `bcplc` does not cover `bcpl_frontend`.
fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "bcplc=info,bcpl_frontend=info",
        1 => "bcplc=debug,bcpl_frontend=debug",
        _ => "bcplc=trace,bcpl_frontend=trace",
    }
}
