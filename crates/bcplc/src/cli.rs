use std::io;

use bcpl_session::diagnostics::termcolor::ColorChoice;
use bcpl_session::sourcemap::Source;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to colour diagnostics.
    #[arg(long, value_enum, default_value_t, global = true)]
    pub color: ColorWhen,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream, including inserted `;` and `do` tokens.
    Tokens(InputArgs),

    /// Parse declarations and definitions and print the syntax tree.
    Parse(InputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[arg(long, short, action)]
    pub source: bool,
}

impl InputArgs {
    pub fn load(self) -> io::Result<Source> {
        if self.source {
            return Ok(Source::new("<unnamed>", self.input));
        }

        debug!(path = %self.input, "reading source file");
        let text = std::fs::read_to_string(&self.input)?;
        Ok(Source::from_file(self.input, text))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorWhen {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorChoice {
    fn from(color: ColorWhen) -> Self {
        match color {
            ColorWhen::Auto => ColorChoice::Auto,
            ColorWhen::Always => ColorChoice::Always,
            ColorWhen::Never => ColorChoice::Never,
        }
    }
}
