use bcpl_session::diagnostics::termcolor::{ColorChoice, NoColor};
use bcpl_session::diagnostics::{Config, Diagnostic};
use bcpl_session::sourcemap::Source;
use clap::Parser as _;

use crate::cli::{Cli, ColorWhen, Command};
use crate::compiler::Compiler;
use crate::{directive_for_verbosity, CompilerError};

fn compiler() -> Compiler<Vec<Diagnostic>> {
    Compiler::new(vec![])
}

#[test]
fn directive_defaults() {
    assert_eq!(directive_for_verbosity(0), "bcplc=info,bcpl_frontend=info");
    assert_eq!(directive_for_verbosity(1), "bcplc=debug,bcpl_frontend=debug");
    assert_eq!(directive_for_verbosity(2), "bcplc=trace,bcpl_frontend=trace");
    assert_eq!(directive_for_verbosity(7), "bcplc=trace,bcpl_frontend=trace");
}

#[test]
fn cli_arguments() {
    let cli = Cli::try_parse_from(["bcplc", "tokens", "-s", "let X = 1", "-vv", "--color", "never"])
        .unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.color, ColorWhen::Never);
    assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);

    let Command::Tokens(input) = cli.command else {
        panic!("expected the tokens command");
    };
    let source = input.load().unwrap();
    assert_eq!(source.name, "<unnamed>");
    assert_eq!(source.text, "let X = 1");
    assert_eq!(source.path, None);

    let cli = Cli::try_parse_from(["bcplc", "parse", "main.b"]).unwrap();
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.color, ColorWhen::Auto);
    assert!(matches!(cli.command, Command::Parse(ref input) if !input.source));

    assert!(Cli::try_parse_from(["bcplc", "build", "main.b"]).is_err());
}

#[test]
fn missing_input_file() {
    let cli = Cli::try_parse_from(["bcplc", "parse", "does/not/exist.b"]).unwrap();
    let Command::Parse(input) = cli.command else {
        panic!("expected the parse command");
    };
    assert!(input.load().is_err());
}

#[test]
fn tokens_output() {
    let mut out = vec![];
    compiler()
        .tokens(Source::new("main.b", "global $( A: 1\nB: 2 $) // done"), &mut out)
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Global\tglobal\n\
         SectBra\t$(\n\
         Name\tA\n\
         Colon\t:\n\
         Number\t1\n\
         Semicolon\t;\n\
         Name\tB\n\
         Colon\t:\n\
         Number\t2\n\
         SectKet\t$)\n\
         Comment\t// done\n\
         Eof\t\n"
    );
}

#[test]
fn parse_output() {
    let source = "let X, Y = 1, 2\nand V = vec 5";

    let mut out = vec![];
    compiler()
        .parse(Source::new("main.b", source), &mut out)
        .unwrap();

    let keywords = bcpl_frontend::token::Keywords::new();
    let program = bcpl_frontend::parse(source, &keywords).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), format!("{program:#?}\n"));
}

#[test]
fn parse_error_is_reported() {
    let mut compiler = compiler();
    let mut out = vec![];

    let result = compiler.parse(Source::new("main.b", "global COUNT: 200\n"), &mut out);

    assert!(matches!(result, Err(CompilerError::HadErrors)));
    assert!(out.is_empty());

    let session = &compiler.session;
    assert_eq!(session.diagnostics.len(), 1);

    let mut stream = NoColor::new(vec![]);
    session.diagnostics[0]
        .write_to_stream(&session.sources, &Config::default(), &mut stream)
        .unwrap();
    let rendered = String::from_utf8(stream.into_inner()).unwrap();

    assert!(
        rendered.starts_with("Error: syntax error\nIn main.b:1:8\n"),
        "{rendered}"
    );
    assert!(rendered.contains("^^^^^ expected `$(`, found name `COUNT`"));
}
