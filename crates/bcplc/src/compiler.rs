use std::io::Write;

use bcpl_frontend::token::Keywords;
use bcpl_session::diagnostics::{DiagnosticEmitter, IntoDiagnostic};
use bcpl_session::sourcemap::Source;
use bcpl_session::{ErrorsEmitted, Session};
use tracing::{debug, info};

use crate::{CompilerError, CompilerResult};

pub struct Compiler<D: DiagnosticEmitter> {
    pub session: Session<D>,
    keywords: Keywords,
}

impl<D: DiagnosticEmitter> Compiler<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            session: Session::new(diagnostics),
            keywords: Keywords::new(),
        }
    }

    /// Write one `<kind>\t<text>` line per token, up to and including the
    /// end of file.
    pub fn tokens(&mut self, source: Source, out: &mut impl Write) -> CompilerResult<()> {
        debug!(name = %source.name, "lexing");

        for token in bcpl_frontend::lex(&source.text, &self.keywords) {
            writeln!(out, "{:?}\t{}", token.kind, token.text.escape_debug())?;
        }

        Ok(())
    }

    pub fn parse(&mut self, source: Source, out: &mut impl Write) -> CompilerResult<()> {
        debug!(name = %source.name, "parsing");

        match bcpl_frontend::parse(&source.text, &self.keywords) {
            Ok(program) => {
                info!(
                    decls = program.decls.len(),
                    defs = program.defs.len(),
                    "parsed program"
                );
                writeln!(out, "{program:#?}")?;
                Ok(())
            }

            Err(err) => {
                let source_id = self.session.sources.insert(source);
                self.report(err, &source_id)
                    .and(Err(CompilerError::HadErrors))
            }
        }
    }

    fn report<Context: ?Sized>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> CompilerResult<()> {
        self.session
            .report(diagnostic, cx)
            .map_err(|ErrorsEmitted| CompilerError::HadErrors)
    }
}
