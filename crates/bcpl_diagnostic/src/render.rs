use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::span::Span;
use super::{Config, Diagnostic, Severity, SnippetKind};

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for (source, snippets) in self.snippets_by_source() {
            let groups = group_by_line_window(snippets, self.config.context_size);
            for (snippets, lines) in groups {
                let lines = Span::new(lines.start, lines.end.min(source.num_lines()));
                self.draw_group(source, &snippets, lines)?;
            }
        }

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.primary_color())?;

        write!(self.stream, "{}:", self.diagnostic.severity)?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData<'a>],
        lines: Span,
    ) -> io::Result<()> {
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // groups are never empty
        let (line_num, col_num) = source
            .byte_to_line_col(snippets[0].bytes.start)
            .unwrap_or((1, 1));

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;
        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }
        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines.start..lines.end {
            let (Some(line_str), Some(line_start)) = (source.line_str(line), source.line_to_byte(line))
            else {
                break;
            };

            self.draw_gutter(Some(line + 1), line_num_width)?;
            writeln!(self.stream, "{}", line_str.replace('\t', TAB))?;

            let line_end = line_start + line_str.len();
            for snippet in snippets.iter().filter(|s| s.line == line) {
                self.draw_gutter(None, line_num_width)?;
                self.draw_underline(source, snippet, line_start, line_end)?;
            }
        }

        writeln!(self.stream)
    }

    fn draw_underline(
        &mut self,
        source: &Cached<S::Source>,
        snippet: &SnippetData,
        line_start: usize,
        line_end: usize,
    ) -> io::Result<()> {
        let text = source.source_str();

        let start = snippet.bytes.start.clamp(line_start, line_end);
        let end = snippet.bytes.end.clamp(start, line_end);

        let offset = str_width(&text[line_start..start]);
        let width = str_width(&text[start..end]).max(1);

        let continues = !snippet.bytes.is_empty()
            && source
                .byte_to_line_index(snippet.bytes.end - 1)
                .is_some_and(|last| last > snippet.line);

        self.stream.set_color(self.snippet_color(snippet.kind))?;

        write!(self.stream, "{:<offset$}", "")?;
        write!(self.stream, "{}", self.config.underline.repeat(width))?;
        if continues {
            write!(self.stream, "{}", self.config.continuation)?;
        }
        write!(self.stream, "{}{}", self.config.underline_after, snippet.label)?;

        self.stream.reset()?;
        writeln!(self.stream)
    }

    fn draw_gutter(&mut self, line_num: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line_num {
            Some(n) => write!(self.stream, "{n:>line_num_width$}")?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }
        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()
    }

    /// Snippets grouped by source, in order of first appearance.
    fn snippets_by_source(&self) -> Vec<(&'a Cached<S::Source>, Vec<SnippetData<'a>>)> {
        let mut by_source: Vec<(S::SourceId, &'a Cached<S::Source>, Vec<SnippetData<'a>>)> =
            vec![];

        let diagnostic = self.diagnostic;
        for snippet in &diagnostic.snippets {
            let Some(source) = self.sources.get_source(snippet.source_id) else {
                continue;
            };
            let Some(line) = source.byte_to_line_index(snippet.span.start) else {
                continue;
            };

            let data = SnippetData {
                label: &snippet.label,
                kind: snippet.kind,
                bytes: snippet.span,
                line,
            };

            match by_source.iter_mut().find(|(id, ..)| *id == snippet.source_id) {
                Some((_, _, snippets)) => snippets.push(data),
                None => by_source.push((snippet.source_id, source, vec![data])),
            }
        }

        by_source
            .into_iter()
            .map(|(_, source, snippets)| (source, snippets))
            .collect()
    }

    fn primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Warning => &self.config.warning_color,
            Severity::Error => &self.config.error_color,
        }
    }

    fn snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    bytes: Span,
    line: usize,
}

/// Sort snippets by line and merge those whose context windows overlap.
fn group_by_line_window(
    mut snippets: Vec<SnippetData>,
    context: usize,
) -> Vec<(Vec<SnippetData>, Span)> {
    snippets.sort_by_key(|s| (s.line, s.bytes.start));

    let mut groups: Vec<(Vec<SnippetData>, Span)> = vec![];

    for snippet in snippets {
        let window = Span::new(
            snippet.line.saturating_sub(context),
            snippet.line + context + 1,
        );

        match groups.last_mut() {
            Some((group, lines)) if window.start <= lines.end => {
                lines.end = lines.end.max(window.end);
                group.push(snippet);
            }
            _ => groups.push((vec![snippet], window)),
        }
    }

    groups
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::{group_by_line_window, SnippetData};
    use crate::sources::{Cached, Sources};
    use crate::span::Span;
    use crate::{Config, Diagnostic, Severity, Snippet, SnippetKind};

    fn diagnostic_to_string<S: Sources>(diagnostic: &Diagnostic<S>, sources: &S) -> String {
        let mut stream = NoColor::new(vec![]);

        diagnostic
            .write_to_stream(sources, &Config::default(), &mut stream)
            .unwrap();

        String::from_utf8(stream.into_inner()).unwrap()
    }

    fn sources(text: &str) -> Vec<Cached<(String, String)>> {
        vec![Cached::new(("main.b".to_owned(), text.to_owned()))]
    }

    fn data(line: usize, start: usize) -> SnippetData<'static> {
        SnippetData {
            label: "",
            kind: SnippetKind::Primary,
            bytes: Span::new(start, start + 1),
            line,
        }
    }

    #[test]
    fn window_grouping() {
        let groups = group_by_line_window(vec![data(9, 90), data(0, 0), data(2, 20)], 1);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, vec![data(0, 0), data(2, 20)]);
        assert_eq!(groups[0].1, Span::new(0, 4));
        assert_eq!(groups[1].0, vec![data(9, 90)]);
        assert_eq!(groups[1].1, Span::new(8, 11));
    }

    #[test]
    fn single_line_snippet() {
        let diagnostic = Diagnostic::error()
            .with_message("syntax error")
            .with_snippet(Snippet::primary("expected `$(`", 0, 7..12));

        let rendered = diagnostic_to_string(&diagnostic, &sources("global COUNT: 200\n"));

        assert_eq!(
            rendered,
            "Error: syntax error\n\
             In main.b:1:8\n\
             1 │ global COUNT: 200\n  \
             │        ^^^^^ expected `$(`\n\
             2 │ \n\
             \n"
        );
    }

    #[test]
    fn snippet_continuing_past_line() {
        let diagnostic = Diagnostic::<Vec<Cached<(String, String)>>>::new(Severity::Warning)
            .with_snippet(Snippet::new(SnippetKind::Secondary, "string", 0, 4..11));

        let rendered = diagnostic_to_string(&diagnostic, &sources("X = \"ab\ncd\""));

        assert_eq!(
            rendered,
            "Warning:\n\
             In main.b:1:5\n\
             1 │ X = \"ab\n  \
             │     ^^^... string\n\
             2 │ cd\"\n\
             \n"
        );
    }

    #[test]
    fn missing_source_is_skipped() {
        let diagnostic = Diagnostic::error()
            .with_message("no snippet")
            .with_snippet(Snippet::primary("gone", 3, 0..1));

        let rendered = diagnostic_to_string(&diagnostic, &sources(""));
        assert_eq!(rendered, "Error: no snippet\n");
    }
}
