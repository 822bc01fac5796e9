mod render;
pub mod sources;
pub mod span;

use std::fmt;

pub use termcolor;
use termcolor::{Color, ColorSpec};

use self::sources::Sources;
use self::span::{AsSpan, Span};

/// A message about some source text, pointing at the regions it concerns.
pub struct Diagnostic<S: Sources> {
    pub severity: Severity,
    pub message: Option<String>,
    pub snippets: Vec<Snippet<S>>,
}

impl<S: Sources> Diagnostic<S> {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: None,
            snippets: vec![],
        }
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet<S>) -> Self {
        self.snippets.push(snippet);
        self
    }
}

/// Ordered so that anything at or above `Error` fails the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        })
    }
}

/// A labelled region of one source.
pub struct Snippet<S: Sources> {
    pub label: String,
    pub kind: SnippetKind,
    pub source_id: S::SourceId,
    pub span: Span,
}

impl<S: Sources> Snippet<S> {
    pub fn new(
        kind: SnippetKind,
        label: impl Into<String>,
        source_id: S::SourceId,
        span: impl AsSpan,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            source_id,
            span: span.as_span(),
        }
    }

    /// The region the diagnostic is about.
    pub fn primary(label: impl Into<String>, source_id: S::SourceId, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Primary, label, source_id, span)
    }
}

/// Primary snippets take the severity's colour, secondary ones are only
/// emphasised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetKind {
    Primary,
    Secondary,
}

/// Rendering options for [`Diagnostic::write_to_stream`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Lines of source shown above and below a snippet.
    pub context_size: usize,

    pub error_color: ColorSpec,
    pub warning_color: ColorSpec,
    pub emphasis: ColorSpec,
    pub subtle: ColorSpec,

    pub gutter: &'static str,
    pub underline: &'static str,
    pub underline_after: &'static str,
    /// Appended to the underline of a snippet that continues past its first line.
    pub continuation: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        let bold = |color: Option<Color>| {
            let mut spec = ColorSpec::new();
            spec.set_fg(color).set_bold(true);
            spec
        };

        let mut subtle = ColorSpec::new();
        subtle.set_italic(true).set_dimmed(true);

        Self {
            context_size: 1,

            error_color: bold(Some(Color::Red)),
            warning_color: bold(Some(Color::Yellow)),
            emphasis: bold(None),
            subtle,

            gutter: "│",
            underline: "^",
            underline_after: " ",
            continuation: "...",
        }
    }
}
