//! Source-anchored error rendering shared by every stage of the pipeline
//! (lexer, parser, scope, unifier). Each stage produces its own error type;
//! at the CLI boundary those errors are converted into a `Diagnostic` and
//! rendered with `ariadne`.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::span::Span;

/// A single reportable error: a message anchored to a span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Render this diagnostic against `source`, returning the formatted
    /// report as a string (rather than printing directly, so callers can
    /// test the output or write it anywhere). Colorless, matching this
    /// workspace's other front ends so snapshot output stays stable.
    pub fn render(&self, source: &str) -> String {
        let start = self.span.start as usize;
        let end = (self.span.end as usize).max(start + 1).min(source.len().max(start + 1));
        let config = Config::default().with_color(false);

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, start..end)
            .with_message(&self.message)
            .with_config(config)
            .with_label(Label::new(start..end).with_message(&self.message).with_color(Color::Red))
            .finish()
            .write(Source::from(source), &mut buf)
            .expect("ariadne report should render to an in-memory buffer");
        String::from_utf8(buf).expect("ariadne output is valid utf-8")
    }
}
