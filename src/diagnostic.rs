use std::ops::Range;

use crate::error::BuildError;
use crate::resolution::ResolutionFailure;

/// A user-facing diagnostic (error or warning).
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Byte range into `source`, when the problem has a location.
    pub span: Option<Range<usize>>,
    pub source: Option<SourceFile>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

/// The file a diagnostic points into.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
            span: None,
            source: None,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message)
        }
    }

    pub fn with_span(mut self, name: &str, text: &str, span: Range<usize>) -> Self {
        self.source = Some(SourceFile {
            name: name.to_string(),
            text: text.to_string(),
        });
        self.span = Some(span);
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    /// Render the diagnostic to stderr; located diagnostics go through ariadne.
    pub fn render(&self) {
        match (&self.source, &self.span) {
            (Some(source), Some(span)) => self.render_located(source, span.clone()),
            _ => self.render_plain(),
        }
    }

    fn render_located(&self, source: &SourceFile, span: Range<usize>) {
        use ariadne::{Color, Label, Report, ReportKind, Source};

        let kind = match self.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };

        let color = match self.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let filename = source.name.as_str();
        let mut report = Report::build(kind, filename, span.start)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&self.message)
                    .with_color(color),
            );

        for note in &self.notes {
            report = report.with_note(note);
        }

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        if report
            .finish()
            .eprint((filename, Source::from(source.text.as_str())))
            .is_err()
        {
            self.render_plain();
        }
    }

    fn render_plain(&self) {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        eprintln!("{}: {}", label, self.message);
        for note in &self.notes {
            eprintln!("  note: {}", note);
        }
        if let Some(help) = &self.help {
            eprintln!("  help: {}", help);
        }
    }
}

impl From<&BuildError> for Diagnostic {
    fn from(err: &BuildError) -> Self {
        let d = Diagnostic::error(err.to_string());
        match err {
            BuildError::UnclassifiableProducer { kind, .. } => d
                .with_note(format!("producer kind: {}", kind))
                .with_help(
                    "module maps can only be named after module, project or library binary components"
                        .to_string(),
                ),
            BuildError::Resolution(ResolutionFailure::NoMatchingVariant { .. }) => d.with_help(
                "publish a variant with these attributes or adjust the binary's flags".to_string(),
            ),
            BuildError::Resolution(ResolutionFailure::AmbiguousVariants { .. }) => d.with_help(
                "make the variants' attributes distinct so exactly one matches".to_string(),
            ),
            BuildError::Resolution(ResolutionFailure::DependencyCycle { .. }) => d.with_help(
                "break the cycle between the components' variant dependencies".to_string(),
            ),
            BuildError::InvalidModuleName { .. } => d.with_help(
                "set `module` in [project] to a Swift identifier".to_string(),
            ),
            BuildError::ChannelConflict { .. } => d.with_help(
                "give each binary variant a distinct name".to_string(),
            ),
            _ => d,
        }
    }
}

/// Render a list of diagnostics.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        diag.render();
    }
}
