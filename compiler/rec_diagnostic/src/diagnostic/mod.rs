//! Reportable form of record, pattern and evaluation errors.
//!
//! A `Diagnostic` is always an error: declaration and pattern problems stop
//! compilation, and run-time faults abort the evaluation that raised them.
//! Hosts render it themselves; `Display` gives a plain-text form for logs
//! and tests.

use std::fmt;

use rec_ir::Span;

use crate::ErrorCode;

/// The declaration or pattern a diagnostic is reported against.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Context {
    /// A record declaration, by name.
    Record(String),
    /// A `Type(...)` pattern, by the type it names.
    Pattern(String),
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Record(name) => write!(f, "in record `{name}`"),
            Context::Pattern(target) => write!(f, "in pattern `{target}(...)`"),
        }
    }
}

/// A source span annotated with a short message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// The offending location, as opposed to related context such as an
    /// earlier declaration or a competing candidate.
    pub primary: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub context: Option<Context>,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    /// How the user could fix it.
    pub help: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            context: None,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Report against a record declaration.
    pub fn in_record(mut self, record: impl Into<String>) -> Self {
        self.context = Some(Context::Record(record.into()));
        self
    }

    /// Report against the pattern naming `target`.
    pub fn in_pattern(mut self, target: impl Into<String>) -> Self {
        self.context = Some(Context::Pattern(target.into()));
        self
    }

    pub fn label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            primary: true,
        });
        self
    }

    pub fn secondary(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            primary: false,
        });
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.primary).map(|l| l.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  {context}")?;
        }
        for label in &self.labels {
            let marker = if label.primary { "-->" } else { "..." };
            write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for help in &self.help {
            write!(f, "\n  = help: {help}")?;
        }
        Ok(())
    }
}
