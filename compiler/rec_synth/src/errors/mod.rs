//! Declaration-time errors.

use rec_diagnostic::{Diagnostic, ErrorCode};
use rec_ir::Span;

/// An error found while synthesizing a record's members.
///
/// All of these are compile-time errors; none is ever deferred to run time.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SynthError {
    #[error("duplicate primary member `{member}` in record `{record}`")]
    DuplicatePrimaryMember {
        record: String,
        member: String,
        first: Span,
        second: Span,
    },
    #[error("primary member `{member}` of record `{record}` cannot be mutable")]
    MutablePrimaryMember {
        record: String,
        member: String,
        span: Span,
    },
    #[error("`{name}` is not a record type")]
    NotARecord { name: String, span: Span },
    #[error("record `{record}` is already declared")]
    AlreadyDeclared { record: String, span: Span },
}

impl SynthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SynthError::DuplicatePrimaryMember { .. } => ErrorCode::E2001,
            SynthError::MutablePrimaryMember { .. } => ErrorCode::E2002,
            SynthError::NotARecord { .. } => ErrorCode::E2003,
            SynthError::AlreadyDeclared { .. } => ErrorCode::E2004,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SynthError::DuplicatePrimaryMember { second: span, .. }
            | SynthError::MutablePrimaryMember { span, .. }
            | SynthError::NotARecord { span, .. }
            | SynthError::AlreadyDeclared { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.to_string());
        match self {
            SynthError::DuplicatePrimaryMember {
                record,
                first,
                second,
                ..
            } => diag
                .in_record(record)
                .label(*second, "redeclared here")
                .secondary(*first, "first declared here"),
            SynthError::MutablePrimaryMember { record, span, .. } => diag
                .in_record(record)
                .label(*span, "declared mutable here")
                .note("primary members feed the synthesized hash and must not change")
                .help("declare a separate mutable property in the record body"),
            SynthError::AlreadyDeclared { record, span } => {
                diag.in_record(record).label(*span, "declared again here")
            }
            SynthError::NotARecord { span, .. } => diag.label(*span, "not a record"),
        }
    }
}
