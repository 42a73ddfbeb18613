//! Evaluation errors.
//!
//! A failed match is never an error. `EvalError` covers the remaining
//! run-time faults: misuse of the construction/member-access API, and
//! faults raised by user-written bodies, which are propagated unmodified.

use rec_diagnostic::{Diagnostic, ErrorCode};
use rec_ir::Span;

/// Result of evaluation.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// Structured category of a run-time fault.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("`{record}` expects {expected} constructor argument(s), found {found}")]
    ConstructorArity {
        record: String,
        expected: usize,
        found: usize,
    },
    #[error("argument for `{member}` must be `{expected}`, found `{found}`")]
    ConstructorType {
        member: String,
        expected: String,
        found: String,
    },
    #[error("`{record}` has no member `{member}`")]
    UnknownMember { record: String, member: String },
    #[error("expected a record value, found `{found}`")]
    NotARecord { found: String },
    #[error("member `{member}` has no body")]
    MissingBody { member: String },
    /// A nested plan node reads its parent's output `index` and cannot be
    /// evaluated on its own.
    #[error("plan reads output {index} of a parent operator and is not a match site")]
    NotAMatchSite { index: usize },
    /// Raised by user code; the message is the host's, verbatim.
    #[error("{message}")]
    HostFault { message: String },
}

/// A run-time fault with an optional source location.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// A fault raised by user code running in the host evaluator.
    pub fn host_fault(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::HostFault {
            message: message.into(),
        })
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn is_host_fault(&self) -> bool {
        matches!(self.kind, EvalErrorKind::HostFault { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::ConstructorArity { .. } => ErrorCode::E6001,
            EvalErrorKind::ConstructorType { .. } => ErrorCode::E6002,
            EvalErrorKind::UnknownMember { .. } => ErrorCode::E6003,
            EvalErrorKind::HostFault { .. } | EvalErrorKind::MissingBody { .. } => {
                ErrorCode::E6004
            }
            EvalErrorKind::NotARecord { .. } => ErrorCode::E6005,
            EvalErrorKind::NotAMatchSite { .. } => ErrorCode::E6006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.code(), self.to_string());
        if let EvalErrorKind::ConstructorArity { record, .. }
        | EvalErrorKind::UnknownMember { record, .. } = &self.kind
        {
            diag = diag.in_record(record);
        }
        match self.span {
            Some(span) => diag.label(span, "raised here"),
            None => diag,
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}
