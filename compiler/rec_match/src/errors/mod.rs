//! Pattern resolution errors.
//!
//! Every one of these is reported at compile time; a plan is either built
//! whole or not at all.

use rec_diagnostic::{Diagnostic, ErrorCode};
use rec_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("no `Match` operator on `{target}` accepts these {arity} argument pattern(s)")]
    NoMatchOperator {
        target: String,
        arity: usize,
        span: Span,
    },
    #[error("{count} `Match` operators on `{target}` accept these argument patterns")]
    AmbiguousMatchOperator {
        target: String,
        count: usize,
        candidates: Vec<Span>,
        span: Span,
    },
    #[error("pattern variable `{name}` is bound more than once")]
    DuplicateBinding { name: String, first: Span, second: Span },
    #[error("`{target}` deconstructs into {expected:?} value(s), but the pattern has {found}")]
    ArityMismatch {
        target: String,
        expected: Vec<usize>,
        found: usize,
        span: Span,
    },
    #[error("pattern expects `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("pattern nesting exceeds the limit of {limit}")]
    PatternTooDeep { limit: usize, span: Span },
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::NoMatchOperator { .. } => ErrorCode::E3001,
            ResolveError::AmbiguousMatchOperator { .. } => ErrorCode::E3002,
            ResolveError::DuplicateBinding { .. } => ErrorCode::E3003,
            ResolveError::ArityMismatch { .. } => ErrorCode::E3004,
            ResolveError::TypeMismatch { .. } => ErrorCode::E3005,
            ResolveError::PatternTooDeep { .. } => ErrorCode::E3006,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ResolveError::NoMatchOperator { span, .. }
            | ResolveError::AmbiguousMatchOperator { span, .. }
            | ResolveError::ArityMismatch { span, .. }
            | ResolveError::TypeMismatch { span, .. }
            | ResolveError::PatternTooDeep { span, .. } => *span,
            ResolveError::DuplicateBinding { second, .. } => *second,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.to_string())
            .label(self.span(), self.label());
        match self {
            ResolveError::NoMatchOperator { target, .. }
            | ResolveError::ArityMismatch { target, .. } => diag.in_pattern(target),
            ResolveError::AmbiguousMatchOperator {
                target, candidates, ..
            } => candidates
                .iter()
                .fold(diag.in_pattern(target), |d, &span| d.secondary(span, "candidate"))
                .note("overloads with compatible arity are never ranked"),
            ResolveError::DuplicateBinding { first, .. } => {
                diag.secondary(*first, "first bound here")
            }
            ResolveError::PatternTooDeep { .. } => {
                diag.help("split the pattern into several `matches` expressions")
            }
            ResolveError::TypeMismatch { .. } => diag,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ResolveError::NoMatchOperator { .. } => "no applicable operator",
            ResolveError::AmbiguousMatchOperator { .. } => "ambiguous pattern",
            ResolveError::DuplicateBinding { .. } => "bound again here",
            ResolveError::ArityMismatch { .. } => "wrong number of arguments",
            ResolveError::TypeMismatch { .. } => "type mismatch",
            ResolveError::PatternTooDeep { .. } => "nested too deeply",
        }
    }
}
