//! Pattern trees for `expr matches Type(pattern, ...)`.

use crate::{Name, Span, TypeId};

/// One pattern in a `matches` expression.
///
/// The top-level pattern of a `matches` expression is always `Record`;
/// its arguments may be any variant.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MatchPattern {
    /// `var x` (untyped) or `T x` (typed): binds the corresponding output.
    Binding {
        name: Name,
        ty: Option<TypeId>,
        span: Span,
    },
    /// `_`: accepts anything, binds nothing.
    Discard { span: Span },
    /// `Type(p1, ..., pn)`: nested structural pattern.
    Record {
        ty: TypeId,
        args: Vec<MatchPattern>,
        span: Span,
    },
}

impl MatchPattern {
    /// `var name`.
    pub fn var(name: Name) -> Self {
        MatchPattern::Binding {
            name,
            ty: None,
            span: Span::DUMMY,
        }
    }

    /// `T name`.
    pub fn typed(name: Name, ty: TypeId) -> Self {
        MatchPattern::Binding {
            name,
            ty: Some(ty),
            span: Span::DUMMY,
        }
    }

    /// `_`.
    pub fn discard() -> Self {
        MatchPattern::Discard { span: Span::DUMMY }
    }

    /// `Type(args...)`.
    pub fn record(ty: TypeId, args: Vec<MatchPattern>) -> Self {
        MatchPattern::Record {
            ty,
            args,
            span: Span::DUMMY,
        }
    }

    /// Attach a source span.
    #[must_use]
    pub fn at(mut self, at: Span) -> Self {
        match &mut self {
            MatchPattern::Binding { span, .. }
            | MatchPattern::Discard { span }
            | MatchPattern::Record { span, .. } => *span = at,
        }
        self
    }

    pub fn span(&self) -> Span {
        match self {
            MatchPattern::Binding { span, .. }
            | MatchPattern::Discard { span }
            | MatchPattern::Record { span, .. } => *span,
        }
    }

    /// Nesting depth: 1 for leaves, 1 + deepest argument for records.
    pub fn depth(&self) -> usize {
        match self {
            MatchPattern::Binding { .. } | MatchPattern::Discard { .. } => 1,
            MatchPattern::Record { args, .. } => {
                1 + args.iter().map(MatchPattern::depth).max().unwrap_or(0)
            }
        }
    }
}
