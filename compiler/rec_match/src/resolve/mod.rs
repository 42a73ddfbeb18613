//! Compile-time resolution of `matches` expressions into `MatchPlan`s.

use rustc_hash::FxHashMap;

use rec_ir::{ExprId, MatchPattern, Name, Span, StringInterner, TypeId, TypePool};
use rec_synth::RecordRegistry;

use crate::stack::ensure_sufficient_stack;
use crate::{
    ArgShape, MatchPlan, OracleResult, OverloadOracle, ResolveError, SubPattern, SubjectRef,
    TypeTest,
};

/// Resolver limits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolverConfig {
    /// Deepest allowed pattern nesting; the outermost pattern is depth 1.
    pub max_depth: usize,
}

impl ResolverConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// The subject of a `matches` expression, as typed by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Subject {
    pub expr: ExprId,
    pub ty: TypeId,
    pub span: Span,
}

/// Turns pattern trees into plans.
pub struct Resolver<'a, O: ?Sized = RecordRegistry> {
    pool: &'a TypePool,
    interner: &'a StringInterner,
    oracle: &'a O,
    config: ResolverConfig,
}

impl<'a> Resolver<'a, RecordRegistry> {
    /// Resolver using the registry both as type table and as oracle.
    pub fn new(registry: &'a RecordRegistry) -> Self {
        Resolver {
            pool: registry.pool(),
            interner: registry.interner(),
            oracle: registry,
            config: ResolverConfig::default(),
        }
    }
}

impl<'a, O: OverloadOracle + ?Sized> Resolver<'a, O> {
    /// Resolver with an external oracle.
    pub fn with_oracle(pool: &'a TypePool, interner: &'a StringInterner, oracle: &'a O) -> Self {
        Resolver {
            pool,
            interner,
            oracle,
            config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve `subject matches target(args...)`.
    #[tracing::instrument(level = "debug", skip_all, fields(target = ?target, arity = args.len()))]
    pub fn resolve(
        &self,
        subject: Subject,
        target: TypeId,
        args: &[MatchPattern],
    ) -> Result<MatchPlan, ResolveError> {
        let mut seen = FxHashMap::default();
        self.resolve_node(
            SubjectRef::Expr(subject.expr),
            subject.ty,
            target,
            args,
            subject.span,
            1,
            &mut seen,
        )
    }

    /// Resolve a whole `Type(args...)` pattern; other pattern kinds are not
    /// valid at the top of a `matches` expression.
    pub fn resolve_pattern(
        &self,
        subject: Subject,
        pattern: &MatchPattern,
    ) -> Result<MatchPlan, ResolveError> {
        match pattern {
            MatchPattern::Record { ty, args, .. } => self.resolve(subject, *ty, args),
            other => Err(ResolveError::TypeMismatch {
                expected: "a type pattern".to_string(),
                found: "a variable or discard pattern".to_string(),
                span: other.span(),
            }),
        }
    }

    #[allow(
        clippy::too_many_arguments,
        reason = "recursion state is threaded explicitly"
    )]
    fn resolve_node(
        &self,
        subject: SubjectRef,
        static_ty: TypeId,
        target: TypeId,
        args: &[MatchPattern],
        span: Span,
        depth: usize,
        seen: &mut FxHashMap<Name, Span>,
    ) -> Result<MatchPlan, ResolveError> {
        if depth > self.config.max_depth {
            return Err(ResolveError::PatternTooDeep {
                limit: self.config.max_depth,
                span,
            });
        }

        let shapes: Vec<ArgShape> = args.iter().map(ArgShape::of).collect();
        let operator = match self.oracle.resolve_match(target, &shapes) {
            OracleResult::Found(op) => op,
            OracleResult::Ambiguous(candidates) => {
                return Err(ResolveError::AmbiguousMatchOperator {
                    target: self.type_name(target),
                    count: candidates.len(),
                    candidates: candidates.iter().map(|op| op.span).collect(),
                    span,
                });
            }
            OracleResult::NotFound { arities }
                if !arities.is_empty() && !arities.contains(&args.len()) =>
            {
                return Err(ResolveError::ArityMismatch {
                    target: self.type_name(target),
                    expected: arities,
                    found: args.len(),
                    span,
                });
            }
            OracleResult::NotFound { .. } => {
                return Err(ResolveError::NoMatchOperator {
                    target: self.type_name(target),
                    arity: args.len(),
                    span,
                });
            }
        };

        if operator.arity() != args.len() {
            return Err(ResolveError::ArityMismatch {
                target: self.type_name(target),
                expected: vec![operator.arity()],
                found: args.len(),
                span,
            });
        }

        let type_test = self.type_test(static_ty, operator.subject, span)?;
        tracing::debug!(
            target = %self.type_name(target),
            synthesized = operator.is_synthesized(),
            ?type_test,
            "selected Match operator"
        );

        let mut resolved = Vec::with_capacity(args.len());
        for (index, (arg, &output)) in args.iter().zip(&operator.outputs).enumerate() {
            let sub = match arg {
                MatchPattern::Binding { name, ty, span } => {
                    if let Some(declared) = *ty {
                        if !self.pool.is_subtype(output, declared) {
                            return Err(self.mismatch(declared, output, *span));
                        }
                    }
                    if let Some(&first) = seen.get(name) {
                        return Err(ResolveError::DuplicateBinding {
                            name: self.interner.lookup(*name).to_string(),
                            first,
                            second: *span,
                        });
                    }
                    seen.insert(*name, *span);
                    SubPattern::Binding {
                        name: *name,
                        ty: ty.unwrap_or(output),
                    }
                }
                MatchPattern::Discard { .. } => SubPattern::Discard,
                MatchPattern::Record { ty, args, span } => {
                    let nested = ensure_sufficient_stack(|| {
                        self.resolve_node(
                            SubjectRef::OutParam(index),
                            output,
                            *ty,
                            args,
                            *span,
                            depth + 1,
                            seen,
                        )
                    })?;
                    SubPattern::Nested(Box::new(nested))
                }
            };
            resolved.push(sub);
        }

        Ok(MatchPlan {
            subject,
            static_ty,
            target,
            operator,
            type_test,
            args: resolved,
            span,
        })
    }

    /// Decide how the subject is narrowed to the operator's first parameter.
    fn type_test(
        &self,
        static_ty: TypeId,
        first: TypeId,
        span: Span,
    ) -> Result<TypeTest, ResolveError> {
        if self.pool.is_subtype(static_ty, first) {
            if self.pool.is_nullable(static_ty) {
                Ok(TypeTest::NonNull)
            } else {
                Ok(TypeTest::Unconditional)
            }
        } else if self.pool.is_subtype(first, static_ty) {
            Ok(TypeTest::Instance(first))
        } else {
            Err(self.mismatch(first, static_ty, span))
        }
    }

    fn mismatch(&self, expected: TypeId, found: TypeId, span: Span) -> ResolveError {
        ResolveError::TypeMismatch {
            expected: self.type_name(expected),
            found: self.type_name(found),
            span,
        }
    }

    fn type_name(&self, ty: TypeId) -> String {
        self.pool.display(ty, self.interner)
    }
}
