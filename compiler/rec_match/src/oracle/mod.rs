//! Overload resolution for `Match` operators.
//!
//! The host compiler owns general overload resolution; matching only asks
//! one question: given the type named in a pattern and the shapes of its
//! arguments, which single `Match` operator applies?

use std::sync::Arc;

use rec_ir::{MatchPattern, TypeId, TypePool};
use rec_synth::{MatchOperator, RecordRegistry};

/// What an argument pattern demands of the output it receives.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArgShape {
    /// `var x` or `_`: any output type.
    Any,
    /// `T x`: the output must be assignable to `T`.
    Binding(TypeId),
    /// `N(...)`: the output must be testable against the subject type of
    /// some `Match` operator declared on `N`.
    Nested(TypeId),
}

impl ArgShape {
    pub fn of(pattern: &MatchPattern) -> Self {
        match pattern {
            MatchPattern::Binding { ty: Some(ty), .. } => ArgShape::Binding(*ty),
            MatchPattern::Binding { ty: None, .. } | MatchPattern::Discard { .. } => ArgShape::Any,
            MatchPattern::Record { ty, .. } => ArgShape::Nested(*ty),
        }
    }

    /// Check if an operator output of type `output` satisfies this shape.
    ///
    /// `subjects` are the first-parameter types of the operators on a
    /// `Nested` shape's type; the other shapes ignore them.
    pub fn accepts(self, pool: &TypePool, output: TypeId, subjects: &[TypeId]) -> bool {
        match self {
            ArgShape::Any => true,
            ArgShape::Binding(ty) => pool.is_subtype(output, ty),
            ArgShape::Nested(_) => subjects.iter().any(|&s| pool.related(output, s)),
        }
    }
}

/// Outcome of an overload query.
#[derive(Clone, Debug)]
pub enum OracleResult {
    Found(Arc<MatchOperator>),
    /// More than one operator applies; there is no tie-break.
    Ambiguous(Vec<Arc<MatchOperator>>),
    /// Nothing applies. `arities` lists the arities that do exist.
    NotFound { arities: Vec<usize> },
}

/// Locates the `Match` operator for a pattern.
pub trait OverloadOracle {
    fn resolve_match(&self, target: TypeId, shapes: &[ArgShape]) -> OracleResult;
}

impl OverloadOracle for RecordRegistry {
    fn resolve_match(&self, target: TypeId, shapes: &[ArgShape]) -> OracleResult {
        let pool = self.pool();
        let mut arities = Vec::new();
        let mut applicable = Vec::new();

        // A nested type without operators is tested against itself, so the
        // nested pattern reports its own missing operator.
        let subjects: Vec<Vec<TypeId>> = shapes
            .iter()
            .map(|shape| match *shape {
                ArgShape::Nested(nested) => {
                    let subjects: Vec<TypeId> =
                        self.match_operators(nested).map(|op| op.subject).collect();
                    if subjects.is_empty() {
                        vec![nested]
                    } else {
                        subjects
                    }
                }
                ArgShape::Any | ArgShape::Binding(_) => Vec::new(),
            })
            .collect();

        for op in self.match_operators(target) {
            arities.push(op.arity());
            if op.arity() != shapes.len() {
                continue;
            }
            let fits = shapes
                .iter()
                .zip(&op.outputs)
                .zip(&subjects)
                .all(|((shape, &output), subjects)| shape.accepts(pool, output, subjects));
            if fits {
                applicable.push(Arc::clone(op));
            }
        }

        match applicable.len() {
            0 => {
                arities.sort_unstable();
                arities.dedup();
                OracleResult::NotFound { arities }
            }
            1 => OracleResult::Found(applicable.swap_remove(0)),
            _ => OracleResult::Ambiguous(applicable),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
