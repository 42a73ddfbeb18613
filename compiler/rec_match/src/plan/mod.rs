//! Resolved match plans.

use std::sync::Arc;

use rec_ir::{ExprId, Name, Span, TypeId};
use rec_synth::MatchOperator;

/// Where a plan node's subject comes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SubjectRef {
    /// The subject expression of the `matches` expression.
    Expr(ExprId),
    /// Output `n` of the parent node's operator.
    OutParam(usize),
}

/// Dynamic type test performed before the operator is invoked.
///
/// Null fails every variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeTest {
    /// The static type is a non-nullable subtype of the operator subject.
    Unconditional,
    /// The static type is a nullable subtype of the operator subject.
    NonNull,
    /// The runtime type must be a subtype of this type.
    Instance(TypeId),
}

/// One argument of a plan node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubPattern {
    /// Bind the output to `name`; `ty` is the binding's static type.
    Binding { name: Name, ty: TypeId },
    Nested(Box<MatchPlan>),
    Discard,
}

/// Compile-time plan for one `Type(args...)` pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchPlan {
    pub subject: SubjectRef,
    /// Static type of the subject at this node.
    pub static_ty: TypeId,
    /// Type named by the pattern.
    pub target: TypeId,
    pub operator: Arc<MatchOperator>,
    pub type_test: TypeTest,
    /// One entry per operator output.
    pub args: Vec<SubPattern>,
    pub span: Span,
}

impl MatchPlan {
    /// Every variable this plan binds on success, depth-first left to right.
    pub fn bindings(&self) -> Vec<(Name, TypeId)> {
        let mut out = Vec::new();
        self.collect_bindings(&mut out);
        out
    }

    fn collect_bindings(&self, out: &mut Vec<(Name, TypeId)>) {
        for arg in &self.args {
            match arg {
                SubPattern::Binding { name, ty } => out.push((*name, *ty)),
                SubPattern::Nested(plan) => plan.collect_bindings(out),
                SubPattern::Discard => {}
            }
        }
    }

    /// Number of operator invocations on the deepest path.
    pub fn depth(&self) -> usize {
        1 + self
            .args
            .iter()
            .map(|arg| match arg {
                SubPattern::Nested(plan) => plan.depth(),
                SubPattern::Binding { .. } | SubPattern::Discard => 0,
            })
            .max()
            .unwrap_or(0)
    }
}
