//! Run-time evaluation of resolved match plans.
//!
//! Evaluation only reads the plan and the registry. Outputs of an operator
//! that returned `false` are dropped before anything inspects them, and a
//! failed match never exposes partial bindings.

use smallvec::SmallVec;

use rec_ir::Name;
use rec_synth::RecordRegistry;
use rec_value::{EvalError, EvalErrorKind, EvalResult, Host, Value};

use crate::stack::ensure_sufficient_stack;
use crate::{MatchPlan, SubPattern, SubjectRef, TypeTest};

/// Variables bound by a successful match, depth-first left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings(SmallVec<[(Name, Value); 4]>);

impl Bindings {
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Name, Value)> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<(Name, Value)> {
        self.0.into_vec()
    }
}

/// Outcome of evaluating a `matches` expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Success(Bindings),
    Failure,
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            MatchResult::Success(bindings) => Some(bindings),
            MatchResult::Failure => None,
        }
    }
}

/// Evaluate a plan's subject expression through the host, then match it.
///
/// `plan` must be a root plan from `Resolver::resolve`; a nested node has no
/// subject expression of its own and is rejected with `NotAMatchSite`.
pub fn evaluate_site(
    plan: &MatchPlan,
    registry: &RecordRegistry,
    host: &dyn Host,
) -> EvalResult<MatchResult> {
    let subject = match plan.subject {
        SubjectRef::Expr(expr) => host.eval_expr(expr)?,
        SubjectRef::OutParam(index) => {
            let kind = EvalErrorKind::NotAMatchSite { index };
            return Err(EvalError::from(kind).with_span(plan.span));
        }
    };
    evaluate(plan, &subject, registry, host)
}

/// Match an already-evaluated subject against a plan.
///
/// Host faults raised by user operators or getters propagate unchanged.
#[tracing::instrument(level = "trace", skip_all, fields(target = ?plan.target))]
pub fn evaluate(
    plan: &MatchPlan,
    subject: &Value,
    registry: &RecordRegistry,
    host: &dyn Host,
) -> EvalResult<MatchResult> {
    let mut bindings = Bindings::default();
    if eval_node(plan, subject, registry, host, &mut bindings)? {
        Ok(MatchResult::Success(bindings))
    } else {
        Ok(MatchResult::Failure)
    }
}

fn passes_type_test(test: TypeTest, subject: &Value, registry: &RecordRegistry) -> bool {
    match (test, subject.runtime_type()) {
        (_, None) => false,
        (TypeTest::Unconditional | TypeTest::NonNull, Some(_)) => true,
        (TypeTest::Instance(ty), Some(actual)) => registry.pool().is_subtype(actual, ty),
    }
}

fn eval_node(
    plan: &MatchPlan,
    subject: &Value,
    registry: &RecordRegistry,
    host: &dyn Host,
    bindings: &mut Bindings,
) -> EvalResult<bool> {
    if !passes_type_test(plan.type_test, subject, registry) {
        tracing::trace!(?subject, test = ?plan.type_test, "type test failed");
        return Ok(false);
    }

    let (matched, outs) = plan.operator.invoke(registry, subject, host)?;
    if !matched {
        tracing::trace!("operator declined");
        return Ok(false);
    }

    for (arg, out) in plan.args.iter().zip(outs) {
        match arg {
            SubPattern::Binding { name, .. } => bindings.0.push((*name, out)),
            SubPattern::Discard => {}
            SubPattern::Nested(nested) => {
                let ok = ensure_sufficient_stack(|| {
                    eval_node(nested, &out, registry, host, bindings)
                })?;
                if !ok {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}
