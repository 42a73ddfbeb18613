//! Interface to the surrounding compiler's evaluator.
//!
//! Subject expressions and user-written member bodies belong to the host.
//! Synthesized members never call into the host; user-provided ones always
//! do. Faults returned from these methods are passed through unchanged.

use rec_ir::{BodyId, ExprId};

use crate::{EvalError, EvalResult, Value};

/// Host evaluator.
///
/// Every method has a default that reports a fault, so hosts only implement
/// what their declarations actually use.
pub trait Host {
    /// Evaluate the subject expression of a `matches` expression.
    fn eval_expr(&self, expr: ExprId) -> EvalResult<Value> {
        Err(EvalError::host_fault(format!(
            "host cannot evaluate {expr:?}"
        )))
    }

    /// Run a user `Match` operator.
    ///
    /// `outs` holds one slot per output, pre-filled with the output type's
    /// default. The returned flag decides whether the slots are observed.
    fn call_match(&self, body: BodyId, subject: &Value, outs: &mut [Value]) -> EvalResult<bool> {
        let _ = (subject, outs);
        Err(EvalError::host_fault(format!(
            "host cannot run Match operator {body:?}"
        )))
    }

    /// Run a user `equals` override.
    fn call_equals(&self, body: BodyId, lhs: &Value, rhs: &Value) -> EvalResult<bool> {
        let _ = (lhs, rhs);
        Err(EvalError::host_fault(format!(
            "host cannot run equals {body:?}"
        )))
    }

    /// Run a user `hash` override.
    fn call_hash(&self, body: BodyId, value: &Value) -> EvalResult<u64> {
        let _ = value;
        Err(EvalError::host_fault(format!(
            "host cannot run hash {body:?}"
        )))
    }

    /// Run a user property getter.
    fn call_property(&self, body: BodyId, receiver: &Value) -> EvalResult<Value> {
        let _ = receiver;
        Err(EvalError::host_fault(format!(
            "host cannot run property {body:?}"
        )))
    }
}

/// Host with no user code. Sufficient when every member is synthesized.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHost;

impl Host for NoHost {}
