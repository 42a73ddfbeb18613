//! Shared fixtures for unit tests.

use std::cell::Cell;

use rustc_hash::FxHashMap;

use rec_ir::{
    BodyId, ExprId, Name, PrimaryMember, RecordDecl, SharedInterner, Span, TypeId, UserMember,
};
use rec_synth::RecordRegistry;
use rec_value::{EvalResult, Host, Value};

use crate::Subject;

type MatchFn = Box<dyn Fn(&Value, &mut [Value]) -> EvalResult<bool>>;

/// Host running `Match` bodies as closures. Counts operator calls.
#[derive(Default)]
pub struct FnHost {
    pub matches: FxHashMap<BodyId, MatchFn>,
    pub exprs: FxHashMap<ExprId, Value>,
    pub calls: Cell<usize>,
}

impl FnHost {
    pub fn with_match(
        mut self,
        body: BodyId,
        f: impl Fn(&Value, &mut [Value]) -> EvalResult<bool> + 'static,
    ) -> Self {
        self.matches.insert(body, Box::new(f));
        self
    }

    pub fn with_expr(mut self, expr: ExprId, value: Value) -> Self {
        self.exprs.insert(expr, value);
        self
    }
}

impl Host for FnHost {
    fn eval_expr(&self, expr: ExprId) -> EvalResult<Value> {
        Ok(self.exprs.get(&expr).cloned().unwrap_or(Value::Null))
    }

    fn call_match(&self, body: BodyId, subject: &Value, outs: &mut [Value]) -> EvalResult<bool> {
        self.calls.set(self.calls.get() + 1);
        (self.matches[&body])(subject, outs)
    }
}

/// Types used across the match tests.
pub struct Fixture {
    pub registry: RecordRegistry,
    /// `Point(x: int, y: int)`
    pub point: TypeId,
    /// `Inner(a: int)`
    pub inner: TypeId,
    /// `Outer(inner: Inner, b: int)`
    pub outer: TypeId,
}

impl Fixture {
    pub fn setup() -> Self {
        let mut registry = RecordRegistry::new(SharedInterner::new());
        let point = registry.declare_record_type("Point", TypeId::OBJECT);
        let inner = registry.declare_record_type("Inner", TypeId::OBJECT);
        let outer = registry.declare_record_type("Outer", TypeId::OBJECT);

        let decls = [
            record(&registry, "Point", point, &[("x", TypeId::INT), ("y", TypeId::INT)]),
            record(&registry, "Inner", inner, &[("a", TypeId::INT)]),
            record(&registry, "Outer", outer, &[("inner", inner), ("b", TypeId::INT)]),
        ];
        for decl in decls {
            registry.declare(decl).unwrap();
        }

        Fixture {
            registry,
            point,
            inner,
            outer,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.registry.interner().intern(s)
    }

    pub fn subject(&self, ty: TypeId) -> Subject {
        Subject {
            expr: ExprId::new(0),
            ty,
            span: Span::new(0, 1),
        }
    }

    pub fn point(&self, x: i64, y: i64) -> Value {
        self.registry
            .construct(self.point, vec![Value::Int(x), Value::Int(y)])
            .unwrap()
    }

    pub fn outer(&self, a: i64, b: i64) -> Value {
        let inner = self
            .registry
            .construct(self.inner, vec![Value::Int(a)])
            .unwrap();
        self.registry
            .construct(self.outer, vec![inner, Value::Int(b)])
            .unwrap()
    }
}

/// Declaration of a record with the given primary members and no body.
pub fn record(
    registry: &RecordRegistry,
    name: &str,
    ty: TypeId,
    primary: &[(&str, TypeId)],
) -> RecordDecl {
    let interner = registry.interner();
    let primary = primary
        .iter()
        .enumerate()
        .map(|(i, (member, member_ty))| {
            let start = u32::try_from(i).unwrap() * 10 + 8;
            PrimaryMember::new(interner.intern(member), *member_ty, Span::new(start, start + 1))
        })
        .collect();
    RecordDecl::new(interner.intern(name), ty, primary, Span::new(0, 40))
}

/// A user `Match` operator member on `subject`.
pub fn match_op(
    registry: &RecordRegistry,
    subject: TypeId,
    outputs: Vec<TypeId>,
    body: u32,
) -> UserMember {
    let start = 100 + body * 10;
    UserMember::match_operator(
        registry.interner().well_known().match_op,
        subject,
        outputs,
        BodyId::new(body),
        Span::new(start, start + 5),
    )
}
