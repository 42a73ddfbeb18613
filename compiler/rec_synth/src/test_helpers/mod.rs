//! Shared fixtures for unit tests.

use std::cell::Cell;

use rustc_hash::FxHashMap;

use rec_ir::{BodyId, PrimaryMember, RecordDecl, SharedInterner, Span, TypeId, UserMember};
use rec_value::{EvalResult, Host, Value};

use crate::RecordRegistry;

type MatchFn = Box<dyn Fn(&Value, &mut [Value]) -> EvalResult<bool>>;
type EqualsFn = Box<dyn Fn(&Value, &Value) -> EvalResult<bool>>;
type HashFn = Box<dyn Fn(&Value) -> EvalResult<u64>>;
type PropertyFn = Box<dyn Fn(&Value) -> EvalResult<Value>>;

/// Host whose bodies are Rust closures; counts every call.
#[derive(Default)]
pub struct FnHost {
    pub matches: FxHashMap<BodyId, MatchFn>,
    pub equals: FxHashMap<BodyId, EqualsFn>,
    pub hashes: FxHashMap<BodyId, HashFn>,
    pub properties: FxHashMap<BodyId, PropertyFn>,
    pub calls: Cell<usize>,
}

impl FnHost {
    fn bump(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl Host for FnHost {
    fn call_match(&self, body: BodyId, subject: &Value, outs: &mut [Value]) -> EvalResult<bool> {
        self.bump();
        (self.matches[&body])(subject, outs)
    }

    fn call_equals(&self, body: BodyId, lhs: &Value, rhs: &Value) -> EvalResult<bool> {
        self.bump();
        (self.equals[&body])(lhs, rhs)
    }

    fn call_hash(&self, body: BodyId, value: &Value) -> EvalResult<u64> {
        self.bump();
        (self.hashes[&body])(value)
    }

    fn call_property(&self, body: BodyId, receiver: &Value) -> EvalResult<Value> {
        self.bump();
        (self.properties[&body])(receiver)
    }
}

/// Registry with `Point(x: int, y: int)` allocated but not yet declared.
pub fn registry_with_point_type() -> (RecordRegistry, TypeId) {
    let mut registry = RecordRegistry::new(SharedInterner::new());
    let point = registry.declare_record_type("Point", TypeId::OBJECT);
    (registry, point)
}

/// `Point(x: int, y: int)` declaration plus the given user members.
pub fn point_decl(registry: &RecordRegistry, ty: TypeId, members: Vec<UserMember>) -> RecordDecl {
    let interner = registry.interner();
    let mut decl = RecordDecl::new(
        interner.intern("Point"),
        ty,
        vec![
            PrimaryMember::new(interner.intern("x"), TypeId::INT, Span::new(13, 14)),
            PrimaryMember::new(interner.intern("y"), TypeId::INT, Span::new(21, 22)),
        ],
        Span::new(0, 30),
    );
    for member in members {
        decl = decl.with_member(member);
    }
    decl
}
