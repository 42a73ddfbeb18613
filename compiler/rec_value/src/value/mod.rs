//! Runtime values.

use std::fmt;
use std::sync::Arc;

use rec_ir::TypeId;

/// A runtime value.
///
/// `PartialEq`/`Hash` here are representational (same variant, same
/// payload). Record equality as seen by user code goes through the
/// record's effective `equals`, which may be user-provided.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// The null reference. Never passes a type test.
    Null,
    Bool(bool),
    Int(i64),
    Str(Arc<str>),
    Record(RecordValue),
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Default value written into an out-parameter slot of type `ty`
    /// before a `Match` operator runs.
    pub fn default_for(ty: TypeId) -> Self {
        match ty {
            TypeId::INT => Value::Int(0),
            TypeId::BOOL => Value::Bool(false),
            _ => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Dynamic type of the value; `None` for null.
    pub fn runtime_type(&self) -> Option<TypeId> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeId::BOOL),
            Value::Int(_) => Some(TypeId::INT),
            Value::Str(_) => Some(TypeId::STR),
            Value::Record(r) => Some(r.ty),
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<RecordValue> for Value {
    fn from(r: RecordValue) -> Self {
        Value::Record(r)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Record(r) => {
                write!(f, "{:?}(", r.ty)?;
                for (i, field) in r.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Record instance: its type and its primary-member values in declared order.
///
/// Build through `RecordRegistry::construct` to get arity and type checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordValue {
    pub ty: TypeId,
    fields: Arc<[Value]>,
}

impl RecordValue {
    /// Create a record value without validation.
    pub fn new(ty: TypeId, fields: Vec<Value>) -> Self {
        RecordValue {
            ty,
            fields: fields.into(),
        }
    }

    /// Field at a primary-member position.
    pub fn field(&self, position: usize) -> Option<&Value> {
        self.fields.get(position)
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }
}
