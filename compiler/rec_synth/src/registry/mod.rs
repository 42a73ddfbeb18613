//! Per-type cache of synthesized record artifacts.
//!
//! Records are declared once; every later question (which member answers a
//! name, which equality applies, which `Match` operators exist) is answered
//! from the cached `RecordInfo` without re-running synthesis.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use rec_ir::{Name, RecordDecl, SharedInterner, StringInterner, TypeId, TypePool, UserMember};
use rec_value::{EvalError, EvalErrorKind, EvalResult, Host, RecordValue, Value};

use crate::{
    synthesize, synthesize_equality, synthesize_match, EffectiveMember, EffectiveMembers,
    MatchOperator, RecordEquality, SynthError,
};

/// Everything synthesized for one record type.
#[derive(Clone, Debug)]
pub struct RecordInfo {
    pub decl: RecordDecl,
    pub members: EffectiveMembers,
    pub equality: RecordEquality,
    /// Effective `Match` operators declared on this record.
    pub operators: Vec<Arc<MatchOperator>>,
}

/// Registry of declared records and the types they can be matched against.
///
/// Owns the `TypePool`. After declaration processing the registry is only
/// read, and can be shared freely across threads.
#[derive(Clone, Debug)]
pub struct RecordRegistry {
    pool: TypePool,
    interner: SharedInterner,
    records: FxHashMap<TypeId, Arc<RecordInfo>>,
    /// `Match` operators declared on non-record types.
    extra_operators: FxHashMap<TypeId, Vec<Arc<MatchOperator>>>,
}

impl RecordRegistry {
    pub fn new(interner: SharedInterner) -> Self {
        Self::with_pool(TypePool::new(), interner)
    }

    pub fn with_pool(pool: TypePool, interner: SharedInterner) -> Self {
        RecordRegistry {
            pool,
            interner,
            records: FxHashMap::default(),
            extra_operators: FxHashMap::default(),
        }
    }

    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Allocate a record type. Its members are supplied later via `declare`.
    pub fn declare_record_type(&mut self, name: &str, base: TypeId) -> TypeId {
        let name = self.interner.intern(name);
        self.pool.declare_record(name, base)
    }

    /// Allocate a non-record nominal type.
    pub fn declare_class_type(&mut self, name: &str, base: TypeId) -> TypeId {
        let name = self.interner.intern(name);
        self.pool.declare_class(name, base)
    }

    /// Run member, equality and deconstructor synthesis for a record and
    /// cache the result.
    #[tracing::instrument(level = "debug", skip_all, fields(record = ?decl.name))]
    pub fn declare(&mut self, decl: RecordDecl) -> Result<Arc<RecordInfo>, SynthError> {
        if !self.pool.is_record(decl.ty) {
            return Err(SynthError::NotARecord {
                name: self.type_name(decl.ty),
                span: decl.span,
            });
        }
        if self.records.contains_key(&decl.ty) {
            return Err(SynthError::AlreadyDeclared {
                record: self.type_name(decl.ty),
                span: decl.span,
            });
        }

        let members = synthesize(&decl, &self.interner)?;
        let equality = synthesize_equality(&decl, &members, &self.interner);
        let operators = synthesize_match(&decl, &members, &self.interner)
            .into_iter()
            .map(Arc::new)
            .collect();

        let info = Arc::new(RecordInfo {
            decl,
            members,
            equality,
            operators,
        });
        self.records.insert(info.decl.ty, Arc::clone(&info));
        tracing::debug!(
            members = info.members.len(),
            synthesized_equality = info.equality.is_synthesized(),
            "record declared"
        );
        Ok(info)
    }

    /// Register user `Match` operators declared on a non-record type.
    ///
    /// Members of other kinds are ignored. Returns how many were added.
    pub fn add_match_operators(&mut self, owner: TypeId, members: &[UserMember]) -> usize {
        let ops: Vec<_> = members
            .iter()
            .filter_map(|m| MatchOperator::from_user(owner, m))
            .map(Arc::new)
            .collect();
        let added = ops.len();
        self.extra_operators.entry(owner).or_default().extend(ops);
        added
    }

    /// Cached synthesis result for a record type.
    pub fn info(&self, ty: TypeId) -> Option<&RecordInfo> {
        self.records.get(&ty).map(AsRef::as_ref)
    }

    /// Every effective `Match` operator a `Ty(...)` pattern may select.
    pub fn match_operators(&self, ty: TypeId) -> impl Iterator<Item = &Arc<MatchOperator>> + '_ {
        let own = self.records.get(&ty).map(|info| info.operators.iter());
        let extra = self.extra_operators.get(&ty).map(|ops| ops.iter());
        own.into_iter().flatten().chain(extra.into_iter().flatten())
    }

    /// Build a record from constructor-time inputs in primary order.
    pub fn construct(&self, ty: TypeId, args: Vec<Value>) -> EvalResult<Value> {
        let Some(info) = self.info(ty) else {
            return Err(EvalErrorKind::NotARecord {
                found: self.type_name(ty),
            }
            .into());
        };
        let primary = info.members.primary();
        if primary.len() != args.len() {
            return Err(EvalErrorKind::ConstructorArity {
                record: self.type_name(ty),
                expected: primary.len(),
                found: args.len(),
            }
            .into());
        }

        for (member, arg) in primary.iter().zip(&args) {
            let fits = match arg.runtime_type() {
                None => self.pool.is_nullable(member.ty),
                Some(actual) => self.pool.is_subtype(actual, member.ty),
            };
            if !fits {
                return Err(EvalErrorKind::ConstructorType {
                    member: self.interner.lookup(member.name).to_string(),
                    expected: self.type_name(member.ty),
                    found: arg
                        .runtime_type()
                        .map_or_else(|| "null".to_string(), |t| self.type_name(t)),
                }
                .into());
            }
        }

        Ok(Value::Record(RecordValue::new(ty, args)))
    }

    /// Read an effective member of a record value.
    ///
    /// Synthesized accessors return the stored constructor input. User
    /// properties run their getter through the host. A user member of
    /// another kind that shadows a primary member still leaves the stored
    /// value readable.
    pub fn read_member(&self, value: &Value, name: Name, host: &dyn Host) -> EvalResult<Value> {
        let Value::Record(record) = value else {
            return Err(EvalErrorKind::NotARecord {
                found: value
                    .runtime_type()
                    .map_or_else(|| "null".to_string(), |t| self.type_name(t)),
            }
            .into());
        };
        let unknown = || -> EvalError {
            EvalErrorKind::UnknownMember {
                record: self.type_name(record.ty),
                member: self.interner.lookup(name).to_string(),
            }
            .into()
        };
        let info = self.info(record.ty).ok_or_else(unknown)?;
        let stored = |position: usize| record.field(position).cloned().ok_or_else(unknown);

        match info.members.get(name).ok_or_else(unknown)? {
            EffectiveMember::Synthesized { position, .. } => stored(*position),
            EffectiveMember::UserProvided(user) => match (&user.kind, user.body) {
                (rec_ir::UserMemberKind::Property { .. }, Some(body)) => {
                    host.call_property(body, value)
                }
                _ => match info.members.primary_position(name) {
                    Some(position) => stored(position),
                    None => Err(missing_body(self.interner.lookup(name))),
                },
            },
        }
    }

    /// Render a type name for messages.
    pub fn type_name(&self, ty: TypeId) -> String {
        self.pool.display(ty, &self.interner)
    }
}

pub(crate) fn missing_body(member: &str) -> EvalError {
    EvalErrorKind::MissingBody {
        member: member.to_string(),
    }
    .into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
