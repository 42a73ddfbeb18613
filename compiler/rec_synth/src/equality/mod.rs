//! Equality and hash synthesis.
//!
//! Synthesized equality is the conjunction, in declared order, of member
//! equality, stopping at the first mismatch. The synthesized hash folds
//! member hashes into a fixed seed in declared order, so it is stable across
//! compilations as long as the declared order is.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use rec_ir::{BodyId, Name, RecordDecl, StringInterner};
use rec_value::{EvalResult, Host, Value};

use crate::registry::missing_body;
use crate::{EffectiveMembers, RecordRegistry};

/// Seed of every synthesized record hash.
pub const HASH_SEED: u64 = 0x5245_434f_5244_5f31;

/// Multiplier applied after each member is folded in.
pub const HASH_MULTIPLIER: u64 = 0x517c_c1b7_2722_0a95;

/// Effective equality of a record type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RecordEquality {
    /// Element-wise over these primary members, in declared order.
    Synthesized { members: Vec<Name> },
    /// User overrides. `None` for a half the user did not declare, or
    /// declared without a body.
    UserProvided {
        equals: Option<BodyId>,
        hash: Option<BodyId>,
    },
}

impl RecordEquality {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, RecordEquality::Synthesized { .. })
    }
}

/// Decide the effective equality of a record.
///
/// Declaring either `equals` or `hash` suppresses synthesis of both. A half
/// the user left out has no body, and calling it is a `MissingBody` fault.
pub fn synthesize_equality(
    decl: &RecordDecl,
    members: &EffectiveMembers,
    interner: &StringInterner,
) -> RecordEquality {
    let wk = interner.well_known();
    let equals = decl.user_members_named(wk.equals).next();
    let hash = decl.user_members_named(wk.hash).next();

    if equals.is_none() && hash.is_none() {
        return RecordEquality::Synthesized {
            members: members.primary().iter().map(|m| m.name).collect(),
        };
    }
    if equals.is_none() || hash.is_none() {
        tracing::debug!(
            record = interner.lookup(decl.name),
            has_equals = equals.is_some(),
            has_hash = hash.is_some(),
            "partial equality override"
        );
    } else {
        tracing::debug!(record = ?decl.name, "user equality suppresses synthesis");
    }
    RecordEquality::UserProvided {
        equals: equals.and_then(|m| m.body),
        hash: hash.and_then(|m| m.body),
    }
}

/// Fold one member hash into the running accumulator.
#[inline]
fn combine(acc: u64, member: u64) -> u64 {
    (acc.rotate_left(5) ^ member).wrapping_mul(HASH_MULTIPLIER)
}

fn leaf_hash(value: &Value) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

impl RecordRegistry {
    /// Structural equality as seen by user code.
    ///
    /// Records of different types are never equal and user code is not
    /// consulted for them. Records of the same type use their effective
    /// equality. Everything else compares by value.
    pub fn equals(&self, lhs: &Value, rhs: &Value, host: &dyn Host) -> EvalResult<bool> {
        let (Value::Record(l), Value::Record(r)) = (lhs, rhs) else {
            return Ok(lhs == rhs);
        };
        if l.ty != r.ty {
            return Ok(false);
        }
        let Some(info) = self.info(l.ty) else {
            return Ok(l == r);
        };

        match &info.equality {
            RecordEquality::Synthesized { members } => {
                for &name in members {
                    let lv = self.read_member(lhs, name, host)?;
                    let rv = self.read_member(rhs, name, host)?;
                    if !self.equals(&lv, &rv, host)? {
                        tracing::trace!(member = ?name, "synthesized equals short-circuited");
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            RecordEquality::UserProvided { equals, .. } => {
                let body = equals.ok_or_else(|| missing_body("equals"))?;
                host.call_equals(body, lhs, rhs)
            }
        }
    }

    /// Hash consistent with `equals`.
    pub fn hash(&self, value: &Value, host: &dyn Host) -> EvalResult<u64> {
        let Value::Record(record) = value else {
            return Ok(leaf_hash(value));
        };
        let Some(info) = self.info(record.ty) else {
            return Ok(leaf_hash(value));
        };

        match &info.equality {
            RecordEquality::Synthesized { members } => {
                let mut acc = HASH_SEED;
                for &name in members {
                    let member = self.read_member(value, name, host)?;
                    acc = combine(acc, self.hash(&member, host)?);
                }
                Ok(acc)
            }
            RecordEquality::UserProvided { hash, .. } => {
                let body = hash.ok_or_else(|| missing_body("hash"))?;
                host.call_hash(body, value)
            }
        }
    }
}
