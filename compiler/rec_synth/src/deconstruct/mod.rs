//! Deconstructor (`Match` operator) synthesis.
//!
//! The synthesized operator has the shape
//! `Match(self: R, out m_1: T_1, ..., out m_n: T_n) -> bool`: it always
//! succeeds and writes each output from the primary member at the same
//! position. Any user-declared `Match` operator suppresses it.

use rec_ir::{BodyId, Name, RecordDecl, Span, StringInterner, TypeId, UserMember, UserMemberKind};
use rec_value::{EvalResult, Host, Value};

use crate::registry::missing_body;
use crate::{EffectiveMembers, RecordRegistry};

/// Where an operator's behavior comes from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum OperatorOrigin {
    /// Reads these primary members, in declared order, into the outputs.
    Synthesized { members: Vec<Name> },
    /// Runs a user body through the host.
    UserProvided { body: Option<BodyId> },
}

/// A resolved `Match` operator signature plus its implementation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MatchOperator {
    /// Type the operator is declared on; named by `Owner(...)` patterns.
    pub owner: TypeId,
    /// First parameter type. The subject is narrowed to it before the call.
    pub subject: TypeId,
    /// Out-parameter types, in order.
    pub outputs: Vec<TypeId>,
    pub origin: OperatorOrigin,
    pub span: Span,
}

impl MatchOperator {
    /// Build an operator from a user `Match` member; `None` for other kinds.
    pub fn from_user(owner: TypeId, member: &UserMember) -> Option<Self> {
        let UserMemberKind::MatchOperator { subject, outputs } = &member.kind else {
            return None;
        };
        Some(MatchOperator {
            owner,
            subject: *subject,
            outputs: outputs.clone(),
            origin: OperatorOrigin::UserProvided { body: member.body },
            span: member.span,
        })
    }

    pub fn arity(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, OperatorOrigin::Synthesized { .. })
    }

    /// Call the operator on an already-narrowed subject.
    ///
    /// Returns the operator's flag and every output slot as written. Callers
    /// must not observe the slots when the flag is false.
    pub fn invoke(
        &self,
        registry: &RecordRegistry,
        subject: &Value,
        host: &dyn Host,
    ) -> EvalResult<(bool, Vec<Value>)> {
        match &self.origin {
            OperatorOrigin::Synthesized { members } => {
                let outs = members
                    .iter()
                    .map(|&name| registry.read_member(subject, name, host))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok((true, outs))
            }
            OperatorOrigin::UserProvided { body } => {
                let body = body.ok_or_else(|| missing_body("Match"))?;
                let mut outs: Vec<Value> =
                    self.outputs.iter().copied().map(Value::default_for).collect();
                let matched = host.call_match(body, subject, &mut outs)?;
                Ok((matched, outs))
            }
        }
    }
}

/// Decide the effective `Match` operators of a record.
///
/// Returns the user's operators in declaration order when there are any,
/// otherwise the single synthesized positional deconstructor.
pub fn synthesize_match(
    decl: &RecordDecl,
    members: &EffectiveMembers,
    interner: &StringInterner,
) -> Vec<MatchOperator> {
    let user: Vec<MatchOperator> = decl
        .members
        .iter()
        .filter_map(|m| MatchOperator::from_user(decl.ty, m))
        .collect();

    if !user.is_empty() {
        tracing::debug!(
            record = interner.lookup(decl.name),
            overloads = user.len(),
            "user Match operator suppresses synthesis"
        );
        return user;
    }

    vec![MatchOperator {
        owner: decl.ty,
        subject: decl.ty,
        outputs: members.primary().iter().map(|m| m.ty).collect(),
        origin: OperatorOrigin::Synthesized {
            members: members.primary().iter().map(|m| m.name).collect(),
        },
        span: decl.span,
    }]
}
