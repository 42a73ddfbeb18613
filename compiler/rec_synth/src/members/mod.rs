//! Member synthesis.
//!
//! For every primary member not shadowed by a same-named user member, a
//! read-only accessor is synthesized. User members are taken verbatim and
//! win every name collision, for that name only.

use rustc_hash::FxHashMap;

use rec_ir::{Name, PrimaryMember, RecordDecl, StringInterner, TypeId, UserMember};

use crate::SynthError;

/// What a synthesized member does.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SynthesizedKind {
    /// Read-only accessor returning the constructor-time input.
    Accessor,
}

/// The member actually exposed under a name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EffectiveMember {
    Synthesized {
        kind: SynthesizedKind,
        /// Position of the source primary member.
        position: usize,
        ty: TypeId,
    },
    /// First user declaration with this name. Further declarations with the
    /// same name are overloads; only `Match` operators use them.
    UserProvided(UserMember),
}

impl EffectiveMember {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, EffectiveMember::Synthesized { .. })
    }
}

/// Effective member table of one record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EffectiveMembers {
    by_name: FxHashMap<Name, EffectiveMember>,
    /// Primary members in declared order.
    primary: Vec<PrimaryMember>,
}

impl EffectiveMembers {
    pub fn get(&self, name: Name) -> Option<&EffectiveMember> {
        self.by_name.get(&name)
    }

    /// Primary members in declared order.
    pub fn primary(&self) -> &[PrimaryMember] {
        &self.primary
    }

    /// Position of a primary member, whether or not its accessor was
    /// suppressed.
    pub fn primary_position(&self, name: Name) -> Option<usize> {
        self.primary.iter().position(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Name, &EffectiveMember)> + '_ {
        self.by_name.iter().map(|(&name, member)| (name, member))
    }
}

/// Compute the effective member table of a record.
///
/// Fails on duplicate or mutable primary members.
#[tracing::instrument(level = "debug", skip_all, fields(record = ?decl.name, primary = decl.primary.len()))]
pub fn synthesize(
    decl: &RecordDecl,
    interner: &StringInterner,
) -> Result<EffectiveMembers, SynthError> {
    let record = || interner.lookup(decl.name).to_string();

    let mut seen: FxHashMap<Name, &PrimaryMember> = FxHashMap::default();
    for member in &decl.primary {
        if let Some(first) = seen.insert(member.name, member) {
            return Err(SynthError::DuplicatePrimaryMember {
                record: record(),
                member: interner.lookup(member.name).to_string(),
                first: first.span,
                second: member.span,
            });
        }
        if member.mutable {
            return Err(SynthError::MutablePrimaryMember {
                record: record(),
                member: interner.lookup(member.name).to_string(),
                span: member.span,
            });
        }
    }

    let mut by_name = FxHashMap::default();
    for user in &decl.members {
        by_name.entry(user.name).or_insert_with(|| EffectiveMember::UserProvided(user.clone()));
    }

    for (position, member) in decl.primary.iter().enumerate() {
        if by_name.contains_key(&member.name) {
            tracing::debug!(
                member = interner.lookup(member.name),
                "user member suppresses synthesized accessor"
            );
            continue;
        }
        by_name.insert(
            member.name,
            EffectiveMember::Synthesized {
                kind: SynthesizedKind::Accessor,
                position,
                ty: member.ty,
            },
        );
    }

    Ok(EffectiveMembers {
        by_name,
        primary: decl.primary.clone(),
    })
}
