//! Record declarations.
//!
//! A `RecordDecl` is created once, when the host compiler finishes reading a
//! record's header and body, and is never mutated afterwards. The order of
//! `primary` is the canonical member order used by equality, hashing and
//! positional deconstruction.

use crate::{BodyId, Name, Span, TypeId};

/// A named, typed constructor parameter that becomes a read-only member.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PrimaryMember {
    pub name: Name,
    pub ty: TypeId,
    /// Declared with a mutability modifier. Rejected during synthesis.
    pub mutable: bool,
    pub span: Span,
}

impl PrimaryMember {
    /// Create a read-only primary member.
    pub fn new(name: Name, ty: TypeId, span: Span) -> Self {
        PrimaryMember {
            name,
            ty,
            mutable: false,
            span,
        }
    }

    /// Create a primary member declared as mutable.
    pub fn mutable(name: Name, ty: TypeId, span: Span) -> Self {
        PrimaryMember {
            name,
            ty,
            mutable: true,
            span,
        }
    }
}

/// Kind of a member written by the user in the record body.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum UserMemberKind {
    /// A property of the given type.
    Property { ty: TypeId },
    /// An ordinary method (including `equals` and `hash` overrides).
    Method,
    /// A `Match` operator: `(subject, out outputs...) -> bool`.
    MatchOperator { subject: TypeId, outputs: Vec<TypeId> },
}

/// A member declared explicitly in the record body.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UserMember {
    pub name: Name,
    pub kind: UserMemberKind,
    /// `None` for abstract or externally-provided members.
    pub body: Option<BodyId>,
    pub span: Span,
}

impl UserMember {
    pub fn property(name: Name, ty: TypeId, body: BodyId, span: Span) -> Self {
        UserMember {
            name,
            kind: UserMemberKind::Property { ty },
            body: Some(body),
            span,
        }
    }

    pub fn method(name: Name, body: BodyId, span: Span) -> Self {
        UserMember {
            name,
            kind: UserMemberKind::Method,
            body: Some(body),
            span,
        }
    }

    pub fn match_operator(
        name: Name,
        subject: TypeId,
        outputs: Vec<TypeId>,
        body: BodyId,
        span: Span,
    ) -> Self {
        UserMember {
            name,
            kind: UserMemberKind::MatchOperator { subject, outputs },
            body: Some(body),
            span,
        }
    }

    /// Check if this member is a `Match` operator.
    pub fn is_match_operator(&self) -> bool {
        matches!(self.kind, UserMemberKind::MatchOperator { .. })
    }
}

/// A record declaration: identity, primary members, and user members.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RecordDecl {
    pub name: Name,
    /// The record's type, as allocated in the `TypePool`.
    pub ty: TypeId,
    pub primary: Vec<PrimaryMember>,
    pub members: Vec<UserMember>,
    pub span: Span,
}

impl RecordDecl {
    pub fn new(name: Name, ty: TypeId, primary: Vec<PrimaryMember>, span: Span) -> Self {
        RecordDecl {
            name,
            ty,
            primary,
            members: Vec::new(),
            span,
        }
    }

    /// Add a user-declared member.
    #[must_use]
    pub fn with_member(mut self, member: UserMember) -> Self {
        self.members.push(member);
        self
    }

    /// Ordinal position of a primary member.
    pub fn position_of(&self, name: Name) -> Option<usize> {
        self.primary.iter().position(|m| m.name == name)
    }

    /// User members with the given name, in declaration order.
    pub fn user_members_named(&self, name: Name) -> impl Iterator<Item = &UserMember> + '_ {
        self.members.iter().filter(move |m| m.name == name)
    }
}
