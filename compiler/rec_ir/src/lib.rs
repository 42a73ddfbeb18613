//! Rec IR - shared data structures for record synthesis and structural matching.
//!
//! This crate contains:
//! - Interned names (`Name`, `StringInterner`)
//! - Source spans and opaque handles into the host compiler (`ExprId`, `BodyId`)
//! - The nominal type table (`TypeId`, `TypePool`)
//! - Record declarations (`RecordDecl`, `PrimaryMember`, `UserMember`)
//! - Pattern trees for `matches` expressions (`MatchPattern`)
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings -> `Name(u32)`, Types -> `TypeId(u32)`
//! - **Opaque host handles**: expression and member bodies belong to the
//!   surrounding compiler and are referenced only by `ExprId`/`BodyId`
//! - Declarations are immutable once built; member order is significant

mod decl;
mod ids;
mod interner;
mod name;
mod pattern;
mod span;
mod types;

pub use decl::{PrimaryMember, RecordDecl, UserMember, UserMemberKind};
pub use ids::{BodyId, ExprId};
pub use interner::{SharedInterner, StringInterner, WellKnownNames};
pub use name::Name;
pub use pattern::MatchPattern;
pub use span::Span;
pub use types::{TypeId, TypeKind, TypePool};
