//! Rec Synth - compiler-synthesized record members.
//!
//! Given a `RecordDecl`, this crate computes, once per record type:
//! - the effective member table (synthesized read-only accessors unless the
//!   user declares a member of the same name)
//! - the effective equality and hash (element-wise over primary members in
//!   declared order, unless the user overrides `equals` and `hash`)
//! - the effective `Match` operators (a positional deconstructor unless the
//!   user declares any `Match` operator)
//!
//! # Override by presence
//!
//! Every synthesized artifact is a tagged variant, `Synthesized` or
//! `UserProvided`, decided at declaration time and cached in the
//! `RecordRegistry`. Nothing is looked up by name at run time except
//! member reads, which go through the cached table.

mod deconstruct;
mod equality;
mod errors;
mod members;
mod registry;

#[cfg(test)]
mod test_helpers;

pub use deconstruct::{synthesize_match, MatchOperator, OperatorOrigin};
pub use equality::{synthesize_equality, RecordEquality, HASH_MULTIPLIER, HASH_SEED};
pub use errors::SynthError;
pub use members::{synthesize, EffectiveMember, EffectiveMembers, SynthesizedKind};
pub use registry::{RecordInfo, RecordRegistry};
