//! Rec Match - structural `matches` expressions.
//!
//! `expr matches Type(p1, ..., pn)` is handled in two phases:
//!
//! 1. **Resolution** (compile time): `Resolver::resolve` picks the one
//!    applicable `Match` operator through an `OverloadOracle`, records the
//!    dynamic type test the subject needs, and recurses into nested
//!    patterns. The result is an immutable `MatchPlan`.
//! 2. **Evaluation** (run time): `evaluate` walks the plan against a value.
//!    The type test always runs first; a subject that fails it (including
//!    null) never reaches the operator. An operator returning `false`
//!    exposes none of its outputs, and any nested failure fails the whole
//!    match.
//!
//! Plans hold no mutable state and can be evaluated concurrently.

mod errors;
mod eval;
mod oracle;
mod plan;
mod resolve;
mod stack;

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod test_helpers;

use std::sync::Once;

pub use errors::ResolveError;
pub use eval::{evaluate, evaluate_site, Bindings, MatchResult};
pub use oracle::{ArgShape, OracleResult, OverloadOracle};
pub use plan::{MatchPlan, SubPattern, SubjectRef, TypeTest};
pub use resolve::{Resolver, ResolverConfig, Subject};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=rec_match=debug` or
/// `RUST_LOG=rec_synth=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
