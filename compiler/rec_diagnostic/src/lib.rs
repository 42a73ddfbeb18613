//! Rec Diagnostic - error codes and reportable diagnostics.
//!
//! Declaration errors (E2xxx), pattern errors (E3xxx) and run-time faults
//! (E6xxx) all convert into a `Diagnostic` naming the record or pattern
//! they concern, with labeled spans and optional notes and help.

mod diagnostic;
mod error_code;

pub use diagnostic::{Context, Diagnostic, Label};
pub use error_code::ErrorCode;
