//! Rec Value - runtime side of record matching.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `RecordValue`)
//! - Evaluation error types (`EvalError`, `EvalErrorKind`, `EvalResult`)
//! - The `Host` trait through which the surrounding compiler evaluates
//!   subject expressions and runs user-written member bodies
//!
//! # Value Types
//!
//! Record fields are stored in primary-member order behind an `Arc`, so
//! cloning a record (for example into a binding) never copies its fields.

mod errors;
mod host;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use host::{Host, NoHost};
pub use value::{RecordValue, Value};
