//! Error codes for all diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the phase.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E2xxx: Record declaration / synthesis errors
/// - E3xxx: Pattern resolution errors
/// - E6xxx: Runtime / eval errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Declaration Errors (E2xxx)
    /// Two primary members share a name
    E2001,
    /// Primary member declared mutable
    E2002,
    /// Type is not a declared record
    E2003,
    /// Record declared twice
    E2004,

    // Pattern Errors (E3xxx)
    /// No applicable `Match` operator
    E3001,
    /// Ambiguous `Match` operator
    E3002,
    /// Pattern variable bound twice
    E3003,
    /// Pattern argument count does not match operator outputs
    E3004,
    /// Pattern type incompatible with subject or output type
    E3005,
    /// Pattern nesting too deep
    E3006,

    // Runtime Errors (E6xxx)
    /// Wrong number of constructor arguments
    E6001,
    /// Constructor argument of the wrong type
    E6002,
    /// Unknown member
    E6003,
    /// Fault raised by a user-written body
    E6004,
    /// Value is not a record
    E6005,
    /// Nested plan evaluated without its parent
    E6006,
}

impl ErrorCode {
    /// All error codes, for documentation lookups.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
        }
    }

    /// Short description used by `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "duplicate primary member",
            ErrorCode::E2002 => "mutable primary member",
            ErrorCode::E2003 => "not a record type",
            ErrorCode::E2004 => "record declared twice",
            ErrorCode::E3001 => "no applicable Match operator",
            ErrorCode::E3002 => "ambiguous Match operator",
            ErrorCode::E3003 => "duplicate pattern binding",
            ErrorCode::E3004 => "pattern arity mismatch",
            ErrorCode::E3005 => "pattern type mismatch",
            ErrorCode::E3006 => "pattern nesting too deep",
            ErrorCode::E6001 => "constructor arity mismatch",
            ErrorCode::E6002 => "constructor argument type mismatch",
            ErrorCode::E6003 => "unknown member",
            ErrorCode::E6004 => "fault in user-written body",
            ErrorCode::E6005 => "value is not a record",
            ErrorCode::E6006 => "nested plan evaluated as a match site",
        }
    }

    /// Check if this is a compile-time (declaration or pattern) error.
    pub fn is_compile_time(&self) -> bool {
        self.as_str().starts_with("E2") || self.as_str().starts_with("E3")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
