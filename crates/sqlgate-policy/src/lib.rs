//! sqlgate policy enforcement.
//!
//! The gateway refuses any statement that mentions a destructive keyword.
//! The check upper-cases the statement and looks for plain substring
//! occurrences, so it also fires on keywords inside string literals,
//! identifiers and comments (`SELECT * FROM dropped_table` is rejected).
//! It is not a parser and is not meant to be one.

pub mod deny;
pub mod error;

pub use deny::{FORBIDDEN_KEYWORDS, KeywordGuard};
pub use error::{PolicyError, PolicyErrorKind};
