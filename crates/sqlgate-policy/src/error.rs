//! Policy rejection errors.

use std::fmt;

/// A statement rejected before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyError {
    pub kind: PolicyErrorKind,
    /// Human-readable message returned to the caller.
    pub message: String,
}

impl PolicyError {
    pub fn new(kind: PolicyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// No statement text was supplied.
    pub fn missing_query() -> Self {
        Self::new(PolicyErrorKind::MissingQuery, "'query' is required")
    }

    /// The statement contains a deny-listed keyword.
    ///
    /// The keyword itself is deliberately kept out of the message.
    pub fn forbidden_keyword(keyword: &'static str) -> Self {
        Self::new(
            PolicyErrorKind::ForbiddenKeyword { keyword },
            "Invalid SQL syntax: Query contains forbidden keywords",
        )
    }

    /// HTTP status the gateway answers with.
    pub fn status_code(&self) -> u16 {
        match self.kind {
            PolicyErrorKind::MissingQuery => 400,
            PolicyErrorKind::ForbiddenKeyword { .. } => 403,
        }
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PolicyError {}

/// Categories of policy rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyErrorKind {
    /// Request carried no statement.
    MissingQuery,
    /// Statement matched the deny-list.
    ForbiddenKeyword { keyword: &'static str },
}
