//! Advisory syntax validation run before statements are sent to the gateway.
//!
//! Only two things are checked: the input is terminated by `;`, and each
//! statement opens with a known SQL command. Nothing beyond the leading
//! keyword is inspected, and this never substitutes for the server-side
//! keyword deny-list.

use crate::statement::{DELIMITER, split};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Commands a statement may start with.
pub const ALLOWED_COMMANDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "WITH", "SHOW", "DESCRIBE",
    "EXPLAIN",
];

static LEADING_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)^({})\s+.+", ALLOWED_COMMANDS.join("|"));
    Regex::new(&pattern).expect("leading command pattern is valid")
});

/// A failed pre-flight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// Which rule rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The trimmed input does not end with `;`.
    MissingTerminator,
    /// A statement does not open with an allowed command.
    UnknownCommand,
}

impl ValidationError {
    pub fn missing_terminator() -> Self {
        Self {
            kind: ValidationErrorKind::MissingTerminator,
            message: "Invalid SQL syntax: Each SQL statement must end with a semicolon (;)"
                .to_string(),
        }
    }

    pub fn unknown_command(statement: &str) -> Self {
        Self {
            kind: ValidationErrorKind::UnknownCommand,
            message: format!(
                "Invalid SQL syntax: \"{}\". Query must start with a valid SQL command.",
                statement
            ),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate raw multi-statement input.
///
/// Stops at the first offending statement; later statements are not checked.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    if !raw.trim().ends_with(DELIMITER) {
        return Err(ValidationError::missing_terminator());
    }

    for statement in split(raw) {
        if !LEADING_COMMAND.is_match(&statement) {
            return Err(ValidationError::unknown_command(&statement));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_semicolon() {
        let err = validate("SELECT * FROM users").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingTerminator);
        assert_eq!(
            err.to_string(),
            "Invalid SQL syntax: Each SQL statement must end with a semicolon (;)"
        );
    }

    #[test]
    fn test_missing_semicolon_wins_over_bad_command() {
        let err = validate("garbage").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingTerminator);
    }

    #[test]
    fn test_trailing_whitespace_after_semicolon() {
        assert!(validate("SELECT 1;   \n").is_ok());
    }

    #[test]
    fn test_unknown_command() {
        let err = validate("INVALID query;").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownCommand);
        assert_eq!(
            err.message,
            "Invalid SQL syntax: \"INVALID query\". Query must start with a valid SQL command."
        );
    }

    #[test]
    fn test_reports_first_failing_statement_only() {
        let err = validate("SELECT 1; TEST * FROM a; NOPE b;").unwrap_err();
        assert_eq!(
            err.message,
            "Invalid SQL syntax: \"TEST * FROM a\". Query must start with a valid SQL command."
        );
    }

    #[test]
    fn test_multiple_valid_statements() {
        assert!(validate("SELECT * FROM users; DELETE FROM posts;").is_ok());
    }

    #[test]
    fn test_all_allowed_commands() {
        let queries = [
            "INSERT INTO users VALUES (1, \"test\");",
            "UPDATE users SET name = \"test\";",
            "CREATE TABLE users (id INT);",
            "DROP TABLE users;",
            "ALTER TABLE users ADD column;",
            "WITH cte AS (SELECT 1) SELECT * FROM cte;",
            "SHOW TABLES;",
            "DESCRIBE users;",
            "EXPLAIN SELECT * FROM users;",
            "select lower_case_is_fine;",
        ];

        for query in queries {
            assert!(validate(query).is_ok(), "expected {query} to validate");
        }
    }

    #[test]
    fn test_command_needs_following_content() {
        assert_eq!(
            validate("SELECT;").unwrap_err().kind,
            ValidationErrorKind::UnknownCommand
        );
        assert_eq!(
            validate("SELECTX 1;").unwrap_err().kind,
            ValidationErrorKind::UnknownCommand
        );
    }

    #[test]
    fn test_delimiter_only_input_is_valid() {
        // Nothing to check once the terminator rule passes.
        assert!(validate(";").is_ok());
    }
}
