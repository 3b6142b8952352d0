//! Keyword deny-list.

use crate::error::PolicyError;

/// Keywords that block a statement wherever they appear.
pub const FORBIDDEN_KEYWORDS: &[&str] = &[
    "DROP", "DELETE", "TRUNCATE", "ALTER", "RENAME", "INSERT", "UPDATE", "REPLACE", "CREATE",
];

/// Rejects statements that are missing or that mention a forbidden keyword.
#[derive(Debug, Clone)]
pub struct KeywordGuard {
    keywords: &'static [&'static str],
}

impl KeywordGuard {
    pub fn new() -> Self {
        Self {
            keywords: FORBIDDEN_KEYWORDS,
        }
    }

    /// First forbidden keyword contained in `statement`, compared upper-cased.
    pub fn find_forbidden(&self, statement: &str) -> Option<&'static str> {
        let upper = statement.to_uppercase();
        self.keywords
            .iter()
            .copied()
            .find(|keyword| upper.contains(keyword))
    }

    /// Check a statement as received from the caller and hand it back if allowed.
    ///
    /// `None` and the empty string both count as a missing query.
    pub fn check<'a>(&self, statement: Option<&'a str>) -> Result<&'a str, PolicyError> {
        let statement = match statement {
            Some(s) if !s.is_empty() => s,
            _ => return Err(PolicyError::missing_query()),
        };

        if let Some(keyword) = self.find_forbidden(statement) {
            tracing::warn!(keyword, "Statement rejected by keyword deny-list");
            return Err(PolicyError::forbidden_keyword(keyword));
        }

        Ok(statement)
    }
}

impl Default for KeywordGuard {
    fn default() -> Self {
        Self::new()
    }
}
