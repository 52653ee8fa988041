//! Error types for the record store.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Absence is not an error: `get` misses return `None` and `delete` of a
/// missing key is a silent no-op. Neither variant is retried anywhere in
/// this crate; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The engine or its snapshot is unreachable or corrupt. Fatal to the
    /// call.
    #[error("storage engine unavailable: {0}")]
    Connection(String),

    /// Schema mismatch, or a duplicate primary key on a strict-insert path.
    #[error("storage constraint violated: {0}")]
    Constraint(String),
}

impl StoreError {
    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection(message.into())
    }

    /// Creates a constraint error.
    pub fn constraint(message: impl Into<String>) -> Self {
        StoreError::Constraint(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_category_and_detail() {
        let err = StoreError::connection("snapshot is corrupt");
        assert_eq!(
            err.to_string(),
            "storage engine unavailable: snapshot is corrupt"
        );

        let err = StoreError::constraint("duplicate primary key 'alice' in 'users'");
        assert!(err.to_string().contains("duplicate primary key"));
    }
}
