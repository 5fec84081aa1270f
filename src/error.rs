//! Error types for queryspec.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Specification names no target table.
    #[error("Specification has an empty table name")]
    EmptyTable,

    /// A logical node carried no operands; AND/OR over nothing has no rendering.
    #[error("Logical condition has no operands")]
    EmptyLogical,

    /// Aggregate function token outside the closed set.
    #[error("Invalid aggregate function: '{0}'. Expected: SUM, COUNT, AVG, MIN, or MAX")]
    InvalidAggregate(String),

    /// Sort direction token outside the closed set.
    #[error("Invalid sort direction: '{0}'. Expected: ASC or DESC")]
    InvalidDirection(String),

    /// Logical operator token outside the closed set.
    #[error("Invalid logical operator: '{0}'. Expected: AND or OR")]
    InvalidLogicalOp(String),

    /// `render` was called before a successful `build`.
    #[error("No query has been built yet; call build() before render()")]
    NotBuilt,

    /// Aliasing mode is on and the registry has no entry for the table.
    #[error("Table '{0}' not found in registry")]
    TableNotFound(String),
}

impl QueryError {
    /// Create a registry-miss error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Self::TableNotFound(name.into())
    }
}

/// Result type alias for queryspec operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::InvalidAggregate("MEDIAN".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid aggregate function: 'MEDIAN'. Expected: SUM, COUNT, AVG, MIN, or MAX"
        );
    }

    #[test]
    fn test_table_not_found_helper() {
        let err = QueryError::table_not_found("orders");
        assert_eq!(err.to_string(), "Table 'orders' not found in registry");
    }
}
