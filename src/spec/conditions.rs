use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::spec::{LogicalOp, Value};

/// A single leaf comparison against one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Field the comparison applies to
    pub field: String,
    /// Free-form comparison token ("=", "!=", ">=", "LIKE", ...)
    pub op: String,
    /// Value to compare against
    pub value: Value,
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// A boolean combinator over child conditions.
///
/// Invariant: `conditions` is never empty. `Logical::new` enforces this at
/// construction; trees arriving through serde are checked by `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logical {
    /// AND / OR
    pub op: LogicalOp,
    /// Child conditions, in order; nesting depth is unbounded
    pub conditions: Vec<Condition>,
}

impl Logical {
    /// Create a logical node, rejecting an empty operand list.
    pub fn new(op: LogicalOp, conditions: Vec<Condition>) -> QueryResult<Self> {
        if conditions.is_empty() {
            return Err(QueryError::EmptyLogical);
        }
        Ok(Self { op, conditions })
    }

    /// Check the non-empty invariant at every depth of the tree.
    pub fn validate(&self) -> QueryResult<()> {
        if self.conditions.is_empty() {
            return Err(QueryError::EmptyLogical);
        }
        for condition in &self.conditions {
            condition.validate()?;
        }
        Ok(())
    }
}

/// A node in the filter tree: either a leaf comparison or a combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Logical(Logical),
    Filter(Filter),
}

impl Condition {
    /// Check the non-empty invariant on every logical node in the subtree.
    pub fn validate(&self) -> QueryResult<()> {
        match self {
            Condition::Filter(_) => Ok(()),
            Condition::Logical(logical) => logical.validate(),
        }
    }
}

impl std::fmt::Display for Condition {
    /// Inline rendering: a leaf is `field op value`; a combinator joins its
    /// children with its own operator and wraps the result in one pair of
    /// parentheses.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Filter(filter) => write!(f, "{}", filter),
            Condition::Logical(logical) => {
                let parts: Vec<String> =
                    logical.conditions.iter().map(|c| c.to_string()).collect();
                write!(f, "({})", parts.join(&format!(" {} ", logical.op)))
            }
        }
    }
}
