//! Free-function constructors for building condition trees in code.

use crate::error::QueryResult;
use crate::spec::{Condition, Filter, Logical, LogicalOp, Value};

/// Create a leaf condition with a free-form comparison token.
pub fn filter(field: &str, op: &str, value: impl Into<Value>) -> Condition {
    Condition::Filter(Filter {
        field: field.to_string(),
        op: op.to_string(),
        value: value.into(),
    })
}

/// Create an equality condition (field = value)
pub fn eq(field: &str, value: impl Into<Value>) -> Condition {
    filter(field, "=", value)
}

/// Create a not-equal condition (field != value)
pub fn ne(field: &str, value: impl Into<Value>) -> Condition {
    filter(field, "!=", value)
}

/// Create a greater-than condition (field > value)
pub fn gt(field: &str, value: impl Into<Value>) -> Condition {
    filter(field, ">", value)
}

/// Create a greater-than-or-equal condition (field >= value)
pub fn gte(field: &str, value: impl Into<Value>) -> Condition {
    filter(field, ">=", value)
}

/// Create a less-than condition (field < value)
pub fn lt(field: &str, value: impl Into<Value>) -> Condition {
    filter(field, "<", value)
}

/// Create a less-than-or-equal condition (field <= value)
pub fn lte(field: &str, value: impl Into<Value>) -> Condition {
    filter(field, "<=", value)
}

/// Combine conditions under AND; fails on an empty list.
pub fn all_of(conditions: impl IntoIterator<Item = Condition>) -> QueryResult<Condition> {
    let conds: Vec<Condition> = conditions.into_iter().collect();
    Ok(Condition::Logical(Logical::new(LogicalOp::And, conds)?))
}

/// Combine conditions under OR; fails on an empty list.
pub fn any_of(conditions: impl IntoIterator<Item = Condition>) -> QueryResult<Condition> {
    let conds: Vec<Condition> = conditions.into_iter().collect();
    Ok(Condition::Logical(Logical::new(LogicalOp::Or, conds)?))
}
