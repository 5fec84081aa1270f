use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::spec::{AggregateFunc, Logical, SortDirection};

/// A projected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// Column name, emitted verbatim
    pub field: String,
    /// Accepted by the model but not emitted by the renderer; the output
    /// format for select aliases is still an open product decision.
    #[serde(default)]
    pub alias: Option<String>,
}

/// An aggregate projection: `FUNC(field)`, optionally aliased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Aggregate function, closed set
    pub func: AggregateFunc,
    /// Column the function applies to
    pub field: String,
    /// Optional `AS alias`
    #[serde(default)]
    pub alias: Option<String>,
}

/// A single ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// The full, immutable description of one query's intent.
///
/// Built fluently in code or deserialized from JSON; either way the tree is
/// read-only once handed to the builder. `validate` checks the structural
/// invariants that the type system alone cannot express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuerySpec {
    /// Target table name (or registry alias when aliasing mode is on)
    pub table: String,
    /// Projected columns, order-significant
    #[serde(default)]
    pub select: Vec<SelectColumn>,
    /// Aggregate projections, order-significant
    #[serde(default)]
    pub aggregates: Vec<Aggregate>,
    /// Root of the WHERE tree
    #[serde(default, rename = "where")]
    pub where_: Option<Logical>,
    /// Root of the HAVING tree
    #[serde(default)]
    pub having: Option<Logical>,
    /// Explicit GROUP BY fields, order-significant
    #[serde(default)]
    pub group_bys: Vec<String>,
    /// ORDER BY entries, order-significant
    #[serde(default)]
    pub order_bys: Vec<OrderBy>,
    /// Row limit
    #[serde(default)]
    pub limit: Option<u64>,
    /// Row offset
    #[serde(default)]
    pub offset: Option<u64>,
}

impl QuerySpec {
    /// Start a spec for the given table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Project a plain column.
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.select.push(SelectColumn {
            field: field.into(),
            alias: None,
        });
        self
    }

    /// Project a column with an alias (accepted, currently not rendered).
    pub fn select_as(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.select.push(SelectColumn {
            field: field.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Add an aggregate projection.
    pub fn aggregate(mut self, func: AggregateFunc, field: impl Into<String>) -> Self {
        self.aggregates.push(Aggregate {
            func,
            field: field.into(),
            alias: None,
        });
        self
    }

    /// Add an aliased aggregate projection.
    pub fn aggregate_as(
        mut self,
        func: AggregateFunc,
        field: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.aggregates.push(Aggregate {
            func,
            field: field.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Set the WHERE tree.
    pub fn filter(mut self, root: Logical) -> Self {
        self.where_ = Some(root);
        self
    }

    /// Set the HAVING tree.
    pub fn having(mut self, root: Logical) -> Self {
        self.having = Some(root);
        self
    }

    /// Add an explicit GROUP BY field.
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_bys.push(field.into());
        self
    }

    /// Add an ORDER BY entry.
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_bys.push(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Set the row limit.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set the row offset.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Check structural invariants: a named table and no empty logical node
    /// at any depth of the WHERE/HAVING trees. Field existence and typing
    /// are the schema registry's concern, not this model's.
    pub fn validate(&self) -> QueryResult<()> {
        if self.table.trim().is_empty() {
            return Err(QueryError::EmptyTable);
        }
        if let Some(tree) = &self.where_ {
            tree.validate()?;
        }
        if let Some(tree) = &self.having {
            tree.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::builders::{eq, gte};
    use crate::spec::{Condition, LogicalOp};

    #[test]
    fn test_fluent_construction() {
        let spec = QuerySpec::new("orders")
            .select("region")
            .aggregate_as(AggregateFunc::Sum, "amount", "total")
            .order_by("region", SortDirection::Asc)
            .limit(10);

        assert_eq!(spec.table, "orders");
        assert_eq!(spec.select.len(), 1);
        assert_eq!(spec.aggregates[0].alias.as_deref(), Some("total"));
        assert_eq!(spec.order_bys[0].direction, SortDirection::Asc);
        assert_eq!(spec.limit, Some(10));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        let spec = QuerySpec::new("  ");
        assert_eq!(spec.validate(), Err(QueryError::EmptyTable));
    }

    #[test]
    fn test_nested_empty_logical_rejected() {
        let mut spec = QuerySpec::new("orders");
        spec.where_ = Some(Logical {
            op: LogicalOp::And,
            conditions: vec![
                eq("a", 1),
                Condition::Logical(Logical {
                    op: LogicalOp::Or,
                    conditions: vec![],
                }),
            ],
        });
        assert_eq!(spec.validate(), Err(QueryError::EmptyLogical));
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{
            "table": "orders",
            "select": [{"field": "region"}, {"field": "channel", "alias": "ch"}],
            "aggregates": [{"func": "SUM", "field": "amount", "alias": "total"}],
            "where": {
                "op": "AND",
                "conditions": [{"field": "status", "op": "=", "value": "open"}]
            },
            "group_bys": ["region"],
            "order_bys": [{"field": "total", "direction": "DESC"}],
            "limit": 25,
            "offset": 50
        }"#;
        let spec: QuerySpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.table, "orders");
        assert_eq!(spec.select[1].alias.as_deref(), Some("ch"));
        assert_eq!(spec.aggregates[0].func, AggregateFunc::Sum);
        assert!(spec.where_.is_some());
        assert_eq!(spec.order_bys[0].direction, SortDirection::Desc);
        assert_eq!(spec.offset, Some(50));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_bad_aggregate_func_rejected_at_deserialization() {
        let json = r#"{
            "table": "orders",
            "aggregates": [{"func": "MEDIAN", "field": "amount"}]
        }"#;
        assert!(serde_json::from_str::<QuerySpec>(json).is_err());
    }

    #[test]
    fn test_having_tree_validated() {
        let spec = QuerySpec::new("orders")
            .select("region")
            .aggregate(AggregateFunc::Count, "id")
            .having(Logical::new(LogicalOp::And, vec![gte("COUNT(id)", 5)]).unwrap());
        assert!(spec.validate().is_ok());
    }
}
