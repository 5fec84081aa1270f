//! Specification flattening and SQL text rendering.
//!
//! A `QuerySpec` is flattened into the intermediate [`Query`] record, one
//! rendered string fragment per output clause entry, then serialized into a
//! single multi-line SQL block. Filter values are interpolated via their
//! canonical textual form; parameterization is the execution layer's job.

use std::collections::HashSet;

use crate::error::{QueryError, QueryResult};
use crate::registry::TableRegistry;
use crate::spec::{Aggregate, Logical, OrderBy, QuerySpec, SelectColumn};

/// Trait for rendering an intermediate form to SQL text.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

/// Flat intermediate form of one query.
///
/// Every field holds already-rendered fragments in output order; the
/// renderer only assembles them. One instance exists per `build` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Target table
    pub table: String,
    /// Plain projection columns
    pub columns: Vec<String>,
    /// Rendered aggregate expressions (`FUNC(field)[ AS alias]`)
    pub aggregates: Vec<String>,
    /// Top-level WHERE fragments, each carrying its leading operator token
    pub wheres: Vec<String>,
    /// Top-level HAVING fragments, same shape as `wheres`
    pub havings: Vec<String>,
    /// GROUP BY fields after the explicit/implicit merge
    pub group_bys: Vec<String>,
    /// Rendered `field DIRECTION` entries
    pub order_bys: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ToSql for Query {
    /// Assemble the clause sections in fixed order, skipping any section
    /// whose underlying list is empty.
    fn to_sql(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        let projections: Vec<&String> = self.columns.iter().chain(&self.aggregates).collect();
        if !projections.is_empty() {
            lines.push("SELECT".to_string());
            push_comma_separated(&mut lines, &projections);
        }

        lines.push(format!("FROM {}", self.table));

        if !self.wheres.is_empty() {
            lines.push("WHERE 1=1".to_string());
            for fragment in &self.wheres {
                lines.push(format!("    {}", fragment));
            }
        }

        if !self.group_bys.is_empty() {
            lines.push("GROUP BY".to_string());
            push_comma_separated(&mut lines, &self.group_bys.iter().collect::<Vec<_>>());
        }

        if !self.havings.is_empty() {
            lines.push("HAVING 1=1".to_string());
            for fragment in &self.havings {
                lines.push(format!("    {}", fragment));
            }
        }

        if !self.order_bys.is_empty() {
            lines.push("ORDER BY".to_string());
            push_comma_separated(&mut lines, &self.order_bys.iter().collect::<Vec<_>>());
        }

        if let Some(n) = self.limit {
            lines.push(format!("LIMIT {}", n));
        }

        if let Some(n) = self.offset {
            lines.push(format!("OFFSET {}", n));
        }

        lines.join("\n")
    }
}

/// One indented line per entry, comma-terminated except the last.
fn push_comma_separated(lines: &mut Vec<String>, entries: &[&String]) {
    for (i, entry) in entries.iter().enumerate() {
        if i + 1 == entries.len() {
            lines.push(format!("    {}", entry));
        } else {
            lines.push(format!("    {},", entry));
        }
    }
}

/// Flattens validated specifications into [`Query`] records and renders
/// them.
///
/// The builder is stateless across calls apart from the last built query;
/// every `build` starts from a fresh record, so one instance can serve
/// unrelated specifications in sequence.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    use_alias: bool,
    registry: TableRegistry,
    query: Option<Query>,
}

impl QueryBuilder {
    /// Create a builder. With `use_alias` on, table names in incoming specs
    /// are resolved through `registry` before rendering.
    pub fn new(use_alias: bool, registry: TableRegistry) -> Self {
        Self {
            use_alias,
            registry,
            query: None,
        }
    }

    /// Flatten `spec` into a fresh intermediate query.
    ///
    /// Fails on structural invariant violations (empty table, empty logical
    /// node) and, in aliasing mode, on a registry miss. On failure the
    /// previously built query is discarded; no partial state survives.
    pub fn build(&mut self, spec: &QuerySpec) -> QueryResult<()> {
        self.query = None;
        spec.validate()?;

        let table = self.resolve_table(&spec.table)?;
        let mut query = Query {
            table,
            ..Query::default()
        };

        build_select(&mut query, &spec.select);
        build_aggregates(&mut query, &spec.aggregates);
        build_group_by(&mut query, &spec.group_bys);
        query.wheres = flatten_tree(spec.where_.as_ref());
        query.havings = flatten_tree(spec.having.as_ref());
        build_order_by(&mut query, &spec.order_bys);
        query.limit = spec.limit;
        query.offset = spec.offset;

        self.query = Some(query);
        Ok(())
    }

    /// Render the last built query to SQL text.
    pub fn render(&self) -> QueryResult<String> {
        let query = self.query.as_ref().ok_or(QueryError::NotBuilt)?;
        Ok(query.to_sql())
    }

    /// The intermediate form of the last successful `build`, if any.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    fn resolve_table(&self, name: &str) -> QueryResult<String> {
        if !self.use_alias {
            return Ok(name.to_string());
        }
        self.registry
            .resolve(name)
            .map(|handle| handle.name.clone())
            .ok_or_else(|| QueryError::table_not_found(name))
    }
}

fn build_select(query: &mut Query, columns: &[SelectColumn]) {
    // Select-column aliases are accepted by the model but not rendered.
    query.columns = columns.iter().map(|col| col.field.clone()).collect();
}

fn build_aggregates(query: &mut Query, aggregates: &[Aggregate]) {
    query.aggregates = aggregates
        .iter()
        .map(|agg| match &agg.alias {
            Some(alias) => format!("{}({}) AS {}", agg.func, agg.field, alias),
            None => format!("{}({})", agg.func, agg.field),
        })
        .collect();
}

/// Explicit fields first, then - only when the projection mixes plain
/// columns with aggregates - every selected column. The merged list keeps
/// first-occurrence order and drops duplicates.
fn build_group_by(query: &mut Query, group_bys: &[String]) {
    let mut merged: Vec<String> = group_bys.to_vec();

    if !query.columns.is_empty() && !query.aggregates.is_empty() {
        merged.extend(query.columns.iter().cloned());
    }

    let mut seen = HashSet::new();
    query.group_bys = merged
        .into_iter()
        .filter(|field| seen.insert(field.clone()))
        .collect();
}

/// Flatten the top level of a WHERE/HAVING tree.
///
/// Each direct child of the root renders inline (nested logical nodes come
/// out parenthesized) and is prefixed with the root's own operator token,
/// so every fragment reads as a standalone clause line under `1=1`.
fn flatten_tree(root: Option<&Logical>) -> Vec<String> {
    match root {
        Some(tree) => tree
            .conditions
            .iter()
            .map(|condition| format!("{} {}", tree.op, condition))
            .collect(),
        None => Vec::new(),
    }
}

fn build_order_by(query: &mut Query, order_bys: &[OrderBy]) {
    query.order_bys = order_bys
        .iter()
        .map(|entry| format!("{} {}", entry.field, entry.direction))
        .collect();
}
