//! Spec-driven SQL builder.
//!
//! Turns a structured query specification (columns, aggregates, nested
//! AND/OR filter trees, grouping, having, ordering, pagination) into one
//! canonical multi-line SQL text block for a single table. Nothing is
//! parsed, planned, or executed here; rendered values are plain text and
//! parameterization stays with the execution layer.

pub mod builder;
pub mod error;
pub mod registry;
pub mod spec;

pub use builder::{Query, QueryBuilder, ToSql};
pub use error::{QueryError, QueryResult};
pub use spec::QuerySpec;

pub mod prelude {
    pub use crate::builder::{Query, QueryBuilder, ToSql};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::registry::{TableHandle, TableRegistry};
    pub use crate::spec::builders::{all_of, any_of, eq, filter, gt, gte, lt, lte, ne};
    pub use crate::spec::{
        Aggregate, AggregateFunc, Condition, Filter, Logical, LogicalOp, OrderBy, QuerySpec,
        SelectColumn, SortDirection, Value,
    };
}
