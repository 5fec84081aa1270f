pub mod builders;
pub mod conditions;
pub mod operators;
pub mod query_spec;
pub mod values;

pub use self::conditions::{Condition, Filter, Logical};
pub use self::operators::{AggregateFunc, LogicalOp, SortDirection};
pub use self::query_spec::{Aggregate, OrderBy, QuerySpec, SelectColumn};
pub use self::values::Value;
