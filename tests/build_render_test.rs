//! End-to-end tests: JSON specification in, canonical SQL text out.

use pretty_assertions::assert_eq;
use queryspec::prelude::*;

#[test]
fn json_spec_to_sql_block() {
    let json = r#"{
        "table": "orders",
        "select": [{"field": "region"}, {"field": "channel"}],
        "aggregates": [{"func": "SUM", "field": "amount", "alias": "total"}],
        "where": {
            "op": "AND",
            "conditions": [
                {"field": "status", "op": "=", "value": "open"},
                {"op": "OR", "conditions": [
                    {"field": "amount", "op": ">=", "value": 100},
                    {"field": "priority", "op": "!=", "value": "low"}
                ]}
            ]
        },
        "having": {
            "op": "AND",
            "conditions": [{"field": "SUM(amount)", "op": ">", "value": 1000}]
        },
        "order_bys": [{"field": "total", "direction": "DESC"}],
        "limit": 20
    }"#;

    let spec: QuerySpec = serde_json::from_str(json).expect("spec should deserialize");
    let mut builder = QueryBuilder::default();
    builder.build(&spec).expect("spec should build");

    let expected = "\
SELECT
    region,
    channel,
    SUM(amount) AS total
FROM orders
WHERE 1=1
    AND status = 'open'
    AND (amount >= 100 OR priority != 'low')
GROUP BY
    region,
    channel
HAVING 1=1
    AND SUM(amount) > 1000
ORDER BY
    total DESC
LIMIT 20";
    assert_eq!(builder.render().unwrap(), expected);
}

#[test]
fn fluent_spec_matches_json_spec() {
    let json = r#"{
        "table": "events",
        "select": [{"field": "kind"}],
        "where": {
            "op": "AND",
            "conditions": [{"field": "seen", "op": "=", "value": false}]
        },
        "limit": 5,
        "offset": 10
    }"#;
    let from_json: QuerySpec = serde_json::from_str(json).unwrap();

    let fluent = QuerySpec::new("events")
        .select("kind")
        .filter(Logical::new(LogicalOp::And, vec![eq("seen", false)]).unwrap())
        .limit(5)
        .offset(10);

    assert_eq!(from_json, fluent);

    let mut builder = QueryBuilder::default();
    builder.build(&fluent).unwrap();
    let expected = "\
SELECT
    kind
FROM events
WHERE 1=1
    AND seen = false
LIMIT 5
OFFSET 10";
    assert_eq!(builder.render().unwrap(), expected);
}

#[test]
fn malformed_json_spec_is_rejected_before_build() {
    // Unsupported aggregate token fails at deserialization.
    let bad_func = r#"{"table": "t", "aggregates": [{"func": "MEDIAN", "field": "x"}]}"#;
    assert!(serde_json::from_str::<QuerySpec>(bad_func).is_err());

    // Empty logical node deserializes but fails structural validation.
    let empty_logical = r#"{"table": "t", "where": {"op": "AND", "conditions": []}}"#;
    let spec: QuerySpec = serde_json::from_str(empty_logical).unwrap();
    let mut builder = QueryBuilder::default();
    assert_eq!(builder.build(&spec), Err(QueryError::EmptyLogical));
    assert_eq!(builder.render(), Err(QueryError::NotBuilt));
}

#[test]
fn alias_mode_end_to_end() {
    let mut registry = TableRegistry::default();
    registry.register("ord", "orders");

    let mut builder = QueryBuilder::new(true, registry);
    let spec = QuerySpec::new("ord")
        .select("id")
        .order_by("id", SortDirection::Asc);
    builder.build(&spec).unwrap();

    assert_eq!(
        builder.render().unwrap(),
        "SELECT\n    id\nFROM orders\nORDER BY\n    id ASC"
    );
}
