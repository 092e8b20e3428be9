#![allow(dead_code)]

use filter_sql_core::{ColumnMap, Expr, ParseError};

pub fn parse(input: &str) -> Expr {
    filter_sql_core::parse(input)
        .unwrap_or_else(|e| panic!("Failed to parse: {input}\nError: {e:?}"))
}

pub fn parse_err(input: &str) -> ParseError {
    filter_sql_core::parse(input).expect_err(&format!("Expected parse error for: {input}"))
}

pub fn compile(input: &str) -> String {
    compile_with(input, &ColumnMap::new())
}

pub fn compile_with(input: &str, columns: &ColumnMap) -> String {
    filter_sql_core::compile(input, columns)
        .unwrap_or_else(|e| panic!("Failed to compile: {input}\nError: {e:?}"))
}

/// Inventory-style column map used across the SQL tests.
pub fn inventory_columns() -> ColumnMap {
    [
        ("cpus", r#"i."CPUs""#),
        ("memory", r#"i."Memory""#),
        ("vm.name", r#"i."VM""#),
        ("vm.host.datacenter", r#"i."Datacenter""#),
        ("vm.status", r#"i."Powerstate""#),
    ]
    .into_iter()
    .collect()
}

/// Verifies that the debug form is a fixed point: rendering the parsed
/// expression and parsing it again yields the same tree.
pub fn round_trip(input: &str) {
    let ast1 = parse(input);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    assert_eq!(
        ast1, ast2,
        "Round-trip failed.\n  Input:    {input}\n  Rendered: {rendered1}"
    );
    assert_eq!(rendered1, ast2.to_string());
}
