//! Dialect-parameterized translation tests.

use super::person_columns;
use crate::ast::{bool_col, col, val, Value};
use crate::dialect::Dialect;
use crate::schema::ColumnSet;
use crate::transpiler::translate_predicate;
use pretty_assertions::assert_eq;

#[test]
fn test_predicate_sqlserver() {
    let expr = col("Age").gt(18).and(bool_col("IsActive"));
    let fragment = translate_predicate(&expr, &ColumnSet::default(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "([Age] > 18 AND [IsActive] = 1)");
}

#[test]
fn test_predicate_equivalence_across_dialects() {
    // Same logical predicate; only quoting and spelling may differ.
    let expr = col("Age").gt(18).and(bool_col("IsActive"));
    let cols = ColumnSet::default();

    let expected = [
        (Dialect::MySql, "(`Age` > 18 AND `IsActive` = 1)"),
        (Dialect::SqlServer, "([Age] > 18 AND [IsActive] = 1)"),
        (Dialect::Postgres, "(\"Age\" > 18 AND \"IsActive\" = 1)"),
        (Dialect::Sqlite, "([Age] > 18 AND [IsActive] = 1)"),
    ];
    for (dialect, sql) in expected {
        let fragment = translate_predicate(&expr, &cols, dialect).unwrap();
        assert_eq!(fragment.sql, sql, "dialect {}", dialect);
    }
}

#[test]
fn test_metadata_maps_to_physical_names() {
    let expr = col("IsActive").eq(true);
    let fragment = translate_predicate(&expr, &person_columns(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[is_active] = 1");
}

#[test]
fn test_null_compare_rewrites() {
    let cols = person_columns();
    let eq_null = col("FirstName").is_null();
    let fragment = translate_predicate(&eq_null, &cols, Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[first_name] IS NULL");

    let ne_null = col("FirstName").is_not_null();
    let fragment = translate_predicate(&ne_null, &cols, Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "\"first_name\" IS NOT NULL");
}

#[test]
fn test_not_equal_spelled_with_angle_brackets() {
    let expr = col("Age").ne(30);
    let fragment = translate_predicate(&expr, &ColumnSet::default(), Dialect::MySql).unwrap();
    assert_eq!(fragment.sql, "`Age` <> 30");
}

#[test]
fn test_not_over_subexpression_wraps() {
    let expr = col("Age").gt(18).not();
    let fragment = translate_predicate(&expr, &ColumnSet::default(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "NOT ([Age] > 18)");
}

#[test]
fn test_not_over_boolean_column_flips() {
    let expr = bool_col("IsActive").not();
    let fragment = translate_predicate(&expr, &ColumnSet::default(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[IsActive] = 0");
}

#[test]
fn test_string_add_routes_through_concat() {
    let cols = person_columns();
    let expr = col("FirstName").add(" jr");

    let fragment = crate::transpiler::translate(&expr, &cols, Dialect::MySql).unwrap();
    assert_eq!(fragment.sql, "CONCAT(`first_name`, ' jr')");

    let fragment = crate::transpiler::translate(&expr, &cols, Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "\"first_name\" || ' jr'");

    // Overloaded + keeps the operator.
    let fragment = crate::transpiler::translate(&expr, &cols, Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[first_name] + ' jr'");
}

#[test]
fn test_numeric_add_keeps_operator() {
    let expr = col("Age").add(1);
    let fragment =
        crate::transpiler::translate(&expr, &person_columns(), Dialect::MySql).unwrap();
    assert_eq!(fragment.sql, "(`age` + 1)");
}

#[test]
fn test_boolean_literal_renders_one_zero_everywhere() {
    for dialect in [
        Dialect::MySql,
        Dialect::SqlServer,
        Dialect::Postgres,
        Dialect::Sqlite,
    ] {
        let expr = col("IsActive").eq(true);
        let fragment = translate_predicate(&expr, &person_columns(), dialect).unwrap();
        assert!(fragment.sql.ends_with("= 1"), "dialect {}", dialect);
    }
}

#[test]
fn test_named_param_surfaces_as_hole() {
    let expr = col("Age").gt_expr(crate::ast::param("min_age"));
    let fragment = translate_predicate(&expr, &ColumnSet::default(), Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "\"Age\" > $min_age");
    assert_eq!(fragment.params, vec![("min_age".to_string(), Value::Null)]);
}

#[test]
fn test_unsupported_dialect_propagates() {
    let expr = col("Age").gt(18);
    let err = translate_predicate(&expr, &ColumnSet::default(), Dialect::Db2).unwrap_err();
    assert_eq!(err.code(), "SQLX003");
}

#[test]
fn test_bytes_literal_uses_cast_fallback() {
    let expr = col("Avatar").eq_expr(val(vec![0xde_u8, 0xad]));
    let fragment = translate_predicate(&expr, &person_columns(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[avatar] = CAST('dead' AS VARBINARY(MAX))");
}
