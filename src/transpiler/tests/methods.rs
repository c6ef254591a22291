//! Method dispatch tests.

use super::person_columns;
use crate::ast::{col, param};
use crate::dialect::Dialect;
use crate::schema::ColumnSet;
use crate::transpiler::{translate, translate_predicate};
use pretty_assertions::assert_eq;

#[test]
fn test_like_wildcarding() {
    let cols = person_columns();

    let contains = col("FirstName").contains("ann");
    let fragment = translate_predicate(&contains, &cols, Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[first_name] LIKE '%ann%'");

    let starts = col("FirstName").starts_with("An");
    let fragment = translate_predicate(&starts, &cols, Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[first_name] LIKE 'An%'");

    let ends = col("FirstName").ends_with("na");
    let fragment = translate_predicate(&ends, &cols, Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[first_name] LIKE '%na'");
}

#[test]
fn test_like_escapes_quotes_in_literal() {
    let expr = col("FirstName").contains("O'Brien");
    let fragment =
        translate_predicate(&expr, &person_columns(), Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "\"first_name\" LIKE '%O''Brien%'");
}

#[test]
fn test_like_with_parameter_pattern() {
    let expr = col("FirstName").contains(crate::ast::Value::Param("needle".into()));
    let fragment = translate_predicate(&expr, &person_columns(), Dialect::MySql).unwrap();
    assert_eq!(fragment.sql, "`first_name` LIKE CONCAT('%', @needle, '%')");

    let fragment = translate_predicate(&expr, &person_columns(), Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "\"first_name\" LIKE '%' || $needle || '%'");
}

#[test]
fn test_length_spelling_per_dialect() {
    let expr = col("FirstName").length();
    let fragment = translate(&expr, &person_columns(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "LEN([first_name])");

    let fragment = translate(&expr, &person_columns(), Dialect::MySql).unwrap();
    assert_eq!(fragment.sql, "LENGTH(`first_name`)");
}

#[test]
fn test_substring_spelling_per_dialect() {
    let expr = col("FirstName").substring_len(1, 3);
    let fragment = translate(&expr, &person_columns(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "SUBSTRING([first_name], 1, 3)");

    let fragment = translate(&expr, &person_columns(), Dialect::Sqlite).unwrap();
    assert_eq!(fragment.sql, "SUBSTR([first_name], 1, 3)");
}

#[test]
fn test_substring_without_length_on_sqlserver_uses_len() {
    let expr = col("FirstName").substring(2);
    let fragment = translate(&expr, &person_columns(), Dialect::SqlServer).unwrap();
    assert_eq!(
        fragment.sql,
        "SUBSTRING([first_name], 2, LEN([first_name]))"
    );

    let fragment = translate(&expr, &person_columns(), Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "SUBSTR(\"first_name\", 2)");
}

#[test]
fn test_date_shift_methods() {
    let expr = col("CreatedAt").add_days(7);
    let fragment = translate(&expr, &person_columns(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "DATEADD(DAY, 7, [created_at])");

    let expr = col("CreatedAt").add_months(1);
    let fragment = translate(&expr, &person_columns(), Dialect::MySql).unwrap();
    assert_eq!(fragment.sql, "DATE_ADD(`created_at`, INTERVAL 1 MONTH)");

    let expr = col("CreatedAt").add_years(2);
    let fragment = translate(&expr, &person_columns(), Dialect::Sqlite).unwrap();
    assert_eq!(
        fragment.sql,
        "DATETIME([created_at], '+' || (2) || ' YEARS')"
    );
}

#[test]
fn test_membership_with_values() {
    let expr = col("Id").in_list([1, 2, 3]);
    let fragment = translate_predicate(&expr, &ColumnSet::default(), Dialect::SqlServer).unwrap();
    assert_eq!(fragment.sql, "[Id] IN (1, 2, 3)");
}

#[test]
fn test_membership_with_strings() {
    let expr = col("FirstName").in_list(["Ann", "Bo"]);
    let fragment =
        translate_predicate(&expr, &person_columns(), Dialect::Postgres).unwrap();
    assert_eq!(fragment.sql, "\"first_name\" IN ('Ann', 'Bo')");
}

#[test]
fn test_empty_membership_renders_in_null() {
    let expr = col("Id").in_list(Vec::<i64>::new());
    for dialect in [
        Dialect::MySql,
        Dialect::SqlServer,
        Dialect::Postgres,
        Dialect::Sqlite,
    ] {
        let fragment = translate_predicate(&expr, &ColumnSet::default(), dialect).unwrap();
        assert!(
            fragment.sql.ends_with("IN (NULL)"),
            "dialect {}: {}",
            dialect,
            fragment.sql
        );
    }
}

#[test]
fn test_wrong_arity_is_shape_error() {
    use crate::ast::{Expr, MethodKind};

    let expr = Expr::Method {
        kind: MethodKind::Pow,
        target: Box::new(col("Salary")),
        args: vec![],
    };
    let err = translate(&expr, &person_columns(), Dialect::SqlServer).unwrap_err();
    assert_eq!(err.code(), "SQLX002");

    let expr = Expr::Method {
        kind: MethodKind::Trim,
        target: Box::new(col("FirstName")),
        args: vec![param("x")],
    };
    let err = translate(&expr, &person_columns(), Dialect::SqlServer).unwrap_err();
    assert_eq!(err.code(), "SQLX002");
}
