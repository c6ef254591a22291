//! Query assembly tests.

use crate::ast::{bool_col, col, Value};
use crate::builder::QueryBuilder;
use crate::dialect::Dialect;
use crate::schema::{ColumnMeta, ColumnSet, ValueKind};
use pretty_assertions::assert_eq;

fn todo_columns() -> ColumnSet {
    ColumnSet::new(vec![
        ColumnMeta::new("Id", ValueKind::Numeric),
        ColumnMeta::new("Title", ValueKind::Text),
        ColumnMeta::new("IsCompleted", ValueKind::Boolean),
        ColumnMeta::new("Category", ValueKind::Text),
        ColumnMeta::new("Salary", ValueKind::Numeric),
    ])
}

fn builder(dialect: Dialect) -> QueryBuilder {
    QueryBuilder::new("todo", todo_columns(), dialect)
}

#[test]
fn test_select_default_star() {
    let sql = builder(Dialect::SqlServer).to_sql().unwrap();
    assert_eq!(sql, "SELECT * FROM [todo]");
}

#[test]
fn test_select_with_projection_and_where() {
    let sql = builder(Dialect::SqlServer)
        .select(["Id", "Title"])
        .where_(col("IsCompleted").eq(false))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT [id], [title] FROM [todo] WHERE [is_completed] = 0"
    );
}

#[test]
fn test_where_tree_outer_parens_stripped() {
    let sql = builder(Dialect::SqlServer)
        .where_(col("Id").gt(1).and(bool_col("IsCompleted")))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM [todo] WHERE [id] > 1 AND [is_completed] = 1"
    );
}

#[test]
fn test_inner_parens_survive_stripping() {
    let sql = builder(Dialect::SqlServer)
        .where_(
            col("Id").eq(1).and(col("Id").eq(2)).or(col("Id").eq(3)),
        )
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM [todo] WHERE ([id] = 1 AND [id] = 2) OR [id] = 3"
    );
}

#[test]
fn test_chained_where_conjoins() {
    let sql = builder(Dialect::SqlServer)
        .where_(col("Id").gt(1))
        .where_(col("Id").lt(10))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM [todo] WHERE [id] > 1 AND [id] < 10");
}

#[test]
fn test_update_requires_where() {
    for dialect in [
        Dialect::MySql,
        Dialect::SqlServer,
        Dialect::Postgres,
        Dialect::Sqlite,
    ] {
        let err = QueryBuilder::new("todo", todo_columns(), dialect)
            .set("Title", "x")
            .to_sql()
            .unwrap_err();
        assert_eq!(err.code(), "SQLX001");
        let msg = err.to_string();
        assert!(msg.contains("UPDATE"), "dialect {}: {}", dialect, msg);
        assert!(msg.contains("WHERE"), "dialect {}: {}", dialect, msg);
    }
}

#[test]
fn test_delete_requires_where() {
    for dialect in [
        Dialect::MySql,
        Dialect::SqlServer,
        Dialect::Postgres,
        Dialect::Sqlite,
    ] {
        let err = QueryBuilder::new("todo", todo_columns(), dialect)
            .delete()
            .to_sql()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DELETE"), "dialect {}: {}", dialect, msg);
        assert!(msg.contains("WHERE"), "dialect {}: {}", dialect, msg);
    }
}

#[test]
fn test_update_statement() {
    let qb = builder(Dialect::SqlServer)
        .set("Title", "new title")
        .set("IsCompleted", true)
        .where_(col("Id").eq(7));
    let sql = qb.to_sql().unwrap();
    assert_eq!(
        sql,
        "UPDATE [todo] SET [title] = @title, [is_completed] = @is_completed WHERE [id] = 7"
    );
    assert_eq!(
        qb.parameters(),
        &[
            ("title".to_string(), Value::Str("new title".into())),
            ("is_completed".to_string(), Value::Bool(true)),
        ]
    );
}

#[test]
fn test_insert_statement() {
    let qb = builder(Dialect::Postgres)
        .insert()
        .set("Title", "write docs")
        .set("IsCompleted", false);
    let sql = qb.to_sql().unwrap();
    assert_eq!(
        sql,
        "INSERT INTO \"todo\" (\"title\", \"is_completed\") VALUES ($title, $is_completed)"
    );
}

#[test]
fn test_delete_with_where() {
    let sql = builder(Dialect::MySql)
        .delete()
        .where_(col("Id").eq(3))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "DELETE FROM `todo` WHERE `id` = 3");
}

#[test]
fn test_group_by_having_order() {
    let sql = builder(Dialect::SqlServer)
        .select(["Category"])
        .project(col("Salary").mul(1.2).round_to(2).sum())
        .group_by(["Category"])
        .having(col("Salary").sum().gt(10000))
        .order_desc("Category")
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT [category], SUM(ROUND(([salary] * 1.2), 2)) FROM [todo] \
         GROUP BY [category] HAVING SUM([salary]) > 10000 ORDER BY [category] DESC"
    );
}

#[test]
fn test_limit_offset_per_dialect() {
    let sql = builder(Dialect::Postgres)
        .select(["Id"])
        .limit(10)
        .offset(20)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT \"id\" FROM \"todo\" LIMIT 10 OFFSET 20");

    let sql = builder(Dialect::SqlServer)
        .select(["Id"])
        .order_asc("Id")
        .limit(10)
        .offset(20)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT [id] FROM [todo] ORDER BY [id] ASC OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn test_statement_kind_conflict_is_rejected() {
    let err = builder(Dialect::SqlServer)
        .delete()
        .set("Title", "x")
        .to_sql()
        .unwrap_err();
    assert_eq!(err.code(), "SQLX001");
    assert!(err.to_string().contains("DELETE"));
}

#[test]
fn test_merge_from_conjoins_where_and_unions_params() {
    let other = builder(Dialect::SqlServer)
        .where_(col("Category").eq("work"))
        .bind("scope", 1);
    let qb = builder(Dialect::SqlServer)
        .where_(col("IsCompleted").eq(false))
        .bind("scope", 2)
        .merge_from(&other);

    let sql = qb.to_sql().unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM [todo] WHERE [is_completed] = 0 AND [category] = 'work'"
    );
    // Existing binding wins the union.
    assert_eq!(qb.parameters(), &[("scope".to_string(), Value::Int(2))]);
}

#[test]
fn test_to_sql_is_idempotent() {
    let qb = builder(Dialect::SqlServer)
        .set("Title", "t")
        .where_(col("Id").eq(1));
    let a = qb.to_sql().unwrap();
    let b = qb.to_sql().unwrap();
    assert_eq!(a, b);
    assert_eq!(qb.parameters(), qb.parameters());
}

#[test]
fn test_close_is_idempotent() {
    let mut qb = builder(Dialect::SqlServer).where_(col("Id").eq(1));
    let _ = qb.to_sql().unwrap();
    qb.close();
    qb.close();
    qb.close();
    assert!(qb.to_sql().is_err());
}

#[test]
fn test_unsupported_dialect_at_to_sql() {
    let err = QueryBuilder::new("todo", todo_columns(), Dialect::Oracle)
        .to_sql()
        .unwrap_err();
    assert_eq!(err.code(), "SQLX003");
}

#[test]
fn test_empty_table_rejected() {
    let err = QueryBuilder::new("", todo_columns(), Dialect::SqlServer)
        .to_sql()
        .unwrap_err();
    assert_eq!(err.code(), "SQLX001");
}
