use crate::ast::DateUnit;
use crate::dialect::traits::{join_quoted, validate_upsert_args, SqlDialect};
use crate::dialect::Dialect;
use crate::error::MintResult;
use crate::schema::{ColumnSet, ValueKind};

#[derive(Debug)]
pub struct SqlServerDialect;

impl SqlDialect for SqlServerDialect {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        // OFFSET/FETCH is paired syntax; a bare limit gets offset 0.
        match (limit, offset) {
            (None, None) => String::new(),
            (Some(n), off) => format!(
                "OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
                off.unwrap_or(0),
                n
            ),
            (None, Some(m)) => format!("OFFSET {} ROWS", m),
        }
    }

    fn upsert(&self, table: &str, columns: &ColumnSet, key_columns: &[&str]) -> MintResult<String> {
        validate_upsert_args(table, columns, key_columns)?;

        let source_row: Vec<String> = columns
            .iter()
            .map(|c| {
                format!(
                    "{} AS {}",
                    self.parameter(&c.physical.to_lowercase()),
                    self.quote_identifier(&c.physical)
                )
            })
            .collect();
        let on: Vec<String> = key_columns
            .iter()
            .map(|k| {
                let q = self.quote_identifier(&columns.physical_of(k));
                format!("target.{} = source.{}", q, q)
            })
            .collect();
        let updates: Vec<String> = columns
            .iter()
            .filter(|c| !key_columns.contains(&c.logical.as_str()))
            .map(|c| {
                let q = self.quote_identifier(&c.physical);
                format!("target.{} = source.{}", q, q)
            })
            .collect();
        let insert_values: Vec<String> = columns
            .iter()
            .map(|c| format!("source.{}", self.quote_identifier(&c.physical)))
            .collect();

        let mut sql = format!(
            "MERGE INTO {} AS target USING (SELECT {}) AS source ON ({})",
            self.quote_identifier(table),
            source_row.join(", "),
            on.join(" AND ")
        );
        if !updates.is_empty() {
            sql.push_str(&format!(
                " WHEN MATCHED THEN UPDATE SET {}",
                updates.join(", ")
            ));
        }
        sql.push_str(&format!(
            " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({});",
            join_quoted(self, columns),
            insert_values.join(", ")
        ));
        Ok(sql)
    }

    fn map_type(&self, kind: ValueKind) -> &'static str {
        match kind {
            ValueKind::Numeric => "DECIMAL(18, 6)",
            ValueKind::Text => "NVARCHAR(255)",
            ValueKind::Boolean => "BIT",
            ValueKind::Temporal => "DATETIME2",
            ValueKind::Binary => "VARBINARY(MAX)",
        }
    }

    fn format_datetime(&self, dt: &chrono::DateTime<chrono::Utc>) -> String {
        format!("'{}'", dt.format("%Y-%m-%dT%H:%M:%S"))
    }

    fn current_timestamp(&self) -> &'static str {
        "GETDATE()"
    }

    fn concat(&self, parts: &[String]) -> String {
        match parts {
            [] => String::new(),
            [single] => single.clone(),
            many => many.join(" + "),
        }
    }

    fn length_function(&self) -> &'static str {
        "LEN"
    }

    fn date_add(&self, unit: DateUnit, amount: &str, target: &str) -> String {
        format!("DATEADD({}, {}, {})", unit, amount, target)
    }
}
