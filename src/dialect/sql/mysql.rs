use crate::ast::DateUnit;
use crate::dialect::traits::{join_params, join_quoted, validate_upsert_args, SqlDialect};
use crate::dialect::Dialect;
use crate::error::MintResult;
use crate::schema::{ColumnSet, ValueKind};

#[derive(Debug)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (None, None) => String::new(),
            (Some(n), None) => format!("LIMIT {}", n),
            // OFFSET requires a LIMIT; the canonical "no limit" sentinel.
            (None, Some(m)) => format!("LIMIT 18446744073709551615 OFFSET {}", m),
            (Some(n), Some(m)) => format!("LIMIT {} OFFSET {}", n, m),
        }
    }

    fn upsert(&self, table: &str, columns: &ColumnSet, key_columns: &[&str]) -> MintResult<String> {
        validate_upsert_args(table, columns, key_columns)?;

        let updates: Vec<String> = columns
            .iter()
            .filter(|c| !key_columns.contains(&c.logical.as_str()))
            .map(|c| {
                let q = self.quote_identifier(&c.physical);
                format!("{} = VALUES({})", q, q)
            })
            .collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_identifier(table),
            join_quoted(self, columns),
            join_params(self, columns, None)
        );
        if updates.is_empty() {
            // All columns are keys; a duplicate insert is a no-op.
            let first = self.quote_identifier(&columns.physical_of(key_columns[0]));
            sql.push_str(&format!(
                " ON DUPLICATE KEY UPDATE {} = {}",
                first, first
            ));
        } else {
            sql.push_str(" ON DUPLICATE KEY UPDATE ");
            sql.push_str(&updates.join(", "));
        }
        Ok(sql)
    }

    fn map_type(&self, kind: ValueKind) -> &'static str {
        match kind {
            ValueKind::Numeric => "DECIMAL(18, 6)",
            ValueKind::Text => "VARCHAR(255)",
            ValueKind::Boolean => "TINYINT(1)",
            ValueKind::Temporal => "DATETIME",
            ValueKind::Binary => "BLOB",
        }
    }

    fn current_timestamp(&self) -> &'static str {
        "NOW()"
    }

    fn concat(&self, parts: &[String]) -> String {
        match parts {
            [] => String::new(),
            [single] => single.clone(),
            many => format!("CONCAT({})", many.join(", ")),
        }
    }

    fn power_function(&self) -> &'static str {
        "POW"
    }

    fn date_add(&self, unit: DateUnit, amount: &str, target: &str) -> String {
        format!("DATE_ADD({}, INTERVAL {} {})", target, amount, unit)
    }
}
