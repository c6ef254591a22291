use crate::ast::DateUnit;
use crate::dialect::traits::SqlDialect;
use crate::dialect::Dialect;
use crate::schema::ValueKind;

#[derive(Debug)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (None, None) => String::new(),
            (Some(n), None) => format!("LIMIT {}", n),
            // OFFSET requires a LIMIT; -1 means unbounded.
            (None, Some(m)) => format!("LIMIT -1 OFFSET {}", m),
            (Some(n), Some(m)) => format!("LIMIT {} OFFSET {}", n, m),
        }
    }

    fn map_type(&self, kind: ValueKind) -> &'static str {
        match kind {
            ValueKind::Numeric => "NUMERIC",
            ValueKind::Text => "TEXT",
            ValueKind::Boolean => "INTEGER",
            ValueKind::Temporal => "TEXT",
            ValueKind::Binary => "BLOB",
        }
    }

    fn substring_function(&self) -> &'static str {
        "SUBSTR"
    }

    fn ceiling_function(&self) -> &'static str {
        "CEIL"
    }

    fn power_function(&self) -> &'static str {
        "POW"
    }

    fn date_add(&self, unit: DateUnit, amount: &str, target: &str) -> String {
        let unit = match unit {
            DateUnit::Day => "DAYS",
            DateUnit::Month => "MONTHS",
            DateUnit::Year => "YEARS",
        };
        format!("DATETIME({}, '+' || ({}) || ' {}')", target, amount, unit)
    }
}
