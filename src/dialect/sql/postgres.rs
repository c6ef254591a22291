use crate::ast::DateUnit;
use crate::dialect::traits::SqlDialect;
use crate::dialect::Dialect;
use crate::schema::ValueKind;

#[derive(Debug)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn map_type(&self, kind: ValueKind) -> &'static str {
        match kind {
            ValueKind::Numeric => "NUMERIC",
            ValueKind::Text => "TEXT",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Temporal => "TIMESTAMPTZ",
            ValueKind::Binary => "BYTEA",
        }
    }

    fn format_datetime(&self, dt: &chrono::DateTime<chrono::Utc>) -> String {
        format!("TIMESTAMP '{}'", dt.format("%Y-%m-%d %H:%M:%S"))
    }

    fn current_timestamp(&self) -> &'static str {
        "NOW()"
    }

    fn substring_function(&self) -> &'static str {
        "SUBSTR"
    }

    fn ceiling_function(&self) -> &'static str {
        "CEIL"
    }

    fn date_add(&self, unit: DateUnit, amount: &str, target: &str) -> String {
        // Interval multiplication keeps non-literal amounts valid.
        format!("({} + ({}) * INTERVAL '1 {}')", target, amount, unit)
    }
}
