//! The provider trait bound to a dialect profile.
//!
//! Providers are stateless and pure; defaults here cover the common
//! LIMIT/OFFSET and ON CONFLICT family, with per-dialect overrides in
//! `dialect::sql`.

use crate::ast::{DateUnit, Value};
use crate::dialect::{Dialect, DialectProfile};
use crate::error::{MintError, MintResult};
use crate::schema::{ColumnSet, ValueKind};
use chrono::{DateTime, Utc};

pub trait SqlDialect: Sync + Send + std::fmt::Debug {
    fn dialect(&self) -> Dialect;

    fn profile(&self) -> DialectProfile {
        self.dialect().profile()
    }

    /// Quote a table or column name, doubling any embedded closing quote.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.profile().identifier_quotes;
        let mut out = String::with_capacity(name.len() + 2);
        out.push(open);
        for c in name.chars() {
            out.push(c);
            if c == close {
                out.push(close);
            }
        }
        out.push(close);
        out
    }

    /// Quote a string literal with single-quote doubling.
    fn quote_str(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// Dialect-prefixed named parameter (`@name`, `$name`, ...).
    fn parameter(&self, name: &str) -> String {
        format!("{}{}", self.profile().parameter_prefix, name)
    }

    /// Literal rendering for a constant. Booleans are `1`/`0` on every
    /// implemented profile; binary data goes through the CAST fallback.
    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Str(s) => self.quote_str(s),
            Value::Uuid(u) => format!("'{}'", u),
            Value::DateTime(dt) => self.format_datetime(dt),
            Value::Bytes(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
                format!("CAST('{}' AS {})", hex, self.map_type(ValueKind::Binary))
            }
            Value::Param(name) => self.parameter(name),
        }
    }

    /// LIMIT/OFFSET clause; empty when both are absent. Dialects with paired
    /// syntax default the missing offset to 0.
    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (None, None) => String::new(),
            (Some(n), None) => format!("LIMIT {}", n),
            (None, Some(m)) => format!("OFFSET {}", m),
            (Some(n), Some(m)) => format!("LIMIT {} OFFSET {}", n, m),
        }
    }

    /// Insert-or-update keyed by `key_columns` (logical names), referencing a
    /// synthesized source row. Default is the ON CONFLICT family.
    fn upsert(&self, table: &str, columns: &ColumnSet, key_columns: &[&str]) -> MintResult<String> {
        validate_upsert_args(table, columns, key_columns)?;

        let col_list = join_quoted(self, columns);
        let params = join_params(self, columns, None);
        let keys: Vec<String> = key_columns
            .iter()
            .map(|k| self.quote_identifier(&columns.physical_of(k)))
            .collect();

        let updates: Vec<String> = columns
            .iter()
            .filter(|c| !key_columns.contains(&c.logical.as_str()))
            .map(|c| {
                let q = self.quote_identifier(&c.physical);
                format!("{} = EXCLUDED.{}", q, q)
            })
            .collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({})",
            self.quote_identifier(table),
            col_list,
            params,
            keys.join(", ")
        );
        if updates.is_empty() {
            sql.push_str(" DO NOTHING");
        } else {
            sql.push_str(" DO UPDATE SET ");
            sql.push_str(&updates.join(", "));
        }
        Ok(sql)
    }

    /// One INSERT with `batch_size` value tuples; every parameter is suffixed
    /// with its zero-based row index.
    fn batch_insert(
        &self,
        table: &str,
        columns: &ColumnSet,
        batch_size: usize,
    ) -> MintResult<String> {
        if table.is_empty() {
            return Err(MintError::MissingArgument("table"));
        }
        if columns.is_empty() {
            return Err(MintError::MissingArgument("columns"));
        }
        if batch_size == 0 {
            return Err(MintError::MissingArgument("batch_size"));
        }

        let tuples: Vec<String> = (0..batch_size)
            .map(|row| format!("({})", join_params(self, columns, Some(row))))
            .collect();
        Ok(format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.quote_identifier(table),
            join_quoted(self, columns),
            tuples.join(", ")
        ))
    }

    /// Database type name for a broad value kind.
    fn map_type(&self, kind: ValueKind) -> &'static str;

    fn format_datetime(&self, dt: &DateTime<Utc>) -> String {
        format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S"))
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// N-ary string concatenation: zero parts render empty, one part renders
    /// itself, more join with the dialect operator or function.
    fn concat(&self, parts: &[String]) -> String {
        match parts {
            [] => String::new(),
            [single] => single.clone(),
            many => many.join(" || "),
        }
    }

    fn length_function(&self) -> &'static str {
        "LENGTH"
    }

    fn substring_function(&self) -> &'static str {
        "SUBSTRING"
    }

    fn ceiling_function(&self) -> &'static str {
        "CEILING"
    }

    fn power_function(&self) -> &'static str {
        "POWER"
    }

    /// Shift a temporal expression by `amount` units.
    fn date_add(&self, unit: DateUnit, amount: &str, target: &str) -> String;
}

pub(crate) fn validate_upsert_args(
    table: &str,
    columns: &ColumnSet,
    key_columns: &[&str],
) -> MintResult<()> {
    if table.is_empty() {
        return Err(MintError::MissingArgument("table"));
    }
    if columns.is_empty() {
        return Err(MintError::MissingArgument("columns"));
    }
    if key_columns.is_empty() {
        return Err(MintError::MissingArgument("key_columns"));
    }
    Ok(())
}

/// Comma-joined quoted physical column names.
pub(crate) fn join_quoted<D: SqlDialect + ?Sized>(dialect: &D, columns: &ColumnSet) -> String {
    columns
        .iter()
        .map(|c| dialect.quote_identifier(&c.physical))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined parameter list matching the column order; `row` appends a
/// zero-based batch suffix.
pub(crate) fn join_params<D: SqlDialect + ?Sized>(
    dialect: &D,
    columns: &ColumnSet,
    row: Option<usize>,
) -> String {
    columns
        .iter()
        .map(|c| {
            let name = c.physical.to_lowercase();
            match row {
                Some(i) => dialect.parameter(&format!("{}{}", name, i)),
                None => dialect.parameter(&name),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
