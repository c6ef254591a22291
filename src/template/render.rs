//! Prepare-time resolution of static placeholders.

use crate::dialect::SqlDialect;
use crate::error::{MintError, MintResult};
use crate::schema::ColumnSet;

use super::parser::PlaceholderToken;

/// Every name the registry accepts; used for error suggestions too.
pub(crate) const KNOWN_PLACEHOLDERS: &[&str] = &[
    "table", "columns", "values", "set", "insert", "update", "delete", "count", "sum", "avg",
    "where", "limit",
];

/// Outcome of resolving one placeholder at prepare time.
pub(crate) enum Resolved {
    /// Fully expanded text.
    Static(String),
    /// A named hole filled at render time.
    Hole(String),
}

/// Cross-placeholder state within one prepare pass. `values` mirrors the
/// filter of the `columns` token before it unless it carries its own.
#[derive(Default)]
pub(crate) struct ResolveState {
    columns_filter: Option<(Vec<String>, Vec<String>)>,
}

pub(crate) fn resolve_placeholder(
    token: &PlaceholderToken,
    table: &str,
    columns: &ColumnSet,
    dialect: &dyn SqlDialect,
    state: &mut ResolveState,
) -> MintResult<Resolved> {
    // `--param <name>` makes any placeholder a named render-time hole.
    if let Some(name) = token.option("param") {
        return Ok(Resolved::Hole(name.to_string()));
    }

    match token.name.as_str() {
        "where" | "limit" => Ok(Resolved::Hole(token.name.clone())),

        "table" => Ok(Resolved::Static(table.to_string())),

        "columns" => {
            let filter = token_filter(token);
            state.columns_filter = Some(filter.clone());
            Ok(Resolved::Static(column_list(
                &filter, columns, dialect, false,
            )?))
        }
        "values" => {
            let filter = match (token_has_filter(token), &state.columns_filter) {
                (false, Some(inherited)) => inherited.clone(),
                _ => token_filter(token),
            };
            Ok(Resolved::Static(column_list(
                &filter, columns, dialect, true,
            )?))
        }

        "set" => {
            let (exclude, include) = token_filter(token);
            let assignments: Vec<String> = columns
                .filtered(&exclude, &include)
                .map(|c| {
                    format!(
                        "{} = {}",
                        dialect.quote_identifier(&c.physical),
                        dialect.parameter(&c.physical.to_lowercase())
                    )
                })
                .collect();
            if assignments.is_empty() {
                return Err(MintError::MissingArgument("set columns"));
            }
            Ok(Resolved::Static(assignments.join(", ")))
        }

        "insert" => Ok(Resolved::Static(format!("INSERT INTO {}", table))),
        "update" => Ok(Resolved::Static(format!("UPDATE {}", table))),
        "delete" => Ok(Resolved::Static(format!("DELETE FROM {}", table))),

        "count" | "sum" | "avg" => aggregate_placeholder(token, columns, dialect),

        other => Err(MintError::unknown_placeholder(other, KNOWN_PLACEHOLDERS)),
    }
}

fn token_filter(token: &PlaceholderToken) -> (Vec<String>, Vec<String>) {
    (token.list_option("exclude"), token.list_option("include"))
}

fn token_has_filter(token: &PlaceholderToken) -> bool {
    token.has_flag("exclude") || token.has_flag("include")
}

/// `columns` / `values` share the exclude/include plumbing; `values` swaps
/// quoted names for dialect parameters.
fn column_list(
    (exclude, include): &(Vec<String>, Vec<String>),
    columns: &ColumnSet,
    dialect: &dyn SqlDialect,
    as_params: bool,
) -> MintResult<String> {
    let parts: Vec<String> = columns
        .filtered(exclude, include)
        .map(|c| {
            if as_params {
                dialect.parameter(&c.physical.to_lowercase())
            } else {
                dialect.quote_identifier(&c.physical)
            }
        })
        .collect();
    if parts.is_empty() {
        return Err(MintError::MissingArgument("columns"));
    }
    Ok(parts.join(", "))
}

fn aggregate_placeholder(
    token: &PlaceholderToken,
    columns: &ColumnSet,
    dialect: &dyn SqlDialect,
) -> MintResult<Resolved> {
    let func = token.name.to_uppercase();

    // First bare flag (other than `auto`) names the aggregate column.
    let arg = token
        .options
        .iter()
        .find(|(k, v)| v.is_none() && k != "auto")
        .map(|(k, _)| k.as_str());

    let inner = match arg {
        Some(logical) => format!(
            "{}({})",
            func,
            dialect.quote_identifier(&columns.physical_of(logical))
        ),
        None if token.name == "count" => "COUNT(*)".to_string(),
        None => return Err(MintError::MissingArgument("aggregate column")),
    };

    let coalesce = token.option("coalesce") == Some("true") || token.has_flag("default");
    if coalesce {
        let default = token.option("default").unwrap_or("0");
        Ok(Resolved::Static(format!("COALESCE({}, {})", inner, default)))
    } else {
        Ok(Resolved::Static(inner))
    }
}
