//! Expression-to-SQL translation.
//!
//! Walks a typed [`Expr`](crate::ast::Expr) tree and emits a dialect-correct
//! fragment. Translations are memoized in a process-wide cache keyed by a
//! structural hash of the tree, the column metadata, and the dialect.

pub mod cache;
pub mod expr;
pub mod methods;

#[cfg(test)]
mod tests;

use crate::ast::{Expr, Value};
use crate::dialect::Dialect;
use crate::error::MintResult;
use crate::schema::ColumnSet;
pub use cache::{clear_cache, SharedCache, TranslationCache};
use expr::Translator;

/// A translated SQL fragment plus the named parameter holes it references.
///
/// Holes surface with a `Null` placeholder value; the query assembler binds
/// real values when it owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<(String, Value)>,
}

/// Translate a predicate (boolean context) through the shared cache.
pub fn translate_predicate(
    expr: &Expr,
    columns: &ColumnSet,
    dialect: Dialect,
) -> MintResult<SqlFragment> {
    translate_predicate_with(expr, columns, dialect, cache::global())
}

/// Translate a projection/value expression through the shared cache.
pub fn translate(expr: &Expr, columns: &ColumnSet, dialect: Dialect) -> MintResult<SqlFragment> {
    translate_with(expr, columns, dialect, cache::global())
}

/// Translate a predicate against an injected cache.
pub fn translate_predicate_with(
    expr: &Expr,
    columns: &ColumnSet,
    dialect: Dialect,
    cache: &dyn TranslationCache,
) -> MintResult<SqlFragment> {
    let key = cache::structural_key(expr, columns, dialect) ^ 0x1;
    if let Some(hit) = cache.get(key) {
        return Ok(hit);
    }
    let provider = dialect.provider()?;
    let mut translator = Translator::new(provider, columns);
    let sql = translator.render_predicate(expr)?;
    let fragment = SqlFragment {
        sql,
        params: translator.into_params(),
    };
    cache.put(key, fragment.clone());
    Ok(fragment)
}

/// Translate a projection/value expression against an injected cache.
pub fn translate_with(
    expr: &Expr,
    columns: &ColumnSet,
    dialect: Dialect,
    cache: &dyn TranslationCache,
) -> MintResult<SqlFragment> {
    let key = cache::structural_key(expr, columns, dialect);
    if let Some(hit) = cache.get(key) {
        return Ok(hit);
    }
    let provider = dialect.provider()?;
    let mut translator = Translator::new(provider, columns);
    let sql = translator.render(expr)?;
    let fragment = SqlFragment {
        sql,
        params: translator.into_params(),
    };
    cache.put(key, fragment.clone());
    Ok(fragment)
}
