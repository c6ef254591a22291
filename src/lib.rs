//! Dialect-aware SQL generation with typed expression trees.
//!
//! Build statements as data, not strings: a fluent expression AST, a
//! placeholder template micro-language, and six dialect profiles feeding a
//! query assembler that only ever emits parameterized, dialect-correct SQL.
//!
//! ```
//! use sqlmint::prelude::*;
//!
//! let sql = QueryBuilder::new("users", ColumnSet::default(), Dialect::SqlServer)
//!     .where_(col("Age").gt(18).and(bool_col("IsActive")))
//!     .to_sql()
//!     .unwrap();
//! assert_eq!(sql, "SELECT * FROM [users] WHERE [Age] > 18 AND [IsActive] = 1");
//! ```

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod error;
pub mod schema;
pub mod template;
pub mod transpiler;

pub use builder::QueryBuilder;
pub use dialect::Dialect;
pub use error::{MintError, MintResult};
pub use template::SqlTemplate;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builder::{ParamContext, QueryBuilder, StatementKind};
    pub use crate::dialect::{Dialect, DialectProfile, SqlDialect};
    pub use crate::error::{MintError, MintResult};
    pub use crate::schema::{ColumnMeta, ColumnSet, ValueKind};
    pub use crate::template::{SqlTemplate, TemplateContext};
    pub use crate::transpiler::{clear_cache, translate, translate_predicate, SqlFragment};
}
