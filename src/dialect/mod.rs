//! Dialect registry: six fixed profiles and their providers.
//!
//! A [`Dialect`] is resolved either by name or by structural match on a raw
//! [`DialectProfile`]. Two profiles (Oracle-like and DB2-like) have no
//! implemented provider and fail fast with `SQLX003` at resolution time.

pub mod sql;
pub mod traits;

use crate::error::{MintError, MintResult};
use serde::{Deserialize, Serialize};
use sql::mysql::MySqlDialect;
use sql::postgres::PostgresDialect;
use sql::sqlite::SqliteDialect;
use sql::sqlserver::SqlServerDialect;
pub use traits::SqlDialect;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    MySql,
    SqlServer,
    Postgres,
    Oracle,
    Db2,
    Sqlite,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::SqlServer
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "MySQL"),
            Dialect::SqlServer => write!(f, "SqlServer"),
            Dialect::Postgres => write!(f, "Postgres"),
            Dialect::Oracle => write!(f, "Oracle"),
            Dialect::Db2 => write!(f, "Db2"),
            Dialect::Sqlite => write!(f, "SQLite"),
        }
    }
}

/// One database's lexical conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialectProfile {
    pub identifier_quotes: (char, char),
    pub string_quotes: (char, char),
    pub parameter_prefix: char,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::MySql,
        Dialect::SqlServer,
        Dialect::Postgres,
        Dialect::Oracle,
        Dialect::Db2,
        Dialect::Sqlite,
    ];

    /// Fixed lexical profile for this dialect.
    pub fn profile(&self) -> DialectProfile {
        let (identifier_quotes, parameter_prefix) = match self {
            Dialect::MySql => (('`', '`'), '@'),
            Dialect::SqlServer => (('[', ']'), '@'),
            Dialect::Postgres => (('"', '"'), '$'),
            Dialect::Oracle => (('"', '"'), ':'),
            Dialect::Db2 => (('"', '"'), '?'),
            Dialect::Sqlite => (('[', ']'), '@'),
        };
        DialectProfile {
            identifier_quotes,
            string_quotes: ('\'', '\''),
            parameter_prefix,
        }
    }

    /// Structural match of a raw profile against the six known signatures.
    ///
    /// SqlServer wins over SQLite (identical signatures); SQLite is only ever
    /// selected by name. An unrecognized profile resolves to SqlServer, the
    /// documented default, rather than failing.
    pub fn from_profile(profile: &DialectProfile) -> Dialect {
        for dialect in [
            Dialect::MySql,
            Dialect::SqlServer,
            Dialect::Postgres,
            Dialect::Oracle,
            Dialect::Db2,
        ] {
            if dialect.profile() == *profile {
                return dialect;
            }
        }
        Dialect::SqlServer
    }

    /// Resolve the provider for this dialect.
    ///
    /// Oracle and Db2 are declared but not implemented and always fail here;
    /// they are never silently defaulted.
    pub fn provider(&self) -> MintResult<&'static dyn SqlDialect> {
        match self {
            Dialect::MySql => Ok(&MySqlDialect),
            Dialect::SqlServer => Ok(&SqlServerDialect),
            Dialect::Postgres => Ok(&PostgresDialect),
            Dialect::Sqlite => Ok(&SqliteDialect),
            Dialect::Oracle | Dialect::Db2 => Err(MintError::UnsupportedDialect(*self)),
        }
    }
}

/// Resolve a provider for a raw profile: structural match first, SqlServer
/// as the documented default for unrecognized signatures.
pub fn resolve(profile: &DialectProfile) -> MintResult<&'static dyn SqlDialect> {
    Dialect::from_profile(profile).provider()
}
