//! Process-wide translation cache.
//!
//! The cache is an explicit collaborator: the default is a shared
//! `Mutex<HashMap>` singleton, but callers may inject their own
//! [`TranslationCache`] (test doubles, alternate eviction). Entries are
//! evicted only by [`clear_cache`]; a clear never invalidates fragments a
//! caller already holds.

use crate::ast::Expr;
use crate::dialect::Dialect;
use crate::schema::ColumnSet;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Mutex, OnceLock};

use super::SqlFragment;

/// Get/put/clear surface for translation memoization.
pub trait TranslationCache: Send + Sync {
    fn get(&self, key: u64) -> Option<SqlFragment>;
    /// Last-writer-wins on duplicate keys.
    fn put(&self, key: u64, fragment: SqlFragment);
    fn clear(&self);
}

/// Default cache: a mutex-guarded map shared by the whole process.
#[derive(Default)]
pub struct SharedCache {
    inner: Mutex<HashMap<u64, SqlFragment>>,
}

impl SharedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TranslationCache for SharedCache {
    fn get(&self, key: u64) -> Option<SqlFragment> {
        self.inner.lock().unwrap().get(&key).cloned()
    }

    fn put(&self, key: u64, fragment: SqlFragment) {
        self.inner.lock().unwrap().insert(key, fragment);
    }

    fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}

pub(crate) fn global() -> &'static SharedCache {
    static CACHE: OnceLock<SharedCache> = OnceLock::new();
    CACHE.get_or_init(SharedCache::new)
}

/// Drop every memoized translation. Safe at any time; in-flight callers keep
/// the fragments they already resolved.
pub fn clear_cache() {
    global().clear();
}

/// Structural signature of a tree for one column set and dialect.
pub(crate) fn structural_key(expr: &Expr, columns: &ColumnSet, dialect: Dialect) -> u64 {
    let mut hasher = DefaultHasher::new();
    expr.hash(&mut hasher);
    columns.hash(&mut hasher);
    dialect.hash(&mut hasher);
    hasher.finish()
}
