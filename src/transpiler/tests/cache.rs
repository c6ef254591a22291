//! Translation cache behavior.

use super::person_columns;
use crate::ast::col;
use crate::dialect::Dialect;
use crate::transpiler::{
    clear_cache, translate_predicate, translate_predicate_with, SharedCache, TranslationCache,
};

#[test]
fn test_repeat_translation_is_identical() {
    let cols = person_columns();
    let expr = col("Age").gt(21).and(col("FirstName").contains("a"));

    let first = translate_predicate(&expr, &cols, Dialect::SqlServer).unwrap();
    let second = translate_predicate(&expr, &cols, Dialect::SqlServer).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_clear_cache_does_not_change_output() {
    let cols = person_columns();
    let expr = col("Salary").gte(1000);

    let before = translate_predicate(&expr, &cols, Dialect::Postgres).unwrap();
    clear_cache();
    let after = translate_predicate(&expr, &cols, Dialect::Postgres).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_injected_cache_is_used() {
    let cache = SharedCache::new();
    let cols = person_columns();
    let expr = col("Age").lt(65);

    assert!(cache.is_empty());
    translate_predicate_with(&expr, &cols, Dialect::SqlServer, &cache).unwrap();
    assert_eq!(cache.len(), 1);

    // Same structure hits the same entry.
    translate_predicate_with(&expr, &cols, Dialect::SqlServer, &cache).unwrap();
    assert_eq!(cache.len(), 1);

    // A different dialect is a different key.
    translate_predicate_with(&expr, &cols, Dialect::Sqlite, &cache).unwrap();
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_value_changes_miss_the_cache() {
    let cache = SharedCache::new();
    let cols = person_columns();

    let a = translate_predicate_with(&col("Age").gt(18), &cols, Dialect::SqlServer, &cache)
        .unwrap();
    let b = translate_predicate_with(&col("Age").gt(21), &cols, Dialect::SqlServer, &cache)
        .unwrap();
    assert_ne!(a.sql, b.sql);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_concurrent_translation() {
    let cols = person_columns();

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for i in 0..8 {
            let cols = &cols;
            handles.push(scope.spawn(move || {
                for _ in 0..50 {
                    let expr = col("Age").gt(i as i64).and(col("Salary").gte(1000));
                    let fragment =
                        translate_predicate(&expr, cols, Dialect::SqlServer).unwrap();
                    assert!(fragment.sql.contains(&format!("[age] > {}", i)));
                    if i % 3 == 0 {
                        clear_cache();
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    });
}
