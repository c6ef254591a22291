mod cache;
mod dialects;
mod methods;

use crate::schema::{ColumnMeta, ColumnSet, ValueKind};

/// Shared fixture: a person entity with one column of each kind.
pub(crate) fn person_columns() -> ColumnSet {
    ColumnSet::new(vec![
        ColumnMeta::new("Id", ValueKind::Numeric),
        ColumnMeta::new("Age", ValueKind::Numeric),
        ColumnMeta::new("Salary", ValueKind::Numeric),
        ColumnMeta::new("FirstName", ValueKind::Text),
        ColumnMeta::new("IsActive", ValueKind::Boolean),
        ColumnMeta::new("CreatedAt", ValueKind::Temporal),
        ColumnMeta::new("Avatar", ValueKind::Binary),
    ])
}
