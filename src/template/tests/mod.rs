
use crate::dialect::Dialect;
use crate::schema::{ColumnMeta, ColumnSet, ValueKind};
use crate::template::TemplateContext;

/// Shared fixture matching a small todo entity.
pub(crate) fn todo_context(dialect: Dialect) -> TemplateContext {
    TemplateContext::new(
        "todo",
        ColumnSet::new(vec![
            ColumnMeta::new("Id", ValueKind::Numeric),
            ColumnMeta::new("Title", ValueKind::Text),
            ColumnMeta::new("Description", ValueKind::Text),
            ColumnMeta::new("IsCompleted", ValueKind::Boolean),
        ]),
        dialect,
    )
}
