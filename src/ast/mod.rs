//! Typed expression AST for predicates and projections.
//!
//! Trees are immutable once built; the transpiler walks them to emit
//! dialect-correct SQL fragments. Every node serializes, so expression
//! shapes can cross process boundaries or be snapshotted in tests.

pub mod builders;
pub mod expr;
pub mod operators;
pub mod values;

pub use builders::{bool_col, case_when, col, count_all, param, typed_col, val};
pub use expr::Expr;
pub use operators::{
    AggregateFunc, BinaryOp, CompareOp, DateUnit, LogicalOp, MethodKind, SortOrder, UnaryOp,
};
pub use values::Value;
