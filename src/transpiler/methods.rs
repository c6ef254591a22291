//! Fixed dispatch table for method-call nodes.

use crate::ast::{DateUnit, Expr, MethodKind, Value};
use crate::dialect::Dialect;
use crate::error::{MintError, MintResult};

use super::expr::Translator;

pub(crate) fn render_method(
    tr: &mut Translator<'_>,
    kind: MethodKind,
    target: &Expr,
    args: &[Expr],
) -> MintResult<String> {
    match kind {
        MethodKind::Contains => like_pattern(tr, target, args, kind, "%", "%"),
        MethodKind::StartsWith => like_pattern(tr, target, args, kind, "", "%"),
        MethodKind::EndsWith => like_pattern(tr, target, args, kind, "%", ""),

        MethodKind::ToUpper => unary_function(tr, target, args, kind, "UPPER"),
        MethodKind::ToLower => unary_function(tr, target, args, kind, "LOWER"),
        MethodKind::Trim => unary_function(tr, target, args, kind, "TRIM"),
        MethodKind::Length => {
            expect_args(kind, args, 0)?;
            let t = tr.render(target)?;
            Ok(format!("{}({})", tr.dialect.length_function(), t))
        }

        MethodKind::Substring => {
            if args.is_empty() || args.len() > 2 {
                return Err(shape_error(kind, args.len()));
            }
            let t = tr.render(target)?;
            let start = tr.render(&args[0])?;
            let func = tr.dialect.substring_function();
            match args.get(1) {
                Some(len) => {
                    let len = tr.render(len)?;
                    Ok(format!("{}({}, {}, {})", func, t, start, len))
                }
                // SQL Server's SUBSTRING is three-argument only.
                None if tr.dialect.dialect() == Dialect::SqlServer => {
                    Ok(format!("{}({}, {}, LEN({}))", func, t, start, t))
                }
                None => Ok(format!("{}({}, {})", func, t, start)),
            }
        }

        MethodKind::Abs => unary_function(tr, target, args, kind, "ABS"),
        MethodKind::Floor => unary_function(tr, target, args, kind, "FLOOR"),
        MethodKind::Sqrt => unary_function(tr, target, args, kind, "SQRT"),
        MethodKind::Ceiling => {
            expect_args(kind, args, 0)?;
            let t = tr.render(target)?;
            Ok(format!("{}({})", tr.dialect.ceiling_function(), t))
        }
        MethodKind::Round => {
            let t = tr.render(target)?;
            match args {
                [] => Ok(format!("ROUND({})", t)),
                [digits] => {
                    let d = tr.render(digits)?;
                    Ok(format!("ROUND({}, {})", t, d))
                }
                _ => Err(shape_error(kind, args.len())),
            }
        }
        MethodKind::Pow => {
            expect_args(kind, args, 1)?;
            let t = tr.render(target)?;
            let e = tr.render(&args[0])?;
            Ok(format!("{}({}, {})", tr.dialect.power_function(), t, e))
        }

        MethodKind::AddDays => date_shift(tr, target, args, kind, DateUnit::Day),
        MethodKind::AddMonths => date_shift(tr, target, args, kind, DateUnit::Month),
        MethodKind::AddYears => date_shift(tr, target, args, kind, DateUnit::Year),

        MethodKind::In => {
            let t = tr.render(target)?;
            if args.is_empty() {
                // Always-false membership; IN () would be a syntax error.
                return Ok(format!("{} IN (NULL)", t));
            }
            let rendered: MintResult<Vec<String>> = args.iter().map(|a| tr.render(a)).collect();
            Ok(format!("{} IN ({})", t, rendered?.join(", ")))
        }
    }
}

fn unary_function(
    tr: &mut Translator<'_>,
    target: &Expr,
    args: &[Expr],
    kind: MethodKind,
    func: &str,
) -> MintResult<String> {
    expect_args(kind, args, 0)?;
    let t = tr.render(target)?;
    Ok(format!("{}({})", func, t))
}

fn like_pattern(
    tr: &mut Translator<'_>,
    target: &Expr,
    args: &[Expr],
    kind: MethodKind,
    prefix: &str,
    suffix: &str,
) -> MintResult<String> {
    expect_args(kind, args, 1)?;
    let t = tr.render(target)?;
    match &args[0] {
        Expr::Value(Value::Str(s)) => Ok(format!(
            "{} LIKE '{}{}{}'",
            t,
            prefix,
            s.replace('\'', "''"),
            suffix
        )),
        other => {
            // Non-literal pattern: build the wildcards with dialect concat.
            let pattern = tr.render(other)?;
            let mut parts = Vec::with_capacity(3);
            if !prefix.is_empty() {
                parts.push(format!("'{}'", prefix));
            }
            parts.push(pattern);
            if !suffix.is_empty() {
                parts.push(format!("'{}'", suffix));
            }
            Ok(format!("{} LIKE {}", t, tr.dialect.concat(&parts)))
        }
    }
}

fn date_shift(
    tr: &mut Translator<'_>,
    target: &Expr,
    args: &[Expr],
    kind: MethodKind,
    unit: DateUnit,
) -> MintResult<String> {
    expect_args(kind, args, 1)?;
    let t = tr.render(target)?;
    let amount = tr.render(&args[0])?;
    Ok(tr.dialect.date_add(unit, &amount, &t))
}

fn expect_args(kind: MethodKind, args: &[Expr], expected: usize) -> MintResult<()> {
    if args.len() != expected {
        return Err(shape_error(kind, args.len()));
    }
    Ok(())
}

fn shape_error(kind: MethodKind, got: usize) -> MintError {
    MintError::InvalidExpression(format!("{} does not accept {} argument(s)", kind, got))
}
