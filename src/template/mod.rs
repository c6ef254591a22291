//! Placeholder templates: prepare once, render many times.
//!
//! Static placeholders (`{{table}}`, `{{columns}}`, `{{set}}`, ...) expand at
//! prepare time against column metadata. Dynamic placeholders (`{{where}}`,
//! `{{limit}}`, `--param` holes) and `{{if}}` blocks resolve per render with
//! caller-supplied values.
//!
//! ```
//! use sqlmint::dialect::Dialect;
//! use sqlmint::schema::{ColumnMeta, ColumnSet, ValueKind};
//! use sqlmint::template::{SqlTemplate, TemplateContext};
//!
//! let ctx = TemplateContext::new(
//!     "todo",
//!     ColumnSet::new(vec![
//!         ColumnMeta::new("Id", ValueKind::Numeric),
//!         ColumnMeta::new("Title", ValueKind::Text),
//!     ]),
//!     Dialect::SqlServer,
//! );
//! let tpl = SqlTemplate::prepare(
//!     "{{insert}} ({{columns:auto|exclude=Id}}) VALUES ({{values:auto|exclude=Id}})",
//!     &ctx,
//! ).unwrap();
//! assert_eq!(tpl.render_static().unwrap(), "INSERT INTO todo ([title]) VALUES (@title)");
//! ```

pub mod parser;
pub(crate) mod render;

#[cfg(test)]
mod tests;

use crate::ast::Value;
use crate::dialect::Dialect;
use crate::error::{MintError, MintResult};
use crate::schema::ColumnSet;
use std::collections::HashMap;

use parser::parse_template;
use render::{resolve_placeholder, ResolveState, Resolved};

pub use parser::{BlockCond, PlaceholderToken, Segment};

/// Everything prepare-time resolution needs: target table, column metadata,
/// and the dialect whose provider formats the output.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub table: String,
    pub columns: ColumnSet,
    pub dialect: Dialect,
}

impl TemplateContext {
    pub fn new(table: impl Into<String>, columns: ColumnSet, dialect: Dialect) -> Self {
        Self {
            table: table.into(),
            columns,
            dialect,
        }
    }
}

/// A prepared span: static text, a named hole, or a conditional block.
#[derive(Debug, Clone, PartialEq)]
enum RenderSpan {
    Text(String),
    Hole(String),
    Block {
        cond: BlockCond,
        spans: Vec<RenderSpan>,
    },
}

/// A prepared statement shell. The static portion never changes after
/// prepare; only dynamic spans are substituted at render.
#[derive(Debug, Clone)]
pub struct SqlTemplate {
    dialect: Dialect,
    spans: Vec<RenderSpan>,
    has_dynamic: bool,
}

impl SqlTemplate {
    /// Parse and statically resolve a template. Unknown placeholder names
    /// fail here; a template is never partially prepared.
    pub fn prepare(text: &str, ctx: &TemplateContext) -> MintResult<SqlTemplate> {
        if text.is_empty() {
            return Err(MintError::MissingArgument("template"));
        }
        let provider = ctx.dialect.provider()?;

        let (rest, segments) = parse_template(text).map_err(|e| MintError::TemplateParse {
            offset: 0,
            message: e.to_string(),
        })?;
        if !rest.is_empty() {
            return Err(MintError::TemplateParse {
                offset: text.len() - rest.len(),
                message: format!("unparsable input near '{}'", truncate(rest, 24)),
            });
        }

        let mut state = ResolveState::default();
        let spans = resolve_segments(&segments, ctx, provider, &mut state)?;
        let has_dynamic = spans
            .iter()
            .any(|s| !matches!(s, RenderSpan::Text(_)));
        Ok(SqlTemplate {
            dialect: ctx.dialect,
            spans,
            has_dynamic,
        })
    }

    /// Whether any placeholder is left for render time.
    pub fn has_dynamic_placeholders(&self) -> bool {
        self.has_dynamic
    }

    /// Render a template with no dynamic placeholders.
    pub fn render_static(&self) -> MintResult<String> {
        self.render_pairs(&[])
    }

    /// Render with a single named value (non-allocating fast path).
    pub fn render(&self, name: &str, value: impl Into<Value>) -> MintResult<String> {
        let value = value.into();
        self.render_pairs(&[(name, &value)])
    }

    /// Render with two named values (non-allocating fast path).
    pub fn render2(
        &self,
        name1: &str,
        value1: impl Into<Value>,
        name2: &str,
        value2: impl Into<Value>,
    ) -> MintResult<String> {
        let value1 = value1.into();
        let value2 = value2.into();
        self.render_pairs(&[(name1, &value1), (name2, &value2)])
    }

    /// Render with an arbitrary value map.
    pub fn render_with(&self, values: &HashMap<String, Value>) -> MintResult<String> {
        let pairs: Vec<(&str, &Value)> = values.iter().map(|(k, v)| (k.as_str(), v)).collect();
        self.render_pairs(&pairs)
    }

    fn render_pairs(&self, pairs: &[(&str, &Value)]) -> MintResult<String> {
        let mut out = String::new();
        render_spans(&self.spans, pairs, self.dialect, &mut out)?;
        Ok(out)
    }
}

fn resolve_segments(
    segments: &[Segment],
    ctx: &TemplateContext,
    provider: &dyn crate::dialect::SqlDialect,
    state: &mut ResolveState,
) -> MintResult<Vec<RenderSpan>> {
    let mut spans: Vec<RenderSpan> = Vec::new();

    let mut push_text = |spans: &mut Vec<RenderSpan>, text: String| {
        if let Some(RenderSpan::Text(last)) = spans.last_mut() {
            last.push_str(&text);
        } else {
            spans.push(RenderSpan::Text(text));
        }
    };

    for segment in segments {
        match segment {
            Segment::Literal(text) => push_text(&mut spans, text.clone()),
            Segment::Placeholder(token) => {
                match resolve_placeholder(token, &ctx.table, &ctx.columns, provider, state)? {
                    Resolved::Static(text) => push_text(&mut spans, text),
                    Resolved::Hole(name) => spans.push(RenderSpan::Hole(name)),
                }
            }
            Segment::Block { cond, body } => {
                let body = resolve_segments(body, ctx, provider, state)?;
                spans.push(RenderSpan::Block {
                    cond: cond.clone(),
                    spans: body,
                });
            }
        }
    }
    Ok(spans)
}

fn render_spans(
    spans: &[RenderSpan],
    pairs: &[(&str, &Value)],
    dialect: Dialect,
    out: &mut String,
) -> MintResult<()> {
    let lookup = |name: &str| pairs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v);

    for span in spans {
        match span {
            RenderSpan::Text(text) => out.push_str(text),
            RenderSpan::Hole(name) => {
                let value = lookup(name)
                    .ok_or_else(|| MintError::MissingRenderValue(name.clone()))?;
                out.push_str(&render_hole(name, value, dialect)?);
            }
            RenderSpan::Block { cond, spans } => {
                let emit = match cond {
                    BlockCond::NotNull(name) => lookup(name).is_some_and(|v| !v.is_null()),
                    BlockCond::Truthy(name) => lookup(name).is_some_and(Value::is_truthy),
                };
                if emit {
                    render_spans(spans, pairs, dialect, out)?;
                }
            }
        }
    }
    Ok(())
}

/// Substitute one dynamic hole.
///
/// `where` takes the caller's already-escaped condition text verbatim (a
/// deliberate trust boundary); `limit` routes through the dialect's clause
/// generator; everything else renders as a literal.
fn render_hole(name: &str, value: &Value, dialect: Dialect) -> MintResult<String> {
    let provider = dialect.provider()?;
    match name {
        "where" => match value {
            Value::Str(raw) => Ok(raw.clone()),
            other => Ok(provider.literal(other)),
        },
        "limit" => match value {
            Value::Int(n) if *n >= 0 => Ok(provider.limit_clause(Some(*n as u64), None)),
            other => Err(MintError::InvalidExpression(format!(
                "limit placeholder needs a non-negative integer, got {}",
                other
            ))),
        },
        _ => Ok(provider.literal(value)),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
