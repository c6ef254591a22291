//! Column metadata supplied by the schema collaborator.
//!
//! The core never inspects live databases or host types; callers hand it a
//! [`ColumnSet`] per entity and every naming decision flows from there.
//!
//! # Example
//! ```
//! use sqlmint::schema::ColumnSet;
//!
//! let json = r#"[
//!     { "logical": "Id", "kind": "numeric", "nullable": false },
//!     { "logical": "IsCompleted", "kind": "boolean", "nullable": false }
//! ]"#;
//!
//! let cols = ColumnSet::from_json(json).unwrap();
//! assert_eq!(cols.get("IsCompleted").unwrap().physical, "is_completed");
//! ```

use serde::{Deserialize, Serialize};

/// Broad value category of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Numeric,
    Text,
    Boolean,
    Temporal,
    Binary,
}

/// One mapped column: logical (host-side) name plus derived physical name.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Logical name as declared by the caller (PascalCase by convention).
    pub logical: String,
    /// Physical column name; derived from the logical name unless overridden.
    #[serde(default)]
    pub physical: String,
    pub kind: ValueKind,
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnMeta {
    /// Create a column whose physical name is derived from the logical name.
    pub fn new(logical: impl Into<String>, kind: ValueKind) -> Self {
        let logical = logical.into();
        let physical = to_snake_case(&logical);
        Self {
            logical,
            physical,
            kind,
            nullable: false,
        }
    }

    /// Override the derived physical name.
    pub fn with_physical(mut self, physical: impl Into<String>) -> Self {
        self.physical = physical.into();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Ordered, immutable column list for one entity.
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<ColumnMeta>,
}

impl ColumnSet {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        let columns = columns
            .into_iter()
            .map(|mut c| {
                if c.physical.is_empty() {
                    c.physical = to_snake_case(&c.logical);
                }
                c
            })
            .collect();
        Self { columns }
    }

    /// Load a column list from its JSON description.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let columns: Vec<ColumnMeta> = serde_json::from_str(json)?;
        Ok(Self::new(columns))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnMeta> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by its logical name (case-sensitive).
    pub fn get(&self, logical: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.logical == logical)
    }

    /// Physical name for a logical name. Names outside the set pass through
    /// verbatim; only mapped columns get the snake_case treatment.
    pub fn physical_of(&self, logical: &str) -> String {
        match self.get(logical) {
            Some(c) => c.physical.clone(),
            None => logical.to_string(),
        }
    }

    /// Columns surviving an `exclude=`/`include=` filter. Both lists hold
    /// logical names; `include` empty means "all".
    pub fn filtered<'a>(
        &'a self,
        exclude: &'a [String],
        include: &'a [String],
    ) -> impl Iterator<Item = &'a ColumnMeta> {
        self.columns.iter().filter(move |c| {
            if exclude.iter().any(|e| e == &c.logical) {
                return false;
            }
            include.is_empty() || include.iter().any(|i| i == &c.logical)
        })
    }
}

impl FromIterator<ColumnMeta> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = ColumnMeta>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Convert a PascalCase/camelCase logical name to snake_case.
///
/// Acronym runs collapse into one word: `HTTPStatus` -> `http_status`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_basic() {
        assert_eq!(to_snake_case("Id"), "id");
        assert_eq!(to_snake_case("Title"), "title");
        assert_eq!(to_snake_case("IsCompleted"), "is_completed");
        assert_eq!(to_snake_case("CreatedAtUtc"), "created_at_utc");
    }

    #[test]
    fn test_snake_case_acronyms() {
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_physical_override() {
        let col = ColumnMeta::new("LegacyName", ValueKind::Text).with_physical("LEGACY_NM");
        assert_eq!(col.physical, "LEGACY_NM");
    }

    #[test]
    fn test_filtered_exclude() {
        let cols = ColumnSet::new(vec![
            ColumnMeta::new("Id", ValueKind::Numeric),
            ColumnMeta::new("Title", ValueKind::Text),
            ColumnMeta::new("IsCompleted", ValueKind::Boolean),
        ]);
        let exclude = vec!["Id".to_string()];
        let names: Vec<&str> = cols
            .filtered(&exclude, &[])
            .map(|c| c.physical.as_str())
            .collect();
        assert_eq!(names, vec!["title", "is_completed"]);
    }

    #[test]
    fn test_from_json_derives_physical() {
        let json = r#"[{ "logical": "OrderTotal", "kind": "numeric" }]"#;
        let cols = ColumnSet::from_json(json).unwrap();
        assert_eq!(cols.get("OrderTotal").unwrap().physical, "order_total");
    }
}
