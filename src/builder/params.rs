//! Ordered named-parameter bindings.

use crate::ast::Value;

/// Collected `(name, value)` pairs in bind order. Names are stored without
/// the dialect prefix; rebinding a name overwrites in place.
#[derive(Debug, Clone, Default)]
pub struct ParamContext {
    params: Vec<(String, Value)>,
}

impl ParamContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value; an existing binding with the same name is replaced.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }

    /// Union with another context; existing names keep their value.
    pub fn merge(&mut self, other: &ParamContext) {
        for (name, value) in &other.params {
            if !self.params.iter().any(|(n, _)| n == name) {
                self.params.push((name.clone(), value.clone()));
            }
        }
    }

    pub fn as_slice(&self) -> &[(String, Value)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_order_preserved() {
        let mut ctx = ParamContext::new();
        ctx.bind("b", Value::Int(1));
        ctx.bind("a", Value::Int(2));
        let names: Vec<&str> = ctx.as_slice().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_rebind_overwrites_in_place() {
        let mut ctx = ParamContext::new();
        ctx.bind("a", Value::Int(1));
        ctx.bind("a", Value::Int(9));
        assert_eq!(ctx.as_slice(), &[("a".to_string(), Value::Int(9))]);
    }

    #[test]
    fn test_merge_keeps_existing() {
        let mut left = ParamContext::new();
        left.bind("a", Value::Int(1));
        let mut right = ParamContext::new();
        right.bind("a", Value::Int(2));
        right.bind("b", Value::Int(3));

        left.merge(&right);
        assert_eq!(
            left.as_slice(),
            &[
                ("a".to_string(), Value::Int(1)),
                ("b".to_string(), Value::Int(3)),
            ]
        );
    }
}
