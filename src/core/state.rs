//! Live process variables
//!
//! [`ProcessState`] holds one typed slot per declared variable, plus any extra
//! values hooks choose to derive. Before reconciliation a slot holds the
//! compiled-in default; afterwards it holds the resolved value. The engine is
//! the only writer during a run.

use crate::config::ConfigSchema;
use crate::domain::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Named, typed variables in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProcessState {
    values: IndexMap<String, Value>,
}

impl ProcessState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Stores `value` under `name`, returning the previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_bool()
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_int()
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_float()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name)?.as_list()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Declared variables that have no slot
    pub fn missing_from(&self, schema: &ConfigSchema) -> Vec<String> {
        schema
            .sections()
            .iter()
            .flat_map(|s| s.variables.iter())
            .filter(|v| !self.contains(&v.name))
            .map(|v| v.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VarKind;

    #[test]
    fn test_set_returns_previous() {
        let mut state = ProcessState::new().with("var2", 2_i64);
        assert_eq!(state.set("var2", 5_i64), Some(Value::Int(2)));
        assert_eq!(state.get_int("var2"), Some(5));
    }

    #[test]
    fn test_typed_getters() {
        let state = ProcessState::new()
            .with("var1", true)
            .with("var3", 3.4)
            .with("m1", "textm1")
            .with("m2", vec!["m2-1", "m2-2"]);
        assert_eq!(state.get_bool("var1"), Some(true));
        assert_eq!(state.get_float("var3"), Some(3.4));
        assert_eq!(state.get_str("m1"), Some("textm1"));
        assert_eq!(state.get_list("m2").map(<[String]>::len), Some(2));
        // wrong kind
        assert_eq!(state.get_int("var1"), None);
    }

    #[test]
    fn test_missing_from_schema() {
        let schema = ConfigSchema::default()
            .with_section("MAIN", [("var1", VarKind::Bool), ("var2", VarKind::Int)]);
        let state = ProcessState::new().with("var1", false);
        assert_eq!(state.missing_from(&schema), vec!["var2".to_string()]);
    }

    #[test]
    fn test_serializes_as_object() {
        let state = ProcessState::new().with("a", 1_i64).with("b", "x");
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"a":1,"b":"x"}"#);
    }
}
