//! The ordered set of named bindings handed to the pipeline script.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One binding in the command plan.
///
/// Downstream scripts branch on variable *presence*, not emptiness, so an
/// explicitly absent binding must stay distinct from an empty string.
/// `Unset` is recorded in the plan but never exported to the script's
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Exported to the script environment, possibly as an empty string.
    Value(String),
    /// Recorded as deliberately absent; not exported.
    Unset,
}

/// Insertion-ordered mapping from binding name to [`Binding`].
///
/// Downstream scripts assume each variable is set at most once, so a
/// second bind to the same name is a programming error and panics.
#[derive(Debug, Clone, Default)]
pub struct CommandPlan {
    entries: IndexMap<String, Binding>,
}

impl CommandPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already bound.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), Binding::Value(value.into()));
    }

    /// Bind `name` to a value, or record it as explicitly absent.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already bound.
    pub fn bind_opt(&mut self, name: impl Into<String>, value: Option<String>) {
        let binding = match value {
            Some(v) => Binding::Value(v),
            None => Binding::Unset,
        };
        self.insert(name.into(), binding);
    }

    fn insert(&mut self, name: String, binding: Binding) {
        assert!(
            !self.entries.contains_key(&name),
            "plan binding {name} set twice"
        );
        self.entries.insert(name, binding);
    }

    /// The bound value, if `name` carries one.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.entries.get(name) {
            Some(Binding::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Whether `name` is bound to a value (not unset, not missing).
    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Binding::Value(_)))
    }

    /// Whether `name` appears in the plan at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The bindings exported to the script environment, in plan order.
    pub fn env_vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            Binding::Value(value) => Some((k.as_str(), value.as_str())),
            Binding::Unset => None,
        })
    }
}

impl Serialize for CommandPlan {
    /// Serializes as an object in plan order; unset bindings become `null`
    /// so inspection output still distinguishes them from empty strings.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, binding) in &self.entries {
            match binding {
                Binding::Value(v) => map.serialize_entry(name, v)?,
                Binding::Unset => map.serialize_entry(name, &Option::<String>::None)?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_keep_insertion_order() {
        let mut plan = CommandPlan::new();
        plan.bind("TMP_PATH", "/tmp/ws");
        plan.bind("RESULTS", "res");
        plan.bind("RUNNER", "");

        let names: Vec<&str> = plan.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["TMP_PATH", "RESULTS", "RUNNER"]);
    }

    #[test]
    #[should_panic(expected = "set twice")]
    fn duplicate_bind_panics() {
        let mut plan = CommandPlan::new();
        plan.bind("NUM_IT", "3");
        plan.bind("NUM_IT", "3");
    }

    #[test]
    #[should_panic(expected = "set twice")]
    fn duplicate_bind_opt_panics() {
        let mut plan = CommandPlan::new();
        plan.bind("INDEXEXT", ".idx");
        plan.bind_opt("INDEXEXT", None);
    }

    #[test]
    fn unset_is_recorded_but_not_exported() {
        let mut plan = CommandPlan::new();
        plan.bind_opt("INDEXEXT", None);
        plan.bind("RUNNER", "");

        assert!(plan.contains("INDEXEXT"));
        assert!(!plan.is_bound("INDEXEXT"));
        assert_eq!(plan.value("INDEXEXT"), None);

        let env: Vec<(&str, &str)> = plan.env_vars().collect();
        assert_eq!(env, [("RUNNER", "")]);
    }

    #[test]
    fn empty_string_is_distinct_from_unset() {
        let mut plan = CommandPlan::new();
        plan.bind("RUNNER", "");
        plan.bind_opt("REMOVE_TMP", None);

        assert!(plan.is_bound("RUNNER"));
        assert_eq!(plan.value("RUNNER"), Some(""));
        assert!(!plan.is_bound("REMOVE_TMP"));
    }

    #[test]
    fn serializes_in_order_with_null_for_unset() {
        let mut plan = CommandPlan::new();
        plan.bind("TMP_PATH", "/tmp/ws");
        plan.bind_opt("INDEXEXT", None);
        plan.bind("NUM_IT", "3");

        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(
            json,
            r#"{"TMP_PATH":"/tmp/ws","INDEXEXT":null,"NUM_IT":"3"}"#
        );
    }
}
