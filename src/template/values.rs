//! Values captured for a prompt run, addressed by dotted variable path.
//!
//! Backed by a JSON object so hosts can hand over whatever their capture
//! layer produced (`{"env": {"clipboardText": "..."}}`) without conversion.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateValues {
    root: Map<String, Value>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON context. Anything other than an object is treated as empty.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(root) => Self { root },
            other => {
                log::warn!(
                    "[TEMPLATE] Ignoring non-object template context ({})",
                    json_kind(&other)
                );
                Self::default()
            }
        }
    }

    /// Set the value at a dotted `path`, creating intermediate objects.
    pub fn insert(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        let segments: Vec<&str> = path.split('.').collect();
        insert_at(&mut self.root, &segments, value.into());
        self
    }

    /// Text for a dotted `path`, or `None` when there is nothing printable.
    ///
    /// Strings render verbatim, numbers and booleans via `to_string`, arrays
    /// of scalars as a `", "`-joined list. Null, objects and mixed arrays
    /// count as missing.
    pub fn lookup(&self, path: &str) -> Option<String> {
        let mut segments = path.split('.');
        let mut value = self.root.get(segments.next()?)?;
        for segment in segments {
            value = value.get(segment)?;
        }
        match value {
            Value::Array(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(", ")),
            other => scalar_text(other),
        }
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.root
    }
}

fn insert_at(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.to_string(), value);
        }
        [first, rest @ ..] => {
            let slot = map
                .entry(*first)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Some(inner) = slot.as_object_mut() {
                insert_at(inner, rest, value);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
