use super::ExceptionValue;
use serde_json::Value;

/// Finding identifiers mapped to their exception records, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionConfig {
    entries: Vec<(String, ExceptionValue)>,
}

impl ExceptionConfig {
    /// Build a configuration from a decoded JSON document.
    ///
    /// Only a JSON object describes a configuration; `false`, `null`, and every other
    /// non-object document mean there is no configuration.
    #[must_use]
    pub fn from_json(document: &Value) -> Option<Self> {
        let Value::Object(map) = document else {
            return None;
        };

        Some(
            map.iter()
                .map(|(id, value)| (id.clone(), ExceptionValue::from_value(value)))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExceptionValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExceptionValue> {
        self.entries.iter().find(|(key, _)| key == id).map(|(_, value)| value)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ExceptionValue)> for ExceptionConfig {
    fn from_iter<T: IntoIterator<Item = (String, ExceptionValue)>>(iter: T) -> Self {
        let mut entries: Vec<(String, ExceptionValue)> = Vec::new();
        for (id, value) in iter {
            if let Some(existing) = entries.iter_mut().find(|(key, _)| *key == id) {
                existing.1 = value;
            } else {
                entries.push((id, value));
            }
        }

        Self { entries }
    }
}
