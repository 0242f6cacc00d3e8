use crate::error::{Error, Result};
use serde_json::{Map, Value, json};

/// Layered JSON configuration addressed by dotted paths, e.g. `layout.minClusterDistance`.
///
/// The root is always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationConfig(Map<String, Value>);

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ConstellationConfig {
    /// Built-in values every loaded config is merged over.
    pub fn defaults() -> Self {
        let mut config = Self(Map::new());
        for (path, value) in [
            ("layout.seed", Value::Null),
            ("layout.minClusterDistance", json!(10.0)),
            ("layout.maxClusterDistance", json!(20.0)),
            ("layout.verticalJitter", json!(5.0)),
            ("layout.maxPlacementAttempts", json!(200)),
            ("layout.attractionBlend", json!(0.1)),
            ("layout.shellMin", json!(1.0)),
            ("layout.shellExtra", json!(1.5)),
            ("clustering.enabled", json!(true)),
            ("conversion.mythology", json!("Greek")),
            ("conversion.startId", json!(1)),
        ] {
            config.set_value(path, value);
        }
        config
    }

    /// Wraps `value` as is, without the defaults. Anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        into_table(value).map(Self)
    }

    /// Parses a JSON document and merges it over [`ConstellationConfig::defaults`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides = into_table(serde_json::from_str(text)?)?;
        let mut config = Self::defaults();
        config.deep_merge(&overrides);
        Ok(config)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut segments = dotted_path.split('.');
        let mut cur = self.0.get(segments.next()?)?;
        for segment in segments {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.lookup(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?.as_f64()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.lookup(dotted_path)?.as_u64()
    }

    /// Number at `dotted_path`, `default` when the key is absent or `null`.
    pub fn f64_or(&self, dotted_path: &str, default: f64) -> Result<f64> {
        match self.lookup(dotted_path) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v.as_f64().ok_or_else(|| invalid(dotted_path, "a number", v)),
        }
    }

    /// Unsigned integer at `dotted_path`, `None` when the key is absent or `null`.
    pub fn optional_u64(&self, dotted_path: &str) -> Result<Option<u64>> {
        match self.lookup(dotted_path) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_u64()
                .map(Some)
                .ok_or_else(|| invalid(dotted_path, "an unsigned integer", v)),
        }
    }

    pub fn bool_or(&self, dotted_path: &str, default: bool) -> Result<bool> {
        match self.lookup(dotted_path) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| invalid(dotted_path, "a boolean", v)),
        }
    }

    /// Writes `value` at `dotted_path`. Intermediate keys holding something other than an object
    /// are replaced by one.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let segments: Vec<&str> = dotted_path.split('.').collect();
        insert_at(&mut self.0, &segments, value);
    }

    /// Objects merge key by key; any other value in `overrides` replaces what is there.
    pub fn deep_merge(&mut self, overrides: &Map<String, Value>) {
        merge_table(&mut self.0, overrides);
    }
}

fn into_table(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(table) => Ok(table),
        other => Err(invalid("", "a JSON object at the top level", &other)),
    }
}

fn invalid(path: &str, expected: &str, found: &Value) -> Error {
    Error::InvalidConfig {
        path: path.to_string(),
        message: format!("expected {expected}, found {found}"),
    }
}

fn insert_at(table: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [leaf] => {
            table.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = table.entry(*head).or_insert(Value::Null);
            if let Value::Object(child) = slot {
                insert_at(child, rest, value);
            } else {
                let mut child = Map::new();
                insert_at(&mut child, rest, value);
                *slot = Value::Object(child);
            }
        }
    }
}

fn merge_table(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => merge_table(existing, nested),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_expose_layout_and_conversion_keys() {
        let config = ConstellationConfig::defaults();
        assert_eq!(config.get_f64("layout.minClusterDistance"), Some(10.0));
        assert_eq!(config.get_u64("layout.maxPlacementAttempts"), Some(200));
        assert_eq!(config.get_bool("clustering.enabled"), Some(true));
        assert_eq!(config.get_str("conversion.mythology"), Some("Greek"));
        assert_eq!(config.optional_u64("layout.seed").unwrap(), None);
        assert!(config.as_map()["layout"]["seed"].is_null());
    }

    #[test]
    fn overrides_merge_without_dropping_siblings() {
        let config = ConstellationConfig::from_json_str(
            r#"{"layout": {"seed": 42, "shellMin": 2}, "clustering": {"enabled": false}}"#,
        )
        .unwrap();
        assert_eq!(config.optional_u64("layout.seed").unwrap(), Some(42));
        assert_eq!(config.f64_or("layout.shellMin", 0.0).unwrap(), 2.0);
        assert_eq!(config.get_f64("layout.maxClusterDistance"), Some(20.0));
        assert!(!config.bool_or("clustering.enabled", true).unwrap());
    }

    #[test]
    fn scalar_overrides_replace_whole_sections() {
        let config = ConstellationConfig::from_json_str(r#"{"conversion": "Norse"}"#).unwrap();
        assert_eq!(config.get_str("conversion"), Some("Norse"));
        assert_eq!(config.get_str("conversion.mythology"), None);
        assert_eq!(config.get_f64("layout.verticalJitter"), Some(5.0));
    }

    #[test]
    fn wrongly_typed_values_name_their_path() {
        let config =
            ConstellationConfig::from_json_str(r#"{"layout": {"attractionBlend": "high"}}"#)
                .unwrap();
        let err = config.f64_or("layout.attractionBlend", 0.1).unwrap_err();
        match err {
            Error::InvalidConfig { path, .. } => assert_eq!(path, "layout.attractionBlend"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(ConstellationConfig::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn only_objects_become_configs() {
        assert!(ConstellationConfig::from_value(json!({})).is_ok());
        for value in [Value::Null, json!([1]), json!("layout")] {
            match ConstellationConfig::from_value(value) {
                Err(Error::InvalidConfig { path, .. }) => assert_eq!(path, ""),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut config = ConstellationConfig::from_value(json!({"layout": 3})).unwrap();
        config.set_value("conversion.startId", json!(100));
        config.set_value("layout.seed", json!(9));
        assert_eq!(config.get_u64("conversion.startId"), Some(100));
        assert_eq!(config.get_u64("layout.seed"), Some(9));
        assert_eq!(config.f64_or("layout.verticalJitter", 5.0).unwrap(), 5.0);
    }
}
