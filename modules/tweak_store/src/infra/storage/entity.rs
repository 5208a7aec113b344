//! On-disk records of persisted tweak values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One persisted value, tagged with its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValueRecord {
    Boolean(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    /// `#RRGGBBAA`
    Color(String),
    StringList(String),
}

/// Whole JSON document of one store
///
/// Values stay raw JSON here so a single undecodable record does not
/// invalidate the rest of the file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TweakDocument {
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_json_shape() {
        let record = ValueRecord::Color("#FFFFFFFF".to_string());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"kind": "color", "value": "#FFFFFFFF"})
        );

        let record: ValueRecord =
            serde_json::from_value(json!({"kind": "string_list", "value": "dark"})).unwrap();
        assert_eq!(record, ValueRecord::StringList("dark".to_string()));
    }

    #[test]
    fn test_document_without_values() {
        let document: TweakDocument = serde_json::from_str("{}").unwrap();
        assert!(document.values.is_empty());
    }
}
