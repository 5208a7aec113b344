//! Record to model mappers
//!
//! Conversions between on-disk records and contract values

use super::entity::ValueRecord;
use crate::contract::{Color, StoredValue, StringOption};

impl From<&StoredValue> for ValueRecord {
    fn from(value: &StoredValue) -> Self {
        match value {
            StoredValue::Boolean(value) => Self::Boolean(*value),
            StoredValue::Integer(value) => Self::Integer(*value),
            StoredValue::Float(value) => Self::Float(*value),
            StoredValue::Double(value) => Self::Double(*value),
            StoredValue::Color(color) => Self::Color(color.to_hex()),
            StoredValue::StringList(option) => Self::StringList(option.0.clone()),
        }
    }
}

impl TryFrom<ValueRecord> for StoredValue {
    type Error = anyhow::Error;

    fn try_from(record: ValueRecord) -> Result<Self, Self::Error> {
        let value = match record {
            ValueRecord::Boolean(value) => Self::Boolean(value),
            ValueRecord::Integer(value) => Self::Integer(value),
            ValueRecord::Float(value) => Self::Float(value),
            ValueRecord::Double(value) => Self::Double(value),
            ValueRecord::Color(hex) => Self::Color(
                Color::from_hex(&hex).ok_or_else(|| anyhow::anyhow!("invalid color '{}'", hex))?,
            ),
            ValueRecord::StringList(value) => Self::StringList(StringOption(value)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_maps_through_hex() {
        let value = StoredValue::Color(Color::rgba(1, 2, 3, 4));
        let record = ValueRecord::from(&value);
        assert_eq!(record, ValueRecord::Color("#01020304".to_string()));
        assert_eq!(StoredValue::try_from(record).unwrap(), value);
    }

    #[test]
    fn test_invalid_color_record_fails() {
        let result = StoredValue::try_from(ValueRecord::Color("teal".to_string()));
        assert!(result.is_err());
    }
}
