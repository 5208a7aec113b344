//! Contract models for the tweak store
//!
//! These models are transport-agnostic and shared between the store and
//! editing surfaces.
//! NO serde derives - the on-disk representation lives in infra/storage.

use std::fmt;
use std::str::FromStr;

/// Semantic kind of a tweakable value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TweakKind {
    Boolean,
    Integer,
    Float,
    Double,
    Color,
    StringList,
}

impl TweakKind {
    /// Whether the kind accepts min/max/step
    pub fn is_ordered_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Double)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::Color => "color",
            Self::StringList => "string_list",
        }
    }
}

impl fmt::Display for TweakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 0xFF)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |index: usize| u8::from_str_radix(&digits[index..index + 2], 16).ok();

        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Always `#RRGGBBAA`, upper case
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid hex color '{}'", s))
    }
}

/// Value of a string-list tweak: one entry of the descriptor's options
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringOption(pub String);

impl StringOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StringOption {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StringOption {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for StringOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value as held by the persistence port
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Boolean(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    Color(Color),
    StringList(StringOption),
}

impl StoredValue {
    pub fn kind(&self) -> TweakKind {
        match self {
            Self::Boolean(_) => TweakKind::Boolean,
            Self::Integer(_) => TweakKind::Integer,
            Self::Float(_) => TweakKind::Float,
            Self::Double(_) => TweakKind::Double,
            Self::Color(_) => TweakKind::Color,
            Self::StringList(_) => TweakKind::StringList,
        }
    }
}

/// Default and bounds of an ordered numeric tweak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDefault<T> {
    pub default: T,
    pub min: Option<T>,
    pub max: Option<T>,
    pub step: Option<T>,
}

/// Kind-tagged default data of a tweak, usable without knowing its concrete type
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultData {
    Boolean { default: bool },
    Integer(NumericDefault<i64>),
    Float(NumericDefault<f32>),
    Double(NumericDefault<f64>),
    Color { default: Color },
    StringList {
        default: StringOption,
        options: Vec<String>,
    },
}

impl DefaultData {
    pub fn kind(&self) -> TweakKind {
        match self {
            Self::Boolean { .. } => TweakKind::Boolean,
            Self::Integer(_) => TweakKind::Integer,
            Self::Float(_) => TweakKind::Float,
            Self::Double(_) => TweakKind::Double,
            Self::Color { .. } => TweakKind::Color,
            Self::StringList { .. } => TweakKind::StringList,
        }
    }

    /// The default as a storable value
    pub fn default_value(&self) -> StoredValue {
        match self {
            Self::Boolean { default } => StoredValue::Boolean(*default),
            Self::Integer(data) => StoredValue::Integer(data.default),
            Self::Float(data) => StoredValue::Float(data.default),
            Self::Double(data) => StoredValue::Double(data.default),
            Self::Color { default } => StoredValue::Color(*default),
            Self::StringList { default, .. } => StoredValue::StringList(default.clone()),
        }
    }
}

/// Current value of a tweak alongside its default, for editing surfaces
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayData {
    Boolean { value: bool, default: bool },
    Integer { value: i64, default: i64 },
    Float { value: f32, default: f32 },
    Double { value: f64, default: f64 },
    Color { value: Color, default: Color },
    StringList {
        value: StringOption,
        default: StringOption,
        options: Vec<String>,
    },
}

impl DisplayData {
    pub fn kind(&self) -> TweakKind {
        match self {
            Self::Boolean { .. } => TweakKind::Boolean,
            Self::Integer { .. } => TweakKind::Integer,
            Self::Float { .. } => TweakKind::Float,
            Self::Double { .. } => TweakKind::Double,
            Self::Color { .. } => TweakKind::Color,
            Self::StringList { .. } => TweakKind::StringList,
        }
    }

    /// Whether the current value equals the default ("reset to default" affordance)
    pub fn is_default(&self) -> bool {
        match self {
            Self::Boolean { value, default } => value == default,
            Self::Integer { value, default } => value == default,
            Self::Float { value, default } => value == default,
            Self::Double { value, default } => value == default,
            Self::Color { value, default } => value == default,
            Self::StringList { value, default, .. } => value == default,
        }
    }

    /// The current value as a storable value
    pub fn value(&self) -> StoredValue {
        match self {
            Self::Boolean { value, .. } => StoredValue::Boolean(*value),
            Self::Integer { value, .. } => StoredValue::Integer(*value),
            Self::Float { value, .. } => StoredValue::Float(*value),
            Self::Double { value, .. } => StoredValue::Double(*value),
            Self::Color { value, .. } => StoredValue::Color(*value),
            Self::StringList { value, .. } => StoredValue::StringList(value.clone()),
        }
    }

    pub fn into_value(self) -> StoredValue {
        match self {
            Self::StringList { value, .. } => StoredValue::StringList(value),
            other => other.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::rgba(0x12, 0xAB, 0xCD, 0x80);
        assert_eq!(color.to_hex(), "#12ABCD80");
        assert_eq!(Color::from_hex("#12abcd80"), Some(color));
    }

    #[test]
    fn test_color_six_digit_hex_is_opaque() {
        assert_eq!(Color::from_hex("FFFFFF"), Some(Color::WHITE));
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn test_color_rejects_malformed_hex() {
        assert!(Color::from_hex("#FFF").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("#FFFFFFFFFF").is_none());
        assert!(Color::from_hex("#ÿÿÿ").is_none());
        assert!(Color::from_hex("#+F+F+F").is_none());
        assert!(Color::from_hex("+FFFFFFF").is_none());
    }

    #[test]
    fn test_ordered_numeric_kinds() {
        assert!(TweakKind::Integer.is_ordered_numeric());
        assert!(TweakKind::Float.is_ordered_numeric());
        assert!(TweakKind::Double.is_ordered_numeric());
        assert!(!TweakKind::Boolean.is_ordered_numeric());
        assert!(!TweakKind::Color.is_ordered_numeric());
        assert!(!TweakKind::StringList.is_ordered_numeric());
    }

    #[test]
    fn test_display_data_is_default() {
        let data = DisplayData::Integer {
            value: 3,
            default: 3,
        };
        assert!(data.is_default());
        assert_eq!(data.value(), StoredValue::Integer(3));

        let data = DisplayData::Color {
            value: Color::BLACK,
            default: Color::WHITE,
        };
        assert!(!data.is_default());
        assert_eq!(data.kind(), TweakKind::Color);
    }

    #[test]
    fn test_default_data_default_value_matches_kind() {
        let data = DefaultData::StringList {
            default: StringOption::from("dark"),
            options: vec!["light".to_string(), "dark".to_string()],
        };
        assert_eq!(data.kind(), TweakKind::StringList);
        assert_eq!(data.default_value().kind(), TweakKind::StringList);
    }
}
