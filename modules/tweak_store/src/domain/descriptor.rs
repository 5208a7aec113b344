//! Tweak descriptors and their type-erased handles
//!
//! A [`Tweak<T>`] is the strongly typed definition of one adjustable value.
//! Its [`AnyTweak`] handle carries the same identity plus a kind-tagged
//! [`DefaultData`], so tweaks of different value types can share one map.
//! The tagged data is built once, at construction, from the typed default.

use crate::contract::{
    Color, DefaultData, DescriptorError, NumericDefault, StoredValue, StringOption, TweakKind,
};
use super::validation::{self, SEPARATOR};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A value type a tweak can hold
pub trait TweakValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const KIND: TweakKind;

    fn into_stored(self) -> StoredValue;

    /// `None` when the stored value is of another kind
    fn from_stored(stored: &StoredValue) -> Option<Self>;

    /// Kind-tagged default data for a tweak with this default and bounds
    fn default_data(default: &Self, bounds: &Bounds<Self>) -> DefaultData;
}

/// Ordered numeric value types, the only ones accepting bounds and a step
pub trait NumericTweakValue: TweakValue + Copy + PartialOrd + fmt::Display {
    const ZERO: Self;
}

/// Optional numeric bounds and step of a tweak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub step: Option<T>,
}

impl<T> Bounds<T> {
    pub fn none() -> Self {
        Self {
            min: None,
            max: None,
            step: None,
        }
    }
}

impl<T: Copy> Bounds<T> {
    fn numeric_default(&self, default: T) -> NumericDefault<T> {
        NumericDefault {
            default,
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

impl TweakValue for bool {
    const KIND: TweakKind = TweakKind::Boolean;

    fn into_stored(self) -> StoredValue {
        StoredValue::Boolean(self)
    }

    fn from_stored(stored: &StoredValue) -> Option<Self> {
        match stored {
            StoredValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    fn default_data(default: &Self, _bounds: &Bounds<Self>) -> DefaultData {
        DefaultData::Boolean { default: *default }
    }
}

impl TweakValue for i64 {
    const KIND: TweakKind = TweakKind::Integer;

    fn into_stored(self) -> StoredValue {
        StoredValue::Integer(self)
    }

    fn from_stored(stored: &StoredValue) -> Option<Self> {
        match stored {
            StoredValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    fn default_data(default: &Self, bounds: &Bounds<Self>) -> DefaultData {
        DefaultData::Integer(bounds.numeric_default(*default))
    }
}

impl NumericTweakValue for i64 {
    const ZERO: Self = 0;
}

impl TweakValue for f32 {
    const KIND: TweakKind = TweakKind::Float;

    fn into_stored(self) -> StoredValue {
        StoredValue::Float(self)
    }

    fn from_stored(stored: &StoredValue) -> Option<Self> {
        match stored {
            StoredValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn default_data(default: &Self, bounds: &Bounds<Self>) -> DefaultData {
        DefaultData::Float(bounds.numeric_default(*default))
    }
}

impl NumericTweakValue for f32 {
    const ZERO: Self = 0.0;
}

impl TweakValue for f64 {
    const KIND: TweakKind = TweakKind::Double;

    fn into_stored(self) -> StoredValue {
        StoredValue::Double(self)
    }

    fn from_stored(stored: &StoredValue) -> Option<Self> {
        match stored {
            StoredValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    fn default_data(default: &Self, bounds: &Bounds<Self>) -> DefaultData {
        DefaultData::Double(bounds.numeric_default(*default))
    }
}

impl NumericTweakValue for f64 {
    const ZERO: Self = 0.0;
}

impl TweakValue for Color {
    const KIND: TweakKind = TweakKind::Color;

    fn into_stored(self) -> StoredValue {
        StoredValue::Color(self)
    }

    fn from_stored(stored: &StoredValue) -> Option<Self> {
        match stored {
            StoredValue::Color(value) => Some(*value),
            _ => None,
        }
    }

    fn default_data(default: &Self, _bounds: &Bounds<Self>) -> DefaultData {
        DefaultData::Color { default: *default }
    }
}

impl TweakValue for StringOption {
    const KIND: TweakKind = TweakKind::StringList;

    fn into_stored(self) -> StoredValue {
        StoredValue::StringList(self)
    }

    fn from_stored(stored: &StoredValue) -> Option<Self> {
        match stored {
            StoredValue::StringList(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Without an explicit option list the default is the only option
    fn default_data(default: &Self, _bounds: &Bounds<Self>) -> DefaultData {
        DefaultData::StringList {
            default: default.clone(),
            options: vec![default.0.clone()],
        }
    }
}

struct TweakInfo {
    collection: String,
    group: String,
    name: String,
    identity: String,
    default_data: DefaultData,
}

/// Type-erased tweak handle
///
/// Equality, ordering and hashing use the identity string only.
#[derive(Clone)]
pub struct AnyTweak {
    inner: Arc<TweakInfo>,
}

impl AnyTweak {
    fn new(names: Names, default_data: DefaultData) -> Self {
        Self {
            inner: Arc::new(TweakInfo {
                collection: names.collection,
                group: names.group,
                name: names.name,
                identity: names.identity,
                default_data,
            }),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.inner.collection
    }

    pub fn group_name(&self) -> &str {
        &self.inner.group
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// `collection|group|name`
    pub fn identity(&self) -> &str {
        &self.inner.identity
    }

    pub fn kind(&self) -> TweakKind {
        self.inner.default_data.kind()
    }

    pub fn default_data(&self) -> &DefaultData {
        &self.inner.default_data
    }
}

impl PartialEq for AnyTweak {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for AnyTweak {}

impl Hash for AnyTweak {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for AnyTweak {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnyTweak {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.identity().cmp(other.identity())
    }
}

impl fmt::Debug for AnyTweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyTweak")
            .field("identity", &self.identity())
            .field("default_data", self.default_data())
            .finish()
    }
}

struct Names {
    collection: String,
    group: String,
    name: String,
    identity: String,
}

impl Names {
    fn new(collection: String, group: String, name: String) -> Result<Self, DescriptorError> {
        validation::validate_name("collection", &collection)?;
        validation::validate_name("group", &group)?;
        validation::validate_name("name", &name)?;

        let identity = format!("{collection}{SEPARATOR}{group}{SEPARATOR}{name}");
        Ok(Self {
            collection,
            group,
            name,
            identity,
        })
    }

    fn of(tweak: &AnyTweak) -> Self {
        Self {
            collection: tweak.collection_name().to_string(),
            group: tweak.group_name().to_string(),
            name: tweak.name().to_string(),
            identity: tweak.identity().to_string(),
        }
    }
}

/// Definition of one tweakable value
///
/// Immutable once built. Two tweaks with the same collection, group and name
/// are equal regardless of their defaults.
#[derive(Clone)]
pub struct Tweak<T: TweakValue> {
    default: T,
    bounds: Bounds<T>,
    erased: AnyTweak,
}

impl<T: TweakValue> Tweak<T> {
    /// Build a tweak, panicking on an invalid definition
    ///
    /// # Panics
    /// If any name contains the `|` separator.
    pub fn new(
        collection: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        default: T,
    ) -> Self {
        or_panic(Self::try_new(collection, group, name, default))
    }

    pub fn try_new(
        collection: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        default: T,
    ) -> Result<Self, DescriptorError> {
        let names = Names::new(collection.into(), group.into(), name.into())?;
        let bounds = Bounds::none();
        let default_data = T::default_data(&default, &bounds);
        Ok(Self::assemble(names, default, bounds, default_data))
    }

    fn assemble(names: Names, default: T, bounds: Bounds<T>, default_data: DefaultData) -> Self {
        Self {
            default,
            bounds,
            erased: AnyTweak::new(names, default_data),
        }
    }

    pub fn collection_name(&self) -> &str {
        self.erased.collection_name()
    }

    pub fn group_name(&self) -> &str {
        self.erased.group_name()
    }

    pub fn name(&self) -> &str {
        self.erased.name()
    }

    pub fn identity(&self) -> &str {
        self.erased.identity()
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn min_value(&self) -> Option<&T> {
        self.bounds.min.as_ref()
    }

    pub fn max_value(&self) -> Option<&T> {
        self.bounds.max.as_ref()
    }

    pub fn step_size(&self) -> Option<&T> {
        self.bounds.step.as_ref()
    }

    pub fn default_data(&self) -> &DefaultData {
        self.erased.default_data()
    }

    /// Type-erased handle sharing this tweak's identity
    pub fn erase(&self) -> AnyTweak {
        self.erased.clone()
    }
}

impl<T: NumericTweakValue> Tweak<T> {
    /// Build a tweak bounded by `min..=max`
    ///
    /// # Panics
    /// If a name contains the separator, `min > max`, or the default lies
    /// outside the bounds.
    pub fn bounded(
        collection: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        default: T,
        min: T,
        max: T,
    ) -> Self {
        or_panic(Self::try_bounded(
            collection,
            group,
            name,
            default,
            Some(min),
            Some(max),
            None,
        ))
    }

    pub fn try_bounded(
        collection: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        default: T,
        min: Option<T>,
        max: Option<T>,
        step: Option<T>,
    ) -> Result<Self, DescriptorError> {
        let names = Names::new(collection.into(), group.into(), name.into())?;
        Self::with_bounds(names, default, Bounds { min, max, step })
    }

    /// Same tweak with a step size
    ///
    /// # Panics
    /// If `step` is not positive.
    pub fn with_step(self, step: T) -> Self {
        or_panic(self.try_with_step(step))
    }

    pub fn try_with_step(self, step: T) -> Result<Self, DescriptorError> {
        let bounds = Bounds {
            step: Some(step),
            ..self.bounds
        };
        Self::with_bounds(Names::of(&self.erased), self.default, bounds)
    }

    fn with_bounds(names: Names, default: T, bounds: Bounds<T>) -> Result<Self, DescriptorError> {
        validation::validate_bounds(
            &names.identity,
            default,
            bounds.min,
            bounds.max,
            bounds.step,
            T::ZERO,
        )?;
        let default_data = T::default_data(&default, &bounds);
        Ok(Self::assemble(names, default, bounds, default_data))
    }
}

impl Tweak<StringOption> {
    /// Build a tweak choosing one of `options`
    ///
    /// # Panics
    /// If a name contains the separator or `default` is not one of `options`.
    pub fn string_list<I, S>(
        collection: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        options: I,
        default: impl Into<StringOption>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        or_panic(Self::try_string_list(
            collection, group, name, options, default,
        ))
    }

    pub fn try_string_list<I, S>(
        collection: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        options: I,
        default: impl Into<StringOption>,
    ) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = Names::new(collection.into(), group.into(), name.into())?;
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let default = default.into();
        validation::validate_option(&names.identity, default.as_str(), &options)?;

        let default_data = DefaultData::StringList {
            default: default.clone(),
            options,
        };
        Ok(Self::assemble(names, default, Bounds::none(), default_data))
    }

    pub fn options(&self) -> &[String] {
        match self.default_data() {
            DefaultData::StringList { options, .. } => options,
            _ => &[],
        }
    }
}

impl<T: TweakValue> PartialEq for Tweak<T> {
    fn eq(&self, other: &Self) -> bool {
        self.erased == other.erased
    }
}

impl<T: TweakValue> Eq for Tweak<T> {}

impl<T: TweakValue> Hash for Tweak<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.erased.hash(state);
    }
}

impl<T: TweakValue> fmt::Debug for Tweak<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweak")
            .field("identity", &self.identity())
            .field("default", &self.default)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl<T: TweakValue> From<&Tweak<T>> for AnyTweak {
    fn from(tweak: &Tweak<T>) -> Self {
        tweak.erase()
    }
}

impl From<&AnyTweak> for AnyTweak {
    fn from(tweak: &AnyTweak) -> Self {
        tweak.clone()
    }
}

impl<T: TweakValue> From<Tweak<T>> for AnyTweak {
    fn from(tweak: Tweak<T>) -> Self {
        tweak.erased
    }
}

fn or_panic<T>(result: Result<T, DescriptorError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("invalid tweak definition: {err}"),
    }
}
