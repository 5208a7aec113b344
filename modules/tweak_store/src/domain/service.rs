//! Tweak store - value resolution and change notification

use super::bindings::{BindingIndex, ClusterBinding, ClusterKey, ValueBinding};
use super::descriptor::{AnyTweak, Tweak, TweakValue};
use super::hierarchy::{Hierarchy, TweakCollection};
use super::repository::TweakPersistence;
use super::validation::SEPARATOR;
use crate::config::Config;
use crate::contract::{DefaultData, DisplayData, StoredValue, TweakEditor, TweakError};
use crate::infra::storage::{InMemoryPersistence, JsonFilePersistence};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Hierarchical registry of tweaks with persisted overrides and bindings
///
/// Bindings are invoked synchronously on the calling thread, outside of the
/// store's internal lock, so a callback may read or write the store.
pub struct TweakStore {
    store_name: String,
    editing_enabled: bool,
    hierarchy: Hierarchy,
    persistence: Arc<dyn TweakPersistence>,
    bindings: RwLock<BindingIndex>,
}

impl TweakStore {
    /// Build a store using the persistence the config selects
    pub fn new<I>(tweaks: I, config: Config) -> Result<Self, TweakError>
    where
        I: IntoIterator<Item = AnyTweak>,
    {
        config.validate()?;

        let persistence: Arc<dyn TweakPersistence> = match config.persistence_path() {
            Some(path) => {
                Arc::new(JsonFilePersistence::open(path).map_err(TweakError::Persistence)?)
            }
            None => Arc::new(InMemoryPersistence::new()),
        };

        Ok(Self::with_persistence(tweaks, config, persistence))
    }

    /// Build a store on top of an existing persistence port
    pub fn with_persistence<I>(
        tweaks: I,
        config: Config,
        persistence: Arc<dyn TweakPersistence>,
    ) -> Self
    where
        I: IntoIterator<Item = AnyTweak>,
    {
        let hierarchy = Hierarchy::build(tweaks);

        tracing::info!(
            store = %config.store_name,
            tweaks = hierarchy.len(),
            editing_enabled = config.editing_enabled,
            "tweak store initialized"
        );

        Self {
            store_name: config.store_name,
            editing_enabled: config.editing_enabled,
            hierarchy,
            persistence,
            bindings: RwLock::new(BindingIndex::default()),
        }
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn editing_enabled(&self) -> bool {
        self.editing_enabled
    }

    // ===== Hierarchy =====

    /// Collections sorted by name
    pub fn collections(&self) -> impl Iterator<Item = &TweakCollection> {
        self.hierarchy.collections()
    }

    pub fn collection(&self, name: &str) -> Option<&TweakCollection> {
        self.hierarchy.collection(name)
    }

    /// Every registered tweak: collections, then groups, then tweaks, sorted by name
    pub fn tweaks(&self) -> impl Iterator<Item = &AnyTweak> {
        self.hierarchy.tweaks()
    }

    /// Look up a registered tweak by `collection|group|name`
    pub fn tweak(&self, identity: &str) -> Option<&AnyTweak> {
        let mut parts = identity.splitn(3, SEPARATOR);
        let (collection, group, name) = (parts.next()?, parts.next()?, parts.next()?);
        self.hierarchy.find(collection, group, name)
    }

    // ===== Values =====

    /// Persisted override of a tweak, or its default
    ///
    /// With editing disabled the default is returned unconditionally. A
    /// persisted value of another kind counts as absent.
    pub fn current_value<T: TweakValue>(&self, tweak: &Tweak<T>) -> Result<T, TweakError> {
        self.resolve(tweak.identity(), tweak.default_value())
    }

    /// Current value and default of a tweak, tagged with its kind
    pub fn current_display_data(&self, tweak: &AnyTweak) -> Result<DisplayData, TweakError> {
        let identity = tweak.identity();

        let data = match tweak.default_data() {
            DefaultData::Boolean { default } => DisplayData::Boolean {
                value: self.resolve(identity, default)?,
                default: *default,
            },
            DefaultData::Integer(numeric) => DisplayData::Integer {
                value: self.resolve(identity, &numeric.default)?,
                default: numeric.default,
            },
            DefaultData::Float(numeric) => DisplayData::Float {
                value: self.resolve(identity, &numeric.default)?,
                default: numeric.default,
            },
            DefaultData::Double(numeric) => DisplayData::Double {
                value: self.resolve(identity, &numeric.default)?,
                default: numeric.default,
            },
            DefaultData::Color { default } => DisplayData::Color {
                value: self.resolve(identity, default)?,
                default: *default,
            },
            DefaultData::StringList { default, options } => DisplayData::StringList {
                value: self.resolve(identity, default)?,
                default: default.clone(),
                options: options.clone(),
            },
        };

        Ok(data)
    }

    /// Whether a value of the tweak's kind is persisted and in effect
    pub fn is_overridden(&self, tweak: &AnyTweak) -> Result<bool, TweakError> {
        if !self.editing_enabled {
            return Ok(false);
        }

        let stored = self
            .persistence
            .get(tweak.identity())
            .map_err(TweakError::Persistence)?;
        Ok(stored.is_some_and(|value| value.kind() == tweak.kind()))
    }

    fn resolve<T: TweakValue>(&self, identity: &str, default: &T) -> Result<T, TweakError> {
        if !self.editing_enabled {
            return Ok(default.clone());
        }

        let Some(stored) = self
            .persistence
            .get(identity)
            .map_err(TweakError::Persistence)?
        else {
            return Ok(default.clone());
        };

        match T::from_stored(&stored) {
            Some(value) => Ok(value),
            None => {
                tracing::debug!(
                    identity,
                    expected = %T::KIND,
                    found = %stored.kind(),
                    "persisted value has another kind, using default"
                );
                Ok(default.clone())
            }
        }
    }

    // ===== Mutation =====

    /// Persist a value from an editing surface and notify its observers
    pub fn set_value(&self, data: DisplayData, tweak: &AnyTweak) -> Result<(), TweakError> {
        if data.kind() != tweak.kind() {
            return Err(TweakError::KindMismatch {
                identity: tweak.identity().to_string(),
                expected: tweak.kind(),
                found: data.kind(),
            });
        }

        self.write(tweak.identity(), data.into_value())
    }

    /// Typed counterpart of [`TweakStore::set_value`]
    pub fn set<T: TweakValue>(&self, tweak: &Tweak<T>, value: T) -> Result<(), TweakError> {
        self.write(tweak.identity(), value.into_stored())
    }

    fn write(&self, identity: &str, value: StoredValue) -> Result<(), TweakError> {
        tracing::debug!(store = %self.store_name, identity, ?value, "setting tweak value");

        self.persistence
            .set(identity, value)
            .map_err(TweakError::Persistence)?;
        self.notify(identity)
    }

    /// Clear every persisted override, then notify the observers of every tweak
    pub fn reset(&self) -> Result<(), TweakError> {
        self.persistence
            .clear_all()
            .map_err(TweakError::Persistence)?;

        tracing::info!(store = %self.store_name, "tweak store reset to defaults");

        for tweak in self.hierarchy.tweaks() {
            self.notify(tweak.identity())?;
        }
        Ok(())
    }

    // ===== Bindings =====

    /// Observe a tweak
    ///
    /// `callback` runs once before this returns, with the current value, and
    /// again after every change of the tweak. Bindings live as long as the store.
    pub fn bind<T, F>(&self, tweak: &Tweak<T>, callback: F) -> Result<(), TweakError>
    where
        T: TweakValue,
        F: Fn(T) + Send + Sync + 'static,
    {
        let identity = tweak.identity().to_string();
        let tweak = tweak.clone();
        let binding: ValueBinding = Arc::new(move |store: &TweakStore| {
            callback(store.current_value(&tweak)?);
            Ok(())
        });

        self.bindings.write().add_value(&identity, Arc::clone(&binding));
        tracing::debug!(store = %self.store_name, identity = %identity, "tweak bound");

        binding(self)
    }

    /// Observe a set of tweaks
    ///
    /// `callback` runs once before this returns and again after each change
    /// of any member. It receives no value; read the members you need.
    pub fn bind_multiple<I, F>(&self, tweaks: I, callback: F)
    where
        I: IntoIterator,
        I::Item: Into<AnyTweak>,
        F: Fn() + Send + Sync + 'static,
    {
        let key = ClusterKey::new(tweaks.into_iter().map(|tweak| {
            let tweak: AnyTweak = tweak.into();
            tweak.identity().to_string()
        }));
        let members = key.len();
        let binding: ClusterBinding = Arc::new(callback);

        self.bindings.write().add_cluster(key, Arc::clone(&binding));
        tracing::debug!(store = %self.store_name, members, "tweak cluster bound");

        binding();
    }

    /// Number of value bindings observing a tweak
    pub fn binding_count(&self, tweak: &AnyTweak) -> usize {
        self.bindings.read().value_binding_count(tweak.identity())
    }

    /// Number of distinct tweak sets with cluster bindings
    pub fn cluster_count(&self) -> usize {
        self.bindings.read().cluster_count()
    }

    /// Value bindings first, then cluster bindings, each in registration order
    fn notify(&self, identity: &str) -> Result<(), TweakError> {
        let notification = self.bindings.read().notification(identity);

        for binding in notification.values {
            binding(self)?;
        }
        for binding in notification.clusters {
            binding();
        }
        Ok(())
    }
}

impl fmt::Debug for TweakStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweakStore")
            .field("store_name", &self.store_name)
            .field("editing_enabled", &self.editing_enabled)
            .field("tweaks", &self.hierarchy.len())
            .finish_non_exhaustive()
    }
}

impl TweakEditor for TweakStore {
    fn collections(&self) -> Vec<&TweakCollection> {
        self.hierarchy.collections().collect()
    }

    fn current_display_data(&self, tweak: &AnyTweak) -> Result<DisplayData, TweakError> {
        TweakStore::current_display_data(self, tweak)
    }

    fn set_value(&self, data: DisplayData, tweak: &AnyTweak) -> Result<(), TweakError> {
        TweakStore::set_value(self, data, tweak)
    }

    fn reset(&self) -> Result<(), TweakError> {
        TweakStore::reset(self)
    }
}
