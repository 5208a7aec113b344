//! Collection -> group -> tweak hierarchy
//!
//! Built from a flat list of erased tweaks. Every level is keyed by name and
//! iterates in lexicographic order, whatever order the tweaks arrived in.

use super::descriptor::AnyTweak;
use std::collections::BTreeMap;

/// Second level of the hierarchy: tweaks by name
#[derive(Debug, Clone)]
pub struct TweakGroup {
    name: String,
    tweaks: BTreeMap<String, AnyTweak>,
}

impl TweakGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tweaks: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tweak(&self, name: &str) -> Option<&AnyTweak> {
        self.tweaks.get(name)
    }

    /// Tweaks sorted by name
    pub fn tweaks(&self) -> impl Iterator<Item = &AnyTweak> {
        self.tweaks.values()
    }

    pub fn len(&self) -> usize {
        self.tweaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweaks.is_empty()
    }
}

/// Top level of the hierarchy: groups by name
#[derive(Debug, Clone)]
pub struct TweakCollection {
    name: String,
    groups: BTreeMap<String, TweakGroup>,
}

impl TweakCollection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self, name: &str) -> Option<&TweakGroup> {
        self.groups.get(name)
    }

    /// Groups sorted by name
    pub fn groups(&self) -> impl Iterator<Item = &TweakGroup> {
        self.groups.values()
    }

    /// Every tweak of the collection, groups then tweaks in name order
    pub fn tweaks(&self) -> impl Iterator<Item = &AnyTweak> {
        self.groups.values().flat_map(|group| group.tweaks())
    }
}

/// All collections of one store
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    collections: BTreeMap<String, TweakCollection>,
}

impl Hierarchy {
    /// Build the hierarchy; a later tweak at an existing path replaces the earlier one
    pub fn build<I>(tweaks: I) -> Self
    where
        I: IntoIterator<Item = AnyTweak>,
    {
        let mut hierarchy = Self::default();
        for tweak in tweaks {
            hierarchy.insert(tweak);
        }
        hierarchy
    }

    fn insert(&mut self, tweak: AnyTweak) {
        let collection = self
            .collections
            .entry(tweak.collection_name().to_string())
            .or_insert_with(|| TweakCollection::new(tweak.collection_name()));

        let group = collection
            .groups
            .entry(tweak.group_name().to_string())
            .or_insert_with(|| TweakGroup::new(tweak.group_name()));

        if let Some(previous) = group.tweaks.insert(tweak.name().to_string(), tweak) {
            tracing::debug!(identity = %previous.identity(), "tweak definition replaced");
        }
    }

    pub fn collection(&self, name: &str) -> Option<&TweakCollection> {
        self.collections.get(name)
    }

    /// Collections sorted by name
    pub fn collections(&self) -> impl Iterator<Item = &TweakCollection> {
        self.collections.values()
    }

    /// Every tweak: collections, then groups, then tweaks, each in name order
    pub fn tweaks(&self) -> impl Iterator<Item = &AnyTweak> {
        self.collections.values().flat_map(|collection| collection.tweaks())
    }

    /// Find a tweak by its path
    pub fn find(&self, collection: &str, group: &str, name: &str) -> Option<&AnyTweak> {
        self.collections
            .get(collection)?
            .groups
            .get(group)?
            .tweaks
            .get(name)
    }

    pub fn len(&self) -> usize {
        self.collections
            .values()
            .flat_map(|collection| collection.groups.values())
            .map(TweakGroup::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
