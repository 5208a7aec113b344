//! Binding indices of the tweak store
//!
//! Value bindings are keyed by tweak identity. Cluster bindings are keyed by
//! the sorted set of member identities, so the same members given in any
//! order land on the same key. Both keep registration order.

use super::service::TweakStore;
use crate::contract::TweakError;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Erased value binding: resolves its own typed value from the store
pub(crate) type ValueBinding = Arc<dyn Fn(&TweakStore) -> Result<(), TweakError> + Send + Sync>;

/// Cluster binding: notified without a value
pub(crate) type ClusterBinding = Arc<dyn Fn() + Send + Sync>;

/// Order-independent key of a cluster binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ClusterKey(BTreeSet<String>);

impl ClusterKey {
    pub(crate) fn new<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(identities.into_iter().map(Into::into).collect())
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn contains(&self, identity: &str) -> bool {
        self.0.contains(identity)
    }
}

/// Callbacks due for one change notification
pub(crate) struct Notification {
    pub(crate) values: Vec<ValueBinding>,
    pub(crate) clusters: Vec<ClusterBinding>,
}

#[derive(Default)]
pub(crate) struct BindingIndex {
    values: HashMap<String, Vec<ValueBinding>>,
    clusters: IndexMap<ClusterKey, Vec<ClusterBinding>>,
}

impl BindingIndex {
    pub(crate) fn add_value(&mut self, identity: &str, binding: ValueBinding) {
        self.values
            .entry(identity.to_string())
            .or_default()
            .push(binding);
    }

    pub(crate) fn add_cluster(&mut self, key: ClusterKey, binding: ClusterBinding) {
        self.clusters.entry(key).or_default().push(binding);
    }

    /// Snapshot of the callbacks observing `identity`, in invocation order
    pub(crate) fn notification(&self, identity: &str) -> Notification {
        let values = self.values.get(identity).cloned().unwrap_or_default();
        let clusters = self
            .clusters
            .iter()
            .filter(|(key, _)| key.contains(identity))
            .flat_map(|(_, bindings)| bindings.iter().cloned())
            .collect();

        Notification { values, clusters }
    }

    pub(crate) fn value_binding_count(&self, identity: &str) -> usize {
        self.values.get(identity).map_or(0, Vec::len)
    }

    pub(crate) fn cluster_count(&self) -> usize {
        self.clusters.len()
    }
}
