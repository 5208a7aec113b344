//! Persistence port for overridden tweak values
//!
//! This trait defines the interface the store reads and writes through.
//! Implementations are in infra/storage.

use crate::contract::StoredValue;
use anyhow::Result;

/// Key-value store holding overridden values across restarts
///
/// Keys are tweak identities (`collection|group|name`). Calls are
/// synchronous from the store's point of view.
pub trait TweakPersistence: Send + Sync {
    /// Stored value for a key, if any
    fn get(&self, key: &str) -> Result<Option<StoredValue>>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: StoredValue) -> Result<()>;

    /// Remove every stored value
    fn clear_all(&self) -> Result<()>;
}
