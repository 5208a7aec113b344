//! Tweak Store
//!
//! Runtime-adjustable values ("tweaks") organized as collections of groups,
//! persisted across restarts and observable through bindings.
//!
//! ```
//! use tweak_store::{Color, Config, Tweak, TweakStore};
//!
//! let background = Tweak::new("UI", "Colors", "background", Color::WHITE);
//! let padding = Tweak::bounded("UI", "Layout", "padding", 8_i64, 0, 32);
//!
//! let store = TweakStore::new([background.erase(), padding.erase()], Config::default())?;
//! store.bind(&padding, |value| println!("padding is now {value}"))?;
//!
//! store.set(&padding, 16)?;
//! assert_eq!(store.current_value(&padding)?, 16);
//!
//! store.reset()?;
//! assert_eq!(store.current_value(&background)?, Color::WHITE);
//! # Ok::<(), tweak_store::TweakError>(())
//! ```

// Public exports
pub mod contract;
pub use contract::{
    client::TweakEditor, error::DescriptorError, error::TweakError, Color, DefaultData,
    DisplayData, NumericDefault, StoredValue, StringOption, TweakKind,
};

pub mod config;
pub use config::{Config, ConfigError};

pub mod domain;
pub use domain::{
    AnyTweak, Bounds, NumericTweakValue, Tweak, TweakCollection, TweakGroup, TweakPersistence,
    TweakStore, TweakValue,
};

pub mod infra;
pub use infra::storage::{InMemoryPersistence, JsonFilePersistence};
