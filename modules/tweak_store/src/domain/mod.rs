//! Domain layer - descriptors, hierarchy, bindings and the store service

pub(crate) mod bindings;
pub mod descriptor;
pub mod hierarchy;
pub mod repository;
pub mod service;
pub mod validation;

pub use descriptor::{AnyTweak, Bounds, NumericTweakValue, Tweak, TweakValue};
pub use hierarchy::{Hierarchy, TweakCollection, TweakGroup};
pub use repository::TweakPersistence;
pub use service::TweakStore;
