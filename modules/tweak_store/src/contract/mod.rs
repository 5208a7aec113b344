//! Contract layer - public API for editing surfaces and store clients
//!
//! This layer contains transport-agnostic models, errors and the editor trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::TweakEditor;
pub use error::{DescriptorError, TweakError};
pub use model::{
    Color, DefaultData, DisplayData, NumericDefault, StoredValue, StringOption, TweakKind,
};
