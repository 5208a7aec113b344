//! Contract error types for the tweak store

use super::model::TweakKind;
use crate::config::ConfigError;

/// Programmer errors detected while building a tweak descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("{component} name '{value}' contains the reserved separator '{separator}'")]
    ReservedSeparator {
        /// Which name component is invalid (collection, group, name)
        component: &'static str,
        value: String,
        separator: char,
    },

    #[error("default of tweak '{identity}' is outside its bounds: {details}")]
    DefaultOutOfBounds { identity: String, details: String },

    #[error("invalid bounds for tweak '{identity}': {details}")]
    InvalidBounds { identity: String, details: String },

    #[error("step of tweak '{identity}' must be positive")]
    InvalidStep { identity: String },

    #[error("default '{default}' of tweak '{identity}' is not one of its options")]
    DefaultNotInOptions { identity: String, default: String },
}

/// Tweak store runtime errors
#[derive(Debug, thiserror::Error)]
pub enum TweakError {
    /// Display data of one kind was written to a tweak of another kind
    #[error("tweak '{identity}' holds {expected} values, got {found}")]
    KindMismatch {
        identity: String,
        expected: TweakKind,
        found: TweakKind,
    },

    /// The persistence port failed
    #[error("persistence failure: {0:#}")]
    Persistence(anyhow::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
