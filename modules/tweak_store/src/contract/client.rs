//! Editing surface trait
//!
//! This is the whole contract an editor UI needs: sorted hierarchy
//! enumeration, display data for a value and the single mutation path.

use super::{error::TweakError, model::DisplayData};
use crate::domain::descriptor::AnyTweak;
use crate::domain::hierarchy::TweakCollection;

/// Tweak store API for editing surfaces
pub trait TweakEditor: Send + Sync {
    /// All collections, sorted by name
    fn collections(&self) -> Vec<&TweakCollection>;

    /// Current value and default of a tweak
    fn current_display_data(&self, tweak: &AnyTweak) -> Result<DisplayData, TweakError>;

    /// Persist a new value and notify every binding that observes it
    fn set_value(&self, data: DisplayData, tweak: &AnyTweak) -> Result<(), TweakError>;

    /// Clear persisted state and notify every tweak's bindings
    fn reset(&self) -> Result<(), TweakError>;
}
