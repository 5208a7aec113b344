//! Construction-time validation of tweak descriptors

use crate::contract::DescriptorError;
use std::cmp::Ordering;
use std::fmt::Display;

/// Separator joining collection, group and name into a tweak identity
pub const SEPARATOR: char = '|';

/// Validate one name component of a tweak
///
/// The separator may not appear in any component, otherwise two different
/// tweaks could share an identity.
pub fn validate_name(component: &'static str, value: &str) -> Result<(), DescriptorError> {
    if value.contains(SEPARATOR) {
        return Err(DescriptorError::ReservedSeparator {
            component,
            value: value.to_string(),
            separator: SEPARATOR,
        });
    }
    Ok(())
}

/// Validate bounds and step of an ordered numeric tweak
///
/// Checks, in order: `min <= max`, `min <= default`, `default <= max`,
/// `step > zero`. Comparisons that are undefined (NaN) count as violations.
pub fn validate_bounds<T>(
    identity: &str,
    default: T,
    min: Option<T>,
    max: Option<T>,
    step: Option<T>,
    zero: T,
) -> Result<(), DescriptorError>
where
    T: PartialOrd + Display + Copy,
{
    if let (Some(min), Some(max)) = (min, max) {
        if !at_most(min, max) {
            return Err(DescriptorError::InvalidBounds {
                identity: identity.to_string(),
                details: format!("min {} is greater than max {}", min, max),
            });
        }
    }

    if let Some(min) = min {
        if !at_most(min, default) {
            return Err(DescriptorError::DefaultOutOfBounds {
                identity: identity.to_string(),
                details: format!("default {} is below min {}", default, min),
            });
        }
    }

    if let Some(max) = max {
        if !at_most(default, max) {
            return Err(DescriptorError::DefaultOutOfBounds {
                identity: identity.to_string(),
                details: format!("default {} is above max {}", default, max),
            });
        }
    }

    if let Some(step) = step {
        if step.partial_cmp(&zero) != Some(Ordering::Greater) {
            return Err(DescriptorError::InvalidStep {
                identity: identity.to_string(),
            });
        }
    }

    Ok(())
}

fn at_most<T: PartialOrd>(lhs: T, rhs: T) -> bool {
    matches!(
        lhs.partial_cmp(&rhs),
        Some(Ordering::Less | Ordering::Equal)
    )
}

/// Validate that a string-list default is one of its options
pub fn validate_option(
    identity: &str,
    default: &str,
    options: &[String],
) -> Result<(), DescriptorError> {
    if !options.iter().any(|option| option == default) {
        return Err(DescriptorError::DefaultNotInOptions {
            identity: identity.to_string(),
            default: default.to_string(),
        });
    }
    Ok(())
}
