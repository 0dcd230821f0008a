//! # Snippet Naming
//!
//! Names are derived in two steps: a basis from the command text or a
//! user-supplied name ([`slug`]), then a free numeric suffix from the directory
//! contents ([`suffix`]).
//!
//! Names are `/`-separated paths relative to a store root. [`validate_name`]
//! guards every place where a name coming from the user or from an edited
//! header is turned into a filesystem path.

use crate::error::{Result, SnipError};

pub mod slug;
pub mod suffix;

pub use slug::{extract_primary_command, slugify, FALLBACK_NAME};
pub use suffix::{duplicate_name, next_suffix, split_numeric_suffix};

/// Checks that a snippet name stays inside its store root and is visible to
/// enumeration.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SnipError::InvalidName("name is empty".to_string()));
    }
    if name.starts_with('/') {
        return Err(SnipError::InvalidName(format!(
            "'{}' must be relative to the snippet directory",
            name
        )));
    }
    for segment in name.split('/') {
        if segment.is_empty() {
            return Err(SnipError::InvalidName(format!(
                "'{}' contains an empty path segment",
                name
            )));
        }
        if segment.starts_with('.') {
            return Err(SnipError::InvalidName(format!(
                "'{}' has a segment starting with '.'",
                name
            )));
        }
    }
    Ok(())
}
