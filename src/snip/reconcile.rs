//! # Rename-on-Save
//!
//! After the editor returns, the `name` header is the user's statement of where
//! the snippet should live. If it no longer matches the file's location the file
//! is moved; if the destination is taken the file stays where it was. Content is
//! never lost either way: only the move is refused.

use crate::error::Result;
use crate::header::{self, FIELD_NAME};
use crate::naming::validate_name;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Name header empty or unchanged.
    Unchanged,
    /// File moved to match the new name.
    Renamed { from: String, to: String },
    /// Destination already exists; file left under its old name.
    Conflict { wanted: String },
    /// New name would leave the store or be hidden; file left in place.
    Invalid { wanted: String, reason: String },
}

/// Moves `path` to match its `name` header if that changed from
/// `expected_name`. Returns the final path and what happened.
pub fn reconcile(
    path: &Path,
    expected_name: &str,
    store_root: &Path,
) -> Result<(PathBuf, ReconcileOutcome)> {
    let new_name = header::read_field(path, FIELD_NAME)?;
    let new_name = new_name.trim();

    if new_name.is_empty() || new_name == expected_name {
        return Ok((path.to_path_buf(), ReconcileOutcome::Unchanged));
    }

    if let Err(err) = validate_name(new_name) {
        warn!(wanted = new_name, "refusing rename: {}", err);
        return Ok((
            path.to_path_buf(),
            ReconcileOutcome::Invalid {
                wanted: new_name.to_string(),
                reason: err.to_string(),
            },
        ));
    }

    let new_path = store_root.join(new_name);
    if new_path.exists() {
        warn!(wanted = new_name, "refusing rename: destination exists");
        return Ok((
            path.to_path_buf(),
            ReconcileOutcome::Conflict {
                wanted: new_name.to_string(),
            },
        ));
    }

    if let Some(parent) = new_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(path, &new_path)?;
    debug!(from = expected_name, to = new_name, "renamed snippet");

    Ok((
        new_path,
        ReconcileOutcome::Renamed {
            from: expected_name.to_string(),
            to: new_name.to_string(),
        },
    ))
}
