// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact writing: atomic, and silent when nothing changed.

use crate::error::DriverError;
use sg_emit::Artifact;
use std::path::{Path, PathBuf};

/// Write one artifact under `out_dir`. Returns the path when the file was
/// created or its content changed; `None` when the on-disk copy is
/// already byte-identical.
///
/// Writes go to a temporary sibling first and land via rename, so a
/// cancelled or crashed run never leaves a partial artifact.
pub(crate) fn write_artifact(
    out_dir: &Path,
    artifact: &Artifact,
) -> Result<Option<PathBuf>, DriverError> {
    let path = out_dir.join(&artifact.file_name);
    if let Ok(existing) = std::fs::read_to_string(&path) {
        if existing == artifact.content {
            return Ok(None);
        }
    }

    let tmp = out_dir.join(format!(".{}.tmp", artifact.file_name));
    std::fs::write(&tmp, &artifact.content).map_err(|source| DriverError::Write {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, &path).map_err(|source| DriverError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(Some(path))
}

/// Ensure the output directory exists.
pub(crate) fn ensure_out_dir(out_dir: &Path) -> Result<(), DriverError> {
    std::fs::create_dir_all(out_dir).map_err(|source| DriverError::Write {
        path: out_dir.to_path_buf(),
        source,
    })
}
