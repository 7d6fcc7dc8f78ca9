// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caching façade over source-unit parsing.

use crate::error::OracleError;
use crate::unit::SourceUnit;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads and caches parsed source units.
///
/// Repeated loads of an unchanged file return the same `Arc`, so
/// downstream fingerprint caches can short-circuit on pointer or value
/// equality. A changed file re-parses in place; `invalidate` drops an
/// entry eagerly (used by watch mode).
pub struct Oracle {
    source_root: PathBuf,
    cache: Mutex<HashMap<PathBuf, CachedUnit>>,
}

struct CachedUnit {
    source_hash: u64,
    unit: Arc<SourceUnit>,
}

impl Oracle {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load and parse a file, reusing the cached unit when the content is
    /// unchanged.
    pub fn load_file(&self, path: &Path) -> Result<Arc<SourceUnit>, OracleError> {
        let source = std::fs::read_to_string(path).map_err(|source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source_hash = content_hash(&source);

        let mut cache = self.cache.lock();
        if let Some(cached) = cache.get(path) {
            if cached.source_hash == source_hash {
                return Ok(Arc::clone(&cached.unit));
            }
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let module_path = self.module_path_of(path);
        let unit = Arc::new(SourceUnit::parse(&file_name, module_path, &source)?);
        tracing::debug!(file = %path.display(), "parsed source unit");
        cache.insert(
            path.to_path_buf(),
            CachedUnit {
                source_hash,
                unit: Arc::clone(&unit),
            },
        );
        Ok(unit)
    }

    /// Drop a cached unit (watch mode calls this on change events).
    pub fn invalidate(&self, path: &Path) {
        self.cache.lock().remove(path);
    }

    /// Module path of a file relative to the source root:
    /// `<root>/flows/orders.rs` → `crate::flows::orders`. Files outside
    /// the root have no module path, which diagnostics report as AGWF004.
    fn module_path_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.source_root).ok()?;
        let mut segments: Vec<String> = Vec::new();
        for component in relative.components() {
            segments.push(component.as_os_str().to_string_lossy().into_owned());
        }
        let last = segments.pop()?;
        let stem = last.strip_suffix(".rs")?;
        match stem {
            "lib" | "main" | "mod" => {}
            other => segments.push(other.to_string()),
        }
        let mut module = String::from("crate");
        for segment in &segments {
            module.push_str("::");
            module.push_str(segment);
        }
        Some(module)
    }
}

fn content_hash(source: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
#[path = "oracle_tests.rs"]
mod tests;
