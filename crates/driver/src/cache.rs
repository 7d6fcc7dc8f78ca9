// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent fingerprint cache.
//!
//! One JSON file under the output directory maps `file::Type` keys to
//! declaration fingerprints. A corrupt or missing cache degrades to a
//! full regeneration, never to an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CACHE_FILE: &str = ".sagagen-cache.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationCache {
    entries: BTreeMap<String, String>,
}

impl GenerationCache {
    /// Load the cache from `out_dir`, tolerating absence and corruption.
    pub fn load(out_dir: &Path) -> Self {
        let path = out_dir.join(CACHE_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist the cache; failures are logged, not fatal.
    pub fn save(&self, out_dir: &Path) {
        let path = out_dir.join(CACHE_FILE);
        match serde_json::to_string_pretty(self) {
            Ok(text) => {
                if let Err(error) = std::fs::write(&path, text) {
                    tracing::warn!(path = %path.display(), %error, "failed to persist cache");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to serialize cache"),
        }
    }

    pub fn key(file: &Path, type_name: &str) -> String {
        format!("{}::{type_name}", file.display())
    }

    pub fn is_fresh(&self, key: &str, fingerprint: &str) -> bool {
        self.entries.get(key).is_some_and(|f| f == fingerprint)
    }

    pub fn record(&mut self, key: String, fingerprint: String) {
        self.entries.insert(key, fingerprint);
    }

    pub fn forget(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn cache_path(out_dir: &Path) -> PathBuf {
        out_dir.join(CACHE_FILE)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
