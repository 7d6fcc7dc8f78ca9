// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sagagen.toml` discovery and parsing.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "sagagen.toml";

/// Tool configuration; every field has a CLI override.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    /// Source root to scan for workflow declarations.
    pub source: Option<PathBuf>,
    /// Directory artifacts are written to.
    pub out_dir: Option<PathBuf>,
    /// Whether the Mermaid diagram artifact is emitted.
    #[serde(default = "default_true")]
    pub emit_diagram: bool,
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            source: None,
            out_dir: None,
            emit_diagram: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Walk from the current directory up to the filesystem root looking
    /// for `sagagen.toml`. Absence is not an error; paths in the file are
    /// resolved relative to its directory.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        for dir in cwd.ancestors() {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let mut config: Config = toml::from_str(&text)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.generate.source = config.generate.source.map(|p| resolve(base, p));
            config.generate.out_dir = config.generate.out_dir.map(|p| resolve(base, p));
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
