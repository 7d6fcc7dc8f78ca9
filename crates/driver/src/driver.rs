// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The generation driver.
//!
//! Discovers workflow and state declarations under the source root,
//! regenerates only declarations whose fingerprint changed, reports
//! diagnostics, and writes artifacts atomically. Declarations are
//! independent; a fatal diagnostic skips one workflow, never the run.

use crate::cache::GenerationCache;
use crate::error::DriverError;
use crate::fingerprint::declaration_fingerprint;
use crate::output::{ensure_out_dir, write_artifact};
use sg_emit::Artifact;
use sg_model::{CancelFlag, Diagnostic};
use sg_syntax::Oracle;
use std::path::{Path, PathBuf};

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Root of the host sources to scan.
    pub source_root: PathBuf,
    /// Directory artifacts are written to.
    pub out_dir: PathBuf,
    /// Skip the Mermaid diagram artifact.
    pub skip_diagram: bool,
    /// Bypass the fingerprint cache (regenerate everything).
    pub force: bool,
}

impl GeneratorOptions {
    pub fn new(source_root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            out_dir: out_dir.into(),
            skip_diagram: false,
            force: false,
        }
    }
}

/// Outcome of one generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Artifact paths created or rewritten this pass.
    pub written: Vec<PathBuf>,
    /// Workflow declarations skipped via the fingerprint cache.
    pub skipped: usize,
    /// Workflows skipped because of a fatal diagnostic.
    pub failed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == sg_model::Severity::Error)
    }
}

pub struct Driver {
    options: GeneratorOptions,
    oracle: Oracle,
    cancel: CancelFlag,
}

impl Driver {
    pub fn new(options: GeneratorOptions) -> Self {
        let oracle = Oracle::new(&options.source_root);
        Self {
            options,
            oracle,
            cancel: CancelFlag::new(),
        }
    }

    /// The flag cancelling this driver's in-flight pass.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Drop cached parses for a changed file (watch mode).
    pub fn invalidate(&self, path: &Path) {
        self.oracle.invalidate(path);
    }

    /// Run extraction and diagnostics only; nothing is written.
    pub fn check(&self) -> Result<Vec<Diagnostic>, DriverError> {
        let mut diagnostics = Vec::new();
        for file in source_files(&self.options.source_root)? {
            let unit = self.oracle.load_file(&file)?;
            for decl in sg_syntax::workflow_decls(&unit) {
                let extraction =
                    sg_extract::extract_workflow(&decl, &unit.types, self.cancel.clone())?;
                diagnostics.extend(extraction.diagnostics);
            }
            for decl in sg_syntax::state_decls(&unit) {
                let (_, state_diagnostics) = sg_extract::extract_state(&decl);
                diagnostics.extend(state_diagnostics);
            }
        }
        Ok(diagnostics)
    }

    /// Full generation pass.
    pub fn run(&self) -> Result<GenerationReport, DriverError> {
        ensure_out_dir(&self.options.out_dir)?;
        let mut cache = if self.options.force {
            GenerationCache::default()
        } else {
            GenerationCache::load(&self.options.out_dir)
        };
        let mut report = GenerationReport::default();

        for file in source_files(&self.options.source_root)? {
            let source = read_source(&file)?;
            let unit = match self.oracle.load_file(&file) {
                Ok(unit) => unit,
                Err(error) => {
                    // A file mid-edit should not sink the pass; report and
                    // move on.
                    tracing::warn!(file = %file.display(), %error, "skipping unparseable file");
                    report.diagnostics.push(Diagnostic::warning(
                        "AGWF000",
                        error.to_string(),
                        sg_model::SourceLocation::new(file.display().to_string(), 0, 0),
                    ));
                    continue;
                }
            };

            for decl in sg_syntax::workflow_decls(&unit) {
                self.generate_workflow(&file, &source, &decl, &unit, &mut cache, &mut report)?;
            }
            for decl in sg_syntax::state_decls(&unit) {
                self.generate_reducer(&file, &source, &decl, &mut cache, &mut report)?;
            }
        }

        cache.save(&self.options.out_dir);
        tracing::info!(
            written = report.written.len(),
            skipped = report.skipped,
            failed = report.failed,
            "generation pass complete"
        );
        Ok(report)
    }

    fn generate_workflow(
        &self,
        file: &Path,
        source: &str,
        decl: &sg_syntax::WorkflowDecl,
        unit: &sg_syntax::SourceUnit,
        cache: &mut GenerationCache,
        report: &mut GenerationReport,
    ) -> Result<(), DriverError> {
        let key = GenerationCache::key(file, &decl.type_name);
        let fingerprint = declaration_fingerprint(source, &decl.type_name);
        if cache.is_fresh(&key, &fingerprint) {
            report.skipped += 1;
            return Ok(());
        }

        let extraction = sg_extract::extract_workflow(decl, &unit.types, self.cancel.clone())?;
        let emittable = extraction.is_emittable();
        report.diagnostics.extend(extraction.diagnostics);
        if !emittable {
            tracing::warn!(
                workflow = %decl.type_name,
                "fatal diagnostic; workflow skipped"
            );
            cache.forget(&key);
            report.failed += 1;
            return Ok(());
        }

        let mut artifacts = sg_emit::emit_workflow(&extraction.model);
        if self.options.skip_diagram {
            artifacts.retain(|a| !a.file_name.ends_with(".g.md"));
        }
        self.write_all(&artifacts, report)?;
        cache.record(key, fingerprint);
        Ok(())
    }

    fn generate_reducer(
        &self,
        file: &Path,
        source: &str,
        decl: &sg_syntax::StateDecl,
        cache: &mut GenerationCache,
        report: &mut GenerationReport,
    ) -> Result<(), DriverError> {
        let key = GenerationCache::key(file, &decl.type_name);
        let fingerprint = declaration_fingerprint(source, &decl.type_name);
        if cache.is_fresh(&key, &fingerprint) {
            report.skipped += 1;
            return Ok(());
        }

        let (model, diagnostics) = sg_extract::extract_state(decl);
        let fatal = diagnostics
            .iter()
            .any(|d| d.severity == sg_model::Severity::Error);
        report.diagnostics.extend(diagnostics);
        if fatal {
            cache.forget(&key);
            report.failed += 1;
            return Ok(());
        }

        let artifact = Artifact::new(
            format!("{}.g.rs", model.reducer_type_name()),
            sg_emit::emit_reducer(&model),
        );
        self.write_all(std::slice::from_ref(&artifact), report)?;
        cache.record(key, fingerprint);
        Ok(())
    }

    fn write_all(
        &self,
        artifacts: &[Artifact],
        report: &mut GenerationReport,
    ) -> Result<(), DriverError> {
        for artifact in artifacts {
            if self.cancel.is_cancelled() {
                return Err(sg_extract::ExtractError::Cancelled.into());
            }
            if let Some(path) = write_artifact(&self.options.out_dir, artifact)? {
                report.written.push(path);
            }
        }
        Ok(())
    }
}

fn read_source(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// All `.rs` files under the root, depth-first, in sorted order for
/// deterministic passes.
fn source_files(root: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let mut out = Vec::new();
    collect_files(root, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DriverError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DriverError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| DriverError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
