// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixture: a temporary project with one workflow source file.

use sg_driver::{Driver, GenerationReport, GeneratorOptions};
use std::path::{Path, PathBuf};

pub struct Project {
    pub root: tempfile::TempDir,
    pub src: PathBuf,
    pub out: PathBuf,
}

impl Project {
    /// A project whose `src/flows/flows.rs` contains the given source.
    pub fn with_source(source: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src");
        let out = root.path().join("generated");
        std::fs::create_dir_all(src.join("flows")).unwrap();
        std::fs::write(src.join("flows/flows.rs"), source).unwrap();
        Self { root, src, out }
    }

    /// A project whose flow is the given chain inside a standard
    /// declaration named `process-order`.
    pub fn with_chain(chain: &str) -> Self {
        Self::with_source(&format!(
            r#"
pub enum OrderKind {{ Auto, Manual }}

#[workflow(name = "process-order")]
pub struct ProcessOrder;

impl ProcessOrder {{
    pub fn define() -> WorkflowBuilder<OrderState> {{
        {chain}
    }}
}}
"#
        ))
    }

    pub fn generate(&self) -> GenerationReport {
        Driver::new(GeneratorOptions::new(&self.src, &self.out))
            .run()
            .expect("generation succeeds")
    }

    pub fn check(&self) -> Vec<sg_model::Diagnostic> {
        Driver::new(GeneratorOptions::new(&self.src, &self.out))
            .check()
            .expect("check succeeds")
    }

    pub fn artifact(&self, name: &str) -> String {
        let path = self.out.join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing artifact {}", path.display()))
    }

    pub fn source_file(&self) -> PathBuf {
        self.src.join("flows/flows.rs")
    }
}

pub fn codes(diagnostics: &[sg_model::Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.code.as_str()).collect()
}

pub fn exists(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}
