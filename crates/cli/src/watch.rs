// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch mode: regenerate whenever a source file changes.

use crate::output::{print_report, OutputFormat};
use anyhow::{Context, Result};
use notify::{RecursiveMode, Watcher};
use sg_driver::{Driver, GeneratorOptions};
use std::sync::mpsc;
use std::time::Duration;

/// Debounce window: editors fire bursts of events per save.
const SETTLE: Duration = Duration::from_millis(250);

pub fn run(options: GeneratorOptions, format: OutputFormat) -> Result<()> {
    let source_root = options.source_root.clone();
    let driver = Driver::new(options);

    // Initial pass before watching.
    let report = driver.run()?;
    print_report(&report, format);

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })
    .context("cannot create file watcher")?;
    watcher
        .watch(&source_root, RecursiveMode::Recursive)
        .with_context(|| format!("cannot watch {}", source_root.display()))?;
    eprintln!("watching {} — ctrl-c to stop", source_root.display());

    loop {
        let first = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(()),
        };
        let mut changed = paths_of(first);
        // Drain the burst.
        while let Ok(event) = rx.recv_timeout(SETTLE) {
            changed.extend(paths_of(event));
        }
        let relevant: Vec<_> = changed
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "rs"))
            .collect();
        if relevant.is_empty() {
            continue;
        }
        for path in &relevant {
            driver.invalidate(path);
        }
        tracing::info!(files = relevant.len(), "source change detected");
        match driver.run() {
            Ok(report) => print_report(&report, format),
            Err(error) => eprintln!("regeneration failed: {error}"),
        }
    }
}

fn paths_of(event: Result<notify::Event, notify::Error>) -> Vec<std::path::PathBuf> {
    match event {
        Ok(event) => event.paths,
        Err(error) => {
            tracing::warn!(%error, "watch error");
            Vec::new()
        }
    }
}
