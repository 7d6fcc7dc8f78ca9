// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config parsing tests.

use super::*;

#[test]
fn loads_and_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sagagen.toml");
    std::fs::write(
        &path,
        r#"
[generate]
source = "src/flows"
out_dir = "generated"
emit_diagram = false
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(
        config.generate.source.as_deref(),
        Some(dir.path().join("src/flows").as_path())
    );
    assert_eq!(
        config.generate.out_dir.as_deref(),
        Some(dir.path().join("generated").as_path())
    );
    assert!(!config.generate.emit_diagram);
}

#[test]
fn diagram_defaults_on() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sagagen.toml");
    std::fs::write(&path, "[generate]\nsource = \"src\"\n").unwrap();
    let config = Config::load(&path).unwrap();
    assert!(config.generate.emit_diagram);
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sagagen.toml");
    std::fs::write(&path, "[generate]\nsurprise = true\n").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn empty_file_is_a_valid_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sagagen.toml");
    std::fs::write(&path, "").unwrap();
    let config = Config::load(&path).unwrap();
    assert!(config.generate.source.is_none());
    assert!(config.generate.emit_diagram);
}
