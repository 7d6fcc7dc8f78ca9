// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declaration fingerprints for incremental regeneration.

use sha2::{Digest, Sha256};

/// SHA-256 over the declaring file's source, the type name, and the tool
/// version. Equal fingerprints guarantee byte-identical outputs, so the
/// driver can skip the declaration entirely.
pub fn declaration_fingerprint(file_source: &str, type_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sg_emit::BUILD_VERSION.as_bytes());
    hasher.update([0]);
    hasher.update(type_name.as_bytes());
    hasher.update([0]);
    hasher.update(file_source.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
