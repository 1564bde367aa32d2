//! Content hashing over entity definition sources

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// SHA-256 over the sorted source paths and their contents, hex encoded.
///
/// Paths are folded into the hash alongside contents, so renaming a file
/// changes the hash even when its bytes do not.
pub fn content_hash(files: &[PathBuf]) -> Result<String> {
    let mut sorted: Vec<&PathBuf> = files.iter().collect();
    sorted.sort();

    let mut hasher = Sha256::new();
    for path in sorted {
        let content =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(&content);
    }

    Ok(hex::encode(hasher.finalize()))
}
