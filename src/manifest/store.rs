//! Manifest file I/O, staleness detection, and suggestion lifecycle

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::{Manifest, ManifestSuggestion, SuggestionStatus, MANIFEST_VERSION};
use crate::suggest::TransitiveSuggestion;

/// Default directory the manifest lives in, relative to a project root
pub const DEFAULT_MANIFEST_DIR: &str = ".codegen";

/// Manifest file name inside the manifest directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Reads and writes the manifest under an explicitly configured directory.
///
/// The directory is constructor input rather than ambient process state,
/// so multiple stores with different directories can coexist in one
/// process. A single writer per manifest file is assumed.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    dir: PathBuf,
}

impl ManifestStore {
    /// Store reading and writing under the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for the default `.codegen` directory under a project root
    pub fn under_root(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_MANIFEST_DIR))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// Load the persisted manifest.
    ///
    /// A missing, unreadable, malformed, or version-mismatched file is
    /// treated as absent; a broken cache must never block analysis.
    pub fn load(&self) -> Option<Manifest> {
        let path = self.manifest_path();

        let content = fs::read_to_string(&path).ok()?;

        let manifest: Manifest = match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("discarding malformed manifest {}: {e}", path.display());
                return None;
            }
        };

        if manifest.version != MANIFEST_VERSION {
            warn!(
                "discarding manifest {} with schema version {} (current is {})",
                path.display(),
                manifest.version,
                MANIFEST_VERSION
            );
            return None;
        }

        Some(manifest)
    }

    /// Write the manifest as pretty-printed JSON, creating the directory
    pub fn save(&self, manifest: &Manifest) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create manifest directory: {}", self.dir.display())
        })?;

        let path = self.manifest_path();
        let json =
            serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write manifest file: {}", path.display()))?;

        Ok(path)
    }

    /// Whether re-analysis is needed for the given source content hash
    pub fn is_stale(&self, current_hash: &str) -> bool {
        match self.load() {
            Some(manifest) => manifest.content_hash != current_hash,
            None => true,
        }
    }

    /// Merge freshly detected suggestions with previously recorded decisions.
    ///
    /// A detected id already present in the old manifest keeps its status
    /// and timestamps while its descriptive fields are refreshed. A new id
    /// starts pending. Old records absent from the detected set are kept
    /// only if a decision was recorded; undetected pending records drop.
    pub fn merge_suggestions(
        &self,
        detected: &[TransitiveSuggestion],
        previous: Option<&Manifest>,
    ) -> Vec<ManifestSuggestion> {
        let now = Utc::now();
        let mut detected_ids: BTreeSet<String> = BTreeSet::new();
        let mut merged: Vec<ManifestSuggestion> = Vec::new();

        for suggestion in detected {
            let path = &suggestion.path;
            let id = ManifestSuggestion::suggestion_id(&path.source, &path.target);
            detected_ids.insert(id.clone());

            let record = match previous.and_then(|m| m.suggestion(&id)) {
                Some(old) => ManifestSuggestion {
                    id,
                    source: path.source.clone(),
                    target: path.target.clone(),
                    through_path: path.through_path.clone(),
                    suggested_name: path.suggested_name.clone(),
                    snippet: path.snippet.clone(),
                    status: old.status,
                    detected_at: old.detected_at,
                    resolved_at: old.resolved_at,
                },
                None => ManifestSuggestion::from_detected(path, now),
            };
            merged.push(record);
        }

        if let Some(previous) = previous {
            for old in &previous.suggestions {
                if !detected_ids.contains(&old.id) && old.is_resolved() {
                    merged.push(old.clone());
                }
            }
        }

        merged
    }

    /// Set one suggestion's status by id and persist immediately.
    ///
    /// Returns `Ok(false)` when the id is unknown; nothing is written in
    /// that case.
    pub fn set_suggestion_status(
        &self,
        manifest: &mut Manifest,
        id: &str,
        status: SuggestionStatus,
    ) -> Result<bool> {
        let Some(suggestion) = manifest.suggestions.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };

        suggestion.status = status;
        suggestion.resolved_at = Some(Utc::now());
        self.save(manifest)?;

        Ok(true)
    }

    /// Transition every pending suggestion to `status` and persist once.
    ///
    /// Returns the number of suggestions transitioned.
    pub fn resolve_all_pending(
        &self,
        manifest: &mut Manifest,
        status: SuggestionStatus,
    ) -> Result<usize> {
        let now = Utc::now();
        let mut transitioned = 0;

        for suggestion in manifest
            .suggestions
            .iter_mut()
            .filter(|s| s.status == SuggestionStatus::Pending)
        {
            suggestion.status = status;
            suggestion.resolved_at = Some(now);
            transitioned += 1;
        }

        if transitioned > 0 {
            self.save(manifest)?;
        }

        Ok(transitioned)
    }
}
