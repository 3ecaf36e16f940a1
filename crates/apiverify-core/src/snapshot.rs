//! Snapshot comparator/store
//!
//! Decides, per configured policy and run mode, whether a response body is
//! persisted, compared against an existing baseline, or left alone, and
//! performs the corresponding file action.
//!
//! ```text
//! <output_location>/Results/
//! ├── request-1.json
//! ├── request-music-2.json
//! └── ...
//! ```

use std::path::{Path, PathBuf};

use crate::config::{RunMode, StorePolicy};
use crate::outcome::SnapshotDecision;

/// Subdirectory of the output location holding snapshot files. Created
/// lazily on the first write; never created when no row warrants storage.
pub const RESULTS_DIR: &str = "Results";

/// Owns the results directory of one run. No locking: rows are processed
/// strictly one at a time and there is no concurrent writer.
#[derive(Debug)]
pub struct SnapshotStore {
    results_dir: PathBuf,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(output_location: &Path) -> Self {
        Self {
            results_dir: output_location.join(RESULTS_DIR),
        }
    }

    #[must_use]
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Apply the capture/compare state machine to one row's outcome.
    ///
    /// - `Run` mode, policy `None`, or `FailuresOnly` with a succeeding
    ///   outcome → `NotStored`, no file touched.
    /// - `Capture` mode writes the body unconditionally once storage is
    ///   warranted → `NewFile`.
    /// - `CaptureAndCompare` compares byte-for-byte against an existing
    ///   snapshot: equal → `Matching` (file preserved), different →
    ///   `Mismatch` (overwritten, the new body becomes the baseline).
    ///   No existing snapshot → `NewFile`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the snapshot cannot be read or written.
    /// The caller records it and keeps iterating rows.
    pub fn record(
        &self,
        mode: RunMode,
        policy: StorePolicy,
        file_name: &str,
        outcome_is_success: bool,
        body: &str,
    ) -> Result<SnapshotDecision, StoreError> {
        if mode == RunMode::Run || !storage_warranted(policy, outcome_is_success) {
            return Ok(SnapshotDecision::NotStored);
        }

        let path = self.results_dir.join(file_name);

        if mode == RunMode::CaptureAndCompare && path.exists() {
            let existing = std::fs::read(&path)
                .map_err(|e| StoreError::Io(format!("read {}: {e}", path.display())))?;
            if existing == body.as_bytes() {
                return Ok(SnapshotDecision::Matching);
            }
            std::fs::write(&path, body)
                .map_err(|e| StoreError::Io(format!("write {}: {e}", path.display())))?;
            return Ok(SnapshotDecision::Mismatch);
        }

        std::fs::create_dir_all(&self.results_dir)
            .map_err(|e| StoreError::Io(format!("create {}: {e}", self.results_dir.display())))?;
        std::fs::write(&path, body)
            .map_err(|e| StoreError::Io(format!("write {}: {e}", path.display())))?;
        Ok(SnapshotDecision::NewFile)
    }
}

/// Whether the policy stores this outcome at all. Independent of run mode.
fn storage_warranted(policy: StorePolicy, outcome_is_success: bool) -> bool {
    match policy {
        StorePolicy::None => false,
        StorePolicy::FailuresOnly => !outcome_is_success,
        StorePolicy::All => true,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn run_mode_never_stores() {
        let (_dir, store) = store();
        let decision = store
            .record(RunMode::Run, StorePolicy::All, "request-1.json", true, "x")
            .unwrap();
        assert_eq!(decision, SnapshotDecision::NotStored);
        assert!(!store.results_dir().exists());
    }

    #[test]
    fn policy_none_never_creates_directory() {
        let (_dir, store) = store();
        for success in [true, false] {
            let decision = store
                .record(
                    RunMode::Capture,
                    StorePolicy::None,
                    "request-1.json",
                    success,
                    "body",
                )
                .unwrap();
            assert_eq!(decision, SnapshotDecision::NotStored);
        }
        assert!(!store.results_dir().exists());
    }

    #[test]
    fn policy_all_writes_every_outcome() {
        let (_dir, store) = store();
        for (name, success) in [("request-1.json", true), ("request-2.json", false)] {
            let decision = store
                .record(RunMode::Capture, StorePolicy::All, name, success, "body")
                .unwrap();
            assert_eq!(decision, SnapshotDecision::NewFile);
            assert!(store.results_dir().join(name).exists());
        }
    }

    #[test]
    fn failures_only_skips_success() {
        let (_dir, store) = store();
        let decision = store
            .record(
                RunMode::Capture,
                StorePolicy::FailuresOnly,
                "request-1.json",
                true,
                "body",
            )
            .unwrap();
        assert_eq!(decision, SnapshotDecision::NotStored);
        assert!(!store.results_dir().exists());
    }

    #[test]
    fn failures_only_stores_failure() {
        let (_dir, store) = store();
        let decision = store
            .record(
                RunMode::Capture,
                StorePolicy::FailuresOnly,
                "request-1.json",
                false,
                "Exception on the server",
            )
            .unwrap();
        assert_eq!(decision, SnapshotDecision::NewFile);
        let content =
            std::fs::read_to_string(store.results_dir().join("request-1.json")).unwrap();
        assert_eq!(content, "Exception on the server");
    }

    #[test]
    fn capture_overwrites_without_comparing() {
        let (_dir, store) = store();
        store
            .record(RunMode::Capture, StorePolicy::All, "request-1.json", true, "old")
            .unwrap();
        let decision = store
            .record(RunMode::Capture, StorePolicy::All, "request-1.json", true, "new")
            .unwrap();
        assert_eq!(decision, SnapshotDecision::NewFile);
        let content =
            std::fs::read_to_string(store.results_dir().join("request-1.json")).unwrap();
        assert_eq!(content, "new");
    }

    #[test]
    fn compare_first_write_is_new_file() {
        let (_dir, store) = store();
        let decision = store
            .record(
                RunMode::CaptureAndCompare,
                StorePolicy::All,
                "request-1.json",
                true,
                "baseline",
            )
            .unwrap();
        assert_eq!(decision, SnapshotDecision::NewFile);
    }

    #[test]
    fn compare_round_trip_matching_preserves_bytes() {
        let (_dir, store) = store();
        let body = r#"{"name":"John","age":30}"#;
        store
            .record(
                RunMode::CaptureAndCompare,
                StorePolicy::All,
                "request-1.json",
                true,
                body,
            )
            .unwrap();

        let decision = store
            .record(
                RunMode::CaptureAndCompare,
                StorePolicy::All,
                "request-1.json",
                true,
                body,
            )
            .unwrap();
        assert_eq!(decision, SnapshotDecision::Matching);
        let content =
            std::fs::read_to_string(store.results_dir().join("request-1.json")).unwrap();
        assert_eq!(content, body);
    }

    #[test]
    fn compare_mismatch_overwrites_baseline() {
        let (_dir, store) = store();
        store
            .record(
                RunMode::CaptureAndCompare,
                StorePolicy::All,
                "request-1.json",
                true,
                "old body",
            )
            .unwrap();

        let decision = store
            .record(
                RunMode::CaptureAndCompare,
                StorePolicy::All,
                "request-1.json",
                true,
                "new body",
            )
            .unwrap();
        assert_eq!(decision, SnapshotDecision::Mismatch);
        let content =
            std::fs::read_to_string(store.results_dir().join("request-1.json")).unwrap();
        assert_eq!(content, "new body");
    }

    #[test]
    fn write_failure_surfaces_as_store_error() {
        // Results dir path occupied by a file: create_dir_all must fail.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RESULTS_DIR), "not a directory").unwrap();
        let store = SnapshotStore::new(dir.path());
        let err = store
            .record(RunMode::Capture, StorePolicy::All, "request-1.json", true, "x")
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
