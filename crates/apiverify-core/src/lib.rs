//! apiverify-core: core types and snapshot logic for data-driven API verification
//!
//! This crate provides the run configuration surface, the row model driving
//! request templating, outcome classification, and the capture/compare
//! snapshot store. It performs no network I/O.

pub mod config;
pub mod naming;
pub mod outcome;
pub mod row;
pub mod snapshot;
pub mod template;
pub mod transform;

pub use config::{ConfigError, Param, RunConfig, RunMode, StorePolicy};
pub use naming::snapshot_file_name;
pub use outcome::{RequestOutcome, SnapshotDecision, TRANSPORT_FAILURE_STATUS};
pub use row::Row;
pub use snapshot::{RESULTS_DIR, SnapshotStore, StoreError};
pub use template::populate;
pub use transform::{BodyTransform, ReplaceTransform, apply_transforms};
