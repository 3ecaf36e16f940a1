//! Per-row request outcomes and snapshot classification

use std::time::Duration;

/// Sentinel status for transport-level failures (connection refused,
/// timeout). Outside the 2xx range, so such rows classify as `fail` and
/// the run continues.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// The result of dispatching one row's request. Produced once, never
/// retried or mutated.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// Originating row identifier.
    pub row_id: i64,
    /// HTTP status code, or `TRANSPORT_FAILURE_STATUS` on a transport fault.
    pub status: u16,
    /// Response body text, or the transport error message.
    pub body: String,
    /// Wall-clock time for the single attempt.
    pub elapsed: Duration,
}

impl RequestOutcome {
    /// Success is a status in the 2xx range; everything else — including
    /// the transport sentinel — is a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `success`/`fail` token used in per-row log lines.
    #[must_use]
    pub fn determination(&self) -> &'static str {
        if self.is_success() { "success" } else { "fail" }
    }
}

/// What the comparator/store did with a row's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDecision {
    /// Policy or mode ruled storage out.
    NotStored,
    /// Body written to a fresh snapshot file.
    NewFile,
    /// Existing snapshot equals the body byte-for-byte; file untouched.
    Matching,
    /// Existing snapshot differed; overwritten with the new body.
    Mismatch,
}

impl std::fmt::Display for SnapshotDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStored => write!(f, "NotStored"),
            Self::NewFile => write!(f, "NewFile"),
            Self::Matching => write!(f, "Matching"),
            Self::Mismatch => write!(f, "Mismatch"),
        }
    }
}
