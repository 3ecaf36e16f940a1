//! Run orchestration
//!
//! Rows are processed strictly in source order, one at a time: populate →
//! dispatch → transform → decide/store → log, with no overlap between
//! rows. That keeps snapshot filenames and the log trail deterministic and
//! means file writes never race.

use std::time::{Duration, Instant};

use apiverify_core::{
    BodyTransform, ConfigError, Row, RunConfig, RunMode, SnapshotDecision, SnapshotStore,
    apply_transforms, snapshot_file_name, RESULTS_DIR,
};
use reqwest::blocking::Client;

use crate::dispatch::execute;
use crate::log::RunLog;
use crate::request::build_request;
use crate::source::{JsonFileSource, RowSource, SourceError};

/// Sequences one verification run over all rows.
pub struct Runner {
    config: RunConfig,
    source: Box<dyn RowSource>,
    transforms: Vec<Box<dyn BodyTransform>>,
}

/// What a completed run reports back. A non-empty error list is the
/// caller's failure signal; the run itself always completes.
#[derive(Debug)]
pub struct RunSummary {
    pub total_rows: u64,
    pub elapsed: Duration,
    pub errors: Vec<String>,
}

impl RunSummary {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Runner {
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            source: Box::new(JsonFileSource),
            transforms: Vec::new(),
        }
    }

    /// Replace the row source (e.g. a database-backed implementation).
    #[must_use]
    pub fn with_source(mut self, source: Box<dyn RowSource>) -> Self {
        self.source = source;
        self
    }

    /// Register a body transform. Transforms run between dispatch and the
    /// snapshot decision, in registration order.
    #[must_use]
    pub fn with_transform(mut self, transform: Box<dyn BodyTransform>) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Execute the run.
    ///
    /// Row-scoped faults (request build errors, snapshot write errors) are
    /// recorded and iteration continues; configuration-level faults —
    /// invalid config, missing data source connection — abort the run.
    ///
    /// # Errors
    ///
    /// Returns error when the config is invalid, the HTTP client cannot be
    /// built, or the data source cannot be opened.
    pub fn run(&self, log: &mut dyn RunLog) -> Result<RunSummary, RunnerError> {
        self.config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs()))
            .build()
            .map_err(|e| RunnerError::Http(e.to_string()))?;

        let rows = self.fetch_rows(log)?;
        let store = SnapshotStore::new(&self.config.output_location);

        let start = Instant::now();
        let mut errors = Vec::new();
        let mut total_rows: u64 = 0;

        for row in &rows {
            total_rows += 1;
            self.process_row(&client, &store, row, &mut errors, log);
        }

        let elapsed = start.elapsed();
        log.info(&format!("Total run took: {elapsed:.2?}"));

        Ok(RunSummary {
            total_rows,
            elapsed,
            errors,
        })
    }

    /// Data-driven runs pull rows from the source; otherwise a single
    /// degenerate row executes the static configuration once.
    fn fetch_rows(&self, log: &mut dyn RunLog) -> Result<Vec<Row>, RunnerError> {
        if !self.config.is_data_driven() {
            return Ok(vec![Row::empty(0)]);
        }

        log.info("Validating data source");
        let rows = self.source.fetch_rows(&self.config)?;
        log.info(&format!("Loaded {} rows from data source", rows.len()));
        Ok(rows)
    }

    fn process_row(
        &self,
        client: &Client,
        store: &SnapshotStore,
        row: &Row,
        errors: &mut Vec<String>,
        log: &mut dyn RunLog,
    ) {
        let request = match build_request(&self.config, row) {
            Ok(request) => request,
            Err(e) => {
                let message = format!("row {}: {e}", row.id());
                log.error(&message);
                errors.push(message);
                return;
            }
        };

        let mut outcome = execute(client, &request);
        apply_transforms(&self.transforms, &mut outcome.body);

        let file_name =
            snapshot_file_name(row, self.config.result_file_name_pattern.as_deref());

        let decision = match store.record(
            self.config.run_mode,
            self.config.store_policy,
            &file_name,
            outcome.is_success(),
            &outcome.body,
        ) {
            Ok(decision) => decision,
            Err(e) => {
                // Row is still logged below with the accurate (no-file) state.
                errors.push(format!("row {}: {e}", row.id()));
                SnapshotDecision::NotStored
            }
        };

        let mut line = format!(
            "{} {} {} {}",
            request.method,
            request.path_and_query,
            outcome.status,
            outcome.determination()
        );
        if decision != SnapshotDecision::NotStored {
            line.push_str(&format!(" {RESULTS_DIR}/{file_name}"));
            if self.config.run_mode == RunMode::CaptureAndCompare {
                line.push_str(&format!(" {decision}"));
            }
        }
        log.info(&line);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),
    #[error("HTTP client error: {0}")]
    Http(String),
}
