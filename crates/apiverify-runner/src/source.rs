//! Row sources
//!
//! The relational fetch itself is a black box behind `RowSource`; the
//! shipped implementation reads rows from a JSON file. A database-backed
//! source would implement the same trait.

use apiverify_core::{Row, RunConfig};

/// Produces the ordered row sequence for one run.
pub trait RowSource {
    /// Fetch all rows. An empty result is an empty run, not an error.
    ///
    /// # Errors
    ///
    /// Fails when the connection descriptor is missing or invalid — that
    /// aborts the whole run.
    fn fetch_rows(&self, config: &RunConfig) -> Result<Vec<Row>, SourceError>;
}

/// Reads rows from a JSON file holding an array of flat objects. The
/// config's `data_source_connection` is the file path and `data_fields`
/// selects which object members become row fields, in order. Row ids are
/// assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct JsonFileSource;

impl RowSource for JsonFileSource {
    fn fetch_rows(&self, config: &RunConfig) -> Result<Vec<Row>, SourceError> {
        let Some(connection) = config.data_source_connection.as_deref() else {
            return Err(SourceError::MissingConnection);
        };

        let content = std::fs::read_to_string(connection)
            .map_err(|e| SourceError::Io(format!("{connection}: {e}")))?;
        let parsed: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| SourceError::Parse(e.to_string()))?;
        let records = parsed
            .as_array()
            .ok_or_else(|| SourceError::Parse("expected a JSON array of row objects".into()))?;

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                SourceError::Parse(format!("row {} is not a JSON object", index + 1))
            })?;

            let mut fields = Vec::with_capacity(config.data_fields.len());
            for name in &config.data_fields {
                if let Some(value) = object.get(name) {
                    fields.push((name.clone(), value_to_string(value)));
                }
            }
            rows.push(Row::new(i64::try_from(index).unwrap_or(i64::MAX) + 1, fields));
        }

        Ok(rows)
    }
}

/// Row fields are strings; strip the quotes JSON strings would carry.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to load connection string")]
    MissingConnection,
    #[error("Cannot read data source: {0}")]
    Io(String),
    #[error("Invalid data source content: {0}")]
    Parse(String),
}
