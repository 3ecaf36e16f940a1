//! Run configuration for API verification

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One run definition. Immutable once loaded; shared read-only across the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Base URL of the server under test, e.g. "http://localhost:7055"
    pub url_base: String,

    /// Path template, e.g. "/WeatherForecast/{bindingId}". Required.
    pub url_path: String,

    /// Query parameters in emission order. Values are templates.
    #[serde(default)]
    pub url_params: Vec<Param>,

    /// Request headers. Values are templates; names are sent verbatim.
    #[serde(default)]
    pub header_params: Vec<Param>,

    /// Optional request body template. Absent means no body is sent.
    #[serde(default)]
    pub request_body: Option<String>,

    /// Data source connection descriptor. Absent means a single static
    /// request is executed instead of a data-driven run.
    #[serde(default)]
    pub data_source_connection: Option<String>,

    /// Query/selector handed to the row source.
    #[serde(default)]
    pub data_query: Option<String>,

    /// Field names to bind from each row, in order.
    #[serde(default)]
    pub data_fields: Vec<String>,

    /// HTTP method, e.g. "GET". Required.
    pub request_method: String,

    /// Which outcomes get their response body persisted.
    #[serde(default)]
    pub store_policy: StorePolicy,

    /// Capture/compare behavior of the run.
    #[serde(default)]
    pub run_mode: RunMode,

    /// Optional snapshot filename pattern, e.g. "{fileRecordType}-{bindingId}".
    /// Without it filenames derive from the row id alone.
    #[serde(default)]
    pub result_file_name_pattern: Option<String>,

    /// Directory under which the `Results/` subdirectory is created.
    pub output_location: PathBuf,

    /// Per-request timeout in seconds (default 10).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// An ordered name/value pair. The value side is a template resolved
/// against the current row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Snapshot persistence policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorePolicy {
    /// Never write response bodies.
    #[default]
    None,
    /// Write only non-2xx outcomes.
    FailuresOnly,
    /// Write every outcome.
    All,
}

/// What the run does with stored snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunMode {
    /// Execute requests, never touch snapshot files.
    #[default]
    Run,
    /// Write snapshots, no comparison.
    Capture,
    /// Compare against prior snapshots, updating the baseline on mismatch.
    CaptureAndCompare,
}

impl RunConfig {
    /// Load config from file. TOML by default, JSON when the extension says so.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Load from the default locations, first hit wins.
    pub fn load_default() -> Result<Self, ConfigError> {
        let candidates = ["apiverify.toml", ".apiverify.toml", "apiverify.json"];

        for name in candidates {
            let path = Path::new(name);
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(ConfigError::NoConfigFile)
    }

    /// Check the invariants the builder relies on: method and path present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first absent field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_method.trim().is_empty() {
            return Err(ConfigError::MissingField("request_method"));
        }
        if self.url_path.trim().is_empty() {
            return Err(ConfigError::MissingField("url_path"));
        }
        Ok(())
    }

    /// Whether rows come from a data source or the run is a single static request.
    #[must_use]
    pub fn is_data_driven(&self) -> bool {
        self.data_source_connection.is_some()
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Create example config file content.
    pub fn example() -> &'static str {
        r#"# apiverify configuration

# Server under test
url_base = "http://localhost:7055"

# Path template; {field} tokens bind to row fields
url_path = "/WeatherForecast"

request_method = "GET"

# Optional request body template
# request_body = '{"name":"{userName}"}'

# Data source: a JSON file holding an array of row objects.
# Leave unset for a single static request.
# data_source_connection = "rows.json"
# data_fields = ["bindingId", "fileRecordType"]

# None | FailuresOnly | All
store_policy = "None"

# Run | Capture | CaptureAndCompare
run_mode = "Run"

# Snapshot filename pattern (default: request-<rowId>.json)
# result_file_name_pattern = "{fileRecordType}-{bindingId}"

output_location = "."

# request_timeout_secs = 10

# Query parameters, appended in order. Values are templates:
# literal text passes through, {field} binds to the current row.
[[url_params]]
name = "urlKey"
value = "configKey"

[[url_params]]
name = "id"
value = "{bindingId}"

[[header_params]]
name = "accept"
value = "application/json"
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Missing required config field: {0}")]
    MissingField(&'static str),
    #[error("No config file found (looked for apiverify.toml)")]
    NoConfigFile,
}
