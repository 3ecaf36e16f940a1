//! One unit of input data driving one request

use serde::{Deserialize, Serialize};

/// A row identifier plus an ordered, duplicate-free field mapping.
/// Immutable once produced by a row source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    id: i64,
    fields: Vec<(String, String)>,
}

impl Row {
    /// Build a row from `(name, value)` pairs. Later duplicates of a field
    /// name are dropped; the first occurrence wins.
    #[must_use]
    pub fn new(id: i64, fields: Vec<(String, String)>) -> Self {
        let mut deduped: Vec<(String, String)> = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            if !deduped.iter().any(|(n, _)| *n == name) {
                deduped.push((name, value));
            }
        }
        Self {
            id,
            fields: deduped,
        }
    }

    /// The degenerate row for a static (non data-driven) run.
    #[must_use]
    pub fn empty(id: i64) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Resolve a field by name. Returns `None` for unknown fields so
    /// templates referencing optional fields stay verbatim.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in their original order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
