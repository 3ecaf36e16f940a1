//! Run logging seam
//!
//! One informational line per row plus a final summary line go through
//! this trait, so embedders and tests can capture the trail instead of
//! scraping stderr.

/// Sink for per-row and summary log lines.
pub trait RunLog {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Writes to stderr.
#[derive(Debug, Default)]
pub struct ConsoleLog;

impl RunLog for ConsoleLog {
    fn info(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Collects lines in memory for assertions.
#[derive(Debug, Default)]
pub struct MemoryLog {
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunLog for MemoryLog {
    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
