//! apiverify-runner: request building, dispatch and run orchestration

pub mod dispatch;
pub mod log;
pub mod request;
pub mod runner;
pub mod source;

pub use dispatch::execute;
pub use log::{ConsoleLog, MemoryLog, RunLog};
pub use request::{BuildError, PopulatedRequest, build_request};
pub use runner::{Runner, RunnerError, RunSummary};
pub use source::{JsonFileSource, RowSource, SourceError};
