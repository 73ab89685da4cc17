use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Intermediate and output keys are opaque comparable strings.
/// For this pipeline a key is a bigram in its canonical `"tokenA tokenB"` form.
pub type Key = String;

/// A non-negative occurrence count. 64 bits wide so that aggregated totals
/// cannot overflow at corpus scale.
pub type Count = u64;

/// One intermediate or aggregated pair flowing through the engine.
pub type KeyValue = (Key, Count);

/// Unique identifier for a job submission.
///
/// Wrapper around a UUID string, mirroring how tasks are identified
/// elsewhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl JobId {
    /// Generates a new random UUID v4-based JobId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Represents the lifecycle state of a job.
///
/// States advance linearly: `Submitted -> Running -> Succeeded | Failed`.
/// Callers observe only the terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum JobStatus {
    /// Job has been accepted but no work has started.
    Submitted,
    /// Workers are processing the input records.
    Running,
    /// Output was written in full.
    Succeeded,
    /// Some phase returned an error; no usable output exists.
    Failed { error: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed { .. })
    }
}

/// Immutable description of one batch job.
///
/// Constructed once by the driver and passed to the engine invocation.
/// The `transform` and `aggregate` fields name callbacks registered in the
/// `FunctionRegistry`; a single aggregate identifier serves both the combine
/// and the reduce stage, so the two can never diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// Input location: a text file, or a directory of text files.
    pub input: PathBuf,
    /// Output location: a directory that must not yet exist.
    pub output: PathBuf,
    /// Name of the registered record transform (map callback).
    pub transform: String,
    /// Name of the registered aggregate function (combine and reduce callback).
    pub aggregate: String,
}

/// Summary returned to the driver once a job reaches a terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    pub job_id: JobId,
    pub status: JobStatus,
    /// Input records read across all files.
    pub records_read: usize,
    /// Intermediate pairs emitted by the map stage before combining.
    pub pairs_emitted: u64,
    /// Distinct keys in the final output.
    pub distinct_keys: usize,
    pub elapsed_ms: u64,
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
