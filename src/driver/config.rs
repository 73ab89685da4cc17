//! Job Configuration
//!
//! Turns the command line into an immutable `JobSpec` and validates it
//! before submission. Configuration failures are typed so callers can print
//! them and exit without touching the engine.

use crate::engine::types::JobSpec;

use std::path::PathBuf;
use thiserror::Error;

/// Name the bigram extractor is registered under.
pub const BIGRAM_TRANSFORM: &str = "bigram_extract";

/// Name the count aggregator is registered under. One name serves both the
/// combine and the reduce stage.
pub const COUNT_AGGREGATE: &str = "count_sum";

/// A problem with the job configuration, caught before submission.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required argument: <{0}>")]
    MissingArgument(&'static str),

    #[error("input location does not exist: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("output location already exists: {}", .0.display())]
    OutputExists(PathBuf),
}

/// Builds a job description from the raw process arguments.
///
/// Expects `args[1]` = input location and `args[2]` = output location.
/// A missing argument is a configuration error, never an index panic.
pub fn from_args(args: &[String]) -> Result<JobSpec, ConfigError> {
    let input = args.get(1).ok_or(ConfigError::MissingArgument("input"))?;
    let output = args.get(2).ok_or(ConfigError::MissingArgument("output"))?;

    Ok(JobSpec {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        transform: BIGRAM_TRANSFORM.to_string(),
        aggregate: COUNT_AGGREGATE.to_string(),
    })
}

/// Fail-fast checks on an assembled job description.
///
/// The input location must exist, and the output location must not: the
/// engine never clobbers the results of an earlier run.
pub fn validate(spec: &JobSpec) -> Result<(), ConfigError> {
    if !spec.input.exists() {
        return Err(ConfigError::InputMissing(spec.input.clone()));
    }

    if spec.output.exists() {
        return Err(ConfigError::OutputExists(spec.output.clone()));
    }

    Ok(())
}
