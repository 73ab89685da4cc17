//! Job Driver
//!
//! Owns the wiring between the bigram core and the engine: the extractor is
//! the map callback, the count aggregator is both the combine and the reduce
//! callback. The driver validates the configuration, submits exactly one
//! job, and observes the terminal outcome. Retries and recovery are the
//! engine's business, never the driver's.

use super::config::{self, BIGRAM_TRANSFORM, COUNT_AGGREGATE};
use crate::bigram::aggregator::sum_counts;
use crate::bigram::extractor::extract_bigrams;
use crate::engine::local::LocalEngine;
use crate::engine::registry::FunctionRegistry;
use crate::engine::types::{Count, JobReport, JobSpec, Key, KeyValue};

use anyhow::Result;
use std::sync::Arc;

/// The map callback in registrable form.
pub fn bigram_transform(record: &str) -> Box<dyn Iterator<Item = KeyValue> + '_> {
    Box::new(extract_bigrams(record))
}

/// The combine/reduce callback in registrable form. The key is part of the
/// contract but the sum does not depend on it.
pub fn count_aggregate(_key: &Key, values: &mut dyn Iterator<Item = Count>) -> Count {
    sum_counts(values)
}

/// Configures and submits bigram-count jobs.
pub struct JobDriver {
    engine: Arc<LocalEngine>,
}

impl JobDriver {
    /// Creates a driver with the bigram callbacks registered and an engine
    /// with the given number of map workers.
    pub fn new(worker_count: usize) -> Self {
        let registry = FunctionRegistry::new();
        registry.register_transform(BIGRAM_TRANSFORM, bigram_transform);
        registry.register_aggregate(COUNT_AGGREGATE, count_aggregate);

        Self {
            engine: LocalEngine::new(registry, worker_count),
        }
    }

    /// Validates the job description and runs it to completion.
    ///
    /// # Returns
    /// * `Ok(JobReport)` once the engine reports success.
    /// * `Err` for configuration problems (raised before submission) or for
    ///   an engine-reported failure.
    pub async fn run(&self, spec: &JobSpec) -> Result<JobReport> {
        config::validate(spec)?;

        let report = self.engine.run_job(spec).await?;

        tracing::info!(
            "Driver observed terminal status {:?} for job {}",
            report.status,
            report.job_id.0
        );

        Ok(report)
    }
}
