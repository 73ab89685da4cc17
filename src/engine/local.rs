//! Local Batch Engine
//!
//! Runs one job end to end inside the current process, fanning the map stage
//! out across worker tasks. This is the in-process stand-in for a cluster
//! runtime: it honors the same contract (all values for a key reach exactly
//! one reduce invocation, combine and reduce share one callback) without any
//! distributed coordination.
//!
//! ## Responsibilities
//! - **Callback resolution**: unknown transform/aggregate names fail the job
//!   before any record is read.
//! - **Map + combine**: workers transform their share of the records and
//!   pre-aggregate per key before anything crosses a worker boundary.
//! - **Shuffle + reduce**: partial sums are grouped by key in a shared map,
//!   then reduced once per distinct key with the same aggregate callback.
//! - **Status tracking**: jobs advance `Submitted -> Running -> terminal`;
//!   the caller observes only the terminal outcome.

use super::io;
use super::registry::FunctionRegistry;
use super::types::{now_ms, Count, JobId, JobReport, JobSpec, JobStatus, Key, KeyValue};

use anyhow::Result;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The engine that drives one batch job at a time.
pub struct LocalEngine {
    /// Registry containing the actual code (callbacks) for jobs.
    registry: Arc<FunctionRegistry>,
    /// Number of concurrent map workers.
    worker_count: usize,
    /// Status of every job this engine has seen, by id.
    jobs: DashMap<JobId, JobStatus>,
}

impl LocalEngine {
    /// Creates a new LocalEngine.
    ///
    /// # Arguments
    /// * `worker_count`: Typically set to the number of CPU cores.
    pub fn new(registry: Arc<FunctionRegistry>, worker_count: usize) -> Arc<Self> {
        Arc::new(Self {
            registry,
            worker_count: worker_count.max(1),
            jobs: DashMap::new(),
        })
    }

    /// Runs a job to completion and reports the terminal outcome.
    ///
    /// On success the returned report carries `JobStatus::Succeeded` plus
    /// the run counters. Any failure marks the job `Failed` and propagates
    /// the error; there is no retry here.
    pub async fn run_job(&self, spec: &JobSpec) -> Result<JobReport> {
        let job_id = JobId::new();
        let started = now_ms();

        self.jobs.insert(job_id.clone(), JobStatus::Submitted);
        tracing::info!(
            "Submitted job {} ({} -> {})",
            job_id.0,
            spec.input.display(),
            spec.output.display()
        );

        match self.execute(&job_id, spec).await {
            Ok((records_read, pairs_emitted, distinct_keys)) => {
                self.jobs.insert(job_id.clone(), JobStatus::Succeeded);

                let report = JobReport {
                    job_id: job_id.clone(),
                    status: JobStatus::Succeeded,
                    records_read,
                    pairs_emitted,
                    distinct_keys,
                    elapsed_ms: now_ms() - started,
                };

                tracing::info!(
                    "Job {} succeeded: {} records, {} pairs, {} distinct keys in {} ms",
                    job_id.0,
                    report.records_read,
                    report.pairs_emitted,
                    report.distinct_keys,
                    report.elapsed_ms
                );

                Ok(report)
            }
            Err(e) => {
                self.jobs.insert(
                    job_id.clone(),
                    JobStatus::Failed {
                        error: e.to_string(),
                    },
                );
                tracing::error!("Job {} failed: {}", job_id.0, e);

                Err(e)
            }
        }
    }

    /// Retrieves the recorded status of a job.
    pub fn job_status(&self, job_id: &JobId) -> Option<JobStatus> {
        self.jobs.get(job_id).map(|entry| entry.value().clone())
    }

    /// Returns (submitted, running, succeeded, failed) counts over all jobs.
    pub fn job_status_counts(&self) -> (usize, usize, usize, usize) {
        let mut submitted = 0;
        let mut running = 0;
        let mut succeeded = 0;
        let mut failed = 0;

        for entry in self.jobs.iter() {
            match entry.value() {
                JobStatus::Submitted => submitted += 1,
                JobStatus::Running => running += 1,
                JobStatus::Succeeded => succeeded += 1,
                JobStatus::Failed { .. } => failed += 1,
            }
        }

        (submitted, running, succeeded, failed)
    }

    /// The actual map -> combine -> shuffle -> reduce run.
    ///
    /// Returns `(records_read, pairs_emitted, distinct_keys)`.
    async fn execute(&self, job_id: &JobId, spec: &JobSpec) -> Result<(usize, u64, usize)> {
        // Resolve callbacks up front so a bad name fails before any I/O
        let transform = self.registry.transform(&spec.transform)?;
        let aggregate = self.registry.aggregate(&spec.aggregate)?;

        self.jobs.insert(job_id.clone(), JobStatus::Running);

        let records = io::read_records(&spec.input).await?;
        let records_read = records.len();

        tracing::info!(
            "Job {}: {} records across {} workers",
            job_id.0,
            records_read,
            self.worker_count
        );

        let shuffle: Arc<DashMap<Key, Vec<Count>>> = Arc::new(DashMap::new());
        let pairs_emitted = Arc::new(AtomicU64::new(0));

        let chunk_size = records.len().div_ceil(self.worker_count).max(1);

        let mut handles = Vec::new();
        for (worker_id, chunk) in records.chunks(chunk_size).enumerate() {
            let chunk: Vec<String> = chunk.to_vec();
            let transform = transform.clone();
            let aggregate = aggregate.clone();
            let shuffle = shuffle.clone();
            let pairs_emitted = pairs_emitted.clone();

            handles.push(tokio::spawn(async move {
                // Map: records are independent, no state carries over
                let mut groups: HashMap<Key, Vec<Count>> = HashMap::new();
                for record in &chunk {
                    for (key, value) in transform(record) {
                        groups.entry(key).or_insert_with(Vec::new).push(value);
                    }
                }

                let emitted: u64 = groups.values().map(|values| values.len() as u64).sum();
                pairs_emitted.fetch_add(emitted, Ordering::Relaxed);

                // Combine: pre-aggregate this worker's values with the same
                // callback the reduce stage will apply to the partials
                let key_count = groups.len();
                for (key, values) in groups {
                    let partial = aggregate(&key, &mut values.into_iter());
                    shuffle
                        .entry(key)
                        .or_insert_with(Vec::new)
                        .push(partial);
                }

                tracing::debug!(
                    "Worker {} combined {} pairs into {} partial sums",
                    worker_id,
                    emitted,
                    key_count
                );
            }));
        }

        for handle in handles {
            handle.await?;
        }

        // Reduce: one invocation per distinct key over all partial sums
        let mut results: Vec<KeyValue> = Vec::with_capacity(shuffle.len());
        for entry in shuffle.iter() {
            let mut partials = entry.value().iter().copied();
            let total = aggregate(entry.key(), &mut partials);
            results.push((entry.key().clone(), total));
        }

        // Sorted output is an engine behavior; consumers of the core must
        // not assume it
        results.sort_by(|a, b| a.0.cmp(&b.0));
        let distinct_keys = results.len();

        io::write_output(&spec.output, &results).await?;

        Ok((
            records_read,
            pairs_emitted.load(Ordering::Relaxed),
            distinct_keys,
        ))
    }
}
