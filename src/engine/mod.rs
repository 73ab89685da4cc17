//! Batch Execution Engine
//!
//! This module implements the execution contract the pipeline core is bound
//! to: records go in one at a time, key/value pairs come out, and all values
//! for a given key are delivered together to exactly one reduce invocation.
//!
//! ## Architecture Overview
//! A job runs in four phases:
//! 1. **Map**: each input record is fed to the registered record transform,
//!    which emits zero or more `(key, value)` pairs. Records are independent,
//!    so this phase fans out across workers with no coordination.
//! 2. **Combine**: each worker groups its own emissions by key and
//!    pre-aggregates them with the registered aggregate function, shrinking
//!    the data before it crosses worker boundaries.
//! 3. **Shuffle**: partial sums from all workers are grouped by key in a
//!    shared concurrent map.
//! 4. **Reduce**: the same aggregate function runs once per distinct key
//!    over the gathered partials, producing the final output records.
//!
//! ## Submodules
//! - **`types`**: the key/value contract, job identifiers, job status, and
//!   the completion report.
//! - **`registry`**: maps string identifiers (e.g. "bigram_extract") to
//!   executable callbacks, so job descriptions stay plain data.
//! - **`io`**: record reading and output writing.
//! - **`local`**: the in-process multi-worker engine that runs one job.

pub mod io;
pub mod local;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;
