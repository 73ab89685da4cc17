//! Bigram Batch Analytics Library
//!
//! This library crate defines the modules that make up the batch-processing
//! pipeline. It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three loosely coupled subsystems:
//!
//! - **`bigram`**: The pure data-transformation core. Contains the tokenizer,
//!   the bigram extractor (map logic), and the count aggregator that serves
//!   as both the combine and the reduce stage.
//! - **`engine`**: The batch execution layer. Defines the key/value contract,
//!   a registry mapping callback names to executable functions, record
//!   reading/output writing, and a local multi-worker engine that runs one
//!   job end to end (map -> combine -> shuffle -> reduce).
//! - **`driver`**: The job wiring layer. Builds an immutable job description
//!   from the command line, validates it, registers the bigram callbacks,
//!   and submits the job to the engine.

pub mod bigram;
pub mod driver;
pub mod engine;
