//! Callback Function Registry
//!
//! A dynamic registry that maps string-based callback names (e.g.
//! "bigram_extract") to executable Rust functions. Job descriptions carry
//! only the names, which keeps them plain serializable data and keeps the
//! engine generic over what is actually being computed.

use super::types::{Count, Key, KeyValue};

use anyhow::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// A map-stage callback: turns one record into a stream of key/value pairs.
///
/// The returned iterator may borrow from the record, so emission stays lazy.
pub type RecordTransformFn =
    Arc<dyn for<'a> Fn(&'a str) -> Box<dyn Iterator<Item = KeyValue> + 'a> + Send + Sync>;

/// A combine/reduce callback: folds all values sharing one key into a single
/// value. The engine invokes it with raw map emissions (combine) and with
/// prior partial results (reduce); implementations must accept both.
pub type AggregateFn = Arc<dyn Fn(&Key, &mut dyn Iterator<Item = Count>) -> Count + Send + Sync>;

/// Registry holding the mapping between callback names and their implementation.
pub struct FunctionRegistry {
    transforms: DashMap<String, RecordTransformFn>,
    aggregates: DashMap<String, AggregateFn>,
}

impl FunctionRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            transforms: DashMap::new(),
            aggregates: DashMap::new(),
        })
    }

    /// Registers a record transform under a specific name.
    pub fn register_transform<F>(&self, name: &str, transform: F)
    where
        F: for<'a> Fn(&'a str) -> Box<dyn Iterator<Item = KeyValue> + 'a> + Send + Sync + 'static,
    {
        self.transforms.insert(name.to_string(), Arc::new(transform));

        tracing::info!("Registered record transform: {}", name);
    }

    /// Registers an aggregate function under a specific name.
    pub fn register_aggregate<F>(&self, name: &str, aggregate: F)
    where
        F: Fn(&Key, &mut dyn Iterator<Item = Count>) -> Count + Send + Sync + 'static,
    {
        self.aggregates.insert(name.to_string(), Arc::new(aggregate));

        tracing::info!("Registered aggregate function: {}", name);
    }

    /// Looks up a record transform by name.
    ///
    /// # Returns
    /// * The callback, ready to invoke per record.
    /// * `Err` if no transform was registered under the given name.
    pub fn transform(&self, name: &str) -> Result<RecordTransformFn> {
        self.transforms
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| anyhow::anyhow!("Unknown record transform: {}", name))
    }

    /// Looks up an aggregate function by name.
    pub fn aggregate(&self, name: &str) -> Result<AggregateFn> {
        self.aggregates
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| anyhow::anyhow!("Unknown aggregate function: {}", name))
    }

    /// Checks if a record transform is registered.
    pub fn has_transform(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    /// Checks if an aggregate function is registered.
    pub fn has_aggregate(&self, name: &str) -> bool {
        self.aggregates.contains_key(name)
    }

    /// Returns a list of all registered transform names.
    pub fn list_transforms(&self) -> Vec<String> {
        self.transforms
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Returns the total number of registered callbacks of either kind.
    pub fn callback_count(&self) -> usize {
        self.transforms.len() + self.aggregates.len()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self {
            transforms: DashMap::new(),
            aggregates: DashMap::new(),
        }
    }
}
