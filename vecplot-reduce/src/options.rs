//! Pass-through keyword options for reduction backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Neighbour count option name.
pub const OPT_NEIGHBOURS: &str = "k";
/// Mini-batch size option name.
pub const OPT_BATCH_SIZE: &str = "batch_size";
/// Verbosity option name.
pub const OPT_VERBOSE: &str = "verbose";

/// Upper bound on the derived neighbour count.
pub const MAX_DEFAULT_NEIGHBOURS: usize = 150;
/// Upper bound on the derived batch size.
pub const MAX_DEFAULT_BATCH_SIZE: usize = 128;

/// String-keyed backend options, kept in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformOptions(BTreeMap<String, Value>);

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)?.as_u64().map(|v| v as usize)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    /// Insert every entry of `defaults` whose key is not already set.
    pub fn fill_missing(&mut self, defaults: TransformOptions) {
        for (key, value) in defaults.0 {
            self.0.entry(key).or_insert(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Defaults derived from the number of input rows for neighbour-based
/// backends: `k = min(n - 2, 150)`, `batch_size = min(n, 128)`, silent.
///
/// With fewer than two rows `k` saturates at 0 and the backend decides.
pub fn neighbour_defaults(n_rows: usize) -> TransformOptions {
    TransformOptions::new()
        .with(
            OPT_NEIGHBOURS,
            n_rows.saturating_sub(2).min(MAX_DEFAULT_NEIGHBOURS),
        )
        .with(OPT_BATCH_SIZE, n_rows.min(MAX_DEFAULT_BATCH_SIZE))
        .with(OPT_VERBOSE, 0)
}
