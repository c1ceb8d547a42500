//! Search engine configuration via `sift.toml`
//!
//! Result bounds, the relevance tie tolerance, the accumulator shard
//! count and the request-log window are carried in a `SearchConfig`
//! passed at construction instead of process-wide constants.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "sift.toml";

/// Default number of results returned by a top-K search.
pub const DEFAULT_MAX_RESULTS: usize = 5;
/// Default relevance tolerance under which two results tie.
pub const DEFAULT_RELEVANCE_EPSILON: f64 = 1e-6;
/// Default number of shards in a `ConcurrentAccumulator`.
pub const DEFAULT_ACCUMULATOR_SHARDS: usize = 100;
/// Default number of requests retained by the request log.
pub const DEFAULT_REQUEST_WINDOW: usize = 1440;

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_relevance_epsilon() -> f64 {
    DEFAULT_RELEVANCE_EPSILON
}

fn default_accumulator_shards() -> usize {
    DEFAULT_ACCUMULATOR_SHARDS
}

fn default_request_window() -> usize {
    DEFAULT_REQUEST_WINDOW
}

/// Search engine configuration.
///
/// # Example
///
/// ```toml
/// max_results = 5
/// relevance_epsilon = 1e-6
/// accumulator_shards = 100
/// request_window = 1440
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results returned by a top-K search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Results whose relevance differs by less than this are ordered by rating.
    #[serde(default = "default_relevance_epsilon")]
    pub relevance_epsilon: f64,
    /// Shard count used for parallel score accumulation.
    #[serde(default = "default_accumulator_shards")]
    pub accumulator_shards: usize,
    /// Number of most recent requests kept by the request log.
    #[serde(default = "default_request_window")]
    pub request_window: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            relevance_epsilon: DEFAULT_RELEVANCE_EPSILON,
            accumulator_shards: DEFAULT_ACCUMULATOR_SHARDS,
            request_window: DEFAULT_REQUEST_WINDOW,
        }
    }
}

impl SearchConfig {
    /// Create a SearchConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of results
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the relevance tie tolerance
    pub fn with_relevance_epsilon(mut self, relevance_epsilon: f64) -> Self {
        self.relevance_epsilon = relevance_epsilon;
        self
    }

    /// Set the accumulator shard count
    pub fn with_accumulator_shards(mut self, accumulator_shards: usize) -> Self {
        self.accumulator_shards = accumulator_shards;
        self
    }

    /// Set the request-log window
    pub fn with_request_window(mut self, request_window: usize) -> Self {
        self.request_window = request_window;
        self
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::config("max_results must be at least 1"));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(Error::config(format!(
                "relevance_epsilon must be a finite non-negative number, got {}",
                self.relevance_epsilon
            )));
        }
        if self.accumulator_shards == 0 {
            return Err(Error::config("accumulator_shards must be at least 1"));
        }
        if self.request_window == 0 {
            return Err(Error::config("request_window must be at least 1"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Sift search engine configuration
#
# Maximum number of documents returned by a top-K search.
max_results = 5

# Documents whose relevance differs by less than this are ordered by rating.
relevance_epsilon = 1e-6

# Shard count for parallel score accumulation.
accumulator_shards = 100

# Number of recent requests kept by the request log.
request_window = 1440
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::IoError` if the file cannot be read and
    /// `Error::Config` if it cannot be parsed or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!(
                "Failed to load config file '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}
