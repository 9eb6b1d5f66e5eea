//! Query configuration resolved once per parse invocation.
//!
//! A [`QueryConfig`] is immutable after construction and lives for exactly one
//! compile call. All invariant violations (unsupported method, empty key,
//! inverted or NaN score bounds) surface here as configuration errors, before
//! the store is ever contacted.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{Result, TermStoreError};
use crate::query::Occur;

/// The store read operation selected by configuration.
///
/// This is a closed set: anything else is rejected at construction, so the
/// retrieval code can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalMethod {
    /// All members of the set at the key (`smembers`). No scores.
    SetMembers,
    /// Sorted-set elements with score in range, walked max → min
    /// (`zrevrangebyscore`).
    RangeByScoreDesc,
    /// Sorted-set elements with score in range, walked min → max
    /// (`zrangebyscore`).
    RangeByScoreAsc,
}

impl RetrievalMethod {
    /// The parameter-map spelling of this method.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RetrievalMethod::SetMembers => "smembers",
            RetrievalMethod::RangeByScoreDesc => "zrevrangebyscore",
            RetrievalMethod::RangeByScoreAsc => "zrangebyscore",
        }
    }

    /// Whether this method pairs each term with a stored score.
    pub fn has_scores(&self) -> bool {
        !matches!(self, RetrievalMethod::SetMembers)
    }
}

impl FromStr for RetrievalMethod {
    type Err = TermStoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "smembers" => Ok(RetrievalMethod::SetMembers),
            "zrevrangebyscore" => Ok(RetrievalMethod::RangeByScoreDesc),
            "zrangebyscore" => Ok(RetrievalMethod::RangeByScoreAsc),
            other => {
                error!(method = other, "unsupported retrieval method");
                Err(TermStoreError::config(format!(
                    "unsupported retrieval method: {other}"
                )))
            }
        }
    }
}

/// A closed numeric interval for score-range retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl ScoreRange {
    /// Create a new range, rejecting NaN bounds and inverted intervals.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(TermStoreError::config("score bound must not be NaN"));
        }
        if min > max {
            return Err(TermStoreError::config(format!(
                "score range is inverted: min {min} > max {max}"
            )));
        }
        Ok(ScoreRange { min, max })
    }

    /// The full range (−∞, +∞).
    pub fn unbounded() -> Self {
        ScoreRange {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Check whether a score lies within the closed interval.
    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }

    /// Parse one textual bound: empty falls back to `default`, `-inf` /
    /// `+inf` / `inf` select the infinities, anything else must be numeric.
    fn parse_bound(value: Option<&str>, default: f64) -> Result<f64> {
        let text = match value.map(str::trim) {
            None | Some("") => return Ok(default),
            Some(text) => text,
        };
        match text {
            "-inf" => Ok(f64::NEG_INFINITY),
            "+inf" | "inf" => Ok(f64::INFINITY),
            _ => text.parse::<f64>().map_err(|_| {
                TermStoreError::config(format!("invalid score bound: {text}"))
            }),
        }
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Immutable configuration for one store-backed query compile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// The field every clause matches against.
    field: String,
    /// The store key holding the term set.
    key: String,
    /// The store read operation.
    method: RetrievalMethod,
    /// Occurrence shared by all clauses (AND → Must, OR → Should).
    occur: Occur,
    /// Analyze each term with the field's pipeline, or take it verbatim.
    use_field_analyzer: bool,
    /// Score interval for range methods.
    range: ScoreRange,
    /// Extra tries allowed after the first failed one.
    max_retries: u32,
}

impl QueryConfig {
    /// Create a configuration with defaults: OR semantics, field analyzer on,
    /// unbounded range, no retries.
    pub fn new<F, K>(field: F, key: K, method: RetrievalMethod) -> Result<Self>
    where
        F: Into<String>,
        K: Into<String>,
    {
        let key = key.into();
        if key.is_empty() {
            error!("no key passed to query configuration");
            return Err(TermStoreError::config("store key must not be empty"));
        }

        Ok(QueryConfig {
            field: field.into(),
            key,
            method,
            occur: Occur::Should,
            use_field_analyzer: true,
            range: ScoreRange::unbounded(),
            max_retries: 0,
        })
    }

    /// Build a configuration from a request-scoped string parameter map.
    ///
    /// Recognized parameters: `method` (required), `key` (required,
    /// non-empty), `operator` (`AND`|`OR`, default OR), `useAnalyzer`
    /// (boolean string, default true), `min`/`max` (numeric or `-inf`/`+inf`,
    /// default unbounded).
    pub fn from_params(field: &str, params: &HashMap<String, String>) -> Result<Self> {
        let method = params
            .get("method")
            .ok_or_else(|| {
                error!("no method argument passed");
                TermStoreError::config("missing required parameter: method")
            })?
            .parse::<RetrievalMethod>()?;

        let key = params.get("key").map(String::as_str).unwrap_or("");
        let mut config = QueryConfig::new(field, key, method)?;

        if let Some(op) = params.get("operator") {
            config.occur = if op.eq_ignore_ascii_case("AND") {
                Occur::Must
            } else {
                Occur::Should
            };
        }

        if let Some(flag) = params.get("useAnalyzer") {
            config.use_field_analyzer = flag.eq_ignore_ascii_case("true");
        }

        let min = ScoreRange::parse_bound(
            params.get("min").map(String::as_str),
            f64::NEG_INFINITY,
        )?;
        let max = ScoreRange::parse_bound(
            params.get("max").map(String::as_str),
            f64::INFINITY,
        )?;
        config.range = ScoreRange::new(min, max)?;

        Ok(config)
    }

    /// Set the clause occurrence.
    pub fn with_occur(mut self, occur: Occur) -> Self {
        self.occur = occur;
        self
    }

    /// Enable or disable the field analyzer.
    pub fn with_field_analyzer(mut self, use_field_analyzer: bool) -> Self {
        self.use_field_analyzer = use_field_analyzer;
        self
    }

    /// Set the score interval for range methods.
    pub fn with_range(mut self, range: ScoreRange) -> Self {
        self.range = range;
        self
    }

    /// Set the number of extra retrieval tries after the first failure.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the store key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the retrieval method.
    pub fn method(&self) -> RetrievalMethod {
        self.method
    }

    /// Get the clause occurrence.
    pub fn occur(&self) -> Occur {
        self.occur
    }

    /// Whether terms go through the field analyzer.
    pub fn use_field_analyzer(&self) -> bool {
        self.use_field_analyzer
    }

    /// Get the score interval.
    pub fn range(&self) -> ScoreRange {
        self.range
    }

    /// Get the retry budget.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
