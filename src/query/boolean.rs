//! Boolean term query produced by store-backed expansion.
//!
//! The terminal artifact of a compile invocation: an immutable collection of
//! weighted single-field term clauses sharing one occurrence requirement.
//! Execution belongs to the host's matching machinery, not to this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occur {
    /// The clause must match (equivalent to AND).
    Must,
    /// The clause should match (equivalent to OR).
    Should,
}

impl fmt::Display for Occur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occur::Must => write!(f, "AND"),
            Occur::Should => write!(f, "OR"),
        }
    }
}

/// One term-match condition with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermClause {
    /// The field to match against.
    pub field: String,
    /// The normalized term.
    pub term: String,
    /// The clause weight (default: 1.0).
    pub boost: f32,
}

impl TermClause {
    /// Create a new clause with the default weight.
    pub fn new<F, T>(field: F, term: T) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        TermClause {
            field: field.into(),
            term: term.into(),
            boost: 1.0,
        }
    }

    /// Set the clause weight.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Describe this clause in `field:term^boost` form.
    pub fn description(&self) -> String {
        if self.boost == 1.0 {
            format!("{}:{}", self.field, self.term)
        } else {
            format!("{}:{}^{}", self.field, self.term, self.boost)
        }
    }
}

/// A boolean query whose clauses all share one occurrence requirement.
///
/// Zero clauses is a valid query meaning "match nothing" under the field.
/// Relative clause order carries no semantics under a uniform operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanTermQuery {
    clauses: Vec<TermClause>,
    occur: Occur,
}

impl BooleanTermQuery {
    /// Create a new empty query with the given occurrence.
    pub fn new(occur: Occur) -> Self {
        BooleanTermQuery {
            clauses: Vec::new(),
            occur,
        }
    }

    /// Add a clause to this query.
    pub fn add_clause(&mut self, clause: TermClause) {
        self.clauses.push(clause);
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[TermClause] {
        &self.clauses
    }

    /// Get the shared occurrence requirement.
    pub fn occur(&self) -> Occur {
        self.occur
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Check if this query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Describe the query, e.g. `(title:red OR title:blue^2)`.
    pub fn description(&self) -> String {
        let parts: Vec<String> = self.clauses.iter().map(TermClause::description).collect();
        format!("({})", parts.join(&format!(" {} ", self.occur)))
    }
}
