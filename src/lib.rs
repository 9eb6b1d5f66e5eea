//! # Termstore
//!
//! Store-backed query expansion for full-text search.
//!
//! At query-parse time a dynamic set of terms (optionally weighted) is fetched
//! from an external key-value/sorted-set store and compiled into a single
//! boolean term query against one field.
//!
//! ## Pipeline
//!
//! ```text
//! Store (pooled connection, bounded retry)
//!     ↓ RetrievedTermSet
//! TermTokenizer (field analyzer or verbatim)
//!     ↓ tokens per term
//! QueryAssembler (uniform operator, per-term weights)
//!     ↓
//! BooleanTermQuery
//! ```
//!
//! The store and the text-analysis pipeline are seams: implement
//! [`store::StoreConnection`] / [`store::StorePool`] for a real backend and
//! hand the field's [`analysis::Analyzer`] to [`query::compile`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod query;
pub mod retrieval;
pub mod store;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
