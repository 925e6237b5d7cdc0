//! Local filtering of form submissions.
//!
//! # Data Flow
//! ```text
//! Vec<Submission> (fetched upstream) + Vec<FilterClause> (validated request)
//!     → engine.rs: for each submission, every clause must pass (AND)
//!         → coerce.rs: raw equality, or numeric / epoch-ms ordering
//!     → engine.rs: slice [offset, offset + limit)
//!     → PageResult { responses, totalResponses, pageCount }
//! ```
//!
//! # Design Decisions
//! - Missing question ids exclude the submission rather than being ignored
//! - Coercion mismatches abort the request with a typed error
//! - Page count is computed over the filtered set, never the upstream total

pub mod coerce;
pub mod engine;
pub mod types;

pub use engine::{filter_and_paginate, matches_all};
pub use types::{Condition, FilterClause, FilterError, PageRequest, PageResult, Question, Submission};
