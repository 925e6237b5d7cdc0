//! Upstream forms API integration.
//!
//! # Data Flow
//! ```text
//! validated request (form id, credential, pass-through params)
//!     → client.rs: GET {base}/v1/api/forms/{formId}/submissions
//!     → non-200            → UpstreamError::Status (status + message forwarded)
//!     → timeout / network  → UpstreamError::Timeout / Transport
//!     → 200                → types.rs: decode `responses` → Vec<Submission>
//! ```
//!
//! # Design Decisions
//! - One call per request; no retries, no caching
//! - The full submission set is fetched at once and filtered in memory

pub mod client;
pub mod types;

pub use client::FormsClient;
pub use types::{UpstreamError, UpstreamResult};
