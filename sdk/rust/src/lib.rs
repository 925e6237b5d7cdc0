//! Rust client for the forms filter proxy.

mod client;

pub use client::{FilterClause, FilteredPage, FormsProxyClient, SdkError};
