//! Forms filter proxy library.
//!
//! Serves `GET /{formId}/filteredResponses`: fetches every submission of a
//! form from the upstream forms API, keeps the ones matching all client
//! filter clauses and returns one page of them.

pub mod config;
pub mod filtering;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
