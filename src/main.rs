//! Forms Filter Proxy
//!
//! Adds server-side filtering and pagination in front of a forms API that
//! only lists submissions.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │              FORMS FILTER PROXY                │
//!                        │                                               │
//!   Client Request       │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!   ─────────────────────┼─▶│  http   │───▶│ validate │───▶│ upstream │──┼──▶ Forms API
//!                        │  │ server  │    │ request  │    │  client  │  │
//!                        │  └─────────┘    └──────────┘    └────┬─────┘  │
//!                        │                                      │        │
//!                        │                                      ▼        │
//!   Client Response      │  ┌─────────┐                  ┌────────────┐  │
//!   ◀────────────────────┼──│  JSON   │◀─────────────────│ filtering  │  │
//!                        │  │ page /  │                  │ AND + page │  │
//!                        │  │ error   │                  └────────────┘  │
//!                        │  └─────────┘                                  │
//!                        │                                               │
//!                        │  config · observability · lifecycle           │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use forms_filter_proxy::config::load_from_env;
use forms_filter_proxy::lifecycle::signals::spawn_signal_handler;
use forms_filter_proxy::lifecycle::startup;
use forms_filter_proxy::lifecycle::Shutdown;
use forms_filter_proxy::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.listener.port,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        default_limit = config.pagination.default_limit,
        "forms-filter-proxy starting"
    );

    let shutdown = Arc::new(Shutdown::new());
    spawn_signal_handler(shutdown.clone());

    startup::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
