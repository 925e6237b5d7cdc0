//! Forms API client with timeout and error handling.
//!
//! # Responsibilities
//! - Build the submissions URL for a form
//! - Forward the caller's credential verbatim
//! - Translate non-200 answers, timeouts and transport failures into
//!   [`UpstreamError`]
//! - Decode the submissions listing

use std::time::{Duration, Instant};

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use url::Url;

use crate::config::UpstreamConfig;
use crate::filtering::Submission;
use crate::observability::metrics;
use crate::upstream::types::{error_message, SubmissionsPage, UpstreamError, UpstreamResult};

/// Client for the upstream forms API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FormsClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl FormsClient {
    /// Create a new client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(format!(
                "'{}' cannot be a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            base_url,
            timeout_secs: config.timeout_secs,
        })
    }

    /// URL of the submissions listing for `form_id`.
    ///
    /// The form id is percent-encoded as a single path segment.
    pub fn submissions_url(&self, form_id: &str, query: &[(String, String)]) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", "api", "forms", form_id, "submissions"]);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Fetch every submission of a form in a single call.
    pub async fn fetch_submissions(
        &self,
        form_id: &str,
        credential: &str,
        query: &[(String, String)],
    ) -> UpstreamResult<Vec<Submission>> {
        let url = self.submissions_url(form_id, query)?;
        let start = Instant::now();

        tracing::debug!(url = %url, "Fetching submissions from upstream");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, credential)
            .send()
            .await
            .map_err(|e| self.classify(e));

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                metrics::record_upstream("error", start);
                return Err(e);
            }
        };

        let status = response.status();
        metrics::record_upstream(status.as_str(), start);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!(form_id = %form_id, status = %status, message = %message, "Upstream returned an error");
            return Err(UpstreamError::Status { status, message });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                UpstreamError::MalformedPayload(e.to_string())
            } else {
                self.classify(e)
            }
        })?;

        let page = SubmissionsPage::from_value(body)?;
        tracing::debug!(form_id = %form_id, submissions = page.responses.len(), "Upstream submissions received");

        Ok(page.responses)
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout_secs)
        } else {
            UpstreamError::Transport(error)
        }
    }
}
