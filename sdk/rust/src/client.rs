use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One filter predicate. `condition` is one of `equals`, `does_not_equal`,
/// `greater_than`, `less_than`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterClause {
    pub id: String,
    pub condition: String,
    pub value: Value,
}

impl FilterClause {
    pub fn new(id: &str, condition: &str, value: impl Into<Value>) -> Self {
        Self {
            id: id.to_string(),
            condition: condition.to_string(),
            value: value.into(),
        }
    }

    pub fn equals(id: &str, value: impl Into<Value>) -> Self {
        Self::new(id, "equals", value)
    }

    pub fn does_not_equal(id: &str, value: impl Into<Value>) -> Self {
        Self::new(id, "does_not_equal", value)
    }

    pub fn greater_than(id: &str, value: impl Into<Value>) -> Self {
        Self::new(id, "greater_than", value)
    }

    pub fn less_than(id: &str, value: impl Into<Value>) -> Self {
        Self::new(id, "less_than", value)
    }
}

/// One page of filtered submissions. Submissions are left as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredPage {
    pub responses: Vec<Value>,
    pub total_responses: usize,
    pub page_count: usize,
}

#[derive(Debug, Error)]
pub enum SdkError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The proxy answered with an error status.
    #[error("Proxy returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub struct FormsProxyClient {
    client: Client,
    proxy_url: String,
    credential: Option<String>,
}

impl FormsProxyClient {
    pub fn new(proxy_url: &str) -> Self {
        Self {
            client: Client::new(),
            proxy_url: proxy_url.trim_end_matches('/').to_string(),
            credential: None,
        }
    }

    /// Credential sent as the `Authorization` header on every call.
    pub fn with_credential(mut self, credential: &str) -> Self {
        self.credential = Some(credential.to_string());
        self
    }

    /// Fetch one page of submissions matching every clause.
    pub async fn filtered_responses(
        &self,
        form_id: &str,
        filters: &[FilterClause],
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<FilteredPage, SdkError> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let body = serde_json::to_value(filters).unwrap_or(Value::Array(Vec::new()));
        let resp = self.send_raw(form_id, &body, &query).await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(SdkError::Api { status: status.as_u16(), message });
        }

        serde_json::from_str::<FilteredPage>(&text).map_err(|e| SdkError::Api {
            status: status.as_u16(),
            message: format!("Unexpected response body: {}", e),
        })
    }

    /// Send an arbitrary JSON body to the filtered endpoint.
    pub async fn send_raw(
        &self,
        form_id: &str,
        body: &Value,
        query: &[(&str, String)],
    ) -> Result<Response, reqwest::Error> {
        let mut req = self
            .client
            .get(format!("{}/{}/filteredResponses", self.proxy_url, form_id))
            .query(query)
            .json(body);
        if let Some(credential) = &self.credential {
            req = req.header(AUTHORIZATION, credential);
        }
        req.send().await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Value, SdkError> {
        let resp = self.client.get(format!("{}/health", self.proxy_url)).send().await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_status_and_message() {
        let err = SdkError::Api {
            status: 404,
            message: "Form not found".into(),
        };
        assert_eq!(err.to_string(), "Proxy returned 404: Form not found");
    }
}
