//! Route handlers.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::filtering::{filter_and_paginate, PageResult};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::http::validate::validate_request;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /{form_id}/filteredResponses`
pub async fn filtered_responses(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    respond(&state, &form_id, query, &headers, &body).await
}

/// `GET /filteredResponses`: same endpoint with the form id left out.
pub async fn filtered_responses_without_form(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    respond(&state, "", query, &headers, &body).await
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn respond(
    state: &AppState,
    form_id: &str,
    query: Option<String>,
    headers: &HeaderMap,
    body: &[u8],
) -> Response {
    let start = Instant::now();
    let request_id = request_id(headers);
    let query = parse_query(query.as_deref());

    let response = match filter_submissions(state, form_id, &query, headers, body).await {
        Ok(page) => {
            tracing::info!(
                request_id = %request_id,
                form_id = %form_id,
                returned = page.total_responses,
                page_count = page.page_count,
                "Filtered responses served"
            );
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => {
            let status = e.status_code();
            if matches!(e, ApiError::Upstream(_)) {
                tracing::error!(request_id = %request_id, form_id = %form_id, status = %status, error = %e, "Upstream request failed");
            } else {
                tracing::warn!(request_id = %request_id, form_id = %form_id, status = %status, error = %e, "Request rejected");
            }
            e.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start);
    response
}

async fn filter_submissions(
    state: &AppState,
    form_id: &str,
    query: &[(String, String)],
    headers: &HeaderMap,
    body: &[u8],
) -> Result<PageResult, ApiError> {
    let request = validate_request(headers, form_id, query, body, &state.config)?;

    let submissions = state
        .upstream
        .fetch_submissions(&request.form_id, &request.credential, &request.forwarded)
        .await?;
    metrics::record_fetched(submissions.len());

    tracing::debug!(
        form_id = %request.form_id,
        fetched = submissions.len(),
        clauses = request.clauses.len(),
        limit = request.page.limit,
        offset = request.page.offset,
        "Applying filters"
    );

    Ok(filter_and_paginate(&submissions, &request.clauses, request.page)?)
}

fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}
