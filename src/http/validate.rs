//! Request validation for the filtered responses endpoint.
//!
//! Checks run in a fixed order and stop at the first failure:
//! credential, form id, filters payload shape, filters non-empty, then each
//! clause. Nothing here performs I/O, so a rejected request never reaches
//! the upstream API.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::filtering::{Condition, FilterClause, PageRequest};
use crate::http::response::ApiError;

/// A request that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub form_id: String,
    pub clauses: Vec<FilterClause>,
    pub page: PageRequest,
    /// `Authorization` header value, forwarded verbatim.
    pub credential: String,
    /// Query parameters passed through to the upstream call.
    pub forwarded: Vec<(String, String)>,
}

/// Validate the parts of an inbound request.
pub fn validate_request(
    headers: &HeaderMap,
    form_id: &str,
    query: &[(String, String)],
    body: &[u8],
    config: &ServiceConfig,
) -> Result<ValidatedRequest, ApiError> {
    let credential = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingCredential)?;

    let form_id = form_id.trim();
    if form_id.is_empty() {
        return Err(ApiError::MissingFormId);
    }

    let clauses = parse_clauses(body)?;
    let page = parse_page(query, config.pagination.default_limit);

    let forwarded = query
        .iter()
        .filter(|(key, _)| config.upstream.forwarded_params.iter().any(|p| p == key))
        .cloned()
        .collect();

    Ok(ValidatedRequest {
        form_id: form_id.to_string(),
        clauses,
        page,
        credential: credential.to_string(),
        forwarded,
    })
}

/// Parse the JSON body into a non-empty list of clauses.
pub fn parse_clauses(body: &[u8]) -> Result<Vec<FilterClause>, ApiError> {
    let items = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(items)) => items,
        _ => return Err(ApiError::FiltersNotArray),
    };

    if items.is_empty() {
        return Err(ApiError::NoFilters);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_clause(index, item))
        .collect()
}

fn parse_clause(index: usize, item: Value) -> Result<FilterClause, ApiError> {
    let invalid = |reason: &str| ApiError::InvalidClause {
        index,
        reason: reason.to_string(),
    };

    let Value::Object(mut fields) = item else {
        return Err(invalid("expected an object"));
    };

    let id = match fields.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => return Err(invalid("`id` must be a non-empty string")),
    };

    let condition = match fields.get("condition") {
        Some(Value::String(tag)) => Condition::from(tag.as_str()),
        _ => return Err(invalid("`condition` must be a string")),
    };

    let value = match fields.remove("value") {
        Some(value @ (Value::Number(_) | Value::String(_))) => value,
        _ => return Err(invalid("`value` must be a number or a string")),
    };

    Ok(FilterClause { id, condition, value })
}

/// Read `limit` and `offset`; absent or invalid values fall back to defaults.
pub fn parse_page(query: &[(String, String)], default_limit: usize) -> PageRequest {
    let param = |name: &str| {
        query
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
    };

    PageRequest {
        limit: param("limit").filter(|l| *l > 0).unwrap_or(default_limit),
        offset: param("offset").unwrap_or(0),
    }
}
