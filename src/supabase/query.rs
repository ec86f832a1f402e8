use crate::error::QueryError;
use crate::types::postgrest::{PostgrestError, QueryResponse};
use postgrest::Builder;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// Execute a prepared select once and map the reply into rows or a `QueryError`.
///
/// No retry is attempted.
pub async fn fetch_rows(query: Builder) -> Result<QueryResponse, QueryError> {
    let resp = query
        .execute()
        .await
        .map_err(|e| QueryError::Transport(Box::new(e)))?;

    let status = StatusCode::from_u16(resp.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp
        .text()
        .await
        .map_err(|e| QueryError::Transport(Box::new(e)))?;

    if status.is_success() {
        let data: Vec<Value> = serde_json::from_str(&body)?;
        debug!(rows = data.len(), "select succeeded");
        return Ok(QueryResponse { data });
    }

    match serde_json::from_str::<PostgrestError>(&body) {
        Ok(error) => Err(QueryError::Api { status, error }),
        Err(_) => Err(QueryError::UpstreamStatus { status, body }),
    }
}
