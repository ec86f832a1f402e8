#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::{collections::HashMap, sync::Arc};
use supabase_probe::{Credentials, SupabaseClient};
use tokio::net::TcpListener;

pub const SERVICE_KEY: &str = "abc123";

/// In-process stand-in for the PostgREST endpoint of a Supabase project.
#[derive(Clone)]
struct Backend {
    key: Arc<str>,
    tables: Arc<HashMap<String, Vec<Value>>>,
}

pub fn rows(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|id| json!({"id": id, "email": format!("user{id}@example.com")}))
        .collect()
}

/// Serve the given tables on an ephemeral port and return the base URL.
pub async fn spawn_backend(tables: Vec<(&str, Vec<Value>)>) -> String {
    let backend = Backend {
        key: Arc::from(SERVICE_KEY),
        tables: Arc::new(
            tables
                .into_iter()
                .map(|(name, rows)| (name.to_string(), rows))
                .collect(),
        ),
    };
    let app = Router::new()
        .route("/rest/v1/{table}", get(select_rows))
        .with_state(backend);
    serve(app).await
}

/// Serve a backend that answers every request with a bare 502 text body.
pub async fn spawn_broken_gateway() -> String {
    let app = Router::new().route(
        "/rest/v1/{table}",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream connect error") }),
    );
    serve(app).await
}

/// A URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn client(url: &str, key: &str) -> SupabaseClient {
    SupabaseClient::new(Credentials::new(url, key).expect("credentials must be non-empty"))
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend crashed");
    });
    format!("http://{addr}")
}

async fn select_rows(
    State(backend): State<Backend>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if apikey != Some(backend.key.as_ref()) || bearer != Some(backend.key.as_ref()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "code": "PGRST301",
                "details": null,
                "hint": null,
                "message": "Invalid API key"
            })),
        )
            .into_response();
    }

    if params.get("select").map(String::as_str) != Some("*") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": "PGRST100", "message": "unsupported select"})),
        )
            .into_response();
    }

    let Some(rows) = backend.tables.get(&table) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "code": "PGRST205",
                "details": null,
                "hint": "Perhaps you meant the table 'public.users'",
                "message": format!("Could not find the table 'public.{table}' in the schema cache")
            })),
        )
            .into_response();
    };

    let (offset, limit) = window(&params, &headers).unwrap_or((0, rows.len()));
    Json(rows.iter().skip(offset).take(limit).cloned().collect::<Vec<_>>()).into_response()
}

/// Row window from either `?limit=n` or a `Range: a-b` header.
fn window(params: &HashMap<String, String>, headers: &HeaderMap) -> Option<(usize, usize)> {
    if let Some(limit) = params.get("limit").and_then(|l| l.parse().ok()) {
        return Some((0, limit));
    }
    let range = headers.get("range")?.to_str().ok()?;
    let (start, end) = range.split_once('-')?;
    let start: usize = start.trim().parse().ok()?;
    let end: usize = end.trim().parse().ok()?;
    Some((start, end.checked_sub(start)? + 1))
}
