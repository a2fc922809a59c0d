//! Routes and middleware
//!
//! The data routes never fail: the core always returns a degraded figure
//! instead of an error, so every response is `200` with `success: true`.

use super::responses::{DebtResponse, HealthResponse, HistoryResponse};
use super::AppState;
use crate::domain::Currency;
use axum::extract::{RawQuery, Request, State};
use axum::http::header::{CACHE_CONTROL, PRAGMA};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

const NO_CACHE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/debt", get(get_debt))
        .route("/debt/history", get(get_history))
        .route("/health", get(get_health))
        .layer(middleware::from_fn(request_context))
        .with_state(state)
}

async fn get_debt(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<DebtResponse> {
    let currency = requested_currency(&state, query.as_deref());
    let snapshot = state.service.snapshot(currency).await;
    tracing::info!(
        data_source = %snapshot.data_source,
        period = %snapshot.period,
        currency = %snapshot.currency,
        "Serving debt snapshot"
    );
    Json(snapshot.into())
}

async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let history = state.service.history().await;
    tracing::info!(
        points = history.points.len(),
        simulated = history.simulated,
        "Serving debt history"
    );
    Json(history.into())
}

async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Currency from the `currency` query parameter; unknown or absent means USD
fn requested_currency(state: &AppState, query: Option<&str>) -> Currency {
    let Some(code) = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "currency")
            .map(|(_, value)| value.into_owned())
    }) else {
        return Currency::Usd;
    };

    state.service.rates().parse_currency(&code).unwrap_or_else(|| {
        tracing::debug!(currency = %code, "Unknown currency requested, using USD");
        Currency::Usd
    })
}

/// Request span, completion log and no-cache headers
async fn request_context(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let started = Instant::now();

    let mut response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::debug!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
    });

    let headers = response.headers_mut();
    apply_no_cache(headers);
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(HeaderName::from_static("x-request-id"), value);
    }
    response
}

fn apply_no_cache(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
}
