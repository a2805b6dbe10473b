//! Booking Admin Lambda - Lists bookings and updates booking status.
//!
//! Every non-OPTIONS request must carry the `X-Admin-Password` header:
//! - GET lists every booking, newest first.
//! - POST sets one booking's status (`pending`, `confirmed`, or `cancelled`).

use chrono::{DateTime, FixedOffset};
use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};
use shared::auth;
use shared::http::{json_response, preflight_response, ADMIN_CORS};
use shared::{now_timestamp, Booking, BookingStatus, BookingStore, Config, DynamoStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Status update payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusRequest {
    booking_id: Option<String>,
    status: Option<String>,
}

/// Booking list response.
#[derive(Debug, Serialize)]
struct ListResponse {
    bookings: Vec<Booking>,
    count: usize,
}

/// Status update response.
#[derive(Debug, Serialize)]
struct UpdateResponse {
    message: String,
    booking: Booking,
}

/// Application state shared across warm invocations.
struct AppState {
    store: Arc<dyn BookingStore>,
    admin_password: String,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let admin_password = config
            .admin_password
            .ok_or_else(|| shared::Error::Config("ADMIN_PASSWORD not set".to_string()))?;
        let store = DynamoStore::from_env(config.table_name).await;

        Ok(Self {
            store: Arc::new(store),
            admin_password,
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    info!("Admin request: {}", event.method());

    if event.method() == Method::OPTIONS {
        return preflight_response(&ADMIN_CORS);
    }

    match route(&state, &event).await {
        Ok(response) => Ok(response),
        Err(err) => {
            let status = err.status_code();
            if status == 500 {
                error!("Admin request failed: {}", err);
            }
            let body = match &err {
                shared::Error::MethodNotAllowed(method) => {
                    serde_json::json!({ "error": "Method not allowed", "method": method })
                }
                shared::Error::Auth(message)
                | shared::Error::Validation(message)
                | shared::Error::NotFound(message) => serde_json::json!({ "error": message }),
                _ => serde_json::json!({
                    "error": "Internal server error",
                    "message": err.to_string(),
                }),
            };
            json_response(status, &ADMIN_CORS, &body)
        }
    }
}

async fn route(state: &AppState, event: &Request) -> shared::Result<Response<Body>> {
    auth::authenticate(event.headers(), &state.admin_password)?;

    match event.method().as_str() {
        "GET" => list_bookings(state).await,
        "POST" => update_booking(state, event).await,
        other => Err(shared::Error::MethodNotAllowed(other.to_string())),
    }
}

async fn list_bookings(state: &AppState) -> shared::Result<Response<Body>> {
    let mut bookings = state.store.scan_all().await?;
    sort_newest_first(&mut bookings);

    let count = bookings.len();
    info!("Listing {} bookings", count);

    Ok(json_response(200, &ADMIN_CORS, &ListResponse { bookings, count })?)
}

async fn update_booking(state: &AppState, event: &Request) -> shared::Result<Response<Body>> {
    let request: UpdateStatusRequest = serde_json::from_slice(event.body().as_ref())?;

    let (booking_id, status) = match (request.booking_id.as_deref(), request.status.as_deref()) {
        (Some(id), Some(status)) if !id.is_empty() && !status.is_empty() => (id, status),
        _ => {
            return Err(shared::Error::Validation(
                "Missing bookingId or status".to_string(),
            ))
        }
    };

    let status = status.parse::<BookingStatus>().map_err(|_| {
        shared::Error::Validation(
            "Invalid status. Must be: pending, confirmed, or cancelled".to_string(),
        )
    })?;

    let booking = state
        .store
        .update_status(booking_id, status, &now_timestamp())
        .await?;

    info!(
        "Booking {} set to {}",
        booking.booking_id,
        booking.status.as_str()
    );

    Ok(json_response(
        200,
        &ADMIN_CORS,
        &UpdateResponse {
            message: "Booking status updated successfully".to_string(),
            booking,
        },
    )?)
}

/// Newest first by `createdAt`. The sort is stable, so records with equal or
/// unparseable timestamps keep the store's natural scan order.
fn sort_newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| parse_timestamp(&b.created_at).cmp(&parse_timestamp(&a.created_at)));
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
