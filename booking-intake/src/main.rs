//! Booking Intake Lambda - Accepts public booking submissions.
//!
//! A single CORS-enabled endpoint: OPTIONS answers the browser preflight,
//! anything else is treated as a submission POST. Valid submissions become
//! new `pending` records in the bookings table.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use shared::http::{json_response, preflight_response, INTAKE_CORS};
use shared::{Booking, BookingStore, BookingSubmission, Config, DynamoStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Successful submission response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntakeResponse {
    success: bool,
    booking_id: String,
    message: String,
}

/// Application state shared across warm invocations.
struct AppState {
    store: Arc<dyn BookingStore>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let store = DynamoStore::from_env(config.table_name).await;

        Ok(Self {
            store: Arc::new(store),
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return preflight_response(&INTAKE_CORS);
    }

    match create_booking(&state, &event).await {
        Ok(response) => json_response(200, &INTAKE_CORS, &response),
        Err(shared::Error::Validation(message)) => {
            info!("Rejected submission: {}", message);
            json_response(
                400,
                &INTAKE_CORS,
                &serde_json::json!({ "success": false, "message": message }),
            )
        }
        Err(err) => {
            error!("Booking submission failed: {}", err);
            json_response(
                500,
                &INTAKE_CORS,
                &serde_json::json!({ "success": false, "error": err.to_string() }),
            )
        }
    }
}

async fn create_booking(state: &AppState, event: &Request) -> shared::Result<IntakeResponse> {
    let submission: BookingSubmission = serde_json::from_slice(event.body().as_ref())?;
    let booking = Booking::from_submission(submission)?;

    state.store.put_if_not_exists(&booking).await?;

    info!("Created booking {}", booking.booking_id);

    Ok(IntakeResponse {
        success: true,
        booking_id: booking.booking_id,
        message: "Booking created!".to_string(),
    })
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lambda_http::http;
    use shared::BookingStatus;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        items: Mutex<Vec<Booking>>,
    }

    #[async_trait]
    impl BookingStore for MemoryStore {
        async fn put_if_not_exists(&self, booking: &Booking) -> shared::Result<()> {
            let mut items = self.items.lock().unwrap();
            if items.iter().any(|b| b.booking_id == booking.booking_id) {
                return Err(shared::Error::Store("duplicate booking id".to_string()));
            }
            items.push(booking.clone());
            Ok(())
        }

        async fn scan_all(&self) -> shared::Result<Vec<Booking>> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn update_status(
            &self,
            booking_id: &str,
            status: BookingStatus,
            updated_at: &str,
        ) -> shared::Result<Booking> {
            let mut items = self.items.lock().unwrap();
            let booking = items
                .iter_mut()
                .find(|b| b.booking_id == booking_id)
                .ok_or_else(|| shared::Error::NotFound("Booking not found".to_string()))?;
            booking.status = status;
            booking.updated_at = Some(updated_at.to_string());
            Ok(booking.clone())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl BookingStore for FailingStore {
        async fn put_if_not_exists(&self, _booking: &Booking) -> shared::Result<()> {
            Err(shared::Error::Store("table unavailable".to_string()))
        }

        async fn scan_all(&self) -> shared::Result<Vec<Booking>> {
            Err(shared::Error::Store("table unavailable".to_string()))
        }

        async fn update_status(
            &self,
            _booking_id: &str,
            _status: BookingStatus,
            _updated_at: &str,
        ) -> shared::Result<Booking> {
            Err(shared::Error::Store("table unavailable".to_string()))
        }
    }

    fn app_state(store: Arc<dyn BookingStore>) -> Arc<AppState> {
        Arc::new(AppState { store })
    }

    fn post(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    const VALID: &str = r#"{"name":"Jo","phone":"555-1111","service":"Braids","preferredDate":"2026-02-14"}"#;

    #[tokio::test]
    async fn test_valid_submission_creates_pending_booking() {
        let store = Arc::new(MemoryStore::default());
        let state = app_state(store.clone());

        let response = handler(state, post(VALID)).await.unwrap();
        assert_eq!(response.status(), 200);

        let body = body_json(&response);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Booking created!");
        assert!(!body["bookingId"].as_str().unwrap().is_empty());

        let items = store.items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, BookingStatus::Pending);
        assert_eq!(items[0].preferred_time, "Not specified");
        assert_eq!(items[0].notes, "");
        assert!(!items[0].created_at.is_empty());
    }

    #[tokio::test]
    async fn test_booking_ids_are_unique_across_submissions() {
        let store = Arc::new(MemoryStore::default());
        let state = app_state(store.clone());

        let first = body_json(&handler(state.clone(), post(VALID)).await.unwrap());
        let second = body_json(&handler(state, post(VALID)).await.unwrap());
        assert_ne!(first["bookingId"], second["bookingId"]);
        assert_eq!(store.items.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_without_touching_store() {
        let store = Arc::new(MemoryStore::default());
        let state = app_state(store.clone());

        let response = handler(
            state,
            post(r#"{"name":"Jo","service":"Braids","preferredDate":"2026-02-14"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), 400);
        let body = body_json(&response);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing fields");
        assert!(store.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let state = app_state(store.clone());

        let response = handler(
            state,
            post(r#"{"name":"   ","phone":"555-1111","service":"Braids","preferredDate":"2026-02-14"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), 400);
        assert!(store.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_server_error() {
        let store = Arc::new(MemoryStore::default());
        let response = handler(app_state(store), post("not json")).await.unwrap();

        assert_eq!(response.status(), 500);
        let body = body_json(&response);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_store_failure_is_a_server_error() {
        let response = handler(app_state(Arc::new(FailingStore)), post(VALID))
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        assert_eq!(body_json(&response)["success"], false);
    }

    #[tokio::test]
    async fn test_options_preflight_skips_the_store() {
        let store = Arc::new(MemoryStore::default());
        let state = app_state(store.clone());

        let request = http::Request::builder()
            .method("OPTIONS")
            .body(Body::Empty)
            .unwrap();
        let response = handler(state, request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert!(matches!(response.body(), Body::Empty));
        assert!(store.items.lock().unwrap().is_empty());
    }
}
