//! HTTP helpers for the booking Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;

/// CORS allowances for one endpoint.
#[derive(Debug)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

/// Policy for the public intake endpoint.
pub const INTAKE_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type",
};

/// Policy for the admin endpoint.
pub const ADMIN_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "GET,POST,OPTIONS",
    allow_headers: "Content-Type,X-Admin-Password",
};

/// Create a JSON response with the given status code, CORS headers, and body.
pub fn json_response<T: Serialize>(
    status: u16,
    cors: &CorsPolicy,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", cors.allow_headers)
        .header("Access-Control-Allow-Methods", cors.allow_methods)
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Empty 200 response for a CORS preflight request.
pub fn preflight_response(cors: &CorsPolicy) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(200)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", cors.allow_headers)
        .header("Access-Control-Allow-Methods", cors.allow_methods)
        .body(Body::Empty)?)
}
