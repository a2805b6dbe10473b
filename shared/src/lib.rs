//! Shared library for the booking Lambda functions.
//!
//! This crate provides the models, configuration, store client, and HTTP
//! helpers used by both the intake and admin Lambdas.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::Config;
pub use db::{BookingStore, DynamoStore};
pub use error::{Error, Result};
pub use models::{now_timestamp, Booking, BookingStatus, BookingSubmission};
