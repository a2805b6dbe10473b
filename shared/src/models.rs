//! Shared data models.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Business state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(Error::Validation(format!("Invalid status: {}", other))),
        }
    }
}

/// A booking record as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub notes: String,
    pub status: BookingStatus,
    pub created_at: String,
    /// Absent until the first status update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Public intake payload.
///
/// Every field is optional at the serde level so that a missing field
/// surfaces as a validation failure rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub notes: Option<String>,
}

impl Booking {
    /// Build a new pending booking from an intake submission.
    ///
    /// Requires `name`, `phone`, `service`, and `preferredDate` to be
    /// non-empty (`name`/`phone` after trimming); applies defaults for the
    /// optional fields and stamps a fresh id and creation time.
    pub fn from_submission(submission: BookingSubmission) -> Result<Self> {
        let name = submission.name.as_deref().map(str::trim).unwrap_or("");
        let phone = submission.phone.as_deref().map(str::trim).unwrap_or("");
        let service = submission.service.as_deref().unwrap_or("");
        let preferred_date = submission.preferred_date.as_deref().unwrap_or("");

        if name.is_empty() || phone.is_empty() || service.is_empty() || preferred_date.is_empty() {
            return Err(Error::Validation("Missing fields".to_string()));
        }

        Ok(Self {
            booking_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            service: service.to_string(),
            preferred_date: preferred_date.to_string(),
            preferred_time: submission
                .preferred_time
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Not specified".to_string()),
            notes: submission.notes.unwrap_or_default(),
            status: BookingStatus::Pending,
            created_at: now_timestamp(),
            updated_at: None,
        })
    }
}

/// Current time as an ISO-8601 string (millisecond precision, `Z` suffix).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
