//! DynamoDB-backed booking store.
//!
//! The table is keyed by `bookingId` alone; all operations are single
//! request/response calls with per-item atomicity and nothing else.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

use crate::models::{Booking, BookingStatus};
use crate::{Error, Result};

/// Store operations the handlers need from the record store.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Create-only write. Fails rather than silently overwriting an
    /// existing record.
    async fn put_if_not_exists(&self, booking: &Booking) -> Result<()>;

    /// Full unfiltered read of the table, in natural scan order.
    async fn scan_all(&self) -> Result<Vec<Booking>>;

    /// Set `status` and `updatedAt` on a single existing record and return
    /// the post-update record. Unknown ids are `Error::NotFound`.
    async fn update_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
        updated_at: &str,
    ) -> Result<Booking>;
}

/// Booking store backed by a DynamoDB table.
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a store from the ambient AWS environment.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }
}

#[async_trait]
impl BookingStore for DynamoStore {
    async fn put_if_not_exists(&self, booking: &Booking) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(booking)))
            .condition_expression("attribute_not_exists(bookingId)")
            .send()
            .await
            .map_err(|e| Error::Store(e.into_service_error().to_string()))?;
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Booking>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| Error::Store(e.into_service_error().to_string()))?;

        output.items().iter().map(from_item).collect()
    }

    async fn update_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
        updated_at: &str,
    ) -> Result<Booking> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("bookingId", AttributeValue::S(booking_id.to_string()))
            .update_expression("SET #status = :status, updatedAt = :updatedAt")
            .condition_expression("attribute_exists(bookingId)")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":status", AttributeValue::S(status.as_str().to_string()))
            .expression_attribute_values(":updatedAt", AttributeValue::S(updated_at.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    Error::NotFound("Booking not found".to_string())
                } else {
                    Error::Store(service_error.to_string())
                }
            })?;

        let attributes = output
            .attributes()
            .ok_or_else(|| Error::Store("update returned no attributes".to_string()))?;

        from_item(attributes)
    }
}

fn to_item(booking: &Booking) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        (
            "bookingId".to_string(),
            AttributeValue::S(booking.booking_id.clone()),
        ),
        ("name".to_string(), AttributeValue::S(booking.name.clone())),
        ("phone".to_string(), AttributeValue::S(booking.phone.clone())),
        (
            "service".to_string(),
            AttributeValue::S(booking.service.clone()),
        ),
        (
            "preferredDate".to_string(),
            AttributeValue::S(booking.preferred_date.clone()),
        ),
        (
            "preferredTime".to_string(),
            AttributeValue::S(booking.preferred_time.clone()),
        ),
        ("notes".to_string(), AttributeValue::S(booking.notes.clone())),
        (
            "status".to_string(),
            AttributeValue::S(booking.status.as_str().to_string()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(booking.created_at.clone()),
        ),
    ]);

    if let Some(updated_at) = &booking.updated_at {
        item.insert("updatedAt".to_string(), AttributeValue::S(updated_at.clone()));
    }

    item
}

fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Booking> {
    let booking_id = required_attr(item, "bookingId")?;
    let status = required_attr(item, "status")?
        .parse::<BookingStatus>()
        .map_err(|_| Error::Store(format!("invalid status on item {}", booking_id)))?;

    Ok(Booking {
        booking_id,
        name: required_attr(item, "name")?,
        phone: required_attr(item, "phone")?,
        service: required_attr(item, "service")?,
        preferred_date: required_attr(item, "preferredDate")?,
        preferred_time: optional_attr(item, "preferredTime")
            .unwrap_or_else(|| "Not specified".to_string()),
        notes: optional_attr(item, "notes").unwrap_or_default(),
        status,
        created_at: required_attr(item, "createdAt")?,
        updated_at: optional_attr(item, "updatedAt"),
    })
}

fn required_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    optional_attr(item, name).ok_or_else(|| Error::Store(format!("item missing attribute {}", name)))
}

fn optional_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name).and_then(|value| value.as_s().ok()).cloned()
}
