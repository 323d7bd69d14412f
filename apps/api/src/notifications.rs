//! Applicant status notifications, published on a Redis channel for the
//! SMS/e-mail worker to pick up.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::internship::ApplicationStatus;

pub const STATUS_CHANNEL: &str = "applicant_status";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusNotification {
    pub student_id: Uuid,
    pub internship_id: Uuid,
    pub status: ApplicationStatus,
    pub phone: Option<String>,
    pub message: String,
}

impl StatusNotification {
    pub fn new(
        student_id: Uuid,
        internship_id: Uuid,
        status: ApplicationStatus,
        phone: Option<String>,
        company_name: &str,
        role: &str,
    ) -> Self {
        Self {
            student_id,
            internship_id,
            status,
            phone,
            message: status_message(company_name, role, status),
        }
    }
}

/// Delivery seam for status notifications. Carried in `AppState` as `Arc<dyn Notifier>`.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &StatusNotification) -> Result<(), AppError>;
}

pub struct RedisNotifier {
    client: redis::Client,
}

impl RedisNotifier {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    async fn notify(&self, notification: &StatusNotification) -> Result<(), AppError> {
        let payload = serde_json::to_string(notification)
            .map_err(|e| AppError::Notification(format!("serialize failed: {e}")))?;

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Notification(e.to_string()))?;

        let receivers: i64 = conn
            .publish(STATUS_CHANNEL, payload)
            .await
            .map_err(|e| AppError::Notification(e.to_string()))?;

        debug!(
            "Published {} status for student {} to {receivers} subscriber(s)",
            notification.status, notification.student_id
        );
        Ok(())
    }
}

fn status_message(company_name: &str, role: &str, status: ApplicationStatus) -> String {
    format!("TalentFlow: {company_name} has {status} your application for the role '{role}'.")
}
