//! Notification domain types
//!
//! In-app inbox entries recorded after a quote or ticket change commits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    // Quote negotiation
    QuoteReceived,
    OfferReceived,
    OfferAccepted,
    OfferRejected,
    VisitScheduled,

    // Service day
    ProfessionalEnRoute,
    TransitUpdate,
    ServiceCompleted,
    ReviewReceived,

    // Payment
    PaymentRequested,
    PaymentConfirmed,

    // Conversation
    NewMessage,
    SupportReply,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_string(self).unwrap_or_default();
        write!(f, "{}", s.trim_matches('"'))
    }
}

/// Notification entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub quote_id: Option<Uuid>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Query params for listing notifications
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: Option<bool>,
}

/// Unread count response
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: usize,
}

/// Mark notifications as read request; `None` marks everything
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MarkReadRequest {
    #[serde(default)]
    pub notification_ids: Option<Vec<Uuid>>,
}
