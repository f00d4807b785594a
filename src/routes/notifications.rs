//! Notification routes
//!
//! In-app inbox: list, unread count, mark read.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::{MarkReadRequest, UnreadCountResponse};

#[derive(Debug, Deserialize, Default)]
pub struct NotificationListParams {
    pub unread_only: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub marked: usize,
}

/// GET /notifications
///
/// Newest first.
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotificationListParams>,
    auth: RequireAuth,
) -> impl IntoResponse {
    let pagination = PaginationParams {
        page: params.page,
        per_page: params.per_page,
    };

    let market = state.marketplace.read();
    let notifications = market
        .notifications_for(auth.user_id, params.unread_only.unwrap_or(false))
        .into_iter()
        .cloned();
    Paginated::from_items(notifications, &pagination)
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> impl IntoResponse {
    let count = state.marketplace.read().unread_count(auth.user_id);
    DataResponse::new(UnreadCountResponse { count })
}

/// PUT /notifications/read
///
/// Marks the listed notifications, or all of them when no ids are given.
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<MarkReadRequest>,
) -> impl IntoResponse {
    let marked = state
        .marketplace
        .write()
        .mark_notifications_read(auth.user_id, req.notification_ids.as_deref());

    tracing::debug!(user_id = %auth.user_id, marked = marked, "Notifications marked read");
    DataResponse::new(MarkReadResponse { marked })
}
