//! Support ticket routes

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::{CreateTicketRequest, TicketReplyRequest};
use crate::error::ApiResult;

/// GET /support/tickets
///
/// Administrators see every ticket. Newest first.
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
    auth: RequireAuth,
) -> impl IntoResponse {
    let market = state.marketplace.read();
    let tickets = market
        .tickets_for(&auth.actor())
        .into_iter()
        .rev()
        .cloned();
    Paginated::from_items(tickets, &pagination)
}

/// POST /support/tickets
pub async fn open_ticket(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<CreateTicketRequest>,
) -> ApiResult<impl IntoResponse> {
    let ticket = state
        .marketplace
        .write()
        .open_ticket(&auth.actor(), &req.subject, &req.message)?;
    Ok(Created(ticket))
}

/// POST /support/tickets/:id/messages
pub async fn reply_to_ticket(
    State(state): State<Arc<AppState>>,
    Path(ticket_id): Path<Uuid>,
    auth: RequireAuth,
    Json(req): Json<TicketReplyRequest>,
) -> ApiResult<impl IntoResponse> {
    let ticket = state
        .marketplace
        .write()
        .reply_to_ticket(&auth.actor(), ticket_id, &req.text)?;
    Ok(Created(ticket))
}

/// POST /support/tickets/:id/toggle
pub async fn toggle_ticket_status(
    State(state): State<Arc<AppState>>,
    Path(ticket_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let ticket = state
        .marketplace
        .write()
        .toggle_ticket_status(&auth.actor(), ticket_id)?;
    Ok(DataResponse::new(ticket))
}
