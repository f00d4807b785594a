//! Quote routes
//!
//! Thin handlers: take the write lock, run one engine operation, return the
//! quote snapshot it produced.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::{
    CreateQuoteRequest, OfferPayload, Professional, Quote, QuoteQuery, QuoteStatus, ReviewRequest,
    ScheduleVisitRequest, SendMessageRequest, TransitUpdateRequest,
};
use crate::error::ApiResult;
use crate::services::pricing::parse_clock_time;

#[derive(Debug, Deserialize, Default)]
pub struct QuoteListParams {
    pub status: Option<QuoteStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub quote: Quote,
    pub professional: Professional,
}

/// GET /quotes
///
/// The caller's quotes, newest first.
pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuoteListParams>,
    auth: RequireAuth,
) -> impl IntoResponse {
    let query = QuoteQuery {
        status: params.status,
    };
    let pagination = PaginationParams {
        page: params.page,
        per_page: params.per_page,
    };

    let market = state.marketplace.read();
    let quotes = market
        .quotes_for(&auth.actor(), &query)
        .into_iter()
        .rev()
        .cloned();
    Paginated::from_items(quotes, &pagination)
}

/// POST /quotes
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<CreateQuoteRequest>,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .create_quote(&auth.actor(), req.professional_id, &req.message)?;
    Ok(Created(quote))
}

/// GET /quotes/:id
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .read()
        .view_quote(&auth.actor(), quote_id)?
        .clone();
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/offers
pub async fn submit_offer(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
    Json(payload): Json<OfferPayload>,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .submit_offer(&auth.actor(), quote_id, &payload)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/accept
pub async fn accept_offer(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .accept_offer(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/reject
pub async fn reject_offer(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .reject_offer(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/schedule
pub async fn schedule_visit(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
    Json(req): Json<ScheduleVisitRequest>,
) -> ApiResult<impl IntoResponse> {
    let time = parse_clock_time(&req.time)?;
    let quote = state
        .marketplace
        .write()
        .schedule_visit(&auth.actor(), quote_id, req.date, time)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/confirm-visit
pub async fn confirm_visit(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .confirm_visit(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/navigation
pub async fn start_navigation(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .start_navigation(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/transit-updates
pub async fn send_transit_update(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
    Json(req): Json<TransitUpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .send_transit_update(&auth.actor(), quote_id, &req.text)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/complete
pub async fn complete_service(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .complete_service(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/review
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
    Json(req): Json<ReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let (quote, professional) = state.marketplace.write().submit_review(
        &auth.actor(),
        quote_id,
        req.rating,
        &req.comment,
    )?;
    Ok(Created(ReviewResponse {
        quote,
        professional,
    }))
}

/// POST /quotes/:id/payment/request
pub async fn request_payment(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .request_payment(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// GET /quotes/:id/payment/instruction
pub async fn payment_instruction(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let instruction = state
        .marketplace
        .read()
        .payment_instruction(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(instruction))
}

/// POST /quotes/:id/payment/confirm
pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .confirm_payment(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}

/// POST /quotes/:id/messages
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .send_message(&auth.actor(), quote_id, &req.text)?;
    Ok(Created(quote))
}

/// POST /quotes/:id/messages/read
pub async fn mark_messages_read(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<Uuid>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let quote = state
        .marketplace
        .write()
        .mark_messages_read(&auth.actor(), quote_id)?;
    Ok(DataResponse::new(quote))
}
