//! Professional directory routes

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::{
    AvailabilityRequest, PaymentKeyRequest, Profession, ProfessionalQuery, ProfessionalSummary,
};
use crate::error::ApiResult;

#[derive(Debug, Deserialize, Default)]
pub struct ProfessionalListParams {
    pub profession: Option<Profession>,
    pub available: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /professionals
pub async fn list_professionals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProfessionalListParams>,
) -> impl IntoResponse {
    let query = ProfessionalQuery {
        profession: params.profession,
        available: params.available,
    };
    let pagination = PaginationParams {
        page: params.page,
        per_page: params.per_page,
    };

    let market = state.marketplace.read();
    let summaries = market
        .list_professionals(&query)
        .into_iter()
        .map(ProfessionalSummary::from);
    Paginated::from_items(summaries, &pagination)
}

/// GET /professionals/:id
pub async fn get_professional(
    State(state): State<Arc<AppState>>,
    Path(professional_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let professional = state
        .marketplace
        .read()
        .professional(professional_id)?
        .clone();
    Ok(DataResponse::new(professional))
}

/// PUT /professionals/me/availability
pub async fn set_availability(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<AvailabilityRequest>,
) -> ApiResult<impl IntoResponse> {
    let professional = state
        .marketplace
        .write()
        .set_availability(&auth.actor(), req.is_available)?;
    Ok(DataResponse::new(professional))
}

/// PUT /professionals/me/payment-key
pub async fn set_payment_key(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<PaymentKeyRequest>,
) -> ApiResult<impl IntoResponse> {
    let professional = state
        .marketplace
        .write()
        .set_payment_key(&auth.actor(), req.pix_key.as_deref())?;
    Ok(DataResponse::new(professional))
}
