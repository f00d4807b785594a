use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{Created, DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::{CreateDenunciationRequest, DenunciationReason, ReasonOption};
use crate::error::ApiResult;

/// GET /denunciations/reasons
pub async fn list_reasons() -> impl IntoResponse {
    let reasons: Vec<ReasonOption> = DenunciationReason::ALL
        .iter()
        .map(|&reason| ReasonOption {
            reason,
            label: reason.label(),
        })
        .collect();
    DataResponse::new(reasons)
}

/// POST /denunciations
pub async fn file_denunciation(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<CreateDenunciationRequest>,
) -> ApiResult<impl IntoResponse> {
    let denunciation = state.marketplace.write().file_denunciation(
        &auth.actor(),
        req.professional_id,
        req.reason,
        &req.description,
    )?;
    Ok(Created(denunciation))
}

/// GET /denunciations
///
/// Administrators see every record, clients see their own.
pub async fn list_denunciations(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
    auth: RequireAuth,
) -> impl IntoResponse {
    let market = state.marketplace.read();
    let denunciations = market
        .denunciations_for(&auth.actor())
        .into_iter()
        .rev()
        .cloned();
    Paginated::from_items(denunciations, &pagination)
}
