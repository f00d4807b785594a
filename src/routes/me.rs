use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::{Client, Professional, Role};
use crate::error::{ApiError, ApiResult};

#[derive(Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum MeResponse {
    Client(Client),
    Professional(Professional),
    Admin { user_id: Uuid },
}

#[derive(Serialize)]
pub struct OfferFlag {
    pub has_new_offers: bool,
}

/// GET /me
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    let market = state.marketplace.read();
    let me = match auth.role {
        Role::Client => MeResponse::Client(market.client(auth.user_id)?.clone()),
        Role::Professional => MeResponse::Professional(market.professional(auth.user_id)?.clone()),
        Role::Admin => MeResponse::Admin {
            user_id: auth.user_id,
        },
    };
    Ok(DataResponse::new(me))
}

/// GET /me/offers
///
/// Whether any of the client's quotes is waiting on them to answer an offer.
pub async fn get_offer_flag(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> ApiResult<impl IntoResponse> {
    if auth.role != Role::Client {
        return Err(ApiError::forbidden("Only clients receive offers"));
    }
    let has_new_offers = state.marketplace.read().has_new_offers(auth.user_id);
    Ok(DataResponse::new(OfferFlag { has_new_offers }))
}
